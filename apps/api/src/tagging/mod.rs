//! Tag catalog and the account/contact ↔ tag associations.

pub mod handlers;
pub mod reconcile;
