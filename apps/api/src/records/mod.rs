//! Account, contact and interaction operations. Every multi-statement write
//! runs in a single transaction.

pub mod accounts;
pub mod contacts;
pub mod handlers;
pub mod interactions;
