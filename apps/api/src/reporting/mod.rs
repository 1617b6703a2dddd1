//! Derived reporting views: pipeline funnel, interaction mix, weekly activity,
//! due actions and the contact overview.
//!
//! The `compute_*` functions are pure over already-fetched rows. `views`
//! fetches the rows and degrades every failure to an empty result.

pub mod activity;
pub mod cache;
pub mod dates;
pub mod due;
pub mod funnel;
pub mod handlers;
pub mod overview;
pub mod views;
