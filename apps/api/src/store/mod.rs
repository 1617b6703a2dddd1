//! Query gateway: the only code that issues SQL against the CRM schema.
//!
//! Single-statement functions accept any `SqliteExecutor`, so callers can run
//! them against the pool or inside an open transaction. Functions that need
//! several statements to stay atomic open their own transaction.

pub mod accounts;
pub mod contacts;
pub mod interactions;
pub mod tags;
