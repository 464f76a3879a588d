//! prenatal-history
//!
//! Append-only patient history, persisted as a single JSON array file.
//! Owned by the application; the scoring engine never touches it.

pub mod error;
pub mod store;

pub use error::HistoryError;
pub use store::HistoryStore;
