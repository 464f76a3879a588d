//! prenatal-core
//!
//! Pure domain types for prenatal serum screening. No I/O; this is the
//! shared vocabulary between the scoring engine, the history store, and the
//! dashboard that renders results.

pub mod error;
pub mod models;
