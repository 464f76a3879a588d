//! prenatal-screening
//!
//! Maternal serum screening risk engine. Pure computation, no I/O.
//! Normalises raw marker concentrations into multiples of the median,
//! interpolates the maternal-age prior, and runs the threshold rule table
//! that turns both into a posterior risk per condition.

pub mod age;
pub mod assess;
pub mod classify;
pub mod error;
pub mod interpret;
pub mod mom;
pub mod norms;
pub mod rules;
pub mod validate;

pub use assess::{assess, assess_validated, bmi};
pub use classify::{classify, odds};
pub use error::ScreeningError;
pub use mom::compute_mom;
pub use rules::{MomInputs, compute_risks};
