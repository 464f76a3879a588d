//! Multiple-of-median normalisation.

use prenatal_core::models::marker::{Marker, MarkerReading, ScreeningWindow};

use crate::error::ScreeningError;
use crate::norms;

/// Maternal weight at which the weight correction factor is 1.
pub const REFERENCE_WEIGHT_KG: f64 = 60.0;

/// MoM of `value` against the `window` reference table at `week`, with
/// optional maternal-weight correction. Rounded to 2 decimal places.
///
/// Errors only when `marker` is not part of `window`'s panel.
pub fn compute_mom(
    value: f64,
    marker: Marker,
    week: u32,
    maternal_weight_kg: Option<f64>,
    window: ScreeningWindow,
) -> Result<f64, ScreeningError> {
    let range = norms::lookup_in(window, marker, week)?;
    Ok(mom_from_median(value, range.median, marker, maternal_weight_kg))
}

/// MoM of a captured reading against its own window's table.
pub fn reading_mom(reading: &MarkerReading, maternal_weight_kg: Option<f64>) -> f64 {
    let range = norms::lookup(reading.marker, reading.gestational_week);
    mom_from_median(reading.value, range.median, reading.marker, maternal_weight_kg)
}

pub fn mom_from_median(
    value: f64,
    median: f64,
    marker: Marker,
    maternal_weight_kg: Option<f64>,
) -> f64 {
    if median <= 0.0 {
        return 1.0;
    }

    let mut mom = value / median;
    if let Some(weight) = maternal_weight_kg
        && weight > 0.0
        && marker.is_weight_dependent()
    {
        mom /= weight_correction(weight);
    }

    round2(mom).max(0.0)
}

/// Divisor applied to weight-dependent markers.
pub fn weight_correction(maternal_weight_kg: f64) -> f64 {
    (maternal_weight_kg / REFERENCE_WEIGHT_KG).sqrt()
}

/// Round to 2 decimal places from the exact binary value, so 2.005 (stored
/// as 2.00499...) rounds down to 2.0.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
