use prenatal_core::models::marker::{Marker, ScreeningWindow};
use prenatal_core::models::request::{MarkerPanel, Screening, ScreeningRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Accepted input range for a form field, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const MATERNAL_AGE: InputRange = InputRange::new(15.0, 55.0);
pub const HEIGHT_CM: InputRange = InputRange::new(140.0, 200.0);
pub const WEIGHT_KG: InputRange = InputRange::new(40.0, 150.0);

/// Range the input form accepts for a raw marker value.
pub fn marker_range(marker: Marker) -> InputRange {
    match marker {
        Marker::Nt => InputRange::new(0.5, 10.0),
        Marker::PappA => InputRange::new(0.1, 20.0),
        Marker::FreeBetaHcg => InputRange::new(1.0, 300.0),
        Marker::Afp => InputRange::new(1.0, 200.0),
        Marker::TotalHcg => InputRange::new(1000.0, 100000.0),
        Marker::Ue3 => InputRange::new(0.1, 20.0),
    }
}

pub fn week_range(window: ScreeningWindow) -> InputRange {
    let (first, last) = window.weeks();
    InputRange::new(first as f64, last as f64)
}

/// A single out-of-range or missing field.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub value: Option<f64>,
    pub expected_range: Option<InputRange>,
    pub message: String,
}

fn check(
    errors: &mut Vec<ValidationError>,
    field: &str,
    label: &str,
    value: f64,
    range: InputRange,
) {
    if !range.contains(value) {
        errors.push(ValidationError {
            field: field.to_string(),
            value: Some(value),
            expected_range: Some(range),
            message: format!(
                "{label} {value} is outside range [{}, {}]",
                range.min, range.max
            ),
        });
    }
}

fn check_panel(errors: &mut Vec<ValidationError>, prefix: &str, panel: &impl MarkerPanel) {
    check(
        errors,
        &format!("{prefix}.gestational_week"),
        "Gestational week",
        panel.gestational_week() as f64,
        week_range(panel.window()),
    );
    for (marker, value) in panel.values() {
        check(
            errors,
            &format!("{prefix}.{}", marker.id()),
            &format!("{} ({})", marker.name(), marker.unit()),
            value,
            marker_range(marker),
        );
    }
}

/// Validate a request against the ranges the input form enforces.
///
/// Scoring never calls this; it is total over any well-typed request.
pub fn validate_request(request: &ScreeningRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if request.patient_name.trim().is_empty() {
        errors.push(ValidationError {
            field: "patient_name".to_string(),
            value: None,
            expected_range: None,
            message: "Patient name is required".to_string(),
        });
    }

    check(
        &mut errors,
        "maternal_age_years",
        "Maternal age",
        request.maternal_age_years,
        MATERNAL_AGE,
    );
    check(&mut errors, "height_cm", "Height (cm)", request.height_cm, HEIGHT_CM);
    check(&mut errors, "weight_kg", "Weight (kg)", request.weight_kg, WEIGHT_KG);

    match &request.screening {
        Screening::First { panel } => check_panel(&mut errors, "panel", panel),
        Screening::Second {
            panel,
            first_trimester,
        } => {
            check_panel(&mut errors, "panel", panel);
            if let Some(first) = first_trimester {
                check_panel(&mut errors, "first_trimester", first);
            }
        }
    }

    errors
}
