use prenatal_core::models::assessment::PatientAssessment;
use prenatal_core::models::marker::{Marker, MarkerResult};
use prenatal_core::models::patient::{Patient, PatientId};
use prenatal_core::models::request::{
    FirstTrimesterPanel, MarkerPanel, Screening, ScreeningRequest,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::classify::summarize_all;
use crate::error::ScreeningError;
use crate::interpret::{marker_status, recommend};
use crate::mom::reading_mom;
use crate::rules::{MomInputs, compute_risks};
use crate::validate::validate_request;

/// BMI used when height is unknown.
pub const DEFAULT_BMI: f64 = 22.0;

/// Body-mass index rounded to one decimal place.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return DEFAULT_BMI;
    }
    let metres = height_cm / 100.0;
    (weight_kg / (metres * metres) * 10.0).round() / 10.0
}

fn score_panel(panel: &impl MarkerPanel, weight: Option<f64>) -> Vec<MarkerResult> {
    panel
        .readings()
        .into_iter()
        .map(|reading| {
            let mom = reading_mom(&reading, weight);
            MarkerResult {
                reading,
                mom,
                status: marker_status(&reading, mom),
            }
        })
        .collect()
}

fn mom_of(results: &[MarkerResult], marker: Marker) -> Option<f64> {
    results
        .iter()
        .find(|r| r.reading.marker == marker)
        .map(|r| r.mom)
}

fn first_trimester_inputs(
    panel: &FirstTrimesterPanel,
    weight: Option<f64>,
) -> (Vec<MarkerResult>, MomInputs) {
    let results = score_panel(panel, weight);
    let inputs = MomInputs::first_trimester(
        mom_of(&results, Marker::Nt).unwrap_or(1.0),
        mom_of(&results, Marker::PappA).unwrap_or(1.0),
        mom_of(&results, Marker::FreeBetaHcg).unwrap_or(1.0),
    );
    (results, inputs)
}

/// Score a request into a complete assessment record.
///
/// Never fails: out-of-range inputs are scored as given. Use
/// [`assess_validated`] to reject them first.
pub fn assess(request: &ScreeningRequest, created_at: jiff::Timestamp) -> PatientAssessment {
    let weight = request.correction_weight();

    let (markers, inputs) = match &request.screening {
        Screening::First { panel } => first_trimester_inputs(panel, weight),
        Screening::Second {
            panel,
            first_trimester,
        } => {
            let second = score_panel(panel, weight);
            let (mut markers, first_inputs) = match first_trimester {
                Some(first) => first_trimester_inputs(first, weight),
                None => (Vec::new(), MomInputs::first_trimester(1.0, 1.0, 1.0)),
            };
            let inputs = first_inputs.with_second_trimester(
                mom_of(&second, Marker::Afp).unwrap_or(0.0),
                mom_of(&second, Marker::TotalHcg).unwrap_or(0.0),
                mom_of(&second, Marker::Ue3).unwrap_or(0.0),
            );
            markers.extend(second);
            (markers, inputs)
        }
    };

    let patient_id = request
        .patient_id
        .clone()
        .unwrap_or_else(|| PatientId::generate(created_at));

    debug!(
        patient = %patient_id,
        window = %request.window(),
        week = request.gestational_week(),
        "scoring assessment"
    );

    let profile = compute_risks(request.maternal_age_years, &inputs);

    PatientAssessment {
        id: Uuid::new_v4(),
        patient: Patient {
            id: patient_id,
            name: request.patient_name.trim().to_string(),
        },
        maternal_age_years: request.maternal_age_years,
        gestational_week: request.gestational_week(),
        window: request.window(),
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        bmi: bmi(request.weight_kg, request.height_cm),
        markers,
        risks: profile.risks,
        age_risk: profile.age_risk,
        quad_correction: profile.quad_correction,
        summaries: summarize_all(&profile.risks),
        recommendation: recommend(&profile.risks),
        created_at,
    }
}

/// Validate, then score. When `enforce` is false, problems are logged and
/// the request is scored anyway.
pub fn assess_validated(
    request: &ScreeningRequest,
    created_at: jiff::Timestamp,
    enforce: bool,
) -> Result<PatientAssessment, ScreeningError> {
    let errors = validate_request(request);
    if !errors.is_empty() {
        if enforce {
            return Err(ScreeningError::InvalidRequest(errors));
        }
        for error in &errors {
            warn!(field = %error.field, "{}", error.message);
        }
    }
    Ok(assess(request, created_at))
}
