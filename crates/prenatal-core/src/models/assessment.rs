use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::marker::{Marker, MarkerResult, ScreeningWindow};
use super::patient::Patient;
use super::risk::{AgeMultipliers, ConditionRisks, Recommendation, RiskSummary};
use crate::error::CoreError;

/// The full record of one calculation event. Never mutated after creation;
/// a recalculation produces a new assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientAssessment {
    pub id: Uuid,
    pub patient: Patient,
    pub maternal_age_years: f64,
    pub gestational_week: u32,
    pub window: ScreeningWindow,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    /// Every scored reading, including first-trimester readings carried
    /// into a second-window assessment.
    pub markers: Vec<MarkerResult>,
    pub risks: ConditionRisks,
    pub age_risk: AgeMultipliers,
    pub quad_correction: Option<f64>,
    pub summaries: Vec<RiskSummary>,
    pub recommendation: Recommendation,
    pub created_at: jiff::Timestamp,
}

impl PatientAssessment {
    pub fn mom(&self, marker: Marker) -> Option<f64> {
        self.markers
            .iter()
            .find(|r| r.reading.marker == marker)
            .map(|r| r.mom)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
