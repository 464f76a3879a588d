use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::marker::{Marker, MarkerReading, ScreeningWindow};
use super::patient::PatientId;

/// Everything the input form collects for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningRequest {
    /// Generated from the calculation time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
    pub patient_name: String,
    pub maternal_age_years: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub screening: Screening,
}

impl ScreeningRequest {
    pub fn window(&self) -> ScreeningWindow {
        self.screening.window()
    }

    pub fn gestational_week(&self) -> u32 {
        match &self.screening {
            Screening::First { panel } => panel.gestational_week,
            Screening::Second { panel, .. } => panel.gestational_week,
        }
    }

    /// Weight used for MoM correction; a non-positive weight means "not
    /// supplied".
    pub fn correction_weight(&self) -> Option<f64> {
        (self.weight_kg > 0.0).then_some(self.weight_kg)
    }
}

/// The marker panels captured for the selected screening window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "window", rename_all = "snake_case")]
#[ts(export)]
pub enum Screening {
    First {
        panel: FirstTrimesterPanel,
    },
    Second {
        panel: SecondTrimesterPanel,
        /// Optional earlier combined-test results for combined scoring.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        first_trimester: Option<FirstTrimesterPanel>,
    },
}

impl Screening {
    pub fn window(&self) -> ScreeningWindow {
        match self {
            Screening::First { .. } => ScreeningWindow::First,
            Screening::Second { .. } => ScreeningWindow::Second,
        }
    }
}

/// Combined-test panel: NT ultrasound plus PAPP-A and free β-hCG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FirstTrimesterPanel {
    pub gestational_week: u32,
    pub nt_mm: f64,
    pub papp_a: f64,
    pub free_beta_hcg: f64,
}

/// Quad-test panel as captured by this system: AFP, total hCG and uE3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SecondTrimesterPanel {
    pub gestational_week: u32,
    pub afp: f64,
    pub total_hcg: f64,
    pub ue3: f64,
}

/// Shared behaviour of the per-window marker panels.
pub trait MarkerPanel {
    fn window(&self) -> ScreeningWindow;

    fn gestational_week(&self) -> u32;

    /// Raw values in panel order.
    fn values(&self) -> [(Marker, f64); 3];

    fn readings(&self) -> Vec<MarkerReading> {
        self.values()
            .into_iter()
            .map(|(marker, value)| MarkerReading::new(marker, value, self.gestational_week()))
            .collect()
    }

    fn value(&self, marker: Marker) -> Option<f64> {
        self.values()
            .into_iter()
            .find(|(m, _)| *m == marker)
            .map(|(_, v)| v)
    }
}

impl MarkerPanel for FirstTrimesterPanel {
    fn window(&self) -> ScreeningWindow {
        ScreeningWindow::First
    }

    fn gestational_week(&self) -> u32 {
        self.gestational_week
    }

    fn values(&self) -> [(Marker, f64); 3] {
        [
            (Marker::Nt, self.nt_mm),
            (Marker::PappA, self.papp_a),
            (Marker::FreeBetaHcg, self.free_beta_hcg),
        ]
    }
}

impl MarkerPanel for SecondTrimesterPanel {
    fn window(&self) -> ScreeningWindow {
        ScreeningWindow::Second
    }

    fn gestational_week(&self) -> u32 {
        self.gestational_week
    }

    fn values(&self) -> [(Marker, f64); 3] {
        [
            (Marker::Afp, self.afp),
            (Marker::TotalHcg, self.total_hcg),
            (Marker::Ue3, self.ue3),
        ]
    }
}
