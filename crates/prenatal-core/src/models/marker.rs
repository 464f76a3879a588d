use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Screening window a marker panel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScreeningWindow {
    /// First trimester, gestational weeks 10–14.
    First,
    /// Second trimester, gestational weeks 15–22.
    Second,
}

impl ScreeningWindow {
    pub fn weeks(self) -> (u32, u32) {
        match self {
            ScreeningWindow::First => (10, 14),
            ScreeningWindow::Second => (15, 22),
        }
    }
}

impl fmt::Display for ScreeningWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningWindow::First => f.write_str("first"),
            ScreeningWindow::Second => f.write_str("second"),
        }
    }
}

/// A biochemical or ultrasound screening marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Marker {
    /// Pregnancy-associated plasma protein A (U/L).
    PappA,
    /// Free beta subunit of hCG (ng/ml).
    FreeBetaHcg,
    /// Nuchal translucency thickness (mm).
    Nt,
    /// Alpha-fetoprotein (ng/ml).
    Afp,
    /// Total hCG (IU/L).
    TotalHcg,
    /// Unconjugated estriol (nmol/L).
    Ue3,
}

impl Marker {
    pub const ALL: [Marker; 6] = [
        Marker::PappA,
        Marker::FreeBetaHcg,
        Marker::Nt,
        Marker::Afp,
        Marker::TotalHcg,
        Marker::Ue3,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Marker::PappA => "papp_a",
            Marker::FreeBetaHcg => "free_beta_hcg",
            Marker::Nt => "nt",
            Marker::Afp => "afp",
            Marker::TotalHcg => "total_hcg",
            Marker::Ue3 => "ue3",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Marker::PappA => "PAPP-A",
            Marker::FreeBetaHcg => "Free β-hCG",
            Marker::Nt => "NT",
            Marker::Afp => "AFP",
            Marker::TotalHcg => "Total hCG",
            Marker::Ue3 => "uE3",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Marker::PappA => "U/L",
            Marker::FreeBetaHcg | Marker::Afp => "ng/ml",
            Marker::Nt => "mm",
            Marker::TotalHcg => "IU/L",
            Marker::Ue3 => "nmol/L",
        }
    }

    /// The window whose reference table defines this marker.
    pub fn window(self) -> ScreeningWindow {
        match self {
            Marker::PappA | Marker::FreeBetaHcg | Marker::Nt => ScreeningWindow::First,
            Marker::Afp | Marker::TotalHcg | Marker::Ue3 => ScreeningWindow::Second,
        }
    }

    /// Serum markers whose concentration dilutes with maternal mass.
    /// NT and uE3 are not weight-corrected.
    pub fn is_weight_dependent(self) -> bool {
        matches!(
            self,
            Marker::PappA | Marker::FreeBetaHcg | Marker::Afp | Marker::TotalHcg
        )
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Marker {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownMarker(s.to_string()))
    }
}

/// A single captured measurement. Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarkerReading {
    pub marker: Marker,
    pub value: f64,
    pub gestational_week: u32,
    pub window: ScreeningWindow,
}

impl MarkerReading {
    pub fn new(marker: Marker, value: f64, gestational_week: u32) -> Self {
        Self {
            marker,
            value,
            gestational_week,
            window: marker.window(),
        }
    }
}

/// Reference values for one marker at one gestational week, in the
/// marker's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Marker-level band of MoM values considered unremarkable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MomBand {
    pub low: f64,
    pub high: f64,
}

impl MomBand {
    pub fn contains(&self, mom: f64) -> bool {
        mom >= self.low && mom <= self.high
    }
}

/// How a measured marker compares to its expected band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MarkerStatus {
    Low,
    Normal,
    High,
}

/// A reading together with its derived multiple of median.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarkerResult {
    pub reading: MarkerReading,
    pub mom: f64,
    pub status: MarkerStatus,
}
