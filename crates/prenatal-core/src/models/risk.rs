use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::condition::{Chromosomal, Condition};

/// Posterior risk per condition, as a probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionRisks {
    pub downs: f64,
    pub edwards: f64,
    pub patau: f64,
    pub turner: f64,
    pub ntd: f64,
}

impl ConditionRisks {
    pub fn get(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Downs => self.downs,
            Condition::Edwards => self.edwards,
            Condition::Patau => self.patau,
            Condition::Turner => self.turner,
            Condition::Ntd => self.ntd,
        }
    }

    /// Risks in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Condition, f64)> + '_ {
        Condition::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Maternal-age multipliers applied to each chromosomal base incidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeMultipliers {
    pub downs: f64,
    pub edwards: f64,
    pub patau: f64,
    pub turner: f64,
}

impl AgeMultipliers {
    pub fn get(&self, condition: Chromosomal) -> f64 {
        match condition {
            Chromosomal::Downs => self.downs,
            Chromosomal::Edwards => self.edwards,
            Chromosomal::Patau => self.patau,
            Chromosomal::Turner => self.turner,
        }
    }
}

/// Output of the rule engine for one set of MoM inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskProfile {
    pub risks: ConditionRisks,
    pub age_risk: AgeMultipliers,
    /// Second-tier scalar, present only when AFP, total hCG and uE3 were
    /// all supplied.
    pub quad_correction: Option<f64>,
}

/// Seven-step severity scale for a single risk probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RiskCategory {
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
    Critical,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Critical => "CRITICAL",
            RiskCategory::VeryHigh => "VERY_HIGH",
            RiskCategory::High => "HIGH",
            RiskCategory::MediumHigh => "MEDIUM_HIGH",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::LowMedium => "LOW_MEDIUM",
            RiskCategory::Low => "LOW",
        }
    }

    /// Coarse tier used by the dashboard for styling.
    pub fn tier(self) -> SeverityTier {
        match self {
            RiskCategory::Critical => SeverityTier::Critical,
            RiskCategory::VeryHigh | RiskCategory::High => SeverityTier::High,
            RiskCategory::MediumHigh | RiskCategory::Medium => SeverityTier::Medium,
            RiskCategory::LowMedium | RiskCategory::Low => SeverityTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityTier {
    Low,
    Medium,
    High,
    Critical,
}

/// A classified risk ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskSummary {
    pub condition: Condition,
    pub probability: f64,
    pub category: RiskCategory,
    pub tier: SeverityTier,
    /// Odds form, e.g. `"1:800"`.
    pub odds: String,
}

/// Follow-up urgency derived from the highest reported risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendationTier {
    Routine,
    Monitoring,
    Elevated,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub condition: Condition,
    pub probability: f64,
    pub actions: Vec<String>,
}
