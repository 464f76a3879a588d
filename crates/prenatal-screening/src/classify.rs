//! Risk classification and 1-in-N display.

use prenatal_core::models::condition::Condition;
use prenatal_core::models::risk::{ConditionRisks, RiskCategory, RiskSummary, SeverityTier};

/// Lower bounds (exclusive), highest first.
const CATEGORY_THRESHOLDS: [(f64, RiskCategory); 6] = [
    (0.1, RiskCategory::Critical),
    (0.05, RiskCategory::VeryHigh),
    (0.02, RiskCategory::High),
    (0.01, RiskCategory::MediumHigh),
    (0.005, RiskCategory::Medium),
    (0.001, RiskCategory::LowMedium),
];

pub fn category(probability: f64) -> RiskCategory {
    CATEGORY_THRESHOLDS
        .iter()
        .find(|(cut, _)| probability > *cut)
        .map(|(_, category)| *category)
        .unwrap_or(RiskCategory::Low)
}

pub fn classify(probability: f64) -> (RiskCategory, SeverityTier) {
    let category = category(probability);
    (category, category.tier())
}

/// `"1:N"` with `N = round(1 / probability)`, or `"1:∞"` for a
/// non-positive probability.
pub fn odds(probability: f64) -> String {
    if probability <= 0.0 {
        return "1:∞".to_string();
    }
    format!("1:{}", (1.0 / probability).round() as u64)
}

pub fn summarize(condition: Condition, probability: f64) -> RiskSummary {
    let (category, tier) = classify(probability);
    RiskSummary {
        condition,
        probability,
        category,
        tier,
        odds: odds(probability),
    }
}

/// One summary per condition, in report order.
pub fn summarize_all(risks: &ConditionRisks) -> Vec<RiskSummary> {
    risks.iter().map(|(c, p)| summarize(c, p)).collect()
}
