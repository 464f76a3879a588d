//! Clinical reading of a scored assessment: marker status against the
//! reference band and the follow-up recommendation for the highest risk.

use prenatal_core::models::condition::Condition;
use prenatal_core::models::marker::{MarkerReading, MarkerStatus};
use prenatal_core::models::risk::{ConditionRisks, Recommendation, RecommendationTier};

use crate::norms::norm_table;

/// Status of a reading. Markers with a MoM band are judged on `mom`; NT is
/// judged on its raw thickness against the table's upper limit of normal.
pub fn marker_status(reading: &MarkerReading, mom: f64) -> MarkerStatus {
    let table = norm_table(reading.marker);

    if let Some(band) = table.mom_band {
        if band.contains(mom) {
            MarkerStatus::Normal
        } else if mom < band.low {
            MarkerStatus::Low
        } else {
            MarkerStatus::High
        }
    } else if let Some(limit) = table.normal_max
        && reading.value > limit
    {
        MarkerStatus::High
    } else {
        MarkerStatus::Normal
    }
}

/// The condition with the largest risk. Ties go to the condition listed
/// first in report order.
pub fn highest_risk(risks: &ConditionRisks) -> (Condition, f64) {
    let mut best = (Condition::Downs, risks.downs);
    for (condition, risk) in risks.iter().skip(1) {
        if risk > best.1 {
            best = (condition, risk);
        }
    }
    best
}

pub fn recommendation_tier(probability: f64) -> RecommendationTier {
    if probability > 0.05 {
        RecommendationTier::Urgent
    } else if probability > 0.01 {
        RecommendationTier::Elevated
    } else if probability > 0.001 {
        RecommendationTier::Monitoring
    } else {
        RecommendationTier::Routine
    }
}

pub fn actions(tier: RecommendationTier) -> &'static [&'static str] {
    match tier {
        RecommendationTier::Urgent => &[
            "Genetic counselling within 24 hours",
            "Non-invasive prenatal testing (NIPT)",
            "Amniocentesis or chorionic villus sampling",
            "Fetal echocardiography",
            "Weekly ultrasound follow-up",
        ],
        RecommendationTier::Elevated => &[
            "Genetic counselling within 72 hours",
            "Detailed anomaly ultrasound",
            "Additional screening tests",
            "Monitoring every 2 weeks",
        ],
        RecommendationTier::Monitoring => &[
            "Optional genetic counselling",
            "Routine ultrasound review",
            "Follow prenatal care guidance",
            "Review every 4-6 weeks",
        ],
        RecommendationTier::Routine => &[
            "Standard screening programme",
            "Scheduled ultrasound examinations",
            "Healthy lifestyle",
            "Prenatal vitamins",
        ],
    }
}

pub fn recommend(risks: &ConditionRisks) -> Recommendation {
    let (condition, probability) = highest_risk(risks);
    let tier = recommendation_tier(probability);
    Recommendation {
        tier,
        condition,
        probability,
        actions: actions(tier).iter().map(|a| a.to_string()).collect(),
    }
}
