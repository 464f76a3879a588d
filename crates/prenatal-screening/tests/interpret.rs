use prenatal_core::models::condition::Condition;
use prenatal_core::models::marker::{Marker, MarkerReading, MarkerStatus};
use prenatal_core::models::risk::{ConditionRisks, RecommendationTier};
use prenatal_screening::interpret::{highest_risk, marker_status, recommend, recommendation_tier};

fn risks(downs: f64, edwards: f64, patau: f64, turner: f64, ntd: f64) -> ConditionRisks {
    ConditionRisks {
        downs,
        edwards,
        patau,
        turner,
        ntd,
    }
}

#[test]
fn serum_markers_judged_against_mom_band() {
    let papp = MarkerReading::new(Marker::PappA, 0.5, 12);
    assert_eq!(marker_status(&papp, 0.36), MarkerStatus::Low);
    assert_eq!(marker_status(&papp, 0.4), MarkerStatus::Normal);
    assert_eq!(marker_status(&papp, 2.5), MarkerStatus::Normal);
    assert_eq!(marker_status(&papp, 2.6), MarkerStatus::High);

    let hcg = MarkerReading::new(Marker::FreeBetaHcg, 200.0, 12);
    assert_eq!(marker_status(&hcg, 2.5), MarkerStatus::High);

    let ue3 = MarkerReading::new(Marker::Ue3, 1.0, 18);
    assert_eq!(marker_status(&ue3, 0.25), MarkerStatus::Low);
}

#[test]
fn nt_judged_on_thickness() {
    let thick = MarkerReading::new(Marker::Nt, 3.0, 12);
    assert_eq!(marker_status(&thick, 2.14), MarkerStatus::High);

    let borderline = MarkerReading::new(Marker::Nt, 2.5, 12);
    assert_eq!(marker_status(&borderline, 1.79), MarkerStatus::Normal);

    // Thin NT is not flagged.
    let thin = MarkerReading::new(Marker::Nt, 0.6, 12);
    assert_eq!(marker_status(&thin, 0.43), MarkerStatus::Normal);
}

#[test]
fn highest_risk_picks_maximum() {
    let (condition, risk) = highest_risk(&risks(0.001, 0.002, 0.0003, 0.0004, 0.02));
    assert_eq!(condition, Condition::Ntd);
    assert_eq!(risk, 0.02);
}

#[test]
fn highest_risk_ties_go_to_report_order() {
    let (condition, _) = highest_risk(&risks(0.001, 0.001, 0.001, 0.001, 0.001));
    assert_eq!(condition, Condition::Downs);

    let (condition, _) = highest_risk(&risks(0.0001, 0.003, 0.001, 0.003, 0.001));
    assert_eq!(condition, Condition::Edwards);
}

#[test]
fn recommendation_tiers() {
    assert_eq!(recommendation_tier(0.06), RecommendationTier::Urgent);
    assert_eq!(recommendation_tier(0.05), RecommendationTier::Elevated);
    assert_eq!(recommendation_tier(0.02), RecommendationTier::Elevated);
    assert_eq!(recommendation_tier(0.01), RecommendationTier::Monitoring);
    assert_eq!(recommendation_tier(0.0012), RecommendationTier::Monitoring);
    assert_eq!(recommendation_tier(0.001), RecommendationTier::Routine);
}

#[test]
fn recommendation_lists_actions_for_highest_risk() {
    let rec = recommend(&risks(0.08, 0.002, 0.0003, 0.0004, 0.001));
    assert_eq!(rec.condition, Condition::Downs);
    assert_eq!(rec.tier, RecommendationTier::Urgent);
    assert_eq!(rec.actions.len(), 5);
    assert!(rec.actions[0].contains("24 hours"));
}
