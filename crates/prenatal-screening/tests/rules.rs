use prenatal_core::models::condition::Chromosomal;
use prenatal_core::models::marker::{Marker, ScreeningWindow};
use prenatal_screening::rules::{
    MomInputs, RISK_CEILING, chromosomal_risk, compute_risks, ntd_risk, quad_correction, quad_rules,
    rules_for,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

fn neutral() -> MomInputs {
    MomInputs::first_trimester(1.0, 1.0, 1.0)
}

fn factor(condition: Chromosomal, marker: Marker, mom: f64) -> Option<f64> {
    rules_for(condition)
        .iter()
        .find(|r| r.marker == marker)
        .and_then(|r| r.factor(mom))
}

#[test]
fn neutral_markers_leave_age_prior() {
    let profile = compute_risks(30.0, &neutral());
    assert!(approx(profile.risks.downs, 1.0 / 800.0));
    assert!(approx(profile.risks.edwards, 1.0 / 3000.0));
    assert!(approx(profile.risks.patau, 1.0 / 5000.0));
    assert!(approx(profile.risks.turner, 1.0 / 2500.0));
    assert!(approx(profile.risks.ntd, 1.0 / 1000.0));
    assert!(profile.quad_correction.is_none());
}

#[test]
fn age_prior_scales_chromosomal_risks() {
    let profile = compute_risks(40.0, &neutral());
    assert!(approx(profile.risks.downs, 5.0 / 800.0));
    assert!(approx(profile.risks.patau, 10.0 / 5000.0));
    assert_eq!(profile.age_risk.downs, 5.0);
    assert_eq!(profile.age_risk.edwards, 8.0);
    assert_eq!(profile.age_risk.patau, 10.0);
    assert_eq!(profile.age_risk.turner, 4.0);
}

#[test]
fn first_matching_bucket_wins() {
    // 0.25 is below 0.3, 0.4 and 0.5; only the first bucket applies.
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 0.25), Some(3.0));
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 0.45), Some(1.5));
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 2.6), Some(1.2));

    let inputs = MomInputs::first_trimester(1.0, 0.25, 1.0);
    let risk = chromosomal_risk(30.0, Chromosomal::Downs, &inputs);
    assert!(approx(risk, 3.0 / 800.0));
}

#[test]
fn thresholds_are_strict() {
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 0.3), Some(2.0));
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 0.5), None);
    assert_eq!(factor(Chromosomal::Downs, Marker::PappA, 2.5), None);
    assert_eq!(factor(Chromosomal::Edwards, Marker::Nt, 2.5), None);
}

#[test]
fn no_matching_bucket_applies_no_factor() {
    for condition in Chromosomal::ALL {
        for rule in rules_for(condition) {
            assert_eq!(rule.factor(1.0), None, "{condition:?} {}", rule.marker);
        }
    }
}

#[test]
fn shadowed_buckets_never_fire() {
    assert_eq!(factor(Chromosomal::Downs, Marker::FreeBetaHcg, 4.0), Some(2.0));
    assert_eq!(factor(Chromosomal::Downs, Marker::Nt, 5.0), Some(3.0));
    assert_eq!(factor(Chromosomal::Edwards, Marker::Nt, 3.5), Some(4.0));
    assert_eq!(factor(Chromosomal::Patau, Marker::Nt, 4.0), Some(5.0));
    assert_eq!(factor(Chromosomal::Turner, Marker::FreeBetaHcg, 3.5), Some(2.0));
    assert_eq!(factor(Chromosomal::Turner, Marker::Nt, 4.5), Some(4.0));
}

#[test]
fn turner_ignores_papp_a() {
    assert!(rules_for(Chromosomal::Turner).iter().all(|r| r.marker != Marker::PappA));
    let low_papp = MomInputs::first_trimester(1.0, 0.1, 1.0);
    assert_eq!(
        chromosomal_risk(30.0, Chromosomal::Turner, &low_papp),
        chromosomal_risk(30.0, Chromosomal::Turner, &neutral())
    );
}

#[test]
fn marker_factors_multiply_across_markers() {
    let inputs = MomInputs::first_trimester(2.2, 0.35, 0.15);
    let risk = chromosomal_risk(30.0, Chromosomal::Downs, &inputs);
    assert!(approx(risk, 1.0 / 800.0 * 2.0 * 2.5 * 3.0));
}

#[test]
fn ntd_uses_flat_afp_override() {
    assert_eq!(ntd_risk(Some(2.6)), 0.01);
    assert_eq!(ntd_risk(Some(2.1)), 0.02);
    assert_eq!(ntd_risk(Some(1.0)), 0.001);
    assert_eq!(ntd_risk(None), 0.001);
}

#[test]
fn ntd_ignores_age() {
    let young = MomInputs::second_trimester_only(2.6, 1.0, 1.0);
    assert_eq!(compute_risks(20.0, &young).risks.ntd, 0.01);
    assert_eq!(compute_risks(45.0, &young).risks.ntd, 0.01);
    assert_eq!(compute_risks(45.0, &neutral()).risks.ntd, 0.001);
}

#[test]
fn quad_correction_requires_all_three_markers() {
    let mut inputs = MomInputs::second_trimester_only(0.4, 1.0, 1.0);
    assert_eq!(quad_correction(&inputs), Some(0.8));

    inputs.ue3 = None;
    assert_eq!(quad_correction(&inputs), None);

    inputs.ue3 = Some(0.0);
    assert_eq!(quad_correction(&inputs), None);
}

#[test]
fn quad_checks_all_fire_independently() {
    let inputs = MomInputs::second_trimester_only(2.5, 2.5, 0.4);
    let correction = quad_correction(&inputs).unwrap();
    assert!(approx(correction, 1.3 * 1.8 * 1.5));
}

#[test]
fn quad_correction_scales_trisomies_only() {
    let inputs = MomInputs::second_trimester_only(1.0, 2.5, 1.0);
    let profile = compute_risks(30.0, &inputs);
    assert_eq!(profile.quad_correction, Some(1.8));
    assert!(approx(profile.risks.downs, 1.0 / 800.0 * 1.8));
    assert!(approx(profile.risks.edwards, 1.0 / 3000.0 * 1.8 * 1.2));
    assert!(approx(profile.risks.patau, 1.0 / 5000.0 * 1.8 * 1.3));
    assert!(approx(profile.risks.turner, 1.0 / 2500.0));
    assert!(approx(profile.risks.ntd, 1.0 / 1000.0));
}

#[test]
fn neutral_quad_panel_still_scales_edwards_and_patau() {
    let profile = compute_risks(30.0, &MomInputs::second_trimester_only(1.0, 1.0, 1.0));
    assert_eq!(profile.quad_correction, Some(1.0));
    assert!(approx(profile.risks.downs, 1.0 / 800.0));
    assert!(approx(profile.risks.edwards, 1.0 / 3000.0 * 1.2));
    assert!(approx(profile.risks.patau, 1.0 / 5000.0 * 1.3));
}

#[test]
fn base_risks_never_exceed_ceiling() {
    let extremes = [0.05, 0.15, 0.25, 0.35, 1.0, 2.2, 2.9, 3.2, 3.8, 4.5, 6.0];
    for &nt in &extremes {
        for &papp in &extremes {
            for &hcg in &extremes {
                let profile = compute_risks(50.0, &MomInputs::first_trimester(nt, papp, hcg));
                for (condition, risk) in profile.risks.iter() {
                    assert!(
                        (0.0..=RISK_CEILING).contains(&risk),
                        "{condition:?} = {risk}"
                    );
                }
            }
        }
    }
}

#[test]
fn quad_correction_is_applied_after_the_ceiling() {
    let inputs =
        MomInputs::first_trimester(2.5, 0.1, 0.1).with_second_trimester(2.5, 2.5, 0.4);

    let base_downs = chromosomal_risk(45.0, Chromosomal::Downs, &inputs);
    assert!(base_downs <= RISK_CEILING);
    assert!(approx(base_downs, 10.0 / 800.0 * 3.0 * 2.5 * 3.0));

    let profile = compute_risks(45.0, &inputs);
    let correction = profile.quad_correction.unwrap();
    assert!(approx(profile.risks.downs, base_downs * correction));

    // Not clamped a second time.
    assert!(profile.risks.downs > RISK_CEILING);
    assert!(approx(profile.risks.downs, 0.9871875));

    let base_edwards = chromosomal_risk(45.0, Chromosomal::Edwards, &inputs);
    assert!(approx(profile.risks.edwards, base_edwards * correction * 1.2));
    assert!(profile.risks.turner <= RISK_CEILING);
}

#[test]
fn quad_rules_read_second_trimester_markers() {
    let quad = |marker: Marker, mom: f64| {
        quad_rules()
            .iter()
            .find(|r| r.marker == marker)
            .and_then(|r| r.factor(mom))
    };

    assert_eq!(quad(Marker::Ue3, 0.49), Some(1.5));
    assert_eq!(quad(Marker::Ue3, 0.5), None);
    assert_eq!(quad(Marker::TotalHcg, 2.0), None);
    assert_eq!(quad(Marker::TotalHcg, 2.01), Some(1.8));
    assert_eq!(quad(Marker::Afp, 0.4), Some(0.8));
    assert!(quad_rules().iter().all(|r| r.marker.window() == ScreeningWindow::Second));
}
