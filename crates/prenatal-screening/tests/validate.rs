use prenatal_core::models::request::{
    FirstTrimesterPanel, Screening, ScreeningRequest, SecondTrimesterPanel,
};
use prenatal_screening::validate::{InputRange, marker_range, validate_request};

fn first_panel(week: u32) -> FirstTrimesterPanel {
    FirstTrimesterPanel {
        gestational_week: week,
        nt_mm: 1.8,
        papp_a: 1.4,
        free_beta_hcg: 80.0,
    }
}

fn request(screening: Screening) -> ScreeningRequest {
    ScreeningRequest {
        patient_id: None,
        patient_name: "Madina Alieva".to_string(),
        maternal_age_years: 30.0,
        height_cm: 165.0,
        weight_kg: 65.0,
        screening,
    }
}

#[test]
fn form_defaults_are_valid() {
    let req = request(Screening::First {
        panel: first_panel(12),
    });
    assert!(validate_request(&req).is_empty());
}

#[test]
fn out_of_range_demographics_reported() {
    let mut req = request(Screening::First {
        panel: first_panel(12),
    });
    req.maternal_age_years = 60.0;
    req.height_cm = 0.0;

    let errors = validate_request(&req);
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["maternal_age_years", "height_cm"]);
    assert_eq!(errors[0].expected_range, Some(InputRange::new(15.0, 55.0)));
    assert_eq!(errors[0].message, "Maternal age 60 is outside range [15, 55]");
}

#[test]
fn blank_name_reported() {
    let mut req = request(Screening::First {
        panel: first_panel(12),
    });
    req.patient_name = "   ".to_string();

    let errors = validate_request(&req);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "patient_name");
    assert!(errors[0].value.is_none());
}

#[test]
fn week_must_match_window() {
    let req = request(Screening::First {
        panel: first_panel(16),
    });
    let errors = validate_request(&req);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "panel.gestational_week");
}

#[test]
fn carried_first_trimester_panel_is_checked_against_its_own_window() {
    let second = SecondTrimesterPanel {
        gestational_week: 18,
        afp: 45.0,
        total_hcg: 22000.0,
        ue3: 4.0,
    };

    let ok = request(Screening::Second {
        panel: second,
        first_trimester: Some(first_panel(12)),
    });
    assert!(validate_request(&ok).is_empty());

    let mut bad_first = first_panel(12);
    bad_first.papp_a = 35.0;
    let bad = request(Screening::Second {
        panel: second,
        first_trimester: Some(bad_first),
    });
    let errors = validate_request(&bad);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "first_trimester.papp_a");
}

#[test]
fn total_hcg_range_is_in_iu_per_litre() {
    let range = marker_range(prenatal_core::models::marker::Marker::TotalHcg);
    assert!(range.contains(1000.0));
    assert!(range.contains(100000.0));
    assert!(!range.contains(999.0));
}
