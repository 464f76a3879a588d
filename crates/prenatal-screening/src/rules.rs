//! Risk rule engine.
//!
//! A hand-authored decision table. For each condition and marker there is
//! an ordered list of threshold buckets; the first bucket whose threshold
//! matches contributes its factor, and no match contributes nothing. Rules
//! for different markers are independent and multiply together.
//!
//! Several cascades contain buckets that can never fire because an earlier,
//! looser threshold always matches first (e.g. Down syndrome free β-hCG
//! `> 3.5` after `> 2.5`). They are kept as written.

use prenatal_core::models::condition::{Chromosomal, Condition};
use prenatal_core::models::marker::Marker;
use prenatal_core::models::risk::{ConditionRisks, RiskProfile};
use tracing::debug;

use crate::age::{age_multiplier, age_multipliers};

/// No computed base risk is reported above 1 in 2.
pub const RISK_CEILING: f64 = 0.5;

/// NTD result when AFP MoM exceeds 2.5.
pub const NTD_RISK_AFP_ABOVE_2_5: f64 = 0.01;

/// NTD result when AFP MoM exceeds 2.0 (but not 2.5).
pub const NTD_RISK_AFP_ABOVE_2_0: f64 = 0.02;

/// Extra scaling of the quad correction for Edwards syndrome.
pub const QUAD_EDWARDS_SCALE: f64 = 1.2;

/// Extra scaling of the quad correction for Patau syndrome.
pub const QUAD_PATAU_SCALE: f64 = 1.3;

/// Strict comparison against a fixed cutpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Below(f64),
    Above(f64),
}

impl Threshold {
    pub fn matches(self, value: f64) -> bool {
        match self {
            Threshold::Below(cut) => value < cut,
            Threshold::Above(cut) => value > cut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub when: Threshold,
    pub factor: f64,
}

/// One marker's cascade within a condition's rule set.
#[derive(Debug, Clone, Copy)]
pub struct FactorRule {
    pub marker: Marker,
    pub buckets: &'static [Bucket],
}

impl FactorRule {
    /// Factor of the first matching bucket, if any.
    pub fn factor(&self, mom: f64) -> Option<f64> {
        self.buckets
            .iter()
            .find(|b| b.when.matches(mom))
            .map(|b| b.factor)
    }
}

const fn below(cut: f64, factor: f64) -> Bucket {
    Bucket {
        when: Threshold::Below(cut),
        factor,
    }
}

const fn above(cut: f64, factor: f64) -> Bucket {
    Bucket {
        when: Threshold::Above(cut),
        factor,
    }
}

static DOWNS_RULES: [FactorRule; 3] = [
    FactorRule {
        marker: Marker::PappA,
        buckets: &[
            below(0.3, 3.0),
            below(0.4, 2.0),
            below(0.5, 1.5),
            above(2.5, 1.2),
        ],
    },
    FactorRule {
        marker: Marker::FreeBetaHcg,
        buckets: &[
            below(0.2, 2.5),
            below(0.3, 1.8),
            above(2.5, 2.0),
            above(3.5, 2.5),
        ],
    },
    FactorRule {
        marker: Marker::Nt,
        buckets: &[
            below(0.6, 0.7),
            below(0.8, 0.8),
            above(2.0, 3.0),
            above(3.0, 5.0),
            above(4.0, 8.0),
        ],
    },
];

static EDWARDS_RULES: [FactorRule; 3] = [
    FactorRule {
        marker: Marker::PappA,
        buckets: &[below(0.2, 4.0), below(0.3, 2.5)],
    },
    FactorRule {
        marker: Marker::FreeBetaHcg,
        buckets: &[below(0.1, 3.0), below(0.2, 2.0)],
    },
    FactorRule {
        marker: Marker::Nt,
        buckets: &[above(2.5, 4.0), above(3.0, 6.0)],
    },
];

static PATAU_RULES: [FactorRule; 3] = [
    FactorRule {
        marker: Marker::PappA,
        buckets: &[below(0.2, 5.0), below(0.3, 3.0)],
    },
    FactorRule {
        marker: Marker::FreeBetaHcg,
        buckets: &[below(0.15, 3.5), below(0.25, 2.5)],
    },
    FactorRule {
        marker: Marker::Nt,
        buckets: &[above(2.8, 5.0), above(3.5, 8.0)],
    },
];

static TURNER_RULES: [FactorRule; 2] = [
    FactorRule {
        marker: Marker::FreeBetaHcg,
        buckets: &[above(2.0, 2.0), above(3.0, 3.0)],
    },
    FactorRule {
        marker: Marker::Nt,
        buckets: &[above(3.0, 4.0), above(4.0, 6.0)],
    },
];

static QUAD_RULES: [FactorRule; 3] = [
    FactorRule {
        marker: Marker::Afp,
        buckets: &[below(0.5, 0.8), above(2.0, 1.3)],
    },
    FactorRule {
        marker: Marker::TotalHcg,
        buckets: &[below(0.5, 0.9), above(2.0, 1.8)],
    },
    FactorRule {
        marker: Marker::Ue3,
        buckets: &[below(0.5, 1.5)],
    },
];

/// Marker rules for a chromosomal condition, in application order.
pub fn rules_for(condition: Chromosomal) -> &'static [FactorRule] {
    match condition {
        Chromosomal::Downs => &DOWNS_RULES,
        Chromosomal::Edwards => &EDWARDS_RULES,
        Chromosomal::Patau => &PATAU_RULES,
        Chromosomal::Turner => &TURNER_RULES,
    }
}

pub fn quad_rules() -> &'static [FactorRule] {
    &QUAD_RULES
}

/// MoM values fed to the rule engine. First-trimester values are always
/// present (1.0 stands in for "not measured"); second-trimester values are
/// optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomInputs {
    pub nt: f64,
    pub papp_a: f64,
    pub free_beta_hcg: f64,
    pub afp: Option<f64>,
    pub total_hcg: Option<f64>,
    pub ue3: Option<f64>,
}

impl MomInputs {
    /// First-trimester values only.
    pub fn first_trimester(nt: f64, papp_a: f64, free_beta_hcg: f64) -> Self {
        Self {
            nt,
            papp_a,
            free_beta_hcg,
            afp: None,
            total_hcg: None,
            ue3: None,
        }
    }

    pub fn with_second_trimester(mut self, afp: f64, total_hcg: f64, ue3: f64) -> Self {
        self.afp = Some(afp);
        self.total_hcg = Some(total_hcg);
        self.ue3 = Some(ue3);
        self
    }

    /// Neutral first-trimester values with a second-trimester panel.
    pub fn second_trimester_only(afp: f64, total_hcg: f64, ue3: f64) -> Self {
        Self::first_trimester(1.0, 1.0, 1.0).with_second_trimester(afp, total_hcg, ue3)
    }

    pub fn get(&self, marker: Marker) -> Option<f64> {
        match marker {
            Marker::Nt => Some(self.nt),
            Marker::PappA => Some(self.papp_a),
            Marker::FreeBetaHcg => Some(self.free_beta_hcg),
            Marker::Afp => self.afp,
            Marker::TotalHcg => self.total_hcg,
            Marker::Ue3 => self.ue3,
        }
    }
}

/// Apply every rule in order. Rules whose marker has no value are skipped.
fn apply_rules(mut risk: f64, rules: &[FactorRule], inputs: &MomInputs) -> f64 {
    for rule in rules {
        if let Some(mom) = inputs.get(rule.marker)
            && let Some(factor) = rule.factor(mom)
        {
            risk *= factor;
        }
    }
    risk
}

/// Age- and marker-adjusted risk for one chromosomal condition, clamped to
/// [`RISK_CEILING`]. Does not include the quad correction.
pub fn chromosomal_risk(age: f64, condition: Chromosomal, inputs: &MomInputs) -> f64 {
    let base = Condition::from(condition).base_incidence() * age_multiplier(age, condition);
    apply_rules(base, rules_for(condition), inputs).min(RISK_CEILING)
}

/// Neural tube defect risk. Ignores age; AFP overrides the baseline with a
/// flat value rather than scaling it.
pub fn ntd_risk(afp_mom: Option<f64>) -> f64 {
    let risk = match afp_mom {
        Some(afp) if afp > 2.5 => NTD_RISK_AFP_ABOVE_2_5,
        Some(afp) if afp > 2.0 => NTD_RISK_AFP_ABOVE_2_0,
        _ => Condition::Ntd.base_incidence(),
    };
    risk.min(RISK_CEILING)
}

/// Second-tier scalar. `None` unless AFP, total hCG and uE3 are all
/// supplied and non-zero.
pub fn quad_correction(inputs: &MomInputs) -> Option<f64> {
    let supplied = |v: Option<f64>| v.filter(|m| *m != 0.0);
    supplied(inputs.afp)?;
    supplied(inputs.total_hcg)?;
    supplied(inputs.ue3)?;

    Some(apply_rules(1.0, quad_rules(), inputs))
}

/// Posterior risk for every condition.
///
/// The quad correction is applied after the ceiling clamp and is not
/// clamped again, so corrected Down, Edwards and Patau risks may exceed
/// [`RISK_CEILING`].
pub fn compute_risks(age: f64, inputs: &MomInputs) -> RiskProfile {
    let age_risk = age_multipliers(age);

    let mut risks = ConditionRisks {
        downs: chromosomal_risk(age, Chromosomal::Downs, inputs),
        edwards: chromosomal_risk(age, Chromosomal::Edwards, inputs),
        patau: chromosomal_risk(age, Chromosomal::Patau, inputs),
        turner: chromosomal_risk(age, Chromosomal::Turner, inputs),
        ntd: ntd_risk(inputs.afp),
    };

    // TODO: re-clamp after the quad correction once downstream reports no
    // longer depend on the unclamped values.
    let quad = quad_correction(inputs);
    match quad {
        Some(correction) => {
            debug!(correction, "applying quad-test correction");
            risks.downs *= correction;
            risks.edwards *= correction * QUAD_EDWARDS_SCALE;
            risks.patau *= correction * QUAD_PATAU_SCALE;
        }
        None => debug!("second-trimester panel incomplete, quad correction skipped"),
    }

    RiskProfile {
        risks,
        age_risk,
        quad_correction: quad,
    }
}
