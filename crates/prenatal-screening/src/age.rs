//! Maternal-age prior.
//!
//! A sparse table of multipliers on each chromosomal base incidence,
//! interpolated linearly between breakpoints and held flat outside them.

use prenatal_core::models::condition::Chromosomal;
use prenatal_core::models::risk::AgeMultipliers;

#[derive(Debug, Clone, Copy)]
pub struct AgeBreakpoint {
    pub age: f64,
    pub multipliers: AgeMultipliers,
}

const fn bp(age: f64, downs: f64, edwards: f64, patau: f64, turner: f64) -> AgeBreakpoint {
    AgeBreakpoint {
        age,
        multipliers: AgeMultipliers {
            downs,
            edwards,
            patau,
            turner,
        },
    }
}

/// Sorted by age. Multipliers are non-decreasing with age for every
/// condition.
pub static AGE_TABLE: [AgeBreakpoint; 6] = [
    bp(20.0, 0.5, 0.3, 0.3, 0.4),
    bp(25.0, 0.7, 0.5, 0.5, 0.6),
    bp(30.0, 1.0, 1.0, 1.0, 1.0),
    bp(35.0, 2.5, 3.0, 3.5, 2.0),
    bp(40.0, 5.0, 8.0, 10.0, 4.0),
    bp(45.0, 10.0, 15.0, 20.0, 8.0),
];

pub fn age_multiplier(age: f64, condition: Chromosomal) -> f64 {
    let first = &AGE_TABLE[0];
    let last = &AGE_TABLE[AGE_TABLE.len() - 1];

    if age <= first.age {
        return first.multipliers.get(condition);
    }
    if age >= last.age {
        return last.multipliers.get(condition);
    }

    if let Some(exact) = AGE_TABLE.iter().find(|b| b.age == age) {
        return exact.multipliers.get(condition);
    }

    for pair in AGE_TABLE.windows(2) {
        let (low, high) = (&pair[0], &pair[1]);
        if low.age <= age && age <= high.age {
            let low_mult = low.multipliers.get(condition);
            let high_mult = high.multipliers.get(condition);
            let fraction = (age - low.age) / (high.age - low.age);
            return low_mult + fraction * (high_mult - low_mult);
        }
    }

    // Only reachable for NaN.
    1.0
}

pub fn age_multipliers(age: f64) -> AgeMultipliers {
    AgeMultipliers {
        downs: age_multiplier(age, Chromosomal::Downs),
        edwards: age_multiplier(age, Chromosomal::Edwards),
        patau: age_multiplier(age, Chromosomal::Patau),
        turner: age_multiplier(age, Chromosomal::Turner),
    }
}
