use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A fetal condition the screen reports a risk for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    /// Trisomy 21.
    Downs,
    /// Trisomy 18.
    Edwards,
    /// Trisomy 13.
    Patau,
    /// Monosomy X (45,X).
    Turner,
    /// Open neural tube defect.
    Ntd,
}

impl Condition {
    /// Report order. Also the tie-break order when picking the highest risk.
    pub const ALL: [Condition; 5] = [
        Condition::Downs,
        Condition::Edwards,
        Condition::Patau,
        Condition::Turner,
        Condition::Ntd,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Condition::Downs => "downs",
            Condition::Edwards => "edwards",
            Condition::Patau => "patau",
            Condition::Turner => "turner",
            Condition::Ntd => "ntd",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Condition::Downs => "Down syndrome (Trisomy 21)",
            Condition::Edwards => "Edwards syndrome (Trisomy 18)",
            Condition::Patau => "Patau syndrome (Trisomy 13)",
            Condition::Turner => "Turner syndrome (45,X)",
            Condition::Ntd => "Neural tube defect",
        }
    }

    /// Population incidence before any age or marker adjustment.
    pub fn base_incidence(self) -> f64 {
        match self {
            Condition::Downs => 1.0 / 800.0,
            Condition::Edwards => 1.0 / 3000.0,
            Condition::Patau => 1.0 / 5000.0,
            Condition::Turner => 1.0 / 2500.0,
            Condition::Ntd => 1.0 / 1000.0,
        }
    }

    pub fn as_chromosomal(self) -> Option<Chromosomal> {
        match self {
            Condition::Downs => Some(Chromosomal::Downs),
            Condition::Edwards => Some(Chromosomal::Edwards),
            Condition::Patau => Some(Chromosomal::Patau),
            Condition::Turner => Some(Chromosomal::Turner),
            Condition::Ntd => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownCondition(s.to_string()))
    }
}

/// The chromosomal conditions, i.e. those whose prior risk scales with
/// maternal age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Chromosomal {
    Downs,
    Edwards,
    Patau,
    Turner,
}

impl Chromosomal {
    pub const ALL: [Chromosomal; 4] = [
        Chromosomal::Downs,
        Chromosomal::Edwards,
        Chromosomal::Patau,
        Chromosomal::Turner,
    ];
}

impl From<Chromosomal> for Condition {
    fn from(c: Chromosomal) -> Self {
        match c {
            Chromosomal::Downs => Condition::Downs,
            Chromosomal::Edwards => Condition::Edwards,
            Chromosomal::Patau => Condition::Patau,
            Chromosomal::Turner => Condition::Turner,
        }
    }
}
