//! Reference norm tables.
//!
//! Per-marker, per-gestational-week reference ranges for the DELFIA
//! first-trimester (weeks 10–14) and second-trimester (weeks 15–22) panels.
//! The two tables have disjoint marker sets and disjoint week ranges.

use prenatal_core::models::marker::{Marker, MomBand, ReferenceRange, ScreeningWindow};
use tracing::debug;

use crate::error::ScreeningError;

/// Reference data for one marker. Weeks are contiguous starting at
/// `first_week`; `ranges[i]` belongs to week `first_week + i`.
#[derive(Debug)]
pub struct NormTable {
    pub marker: Marker,
    pub first_week: u32,
    pub ranges: &'static [ReferenceRange],
    /// Acceptable MoM band. NT is judged on raw thickness instead.
    pub mom_band: Option<MomBand>,
    /// Upper limit of normal for the raw value, in the marker's unit.
    pub normal_max: Option<f64>,
}

impl NormTable {
    pub fn last_week(&self) -> u32 {
        self.first_week + self.ranges.len().saturating_sub(1) as u32
    }

    pub fn weeks(&self) -> impl Iterator<Item = (u32, &ReferenceRange)> + '_ {
        (self.first_week..).zip(self.ranges.iter())
    }

    /// Entry for exactly `week`, if the table defines it.
    pub fn exact(&self, week: u32) -> Option<&ReferenceRange> {
        let offset = week.checked_sub(self.first_week)?;
        self.ranges.get(offset as usize)
    }

    /// Entry for the defined week closest to `week`.
    ///
    /// With contiguous integer weeks the closest week is the clamped one,
    /// so two weeks are never equidistant.
    pub fn nearest(&self, week: u32) -> &ReferenceRange {
        let clamped = week.clamp(self.first_week, self.last_week());
        if clamped != week {
            debug!(
                marker = %self.marker,
                requested = week,
                resolved = clamped,
                "gestational week outside reference table, using nearest"
            );
        }
        &self.ranges[(clamped - self.first_week) as usize]
    }
}

const fn r(min: f64, max: f64, median: f64) -> ReferenceRange {
    ReferenceRange { min, max, median }
}

pub static PAPP_A: NormTable = NormTable {
    marker: Marker::PappA,
    first_week: 10,
    ranges: &[
        r(0.4, 3.0, 1.0),
        r(0.5, 3.5, 1.2),
        r(0.6, 4.0, 1.4),
        r(0.7, 4.5, 1.6),
        r(0.8, 5.0, 1.8),
    ],
    mom_band: Some(MomBand { low: 0.4, high: 2.5 }),
    normal_max: None,
};

pub static FREE_BETA_HCG: NormTable = NormTable {
    marker: Marker::FreeBetaHcg,
    first_week: 10,
    ranges: &[
        r(15.0, 120.0, 40.0),
        r(20.0, 150.0, 60.0),
        r(25.0, 180.0, 80.0),
        r(30.0, 200.0, 100.0),
        r(35.0, 220.0, 120.0),
    ],
    mom_band: Some(MomBand { low: 0.5, high: 2.0 }),
    normal_max: None,
};

pub static NT: NormTable = NormTable {
    marker: Marker::Nt,
    first_week: 10,
    ranges: &[
        r(0.8, 2.2, 1.2),
        r(0.8, 2.5, 1.3),
        r(0.8, 2.8, 1.4),
        r(0.8, 3.0, 1.5),
        r(0.8, 3.0, 1.5),
    ],
    mom_band: None,
    normal_max: Some(2.5),
};

pub static AFP: NormTable = NormTable {
    marker: Marker::Afp,
    first_week: 15,
    ranges: &[
        r(15.0, 60.0, 30.0),
        r(17.0, 65.0, 35.0),
        r(20.0, 70.0, 40.0),
        r(22.0, 75.0, 45.0),
        r(25.0, 80.0, 50.0),
        r(27.0, 85.0, 55.0),
        r(30.0, 90.0, 60.0),
        r(32.0, 95.0, 65.0),
    ],
    mom_band: Some(MomBand { low: 0.5, high: 2.0 }),
    normal_max: None,
};

pub static TOTAL_HCG: NormTable = NormTable {
    marker: Marker::TotalHcg,
    first_week: 15,
    ranges: &[
        r(10000.0, 60000.0, 30000.0),
        r(8000.0, 55000.0, 28000.0),
        r(7000.0, 50000.0, 25000.0),
        r(6000.0, 45000.0, 22000.0),
        r(5000.0, 40000.0, 20000.0),
        r(4000.0, 35000.0, 18000.0),
        r(3500.0, 30000.0, 16000.0),
        r(3000.0, 25000.0, 14000.0),
    ],
    mom_band: Some(MomBand { low: 0.5, high: 2.0 }),
    normal_max: None,
};

pub static UE3: NormTable = NormTable {
    marker: Marker::Ue3,
    first_week: 15,
    ranges: &[
        r(1.0, 5.0, 2.5),
        r(1.5, 6.0, 3.0),
        r(2.0, 7.0, 3.5),
        r(2.5, 8.0, 4.0),
        r(3.0, 9.0, 4.5),
        r(3.5, 10.0, 5.0),
        r(4.0, 11.0, 5.5),
        r(4.5, 12.0, 6.0),
    ],
    mom_band: Some(MomBand { low: 0.5, high: 2.0 }),
    normal_max: None,
};

pub static FIRST_TRIMESTER: [&NormTable; 3] = [&PAPP_A, &FREE_BETA_HCG, &NT];

pub static SECOND_TRIMESTER: [&NormTable; 3] = [&AFP, &TOTAL_HCG, &UE3];

/// All tables for one screening window.
pub fn tables(window: ScreeningWindow) -> &'static [&'static NormTable] {
    match window {
        ScreeningWindow::First => &FIRST_TRIMESTER,
        ScreeningWindow::Second => &SECOND_TRIMESTER,
    }
}

/// The table that defines `marker`.
pub fn norm_table(marker: Marker) -> &'static NormTable {
    match marker {
        Marker::PappA => &PAPP_A,
        Marker::FreeBetaHcg => &FREE_BETA_HCG,
        Marker::Nt => &NT,
        Marker::Afp => &AFP,
        Marker::TotalHcg => &TOTAL_HCG,
        Marker::Ue3 => &UE3,
    }
}

/// Reference range for `marker` at `week`, falling back to the nearest
/// defined week.
pub fn lookup(marker: Marker, week: u32) -> &'static ReferenceRange {
    norm_table(marker).nearest(week)
}

/// Like [`lookup`], but only searches the given window's table. There is no
/// fallback between windows.
pub fn lookup_in(
    window: ScreeningWindow,
    marker: Marker,
    week: u32,
) -> Result<&'static ReferenceRange, ScreeningError> {
    tables(window)
        .iter()
        .find(|t| t.marker == marker)
        .map(|t| t.nearest(week))
        .ok_or(ScreeningError::MarkerNotInWindow { marker, window })
}
