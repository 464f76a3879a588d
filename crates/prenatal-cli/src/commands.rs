use std::io::{Read, Write};
use std::path::Path;

use prenatal_core::models::assessment::PatientAssessment;
use prenatal_core::models::patient::PatientId;
use prenatal_core::models::request::ScreeningRequest;
use prenatal_history::HistoryStore;
use prenatal_screening::assess_validated;

use crate::config::AppConfig;

/// Read a screening request from `path`, or from `stdin` when `path` is
/// `None` or `-`.
pub fn read_request(path: Option<&Path>, stdin: impl Read) -> eyre::Result<ScreeningRequest> {
    let contents = match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .map_err(|e| eyre::eyre!("failed to read request at {}: {e}", p.display()))?,
        _ => std::io::read_to_string(stdin)?,
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Score a request and print the record. The record is written to `out`
/// before it is appended to the history, so a persistence failure never
/// loses the computed result.
pub fn assess(
    config: &AppConfig,
    request: &ScreeningRequest,
    save: bool,
    summary: bool,
    out: &mut impl Write,
) -> eyre::Result<PatientAssessment> {
    let assessment = assess_validated(request, jiff::Timestamp::now(), config.enforce_validation)?;

    if summary {
        write_summary(&assessment, out)?;
    } else {
        writeln!(out, "{}", assessment.to_json_pretty()?)?;
    }
    out.flush()?;

    if save {
        let store = HistoryStore::new(&config.history_path);
        if let Err(e) = store.append(&assessment) {
            tracing::error!(error = %e, "assessment computed but not saved to history");
            return Err(e.into());
        }
    }

    Ok(assessment)
}

pub fn write_summary(assessment: &PatientAssessment, out: &mut impl Write) -> eyre::Result<()> {
    writeln!(
        out,
        "{} ({}) age {} week {} [{} window] BMI {:.1}",
        assessment.patient.name,
        assessment.patient.id,
        assessment.maternal_age_years,
        assessment.gestational_week,
        assessment.window,
        assessment.bmi,
    )?;

    for result in &assessment.markers {
        writeln!(
            out,
            "  {:<11} {:>10} {:<6} MoM {:.2} {:?}",
            result.reading.marker.name(),
            result.reading.value,
            result.reading.marker.unit(),
            result.mom,
            result.status,
        )?;
    }

    for summary in &assessment.summaries {
        writeln!(
            out,
            "  {:<30} {:>10} {}",
            summary.condition.name(),
            summary.odds,
            summary.category.label(),
        )?;
    }

    let rec = &assessment.recommendation;
    writeln!(out, "Recommendation ({:?}) for {}:", rec.tier, rec.condition.name())?;
    for action in &rec.actions {
        writeln!(out, "  - {action}")?;
    }
    Ok(())
}

pub fn history(
    config: &AppConfig,
    patient: Option<&str>,
    latest: bool,
    out: &mut impl Write,
) -> eyre::Result<usize> {
    let store = HistoryStore::new(&config.history_path);

    let records = match (patient, latest) {
        (Some(raw), _) => {
            let id = PatientId::parse(raw)?;
            if latest {
                store.latest_for_patient(&id)?.into_iter().collect()
            } else {
                store.for_patient(&id)?
            }
        }
        (None, true) => store.latest_per_patient()?,
        (None, false) => store.load()?,
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    Ok(records.len())
}
