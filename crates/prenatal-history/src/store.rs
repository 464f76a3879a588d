use std::path::{Path, PathBuf};

use prenatal_core::models::assessment::PatientAssessment;
use prenatal_core::models::patient::PatientId;
use tracing::{debug, info};

use crate::error::HistoryError;

/// Default file name of the history collection.
pub const DEFAULT_FILE_NAME: &str = "genetic_patients_data.json";

/// File-backed, append-only list of assessments. Records are never edited
/// or removed; a recalculation appends a new record.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, oldest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<PatientAssessment>, HistoryError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no history file yet");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| HistoryError::Read {
            path: self.path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|source| HistoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Append one record and rewrite the file. Returns the new record
    /// count.
    ///
    /// A corrupt existing file is reported rather than overwritten.
    pub fn append(&self, assessment: &PatientAssessment) -> Result<usize, HistoryError> {
        let mut records = self.load()?;
        records.push(assessment.clone());
        self.write_all(&records)?;

        info!(
            path = %self.path.display(),
            patient = %assessment.patient.id,
            assessment = %assessment.id,
            total = records.len(),
            "assessment appended to history"
        );
        Ok(records.len())
    }

    /// Every record for one patient, oldest first.
    pub fn for_patient(&self, id: &PatientId) -> Result<Vec<PatientAssessment>, HistoryError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|a| &a.patient.id == id)
            .collect())
    }

    /// Most recent record for one patient by `created_at`. On equal
    /// timestamps the later-appended record wins.
    pub fn latest_for_patient(
        &self,
        id: &PatientId,
    ) -> Result<Option<PatientAssessment>, HistoryError> {
        let mut latest: Option<PatientAssessment> = None;
        for record in self.for_patient(id)? {
            match &latest {
                Some(current) if !supersedes(&record, current) => {}
                _ => latest = Some(record),
            }
        }
        Ok(latest)
    }

    /// Most recent record for each patient, in order of first appearance.
    pub fn latest_per_patient(&self) -> Result<Vec<PatientAssessment>, HistoryError> {
        let mut latest: Vec<PatientAssessment> = Vec::new();
        for record in self.load()? {
            match latest.iter().position(|a| a.patient.id == record.patient.id) {
                Some(i) if supersedes(&record, &latest[i]) => latest[i] = record,
                Some(_) => {}
                None => latest.push(record),
            }
        }
        Ok(latest)
    }

    fn write_all(&self, records: &[PatientAssessment]) -> Result<(), HistoryError> {
        let write_err = |source: std::io::Error| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(records)?;

        // Write to a temp file then rename, so a failed write never leaves a
        // truncated history behind.
        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);
        std::fs::write(&tmp_path, json.as_bytes()).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

fn supersedes(candidate: &PatientAssessment, current: &PatientAssessment) -> bool {
    candidate.created_at >= current.created_at
}
