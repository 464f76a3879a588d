use prenatal_core::models::marker::{Marker, ScreeningWindow};
use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("{marker} has no reference table in the {window} trimester window")]
    MarkerNotInWindow {
        marker: Marker,
        window: ScreeningWindow,
    },

    #[error("request failed validation: {}", summarize(.0))]
    InvalidRequest(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
