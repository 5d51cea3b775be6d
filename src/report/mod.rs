pub mod json;
pub mod md;
pub mod text;

use crate::error::DepscoreError;
use crate::types::report::{CaseReport, Evaluation};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Md,
}

pub fn render(evaluation: &Evaluation, format: OutputFormat) -> Result<String, DepscoreError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(evaluation)),
        OutputFormat::Json => json::to_json(evaluation).map_err(DepscoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(evaluation)),
    }
}

pub fn render_cases(cases: &[CaseReport], format: OutputFormat) -> Result<String, DepscoreError> {
    match format {
        OutputFormat::Text => Ok(text::cases_to_text(cases)),
        OutputFormat::Json => json::cases_to_json(cases).map_err(DepscoreError::Json),
        OutputFormat::Md => Ok(md::cases_to_markdown(cases)),
    }
}
