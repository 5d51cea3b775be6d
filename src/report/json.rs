use crate::types::report::{CaseReport, Evaluation};

pub fn to_json(evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(evaluation)
}

pub fn cases_to_json(cases: &[CaseReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(cases)
}
