use crate::convert;
use crate::package::Package;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one successful root evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub package: Package,
    pub trustworthiness: f64,
    pub score: f64,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(package: Package, trustworthiness: f64) -> Self {
        Self {
            package,
            trustworthiness,
            score: convert::score_from_trustworthiness(trustworthiness),
            evaluated_at: Utc::now(),
        }
    }
}

/// Result of one named case from a batch file.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub evaluation: Evaluation,
}
