use crate::aggregate::Evaluator;
use crate::error::{DepscoreError, Result};
use crate::package::Package;
use crate::types::report::CaseReport;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Named packages to evaluate in one run.
///
/// ```json
/// {"real_cases": [{"name": "requests", "package": {"ecosystem": "pypi", "name": "requests", "version": "2.28.1"}}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub real_cases: Vec<BatchCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchCase {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Package")]
    pub package: Package,
}

impl BatchFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Evaluates every case in order, stopping at the first failure.
pub fn run(evaluator: &Evaluator, batch: &BatchFile) -> Result<Vec<CaseReport>> {
    let mut reports = Vec::with_capacity(batch.real_cases.len());
    for case in &batch.real_cases {
        info!(case = %case.name, package = %case.package, "evaluating case");
        let evaluation =
            evaluator
                .evaluate(&case.package)
                .map_err(|source| DepscoreError::CaseFailed {
                    case: case.name.clone(),
                    source,
                })?;
        reports.push(CaseReport {
            name: case.name.clone(),
            evaluation,
        });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::StaticGraph;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn evaluator() -> Evaluator {
        let mut graph = StaticGraph::default();
        graph.insert("A", 0.95, &["B"]).insert("B", 0.99, &[]);
        let graph = Arc::new(graph);
        Evaluator::builder()
            .intrinsic(graph.clone())
            .dependencies(graph)
            .build()
            .expect("evaluator should build")
    }

    #[test]
    fn load_accepts_capitalized_case_fields() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("test-data.json");
        fs::write(
            &path,
            r#"{"real_cases": [{"Name": "root", "Package": {"Ecosystem": "npm", "Name": "A", "Version": "1.0.0"}}]}"#,
        )
        .expect("batch file should write");

        let batch = BatchFile::load(&path).expect("batch should load");
        assert_eq!(batch.real_cases.len(), 1);
        assert_eq!(batch.real_cases[0].name, "root");
        assert_eq!(batch.real_cases[0].package.name, "A");
    }

    #[test]
    fn run_reports_every_case() {
        let batch = BatchFile {
            real_cases: vec![
                BatchCase {
                    name: "root".to_string(),
                    package: Package::new("npm", "A", "1.0.0"),
                },
                BatchCase {
                    name: "leaf".to_string(),
                    package: Package::new("npm", "B", "1.0.0"),
                },
            ],
        };

        let reports = run(&evaluator(), &batch).expect("batch should succeed");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].evaluation.trustworthiness, 0.99);
        assert!(
            (reports[0].evaluation.trustworthiness - 0.95 * 0.99_f64.powf(1.5)).abs() < 1e-15
        );
    }

    #[test]
    fn run_stops_at_first_failing_case() {
        let batch = BatchFile {
            real_cases: vec![
                BatchCase {
                    name: "unknown".to_string(),
                    package: Package::new("npm", "Z", "1.0.0"),
                },
                BatchCase {
                    name: "root".to_string(),
                    package: Package::new("npm", "A", "1.0.0"),
                },
            ],
        };

        let err = run(&evaluator(), &batch).expect_err("Z is not in the graph");
        assert!(matches!(err, DepscoreError::CaseFailed { ref case, .. } if case == "unknown"));
    }
}
