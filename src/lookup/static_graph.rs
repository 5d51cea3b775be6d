use crate::convert;
use crate::error::{DepscoreError, LookupError, Result};
use crate::lookup::{DependencyResolver, IntrinsicTrust};
use crate::package::Package;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A dependency graph described up front, keyed by package name.
///
/// ```toml
/// [packages.A]
/// trustworthiness = 0.92
/// dependencies = ["B", "C"]
///
/// [packages.B]
/// score = 0.7
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticGraph {
    #[serde(default)]
    pub packages: HashMap<String, StaticNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticNode {
    pub trustworthiness: Option<f64>,
    /// Scorecard-style value in `[0, 1]`, converted on lookup.
    pub score: Option<f64>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl StaticGraph {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DepscoreError::ConfigParse(format!("{}: {}", path.display(), e)))
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        trustworthiness: f64,
        dependencies: &[&str],
    ) -> &mut Self {
        self.packages.insert(
            name.into(),
            StaticNode {
                trustworthiness: Some(trustworthiness),
                score: None,
                dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            },
        );
        self
    }

    fn node(&self, package: &Package) -> std::result::Result<&StaticNode, LookupError> {
        self.packages
            .get(&package.name)
            .ok_or_else(|| LookupError::NotFound(package.name.clone()))
    }
}

impl IntrinsicTrust for StaticGraph {
    fn intrinsic_trustworthiness(&self, package: &Package) -> std::result::Result<f64, LookupError> {
        let node = self.node(package)?;
        match (node.trustworthiness, node.score) {
            (Some(t), _) if t > 0.0 && t <= 1.0 => Ok(t),
            (Some(t), _) => Err(LookupError::InvalidScorecard {
                subject: package.name.clone(),
                value: t,
            }),
            (None, Some(score)) if (0.0..=1.0).contains(&score) => {
                Ok(convert::trustworthiness_from_score(score))
            }
            (None, Some(score)) => Err(LookupError::InvalidScorecard {
                subject: package.name.clone(),
                value: score,
            }),
            (None, None) => Err(LookupError::NoScorecard(package.name.clone())),
        }
    }
}

impl DependencyResolver for StaticGraph {
    fn direct_dependencies(
        &self,
        package: &Package,
    ) -> std::result::Result<Vec<Package>, LookupError> {
        let node = self.node(package)?;
        Ok(node
            .dependencies
            .iter()
            .map(|name| Package::new(package.ecosystem.clone(), name.clone(), ""))
            .collect())
    }
}
