//! Intrinsic trust and dependency lookups backed by the deps.dev v3 API.
//!
//! Intrinsic trustworthiness comes from the OpenSSF Scorecard of the package's
//! source repository, as reported by deps.dev.

pub mod bundled;
pub mod ecosystem;
pub mod gopkgin;
pub mod transport;

use crate::convert;
use crate::error::LookupError;
use crate::lookup::{DependencyResolver, IntrinsicTrust};
use crate::package::Package;
use ecosystem::Ecosystem;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use transport::{HttpClient, HttpSettings};

const SOURCE_REPO: &str = "SOURCE_REPO";
const DIRECT: &str = "DIRECT";
const MAX_SCORECARD: f64 = 10.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionKey {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectKey {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProject {
    pub project_key: Option<ProjectKey>,
    #[serde(default)]
    pub relation_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    #[serde(default)]
    pub related_projects: Vec<RelatedProject>,
    #[serde(default)]
    pub bundled_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub overall_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub scorecard: Option<Scorecard>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub version_key: Option<VersionKey>,
    #[serde(default)]
    pub bundled: bool,
    #[serde(default)]
    pub relation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependenciesResponse {
    #[serde(default)]
    pub nodes: Vec<DependencyNode>,
}

/// deps.dev client serving both lookups the evaluator needs.
#[derive(Debug)]
pub struct DepsDotDev {
    http: HttpClient,
}

impl DepsDotDev {
    pub fn new(settings: HttpSettings) -> Result<Self, LookupError> {
        Ok(Self {
            http: HttpClient::new(settings)?,
        })
    }

    fn version_path(ecosystem: Ecosystem, package: &Package) -> String {
        format!(
            "/systems/{}/packages/{}/versions/{}",
            ecosystem,
            urlencoding::encode(&package.name),
            urlencoding::encode(&package.version)
        )
    }

    fn get_version(&self, ecosystem: Ecosystem, package: &Package) -> Result<VersionResponse, LookupError> {
        self.http.get_json(&Self::version_path(ecosystem, package))
    }

    fn repository(&self, ecosystem: Ecosystem, package: &Package) -> Result<String, LookupError> {
        let version = self.get_version(ecosystem, package)?;
        source_repository(ecosystem, package, &version)
    }
}

/// Picks the source repository of a package version.
///
/// Falls back to the gopkg.in naming rules for Go modules deps.dev cannot
/// link to a repository.
pub fn source_repository(
    ecosystem: Ecosystem,
    package: &Package,
    version: &VersionResponse,
) -> Result<String, LookupError> {
    let mut repositories = version
        .related_projects
        .iter()
        .filter(|project| project.relation_type == SOURCE_REPO)
        .filter_map(|project| project.project_key.as_ref())
        .map(|key| key.id.as_str())
        .filter(|id| !id.is_empty());

    if let Some(repository) = repositories.next() {
        if repositories.next().is_some() {
            warn!(package = %package, repository, "multiple source repositories, using the first");
        }
        return Ok(repository.to_string());
    }

    if ecosystem == Ecosystem::Go && package.name.starts_with(gopkgin::GOPKGIN_PREFIX) {
        return gopkgin::repository(&package.name);
    }

    Err(LookupError::NoSourceRepository(package.to_string()))
}

/// Converts a 0–10 scorecard into trustworthiness.
pub fn trustworthiness_from_scorecard(
    repository: &str,
    project: &ProjectResponse,
) -> Result<f64, LookupError> {
    let scorecard = project
        .scorecard
        .as_ref()
        .ok_or_else(|| LookupError::NoScorecard(repository.to_string()))?;

    let overall = scorecard.overall_score;
    if !(0.0..=MAX_SCORECARD).contains(&overall) {
        return Err(LookupError::InvalidScorecard {
            subject: repository.to_string(),
            value: overall,
        });
    }

    Ok(convert::trustworthiness_from_score(overall / MAX_SCORECARD))
}

/// Direct dependencies of `package` from a dependency graph response.
///
/// Bundled nodes are kept only when `bundled_names` lists them as bundled
/// directly by `package`.
pub fn direct_dependencies_from(
    package: &Package,
    response: &DependenciesResponse,
    bundled_names: &HashSet<String>,
) -> Result<Vec<Package>, LookupError> {
    let mut result = Vec::new();

    for node in &response.nodes {
        if node.relation != DIRECT {
            continue;
        }
        let Some(key) = node.version_key.as_ref() else {
            continue;
        };

        if node.bundled && !bundled_names.contains(&key.name) {
            debug!(
                package = %package,
                dependency = %key.name,
                "bundled node not bundled directly, skipping"
            );
            continue;
        }

        let ecosystem: Ecosystem = key.system.parse()?;
        result.push(Package::new(
            ecosystem.as_str(),
            key.name.clone(),
            key.version.clone(),
        ));
    }

    Ok(result)
}

impl IntrinsicTrust for DepsDotDev {
    fn intrinsic_trustworthiness(&self, package: &Package) -> Result<f64, LookupError> {
        let ecosystem: Ecosystem = package.ecosystem.parse()?;
        let repository = self.repository(ecosystem, package)?;

        let project: ProjectResponse = self
            .http
            .get_json(&format!("/projects/{}", urlencoding::encode(&repository)))?;

        let trustworthiness = trustworthiness_from_scorecard(&repository, &project)?;
        debug!(package = %package, %repository, trustworthiness, "scorecard trustworthiness");
        Ok(trustworthiness)
    }
}

impl DependencyResolver for DepsDotDev {
    fn direct_dependencies(&self, package: &Package) -> Result<Vec<Package>, LookupError> {
        let ecosystem: Ecosystem = package.ecosystem.parse()?;
        let response: DependenciesResponse = self.http.get_json(&format!(
            "{}:dependencies",
            Self::version_path(ecosystem, package)
        ))?;

        let has_bundled = response
            .nodes
            .iter()
            .any(|node| node.bundled && node.relation == DIRECT);
        let bundled_names = if ecosystem == Ecosystem::Npm && has_bundled {
            let version = self.get_version(ecosystem, package)?;
            bundled::direct_bundled_names(&version.bundled_paths)
        } else {
            HashSet::new()
        };

        direct_dependencies_from(package, &response, &bundled_names)
    }
}
