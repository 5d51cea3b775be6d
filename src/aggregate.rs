//! Recursive aggregation of trustworthiness over a dependency graph.
//!
//! A package's aggregated trustworthiness is its intrinsic trustworthiness
//! multiplied by `t'^e` for every direct dependency, where `t'` is the
//! dependency's own aggregated trustworthiness and `e` is
//! [`TRANSITIVE_DECAY_EXPONENT`].

use crate::error::EvaluationError;
use crate::lookup::{SharedDependencyResolver, SharedIntrinsicTrust};
use crate::package::Package;
use crate::types::report::Evaluation;
use std::collections::HashSet;
use tracing::debug;

/// Exponent "e" applied to every dependency edge of the graph.
pub const TRANSITIVE_DECAY_EXPONENT: f64 = 1.5;

/// Names of the packages on the current root-to-node path.
///
/// Each descent gets its own copy; siblings never observe each other's
/// insertions.
// TODO: match on ecosystem and version as well once name aliases such as
// gopkg.in paths can be resolved to a single identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors(HashSet<String>);

impl Ancestors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Ancestor set for the children of `name`.
    pub fn descend(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.0.insert(name.to_string());
        next
    }
}

#[derive(Default)]
pub struct EvaluatorBuilder {
    intrinsic: Option<SharedIntrinsicTrust>,
    dependencies: Option<SharedDependencyResolver>,
}

impl EvaluatorBuilder {
    pub fn intrinsic(mut self, intrinsic: SharedIntrinsicTrust) -> Self {
        self.intrinsic = Some(intrinsic);
        self
    }

    pub fn dependencies(mut self, dependencies: SharedDependencyResolver) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn build(self) -> Result<Evaluator, EvaluationError> {
        let intrinsic = self.intrinsic.ok_or(EvaluationError::MissingCapability(
            "intrinsic trustworthiness evaluator",
        ))?;
        let dependencies = self
            .dependencies
            .ok_or(EvaluationError::MissingCapability("dependency resolver"))?;
        Ok(Evaluator {
            intrinsic,
            dependencies,
        })
    }
}

/// Computes aggregated trustworthiness and scores for root packages.
///
/// Holds no state between evaluations.
pub struct Evaluator {
    intrinsic: SharedIntrinsicTrust,
    dependencies: SharedDependencyResolver,
}

impl Evaluator {
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::default()
    }

    /// Score of `package` in `[0, 1]`.
    pub fn evaluate_score(&self, package: &Package) -> Result<f64, EvaluationError> {
        self.evaluate(package).map(|evaluation| evaluation.score)
    }

    /// Aggregated trustworthiness and score of `package`.
    pub fn evaluate(&self, package: &Package) -> Result<Evaluation, EvaluationError> {
        let trustworthiness = self.aggregated_trustworthiness(package, &Ancestors::new())?;
        Ok(Evaluation::new(package.clone(), trustworthiness))
    }

    /// Aggregated trustworthiness of `package` reached through `ancestors`.
    pub fn aggregated_trustworthiness(
        &self,
        package: &Package,
        ancestors: &Ancestors,
    ) -> Result<f64, EvaluationError> {
        let intrinsic = self
            .intrinsic
            .intrinsic_trustworthiness(package)
            .map_err(|source| EvaluationError::IntrinsicLookup {
                package: package.clone(),
                source,
            })?;
        debug!(package = %package, depth = ancestors.0.len(), intrinsic, "intrinsic trustworthiness");

        let mut result = intrinsic;

        let dependencies = self
            .dependencies
            .direct_dependencies(package)
            .map_err(|source| EvaluationError::DependencyLookup {
                package: package.clone(),
                source,
            })?;

        let child_ancestors = ancestors.descend(&package.name);
        for dependency in &dependencies {
            if ancestors.contains(&dependency.name) {
                debug!(
                    package = %package,
                    dependency = %dependency.name,
                    "dependency cycle, skipping edge"
                );
                continue;
            }

            let contribution = self
                .aggregated_trustworthiness(dependency, &child_ancestors)
                .map_err(|source| EvaluationError::Dependency {
                    name: dependency.name.clone(),
                    source: Box::new(source),
                })?;

            result *= contribution.powf(TRANSITIVE_DECAY_EXPONENT);
        }

        debug!(
            package = %package,
            dependencies = dependencies.len(),
            aggregated = result,
            "aggregated trustworthiness"
        );
        Ok(result)
    }
}
