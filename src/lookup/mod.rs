pub mod static_graph;

use crate::error::LookupError;
use crate::package::Package;
use std::sync::Arc;

pub use static_graph::StaticGraph;

/// Source of a package's own trust signal, independent of its dependencies.
pub trait IntrinsicTrust {
    /// Returns a trustworthiness value in `(0, 1]`.
    fn intrinsic_trustworthiness(&self, package: &Package) -> Result<f64, LookupError>;
}

/// Source of a package's direct dependency edges.
pub trait DependencyResolver {
    fn direct_dependencies(&self, package: &Package) -> Result<Vec<Package>, LookupError>;
}

pub type SharedIntrinsicTrust = Arc<dyn IntrinsicTrust + Send + Sync>;
pub type SharedDependencyResolver = Arc<dyn DependencyResolver + Send + Sync>;
