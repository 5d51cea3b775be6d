//! Aggregated dependency score.
//!
//! Computes how much a package can be trusted once its whole transitive
//! dependency graph is taken into account. Each package contributes an
//! intrinsic trustworthiness; dependencies contribute their own aggregated
//! trustworthiness raised to [`aggregate::TRANSITIVE_DECAY_EXPONENT`]. The
//! result is reported as a score in `[0, 1]` via [`convert`].

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod convert;
pub mod depsdotdev;
pub mod error;
pub mod lookup;
pub mod package;
pub mod report;
pub mod types;

pub use aggregate::{Ancestors, Evaluator, EvaluatorBuilder};
pub use error::{DepscoreError, EvaluationError, LookupError};
pub use lookup::{DependencyResolver, IntrinsicTrust};
pub use package::Package;
