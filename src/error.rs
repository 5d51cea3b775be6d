use crate::package::Package;
use thiserror::Error;

/// Failure reported by an intrinsic-trust or dependency lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("unknown ecosystem: {0:?}")]
    UnknownEcosystem(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("no source repository found for package version {0}")]
    NoSourceRepository(String),

    #[error("no scorecard found for project ({0})")]
    NoScorecard(String),

    #[error("invalid scorecard value {value} for {subject}")]
    InvalidScorecard { subject: String, value: f64 },

    #[error("http error: {0}")]
    Http(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not a gopkg.in package: {0}")]
    NotGopkgIn(String),

    #[error("unexpected number of parts in gopkg.in package name: {0}")]
    UnexpectedGopkgInParts(String),
}

/// Failure of an aggregated trustworthiness evaluation.
///
/// Each recursive frame wraps the error of its failing dependency, so the
/// outermost value describes the whole path from the root to the failing node.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("{0} is required")]
    MissingCapability(&'static str),

    #[error("evaluating intrinsic trustworthiness of {package}: {source}")]
    IntrinsicLookup {
        package: Package,
        #[source]
        source: LookupError,
    },

    #[error("getting direct dependencies of {package}: {source}")]
    DependencyLookup {
        package: Package,
        #[source]
        source: LookupError,
    },

    #[error("evaluating aggregated trustworthiness of {name}: {source}")]
    Dependency {
        name: String,
        #[source]
        source: Box<EvaluationError>,
    },
}

impl EvaluationError {
    /// Names of the dependencies traversed from the root down to the node
    /// whose lookup failed. The root itself is not included, the failing
    /// node is the last element.
    pub fn failing_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let EvaluationError::Dependency { name, source } = current {
            path.push(name.as_str());
            current = source;
        }
        path
    }

    /// The package whose lookup failed, when the failure was a lookup.
    pub fn failing_package(&self) -> Option<&Package> {
        match self {
            EvaluationError::MissingCapability(_) => None,
            EvaluationError::IntrinsicLookup { package, .. }
            | EvaluationError::DependencyLookup { package, .. } => Some(package),
            EvaluationError::Dependency { source, .. } => source.failing_package(),
        }
    }

    /// The underlying lookup failure, if any.
    pub fn lookup_error(&self) -> Option<&LookupError> {
        match self {
            EvaluationError::MissingCapability(_) => None,
            EvaluationError::IntrinsicLookup { source, .. }
            | EvaluationError::DependencyLookup { source, .. } => Some(source),
            EvaluationError::Dependency { source, .. } => source.lookup_error(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DepscoreError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid package reference: {0}")]
    InvalidPackage(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("test case {case:?} failed: {source}")]
    CaseFailed {
        case: String,
        #[source]
        source: EvaluationError,
    },

    #[error("{0}")]
    Evaluation(#[from] EvaluationError),

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DepscoreError>;
