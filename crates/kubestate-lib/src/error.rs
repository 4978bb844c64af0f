//! Error taxonomy for the metrics pipeline
//!
//! Every failure aborts the current command. Two of them carry fixed process
//! exit codes so scripts can tell a missing exporter from a sick one.

use thiserror::Error;

/// Exit code when the exporter service does not exist
pub const EXIT_SERVICE_NOT_FOUND: i32 = 99;

/// Exit code when the exporter exists but fails its health probe
pub const EXIT_UNHEALTHY_SERVICE: i32 = 98;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum KubestateError {
    /// Bad settings file or kubeconfig path/content
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Authenticated cluster client could not be built
    #[error("failed to create cluster client: {0}")]
    Client(#[source] kube::Error),

    #[error(
        "{service} service not found in namespace {namespace}. See https://github.com/kubernetes/kube-state-metrics"
    )]
    ServiceNotFound { service: String, namespace: String },

    #[error("{service} service is not healthy (health probe returned {body:?})")]
    UnhealthyService { service: String, body: String },

    /// Any network failure once the client exists
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("request to {path} timed out after {secs}s")]
    Timeout { path: String, secs: u64 },

    #[error("error reading metric family record {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: prost::DecodeError,
    },
}

impl KubestateError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn transport(
        path: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Transport {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ServiceNotFound { .. } => EXIT_SERVICE_NOT_FOUND,
            Self::UnhealthyService { .. } => EXIT_UNHEALTHY_SERVICE,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, KubestateError>;
