use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which side of the exchange a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing usable came back: connect, DNS, timeout, or a bad URL.
    Transport,
    /// The server answered with status >= 400.
    Server,
    /// A payload could not be serialized or a body could not be parsed.
    Encoding,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request url {url}: {source}")]
    InvalidUrl { url: String, #[source] source: url::ParseError },
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to marshal payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } | Self::Transport(_) => FailureKind::Transport,
            Self::Status { .. } => FailureKind::Server,
            Self::Encode(_) | Self::Decode(_) => FailureKind::Encoding,
        }
    }

    pub fn status(&self) -> Option<u16> { match self { Self::Status { status, .. } => Some(*status), _ => None } }
}

/// What the façade was doing when a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deploy,
    Status,
    Logs,
    SaveRegistry,
    ListRegistries,
    RemoveRegistry,
    RegisterToken,
    ListTokens,
    RevokeToken,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deploy => "deployment failed",
            Self::Status => "failed to get status",
            Self::Logs => "failed to get logs",
            Self::SaveRegistry => "failed to save registry credentials",
            Self::ListRegistries => "failed to list registries",
            Self::RemoveRegistry => "failed to remove registry credentials",
            Self::RegisterToken => "failed to register token",
            Self::ListTokens => "failed to list tokens",
            Self::RevokeToken => "failed to revoke token",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
#[error("{operation}: {source}")]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: ApiError,
}

impl OperationError {
    pub fn kind(&self) -> FailureKind { self.source.kind() }
}

pub(crate) trait WithOperation<T> {
    fn during(self, operation: Operation) -> Result<T, OperationError>;
}

impl<T> WithOperation<T> for Result<T, ApiError> {
    fn during(self, operation: Operation) -> Result<T, OperationError> { self.map_err(|source| OperationError { operation, source }) }
}
