use thiserror::Error;
use std::fmt;
use crate::api::{ApiError, FailureKind, OperationError};
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CliErrorKind {
    #[error("usage error: {0}")] Usage(String),
    #[error("config error: {0}")] Config(String),
    #[error("runtime error: {0}")] Runtime(String),
    #[error("io error: {0}")] Io(String),
    #[error("network error: {0}")] Network(String),
    #[error("server error: {0}")] Server(String),
}

#[derive(Debug)]
pub struct CliError { pub kind: CliErrorKind, pub source: Option<anyhow::Error> }
impl fmt::Display for CliError { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.kind.fmt(f) } }
impl std::error::Error for CliError { fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { self.source.as_ref().map(|e| e.as_ref() as _) } }

impl CliErrorKind { pub fn code(&self) -> i32 { match self { Self::Usage(_) => 2, Self::Config(_) => 10, Self::Runtime(_) => 20, Self::Io(_) => 30, Self::Network(_) => 40, Self::Server(_) => 50 } } }

impl CliError {
    pub fn new(kind: CliErrorKind) -> Self { Self { kind, source: None } }
    pub fn with_source<E: Into<anyhow::Error>>(kind: CliErrorKind, err: E) -> Self { Self { kind, source: Some(err.into()) } }
}

impl From<std::io::Error> for CliError { fn from(e: std::io::Error) -> Self { Self::with_source(CliErrorKind::Io(e.to_string()), e) } }

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        let msg = e.to_string();
        if matches!(e, ConfigError::Read { .. }) { Self::with_source(CliErrorKind::Io(msg), e) } else { Self::with_source(CliErrorKind::Config(msg), e) }
    }
}

// The failure kind picks the exit code; the message keeps the operation context.
fn api_kind(kind: FailureKind, msg: String) -> CliErrorKind {
    match kind {
        FailureKind::Transport => CliErrorKind::Network(msg),
        FailureKind::Server => CliErrorKind::Server(msg),
        FailureKind::Encoding => CliErrorKind::Runtime(msg),
    }
}

impl From<OperationError> for CliError {
    fn from(e: OperationError) -> Self { let kind = api_kind(e.source.kind(), e.to_string()); Self::with_source(kind, e) }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self { let kind = api_kind(e.kind(), e.to_string()); Self::with_source(kind, e) }
}
