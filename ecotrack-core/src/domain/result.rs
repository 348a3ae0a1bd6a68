//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// `Display` is the message shown to the user. API messages are carried
/// verbatim so views never need to know which response field they came from.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field was empty. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The view needs an authenticated session and there is none.
    #[error("{0}")]
    NotLoggedIn(String),

    /// No response was received (connection refused, DNS, reset...).
    #[error("{0}")]
    Network(String),

    /// The server answered with a status outside 200..=299.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body could not be understood.
    #[error("{0}")]
    Parse(String),

    /// The request was abandoned through the view's cancellation token.
    #[error("La solicitud fue cancelada.")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error category, for callers that branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ErrorKind {
    Validation,
    NotLoggedIn,
    Network,
    Api { status: u16 },
    Parse,
    Cancelled,
    Config,
    Storage,
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a login-required error
    pub fn not_logged_in(msg: impl Into<String>) -> Self {
        Self::NotLoggedIn(msg.into())
    }

    /// Create an API error
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotLoggedIn(_) => ErrorKind::NotLoggedIn,
            Self::Network(_) => ErrorKind::Network,
            Self::Api { status, .. } => ErrorKind::Api { status: *status },
            Self::Parse(_) | Self::Json(_) => ErrorKind::Parse,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Config(_) => ErrorKind::Config,
            Self::Storage(_) | Self::Io(_) => ErrorKind::Storage,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result envelope used for `--json` output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let mut context = HashMap::new();
                if let Ok(kind) = serde_json::to_value(e.kind()) {
                    context.insert("error_kind".to_string(), kind);
                }
                Self::fail_with_context(e.to_string(), context)
            }
        }
    }
}
