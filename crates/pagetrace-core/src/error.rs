//! Structured, serializable errors

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The page could not register a native event listener. Capture cannot
    /// run at all in this environment, so this propagates to the caller.
    ListenerRegistration,
    /// A stored event record failed to parse. Skipped, never fatal.
    MalformedRecord,
    Storage,
    Unknown,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn listener_registration(kind: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ListenerRegistration,
            format!("could not register '{}' listener: {}", kind, reason),
        )
    }

    pub fn malformed_record(line: usize, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::MalformedRecord,
            format!("record on line {} is malformed: {}", line, reason),
        )
    }

    pub fn storage(reason: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Storage, reason.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::Storage, e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorCode::MalformedRecord, e.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}
