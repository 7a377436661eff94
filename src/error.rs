use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Invalid schema map: {0}")]
    InvalidSchema(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<::config::ConfigError> for ProcessingError {
    fn from(err: ::config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}

/// Category a rejected line falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionKind {
    MalformedFormat,
    ParseFailure,
    InvalidData,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::MalformedFormat => "malformed-format",
            RejectionKind::ParseFailure => "parse-failure",
            RejectionKind::InvalidData => "invalid-data",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single raw line did not produce a journey record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectionReason {
    #[error("expected {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("unparseable {field} '{value}': {cause}")]
    Unparseable {
        field: &'static str,
        value: String,
        cause: String,
    },

    #[error("end time {end} is not after start time {start}")]
    EndNotAfterStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("end odometer {end} is not greater than start odometer {start}")]
    OdometerNotIncreasing { start: f64, end: f64 },
}

impl RejectionReason {
    pub fn kind(&self) -> RejectionKind {
        match self {
            RejectionReason::WrongFieldCount { .. } => RejectionKind::MalformedFormat,
            RejectionReason::Unparseable { .. } => RejectionKind::ParseFailure,
            RejectionReason::EndNotAfterStart { .. }
            | RejectionReason::OdometerNotIncreasing { .. } => RejectionKind::InvalidData,
        }
    }
}

/// A rejected line together with the reason it was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} ({reason}): {line}", kind = .reason.kind())]
pub struct Rejection {
    pub line: String,
    pub reason: RejectionReason,
}

impl Rejection {
    pub fn new(line: impl Into<String>, reason: RejectionReason) -> Self {
        Self {
            line: line.into(),
            reason,
        }
    }

    pub fn kind(&self) -> RejectionKind {
        self.reason.kind()
    }
}
