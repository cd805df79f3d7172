use thiserror::Error;

/// Invalid or missing configuration. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("option '{name}' not found")]
    MissingOption { name: String },
    #[error("cannot convert option '{name}'='{value}' to a valid value")]
    InvalidValue { name: String, value: String },
    #[error("option '{name}'={value} must be {constraint}")]
    OutOfRange {
        name: String,
        value: String,
        constraint: String,
    },
    #[error("option '{name}'={value} must be one of: {}", .allowed.join(", "))]
    NotOneOf {
        name: String,
        value: String,
        allowed: Vec<String>,
    },
    #[error("cannot parse option '{token}': {reason}")]
    Parse { token: String, reason: &'static str },
    #[error("option '{0}' provided multiple times")]
    DuplicateOption(String),
    #[error("cannot create a detector from an empty configuration")]
    EmptyConfig,
    #[error("unknown detector '{name}', use one of: {}", .known.join(", "))]
    UnknownDetector { name: String, known: Vec<String> },
    #[error("unknown evaluation printer '{name}', use one of: {}", .known.join(", "))]
    UnknownPrinter { name: String, known: Vec<String> },
}
