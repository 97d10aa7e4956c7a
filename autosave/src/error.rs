use autosave_protocol::field::EmptyFieldName;
use std::fmt;

use crate::tls_config::TlsConfigError;

/// Errors raised while binding a form or starting a save
#[derive(Debug)]
pub enum BindError {
    /// The form handed to the binder is not the configured one
    FormNotFound { expected: String, found: String },
    /// No bound field has this name
    UnknownField(String),
    /// Field names must not be empty
    EmptyFieldName,
    /// The HTTP transport could not be built
    Transport(TlsConfigError),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::FormNotFound { expected, found } => {
                write!(f, "Expected form '{}', found '{}'", expected, found)
            }
            BindError::UnknownField(name) => write!(f, "No bound field named '{}'", name),
            BindError::EmptyFieldName => write!(f, "Field name must not be empty"),
            BindError::Transport(err) => write!(f, "Transport setup failed: {}", err),
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmptyFieldName> for BindError {
    fn from(_: EmptyFieldName) -> Self {
        BindError::EmptyFieldName
    }
}

impl From<TlsConfigError> for BindError {
    fn from(err: TlsConfigError) -> Self {
        BindError::Transport(err)
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        path: String,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path, source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Failed to parse config file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
