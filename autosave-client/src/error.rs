use autosave::{BindError, ConfigError};
use std::fmt;

/// Errors that stop the client from showing a form
#[derive(Debug)]
pub enum ClientError {
    /// No platform config directory and no override was given
    ConfigDirUnavailable,
    /// The form description could not be read
    FormRead {
        path: String,
        source: std::io::Error,
    },
    /// The form description is not valid JSON for a form
    FormParse { path: String, message: String },
    /// The binder configuration could not be loaded
    Config(ConfigError),
    /// The form could not be bound
    Bind(BindError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::ConfigDirUnavailable => {
                write!(f, "Could not determine platform config directory")
            }
            ClientError::FormRead { path, source } => {
                write!(f, "Failed to read form '{}': {}", path, source)
            }
            ClientError::FormParse { path, message } => {
                write!(f, "Failed to parse form '{}': {}", path, message)
            }
            ClientError::Config(err) => write!(f, "{}", err),
            ClientError::Bind(err) => write!(f, "Failed to bind form: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::FormRead { source, .. } => Some(source),
            ClientError::Config(err) => Some(err),
            ClientError::Bind(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        ClientError::Config(err)
    }
}

impl From<BindError> for ClientError {
    fn from(err: BindError) -> Self {
        ClientError::Bind(err)
    }
}
