use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// TLS configuration errors
#[derive(Debug)]
pub enum TlsConfigError {
    /// Failed to read CA certificate file
    CaCertificateReadError {
        path: String,
        source: std::io::Error,
    },
    /// Failed to parse CA certificate
    CaCertificateParseError(String),
    /// Failed to build the HTTP client
    ClientBuildError(String),
}

impl fmt::Display for TlsConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsConfigError::CaCertificateReadError { path, source } => {
                write!(
                    f,
                    "Failed to read CA certificate file '{}': {}",
                    path, source
                )
            }
            TlsConfigError::CaCertificateParseError(msg) => {
                write!(f, "Failed to parse CA certificate: {}", msg)
            }
            TlsConfigError::ClientBuildError(msg) => {
                write!(f, "Failed to build HTTP client: {}", msg)
            }
        }
    }
}

impl std::error::Error for TlsConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TlsConfigError::CaCertificateReadError { source, .. } => Some(source),
            _ => None,
        }
    }
}

type Result<T> = std::result::Result<T, TlsConfigError>;

/// Client-side TLS configuration for the save endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientTlsConfig {
    /// Whether to accept invalid certificates (for development with self-signed certs)
    pub accept_invalid_certs: bool,
    /// Optional custom CA certificate path for validating server certificates
    pub ca_cert_path: Option<String>,
}

impl ClientTlsConfig {
    /// Create a new ClientTlsConfig with default settings (strict certificate validation)
    pub fn new() -> Self {
        ClientTlsConfig {
            accept_invalid_certs: false,
            ca_cert_path: None,
        }
    }

    /// Create a ClientTlsConfig that accepts invalid certificates (for development)
    pub fn new_danger_accept_invalid_certs() -> Self {
        ClientTlsConfig {
            accept_invalid_certs: true,
            ca_cert_path: None,
        }
    }

    /// Set a custom CA certificate for validating server certificates
    pub fn with_ca_cert(mut self, ca_cert_path: impl Into<String>) -> Self {
        self.ca_cert_path = Some(ca_cert_path.into());
        self
    }

    /// Apply this configuration to an HTTP client builder
    pub fn apply(&self, builder: reqwest::ClientBuilder) -> Result<reqwest::ClientBuilder> {
        let mut builder = builder;

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert_path) = &self.ca_cert_path {
            let ca_cert_pem =
                fs::read(ca_cert_path).map_err(|e| TlsConfigError::CaCertificateReadError {
                    path: ca_cert_path.clone(),
                    source: e,
                })?;

            let ca_cert = reqwest::Certificate::from_pem(&ca_cert_pem)
                .map_err(|e| TlsConfigError::CaCertificateParseError(e.to_string()))?;

            builder = builder.add_root_certificate(ca_cert);
        }

        Ok(builder)
    }
}
