use async_trait::async_trait;
use autosave_protocol::{
    messages::{ResponseFormat, SaveReply, SaveRequest},
    network::{self, decode_reply, encode_request, validate_response_size, SaveError},
};
use kv_log_macro as log;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};

use crate::{config::BinderConfig, tls_config::TlsConfigError};

/// Sends one save request and reports whether it succeeded
#[async_trait]
pub trait SaveTransport: Send + Sync {
    async fn save(&self, request: &SaveRequest) -> network::Result<SaveReply>;
}

/// POSTs the request as JSON to the configured save endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    response_format: ResponseFormat,
}

impl HttpTransport {
    pub fn new(config: &BinderConfig) -> Result<Self, TlsConfigError> {
        let mut builder = config.tls.apply(reqwest::Client::builder())?;
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TlsConfigError::ClientBuildError(e.to_string()))?;

        Ok(HttpTransport {
            client,
            url: config.save_url(),
            response_format: config.response_format,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SaveTransport for HttpTransport {
    async fn save(&self, request: &SaveRequest) -> network::Result<SaveReply> {
        let body = encode_request(request)?;

        log::debug!("Sending save request", {
            url: self.url.as_str(),
            field: request.name.as_str()
        });

        let mut response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .body(body)
            .send()
            .await
            .map_err(|e| SaveError::Transport(e.to_string()))?;

        let status = response.status();
        if let Some(length) = response.content_length() {
            validate_response_size(usize::try_from(length).unwrap_or(usize::MAX))?;
        }

        // Chunked bodies carry no length up front
        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SaveError::Transport(e.to_string()))?
        {
            validate_response_size(bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        log::debug!("Received save response", {
            status: status.as_u16(),
            length: bytes.len() as u64
        });

        if !status.is_success() {
            return Err(SaveError::Status {
                code: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        decode_reply(&bytes, self.response_format)
    }
}
