//! Product API transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part as FormPart};
use serde_json::Value;
use shopadmin_core::CsrfToken;
use shopadmin_products::{MultipartPayload, PartValue};
use thiserror::Error;
use url::Url;

/// One create-product call, fully resolved.
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub endpoint: Url,
    pub csrf_header: String,
    pub csrf_token: CsrfToken,
    pub payload: MultipartPayload,
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` string of a JSON body shaped `{ "error": "..." }`.
    ///
    /// Bodies that are not JSON objects, or whose `error` is missing, empty,
    /// or not a string, yield `None`.
    pub fn error_message(&self) -> Option<String> {
        let body: Value = serde_json::from_slice(&self.body).unwrap_or(Value::Null);
        match body.get("error") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("invalid multipart part: {0}")]
    InvalidPart(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// Boundary to the Product API.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: ProductApi + ?Sized> ProductApi for std::sync::Arc<T> {
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ApiResponse, TransportError> {
        (**self).create_product(request).await
    }
}

/// reqwest-backed [`ProductApi`].
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
}

impl HttpProductApi {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

// reqwest writes the `multipart/form-data; boundary=...` header itself.
fn to_form(payload: MultipartPayload) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::File(file) => {
                let mut file_part = FormPart::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    file_part = file_part
                        .mime_str(&content_type)
                        .map_err(|e| TransportError::InvalidPart(e.to_string()))?;
                }
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ApiResponse, TransportError> {
        let header_name = HeaderName::from_bytes(request.csrf_header.as_bytes())
            .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
        let header_value = HeaderValue::from_str(request.csrf_token.expose())
            .map_err(|e| TransportError::InvalidHeader(e.to_string()))?;
        let form = to_form(request.payload)?;

        let resp = self
            .client
            .post(request.endpoint)
            .header(header_name, header_value)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = resp.status().as_u16();
        // A body that cannot be read is treated like an empty one.
        let body = match resp.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::debug!(status, error = %e, "failed to read response body");
                Vec::new()
            }
        };

        Ok(ApiResponse { status, body })
    }
}
