//! Native HTTP transport built on `reqwest`
//!
//! The client keeps a cookie store, so session cookies set by the backend
//! are sent with later requests (the native counterpart of a credentialed
//! browser request).

use reqwest::multipart::{Form, Part as FormPart};

use super::api::{AuthRequest, AuthTransport, Part, PartBody, TransportResponse};
use super::error::AuthError;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with its own cookie-enabled client
    pub fn new() -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client })
    }
}

impl AuthTransport for ReqwestTransport {
    async fn send(&self, request: AuthRequest) -> Result<TransportResponse, AuthError> {
        let builder = match request {
            // `.json()` sets `Content-Type: application/json`
            AuthRequest::Json { url, body } => self.client.post(url).json(&body),
            // `.multipart()` sets `multipart/form-data` with the boundary
            AuthRequest::Multipart { url, parts } => {
                self.client.post(url).multipart(build_form(parts)?)
            }
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}

fn build_form(parts: Vec<Part>) -> Result<Form, AuthError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.body {
            PartBody::Text(value) => form.text(part.name, value),
            PartBody::File(file) => {
                let file_part = FormPart::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(transport_error)?;
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

fn transport_error(err: reqwest::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}
