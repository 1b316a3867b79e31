//! Browser transport built on `gloo-net`
//!
//! Requests are sent with `credentials: "include"` so the backend's session
//! cookie is stored and replayed. For multipart bodies the browser sets the
//! `multipart/form-data` content type and boundary itself.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use crate::core::{AuthError, AuthRequest, AuthTransport, AvatarFile, Part, PartBody, TransportResponse};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl AuthTransport for GlooTransport {
    async fn send(&self, request: AuthRequest) -> Result<TransportResponse, AuthError> {
        let prepared = match request {
            AuthRequest::Json { url, body } => Request::post(&url)
                .credentials(RequestCredentials::Include)
                .json(&body),
            AuthRequest::Multipart { url, parts } => Request::post(&url)
                .credentials(RequestCredentials::Include)
                .body(build_form_data(parts)?),
        }
        .map_err(transport_error)?;

        let response = prepared.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}

fn build_form_data(parts: Vec<Part>) -> Result<FormData, AuthError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match part.body {
            PartBody::Text(value) => form.append_with_str(part.name, &value).map_err(js_error)?,
            PartBody::File(file) => {
                let blob = to_blob(&file)?;
                form.append_with_blob_and_filename(part.name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

fn to_blob(file: &AvatarFile) -> Result<Blob, AuthError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)
        .map_err(js_error)
}

/// Reads a picked file into memory
pub async fn read_avatar(file: web_sys::File) -> Result<AvatarFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(AvatarFile::new(file.name(), file.type_(), bytes))
}

fn transport_error(err: gloo_net::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}

fn js_error(err: JsValue) -> AuthError {
    AuthError::Transport(format!("{:?}", err))
}
