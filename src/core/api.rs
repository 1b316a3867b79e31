//! Authentication API contract
//!
//! Builds the login (JSON) and sign-up (multipart) requests, defines the
//! transport seam, and interprets responses:
//! - POST /api/v1/user/login - JSON `{username, password}`
//! - POST /api/v1/user/new - multipart `name, bio, username, password`
//!   and an optional `avatar` file
//!
//! Both answer `{user, message}` on 2xx and may carry `{message}` otherwise.

use std::future::Future;

use serde::Deserialize;

use super::config::Config;
use super::error::AuthError;
use super::form::{AvatarFile, Credentials, ProfileDraft};
use super::session::UserRecord;

/// Multipart key of the avatar file
pub const AVATAR_PART: &str = "avatar";

/// Body of one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File(AvatarFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: &'static str,
    pub body: PartBody,
}

impl Part {
    fn text(name: &'static str, value: &str) -> Self {
        Self {
            name,
            body: PartBody::Text(value.to_string()),
        }
    }
}

/// A credentialed POST to the auth backend
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Json {
        url: String,
        body: serde_json::Value,
    },
    Multipart {
        url: String,
        parts: Vec<Part>,
    },
}

impl AuthRequest {
    pub fn url(&self) -> &str {
        match self {
            AuthRequest::Json { url, .. } | AuthRequest::Multipart { url, .. } => url,
        }
    }

    /// Value of the `Content-Type` header the request is sent with
    pub fn content_type(&self) -> &'static str {
        match self {
            AuthRequest::Json { .. } => "application/json",
            AuthRequest::Multipart { .. } => "multipart/form-data",
        }
    }

    /// Names of the multipart parts, empty for JSON requests
    pub fn part_names(&self) -> Vec<&'static str> {
        match self {
            AuthRequest::Json { .. } => Vec::new(),
            AuthRequest::Multipart { parts, .. } => parts.iter().map(|p| p.name).collect(),
        }
    }
}

/// Status and raw body of whatever the backend answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends auth requests with credentials (cookies) included.
///
/// An `Err` means no response reached the client. Any HTTP status, including
/// errors, is an `Ok` response.
pub trait AuthTransport {
    fn send(
        &self,
        request: AuthRequest,
    ) -> impl Future<Output = Result<TransportResponse, AuthError>>;
}

/// Successful login or sign-up
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmissionSuccess {
    pub user: UserRecord,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// JSON request for `POST /api/v1/user/login`
pub fn login_request(config: &Config, credentials: &Credentials) -> AuthRequest {
    AuthRequest::Json {
        url: config.login_url(),
        body: serde_json::json!({
            "username": credentials.username,
            "password": credentials.password,
        }),
    }
}

/// Multipart request for `POST /api/v1/user/new`
pub fn sign_up_request(config: &Config, draft: &ProfileDraft) -> AuthRequest {
    let mut parts = vec![
        Part::text("name", &draft.name),
        Part::text("bio", &draft.bio),
        Part::text("username", &draft.username),
        Part::text("password", &draft.password),
    ];
    if let Some(avatar) = &draft.avatar {
        parts.push(Part {
            name: AVATAR_PART,
            body: PartBody::File(avatar.clone()),
        });
    }

    AuthRequest::Multipart {
        url: config.sign_up_url(),
        parts,
    }
}

/// Turns a backend response into the submission outcome
pub fn interpret(response: TransportResponse) -> Result<SubmissionSuccess, AuthError> {
    if response.is_success() {
        let success: SubmissionSuccess = serde_json::from_str(&response.body)?;
        if success.user.0.is_null() {
            return Err(AuthError::Decode("response has no user".to_string()));
        }
        return Ok(success);
    }

    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message);
    Err(AuthError::Server {
        status: response.status,
        message,
    })
}
