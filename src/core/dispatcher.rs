//! Submission dispatcher
//!
//! Runs one login or sign-up attempt end to end: takes the submit gate,
//! shows a loading toast, sends the request, publishes the user on success
//! and resolves the same toast with the outcome. The gate is released when
//! the attempt settles, whatever the outcome.

use std::cell::Cell;

use super::api::{
    AuthRequest, AuthTransport, SubmissionSuccess, interpret, login_request, sign_up_request,
};
use super::config::Config;
use super::error::AuthError;
use super::form::{Credentials, Mode, ProfileDraft};
use super::notification::Notifier;
use super::session::{SessionPublisher, UserRecord};

pub const LOGIN_LOADING_TEXT: &str = "Logging In...";
pub const SIGN_UP_LOADING_TEXT: &str = "Signing Up...";

/// Whether a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Holder of the submit phase, shared between the form and the dispatcher
pub trait SubmitGate {
    fn phase(&self) -> SubmitPhase;
    fn set_phase(&self, phase: SubmitPhase);

    fn is_submitting(&self) -> bool {
        self.phase() == SubmitPhase::Submitting
    }
}

impl SubmitGate for Cell<SubmitPhase> {
    fn phase(&self) -> SubmitPhase {
        self.get()
    }

    fn set_phase(&self, phase: SubmitPhase) {
        self.set(phase);
    }
}

/// Marks the gate `Submitting` until dropped
pub struct InFlight<'g, G: SubmitGate> {
    gate: &'g G,
}

impl<'g, G: SubmitGate> InFlight<'g, G> {
    /// Takes the gate, or fails with [`AuthError::Busy`] if it is already taken
    pub fn begin(gate: &'g G) -> Result<Self, AuthError> {
        if gate.is_submitting() {
            return Err(AuthError::Busy);
        }
        gate.set_phase(SubmitPhase::Submitting);
        Ok(Self { gate })
    }
}

impl<G: SubmitGate> Drop for InFlight<'_, G> {
    fn drop(&mut self) {
        self.gate.set_phase(SubmitPhase::Idle);
    }
}

/// Switches between login and sign-up; refused mid-request
pub fn toggle_mode(mode: Mode, phase: SubmitPhase) -> Result<Mode, AuthError> {
    match phase {
        SubmitPhase::Idle => Ok(mode.toggled()),
        SubmitPhase::Submitting => Err(AuthError::Busy),
    }
}

/// Sends credentials to the auth backend through a transport
#[derive(Debug, Clone)]
pub struct AuthDispatcher<T> {
    config: Config,
    transport: T,
}

impl<T: AuthTransport> AuthDispatcher<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Logs in with a JSON `{username, password}` body
    pub async fn login<G, N, S>(
        &self,
        gate: &G,
        notifier: &N,
        session: &S,
        credentials: &Credentials,
    ) -> Result<UserRecord, AuthError>
    where
        G: SubmitGate,
        N: Notifier,
        S: SessionPublisher,
    {
        tracing::info!("Login attempt for username: {}", credentials.username);
        let request = login_request(&self.config, credentials);
        self.submit(gate, notifier, session, request, Mode::Login)
            .await
    }

    /// Registers with a multipart body, attaching the avatar if one is set
    pub async fn sign_up<G, N, S>(
        &self,
        gate: &G,
        notifier: &N,
        session: &S,
        draft: &ProfileDraft,
    ) -> Result<UserRecord, AuthError>
    where
        G: SubmitGate,
        N: Notifier,
        S: SessionPublisher,
    {
        tracing::info!(
            "Sign-up attempt for username: {} (avatar: {})",
            draft.username,
            draft.avatar.is_some()
        );
        let request = sign_up_request(&self.config, draft);
        self.submit(gate, notifier, session, request, Mode::SignUp)
            .await
    }

    async fn submit<G, N, S>(
        &self,
        gate: &G,
        notifier: &N,
        session: &S,
        request: AuthRequest,
        mode: Mode,
    ) -> Result<UserRecord, AuthError>
    where
        G: SubmitGate,
        N: Notifier,
        S: SessionPublisher,
    {
        let _in_flight = InFlight::begin(gate)?;

        let loading_text = match mode {
            Mode::Login => LOGIN_LOADING_TEXT,
            Mode::SignUp => SIGN_UP_LOADING_TEXT,
        };
        let toast = notifier.pending(loading_text);

        tracing::debug!("POST {} ({})", request.url(), request.content_type());
        let outcome = match self.transport.send(request).await {
            Ok(response) => interpret(response),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(SubmissionSuccess { user, message }) => {
                tracing::info!("{} succeeded", mode);
                session.publish_authenticated_user(user.clone());
                let text = if message.is_empty() {
                    default_success_text(mode)
                } else {
                    message.as_str()
                };
                toast.success(text);
                Ok(user)
            }
            Err(err) => {
                tracing::warn!("{} failed: {}", mode, err);
                toast.error(&err.user_message());
                Err(err)
            }
        }
    }
}

fn default_success_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Login => "Logged In",
        Mode::SignUp => "Signed Up",
    }
}
