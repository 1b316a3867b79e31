//! Browser-independent sign-in logic: validation, form state, the auth API
//! contract, submission orchestration, toasts and the session bridge

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod notification;
pub mod session;
#[cfg(test)]
mod tests;
#[cfg(feature = "ssr")]
pub mod transport;
pub mod validation;

pub use api::{
    AVATAR_PART, AuthRequest, AuthTransport, Part, PartBody, SubmissionSuccess, TransportResponse,
    interpret, login_request, sign_up_request,
};
pub use config::Config;
pub use dispatcher::{AuthDispatcher, InFlight, SubmitGate, SubmitPhase, toggle_mode};
pub use error::{AuthError, FALLBACK_MESSAGE};
pub use form::{AvatarFile, AvatarSlot, Credentials, Field, FieldState, FormState, Mode, ProfileDraft};
pub use notification::{Notifier, PendingToast, Toast, ToastId, ToastKind, ToastQueue, ToastState};
pub use session::{SessionPublisher, UserRecord};
#[cfg(feature = "ssr")]
pub use transport::ReqwestTransport;
pub use validation::{FieldCheck, validate_avatar, validate_username};
