//! Sign-in UI: the login / sign-up form and the session context

mod auth_form;
mod avatar_picker;
mod context;
#[cfg(feature = "hydrate")]
mod transport;

pub use auth_form::AuthForm;
pub use avatar_picker::AvatarPicker;
pub use context::{SessionContext, provide_session_context, use_session_context};
#[cfg(feature = "hydrate")]
pub use transport::GlooTransport;
