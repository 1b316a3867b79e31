pub mod auth;
pub mod common;
pub mod notifications;
pub mod pages;

pub use auth::{AuthForm, SessionContext, provide_session_context, use_session_context};
pub use notifications::{ToastManager, ToastsContainer, provide_toast_manager, use_toast_manager};
