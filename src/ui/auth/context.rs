//! Session context
//!
//! Holds the signed-in user for the rest of the app. The sign-in form only
//! receives it as a [`SessionPublisher`]; pages read it through
//! [`SessionContext::is_authenticated`] and [`SessionContext::display_name`].

use leptos::prelude::*;

use crate::core::{SessionPublisher, SubmitGate, SubmitPhase, UserRecord};

#[derive(Clone, Copy)]
pub struct SessionContext {
    user: RwSignal<Option<UserRecord>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Display name for the header: `name`, then `username`
    pub fn display_name(&self) -> Option<String> {
        self.user.with(|user| {
            user.as_ref().and_then(|u| {
                u.str_field("name")
                    .or_else(|| u.str_field("username"))
                    .map(str::to_string)
            })
        })
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPublisher for SessionContext {
    fn publish_authenticated_user(&self, user: UserRecord) {
        self.user.set(Some(user));
    }
}

/// The submit gate lives in a signal so buttons can react to it
impl SubmitGate for RwSignal<SubmitPhase> {
    fn phase(&self) -> SubmitPhase {
        self.get_untracked()
    }

    fn set_phase(&self, phase: SubmitPhase) {
        self.set(phase);
    }
}

/// Provide session context to the component tree
pub fn provide_session_context() -> SessionContext {
    let ctx = SessionContext::new();
    provide_context(ctx);
    ctx
}

/// Get session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}
