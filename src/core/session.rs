//! Session bridge
//!
//! The sign-in form only ever publishes the authenticated user. It never
//! reads session state back.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// User object returned by the backend, passed to the session unmodified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub serde_json::Value);

impl UserRecord {
    /// Best-effort lookup of a string field, for display only
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

/// One-way publish interface into process-wide session state
pub trait SessionPublisher {
    fn publish_authenticated_user(&self, user: UserRecord);
}

/// Keeps the last published user; used where no reactive store exists
impl SessionPublisher for RefCell<Option<UserRecord>> {
    fn publish_authenticated_user(&self, user: UserRecord) {
        *self.borrow_mut() = Some(user);
    }
}
