//! Toast notification lifecycle
//!
//! A toast starts [`ToastState::Pending`] with a loading text and is later
//! resolved in place to success or error. [`PendingToast`] is consumed by
//! resolving, so a toast can only be resolved once.

use std::cell::RefCell;
use std::collections::VecDeque;

/// Maximum number of toasts kept at once
pub const MAX_TOASTS: usize = 5;

/// Identifier of a toast within a [`ToastQueue`]
pub type ToastId = u64;

/// Outcome of a resolved toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastState {
    Pending { text: String },
    Resolved { kind: ToastKind, text: String },
}

impl ToastState {
    pub fn text(&self) -> &str {
        match self {
            ToastState::Pending { text } | ToastState::Resolved { text, .. } => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ToastState::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub state: ToastState,
}

/// Anything that can display and update toasts
pub trait Notifier {
    /// Shows a loading toast and returns its id
    fn show_pending(&self, text: &str) -> ToastId;

    /// Replaces the toast `id` with its final state
    fn resolve(&self, id: ToastId, kind: ToastKind, text: &str);

    /// Starts a toast whose resolution is tracked by the returned handle
    fn pending(&self, text: &str) -> PendingToast<'_, Self>
    where
        Self: Sized,
    {
        PendingToast {
            notifier: self,
            id: self.show_pending(text),
        }
    }
}

/// A toast that has been shown but not yet resolved
#[must_use = "a pending toast should be resolved"]
pub struct PendingToast<'n, N: Notifier> {
    notifier: &'n N,
    id: ToastId,
}

impl<N: Notifier> PendingToast<'_, N> {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn success(self, text: &str) {
        self.notifier.resolve(self.id, ToastKind::Success, text);
    }

    pub fn error(self, text: &str) {
        self.notifier.resolve(self.id, ToastKind::Error, text);
    }
}

/// Bounded list of toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_pending(&mut self, text: impl Into<String>) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;

        self.toasts.push_back(Toast {
            id,
            state: ToastState::Pending { text: text.into() },
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        id
    }

    /// Resolves the toast in place. Returns false if it was already dropped
    pub fn resolve(&mut self, id: ToastId, kind: ToastKind, text: impl Into<String>) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.state = ToastState::Resolved {
                    kind,
                    text: text.into(),
                };
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for RefCell<ToastQueue> {
    fn show_pending(&self, text: &str) -> ToastId {
        self.borrow_mut().push_pending(text)
    }

    fn resolve(&self, id: ToastId, kind: ToastKind, text: &str) {
        if !self.borrow_mut().resolve(id, kind, text) {
            tracing::debug!("toast {} was dropped before it resolved", id);
        }
    }
}
