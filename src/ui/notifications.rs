//! Toast notifications
//!
//! [`ToastManager`] is the browser-side [`Notifier`]: it keeps a reactive
//! [`ToastQueue`] and dismisses resolved toasts after a few seconds.
//! [`ToastsContainer`] renders the queue in the top-right corner.

use leptos::prelude::*;

use crate::core::{Notifier, Toast, ToastId, ToastKind, ToastQueue, ToastState};

/// How long a resolved toast stays on screen
pub const AUTO_DISMISS_MS: u32 = 4_000;

/// Reactive toast queue shared through context
#[derive(Clone, Copy)]
pub struct ToastManager {
    toasts: RwSignal<ToastQueue>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(ToastQueue::new()),
        }
    }

    /// Get the toasts signal for the container
    pub fn toasts(&self) -> RwSignal<ToastQueue> {
        self.toasts
    }

    pub fn dismiss(&self, id: ToastId) {
        self.toasts.update(|q| q.dismiss(id));
    }

    fn schedule_dismiss(&self, id: ToastId) {
        #[cfg(feature = "hydrate")]
        {
            use gloo_timers::future::TimeoutFuture;
            use leptos::task::spawn_local;

            let manager = *self;
            spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                manager.dismiss(id);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastManager {
    fn show_pending(&self, text: &str) -> ToastId {
        self.toasts
            .try_update(|q| q.push_pending(text))
            .unwrap_or_default()
    }

    fn resolve(&self, id: ToastId, kind: ToastKind, text: &str) {
        let resolved = self
            .toasts
            .try_update(|q| q.resolve(id, kind, text))
            .unwrap_or(false);
        if resolved {
            self.schedule_dismiss(id);
        }
    }
}

/// Provide the toast manager to the component tree
pub fn provide_toast_manager() -> ToastManager {
    let manager = ToastManager::new();
    provide_context(manager);
    manager
}

/// Get the toast manager from the component tree
pub fn use_toast_manager() -> ToastManager {
    expect_context::<ToastManager>()
}

/// Toasts container component; place once near the root
#[component]
pub fn ToastsContainer() -> impl IntoView {
    let manager = use_toast_manager();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            {move || {
                manager.toasts().get().iter().cloned().map(|toast| {
                    view! { <ToastView toast=toast manager=manager /> }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn ToastView(toast: Toast, manager: ToastManager) -> impl IntoView {
    let id = toast.id;

    let (container_class, icon_class, icon_path) = match &toast.state {
        ToastState::Pending { .. } => (
            "bg-white border-gray-300",
            "text-gray-500 animate-spin",
            "M12 3a9 9 0 109 9",
        ),
        ToastState::Resolved {
            kind: ToastKind::Success,
            ..
        } => (
            "bg-green-50 border-green-400",
            "text-green-600",
            "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
        ),
        ToastState::Resolved {
            kind: ToastKind::Error,
            ..
        } => (
            "bg-red-50 border-red-400",
            "text-red-600",
            "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        ),
    };
    let pending = toast.state.is_pending();
    let text = toast.state.text().to_string();

    view! {
        <div
            class=format!("flex items-center gap-3 p-3 rounded-lg border shadow-lg {container_class}")
            role="status"
        >
            <svg class=format!("w-5 h-5 {icon_class}") fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path />
            </svg>
            <p class="flex-1 text-sm text-gray-900">{text}</p>
            // A pending toast cannot be dismissed; it is resolved in place
            {(!pending).then(|| view! {
                <button
                    class="text-gray-400 hover:text-gray-700"
                    aria-label="Dismiss"
                    on:click=move |_| manager.dismiss(id)
                >
                    <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                    </svg>
                </button>
            })}
        </div>
    }
}
