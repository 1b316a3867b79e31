//! Login page component
//!
//! Shows the login / sign-up form and goes to the home page once a user is
//! in the session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{AuthForm, use_session_context};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session_context();

    // Redirect once signed in
    Effect::new(move |_| {
        if session.is_authenticated() {
            let navigate = use_navigate();
            navigate("/", Default::default());
        }
    });

    view! {
        <main class="min-h-screen flex items-center justify-center p-4 bg-gradient-to-br from-gray-100 to-gray-300">
            <AuthForm />
        </main>
    }
}
