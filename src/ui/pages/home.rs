use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::use_session_context;

/// Landing page: greets the signed-in user or points to the login page
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session_context();

    view! {
        <main class="min-h-screen flex flex-col items-center justify-center gap-4">
            {move || match session.display_name() {
                Some(name) => view! {
                    <h1 class="text-2xl font-semibold">{format!("Signed in as {name}")}</h1>
                }.into_any(),
                None if session.is_authenticated() => view! {
                    <h1 class="text-2xl font-semibold">"Signed in"</h1>
                }.into_any(),
                None => view! {
                    <div class="text-center space-y-2">
                        <h1 class="text-2xl font-semibold">"Chatterbox"</h1>
                        <A href="/login" attr:class="text-blue-600 hover:underline">"Login or Sign Up"</A>
                    </div>
                }.into_any(),
            }}
        </main>
    }
}
