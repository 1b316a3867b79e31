use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="min-h-screen flex flex-col items-center justify-center gap-2">
            <h1 class="text-4xl font-bold">"404"</h1>
            <A href="/" attr:class="text-blue-600 hover:underline">"Back home"</A>
        </main>
    }
}
