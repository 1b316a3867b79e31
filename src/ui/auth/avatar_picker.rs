//! Avatar picker: round preview with a camera button over a hidden file input

use leptos::prelude::*;

use crate::core::FormState;

#[component]
pub fn AvatarPicker(form: RwSignal<FormState>) -> impl IntoView {
    let preview = move || form.with(|f| f.avatar().preview.clone());
    let error = move || form.with(|f| f.avatar().error.clone());

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use leptos::task::spawn_local;
            use wasm_bindgen::JsCast;

            use super::transport::read_avatar;
            use crate::core::validate_avatar;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            // Refuse before reading the whole file into memory
            if let Err(err) = validate_avatar(&file.type_(), file.size() as usize) {
                form.update(|f| f.reject_avatar(err));
                return;
            }

            let Some(token) = form.try_update(|f| f.begin_avatar_selection()) else {
                return;
            };
            spawn_local(async move {
                let read = read_avatar(file).await;
                if let Err(err) = &read {
                    leptos::logging::warn!("Failed to read avatar: {}", err);
                }
                form.update(|f| {
                    f.finish_avatar_selection(token, read);
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    view! {
        <div class="flex flex-col items-center">
            <div class="relative w-32 h-32 mx-auto">
                {move || match preview() {
                    Some(src) => view! {
                        <img src=src alt="Avatar preview" class="w-32 h-32 rounded-full object-contain bg-gray-200" />
                    }.into_any(),
                    None => view! {
                        <div class="w-32 h-32 rounded-full bg-gray-300"></div>
                    }.into_any(),
                }}
                <label
                    class="absolute bottom-0 right-0 p-2 rounded-full cursor-pointer text-white bg-black/50 hover:bg-black/70"
                    title="Choose avatar"
                >
                    <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                              d="M3 9a2 2 0 012-2h.93a2 2 0 001.66-.9l.82-1.2A2 2 0 0110.07 4h3.86a2 2 0 011.66.9l.82 1.2a2 2 0 001.66.9H19a2 2 0 012 2v9a2 2 0 01-2 2H5a2 2 0 01-2-2V9z" />
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                              d="M15 13a3 3 0 11-6 0 3 3 0 016 0z" />
                    </svg>
                    <input type="file" accept="image/*" class="sr-only" on:change=on_change />
                </label>
            </div>
            {move || error().map(|err| view! {
                <p class="mt-2 text-xs text-red-600">{err}</p>
            })}
        </div>
    }
}
