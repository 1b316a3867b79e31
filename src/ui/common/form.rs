use leptos::prelude::*;

/// Labelled text input with an inline error line
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Input `name` and `id`
    name: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Browser autocomplete hint
    #[prop(into, default = Signal::stored("off"))]
    autocomplete: Signal<&'static str>,
    /// Current value signal
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Optional error message to display
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label for=name class="block text-sm font-medium text-gray-700">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <input
                type=input_type
                id=name
                name=name
                autocomplete=move || autocomplete.get()
                required=required
                class="w-full h-10 px-3 border border-gray-400 rounded-md focus:outline-none focus:ring-2 focus:ring-black"
                class:border-red-500=move || error.as_ref().and_then(|e| e.get()).is_some()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || {
                error.as_ref().and_then(|e| e.get()).map(|err| view! {
                    <p class="text-xs text-red-600">{err}</p>
                })
            }}
        </div>
    }
}
