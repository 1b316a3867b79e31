//! Login / sign-up form
//!
//! One component, two modes. Field values live in a single
//! [`FormState`] signal; submission is handed to [`AuthDispatcher`], which
//! drives the toast and publishes the user to the session.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::avatar_picker::AvatarPicker;
use super::context::{SessionContext, use_session_context};
use crate::core::{Config, Field, FormState, Mode, SubmitPhase, toggle_mode};
use crate::ui::common::FormField;
use crate::ui::notifications::{ToastManager, use_toast_manager};

/// Value, error and input handler for one field
fn bind(
    form: RwSignal<FormState>,
    mode: RwSignal<Mode>,
    field: Field,
) -> (Signal<String>, Signal<Option<String>>, Callback<String>) {
    let value = Signal::derive(move || form.with(|f| f.value(field).to_string()));
    let error = Signal::derive(move || {
        let mode = mode.get();
        form.with(|f| f.inline_error(mode, field).map(str::to_string))
    });
    let on_input = Callback::new(move |raw: String| form.update(|f| f.update(field, raw)));
    (value, error, on_input)
}

#[component]
pub fn AuthForm() -> impl IntoView {
    let session = use_session_context();
    let toasts = use_toast_manager();
    let config = StoredValue::new(Config::from_env());

    let mode = RwSignal::new(Mode::Login);
    let phase = RwSignal::new(SubmitPhase::Idle);
    let form = RwSignal::new(FormState::new());

    let submitting = move || phase.get() == SubmitPhase::Submitting;

    let on_toggle = move |_| match toggle_mode(mode.get_untracked(), phase.get_untracked()) {
        Ok(next) => mode.set(next),
        Err(err) => leptos::logging::warn!("Mode toggle ignored: {}", err),
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if phase.get_untracked() == SubmitPhase::Submitting {
            return;
        }
        submit(
            config.get_value(),
            mode.get_untracked(),
            form.get_untracked(),
            phase,
            toasts,
            session,
        );
    };

    let (name, name_error, on_name) = bind(form, mode, Field::Name);
    let (bio, bio_error, on_bio) = bind(form, mode, Field::Bio);
    let (username, username_error, on_username) = bind(form, mode, Field::Username);
    let (password, password_error, on_password) = bind(form, mode, Field::Password);

    let submit_label = move || match (mode.get(), submitting()) {
        (Mode::Login, false) => "Login",
        (Mode::Login, true) => "Logging In...",
        (Mode::SignUp, false) => "Sign Up",
        (Mode::SignUp, true) => "Signing Up...",
    };
    let toggle_label = move || match mode.get() {
        Mode::Login => "Sign Up Instead",
        Mode::SignUp => "Login Instead",
    };

    view! {
        <div class="w-full max-w-sm mx-auto bg-white rounded-xl shadow-lg p-8">
            <h2 class="text-2xl font-semibold text-center text-black mb-4">
                {move || mode.get().to_string()}
            </h2>
            <form on:submit=on_submit class="space-y-3">
                <Show when=move || mode.get() == Mode::SignUp>
                    <AvatarPicker form=form />
                    <FormField label="Name" name="name" required=true value=name on_input=on_name error=name_error />
                    <FormField label="Bio" name="bio" required=true value=bio on_input=on_bio error=bio_error />
                </Show>

                <FormField
                    label="Username"
                    name="username"
                    required=true
                    autocomplete="username"
                    value=username
                    on_input=on_username
                    error=username_error
                />
                <FormField
                    label="Password"
                    name="password"
                    required=true
                    input_type="password"
                    autocomplete=Signal::derive(move || mode.get().password_autocomplete())
                    value=password
                    on_input=on_password
                    error=password_error
                />

                <button
                    type="submit"
                    class="w-full mt-2 py-2 rounded-md bg-black text-white hover:bg-gray-600
                           disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled=submitting
                >
                    {submit_label}
                </button>

                <p class="text-center text-gray-500 my-4">"OR"</p>

                <button
                    type="button"
                    class="w-full py-2 text-black hover:underline disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled=submitting
                    on:click=on_toggle
                >
                    {toggle_label}
                </button>
            </form>
        </div>
    }
}

/// Runs the submission for the current mode in the background
fn submit(
    config: Config,
    mode: Mode,
    form: FormState,
    gate: RwSignal<SubmitPhase>,
    toasts: ToastManager,
    session: SessionContext,
) {
    #[cfg(feature = "hydrate")]
    {
        use leptos::task::spawn_local;

        use super::transport::GlooTransport;
        use crate::core::AuthDispatcher;

        spawn_local(async move {
            let dispatcher = AuthDispatcher::new(config, GlooTransport);
            // The toast and the session carry the outcome
            let _ = match mode {
                Mode::Login => {
                    dispatcher
                        .login(&gate, &toasts, &session, &form.credentials())
                        .await
                }
                Mode::SignUp => {
                    dispatcher
                        .sign_up(&gate, &toasts, &session, &form.profile_draft())
                        .await
                }
            };
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, form, gate, toasts, session);
        tracing::warn!("{} submitted outside the browser; ignoring", mode);
    }
}
