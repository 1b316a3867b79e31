//! Chatterbox - sign-in front end for a web chat
//!
//! A Leptos application with a login / sign-up form that submits
//! credentials to the chat backend and bootstraps the client session.

#![recursion_limit = "512"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
