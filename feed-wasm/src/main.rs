// Pure helpers are also built on the host so their tests run with `cargo test`.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod models;
mod storage;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod state;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // Empty main so `cargo build --workspace` passes on the host.
}
