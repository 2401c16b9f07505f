pub mod app;
pub mod shared;
pub mod system;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use app::App;
use shared::config::ConsoleConfig;

#[wasm_bindgen]
pub fn hydrate() {
    let config = ConsoleConfig::load();

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.log_level);
    console_error_panic_hook::set_once();
    log::info!("sql console starting, api base {:?}", config.api_base);

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
