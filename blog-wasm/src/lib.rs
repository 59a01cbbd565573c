mod api;
mod app;
mod dom;

pub use api::FetchSource;
pub use dom::{capture_page, DomApplier};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Устанавливаем обработчик паники
    console_error_panic_hook::set_once();

    // Инициализируем логирование
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).unwrap_or_else(|e| {
        web_sys::console::log_1(&format!("Failed to init logger: {}", e).into());
    });

    // Рендерим после разбора разметки
    let document = gloo_utils::document();
    if waits_for_dom(&document.ready_state()) {
        let on_ready = Closure::<dyn FnMut()>::once(|| spawn_local(app::run()));
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        spawn_local(app::run());
    }

    Ok(())
}

/// `document.readyState` is a plain string; only "loading" means the markup
/// is still being parsed.
fn waits_for_dom(ready_state: &str) -> bool {
    ready_state == "loading"
}
