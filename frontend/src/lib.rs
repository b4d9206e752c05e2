use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{info, warn};
use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod events;
pub mod layout;
pub mod styles;
pub mod timer;
pub mod transient;

use bindings::Page;

thread_local! {
    // Listeners and observers hang off the page, so it lives as long as the tab.
    static PAGE: RefCell<Option<Rc<Page>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(config::log_level());

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("No document, page interactions disabled");
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}

fn boot() {
    match Page::install() {
        Ok(page) => {
            info!("Page interactions ready");
            PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        }
        Err(e) => warn!("Page interactions disabled: {}", e),
    }
    welcome_banner();
}

fn welcome_banner() {
    gloo_console::log!(
        "%c🕐 Welcome to Time Tariff! 🕐",
        "font-size: 20px; font-weight: bold; color: #FF6B35;"
    );
    gloo_console::log!(
        "%cWe charge for time, not food!",
        "font-size: 14px; color: #F7B731;"
    );
    gloo_console::log!(
        "%cVisit us at Bandra West | Call: +91 90820 54243",
        "font-size: 12px; color: #4ECDC4;"
    );
}
