use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Document;

#[macro_use]
mod macros;

pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod errors;
pub mod form;
pub mod graph;
pub mod models;
pub mod network;
pub mod pages;
pub mod polling;
pub mod renderer;

use network::ViewerConfig;
use pages::Page;
use polling::MonitorSet;

thread_local! {
    // Monitors started by this page; cancelled once the page is unloaded so
    // a pending timer does not fire into a document that is going away.
    static ACTIVE_MONITORS: RefCell<MonitorSet> = RefCell::new(MonitorSet::default());
}

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let document = dom_utils::document()?;
    let config = ViewerConfig::from_build_env();
    let page = Page::detect(&document);
    debug_log!("Viewer starting on {:?} page", page);

    setup_page(page, &document, &config)?;
    cancel_monitors_on_pagehide()
}

fn setup_page(page: Page, document: &Document, config: &ViewerConfig) -> Result<(), JsValue> {
    let monitor = match page {
        Page::Loading => pages::loading::setup_loading_page(document, config)?,
        Page::Workflow => pages::workflow::setup_workflow_page(document, config)?,
        Page::Home => {
            form::setup_form(document)?;
            None
        }
        Page::Other => None,
    };

    if let Some(monitor) = monitor {
        ACTIVE_MONITORS.with(|monitors| mut_borrow!(monitors).push(monitor));
    }
    Ok(())
}

fn cancel_monitors_on_pagehide() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    dom_utils::on(&window, "pagehide", |event: web_sys::Event| {
        let persisted = event
            .dyn_ref::<web_sys::PageTransitionEvent>()
            .map_or(false, |e| e.persisted());
        ACTIVE_MONITORS.with(|monitors| mut_borrow!(monitors).page_hidden(persisted));
    })
}
