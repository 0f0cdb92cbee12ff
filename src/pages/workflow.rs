//! Workflow page: diagram rendering, downloads, the research-object link
//! and diagram/table selection.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlTextAreaElement};

use crate::components::diagram_view::{self, DiagramController};
use crate::constants::GRAPH_CONTAINER_SELECTOR;
use crate::dom_utils::{self, on};
use crate::network::{ArtifactProbe, ViewerConfig};
use crate::polling::{PollFailure, PollListener, PollingMonitor, TimeoutScheduler};
use crate::renderer::{dot_data_uri, DiagramRenderer, PanZoomConfig};

pub const GRAPH_ID: &str = "graph";
const DOT_ID: &str = "dot";
const LOADING_ID: &str = "loading";
const DOWNLOAD_GRAPH_ID: &str = "download-graph";
const DOWNLOAD_GRAPH_LINK_ID: &str = "download-link-graph";
const DOWNLOAD_DOT_ID: &str = "download-dot";
const DOWNLOAD_DOT_LINK_ID: &str = "download-link-dot";
const AJAX_REQUIRED_ID: &str = "ajaxRequired";
const BUNDLE_LINK_ID: &str = "download";
const GENERATING_ID: &str = "generating";
const GENERATED_ID: &str = "generated";

/// Wire everything on the workflow page.  The artifact monitor, if any, is
/// returned so the caller can keep or cancel it.
///
/// A missing or failing renderer only costs the diagram: the DOT source and
/// the bundle link are wired regardless.
pub fn setup_workflow_page(
    document: &Document,
    config: &ViewerConfig,
) -> Result<Option<PollingMonitor>, JsValue> {
    let selection = diagram_view::setup_selection(document, config.match_strategy)?;

    match DiagramRenderer::init(GRAPH_CONTAINER_SELECTOR) {
        Ok(renderer) => {
            let renderer = Rc::new(renderer);
            if let Err(e) = render_diagram(document, &renderer, &selection, config) {
                error_log!("Diagram rendering failed: {:?}", e);
            }
            setup_image_download(document, &renderer)?;
        }
        Err(e) => error_log!("Diagram renderer unavailable: {:?}", e),
    }

    setup_dot_source(document)?;
    Ok(watch_bundle(document, config))
}

fn render_diagram(
    document: &Document,
    renderer: &Rc<DiagramRenderer>,
    selection: &Rc<RefCell<DiagramController>>,
    config: &ViewerConfig,
) -> Result<(), JsValue> {
    bind_rendered(document, renderer, selection, config.pan_zoom_delay_ms)?;
    renderer.render(&dom_utils::value_by_id(document, DOT_ID))
}

// Once the SVG exists: fade out the placeholder, bind the nodes and attach
// pan/zoom after the transition.
fn bind_rendered(
    document: &Document,
    renderer: &Rc<DiagramRenderer>,
    selection: &Rc<RefCell<DiagramController>>,
    pan_zoom_delay_ms: u32,
) -> Result<(), JsValue> {
    let doc = document.clone();
    let selection = selection.clone();
    let stage = renderer.clone();
    let mut bound = false;

    renderer.on_rendered(move || {
        dom_utils::hide_id(&doc, LOADING_ID);

        // re-renders reuse the node elements already bound
        if !bound {
            match diagram_view::bind_nodes(&doc, &selection) {
                Ok(_) => bound = true,
                Err(e) => error_log!("Failed to bind diagram nodes: {:?}", e),
            }
        }

        let stage = stage.clone();
        Timeout::new(pan_zoom_delay_ms, move || {
            if let Err(e) = stage.attach_pan_zoom(&PanZoomConfig::default()) {
                warn_log!("Pan/zoom unavailable: {:?}", e);
            }
        })
        .forget();
    })
}

fn setup_image_download(document: &Document, renderer: &Rc<DiagramRenderer>) -> Result<(), JsValue> {
    let button = match document.get_element_by_id(DOWNLOAD_GRAPH_ID) {
        Some(button) => button,
        None => return Ok(()),
    };
    let doc = document.clone();
    let renderer = renderer.clone();
    on(&button, "click", move |event: Event| {
        event.prevent_default();
        let img = match renderer.snapshot() {
            Ok(img) => img,
            Err(e) => {
                error_log!("Could not rasterise diagram: {:?}", e);
                return;
            }
        };
        let doc = doc.clone();
        let source = img.clone();
        let onload = Closure::once(move || {
            if let Some(link) = doc.get_element_by_id(DOWNLOAD_GRAPH_LINK_ID) {
                if link.set_attribute("href", &source.src()).is_ok() {
                    dom_utils::click(&link);
                }
            }
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    })
}

// The DOT textarea selects its whole content on focus; the download button
// saves it as a text file.
fn setup_dot_source(document: &Document) -> Result<(), JsValue> {
    if let Some(area) = document
        .get_element_by_id(DOT_ID)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
    {
        let target = area.clone();
        on(&area, "focus", move |_| target.select())?;
    }

    if let Some(button) = document.get_element_by_id(DOWNLOAD_DOT_ID) {
        let doc = document.clone();
        on(&button, "click", move |event: Event| {
            event.prevent_default();
            let uri = dot_data_uri(&dom_utils::value_by_id(&doc, DOT_ID));
            if let Some(link) = doc.get_element_by_id(DOWNLOAD_DOT_LINK_ID) {
                if link.set_attribute("href", &uri).is_ok() {
                    dom_utils::click(&link);
                }
            }
        })?;
    }
    Ok(())
}

/// When the research-object bundle is still being generated, probe its link
/// until it exists and then swap the placeholder for the link.
fn watch_bundle(document: &Document, config: &ViewerConfig) -> Option<PollingMonitor> {
    document.get_element_by_id(AJAX_REQUIRED_ID)?;
    let href = document
        .get_element_by_id(BUNDLE_LINK_ID)
        .and_then(|link| link.get_attribute("href"))
        .filter(|href| !href.trim().is_empty());
    let href = match href {
        Some(href) => href,
        None => {
            warn_log!("Bundle link missing, not watching for generation");
            return None;
        }
    };

    let monitor = PollingMonitor::new(
        href,
        config.artifact_policy(),
        Box::new(ArtifactProbe),
        Box::new(TimeoutScheduler),
        Box::new(BundleLinkListener {
            document: document.clone(),
        }),
    );
    monitor.start();
    Some(monitor)
}

struct BundleLinkListener {
    document: Document,
}

impl PollListener for BundleLinkListener {
    fn on_done(&self, target: &str) {
        debug_log!("Bundle ready at {}", target);
        dom_utils::hide_id(&self.document, GENERATING_ID);
        dom_utils::show_id(&self.document, GENERATED_ID);
    }

    fn on_failed(&self, target: &str, failure: &PollFailure) {
        warn_log!("Stopped waiting for bundle {}: {}", target, failure.message());
    }
}
