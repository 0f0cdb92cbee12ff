//! Interstitial page shown while a workflow is queued for parsing.
//!
//! Polls the queue endpoint until the job leaves `RUNNING`, then either
//! reloads into the workflow page or shows the parser's error output.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event};

use crate::dom_utils::{self, on};
use crate::network::{QueueStatusSource, ViewerConfig};
use crate::polling::{PollFailure, PollListener, PollingMonitor, TimeoutScheduler};

pub const WORKFLOW_ID_ID: &str = "workflowID";
const SPINNER_ID: &str = "loadingSpinner";
const SUCCESS_ID: &str = "loadingSuccess";
const FAIL_ID: &str = "loadingFail";
const HEADER_ID: &str = "loadingHeader";
const OVERVIEW_ID: &str = "loadingOverview";
const WARNING_ID: &str = "loadingWarning";
const ERROR_MSG_ID: &str = "errorMsg";
const WORKFLOW_NAME_ID: &str = "workflowName";
const DETAILS_LINK_ID: &str = "cwllog";
const DETAILS_ID: &str = "cwltooldetails";
const CONTAINER_SELECTOR: &str = ".loadingWorkflowContainer";

const SHOW_DETAILS: &str = "Show Details";
const HIDE_DETAILS: &str = "Hide Details";
const PARSER_URL: &str = "https://github.com/common-workflow-language/cwltool";

/// Start polling for the workflow named by `#workflowID`.  Returns `None`
/// when the page has no such marker.
pub fn setup_loading_page(
    document: &Document,
    config: &ViewerConfig,
) -> Result<Option<PollingMonitor>, JsValue> {
    if document.get_element_by_id(WORKFLOW_ID_ID).is_none() {
        return Ok(None);
    }
    let workflow_id = dom_utils::text_by_id(document, WORKFLOW_ID_ID);
    let monitor = PollingMonitor::new(
        config.queue_url(&workflow_id),
        config.job_policy(),
        Box::new(QueueStatusSource),
        Box::new(TimeoutScheduler),
        Box::new(LoadingPageListener::new(document.clone())),
    );
    debug_log!("Watching parse queue for {}", workflow_id);
    monitor.start();
    Ok(Some(monitor))
}

/// Swaps the loading panels when the parse job finishes.
pub struct LoadingPageListener {
    document: Document,
}

impl LoadingPageListener {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn show_success(&self) -> Result<(), JsValue> {
        dom_utils::hide_id(&self.document, SPINNER_ID);
        dom_utils::show_id(&self.document, SUCCESS_ID);

        if let Some(warning) = self.document.get_element_by_id(WARNING_ID) {
            warning.set_text_content(None);
            let link = reload_link(&self.document, "Click here", None)?;
            warning.append_child(&link)?;
            let rest = self.document.create_element("span")?;
            rest.set_text_content(Some(" if your browser did not refresh automatically"));
            warning.append_child(&rest)?;
        }
        reload()
    }

    fn show_failure(&self, failure: &PollFailure) -> Result<(), JsValue> {
        let document = &self.document;

        if let Some(header) = document.get_element_by_id(HEADER_ID) {
            let name = dom_utils::text_by_id(document, WORKFLOW_NAME_ID);
            header.set_text_content(Some(&format!("Failed to parse {} with ", name)));
            let link = document.create_element("a")?;
            link.set_attribute("href", PARSER_URL)?;
            link.set_attribute("rel", "noopener")?;
            link.set_attribute("target", "_blank")?;
            link.set_text_content(Some("cwltool"));
            header.append_child(&link)?;
        }

        if let Some(overview) = document.get_element_by_id(OVERVIEW_ID) {
            overview.set_text_content(None);
            let toggle = document.create_element("a")?;
            toggle.set_id(DETAILS_LINK_ID);
            toggle.set_attribute("href", "#")?;
            toggle.set_text_content(Some(SHOW_DETAILS));
            overview.append_child(&toggle)?;
            bind_details_toggle(document, &toggle)?;
        }

        dom_utils::hide_id(document, SPINNER_ID);
        dom_utils::show_id(document, FAIL_ID);

        if let Some(warning) = document.get_element_by_id(WARNING_ID) {
            warning.set_text_content(None);
            let retry = reload_link(document, "Try Again", Some("btn btn-default"))?;
            retry.set_attribute("role", "button")?;
            warning.append_child(&retry)?;
        }

        if let Some(error_msg) = document.get_element_by_id(ERROR_MSG_ID) {
            // the parser output is shown as text, never as markup
            error_msg.set_text_content(Some(&failure.message()));
        }
        Ok(())
    }
}

impl PollListener for LoadingPageListener {
    fn on_done(&self, target: &str) {
        debug_log!("Parse finished for {}, reloading", target);
        if let Err(e) = self.show_success() {
            error_log!("Failed to reload after parse: {:?}", e);
        }
    }

    fn on_failed(&self, target: &str, failure: &PollFailure) {
        debug_log!("Parse failed for {}: {:?}", target, failure);
        if let Err(e) = self.show_failure(failure) {
            error_log!("Failed to show parse error: {:?}", e);
        }
    }
}

/// Label the details link shows after a click.
pub fn next_details_label(current: &str) -> &'static str {
    if current.trim() == SHOW_DETAILS {
        HIDE_DETAILS
    } else {
        SHOW_DETAILS
    }
}

// "Show Details" swaps the workflow summary for the raw parser log
fn bind_details_toggle(document: &Document, toggle: &Element) -> Result<(), JsValue> {
    let doc = document.clone();
    let link = toggle.clone();
    on(toggle, "click", move |event: Event| {
        event.prevent_default();
        let label = next_details_label(&dom_utils::text_of(&link));
        link.set_text_content(Some(label));
        let showing_details = label == HIDE_DETAILS;

        if let Ok(containers) = dom_utils::query_all(&doc, CONTAINER_SELECTOR) {
            for container in &containers {
                if showing_details {
                    dom_utils::hide(container);
                } else {
                    dom_utils::show(container);
                }
            }
        }
        if showing_details {
            dom_utils::show_id(&doc, DETAILS_ID);
        } else {
            dom_utils::hide_id(&doc, DETAILS_ID);
        }
    })
}

fn reload_link(document: &Document, label: &str, class: Option<&str>) -> Result<Element, JsValue> {
    let link = document.create_element("a")?;
    link.set_attribute("href", "#")?;
    if let Some(class) = class {
        link.set_class_name(class);
    }
    link.set_text_content(Some(label));
    on(&link, "click", |event: Event| {
        event.prevent_default();
        if let Err(e) = reload() {
            error_log!("Reload failed: {:?}", e);
        }
    })?;
    Ok(link)
}

fn reload() -> Result<(), JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .reload()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_link_alternates() {
        assert_eq!(next_details_label("Show Details"), HIDE_DETAILS);
        assert_eq!(next_details_label(" Hide Details "), SHOW_DETAILS);
        assert_eq!(next_details_label(HIDE_DETAILS), SHOW_DETAILS);
    }
}
