//! Page-level controllers.  Each server-rendered page is recognised by a
//! marker element and wired by its own module.

pub mod loading;
pub mod workflow;

use web_sys::Document;

use crate::form::FORM_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Parse queue interstitial (`#workflowID`).
    Loading,
    /// Rendered workflow (`#graph`).
    Workflow,
    /// Add-workflow form (`#add`).
    Home,
    Other,
}

impl Page {
    pub fn detect(document: &Document) -> Self {
        let has = |id: &str| document.get_element_by_id(id).is_some();
        if has(loading::WORKFLOW_ID_ID) {
            Page::Loading
        } else if has(workflow::GRAPH_ID) {
            Page::Workflow
        } else if has(FORM_ID) {
            Page::Home
        } else {
            Page::Other
        }
    }
}
