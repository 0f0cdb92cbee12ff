//! Add-workflow form on the home page: URL shape checks before submit and
//! the branch/path inputs for generic Git repositories.

pub mod validation;

pub use validation::{classify_url, needs_git_details, UrlKind, WorkflowForm};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent};

use crate::dom_utils::{self, on};
use crate::errors::FormField;

pub const FORM_ID: &str = "add";
const EXTRA_INPUTS_ID: &str = "extraInputs";

/// Read the three form fields.
pub fn read_form(document: &Document) -> WorkflowForm {
    WorkflowForm::new(
        dom_utils::value_by_id(document, FormField::Url.element_id()),
        dom_utils::value_by_id(document, FormField::Branch.element_id()),
        dom_utils::value_by_id(document, FormField::Path.element_id()),
    )
}

/// Show the branch/path inputs only for generic Git URLs.
pub fn sync_extra_inputs(document: &Document) {
    let url = dom_utils::value_by_id(document, FormField::Url.element_id());
    if needs_git_details(url.trim()) {
        dom_utils::show_id(document, EXTRA_INPUTS_ID);
    } else {
        dom_utils::hide_id(document, EXTRA_INPUTS_ID);
    }
}

/// Validate the current form values, flagging each invalid field.
/// Returns whether submission may proceed.
pub fn check_before_submit(document: &Document) -> bool {
    match read_form(document).validate() {
        Ok(kind) => {
            debug_log!("Submitting {:?} repository URL", kind);
            true
        }
        Err(errors) => {
            for err in &errors {
                dom_utils::add_warning(document, err.field, &err.message);
            }
            false
        }
    }
}

/// Wire the form.  A page without `#add` is left alone.
pub fn setup_form(document: &Document) -> Result<(), JsValue> {
    let form = match document.get_element_by_id(FORM_ID) {
        Some(form) => form,
        None => return Ok(()),
    };

    setup_example_links(document)?;

    if let Some(url) = document.get_element_by_id(FormField::Url.element_id()) {
        for event in ["change", "keyup", "paste"] {
            let doc = document.clone();
            on(&url, event, move |_| sync_extra_inputs(&doc))?;
        }
    }

    for input in dom_utils::query_all(document, "input")? {
        on(&input, "keyup", move |event: Event| {
            // Enter submits the form; it must not wipe the warning it causes
            let is_enter = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |k| k.key() == "Enter");
            if !is_enter {
                if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    dom_utils::clear_warning(&target);
                }
            }
        })?;
    }

    {
        let doc = document.clone();
        on(&form, "submit", move |event: Event| {
            if !check_before_submit(&doc) {
                event.prevent_default();
            }
        })?;
    }

    sync_extra_inputs(document);
    Ok(())
}

// Suggestion links fill the URL field with their href
fn setup_example_links(document: &Document) -> Result<(), JsValue> {
    for link in dom_utils::query_all(document, ".example")? {
        let doc = document.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        on(&link, "click", move |event: Event| {
            event.prevent_default();
            if let Some(input) = doc
                .get_element_by_id(FormField::Url.element_id())
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&href);
            }
            sync_extra_inputs(&doc);
        })?;
    }
    Ok(())
}
