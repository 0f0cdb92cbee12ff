//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small, ergonomic wrappers for the show / hide / listen patterns the page
//! controllers share, so the `Closure` boilerplate lives in one place.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

use crate::errors::FormField;

/// Bootstrap's visibility class used by the server-rendered markup.
const HIDE_CLASS: &str = "hide";
const HAS_ERROR_CLASS: &str = "has-error";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

/// Remove the `hide` class so the element becomes visible.  An inline
/// `display: none` from the template is cleared as well.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(HIDE_CLASS);
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property("display");
    }
}

/// Hide the element by adding the `hide` class.
pub fn hide(el: &Element) {
    let _ = el.class_list().add_1(HIDE_CLASS);
}

pub fn show_id(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        show(&el);
    }
}

pub fn hide_id(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        hide(&el);
    }
}

/// Trimmed text content of an element.
pub fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

/// Trimmed text content of `#id`, empty when missing.
pub fn text_by_id(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .map(|el| text_of(&el))
        .unwrap_or_default()
}

/// Current value of an `<input>` or `<textarea>` by id.
pub fn value_by_id(document: &Document, id: &str) -> String {
    let el = match document.get_element_by_id(id) {
        Some(el) => el,
        None => return String::new(),
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// All elements matching `selector` below `root`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn on<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Click a (hidden) element programmatically, e.g. a download anchor.
pub fn click(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.click();
    }
}

/// Mark a form field invalid and show `message` in the help block that
/// follows the input.
pub fn add_warning(document: &Document, field: FormField, message: &str) {
    if let Some(input) = document.get_element_by_id(field.element_id()) {
        if let Some(parent) = input.parent_element() {
            let _ = parent.class_list().add_1(HAS_ERROR_CLASS);
        }
        if let Some(help) = input.next_element_sibling() {
            help.set_text_content(Some(message));
        }
    }
}

/// Undo [`add_warning`] for the given input element.
pub fn clear_warning(input: &Element) {
    if let Some(parent) = input.parent_element() {
        let _ = parent.class_list().remove_1(HAS_ERROR_CLASS);
    }
    if let Some(help) = input.next_element_sibling() {
        help.set_text_content(Some(""));
    }
}
