//! DOM side of diagram selection: scanning the rendered SVG and the step
//! table, reflecting selection and hover as CSS classes, and wiring the
//! pointer events to a [`SelectionController`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MouseEvent};

use crate::constants::{
    GRAPH_EDGE_TITLE_SELECTOR, GRAPH_NODE_SELECTOR, HOVER_CLASS, SELECTED_CLASS,
    TABLE_ROW_SELECTOR,
};
use crate::dom_utils::{on, query_all, text_of};
use crate::errors::{GraphError, GraphResult};
use crate::graph::{
    DiagramScan, DiagramSource, Direction, MatchStrategy, RenderedNode, SelectionController,
    SelectionSurface,
};
use crate::models::ElementRef;

pub type DiagramController = SelectionController<SvgDiagram, ClassListSurface>;

const SELECT_ANCESTORS_ID: &str = "select-ancestors";
const SELECT_DESCENDANTS_ID: &str = "select-descendants";
const CLEAR_SELECTION_ID: &str = "clear-selection";

/// Reads nodes, edge titles and row labels from the live document.
pub struct SvgDiagram {
    document: Document,
}

impl SvgDiagram {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn try_scan(&self) -> Result<DiagramScan, JsValue> {
        let nodes = query_all(&self.document, GRAPH_NODE_SELECTOR)?
            .iter()
            .map(|g| RenderedNode::new(g.id(), child_text(g, "title")))
            .collect();
        let edge_titles = query_all(&self.document, GRAPH_EDGE_TITLE_SELECTOR)?
            .iter()
            .map(text_of)
            .collect();
        let row_labels = query_all(&self.document, TABLE_ROW_SELECTOR)?
            .iter()
            .map(|row| child_text(row, "td"))
            .collect();
        Ok(DiagramScan {
            nodes,
            edge_titles,
            row_labels,
        })
    }
}

impl DiagramSource for SvgDiagram {
    fn scan(&self) -> DiagramScan {
        self.try_scan().unwrap_or_else(|err| {
            warn_log!("Diagram scan failed: {:?}", err);
            DiagramScan::default()
        })
    }
}

/// Text of the first `selector` match below `el`, empty when absent.
fn child_text(el: &Element, selector: &str) -> String {
    el.query_selector(selector)
        .ok()
        .flatten()
        .map(|child| text_of(&child))
        .unwrap_or_default()
}

/// Toggles `selected` / `hover` on the node groups and table rows.
pub struct ClassListSurface {
    document: Document,
    rows: Vec<Element>,
}

impl ClassListSurface {
    pub fn new(document: Document, rows: Vec<Element>) -> Self {
        Self { document, rows }
    }

    fn element(&self, element: &ElementRef) -> Option<Element> {
        match element {
            ElementRef::Node(id) => self.document.get_element_by_id(id),
            ElementRef::Row(index) => self.rows.get(*index).cloned(),
        }
    }

    fn set_class(&self, element: &ElementRef, class: &str, on: bool) {
        if let Some(el) = self.element(element) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }
}

impl SelectionSurface for ClassListSurface {
    fn set_selected(&self, element: &ElementRef, selected: bool) {
        self.set_class(element, SELECTED_CLASS, selected);
    }

    fn set_highlighted(&self, element: &ElementRef, highlighted: bool) {
        self.set_class(element, HOVER_CLASS, highlighted);
    }
}

/// Create the controller for this page and bind the table rows and the
/// selection buttons.  Diagram nodes are bound by [`bind_nodes`] once the
/// renderer has produced them.
pub fn setup_selection(
    document: &Document,
    strategy: MatchStrategy,
) -> Result<Rc<RefCell<DiagramController>>, JsValue> {
    let rows = query_all(document, TABLE_ROW_SELECTOR)?;
    let controller = Rc::new(RefCell::new(SelectionController::new(
        strategy,
        SvgDiagram::new(document.clone()),
        ClassListSurface::new(document.clone(), rows.clone()),
    )));

    for (index, row) in rows.iter().enumerate() {
        bind_element(&controller, row, ElementRef::Row(index))?;
    }
    bind_buttons(document, &controller)?;
    Ok(controller)
}

/// Bind every rendered node.  Returns how many were bound.
pub fn bind_nodes(
    document: &Document,
    controller: &Rc<RefCell<DiagramController>>,
) -> Result<usize, JsValue> {
    let nodes = query_all(document, GRAPH_NODE_SELECTOR)?;
    for g in &nodes {
        bind_element(controller, g, ElementRef::Node(g.id()))?;
    }
    debug_log!("Bound {} diagram nodes", nodes.len());
    Ok(nodes.len())
}

fn bind_element(
    controller: &Rc<RefCell<DiagramController>>,
    el: &Element,
    element: ElementRef,
) -> Result<(), JsValue> {
    {
        let controller = controller.clone();
        let element = element.clone();
        on(el, "click", move |event: Event| {
            let multi = event
                .dyn_ref::<MouseEvent>()
                .map_or(false, |m| m.ctrl_key() || m.meta_key());
            report(mut_borrow!(controller).toggle(&element, multi));
        })?;
    }

    for (event, entering) in [("mouseenter", true), ("mouseleave", false)] {
        let controller = controller.clone();
        let element = element.clone();
        on(el, event, move |_| {
            report(mut_borrow!(controller).hover(&element, entering));
        })?;
    }
    Ok(())
}

fn bind_buttons(
    document: &Document,
    controller: &Rc<RefCell<DiagramController>>,
) -> Result<(), JsValue> {
    let actions: [(&str, Option<Direction>); 3] = [
        (SELECT_ANCESTORS_ID, Some(Direction::Ancestors)),
        (SELECT_DESCENDANTS_ID, Some(Direction::Descendants)),
        (CLEAR_SELECTION_ID, None),
    ];
    for (id, direction) in actions {
        let button = match document.get_element_by_id(id) {
            Some(button) => button,
            None => continue,
        };
        let controller = controller.clone();
        on(&button, "click", move |event: Event| {
            event.prevent_default();
            let mut controller = mut_borrow!(controller);
            report(match direction {
                Some(direction) => controller.expand_selected(direction),
                None => controller.clear(),
            });
        })?;
    }
    Ok(())
}

fn report(result: GraphResult<()>) {
    match result {
        Ok(()) => {}
        // rows can be hovered before the renderer has finished
        Err(GraphError::EmptyDiagram) => debug_log!("Diagram not rendered yet"),
        // the context has already warned when the build failed
        Err(err) => debug_log!("Selection unavailable: {}", err),
    }
}
