use super::context::{DiagramSource, GraphContext};
use super::matching::MatchStrategy;
use super::model::{Direction, GraphModel};
use super::selection::SelectionDelta;
use crate::errors::GraphResult;
use crate::models::ElementRef;

/// Where selection and hover state become visible.
pub trait SelectionSurface {
    fn set_selected(&self, element: &ElementRef, selected: bool);
    fn set_highlighted(&self, element: &ElementRef, highlighted: bool);
}

/// Page-level controller: one per rendered diagram.  Builds the model on
/// the first interaction and mirrors every change onto the surface.
pub struct SelectionController<S, V> {
    context: GraphContext,
    source: S,
    surface: V,
}

impl<S: DiagramSource, V: SelectionSurface> SelectionController<S, V> {
    pub fn new(strategy: MatchStrategy, source: S, surface: V) -> Self {
        Self {
            context: GraphContext::new(strategy),
            source,
            surface,
        }
    }

    pub fn context(&self) -> &GraphContext {
        &self.context
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Click on a node or row.  `multi` is the Ctrl/Meta modifier.
    pub fn toggle(&mut self, element: &ElementRef, multi: bool) -> GraphResult<()> {
        let delta = self.model()?.toggle_selection(element, multi)?;
        self.apply(&delta);
        Ok(())
    }

    pub fn expand(&mut self, root_id: &str, direction: Direction) -> GraphResult<()> {
        let delta = self.model()?.expand_selection(root_id, direction)?;
        self.apply(&delta);
        Ok(())
    }

    /// Expand from every selected node.
    pub fn expand_selected(&mut self, direction: Direction) -> GraphResult<()> {
        let delta = self.model()?.expand_from_selection(direction);
        self.apply(&delta);
        Ok(())
    }

    pub fn clear(&mut self) -> GraphResult<()> {
        let delta = self.model()?.clear_selection();
        self.apply(&delta);
        Ok(())
    }

    /// Pointer entered (`entering`) or left an element: highlight its
    /// counterparts.  Selection is untouched.
    pub fn hover(&mut self, element: &ElementRef, entering: bool) -> GraphResult<()> {
        let counterparts = self.model()?.matching_counterparts(element);
        for other in &counterparts {
            self.surface.set_highlighted(other, entering);
        }
        Ok(())
    }

    fn model(&mut self) -> GraphResult<&mut GraphModel> {
        self.context.build_model(&self.source)
    }

    fn apply(&self, delta: &SelectionDelta) {
        for element in &delta.deselected {
            self.surface.set_selected(element, false);
        }
        for element in &delta.selected {
            self.surface.set_selected(element, true);
        }
    }
}
