use super::matching::MatchStrategy;
use super::model::{DiagramScan, GraphModel};
use crate::errors::{GraphError, GraphResult};

/// Produces a scan of the rendered diagram and its table.
pub trait DiagramSource {
    fn scan(&self) -> DiagramScan;
}

impl DiagramSource for DiagramScan {
    fn scan(&self) -> DiagramScan {
        self.clone()
    }
}

/// Owns the selection model for one rendered diagram.
///
/// The model is built on first use and kept until the context is dropped
/// with the page.  An empty scan stores nothing, so the next interaction
/// scans again (the renderer may not have produced the SVG yet).  Any other
/// build error is remembered and returned without rescanning.
#[derive(Debug, Default)]
pub struct GraphContext {
    strategy: MatchStrategy,
    model: Option<GraphModel>,
    failure: Option<GraphError>,
}

impl GraphContext {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            model: None,
            failure: None,
        }
    }

    pub fn is_built(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&GraphModel> {
        self.model.as_ref()
    }

    /// Build the model if it does not exist yet and hand it out.
    pub fn build_model(&mut self, source: &dyn DiagramSource) -> GraphResult<&mut GraphModel> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let model = match self.model.take() {
            Some(model) => model,
            None => match GraphModel::build(source.scan(), self.strategy) {
                Ok(model) => {
                    debug_log!(
                        "Built selection model: {} nodes, {} rows",
                        model.node_count(),
                        model.rows().len()
                    );
                    model
                }
                Err(GraphError::EmptyDiagram) => return Err(GraphError::EmptyDiagram),
                Err(err) => {
                    warn_log!("Selection disabled for this diagram: {}", err);
                    self.failure = Some(err.clone());
                    return Err(err);
                }
            },
        };
        Ok(self.model.insert(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::fixtures::scan;
    use crate::graph::model::fixtures::two_chains;
    use crate::models::ElementRef;
    use std::cell::Cell;

    struct CountingSource {
        scan: DiagramScan,
        scans: Cell<u32>,
    }

    impl DiagramSource for CountingSource {
        fn scan(&self) -> DiagramScan {
            self.scans.set(self.scans.get() + 1);
            self.scan.clone()
        }
    }

    #[test]
    fn model_is_built_once_and_keeps_selection() {
        let source = CountingSource {
            scan: two_chains(),
            scans: Cell::new(0),
        };
        let mut context = GraphContext::new(MatchStrategy::Exact);
        assert!(!context.is_built());

        context
            .build_model(&source)
            .unwrap()
            .toggle_selection(&ElementRef::Row(0), false)
            .unwrap();
        let model = context.build_model(&source).unwrap();
        assert!(model.is_selected(&ElementRef::node("node_x")));
        assert_eq!(source.scans.get(), 1);
    }

    #[test]
    fn failed_build_is_retried_on_next_use() {
        let mut context = GraphContext::default();
        assert_eq!(
            context.build_model(&DiagramScan::default()).unwrap_err(),
            GraphError::EmptyDiagram
        );
        assert!(!context.is_built());
        assert!(context.build_model(&two_chains()).is_ok());
        assert!(context.is_built());
    }

    #[test]
    fn inconsistent_diagram_is_scanned_once() {
        let mut broken = scan(&["a", "b"], &[("a", "b")]);
        broken.edge_titles.push("a->ghost".to_string());
        let source = CountingSource {
            scan: broken,
            scans: Cell::new(0),
        };
        let mut context = GraphContext::new(MatchStrategy::Exact);

        for _ in 0..3 {
            assert!(matches!(
                context.build_model(&source),
                Err(GraphError::DanglingEdge { .. })
            ));
        }
        assert_eq!(source.scans.get(), 1);
        assert!(!context.is_built());
    }
}
