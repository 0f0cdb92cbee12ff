//! Selection model shared by the rendered workflow diagram and the step
//! table: adjacency built from the SVG, counterpart matching, and transitive
//! ancestor/descendant selection.

pub mod context;
pub mod controller;
pub mod matching;
pub mod model;
pub mod selection;

pub use context::{DiagramSource, GraphContext};
pub use controller::{SelectionController, SelectionSurface};
pub use matching::{CounterpartIndex, MatchStrategy};
pub use model::{
    parse_edge_title, DiagramScan, Direction, GraphModel, GraphNode, RenderedNode, TableRow,
};
pub use selection::SelectionDelta;
