//! Adjacency model of a rendered workflow diagram.
//!
//! Nodes are keyed by the DOM id of their `<g class="node">`; edges are read
//! from the edge titles the renderer emits (`tail->head`) and resolved
//! through the node titles.  The table rows are part of the model so both
//! presentations of a workflow element share one selection state.

use std::collections::{BTreeSet, HashMap};

use super::matching::{CounterpartIndex, MatchStrategy};
use crate::constants::EDGE_DELIMITER;
use crate::errors::{GraphError, GraphResult};
use crate::models::ElementRef;

/// A `<g class="node">` as scanned from the SVG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub id: String,
    /// Text of the node's `<title>`.
    pub label: String,
}

impl RenderedNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Everything the model is built from, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramScan {
    pub nodes: Vec<RenderedNode>,
    pub edge_titles: Vec<String>,
    /// First-cell text of each table row.
    pub row_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow inbound edges.
    Ancestors,
    /// Follow outbound edges.
    Descendants,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub inbound: BTreeSet<String>,
    pub outbound: BTreeSet<String>,
    pub selected: bool,
}

impl GraphNode {
    fn new(id: String, label: String) -> Self {
        Self {
            id,
            label,
            inbound: BTreeSet::new(),
            outbound: BTreeSet::new(),
            selected: false,
        }
    }

    pub fn neighbors(&self, direction: Direction) -> &BTreeSet<String> {
        match direction {
            Direction::Ancestors => &self.inbound,
            Direction::Descendants => &self.outbound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Split an edge title into `(tail, head)`.
pub fn parse_edge_title(title: &str) -> GraphResult<(&str, &str)> {
    let malformed = || GraphError::MalformedEdge {
        title: title.to_string(),
    };
    let (tail, head) = title.split_once(EDGE_DELIMITER).ok_or_else(malformed)?;
    let (tail, head) = (tail.trim(), head.trim());
    if tail.is_empty() || head.is_empty() {
        return Err(malformed());
    }
    Ok((tail, head))
}

// Graphviz titles edges between record ports as `node:port`
fn strip_port(endpoint: &str) -> &str {
    match endpoint.rsplit_once(':') {
        Some((name, port)) if !name.is_empty() && !port.contains('/') => name,
        _ => endpoint,
    }
}

#[derive(Debug, Clone)]
pub struct GraphModel {
    pub(super) nodes: HashMap<String, GraphNode>,
    pub(super) node_order: Vec<String>,
    by_label: HashMap<String, String>,
    pub(super) rows: Vec<TableRow>,
    pub(super) index: CounterpartIndex,
}

impl GraphModel {
    /// Register every node, then attach every edge.  An edge naming a title
    /// that no node carries fails the whole build.
    pub fn build(scan: DiagramScan, strategy: MatchStrategy) -> GraphResult<Self> {
        if scan.nodes.is_empty() {
            return Err(GraphError::EmptyDiagram);
        }

        let mut nodes = HashMap::with_capacity(scan.nodes.len());
        let mut node_order = Vec::with_capacity(scan.nodes.len());
        let mut by_label = HashMap::with_capacity(scan.nodes.len());

        for RenderedNode { id, label } in scan.nodes {
            if nodes.contains_key(&id) {
                return Err(GraphError::DuplicateNode { id });
            }
            by_label.entry(label.clone()).or_insert_with(|| id.clone());
            node_order.push(id.clone());
            nodes.insert(id.clone(), GraphNode::new(id, label));
        }

        for title in &scan.edge_titles {
            let (tail, head) = parse_edge_title(title)?;
            let resolve = |endpoint: &str| {
                by_label
                    .get(endpoint)
                    .or_else(|| by_label.get(strip_port(endpoint)))
                    .cloned()
                    .ok_or_else(|| GraphError::DanglingEdge {
                        title: title.clone(),
                        endpoint: endpoint.to_string(),
                    })
            };
            let tail_id = resolve(tail)?;
            let head_id = resolve(head)?;

            if let Some(node) = nodes.get_mut(&tail_id) {
                node.outbound.insert(head_id.clone());
            }
            if let Some(node) = nodes.get_mut(&head_id) {
                node.inbound.insert(tail_id);
            }
        }

        let pairs: Vec<(String, String)> = node_order
            .iter()
            .filter_map(|id| nodes.get(id).map(|n| (id.clone(), n.label.clone())))
            .collect();
        let index = CounterpartIndex::build(&pairs, &scan.row_labels, strategy);

        let rows = scan
            .row_labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| TableRow {
                index,
                label,
                selected: false,
            })
            .collect();

        Ok(Self {
            nodes,
            node_order,
            by_label,
            rows,
            index,
        })
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Node id for a diagram title.
    pub fn node_id_for_label(&self, label: &str) -> Option<&str> {
        self.by_label.get(label).map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    /// The other presentation(s) of `element`.  An empty list is a lookup
    /// miss, not an error.
    pub fn matching_counterparts(&self, element: &ElementRef) -> Vec<ElementRef> {
        match element {
            ElementRef::Row(index) => self
                .index
                .nodes_for_row(*index)
                .iter()
                .map(|id| ElementRef::Node(id.clone()))
                .collect(),
            ElementRef::Node(id) => self
                .index
                .rows_for_node(id)
                .iter()
                .map(|index| ElementRef::Row(*index))
                .collect(),
        }
    }

    pub(super) fn contains(&self, element: &ElementRef) -> GraphResult<()> {
        match element {
            ElementRef::Node(id) if !self.nodes.contains_key(id) => {
                Err(GraphError::UnknownNode { id: id.clone() })
            }
            ElementRef::Row(index) if *index >= self.rows.len() => {
                Err(GraphError::UnknownRow { index: *index })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a scan whose node ids are `node_<title>` and whose table lists
    /// every node title once, in the same order.
    pub fn scan(titles: &[&str], edges: &[(&str, &str)]) -> DiagramScan {
        DiagramScan {
            nodes: titles
                .iter()
                .map(|t| RenderedNode::new(format!("node_{}", t), *t))
                .collect(),
            edge_titles: edges
                .iter()
                .map(|(tail, head)| format!("{}->{}", tail, head))
                .collect(),
            row_labels: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Two chains joined at `x` with cross links, as drawn for a scatter
    /// workflow.
    pub fn two_chains() -> DiagramScan {
        scan(
            &["x", "a0", "a1", "a2", "a3", "b0", "b1", "b2", "b3"],
            &[
                ("a0", "a1"),
                ("a1", "a2"),
                ("a2", "a3"),
                ("b0", "b1"),
                ("b1", "b2"),
                ("b2", "b3"),
                ("x", "a0"),
                ("x", "b0"),
                ("a1", "b3"),
                ("b1", "a3"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn edges_run_from_tail_to_head() {
        let model = GraphModel::build(two_chains(), MatchStrategy::Exact).unwrap();
        let x = model.node("node_x").unwrap();
        assert!(x.inbound.is_empty());
        assert_eq!(
            x.outbound.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["node_a0", "node_b0"]
        );
        let a3 = model.node("node_a3").unwrap();
        assert_eq!(
            a3.inbound.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["node_a2", "node_b1"]
        );
        assert_eq!(model.node_count(), 9);
        assert_eq!(model.node_id_for_label("b2"), Some("node_b2"));
    }

    #[test]
    fn dangling_edge_fails_build() {
        let err = GraphModel::build(scan(&["a"], &[("a", "ghost")]), MatchStrategy::Exact)
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingEdge {
                title: "a->ghost".into(),
                endpoint: "ghost".into()
            }
        );
    }

    #[test]
    fn malformed_and_duplicate_inputs_are_rejected() {
        let mut bad_edge = scan(&["a", "b"], &[]);
        bad_edge.edge_titles.push("a-b".into());
        assert!(matches!(
            GraphModel::build(bad_edge, MatchStrategy::Exact),
            Err(GraphError::MalformedEdge { .. })
        ));

        let mut duplicate = scan(&["a"], &[]);
        duplicate.nodes.push(RenderedNode::new("node_a", "again"));
        assert!(matches!(
            GraphModel::build(duplicate, MatchStrategy::Exact),
            Err(GraphError::DuplicateNode { .. })
        ));

        assert_eq!(
            GraphModel::build(DiagramScan::default(), MatchStrategy::Exact).unwrap_err(),
            GraphError::EmptyDiagram
        );
    }

    #[test]
    fn edge_titles_tolerate_ports_and_whitespace() {
        assert_eq!(parse_edge_title(" a -> b ").unwrap(), ("a", "b"));
        assert_eq!(
            parse_edge_title("step:out->next:in").unwrap(),
            ("step:out", "next:in")
        );
        assert_eq!(
            parse_edge_title("#main/sort->#main/align").unwrap(),
            ("#main/sort", "#main/align")
        );
        assert!(parse_edge_title("->b").is_err());
    }

    #[test]
    fn port_suffixes_resolve_to_their_node() {
        let mut ported = scan(&["step", "next", "odd:name"], &[("odd:name", "step")]);
        ported.edge_titles.push("step:out->next:in".into());
        let model = GraphModel::build(ported, MatchStrategy::Exact).unwrap();
        assert!(model.node("node_step").unwrap().outbound.contains("node_next"));
        assert!(model.node("node_odd:name").unwrap().outbound.contains("node_step"));
    }

    #[test]
    fn counterparts_go_both_ways() {
        let model = GraphModel::build(two_chains(), MatchStrategy::Exact).unwrap();
        assert_eq!(
            model.matching_counterparts(&ElementRef::Row(0)),
            vec![ElementRef::node("node_x")]
        );
        assert_eq!(
            model.matching_counterparts(&ElementRef::node("node_x")),
            vec![ElementRef::Row(0)]
        );
        assert!(model.matching_counterparts(&ElementRef::Row(42)).is_empty());
    }
}
