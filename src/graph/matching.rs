//! Bidirectional index between diagram nodes and table rows.

use std::collections::HashMap;

/// How a table row's first-cell text is matched against node titles.
///
/// `Exact` is the canonical rule.  `Suffix` exists for diagrams whose node
/// titles carry a namespace prefix (`#main/step` vs `step`) and must be
/// chosen explicitly; the two rules are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    #[default]
    Exact,
    Suffix,
}

impl MatchStrategy {
    pub fn matches(self, node_label: &str, row_text: &str) -> bool {
        if row_text.is_empty() {
            return false;
        }
        match self {
            MatchStrategy::Exact => node_label == row_text,
            MatchStrategy::Suffix => node_label.ends_with(row_text),
        }
    }
}

/// Node id ↔ row index lookups, built once per model.
#[derive(Debug, Clone, Default)]
pub struct CounterpartIndex {
    row_to_nodes: Vec<Vec<String>>,
    node_to_rows: HashMap<String, Vec<usize>>,
}

impl CounterpartIndex {
    /// `nodes` are `(id, label)` pairs in document order, `rows` the first
    /// cell text of each row in document order.
    pub fn build(nodes: &[(String, String)], rows: &[String], strategy: MatchStrategy) -> Self {
        let mut row_to_nodes = vec![Vec::new(); rows.len()];
        let mut node_to_rows: HashMap<String, Vec<usize>> = HashMap::new();

        match strategy {
            MatchStrategy::Exact => {
                let mut by_label: HashMap<&str, Vec<&str>> = HashMap::new();
                for (id, label) in nodes {
                    by_label.entry(label.as_str()).or_default().push(id.as_str());
                }
                for (index, text) in rows.iter().enumerate() {
                    if let Some(ids) = by_label.get(text.as_str()) {
                        for id in ids {
                            row_to_nodes[index].push(id.to_string());
                            node_to_rows.entry(id.to_string()).or_default().push(index);
                        }
                    }
                }
            }
            MatchStrategy::Suffix => {
                for (index, text) in rows.iter().enumerate() {
                    for (id, label) in nodes {
                        if strategy.matches(label, text) {
                            row_to_nodes[index].push(id.clone());
                            node_to_rows.entry(id.clone()).or_default().push(index);
                        }
                    }
                }
            }
        }

        Self {
            row_to_nodes,
            node_to_rows,
        }
    }

    /// Nodes drawn for a row.  Empty when the row has no diagram counterpart.
    pub fn nodes_for_row(&self, index: usize) -> &[String] {
        self.row_to_nodes
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rows describing a node.  Empty when the node has no table counterpart.
    pub fn rows_for_node(&self, id: &str) -> &[usize] {
        self.node_to_rows
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(id, label)| (id.to_string(), label.to_string()))
            .collect()
    }

    fn rows(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn exact_matching_is_symmetric() {
        let index = CounterpartIndex::build(
            &nodes(&[("node1", "align"), ("node2", "sort"), ("node3", "#main/sort")]),
            &rows(&["sort", "align", "missing"]),
            MatchStrategy::Exact,
        );

        assert_eq!(index.nodes_for_row(0), ["node2".to_string()]);
        assert_eq!(index.nodes_for_row(1), ["node1".to_string()]);
        assert!(index.nodes_for_row(2).is_empty());
        assert!(index.nodes_for_row(99).is_empty());
        assert_eq!(index.rows_for_node("node2"), [0]);
        assert!(index.rows_for_node("node3").is_empty());
    }

    #[test]
    fn suffix_matching_accepts_namespaced_titles() {
        let index = CounterpartIndex::build(
            &nodes(&[("node1", "#main/sort"), ("node2", "#main/align")]),
            &rows(&["sort", ""]),
            MatchStrategy::Suffix,
        );

        assert_eq!(index.nodes_for_row(0), ["node1".to_string()]);
        assert!(index.nodes_for_row(1).is_empty());
        assert_eq!(index.rows_for_node("node1"), [0]);
    }
}
