//! Selection operations on [`GraphModel`].
//!
//! A diagram node and the rows that match it are one logical element: every
//! operation selects or deselects the whole group, so the two presentations
//! never disagree.  Each operation returns the [`SelectionDelta`] the view has
//! to apply.

use std::collections::{BTreeSet, VecDeque};

use super::model::{Direction, GraphModel};
use crate::errors::GraphResult;
use crate::models::ElementRef;

/// Elements whose `selected` flag changed during one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub selected: Vec<ElementRef>,
    pub deselected: Vec<ElementRef>,
}

impl SelectionDelta {
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.deselected.is_empty()
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().filter_map(|e| match e {
            ElementRef::Node(id) => Some(id.as_str()),
            ElementRef::Row(_) => None,
        })
    }

    fn record(&mut self, element: ElementRef, selected: bool) {
        if selected {
            self.selected.push(element);
        } else {
            self.deselected.push(element);
        }
    }
}

impl GraphModel {
    pub fn is_selected(&self, element: &ElementRef) -> bool {
        match element {
            ElementRef::Node(id) => self.nodes.get(id).map_or(false, |n| n.selected),
            ElementRef::Row(index) => self.rows.get(*index).map_or(false, |r| r.selected),
        }
    }

    /// Selected node ids in document order.
    pub fn selected_nodes(&self) -> Vec<String> {
        self.node_order
            .iter()
            .filter(|id| self.nodes.get(*id).map_or(false, |n| n.selected))
            .cloned()
            .collect()
    }

    /// Selected row indices in document order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.index)
            .collect()
    }

    /// `element` plus everything reachable through the row/node matching.
    pub fn logical_group(&self, element: &ElementRef) -> BTreeSet<ElementRef> {
        let mut group = BTreeSet::new();
        let mut queue = VecDeque::from([element.clone()]);
        while let Some(current) = queue.pop_front() {
            if !group.insert(current.clone()) {
                continue;
            }
            for other in self.matching_counterparts(&current) {
                if !group.contains(&other) {
                    queue.push_back(other);
                }
            }
        }
        group
    }

    /// Flip `element` and its counterparts.  Without `multi`, everything
    /// else that is selected is cleared first.
    pub fn toggle_selection(
        &mut self,
        element: &ElementRef,
        multi: bool,
    ) -> GraphResult<SelectionDelta> {
        self.contains(element)?;

        let group = self.logical_group(element);
        let target = !self.is_selected(element);
        let mut delta = SelectionDelta::default();

        if !multi {
            let others: Vec<ElementRef> = self
                .all_selected()
                .into_iter()
                .filter(|e| !group.contains(e))
                .collect();
            for other in others {
                self.set_flag(other, false, &mut delta);
            }
        }

        for member in group {
            self.set_flag(member, target, &mut delta);
        }
        Ok(delta)
    }

    /// Depth-first walk from `root_id` selecting every unselected node on the
    /// way.  An already selected node counts as visited, which also bounds the
    /// walk on cyclic diagrams.
    pub fn expand_selection(
        &mut self,
        root_id: &str,
        direction: Direction,
    ) -> GraphResult<SelectionDelta> {
        self.contains(&ElementRef::node(root_id))?;
        let mut delta = SelectionDelta::default();
        self.expand_from(root_id, direction, &mut delta);
        Ok(delta)
    }

    /// Expand from every node that is currently selected.
    pub fn expand_from_selection(&mut self, direction: Direction) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        for root in self.selected_nodes() {
            self.expand_from(&root, direction, &mut delta);
        }
        delta
    }

    pub fn clear_selection(&mut self) -> SelectionDelta {
        let mut delta = SelectionDelta::default();
        for element in self.all_selected() {
            self.set_flag(element, false, &mut delta);
        }
        delta
    }

    fn expand_from(&mut self, id: &str, direction: Direction, delta: &mut SelectionDelta) {
        let neighbors: Vec<String> = match self.nodes.get(id) {
            Some(node) => node.neighbors(direction).iter().cloned().collect(),
            None => return,
        };

        for next in neighbors {
            if self.is_selected(&ElementRef::Node(next.clone())) {
                continue;
            }
            for member in self.logical_group(&ElementRef::Node(next.clone())) {
                self.set_flag(member, true, delta);
            }
            self.expand_from(&next, direction, delta);
        }
    }

    fn all_selected(&self) -> Vec<ElementRef> {
        self.selected_nodes()
            .into_iter()
            .map(ElementRef::Node)
            .chain(self.selected_rows().into_iter().map(ElementRef::Row))
            .collect()
    }

    fn set_flag(&mut self, element: ElementRef, selected: bool, delta: &mut SelectionDelta) {
        let flag = match &element {
            ElementRef::Node(id) => self.nodes.get_mut(id).map(|n| &mut n.selected),
            ElementRef::Row(index) => self.rows.get_mut(*index).map(|r| &mut r.selected),
        };
        if let Some(flag) = flag {
            if *flag != selected {
                *flag = selected;
                delta.record(element, selected);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::fixtures::{scan, two_chains};
    use crate::graph::MatchStrategy;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn model() -> GraphModel {
        GraphModel::build(two_chains(), MatchStrategy::Exact).unwrap()
    }

    fn node(title: &str) -> ElementRef {
        ElementRef::node(format!("node_{}", title))
    }

    /// Every selected node's rows are selected and vice versa.
    fn assert_symmetric(model: &GraphModel) {
        for id in model.node_ids() {
            let element = ElementRef::node(id);
            for row in model.matching_counterparts(&element) {
                assert_eq!(model.is_selected(&element), model.is_selected(&row));
            }
        }
        for row in model.rows() {
            let element = ElementRef::Row(row.index);
            for node in model.matching_counterparts(&element) {
                assert_eq!(row.selected, model.is_selected(&node));
            }
        }
    }

    #[test]
    fn expanding_descendants_of_x_selects_everything_once() {
        let mut model = model();
        model.toggle_selection(&node("x"), false).unwrap();

        let delta = model
            .expand_selection("node_x", Direction::Descendants)
            .unwrap();
        let nodes: Vec<&str> = delta.selected_nodes().collect();
        let unique: HashSet<&str> = nodes.iter().copied().collect();
        assert_eq!(nodes.len(), 8);
        assert_eq!(unique.len(), 8);
        assert!(!unique.contains("node_x"));
        assert!(delta.deselected.is_empty());
        assert_eq!(model.selected_nodes().len(), 9);
        assert_eq!(model.selected_rows().len(), 9);

        let again = model
            .expand_selection("node_x", Direction::Descendants)
            .unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn expanding_ancestors_follows_inbound_edges() {
        let mut model = model();
        model.toggle_selection(&node("b3"), false).unwrap();
        model
            .expand_selection("node_b3", Direction::Ancestors)
            .unwrap();

        let mut selected = model.selected_nodes();
        selected.sort();
        assert_eq!(
            selected,
            vec!["node_a0", "node_a1", "node_b0", "node_b1", "node_b2", "node_b3", "node_x"]
        );
        assert_symmetric(&model);
    }

    #[test]
    fn deselected_node_becomes_eligible_again() {
        let mut model = model();
        model.toggle_selection(&node("a1"), false).unwrap();
        model
            .expand_selection("node_a1", Direction::Descendants)
            .unwrap();
        model.toggle_selection(&node("a2"), true).unwrap();
        assert!(!model.is_selected(&node("a2")));

        let delta = model
            .expand_selection("node_a1", Direction::Descendants)
            .unwrap();
        assert_eq!(delta.selected_nodes().collect::<Vec<_>>(), vec!["node_a2"]);
    }

    #[test]
    fn cyclic_diagram_expansion_terminates() {
        let mut model = GraphModel::build(
            scan(&["p", "q", "r"], &[("p", "q"), ("q", "r"), ("r", "p")]),
            MatchStrategy::Exact,
        )
        .unwrap();
        let delta = model.expand_selection("node_p", Direction::Descendants).unwrap();
        assert_eq!(delta.selected_nodes().count(), 3);
    }

    #[test]
    fn single_select_clears_both_presentations() {
        let mut model = model();
        model.toggle_selection(&node("a0"), false).unwrap();
        model.toggle_selection(&ElementRef::Row(5), true).unwrap(); // b0

        let delta = model.toggle_selection(&ElementRef::Row(2), false).unwrap(); // a1
        assert_eq!(model.selected_nodes(), vec!["node_a1".to_string()]);
        assert_eq!(model.selected_rows(), vec![2]);
        assert!(delta.deselected.contains(&node("a0")));
        assert!(delta.deselected.contains(&ElementRef::Row(1)));
        assert!(delta.deselected.contains(&node("b0")));
        assert!(delta.deselected.contains(&ElementRef::Row(5)));
    }

    #[test]
    fn multi_select_keeps_previous_selection() {
        let mut model = model();
        model.toggle_selection(&node("a0"), false).unwrap();
        model.toggle_selection(&ElementRef::Row(5), true).unwrap();
        assert_eq!(
            model.selected_nodes(),
            vec!["node_a0".to_string(), "node_b0".to_string()]
        );

        // Modifier toggle on a selected element only deselects that element
        model.toggle_selection(&node("a0"), true).unwrap();
        assert_eq!(model.selected_nodes(), vec!["node_b0".to_string()]);
        assert_eq!(model.selected_rows(), vec![5]);
    }

    #[test]
    fn toggling_the_only_selection_deselects_it() {
        let mut model = model();
        model.toggle_selection(&node("x"), false).unwrap();
        let delta = model.toggle_selection(&node("x"), false).unwrap();
        assert!(model.selected_nodes().is_empty());
        assert!(model.selected_rows().is_empty());
        assert_eq!(delta.deselected.len(), 2);
    }

    #[test]
    fn rows_without_counterpart_still_toggle() {
        let mut scan = two_chains();
        scan.row_labels.push("not drawn".into());
        let mut model = GraphModel::build(scan, MatchStrategy::Exact).unwrap();

        let delta = model.toggle_selection(&ElementRef::Row(9), false).unwrap();
        assert_eq!(delta.selected, vec![ElementRef::Row(9)]);
        assert!(model.matching_counterparts(&ElementRef::Row(9)).is_empty());
    }

    #[test]
    fn unknown_elements_are_reported() {
        let mut model = model();
        assert!(model.toggle_selection(&ElementRef::Row(99), false).is_err());
        assert!(model.expand_selection("node_nope", Direction::Ancestors).is_err());
    }

    #[test]
    fn expand_from_selection_uses_every_root() {
        let mut model = model();
        model.toggle_selection(&node("a2"), false).unwrap();
        model.toggle_selection(&node("b2"), true).unwrap();
        let delta = model.expand_from_selection(Direction::Descendants);
        let mut nodes: Vec<&str> = delta.selected_nodes().collect();
        nodes.sort();
        assert_eq!(nodes, vec!["node_a3", "node_b3"]);

        let cleared = model.clear_selection();
        assert_eq!(cleared.deselected.len(), 8);
        assert!(model.selected_nodes().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(ElementRef, bool),
        Expand(usize, Direction),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let element = prop_oneof![
            (0usize..9).prop_map(ElementRef::Row),
            (0usize..9).prop_map(|i| {
                let titles = ["x", "a0", "a1", "a2", "a3", "b0", "b1", "b2", "b3"];
                ElementRef::node(format!("node_{}", titles[i]))
            }),
        ];
        let direction = prop_oneof![Just(Direction::Ancestors), Just(Direction::Descendants)];
        prop_oneof![
            4 => (element, any::<bool>()).prop_map(|(e, multi)| Op::Toggle(e, multi)),
            2 => (0usize..9, direction).prop_map(|(i, d)| Op::Expand(i, d)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn presentations_stay_in_lockstep(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut model = model();
            let ids: Vec<String> = model.node_ids().map(str::to_string).collect();
            for op in ops {
                match op {
                    Op::Toggle(element, multi) => {
                        model.toggle_selection(&element, multi).unwrap();
                    }
                    Op::Expand(i, direction) => {
                        model.expand_selection(&ids[i], direction).unwrap();
                    }
                    Op::Clear => {
                        model.clear_selection();
                    }
                }
                assert_symmetric(&model);
            }
        }
    }
}
