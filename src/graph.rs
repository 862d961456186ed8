//! Strongly connected components of a small directed graph, and a
//! topological order over the condensed graph.
//!
//! FOLLOW sets propagate along edges `X -> V` ("X is followed by whatever
//! follows V"), and those edges happily form cycles. Collapsing each cycle
//! into one component gives a DAG that can be solved in a single pass.

use std::collections::{BTreeMap, BTreeSet};

/// Adjacency sets; nodes that only appear as edge targets are still nodes.
pub type Graph<N> = BTreeMap<N, BTreeSet<N>>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Component<N> {
    pub nodes: Vec<N>,
    /// Indices of the components this one has edges into.
    pub next: BTreeSet<usize>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Condensation<N> {
    components: Vec<Component<N>>,
    component_of: BTreeMap<N, usize>,
}

impl<N: Ord + Clone> Condensation<N> {
    pub fn components(&self) -> &[Component<N>] { &self.components }

    pub fn component_of(&self, node: &N) -> Option<usize> { self.component_of.get(node).copied() }

    /// Component indices ordered so that every component comes after all of
    /// the components it has edges into.
    pub fn topological_order(&self) -> Vec<usize> {
        let mut done = vec![false; self.components.len()];
        let mut order = Vec::with_capacity(self.components.len());
        for c in 0..self.components.len() {
            self.post_order(c, &mut done, &mut order);
        }
        order
    }

    fn post_order(&self, c: usize, done: &mut [bool], order: &mut Vec<usize>) {
        if done[c] { return; }
        done[c] = true;
        for &n in &self.components[c].next {
            self.post_order(n, done, order);
        }
        order.push(c);
    }
}

/// Tarjan's algorithm.
pub fn condense<N: Ord + Clone>(graph: &Graph<N>) -> Condensation<N> {
    let mut tarjan = Tarjan {
        graph,
        counter: 0,
        index: BTreeMap::new(),
        lowlink: BTreeMap::new(),
        stack: Vec::new(),
        on_stack: BTreeSet::new(),
        components: Vec::new(),
        component_of: BTreeMap::new(),
    };
    for node in graph.keys() {
        if !tarjan.index.contains_key(node) {
            tarjan.visit(node);
        }
    }
    Condensation { components: tarjan.components, component_of: tarjan.component_of }
}

struct Tarjan<'g, N> {
    graph: &'g Graph<N>,
    counter: usize,
    index: BTreeMap<N, usize>,
    lowlink: BTreeMap<N, usize>,
    stack: Vec<N>,
    on_stack: BTreeSet<N>,
    components: Vec<Component<N>>,
    component_of: BTreeMap<N, usize>,
}

impl<'g, N: Ord + Clone> Tarjan<'g, N> {
    fn visit(&mut self, node: &N) {
        self.index.insert(node.clone(), self.counter);
        self.lowlink.insert(node.clone(), self.counter);
        self.counter += 1;
        self.stack.push(node.clone());
        self.on_stack.insert(node.clone());

        let graph = self.graph;
        for succ in graph.get(node).into_iter().flatten() {
            if !self.index.contains_key(succ) {
                self.visit(succ);
                self.lower(node, self.lowlink[succ]);
            } else if self.on_stack.contains(succ) {
                self.lower(node, self.index[succ]);
            }
        }

        if self.lowlink[node] != self.index[node] {
            return;
        }

        let id = self.components.len();
        let mut nodes = Vec::new();
        while let Some(top) = self.stack.pop() {
            self.on_stack.remove(&top);
            self.component_of.insert(top.clone(), id);
            let root = &top == node;
            nodes.push(top);
            if root { break; }
        }

        // successors outside this component were all emitted before it.
        let next = nodes.iter()
            .flat_map(|n| graph.get(n).into_iter().flatten())
            .filter_map(|succ| self.component_of.get(succ).copied())
            .filter(|&c| c != id)
            .collect();
        self.components.push(Component { nodes, next });
    }

    fn lower(&mut self, node: &N, candidate: usize) {
        if let Some(low) = self.lowlink.get_mut(node) {
            *low = (*low).min(candidate);
        }
    }
}

#[cfg(test)]
#[path = "tests/graph.rs"]
mod tests_for_graph;
