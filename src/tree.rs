//! Parse trees, stored as an arena of nodes addressed by `NodeId`.
//!
//! Every node carries the 1-based input position of the first terminal it
//! derives. Nodes that derive only `ε` take the position of whatever comes
//! next in the word, and a node whose position is not known yet (because
//! parsing has not reached it) has none.

use crate::grammar::Symbol;

use std::collections::VecDeque;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

/// Nodes still waiting to be expanded or matched, leftmost first.
pub type Frontier = VecDeque<NodeId>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    name: Symbol,
    position: Option<usize>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    index: usize,
    inherited: bool,
}

impl Node {
    pub fn name(&self) -> &Symbol { &self.name }
    pub fn position(&self) -> Option<usize> { self.position }
    pub fn children(&self) -> &[NodeId] { &self.children }
    pub fn parent(&self) -> Option<NodeId> { self.parent }
    /// Index among the parent's children.
    pub fn index(&self) -> usize { self.index }
    /// Whether this node was carried over from an earlier tree.
    pub fn is_inherited(&self) -> bool { self.inherited }
}

#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, id: NodeId) -> &Node { &self.nodes[id.0] }
}

impl Tree {
    pub fn new(root: Symbol) -> Self {
        let mut tree = Tree { nodes: Vec::new(), root: NodeId(0) };
        tree.root = tree.alloc(root, None, 0, false);
        tree
    }

    pub fn root(&self) -> NodeId { self.root }

    fn alloc(&mut self, name: Symbol, parent: Option<NodeId>, index: usize, inherited: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { name, position: None, children: Vec::new(), parent, index, inherited });
        id
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, name: Symbol) -> NodeId {
        let index = self[parent].children.len();
        let child = self.alloc(name, Some(parent), index, false);
        self.nodes[parent.0].children.push(child);
        child
    }

    /// Sets the position of `id`, and of each ancestor that had none yet.
    pub(crate) fn place(&mut self, id: NodeId, position: usize) {
        self.nodes[id.0].position = Some(position);
        let mut current = self[id].parent;
        while let Some(p) = current {
            if self[p].position.is_some() {
                break;
            }
            self.nodes[p.0].position = Some(position);
            current = self[p].parent;
        }
    }

    /// Gives `id` the position of the nearest right sibling (climbing through
    /// ancestors when needed) that has one; every unplaced node passed on the
    /// way gets it too.
    pub(crate) fn resolve_position(&mut self, id: NodeId) -> Option<usize> {
        let mut pending = Vec::new();
        let mut current = id;
        let position = loop {
            if let Some(position) = self[current].position {
                break position;
            }
            pending.push(current);
            current = self.right_sibling(current)?;
        };
        for &node in pending.iter().rev() {
            self.place(node, position);
        }
        Some(position)
    }

    /// The next sibling of `id`, or of its nearest ancestor that has one.
    pub fn right_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let node = &self[current];
            let parent = node.parent?;
            if let Some(&next) = self[parent].children.get(node.index + 1) {
                return Some(next);
            }
            current = parent;
        }
    }

    pub fn is_sole_child(&self, id: NodeId) -> bool {
        self[id].parent.map_or(false, |p| self[p].children.len() == 1)
    }

    pub fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self[c].parent;
        }
        false
    }

    /// The topmost node whose first consumed terminal sits at `position`:
    /// starting from the non-`ε` leaf at `position`, climb while the parent
    /// starts there too.
    pub fn find_position(&self, position: usize) -> Option<NodeId> {
        let mut found = self.leaf_at(position)?;
        while let Some(parent) = self[found].parent {
            if self[parent].position != Some(position) {
                break;
            }
            found = parent;
        }
        Some(found)
    }

    // Subtrees starting past `position` are skipped.
    fn leaf_at(&self, position: usize) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if matches!(node.position, Some(p) if p > position) {
                continue;
            }
            if !node.children.is_empty() {
                stack.extend(node.children.iter().rev());
            } else if node.position == Some(position) && !node.name.is_epsilon() {
                return Some(id);
            }
        }
        None
    }

    /// Number of input terminals consumed under `id`.
    pub fn span(&self, id: NodeId) -> usize {
        let mut span = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if !node.children.is_empty() {
                stack.extend(node.children.iter());
            } else if node.position.is_some() && !node.name.is_epsilon() {
                span += 1;
            }
        }
        span
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            if node.children.is_empty() {
                leaves.push(id);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }

    /// The terminals this tree derives, without `ε` or the trailing `$`.
    pub fn word(&self) -> String {
        self.leaves().into_iter()
            .map(|id| &self[id].name)
            .filter(|name| !name.is_epsilon() && !name.is_end_of_input())
            .map(Symbol::as_str)
            .collect()
    }

    /// Copy of `source` without children, appended under `parent` if given.
    fn attach(&mut self, source: &Node, parent: Option<NodeId>) -> NodeId {
        let copy = self.alloc(source.name.clone(), parent, source.index, true);
        if let Some(p) = parent {
            self.nodes[p.0].children.push(copy);
        }
        copy
    }

    /// Copy of `old` limited to the nodes positioned at or before `bound`.
    /// Nodes past it are copied without children or position and queued on
    /// `frontier`, left to right, to be derived again.
    pub(crate) fn inherit_prefix(old: &Tree, bound: usize, frontier: &mut Frontier) -> Tree {
        let mut tree = Tree { nodes: Vec::with_capacity(old.nodes.len()), root: NodeId(0) };
        // pre-order, so siblings are attached and queued left to right
        let mut stack = vec![(old.root, None)];
        while let Some((id, parent)) = stack.pop() {
            let source = &old[id];
            let copy = tree.attach(source, parent);
            match source.position {
                Some(p) if p <= bound => {
                    tree.nodes[copy.0].position = Some(p);
                    stack.extend(source.children.iter().rev().map(|&c| (c, Some(copy))));
                }
                _ => frontier.push_back(copy),
            }
        }
        tree
    }

    /// Deep copy of the subtree of `old` rooted at `id`, detached, with
    /// positions moved by `shift`.
    pub(crate) fn graft(&mut self, old: &Tree, id: NodeId, shift: isize) -> NodeId {
        let shifted = |p: usize| (p as isize + shift) as usize;
        let top = self.attach(&old[id], None);
        self.nodes[top.0].position = old[id].position.map(shifted);
        let mut stack: Vec<(NodeId, NodeId)> = old[id].children.iter().rev().map(|&c| (c, top)).collect();
        while let Some((id, parent)) = stack.pop() {
            let source = &old[id];
            let copy = self.attach(source, Some(parent));
            self.nodes[copy.0].position = source.position.map(shifted);
            stack.extend(source.children.iter().rev().map(|&c| (c, copy)));
        }
        top
    }

    /// Puts `new` where `old` was. `old` stays in the arena but is no longer
    /// reachable from the root.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) {
        let (parent, index) = (self[old].parent, self[old].index);
        self.nodes[new.0].parent = parent;
        self.nodes[new.0].index = index;
        match parent {
            Some(p) => self.nodes[p.0].children[index] = new,
            None => self.root = new,
        }
        self.nodes[old.0].parent = None;
    }

    /// One line per node: `(name[position,index]:children)`.
    pub fn compact(&self) -> Compact<'_> { Compact(self) }

    /// One node per line, each level of depth drawn as `┊` padded to `indent`
    /// columns; inherited nodes are marked with `*`.
    pub fn pretty(&self, indent: usize) -> Pretty<'_> { Pretty { tree: self, indent } }
}

pub struct Compact<'t>(pub(crate) &'t Tree);

pub struct Pretty<'t> {
    pub(crate) tree: &'t Tree,
    pub(crate) indent: usize,
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests_for_tree;
