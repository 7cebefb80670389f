//! Disposable search tree built during a single breadth-first route search.
//!
//! Nodes live in a flat arena and address each other by index, so re-rooting
//! is a matter of reversing a list of indices rather than rewiring owning
//! pointers. A tree never outlives the `find_route` call that built it.

use std::collections::VecDeque;

use maze_escape_core::Coordinate;

/// Index of a node within its owning [`SearchTree`] arena.
///
/// Identifiers are only meaningful for the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    coordinate: Coordinate,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tree of explored cells recording, for every node, the step that
/// discovered it.
///
/// Along any single root-to-leaf path every coordinate is unique, which
/// guarantees search termination and makes route reconstruction a plain
/// parent walk. The same coordinate may still appear in multiple distinct
/// branches: deduplication is local (self, ancestors, direct siblings), not
/// a global visited set.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SearchTree {
    /// Creates a tree containing a single root node at the provided
    /// coordinate.
    #[must_use]
    pub fn rooted_at(coordinate: Coordinate) -> Self {
        Self {
            nodes: vec![Node {
                coordinate,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Current root of the tree.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether the arena holds no nodes. Always false in practice
    /// because construction seeds the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Coordinate recorded at the node.
    #[must_use]
    pub fn coordinate(&self, node: NodeId) -> Coordinate {
        self.nodes[node.0].coordinate
    }

    /// Parent of the node, if it is not the root of its chain.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Children of the node in insertion order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Appends a new child holding `coordinate` under `parent`.
    ///
    /// The candidate is rejected with `None` when its coordinate duplicates
    /// the parent itself, any ancestor of the parent, or one of the
    /// parent's existing children. Insertion order of accepted children is
    /// preserved.
    pub fn add_child(&mut self, parent: NodeId, coordinate: Coordinate) -> Option<NodeId> {
        if self.coordinate(parent) == coordinate
            || self.has_ancestor(parent, coordinate)
            || self.has_sibling(parent, coordinate)
        {
            return None;
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(Node {
            coordinate,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(child);
        Some(child)
    }

    /// Unlinks the node from its parent's child list and clears its parent
    /// reference. Used only while re-rooting.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent {
            self.remove_child_link(parent, node);
        }
        self.nodes[node.0].parent = None;
    }

    /// Restructures the tree so `node` becomes the root.
    ///
    /// Each parent-to-child edge along the ancestor chain is reversed, one
    /// step at a time, leaving the original root as the deepest node of the
    /// reversed chain. Only the direct chain is revalidated: a coordinate
    /// already present elsewhere in the tree can afterwards occur twice
    /// along a single path.
    pub fn make_root(&mut self, node: NodeId) {
        let mut chain = vec![node];
        let mut cursor = self.nodes[node.0].parent;
        while let Some(ancestor) = cursor {
            chain.push(ancestor);
            cursor = self.nodes[ancestor.0].parent;
        }

        for pair in chain.windows(2) {
            let (child, parent) = (pair[0], pair[1]);
            self.remove_child_link(parent, child);
            self.nodes[parent.0].parent = Some(child);
            self.nodes[child.0].children.push(parent);
        }

        self.nodes[node.0].parent = None;
        self.root = node;
    }

    /// Breadth-first search of the subtree rooted at `from`, inclusive,
    /// returning the first node recorded at `coordinate`.
    #[must_use]
    pub fn find_node(&self, from: NodeId, coordinate: Coordinate) -> Option<NodeId> {
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            if self.coordinate(node) == coordinate {
                return Some(node);
            }
            queue.extend(self.children(node).iter().copied());
        }
        None
    }

    fn has_ancestor(&self, node: NodeId, coordinate: Coordinate) -> bool {
        let mut cursor = self.nodes[node.0].parent;
        while let Some(ancestor) = cursor {
            if self.coordinate(ancestor) == coordinate {
                return true;
            }
            cursor = self.nodes[ancestor.0].parent;
        }
        false
    }

    fn has_sibling(&self, parent: NodeId, coordinate: Coordinate) -> bool {
        self.nodes[parent.0]
            .children
            .iter()
            .any(|child| self.coordinate(*child) == coordinate)
    }

    fn remove_child_link(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        if let Some(position) = children.iter().position(|entry| *entry == child) {
            let _ = children.remove(position);
        }
    }
}
