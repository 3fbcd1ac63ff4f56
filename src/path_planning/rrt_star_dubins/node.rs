//! Tree vertices and the append-only tree that owns them

use std::collections::VecDeque;

use crate::common::{Pose2D, SteeredPath, SteeringError};

/// Tree vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pose: Pose2D,
    /// Path length from the root through the parent chain
    pub cost: f64,
    /// Arc length of `local_path`
    pub segment_length: f64,
    pub parent: Option<usize>,
    /// Samples from the parent's pose to `pose`, empty for the root
    pub local_path: Vec<Pose2D>,
}

impl Node {
    pub fn root(pose: Pose2D) -> Self {
        Node {
            pose,
            cost: 0.0,
            segment_length: 0.0,
            parent: None,
            local_path: Vec::new(),
        }
    }

    /// Build a vertex from a steering result hanging off `parent`.
    ///
    /// The vertex pose is the last sample, i.e. where the oracle actually
    /// arrived.
    pub fn from_steer(parent: usize, parent_cost: f64, steered: SteeredPath) -> Result<Self, SteeringError> {
        let pose = *steered.end().ok_or(SteeringError::EmptyPath)?;
        Ok(Node {
            pose,
            cost: parent_cost + steered.length,
            segment_length: steered.length,
            parent: Some(parent),
            local_path: steered.samples,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Append-only vertex list with a children index kept next to the parent links.
///
/// Vertices are never removed; rewiring replaces a vertex in place.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    children: Vec<Vec<usize>>,
}

impl Tree {
    pub fn new(root: Pose2D) -> Self {
        Tree {
            nodes: vec![Node::root(root)],
            children: vec![Vec::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Append a vertex and return its index. Its parent must already exist.
    pub fn push(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        if let Some(parent) = node.parent {
            debug_assert!(parent < index, "parent {} does not exist yet", parent);
            self.children[parent].push(index);
        }
        self.nodes.push(node);
        self.children.push(Vec::new());
        index
    }

    /// Replace the vertex at `index` in place, moving it under its new parent.
    pub fn replace(&mut self, index: usize, node: Node) {
        debug_assert!(index != 0, "the root cannot be replaced");
        if let Some(old_parent) = self.nodes[index].parent {
            self.children[old_parent].retain(|&c| c != index);
        }
        if let Some(new_parent) = node.parent {
            self.children[new_parent].push(index);
        }
        self.nodes[index] = node;
    }

    /// Recompute the cost of every descendant of `index` from its parent.
    /// Returns the number of vertices updated.
    pub fn propagate_cost(&mut self, index: usize) -> usize {
        let mut updated = 0;
        let mut queue: VecDeque<usize> = self.children[index].iter().copied().collect();

        while let Some(child) = queue.pop_front() {
            if let Some(parent) = self.nodes[child].parent {
                self.nodes[child].cost = self.nodes[parent].cost + self.nodes[child].segment_length;
                updated += 1;
            }
            queue.extend(self.children[child].iter().copied());
        }
        updated
    }

    /// Walk from `index` up to the root, `index` first.
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(index),
            remaining: self.nodes.len(),
        }
    }

    /// True when `ancestor` lies on the parent chain of `index` (or equals it)
    pub fn is_ancestor(&self, ancestor: usize, index: usize) -> bool {
        self.ancestors(index).any(|i| i == ancestor)
    }
}

/// Parent-link walk, bounded by the tree size
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.tree.nodes[current].parent;
        Some(current)
    }
}
