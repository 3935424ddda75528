//! Tree operations: insert, append, detach, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeKey};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeKey] = &[];

/// Structural errors from tree mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node {0:?} does not exist")]
    MissingNode(NodeKey),
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeKey),
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeKey, child: NodeKey },
    #[error("node {0:?} has no parent")]
    NotAttached(NodeKey),
    #[error("node {0:?} is the root")]
    IsRoot(NodeKey),
}

/// The control tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`, attached or not. Parent/child
/// relationships are stored in secondary maps; the parent link is only used
/// for upward traversal. Child order is paint order: later children are on top.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeKey, NodeData>,
    children: SecondaryMap<NodeKey, Vec<NodeKey>>,
    parent: SecondaryMap<NodeKey, NodeKey>,
    root: Option<NodeKey>,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached node.
    pub fn insert(&mut self, data: NodeData) -> NodeKey {
        let key = self.nodes.insert(data);
        self.children.insert(key, Vec::new());
        key
    }

    /// Append `child` as the last (topmost) child of `parent`.
    ///
    /// Fails if `child` already has a parent, is the root, or is an ancestor
    /// of `parent`. A node is never silently re-parented.
    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::MissingNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(TreeError::MissingNode(child));
        }
        if self.parent.contains_key(child) {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.root == Some(child) {
            return Err(TreeError::IsRoot(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
        Ok(())
    }

    /// Unlink `child` from its parent. The subtree stays in the arena.
    ///
    /// Returns the former parent.
    pub fn detach(&mut self, child: NodeKey) -> Result<NodeKey, TreeError> {
        if !self.nodes.contains_key(child) {
            return Err(TreeError::MissingNode(child));
        }
        if self.root == Some(child) {
            return Err(TreeError::IsRoot(child));
        }
        let parent = self.parent.remove(child).ok_or(TreeError::NotAttached(child))?;
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != child);
        }
        Ok(parent)
    }

    /// Free a node and all its descendants.
    ///
    /// The node is unlinked from its parent first. Returns the freed keys in
    /// breadth-first order (empty if `key` did not exist).
    pub fn remove(&mut self, key: NodeKey) -> Vec<NodeKey> {
        if !self.nodes.contains_key(key) {
            return Vec::new();
        }

        if let Some(parent) = self.parent.remove(key) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&c| c != key);
            }
        }
        if self.root == Some(key) {
            self.root = None;
        }

        let mut freed = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(key);
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            if self.nodes.remove(current).is_some() {
                freed.push(current);
            }
        }
        freed
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.parent.get(key).copied()
    }

    /// Children in paint order. Empty if the node has none or does not exist.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.children
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `key` up to the top of its tree, collecting ancestors.
    ///
    /// The returned vec does **not** include `key` itself; it starts with the
    /// immediate parent.
    pub fn ancestors(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut result = Vec::new();
        let mut current = key;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `ancestor` is a strict ancestor of `key`.
    pub fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = key;
        while let Some(p) = self.parent.get(current).copied() {
            if p == ancestor {
                return true;
            }
            current = p;
        }
        false
    }

    /// Whether `key` is the root or a descendant of it.
    pub fn is_connected(&self, key: NodeKey) -> bool {
        match self.root {
            Some(root) => root == key || self.is_ancestor(root, key),
            None => false,
        }
    }

    /// Immutable access to a node's data.
    pub fn get(&self, key: NodeKey) -> Option<&NodeData> {
        self.nodes.get(key)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut NodeData> {
        self.nodes.get_mut(key)
    }

    /// The root node, if set.
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Make a detached node the root.
    pub fn set_root(&mut self, key: NodeKey) -> Result<(), TreeError> {
        if !self.nodes.contains_key(key) {
            return Err(TreeError::MissingNode(key));
        }
        if self.parent.contains_key(key) {
            return Err(TreeError::AlreadyAttached(key));
        }
        self.root = Some(key);
        Ok(())
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeKey, NodeKey, NodeKey, NodeKey, NodeKey) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("Main"));
        dom.set_root(root).unwrap();
        let a = dom.insert(NodeData::new("Panel").with_id(1));
        let b = dom.insert(NodeData::new("Panel").with_id(2));
        let c = dom.insert(NodeData::new("Button").with_id(3));
        let d = dom.insert(NodeData::new("Button").with_id(4));
        dom.append_child(root, a).unwrap();
        dom.append_child(root, b).unwrap();
        dom.append_child(a, c).unwrap();
        dom.append_child(a, d).unwrap();
        (dom, root, a, b, c, d)
    }

    #[test]
    fn insert_is_detached() {
        let mut dom = Dom::new();
        let key = dom.insert(NodeData::new("Panel"));
        assert_eq!(dom.parent(key), None);
        assert_eq!(dom.root(), None);
        assert!(!dom.is_connected(key));
    }

    #[test]
    fn parent_relationship() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.parent(a), Some(root));
        assert_eq!(dom.parent(c), Some(a));
        assert_eq!(dom.parent(root), None);
    }

    #[test]
    fn children_in_insertion_order() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.children(root), &[a, b]);
        assert_eq!(dom.children(a), &[c, d]);
        assert!(dom.children(c).is_empty());
    }

    #[test]
    fn ancestors() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.ancestors(c), vec![a, root]);
        assert!(dom.ancestors(root).is_empty());
        assert!(dom.is_ancestor(root, c));
        assert!(!dom.is_ancestor(c, a));
    }

    #[test]
    fn append_attached_node_fails() {
        let (mut dom, _root, a, b, c, _d) = build_tree();
        assert_eq!(dom.append_child(b, c), Err(TreeError::AlreadyAttached(c)));
        assert_eq!(dom.parent(c), Some(a));
    }

    #[test]
    fn append_cycle_fails() {
        let mut dom = Dom::new();
        let x = dom.insert(NodeData::new("Panel"));
        let y = dom.insert(NodeData::new("Panel"));
        dom.append_child(x, y).unwrap();
        assert_eq!(dom.append_child(y, x), Err(TreeError::WouldCycle { parent: y, child: x }));
        assert_eq!(dom.append_child(x, x), Err(TreeError::WouldCycle { parent: x, child: x }));
    }

    #[test]
    fn append_root_fails() {
        let (mut dom, root, _a, b, ..) = build_tree();
        assert_eq!(dom.append_child(b, root), Err(TreeError::IsRoot(root)));
    }

    #[test]
    fn append_missing_fails() {
        let (mut dom, root, ..) = build_tree();
        let gone = dom.insert(NodeData::new("Panel"));
        dom.remove(gone);
        assert_eq!(dom.append_child(root, gone), Err(TreeError::MissingNode(gone)));
    }

    #[test]
    fn detach_keeps_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.detach(a), Ok(root));
        assert_eq!(dom.children(root), &[b]);
        assert_eq!(dom.children(a), &[c, d]);
        assert!(dom.contains(c));
        assert!(!dom.is_connected(c));
        assert_eq!(dom.detach(a), Err(TreeError::NotAttached(a)));
        assert_eq!(dom.detach(root), Err(TreeError::IsRoot(root)));
    }

    #[test]
    fn detach_then_reinsert() {
        let (mut dom, root, a, b, ..) = build_tree();
        dom.detach(a).unwrap();
        dom.append_child(root, a).unwrap();
        assert_eq!(dom.children(root), &[b, a]);
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        let freed = dom.remove(a);
        assert_eq!(freed, vec![a, c, d]);
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert_eq!(dom.children(root), &[b]);
        assert_eq!(dom.len(), 2);
    }

    #[test]
    fn remove_root_clears_root() {
        let (mut dom, root, ..) = build_tree();
        dom.remove(root);
        assert!(dom.is_empty());
        assert_eq!(dom.root(), None);
    }

    #[test]
    fn remove_nonexistent() {
        let mut dom = Dom::new();
        let key = dom.insert(NodeData::new("X"));
        dom.remove(key);
        assert!(dom.remove(key).is_empty());
    }

    #[test]
    fn set_root_rejects_child() {
        let (mut dom, _root, a, ..) = build_tree();
        assert_eq!(dom.set_root(a), Err(TreeError::AlreadyAttached(a)));
    }

    #[test]
    fn connected() {
        let (dom, root, _a, b, c, _d) = build_tree();
        assert!(dom.is_connected(root));
        assert!(dom.is_connected(b));
        assert!(dom.is_connected(c));
    }

    #[test]
    fn walk_depth_first() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(dom.walk_depth_first(a), vec![a, c, d]);
    }
}
