//! Tree queries: lookup by id, paint order, hit-testing.

use crate::geometry::Point;

use super::node::NodeKey;
use super::tree::Dom;

impl Dom {
    /// First descendant of `start` (pre-order, `start` excluded) with `id`.
    pub fn find_by_id(&self, start: NodeKey, id: u32) -> Option<NodeKey> {
        self.walk_depth_first(start)
            .into_iter()
            .skip(1)
            .find(|&key| self.get(key).is_some_and(|data| data.id == id))
    }

    /// Displayed children of `key`, back to front: flow children in insertion
    /// order, then floats in insertion order.
    pub fn paint_order(&self, key: NodeKey) -> Vec<NodeKey> {
        let displayed = |&&child: &&NodeKey| self.get(child).is_some_and(|d| d.is_displayed());
        let is_float = |child: NodeKey| self.get(child).is_some_and(|d| d.style.is_float);

        let children = self.children(key);
        let mut order: Vec<NodeKey> = children
            .iter()
            .filter(displayed)
            .filter(|&&c| !is_float(c))
            .copied()
            .collect();
        order.extend(children.iter().filter(displayed).filter(|&&c| is_float(c)).copied());
        order
    }

    /// Deepest displayed node under `pt`, starting at `start`.
    ///
    /// Children are tried front to back (reverse paint order); the search
    /// descends into the first one containing the point. Returns `start`
    /// itself when no child matches, and `None` when `start` is hidden or
    /// does not contain the point. Disabled nodes are hit-testable.
    pub fn hit_test(&self, start: NodeKey, pt: Point) -> Option<NodeKey> {
        let data = self.get(start)?;
        if !data.is_displayed() || !data.rect.contains(pt) {
            return None;
        }
        self.paint_order(start)
            .into_iter()
            .rev()
            .find_map(|child| self.hit_test(child, pt))
            .or(Some(start))
    }
}
