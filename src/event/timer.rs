//! Timer registry: host tokens <-> (node, control-chosen id).

use std::collections::HashMap;

use crate::dom::node::NodeKey;
use crate::host::TimerToken;

/// Maps host timer tokens to the node and id that registered them.
///
/// A node may run several timers at once as long as the ids differ;
/// registering the same `(node, id)` again replaces the earlier timer.
#[derive(Debug, Default)]
pub struct TimerTable {
    next: u32,
    entries: HashMap<TimerToken, (NodeKey, u32)>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer. Returns the new token and the token it replaced.
    pub fn register(&mut self, node: NodeKey, id: u32) -> (TimerToken, Option<TimerToken>) {
        let replaced = self.remove(node, id);
        self.next = self.next.wrapping_add(1).max(1);
        let token = TimerToken(self.next);
        self.entries.insert(token, (node, id));
        (token, replaced)
    }

    /// Forget the timer `(node, id)`, returning its token.
    pub fn remove(&mut self, node: NodeKey, id: u32) -> Option<TimerToken> {
        let token = self.token_of(node, id)?;
        self.entries.remove(&token);
        Some(token)
    }

    /// Forget every timer owned by one of `nodes`, returning their tokens.
    pub fn remove_nodes(&mut self, nodes: &[NodeKey]) -> Vec<TimerToken> {
        let mut tokens: Vec<TimerToken> = self
            .entries
            .iter()
            .filter(|(_, (node, _))| nodes.contains(node))
            .map(|(&token, _)| token)
            .collect();
        tokens.sort();
        for token in &tokens {
            self.entries.remove(token);
        }
        tokens
    }

    /// The owner of `token`.
    pub fn lookup(&self, token: TimerToken) -> Option<(NodeKey, u32)> {
        self.entries.get(&token).copied()
    }

    pub fn token_of(&self, node: NodeKey, id: u32) -> Option<TimerToken> {
        self.entries
            .iter()
            .find(|(_, owner)| **owner == (node, id))
            .map(|(&token, _)| token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
