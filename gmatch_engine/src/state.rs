use std::collections::HashMap;

use crate::graph::NodeId;

/// Partial injective mapping grown and shrunk by the search.
pub(crate) struct State {
    // Source node -> target node
    mapping: HashMap<NodeId, NodeId>,
    // Target node -> source node
    preimage: HashMap<NodeId, NodeId>,

    source_count: usize,
}

impl State {
    pub(crate) fn new(source_count: usize) -> Self {
        State {
            mapping: HashMap::with_capacity(source_count),
            preimage: HashMap::with_capacity(source_count),
            source_count,
        }
    }

    pub(crate) fn is_mapped(&self, s: NodeId) -> bool {
        self.mapping.contains_key(&s)
    }

    pub(crate) fn mapped_to(&self, s: NodeId) -> Option<NodeId> {
        self.mapping.get(&s).copied()
    }

    pub(crate) fn is_used_target(&self, t: NodeId) -> bool {
        self.preimage.contains_key(&t)
    }

    pub(crate) fn preimage(&self, t: NodeId) -> Option<NodeId> {
        self.preimage.get(&t).copied()
    }

    pub(crate) fn mappings(&self) -> &HashMap<NodeId, NodeId> {
        &self.mapping
    }

    #[contracts::debug_requires(!self.is_mapped(s))]
    #[contracts::debug_requires(!self.is_used_target(t))]
    #[contracts::debug_ensures(self.is_mapped(s) && self.is_used_target(t))]
    #[contracts::debug_ensures(self.mapping.len() == self.preimage.len())]
    pub(crate) fn map(&mut self, s: NodeId, t: NodeId) {
        self.mapping.insert(s, t);
        self.preimage.insert(t, s);
    }

    #[contracts::debug_requires(self.mapped_to(s) == Some(t))]
    #[contracts::debug_ensures(!self.is_mapped(s) && !self.is_used_target(t))]
    #[contracts::debug_ensures(self.mapping.len() == self.preimage.len())]
    pub(crate) fn unmap(&mut self, s: NodeId, t: NodeId) {
        self.mapping.remove(&s);
        self.preimage.remove(&t);
    }

    pub(crate) fn done(&self) -> bool {
        self.mapping.len() == self.source_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_unmap_keep_both_directions() {
        let mut st = State::new(2);
        assert!(!st.done());

        st.map(0, 1);
        assert_eq!(st.mapped_to(0), Some(1));
        assert_eq!(st.preimage(1), Some(0));
        assert!(st.is_used_target(1));
        assert!(!st.is_used_target(0));

        st.map(1, 0);
        assert!(st.done());
        assert_eq!(st.mappings().len(), 2);

        st.unmap(0, 1);
        assert!(!st.is_mapped(0));
        assert_eq!(st.preimage(1), None);
        assert_eq!(st.mappings().len(), 1);
    }

    #[test]
    fn empty_source_is_done_immediately() {
        assert!(State::new(0).done());
    }
}
