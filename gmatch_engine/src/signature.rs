//! Per-vertex structural fingerprints.
//!
//! A signature is the vertex degree plus the sorted multiset of its
//! neighbors' degrees (and, when weights matter, the weight of the edge
//! leading to each neighbor). Any isomorphism maps a vertex onto a vertex
//! with an identical signature, so differing signatures rule a pair out.

use std::collections::BTreeMap;
use std::fmt;

use gmatch_common::WeightMode;
use itertools::Itertools;
use serde::Serialize;

use crate::graph::{Graph, NodeId, VertexId, Weight};

/// What a vertex sees along one of its edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NeighborKey {
    /// Edge weight; `None` when weights are ignored.
    pub weight: Option<Weight>,
    /// Degree of the neighbor.
    pub degree: usize,
}

/// Structural fingerprint of one vertex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Signature {
    /// Degree of the vertex.
    pub degree: usize,
    /// Sorted multiset of what the vertex sees along its edges.
    pub neighborhood: Vec<NeighborKey>,
}

impl Signature {
    fn of<V: VertexId>(graph: &Graph<V>, node: NodeId, mode: WeightMode) -> Self {
        let mut neighborhood: Vec<NeighborKey> = graph
            .node_neighbors(node)
            .map(|(n, w)| NeighborKey {
                weight: mode.is_weighted().then_some(w),
                degree: graph.node_degree(n),
            })
            .collect();
        neighborhood.sort_unstable();

        Self {
            degree: graph.node_degree(node),
            neighborhood,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neighborhood = self
            .neighborhood
            .iter()
            .map(|key| match key.weight {
                Some(w) => format!("{w}/{}", key.degree),
                None => key.degree.to_string(),
            })
            .join(", ");
        write!(f, "({}; [{}])", self.degree, neighborhood)
    }
}

/// Signatures of every vertex of one graph, indexed by [`NodeId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureTable {
    by_node: Vec<Signature>,
}

impl SignatureTable {
    /// Compute all signatures of `graph`.
    pub fn compute<V: VertexId>(graph: &Graph<V>, mode: WeightMode) -> Self {
        let by_node = graph
            .node_ids()
            .map(|node| Signature::of(graph, node, mode))
            .collect();
        Self { by_node }
    }

    /// Signature of one vertex.
    pub fn of(&self, node: NodeId) -> &Signature {
        &self.by_node[node as usize]
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// True for the empty graph.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Vertices grouped by signature, in signature order.
    pub fn classes(&self) -> BTreeMap<&Signature, Vec<NodeId>> {
        let mut classes: BTreeMap<&Signature, Vec<NodeId>> = BTreeMap::new();
        for (node, sig) in self.by_node.iter().enumerate() {
            classes.entry(sig).or_default().push(node as NodeId);
        }
        classes
    }
}
