//! Fast rejection and candidate sets.
//!
//! Cheap aggregate invariants are compared first; only when all of them
//! agree are per-vertex candidate sets built for the search.

use gmatch_common::WeightMode;
use tracing::debug;

use crate::graph::{Graph, NodeId, VertexId};
use crate::outcome::Failure;
use crate::signature::SignatureTable;

/// For every source vertex, the target vertices sharing its signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSets {
    by_node: Vec<Vec<NodeId>>,
}

impl CandidateSets {
    /// Candidates of one source vertex, ascending.
    pub fn of(&self, node: NodeId) -> &[NodeId] {
        &self.by_node[node as usize]
    }

    /// Number of source vertices covered.
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// Whether no source vertex has a candidate list.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Sum of all candidate set sizes.
    pub fn total(&self) -> usize {
        self.by_node.iter().map(Vec::len).sum()
    }
}

/// Disprove isomorphism cheaply, or compute candidate sets for the search.
///
/// Checks run in order: degree multisets, edge weight multisets (weighted
/// mode only), then signature class sizes. The first mismatch is returned.
pub fn prune<S: VertexId, T: VertexId>(
    source: &Graph<S>,
    target: &Graph<T>,
    mode: WeightMode,
) -> Result<CandidateSets, Failure> {
    let source_degrees = source.degree_sequence();
    let target_degrees = target.degree_sequence();
    if source_degrees != target_degrees {
        debug!(
            "degree sequences differ: {:?} vs {:?}",
            source_degrees, target_degrees
        );
        return Err(Failure::DegreeMismatch {
            source_degrees,
            target_degrees,
        });
    }

    if mode.is_weighted() {
        let source_weights = source.weight_multiset();
        let target_weights = target.weight_multiset();
        if source_weights != target_weights {
            debug!(
                "weight multisets differ: {:?} vs {:?}",
                source_weights, target_weights
            );
            return Err(Failure::WeightMismatch {
                source_weights,
                target_weights,
            });
        }
    }

    let source_sigs = SignatureTable::compute(source, mode);
    let target_sigs = SignatureTable::compute(target, mode);
    let source_classes = source_sigs.classes();
    let target_classes = target_sigs.classes();

    for (signature, members) in &source_classes {
        let target_count = target_classes.get(signature).map_or(0, Vec::len);
        if members.len() != target_count {
            debug!(
                "signature {} has {} source and {} target vertices",
                signature,
                members.len(),
                target_count
            );
            return Err(Failure::SignatureGroupMismatch {
                signature: (*signature).clone(),
                source_count: members.len(),
                target_count,
            });
        }
    }
    // Same vertex count and every source class matched, so the target has no extra class.
    debug_assert_eq!(source_classes.len(), target_classes.len());

    let by_node: Vec<Vec<NodeId>> = source
        .node_ids()
        .map(|node| {
            target_classes
                .get(source_sigs.of(node))
                .cloned()
                .unwrap_or_default()
        })
        .collect();

    let sets = CandidateSets { by_node };
    debug!(
        "{} signature classes, {} candidates over {} vertices",
        source_classes.len(),
        sets.total(),
        sets.len()
    );
    Ok(sets)
}
