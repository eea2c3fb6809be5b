use std::collections::{BTreeMap, BTreeSet, HashMap};

use gmatch_common::WeightMode;
use serde::Serialize;

use crate::graph::{Graph, NodeId, VertexId};

/// A complete vertex correspondence from a source graph onto a target graph.
///
/// Pairs are kept sorted by source vertex so that two mappings compare and
/// print identically regardless of the order the search produced them in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Mapping<S: Ord, T> {
    pairs: BTreeMap<S, T>,
}

impl<S: VertexId, T: VertexId> Mapping<S, T> {
    pub(crate) fn from_nodes(
        source: &Graph<S>,
        target: &Graph<T>,
        nodes: &HashMap<NodeId, NodeId>,
    ) -> Self {
        let pairs = nodes
            .iter()
            .map(|(&s, &t)| (source.vertex(s).clone(), target.vertex(t).clone()))
            .collect();
        Self { pairs }
    }

    /// Image of a source vertex.
    pub fn get(&self, vertex: &S) -> Option<&T> {
        self.pairs.get(vertex)
    }

    /// All pairs, in source vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &T)> {
        self.pairs.iter()
    }

    /// Number of mapped source vertices.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no vertex is mapped.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether this mapping is an isomorphism from `source` onto `target`.
    ///
    /// Checks that every source vertex has an image, that no two share one,
    /// and that every source edge lands on a target edge (with an equal
    /// weight in weighted mode). With equal edge counts this makes the
    /// correspondence a bijection on edges too.
    pub fn preserves_structure(
        &self,
        source: &Graph<S>,
        target: &Graph<T>,
        mode: WeightMode,
    ) -> bool {
        if self.len() != source.vertex_count() || self.len() != target.vertex_count() {
            return false;
        }
        if source.edge_count() != target.edge_count() {
            return false;
        }

        let images: BTreeSet<&T> = self.pairs.values().collect();
        if images.len() != self.len() {
            return false;
        }

        let mut nodes: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.len());
        for (s, t) in &self.pairs {
            let (Some(s_node), Some(t_node)) = (source.node_id(s), target.node_id(t)) else {
                return false;
            };
            nodes.insert(s_node, t_node);
        }

        source.edges().all(|(a, b, weight)| {
            let (Some(&ta), Some(&tb)) = (nodes.get(&a), nodes.get(&b)) else {
                return false;
            };
            match target.weight_between(ta, tb) {
                None => false,
                Some(w) => !mode.is_weighted() || w == weight,
            }
        })
    }
}

impl<'a, S: Ord, T> IntoIterator for &'a Mapping<S, T> {
    type Item = (&'a S, &'a T);
    type IntoIter = std::collections::btree_map::Iter<'a, S, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<S: Ord, T> FromIterator<(S, T)> for Mapping<S, T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gmatch_common::parse::{parse_edge_list, parse_matrix};

    use super::*;
    use crate::graph::{Label, LetteredGraph, Row, TableGraph};

    fn lettered(text: &str) -> LetteredGraph {
        Graph::from_edge_lines(&parse_edge_list(text).unwrap()).unwrap()
    }

    fn table(text: &str) -> TableGraph {
        Graph::from_matrix(&parse_matrix(text).unwrap()).unwrap()
    }

    fn mapping(pairs: &[(&str, usize)]) -> Mapping<Label, Row> {
        pairs
            .iter()
            .map(|&(l, n)| (Label::from(l), Row::from_number(n)))
            .collect()
    }

    #[test]
    fn path_reversal_is_structural() {
        let g = lettered("A-B\nB-C");
        let t = table("0 1 0\n1 0 1\n0 1 0");

        let forward = mapping(&[("A", 1), ("B", 2), ("C", 3)]);
        let reversed = mapping(&[("A", 3), ("B", 2), ("C", 1)]);
        let broken = mapping(&[("A", 2), ("B", 1), ("C", 3)]);

        assert!(forward.preserves_structure(&g, &t, WeightMode::Unweighted));
        assert!(reversed.preserves_structure(&g, &t, WeightMode::Unweighted));
        assert!(!broken.preserves_structure(&g, &t, WeightMode::Unweighted));
    }

    #[test]
    fn weights_only_matter_when_weighted() {
        let g = lettered("A-B 10\nB-C 6");
        let t = table("0 6 0\n6 0 10\n0 10 0");

        let m = mapping(&[("A", 1), ("B", 2), ("C", 3)]);
        assert!(m.preserves_structure(&g, &t, WeightMode::Unweighted));
        assert!(!m.preserves_structure(&g, &t, WeightMode::Weighted));

        let m = mapping(&[("A", 3), ("B", 2), ("C", 1)]);
        assert!(m.preserves_structure(&g, &t, WeightMode::Weighted));
    }

    #[test]
    fn partial_or_colliding_mappings_are_rejected() {
        let g = lettered("A-B\nB-C");
        let t = table("0 1 0\n1 0 1\n0 1 0");

        let partial = mapping(&[("A", 1), ("B", 2)]);
        let colliding = mapping(&[("A", 1), ("B", 2), ("C", 1)]);
        let unknown = mapping(&[("A", 1), ("B", 2), ("Z", 3)]);

        assert!(!partial.preserves_structure(&g, &t, WeightMode::Unweighted));
        assert!(!colliding.preserves_structure(&g, &t, WeightMode::Unweighted));
        assert!(!unknown.preserves_structure(&g, &t, WeightMode::Unweighted));
    }

    #[test]
    fn pairs_are_sorted_by_source() {
        let m = mapping(&[("C", 1), ("A", 3), ("B", 2)]);
        let order: Vec<&str> = m.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(m.get(&Label::from("A")), Some(&Row::new(2)));
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"A":2,"B":1,"C":0}"#
        );
    }
}
