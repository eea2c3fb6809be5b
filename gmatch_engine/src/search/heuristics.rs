use std::cmp::Ordering;

use crate::graph::{Graph, NodeId, VertexId};
use crate::prune::CandidateSets;

/// Order in which the search assigns source vertices.
///
/// Greedy most-constrained-first: repeatedly pick the unplaced vertex with
/// the fewest candidates, preferring vertices with more already-placed
/// neighbors so that consistency checks bite early.
pub(crate) fn most_constrained_order<V: VertexId>(
    source: &Graph<V>,
    candidates: &CandidateSets,
) -> Vec<NodeId> {
    let n = source.vertex_count();
    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let placed_neighbors = |placed: &[bool], s: NodeId| {
        source
            .node_neighbors(s)
            .filter(|&(nbr, _)| placed[nbr as usize])
            .count()
    };

    while order.len() < n {
        let next = source
            .node_ids()
            .filter(|&s| !placed[s as usize])
            .min_by(|&a, &b| {
                // Primary: fewest candidates
                let primary = candidates.of(a).len().cmp(&candidates.of(b).len());
                if primary != Ordering::Equal {
                    return primary;
                }

                // Secondary: most neighbors already ordered
                let secondary = placed_neighbors(&placed, b).cmp(&placed_neighbors(&placed, a));
                if secondary != Ordering::Equal {
                    return secondary;
                }

                a.cmp(&b)
            });

        let Some(next) = next else {
            break;
        };
        placed[next as usize] = true;
        order.push(next);
    }

    order
}

#[cfg(test)]
mod tests {
    use gmatch_common::WeightMode;
    use gmatch_common::parse::{parse_edge_list, parse_matrix};

    use super::*;
    use crate::graph::{Label, LetteredGraph, TableGraph};
    use crate::prune::prune;

    fn lettered(text: &str) -> LetteredGraph {
        Graph::from_edge_lines(&parse_edge_list(text).unwrap()).unwrap()
    }

    fn table(text: &str) -> TableGraph {
        Graph::from_matrix(&parse_matrix(text).unwrap()).unwrap()
    }

    #[test]
    fn rarest_signature_goes_first() {
        // A star with one extended arm: the centre and the arm's middle
        // vertex each have a unique signature.
        let g = lettered("A-B\nA-C\nA-D\nD-E");
        let t = table(
            "0 1 1 1 0\n1 0 0 0 0\n1 0 0 0 0\n1 0 0 0 1\n0 0 0 1 0",
        );
        let sets = prune(&g, &t, WeightMode::Unweighted).unwrap();
        let order = most_constrained_order(&g, &sets);

        let name = |n: NodeId| g.vertex(n).as_str().to_string();
        let names: Vec<String> = order.iter().map(|&n| name(n)).collect();

        assert_eq!(order.len(), 5);
        // A, D and E are unique; A has the lowest handle among them.
        assert_eq!(names[0], "A");
        // D is adjacent to A, E is not.
        assert_eq!(names[1], "D");
        assert_eq!(names[2], "E");
        assert!(names[3..].contains(&"B".to_string()));
        assert!(names[3..].contains(&"C".to_string()));
        assert_eq!(g.node_id(&Label::from("A")), Some(order[0]));
    }

    #[test]
    fn every_vertex_is_ordered_once() {
        let g = lettered("A-B\nB-C\nC-D\nD-A\nE");
        let t = table(
            "0 1 0 1 0\n1 0 1 0 0\n0 1 0 1 0\n1 0 1 0 0\n0 0 0 0 0",
        );
        let sets = prune(&g, &t, WeightMode::Unweighted).unwrap();
        let mut order = most_constrained_order(&g, &sets);
        // The isolated vertex has a single candidate.
        assert_eq!(g.vertex(order[0]).as_str(), "E");
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
