//! Immutable undirected graph model shared by the lettered graph and the
//! numbered table.
//!
//! Vertices are interned into dense [`NodeId`]s in insertion order, and each
//! vertex keeps an insertion-ordered adjacency map so that weight lookups
//! are O(1) and iteration is deterministic.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use gmatch_common::EdgeLine;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dense vertex handle, valid only for the graph that produced it.
pub type NodeId = u32;

/// Anything usable as a vertex identifier.
pub trait VertexId: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

impl<T> VertexId for T where T: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display {}

/// Symbolic vertex name from the lettered graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Wrap a name as given.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 0-based row of the numbered table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(usize);

impl Row {
    /// Row at a 0-based index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Row with a 1-based exam number.
    pub const fn from_number(number: usize) -> Self {
        Self(number.saturating_sub(1))
    }

    /// 0-based index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// 1-based number, as printed in exam tables.
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Positive edge weight. Edges declared without one carry [`Weight::UNSPECIFIED`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    /// Sentinel for "unweighted / unspecified".
    pub const UNSPECIFIED: Self = Self(1);

    /// Validate a raw weight.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural problems detected while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge connects a vertex to itself.
    #[error("self-loop on vertex {vertex}")]
    SelfLoop {
        /// The looping vertex.
        vertex: String,
    },

    /// The same edge was declared twice with different weights.
    #[error("edge {from}-{to} declared with conflicting weights {first} and {second}")]
    ConflictingWeight {
        /// First endpoint as declared.
        from: String,
        /// Second endpoint as declared.
        to: String,
        /// Weight of the earlier declaration.
        first: u32,
        /// Weight of the later declaration.
        second: u32,
    },

    /// A weight of zero was given for an edge.
    #[error("edge {from}-{to} has zero weight")]
    ZeroWeight {
        /// First endpoint as declared.
        from: String,
        /// Second endpoint as declared.
        to: String,
    },

    /// The table has a row of the wrong length.
    #[error("table must be square: row {row} has {len} cells, expected {expected}")]
    NonSquareMatrix {
        /// 1-based number of the offending row.
        row: usize,
        /// Number of cells in that row.
        len: usize,
        /// Number of rows in the table.
        expected: usize,
    },

    /// The table cell (r, c) differs from (c, r).
    #[error("table is not symmetric: cell ({row}, {col}) is {forward} but ({col}, {row}) is {backward}")]
    AsymmetricTable {
        /// 1-based row of the cell.
        row: usize,
        /// 1-based column of the cell.
        col: usize,
        /// Value at (row, col).
        forward: u32,
        /// Value at (col, row).
        backward: u32,
    },
}

/// An undirected simple graph with weighted edges.
#[derive(Clone, Debug)]
pub struct Graph<V> {
    vertices: IndexSet<V>,
    adjacency: Vec<IndexMap<NodeId, Weight>>,
}

/// The lettered graph of a task.
pub type LetteredGraph = Graph<Label>;

/// The numbered table of a task.
pub type TableGraph = Graph<Row>;

impl<V: VertexId> Graph<V> {
    /// Build from `(vertex, [(neighbor, weight)])` declarations.
    ///
    /// Each edge may be declared from either side or both; repeated
    /// declarations must agree on the weight. `None` stands for
    /// [`Weight::UNSPECIFIED`]. Vertices without neighbors are kept as
    /// isolated vertices.
    pub fn from_adjacency<I, N>(entries: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = (V, Option<u32>)>,
    {
        let mut builder = GraphBuilder::new();
        for (vertex, neighbors) in entries {
            builder.add_vertex(vertex.clone());
            for (neighbor, weight) in neighbors {
                builder.add_edge(vertex.clone(), neighbor, weight)?;
            }
        }
        Ok(builder.build())
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(IndexMap::len).sum::<usize>() / 2
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// Dense handles of all vertices.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.vertices.len()).map(|i| i as NodeId)
    }

    /// Handle of a vertex, if present.
    pub fn node_id(&self, vertex: &V) -> Option<NodeId> {
        self.vertices.get_index_of(vertex).map(|i| i as NodeId)
    }

    /// Vertex behind a handle.
    ///
    /// # Panics
    /// Panics if `node` does not belong to this graph.
    pub fn vertex(&self, node: NodeId) -> &V {
        &self.vertices[node as usize]
    }

    /// Whether the vertex is present.
    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Degree of a vertex, if present.
    pub fn degree(&self, vertex: &V) -> Option<usize> {
        self.node_id(vertex).map(|n| self.node_degree(n))
    }

    /// Neighbors of a vertex with edge weights, if present.
    pub fn neighbors<'a>(
        &'a self,
        vertex: &V,
    ) -> Option<impl Iterator<Item = (&'a V, Weight)> + use<'a, V>> {
        let node = self.node_id(vertex)?;
        Some(
            self.node_neighbors(node)
                .map(move |(n, w)| (self.vertex(n), w)),
        )
    }

    /// Degree behind a handle.
    pub fn node_degree(&self, node: NodeId) -> usize {
        self.adjacency[node as usize].len()
    }

    /// Neighbor handles with edge weights.
    pub fn node_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        self.adjacency[node as usize].iter().map(|(&n, &w)| (n, w))
    }

    /// Weight of the edge between two handles, if adjacent.
    pub fn weight_between(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.adjacency[a as usize].get(&b).copied()
    }

    /// Whether two handles are adjacent.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a as usize].contains_key(&b)
    }

    /// Every edge once, as `(low, high, weight)` handles.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Weight)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, nbrs)| {
            let a = a as NodeId;
            nbrs.iter()
                .filter(move |(b, _)| a < **b)
                .map(move |(&b, &w)| (a, b, w))
        })
    }

    /// Sorted degree multiset.
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.node_ids().map(|n| self.node_degree(n)).collect();
        degrees.sort_unstable();
        degrees
    }

    /// Sorted multiset of all edge weights.
    pub fn weight_multiset(&self) -> Vec<Weight> {
        let mut weights: Vec<Weight> = self.edges().map(|(_, _, w)| w).collect();
        weights.sort_unstable();
        weights
    }
}

impl Graph<Label> {
    /// Build the lettered graph from parsed edge list lines.
    ///
    /// Vertices are numbered in label order so that handles do not depend on
    /// the order of the declarations.
    pub fn from_edge_lines(lines: &[EdgeLine]) -> Result<Self, GraphError> {
        let labels: BTreeSet<&str> = lines
            .iter()
            .flat_map(|line| match line {
                EdgeLine::Vertex { label } => vec![label.as_str()],
                EdgeLine::Edge { from, to, .. } => vec![from.as_str(), to.as_str()],
            })
            .collect();

        let mut builder = GraphBuilder::new();
        for label in labels {
            builder.add_vertex(Label::from(label));
        }
        for line in lines {
            if let EdgeLine::Edge { from, to, weight } = line {
                builder.add_edge(Label::from(from.as_str()), Label::from(to.as_str()), *weight)?;
            }
        }
        Ok(builder.build())
    }
}

impl Graph<Row> {
    /// Build the numbered table from a square grid; 0 means "no edge".
    pub fn from_matrix(grid: &[Vec<u32>]) -> Result<Self, GraphError> {
        let n = grid.len();
        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GraphError::NonSquareMatrix {
                row: row + 1,
                len: cells.len(),
                expected: n,
            });
        }

        let mut builder = GraphBuilder::new();
        for i in 0..n {
            builder.add_vertex(Row::new(i));
        }

        for (i, row) in grid.iter().enumerate() {
            if row[i] != 0 {
                return Err(GraphError::SelfLoop {
                    vertex: Row::new(i).to_string(),
                });
            }
            for (j, &forward) in row.iter().enumerate().skip(i + 1) {
                let backward = grid[j][i];
                if forward != backward {
                    return Err(GraphError::AsymmetricTable {
                        row: i + 1,
                        col: j + 1,
                        forward,
                        backward,
                    });
                }
                if forward != 0 {
                    builder.add_edge(Row::new(i), Row::new(j), Some(forward))?;
                }
            }
        }
        Ok(builder.build())
    }
}

/// Incremental construction of a [`Graph`].
#[derive(Clone, Debug)]
pub struct GraphBuilder<V> {
    vertices: IndexSet<V>,
    adjacency: Vec<IndexMap<NodeId, Weight>>,
}

impl<V: VertexId> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId> GraphBuilder<V> {
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            adjacency: Vec::new(),
        }
    }

    /// Add a vertex (no-op if already present) and return its handle.
    pub fn add_vertex(&mut self, vertex: V) -> NodeId {
        let (idx, inserted) = self.vertices.insert_full(vertex);
        if inserted {
            self.adjacency.push(IndexMap::new());
        }
        idx as NodeId
    }

    /// Add an undirected edge, adding missing endpoints.
    ///
    /// Redeclaring an existing edge with the same weight is a no-op.
    pub fn add_edge(&mut self, from: V, to: V, weight: Option<u32>) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfLoop {
                vertex: from.to_string(),
            });
        }
        let weight = match weight {
            None => Weight::UNSPECIFIED,
            Some(raw) => Weight::new(raw).ok_or_else(|| GraphError::ZeroWeight {
                from: from.to_string(),
                to: to.to_string(),
            })?,
        };

        let a = self.add_vertex(from.clone());
        let b = self.add_vertex(to.clone());

        if let Some(&existing) = self.adjacency[a as usize].get(&b) {
            if existing != weight {
                return Err(GraphError::ConflictingWeight {
                    from: from.to_string(),
                    to: to.to_string(),
                    first: existing.get(),
                    second: weight.get(),
                });
            }
            return Ok(());
        }

        self.adjacency[a as usize].insert(b, weight);
        self.adjacency[b as usize].insert(a, weight);
        Ok(())
    }

    /// Freeze into an immutable graph.
    pub fn build(self) -> Graph<V> {
        Graph {
            vertices: self.vertices,
            adjacency: self.adjacency,
        }
    }
}

#[cfg(test)]
mod tests {
    use gmatch_common::parse::{parse_edge_list, parse_matrix};

    use super::*;

    fn lettered(text: &str) -> LetteredGraph {
        Graph::from_edge_lines(&parse_edge_list(text).unwrap()).unwrap()
    }

    #[test]
    fn edge_lines_build_symmetric_adjacency() {
        let g = lettered("A-B 10\nB-C\nD");
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(&Label::from("B")), Some(2));
        assert_eq!(g.degree(&Label::from("D")), Some(0));

        let a = g.node_id(&Label::from("A")).unwrap();
        let b = g.node_id(&Label::from("B")).unwrap();
        assert_eq!(g.weight_between(a, b), Weight::new(10));
        assert_eq!(g.weight_between(b, a), Weight::new(10));

        let c = g.node_id(&Label::from("C")).unwrap();
        assert_eq!(g.weight_between(b, c), Some(Weight::UNSPECIFIED));
        assert!(!g.has_edge(a, c));
    }

    #[test]
    fn handles_follow_label_order() {
        let g = lettered("C-B\nB-A");
        let order: Vec<&str> = g.vertices().map(Label::as_str).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn neighbors_report_weights() {
        let g = lettered("A-B 3\nA-C 5");
        let mut nbrs: Vec<(String, u32)> = g
            .neighbors(&Label::from("A"))
            .unwrap()
            .map(|(v, w)| (v.to_string(), w.get()))
            .collect();
        nbrs.sort();
        assert_eq!(nbrs, vec![("B".to_string(), 3), ("C".to_string(), 5)]);
        assert!(g.neighbors(&Label::from("Z")).is_none());
    }

    #[test]
    fn duplicate_edge_with_same_weight_merges() {
        let g = lettered("A-B 4\nB-A 4");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn duplicate_edge_with_other_weight_is_rejected() {
        let err = Graph::from_edge_lines(&parse_edge_list("A-B 4\nB-A 5").unwrap()).unwrap_err();
        assert_eq!(
            err,
            GraphError::ConflictingWeight {
                from: "B".to_string(),
                to: "A".to_string(),
                first: 4,
                second: 5,
            }
        );
    }

    #[test]
    fn self_loop_is_rejected() {
        let err = Graph::from_edge_lines(&parse_edge_list("A-A").unwrap()).unwrap_err();
        assert!(matches!(err, GraphError::SelfLoop { .. }));
    }

    #[test]
    fn adjacency_declarations_from_both_sides() {
        let g: Graph<u32> = Graph::from_adjacency(vec![
            (1, vec![(2, Some(7))]),
            (2, vec![(1, Some(7)), (3, None)]),
            (4, vec![]),
        ])
        .unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(&4), Some(0));
        assert_eq!(g.degree_sequence(), vec![0, 1, 1, 2]);

        let zero = Graph::<u32>::from_adjacency(vec![(1, vec![(2, Some(0))])]).unwrap_err();
        assert!(matches!(zero, GraphError::ZeroWeight { .. }));
    }

    #[test]
    fn matrix_builds_table() {
        let t = TableGraph::from_matrix(&parse_matrix("0 10 0\n10 0 7\n0 7 0").unwrap()).unwrap();
        assert_eq!(t.vertex_count(), 3);
        assert_eq!(t.degree(&Row::new(1)), Some(2));
        assert_eq!(
            t.weight_multiset(),
            vec![Weight::new(7).unwrap(), Weight::new(10).unwrap()]
        );
        let edges: Vec<(NodeId, NodeId)> = t.edges().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn matrix_rejects_bad_tables() {
        assert!(matches!(
            TableGraph::from_matrix(&[vec![0, 1], vec![1]]),
            Err(GraphError::NonSquareMatrix { row: 2, len: 1, expected: 2 })
        ));
        assert!(matches!(
            TableGraph::from_matrix(&[vec![1, 0], vec![0, 0]]),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            TableGraph::from_matrix(&[vec![0, 3], vec![4, 0]]),
            Err(GraphError::AsymmetricTable { row: 1, col: 2, forward: 3, backward: 4 })
        ));
    }

    #[test]
    fn row_numbering_is_one_based() {
        assert_eq!(Row::new(0).number(), 1);
        assert_eq!(Row::from_number(5), Row::new(4));
        assert_eq!(Row::new(2).to_string(), "3");
    }
}
