//! Matching a lettered graph against a numbered adjacency table.
//!
//! The pipeline is layered: an immutable [`Graph`] model, per-vertex
//! [`Signature`]s, a candidate [`prune`]r that rejects impossible pairs
//! without searching, a backtracking isomorphism search and an
//! [`aggregate`] step that merges every confirmed mapping into an
//! [`Answer`]. [`GraphMatcher`] runs all of them.

mod aggregate;
mod graph;
mod mapping;
mod matcher;
mod outcome;
mod prune;
mod search;
mod signature;
mod state;

pub use crate::aggregate::{Answer, aggregate};
pub use crate::graph::{
    Graph, GraphBuilder, GraphError, Label, LetteredGraph, NodeId, Row, TableGraph, VertexId,
    Weight,
};
pub use crate::mapping::Mapping;
pub use crate::matcher::{GraphMatcher, solve_batch, solve_problem};
pub use crate::outcome::{Failure, FailureKind, Outcome, SearchStats, SolveReport};
pub use crate::prune::{CandidateSets, prune};
pub use crate::signature::{NeighborKey, Signature, SignatureTable};
