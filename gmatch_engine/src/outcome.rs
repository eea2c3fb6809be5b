//! Results of a solve call.
//!
//! Every business outcome is a value: a matched answer, a structured
//! failure explaining why no answer exists, or an explicit abort when the
//! caller's step budget ran out.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::Answer;
use crate::graph::{Label, Row, Weight};
use crate::mapping::Mapping;
use crate::signature::Signature;

/// Why a task has no answer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Failure {
    /// The graphs have different numbers of vertices.
    #[error("vertex count mismatch: graph has {source_count}, table has {target_count}")]
    VertexCountMismatch {
        /// Vertices in the lettered graph.
        source_count: usize,
        /// Rows in the table.
        target_count: usize,
    },

    /// Some queried labels are not vertices of the lettered graph.
    #[error("queried vertices not in graph: {}", .labels.join(", "))]
    UnknownQueriedVertex {
        /// Missing labels, sorted and deduplicated.
        labels: Vec<String>,
    },

    /// Sorted degree multisets differ.
    #[error(
        "degree sequence mismatch: graph {}, table {}",
        multiset(.source_degrees),
        multiset(.target_degrees)
    )]
    DegreeMismatch {
        /// Sorted degrees of the lettered graph.
        source_degrees: Vec<usize>,
        /// Sorted degrees of the table.
        target_degrees: Vec<usize>,
    },

    /// Sorted edge weight multisets differ.
    #[error(
        "weight multiset mismatch: graph {}, table {}",
        multiset(.source_weights),
        multiset(.target_weights)
    )]
    WeightMismatch {
        /// Sorted edge weights of the lettered graph.
        source_weights: Vec<Weight>,
        /// Sorted edge weights of the table.
        target_weights: Vec<Weight>,
    },

    /// A signature class has different sizes in the two graphs.
    #[error(
        "signature group mismatch: {source_count} graph vertices but {target_count} table rows with signature {signature}"
    )]
    SignatureGroupMismatch {
        /// A signature whose class sizes differ.
        signature: Signature,
        /// Lettered vertices with that signature.
        source_count: usize,
        /// Table rows with that signature.
        target_count: usize,
    },

    /// The full search found no structure-preserving mapping.
    #[error("no isomorphism: search exhausted without a complete mapping")]
    NoIsomorphism,
}

fn multiset<T: fmt::Display>(items: &[T]) -> String {
    format!("{{{}}}", items.iter().join(", "))
}

/// Coarse classification of a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The input is inconsistent and must be fixed by the caller.
    Validation,
    /// Disproved from aggregate invariants, without search.
    FastReject,
    /// Disproved by exhausting the search.
    SearchExhausted,
}

impl Failure {
    /// Which stage produced this failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::VertexCountMismatch { .. } | Self::UnknownQueriedVertex { .. } => {
                FailureKind::Validation
            }
            Self::DegreeMismatch { .. }
            | Self::WeightMismatch { .. }
            | Self::SignatureGroupMismatch { .. } => FailureKind::FastReject,
            Self::NoIsomorphism => FailureKind::SearchExhausted,
        }
    }
}

/// Counters gathered during one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Tentative assignments tried by the search.
    pub nodes_visited: u64,
    /// Assignments undone because they led nowhere or were exhausted.
    pub backtracks: u64,
    /// Complete mappings found.
    pub solutions: usize,
}

/// Final state of a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// At least one complete mapping exists.
    Matched(Answer),
    /// No answer, with the reason.
    Failed(Failure),
    /// The step budget ran out before the search finished.
    Aborted {
        /// Search nodes visited before giving up.
        nodes_visited: u64,
    },
}

impl Outcome {
    /// The answer, if matched.
    pub const fn answer(&self) -> Option<&Answer> {
        match self {
            Self::Matched(answer) => Some(answer),
            _ => None,
        }
    }

    /// The failure, if failed.
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// True for [`Outcome::Aborted`].
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Everything a solve call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// The outcome.
    pub outcome: Outcome,
    /// Every complete mapping found, in canonical order.
    pub mappings: Vec<Mapping<Label, Row>>,
    /// Search counters.
    pub stats: SearchStats,
}

impl SolveReport {
    pub(crate) fn failed(failure: Failure, stats: SearchStats) -> Self {
        Self {
            outcome: Outcome::Failed(failure),
            mappings: Vec::new(),
            stats,
        }
    }
}
