//! Matching a lettered graph onto a numbered table.
//!
//! Validation, fast rejection, the backtracking search and aggregation run
//! in that order; each later stage only starts when the earlier ones passed.

use gmatch_common::{Config, ParsedProblem, SearchMode};
use tracing::info;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::aggregate::aggregate;
use crate::graph::{Graph, GraphError, Label, LetteredGraph, Row, TableGraph};
use crate::mapping::Mapping;
use crate::outcome::{Failure, Outcome, SearchStats, SolveReport};
use crate::prune::prune;
use crate::search::search;

/// Entry point for one lettered graph and one table.
pub struct GraphMatcher<'s, 't, 'cfg> {
    /// The lettered graph.
    source: &'s LetteredGraph,
    /// The numbered table.
    target: &'t TableGraph,
    /// Configuration settings for the matcher.
    config: &'cfg Config,
}

impl<'s, 't, 'cfg> GraphMatcher<'s, 't, 'cfg> {
    /// Prepare a matcher of `source` onto `target` under `config`.
    pub fn new(source: &'s LetteredGraph, target: &'t TableGraph, config: &'cfg Config) -> Self {
        Self {
            source,
            target,
            config,
        }
    }

    /// Find which rows the `queried` labels can occupy.
    ///
    /// Never fails: every business outcome, including "no isomorphism" and
    /// an exhausted step budget, is reported through [`Outcome`].
    pub fn solve(&self, queried: &[Label]) -> SolveReport {
        info!(
            "starting graph match: graph vertices: {}, table rows: {}, queried: {}",
            self.source.vertex_count(),
            self.target.vertex_count(),
            queried.len()
        );

        let report = self.solve_inner(queried);

        match &report.outcome {
            Outcome::Matched(answer) => info!(
                "match complete: {} mappings, answer {}",
                report.mappings.len(),
                answer.joined()
            ),
            Outcome::Failed(failure) => info!("match failed: {}", failure),
            Outcome::Aborted { nodes_visited } => {
                info!("match aborted after {} search nodes", nodes_visited)
            }
        }
        report
    }

    fn solve_inner(&self, queried: &[Label]) -> SolveReport {
        if let Some(failure) = self.validate(queried) {
            return SolveReport::failed(failure, SearchStats::default());
        }

        let candidates = match prune(self.source, self.target, self.config.weights) {
            Ok(candidates) => candidates,
            Err(failure) => return SolveReport::failed(failure, SearchStats::default()),
        };

        let out = search(self.source, self.target, &candidates, self.config);

        let mut mappings: Vec<Mapping<Label, Row>> = out
            .found
            .iter()
            .map(|nodes| Mapping::from_nodes(self.source, self.target, nodes))
            .collect();
        mappings.sort_unstable();

        let outcome = if out.aborted {
            Outcome::Aborted {
                nodes_visited: out.stats.nodes_visited,
            }
        } else if mappings.is_empty() {
            Outcome::Failed(Failure::NoIsomorphism)
        } else {
            let exhaustive = self.config.search == SearchMode::All;
            Outcome::Matched(aggregate(&mappings, queried, exhaustive))
        };

        SolveReport {
            outcome,
            mappings,
            stats: out.stats,
        }
    }

    fn validate(&self, queried: &[Label]) -> Option<Failure> {
        let source_count = self.source.vertex_count();
        let target_count = self.target.vertex_count();
        if source_count != target_count {
            return Some(Failure::VertexCountMismatch {
                source_count,
                target_count,
            });
        }

        let mut unknown: Vec<String> = queried
            .iter()
            .filter(|label| !self.source.contains(label))
            .map(|label| label.to_string())
            .collect();
        if unknown.is_empty() {
            return None;
        }
        unknown.sort_unstable();
        unknown.dedup();
        Some(Failure::UnknownQueriedVertex { labels: unknown })
    }
}

/// Build both graphs of a parsed task and solve it.
///
/// Only malformed structure (self-loops, conflicting weights, asymmetric
/// tables) is an `Err`; everything else is in the report.
pub fn solve_problem(problem: &ParsedProblem, config: &Config) -> Result<SolveReport, GraphError> {
    let source = Graph::from_edge_lines(&problem.edges)?;
    let target = Graph::from_matrix(&problem.matrix)?;
    let queried: Vec<Label> = problem
        .queries
        .iter()
        .map(|q| Label::from(q.as_str()))
        .collect();

    Ok(GraphMatcher::new(&source, &target, config).solve(&queried))
}

/// Solve independent tasks, in parallel with the `rayon` feature.
pub fn solve_batch(
    problems: &[ParsedProblem],
    config: &Config,
) -> Vec<Result<SolveReport, GraphError>> {
    #[cfg(feature = "rayon")]
    let iter = problems.par_iter();

    #[cfg(not(feature = "rayon"))]
    let iter = problems.iter();

    iter.map(|problem| solve_problem(problem, config)).collect()
}
