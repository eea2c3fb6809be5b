//! Depth-first backtracking over source vertices.

use std::collections::HashMap;
use std::ops::ControlFlow;

use gmatch_common::{Config, SearchMode};
use tracing::{debug, trace};

use crate::graph::{Graph, NodeId, VertexId};
use crate::outcome::SearchStats;
use crate::prune::CandidateSets;
use crate::state::State;

pub mod heuristics;
pub(crate) use heuristics::most_constrained_order;

/// Why the search stopped before exhausting the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stop {
    /// First-solution mode found its mapping.
    Found,
    /// The step limit was reached.
    StepLimit,
}

/// Raw search result in node handles.
#[derive(Clone, Debug, Default)]
pub(crate) struct SearchOutput {
    pub(crate) found: Vec<HashMap<NodeId, NodeId>>,
    pub(crate) stats: SearchStats,
    pub(crate) aborted: bool,
}

struct SearchContext<'s, 't, 'cfg, S, T> {
    source: &'s Graph<S>,
    target: &'t Graph<T>,
    candidates: &'cfg CandidateSets,
    order: Vec<NodeId>,
    config: &'cfg Config,
}

/// Enumerate isomorphisms from `source` onto `target` within `candidates`.
pub(crate) fn search<S: VertexId, T: VertexId>(
    source: &Graph<S>,
    target: &Graph<T>,
    candidates: &CandidateSets,
    config: &Config,
) -> SearchOutput {
    let ctx = SearchContext {
        source,
        target,
        candidates,
        order: most_constrained_order(source, candidates),
        config,
    };

    let mut st = State::new(source.vertex_count());
    let mut out = SearchOutput::default();
    let flow = backtrack(&ctx, &mut st, 0, &mut out);

    out.aborted = flow == ControlFlow::Break(Stop::StepLimit);
    out.stats.solutions = out.found.len();
    debug!(
        "search finished: {} solutions, {} nodes, {} backtracks{}",
        out.stats.solutions,
        out.stats.nodes_visited,
        out.stats.backtracks,
        if out.aborted { " (aborted)" } else { "" }
    );
    out
}

fn backtrack<S: VertexId, T: VertexId>(
    ctx: &SearchContext<'_, '_, '_, S, T>,
    st: &mut State,
    depth: usize,
    out: &mut SearchOutput,
) -> ControlFlow<Stop> {
    if st.done() {
        out.found.push(st.mappings().clone());
        return match ctx.config.search {
            SearchMode::First => ControlFlow::Break(Stop::Found),
            SearchMode::All => ControlFlow::Continue(()),
        };
    }

    let Some(&s) = ctx.order.get(depth) else {
        return ControlFlow::Continue(());
    };

    // Phase 1: compute candidates with only immutable access to `st`.
    let candidates: Vec<NodeId> = ctx
        .candidates
        .of(s)
        .iter()
        .copied()
        .filter(|&t| !st.is_used_target(t))
        .filter(|&t| consistent(ctx, st, s, t))
        .collect();

    debug!(
        "depth {} vertex {}: {} consistent candidates",
        depth,
        ctx.source.vertex(s),
        candidates.len()
    );

    // Phase 2: iterate candidates and perform scoped mutable updates.
    for t in candidates {
        if ctx
            .config
            .step_limit
            .is_some_and(|limit| out.stats.nodes_visited >= limit)
        {
            return ControlFlow::Break(Stop::StepLimit);
        }
        out.stats.nodes_visited += 1;

        let flow = with_mapping(st, s, t, |st_inner| {
            backtrack(ctx, st_inner, depth + 1, out)
        });

        out.stats.backtracks += 1;
        trace!(
            "backtrack {} -> {}",
            ctx.source.vertex(s),
            ctx.target.vertex(t)
        );

        if let ControlFlow::Break(stop) = flow {
            return ControlFlow::Break(stop);
        }
    }

    ControlFlow::Continue(())
}

/// Scoped helper that maps (s -> t), runs `f`, then unmaps.
fn with_mapping<R>(st: &mut State, s: NodeId, t: NodeId, f: impl FnOnce(&mut State) -> R) -> R {
    st.map(s, t);
    let result = f(st);
    st.unmap(s, t);
    result
}

/// Whether `s -> t` agrees with every assignment already made.
///
/// Mapped source neighbors of `s` must land on target neighbors of `t`
/// (with equal weight in weighted mode), and mapped target neighbors of `t`
/// must come from source neighbors of `s`.
fn consistent<S: VertexId, T: VertexId>(
    ctx: &SearchContext<'_, '_, '_, S, T>,
    st: &State,
    s: NodeId,
    t: NodeId,
) -> bool {
    let weighted = ctx.config.weights.is_weighted();

    let forward = ctx.source.node_neighbors(s).all(|(s2, weight)| {
        let Some(t2) = st.mapped_to(s2) else {
            return true;
        };
        match ctx.target.weight_between(t, t2) {
            None => false,
            Some(w) => !weighted || w == weight,
        }
    });
    if !forward {
        return false;
    }

    ctx.target
        .node_neighbors(t)
        .all(|(t2, _)| st.preimage(t2).is_none_or(|s2| ctx.source.has_edge(s, s2)))
}
