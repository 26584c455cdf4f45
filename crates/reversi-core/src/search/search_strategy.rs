//! Phase-specific search behavior.
//!
//! [`search::search`](crate::search::search) is generic over a [`SearchStrategy`] so the
//! midgame and endgame drivers can share one negascout implementation while still
//! diverging on the handful of points where the two phases genuinely differ: how deep to
//! go before dropping to a specialized leaf search, when ETC/ProbCut are worth trying, and
//! what "evaluate this position" means.

use std::sync::Arc;

use crate::board::Board;
use crate::search::search_context::SearchContext;
use crate::search::threading::Thread;
use crate::types::{Depth, ScaledScore};

/// A search phase (midgame or endgame), providing the constants and leaf behavior
/// [`search`](crate::search::search) needs but cannot know at the generic level.
pub trait SearchStrategy {
    /// Whether this is the endgame (perfect disc-count) phase rather than the
    /// heuristic-evaluator midgame phase.
    const IS_ENDGAME: bool;

    /// Remaining depth at or below which NonPV nodes drop to [`Self::shallow_search`]
    /// instead of continuing the generic move loop.
    const DEPTH_TO_SHALLOW: Depth;

    /// Minimum depth at which the enhanced transposition cutoff is attempted.
    const MIN_ETC_DEPTH: Depth;

    /// Minimum depth at which ProbCut is attempted.
    const MIN_PROBCUT_DEPTH: Depth;

    /// Whether Score-Based Reduction is applied to move ordering in the main loop.
    const USE_SBR: bool;

    /// Evaluates a leaf position from the point of view of the player to move.
    fn evaluate(ctx: &SearchContext, board: &Board) -> ScaledScore;

    /// Specialized leaf search used once remaining depth reaches [`Self::DEPTH_TO_SHALLOW`].
    fn shallow_search(
        ctx: &mut SearchContext,
        board: &Board,
        depth: Depth,
        alpha: ScaledScore,
        beta: ScaledScore,
    ) -> ScaledScore;

    /// Phase-specific ProbCut. Returns `Some(score)` when the cut succeeds.
    fn probcut(
        ctx: &mut SearchContext,
        board: &Board,
        depth: Depth,
        beta: ScaledScore,
        thread: &Arc<Thread>,
    ) -> Option<ScaledScore>;
}

/// Midgame search phase: heuristic evaluation, Score-Based Reduction enabled, ETC
/// disabled (midgame positions are deep and varied enough that the TT's own cutoff
/// already captures most of the benefit; see spec.md §4.4).
pub struct MidGameStrategy;

impl SearchStrategy for MidGameStrategy {
    const IS_ENDGAME: bool = false;
    const DEPTH_TO_SHALLOW: Depth = 2;
    const MIN_ETC_DEPTH: Depth = Depth::MAX;
    const MIN_PROBCUT_DEPTH: Depth = 5;
    const USE_SBR: bool = true;

    #[inline(always)]
    fn evaluate(ctx: &SearchContext, board: &Board) -> ScaledScore {
        crate::search::midgame::evaluate(ctx, board)
    }

    fn shallow_search(
        ctx: &mut SearchContext,
        board: &Board,
        depth: Depth,
        alpha: ScaledScore,
        beta: ScaledScore,
    ) -> ScaledScore {
        match depth {
            0 => Self::evaluate(ctx, board),
            1 => crate::search::midgame::evaluate_depth1(ctx, board, alpha, beta),
            _ => crate::search::midgame::evaluate_depth2(ctx, board, alpha, beta),
        }
    }

    #[inline(always)]
    fn probcut(
        ctx: &mut SearchContext,
        board: &Board,
        depth: Depth,
        beta: ScaledScore,
        thread: &Arc<Thread>,
    ) -> Option<ScaledScore> {
        crate::search::midgame::probcut(ctx, board, depth, beta, thread)
    }
}

/// Endgame search phase: exact disc-count evaluation, ETC enabled (endgame subtrees are
/// transposition-heavy), Score-Based Reduction disabled (every ply must resolve to an
/// exact score once within solving range).
pub struct EndGameStrategy;

impl SearchStrategy for EndGameStrategy {
    const IS_ENDGAME: bool = true;
    const DEPTH_TO_SHALLOW: Depth = crate::search::endgame::DEPTH_TO_NWS;
    const MIN_ETC_DEPTH: Depth = 9;
    const MIN_PROBCUT_DEPTH: Depth = 10;
    const USE_SBR: bool = false;

    #[inline(always)]
    fn evaluate(_ctx: &SearchContext, board: &Board) -> ScaledScore {
        board.final_score_scaled()
    }

    fn shallow_search(
        ctx: &mut SearchContext,
        board: &Board,
        _depth: Depth,
        alpha: ScaledScore,
        _beta: ScaledScore,
    ) -> ScaledScore {
        // Every caller of `shallow_search` is a NonPV node (the Root/PV generic search
        // path only drops out of the main loop at `depth == 0`, handled separately), so
        // this is always a null-window probe: beta == alpha + 1. Depth is implied by
        // `ctx.empty_list.count`, matching `depth` by construction in the endgame phase.
        let score = crate::search::endgame::null_window_search(ctx, board, alpha.to_disc_diff());
        ScaledScore::from_disc_diff(score)
    }

    #[inline(always)]
    fn probcut(
        ctx: &mut SearchContext,
        board: &Board,
        depth: Depth,
        beta: ScaledScore,
        thread: &Arc<Thread>,
    ) -> Option<ScaledScore> {
        crate::search::endgame::probcut(ctx, board, depth, beta, thread)
    }
}
