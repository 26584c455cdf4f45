//! Static position evaluation.
//!
//! The engine's core (move generation, hashing, search, endgame solving) does not depend
//! on any particular evaluation function — spec-wise any static evaluator is sufficient.
//! This module provides a lightweight heuristic evaluator (mobility + potential mobility +
//! corner stability + square weights) in place of a trained network, plus a small
//! hash-keyed cache so repeated positions in the search tree are not re-evaluated.

use crate::board::Board;
use crate::types::ScaledScore;

pub mod eval_cache;

use eval_cache::EvalCache;

/// A static position evaluator.
///
/// Implementations return a [`ScaledScore`] from the point of view of the player to move
/// (i.e. positive favors `board.player`).
pub trait Evaluator {
    /// Evaluates the given position.
    fn evaluate(&self, board: &Board) -> ScaledScore;

    /// Clears any internal cache. A no-op for evaluators that don't cache.
    fn clear_cache(&self) {}
}

/// Square weight table used by the heuristic evaluator (and by move ordering in
/// [`crate::move_list`]). Corners are valuable, squares adjacent to an empty corner
/// (X-squares/C-squares) are dangerous to play early.
#[rustfmt::skip]
const SQUARE_VALUE: [i32; 64] = [
    18,  4, 16, 12, 12, 16,  4, 18,
     4,  2,  6,  8,  8,  6,  2,  4,
    16,  6, 14, 10, 10, 14,  6, 16,
    12,  8, 10,  0,  0, 10,  8, 12,
    12,  8, 10,  0,  0, 10,  8, 12,
    16,  6, 14, 10, 10, 14,  6, 16,
     4,  2,  6,  8,  8,  6,  2,  4,
    18,  4, 16, 12, 12, 16,  4, 18,
];

const SQUARE_VALUE_WEIGHT: i32 = 1 << 6;
const CORNER_STABILITY_WEIGHT: i32 = 1 << 10;
const MOBILITY_WEIGHT: i32 = 1 << 8;
const POTENTIAL_MOBILITY_WEIGHT: i32 = 1 << 6;
const DISC_DIFF_WEIGHT: i32 = 1 << 4;

/// A simple, fast static evaluator combining mobility, potential mobility, corner
/// stability and positional square weights.
///
/// This is the engine's default evaluator, used both for full-depth leaf evaluation
/// and (via [`Eval::evaluate_simple`]) for one-ply quick-move fallbacks.
pub struct HeuristicEvaluator {
    cache: EvalCache,
}

impl HeuristicEvaluator {
    /// Creates a new evaluator with its own evaluation cache.
    pub fn new() -> Self {
        HeuristicEvaluator {
            cache: EvalCache::new(17),
        }
    }

    fn raw_evaluate(board: &Board) -> ScaledScore {
        let (moves, potential) = board.get_moves_and_potential();
        let (opp_moves, opp_potential) = board.switch_players().get_moves_and_potential();

        let mobility = moves.corner_weighted_count() as i32;
        let opp_mobility = opp_moves.corner_weighted_count() as i32;
        let potential_mobility = potential.corner_weighted_count() as i32;
        let opp_potential_mobility = opp_potential.corner_weighted_count() as i32;

        let corner_stability = board.player.corner_stability() as i32;
        let opp_corner_stability = board.opponent.corner_stability() as i32;

        let mut value = 0i32;
        value += (mobility - opp_mobility) * MOBILITY_WEIGHT;
        value += (potential_mobility - opp_potential_mobility) * POTENTIAL_MOBILITY_WEIGHT;
        value += (corner_stability - opp_corner_stability) * CORNER_STABILITY_WEIGHT;

        for sq in board.player.into_iter() {
            value += SQUARE_VALUE[sq.index()] * SQUARE_VALUE_WEIGHT;
        }
        for sq in board.opponent.into_iter() {
            value -= SQUARE_VALUE[sq.index()] * SQUARE_VALUE_WEIGHT;
        }

        let disc_diff = board.player.count() as i32 - board.opponent.count() as i32;
        value += disc_diff * DISC_DIFF_WEIGHT;

        ScaledScore::new(value).clamp(
            ScaledScore::MIN + ScaledScore::SCALE,
            ScaledScore::MAX - ScaledScore::SCALE,
        )
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board) -> ScaledScore {
        let key = board.hash();
        if let Some(score) = self.cache.probe(key) {
            return score;
        }

        let score = Self::raw_evaluate(board);
        self.cache.store(key, score);
        score
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// The evaluator type used throughout the engine.
///
/// Kept as a type alias (rather than inlining [`HeuristicEvaluator`] at every call site)
/// so a different [`Evaluator`] implementation can be swapped in without touching the
/// search code.
pub type Eval = HeuristicEvaluator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_is_symmetric() {
        let eval = HeuristicEvaluator::new();
        let board = Board::default();
        // The standard starting position is symmetric between the two sides.
        assert_eq!(eval.evaluate(&board), ScaledScore::ZERO);
    }

    #[test]
    fn test_cache_roundtrip() {
        let eval = HeuristicEvaluator::new();
        let board = Board::default();
        let first = eval.evaluate(&board);
        let second = eval.evaluate(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_cache() {
        let eval = HeuristicEvaluator::new();
        let board = Board::default();
        eval.evaluate(&board);
        eval.clear_cache();
        // Still produces the same deterministic result after clearing.
        assert_eq!(eval.evaluate(&board), HeuristicEvaluator::raw_evaluate(&board));
    }
}
