//! Root-move score perturbation (spec.md §4.7 "Score perturbation").
//!
//! A process-wide amplitude `A` (centi-discs) may be configured; at game
//! start a vector of per-square random offsets in `[-A/2, A/2]` is drawn.
//! Each root move's returned score is shifted by its square's offset before
//! the driver compares moves to pick the best one. This gives weaker skill
//! levels a varied repertoire of moves without ever preferring an outright
//! losing move over a winning one: offsets are suppressed once a score
//! reaches midgame-win magnitude.

use rand::Rng;

use crate::square::Square;
use crate::types::ScaledScore;

/// Per-square score offsets, drawn once per game.
#[derive(Clone)]
pub struct Perturbation {
    offsets: [ScaledScore; 64],
}

impl Perturbation {
    /// No perturbation: every offset is zero, `apply` is a no-op.
    pub fn none() -> Self {
        Perturbation {
            offsets: [ScaledScore::ZERO; 64],
        }
    }

    /// Draws a fresh offset vector with amplitude `amplitude_centidiscs`.
    ///
    /// An amplitude of zero (or negative) is equivalent to [`Perturbation::none`].
    pub fn new(amplitude_centidiscs: i32) -> Self {
        if amplitude_centidiscs <= 0 {
            return Self::none();
        }
        let half = amplitude_centidiscs / 2;
        let mut rng = rand::rng();
        let mut offsets = [ScaledScore::ZERO; 64];
        for o in offsets.iter_mut() {
            *o = ScaledScore::new(rng.random_range(-half..=half));
        }
        Perturbation { offsets }
    }

    /// Offset for `sq` given its unperturbed `score`, or zero once `score`
    /// reaches midgame-win magnitude (a proven win/loss must never be
    /// reordered by perturbation).
    pub fn offset(&self, sq: Square, score: ScaledScore) -> ScaledScore {
        if score >= ScaledScore::MAX || score <= -ScaledScore::MAX {
            return ScaledScore::ZERO;
        }
        self.offsets[sq.index()]
    }

    /// `score` shifted by `sq`'s offset.
    pub fn apply(&self, sq: Square, score: ScaledScore) -> ScaledScore {
        score + self.offset(sq, score)
    }
}

impl Default for Perturbation {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_never_perturbs() {
        let p = Perturbation::none();
        for sq in [Square::A1, Square::D4, Square::H8] {
            assert_eq!(p.apply(sq, ScaledScore::from_disc_diff(5)), ScaledScore::from_disc_diff(5));
        }
    }

    #[test]
    fn amplitude_bounds_the_offset() {
        let p = Perturbation::new(256);
        for sq_idx in 0..64u8 {
            let sq = Square::from_u8_unchecked(sq_idx);
            let offset = p.offset(sq, ScaledScore::ZERO);
            assert!(offset.value().abs() <= 128, "offset {} out of bounds", offset.value());
        }
    }

    #[test]
    fn suppressed_at_win_magnitude() {
        let p = Perturbation::new(1000);
        assert_eq!(p.offset(Square::A1, ScaledScore::MAX), ScaledScore::ZERO);
        assert_eq!(p.offset(Square::A1, -ScaledScore::MAX), ScaledScore::ZERO);
    }

    #[test]
    fn zero_amplitude_is_none() {
        let p = Perturbation::new(0);
        assert_eq!(p.apply(Square::D4, ScaledScore::from_disc_diff(3)), ScaledScore::from_disc_diff(3));
    }
}
