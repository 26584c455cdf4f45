//! Top-level engine driver: the host-facing entry point that owns a game,
//! decides when to consult the book (not modeled, see [`EngineConfig::use_book`]),
//! when to hand off to the exact/WLD endgame solver versus the midgame search,
//! and how to allocate a time budget across a game.
//!
//! This module is the seam between [`crate::search::Search`]/[`crate::game_state::GameState`]
//! and a host UI (the `cli` crate's TUI is one such host). It is deliberately
//! thin: all search and board logic lives in their own modules; this file only
//! sequences them the way the teacher's own `search.rs::run` sequences
//! `TimeManager`/`Level`/`SearchOptions` construction, generalized up one level
//! to a whole game rather than a single `run` call.

use crate::board::Board;
use crate::disc::Disc;
use crate::error::EngineError;
use crate::game_state::GameState;
use crate::probcut::Selectivity;
use crate::search::Search;
use crate::search::options::SearchRunOptions;
use crate::search::search_result::SearchResult;
use crate::search::time_control::TimeControlMode;
use crate::square::Square;
use crate::types::Depth;
use crate::{debug_engine, level};

/// Per-color skill and clock configuration (spec §6 "Configuration surface").
#[derive(Clone, Copy, Debug)]
pub struct SideConfig {
    /// Midgame search depth, in plies. `0` means this side is played by a human:
    /// [`Engine::compute_move`] will not search for it and the host must supply
    /// a move via [`Callbacks::get_user_input`] instead.
    pub skill: Depth,
    /// Endgame exact-solve horizon, in empties remaining.
    pub exact_skill: u32,
    /// Endgame WLD-solve horizon, in empties remaining.
    pub wld_skill: u32,
    /// Main time budget, in seconds.
    pub time_s: f64,
    /// Per-move increment, in seconds.
    pub increment_s: f64,
}

impl SideConfig {
    /// A side with no time control and the given fixed skill levels.
    pub const fn untimed(skill: Depth, exact_skill: u32, wld_skill: u32) -> Self {
        SideConfig {
            skill,
            exact_skill,
            wld_skill,
            time_s: 0.0,
            increment_s: 0.0,
        }
    }

    /// A human-controlled side: searches never run for this color.
    pub const fn human() -> Self {
        SideConfig::untimed(0, 0, 0)
    }

    fn is_human(&self) -> bool {
        self.skill == 0
    }
}

/// Configuration surface from spec §6, independent of any single game.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Per-color skill/clock settings, indexed by [`Disc::Black`]/[`Disc::White`].
    pub black: SideConfig,
    pub white: SideConfig,
    /// Deviation tolerance from book, in centi-discs. Not consulted: no book
    /// subsystem is implemented (see [`EngineConfig::use_book`]).
    pub slack: i32,
    /// Amplitude of root-move score noise, in centi-discs (spec §4.7 "Score
    /// perturbation"). A fresh per-square offset vector is drawn from this
    /// amplitude at [`Engine::new`] and at every [`Engine::new_game`]/
    /// [`Engine::load_move_sequence`] call; `0` disables perturbation.
    pub perturbation: i32,
    /// Prefer human-style opening moves. Reserved: no opening-style classifier
    /// is implemented.
    pub human_openings: bool,
    /// Compute evaluations for each of the human player's candidate moves.
    pub practice_mode: bool,
    /// Consult an opening book before searching.
    ///
    /// Always has no effect: this crate implements no book subsystem (`book.cmp.z`
    /// / `book.bin` in the original spec are a persisted, host-owned resource
    /// outside the engine core's concern). Setting this `true` is harmless — book
    /// lookups always report a miss, equivalent to spec §7's silent `BookMiss`.
    pub use_book: bool,
    /// Fixed opening sequence to play, by name. Reserved for the same reason as
    /// `use_book`.
    pub forced_opening: Option<&'static str>,
    /// When a player has only one legal move, play it automatically rather than
    /// invoking [`Callbacks::get_user_input`].
    pub auto_make_forced_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            black: SideConfig::human(),
            white: SideConfig::human(),
            slack: 0,
            perturbation: 0,
            human_openings: false,
            practice_mode: false,
            use_book: false,
            forced_opening: None,
            auto_make_forced_moves: true,
        }
    }
}

impl EngineConfig {
    fn side(&self, color: Disc) -> &SideConfig {
        match color {
            Disc::Black => &self.black,
            Disc::White => &self.white,
        }
    }

    /// Validates that both sides carry a usable configuration before a game
    /// starts. A non-human side with a zero time budget and no increment
    /// still needs *some* depth/selectivity target, so `skill == 0` there
    /// (meaning "human") is the only configuration this accepts as incomplete;
    /// anything else is left to `compute_move` to interpret.
    fn validate(&self) -> Result<(), EngineError> {
        for (name, side) in [("black", &self.black), ("white", &self.white)] {
            if !side.is_human() && side.exact_skill == 0 && side.wld_skill == 0 && side.time_s <= 0.0
            {
                return Err(EngineError::ConfigurationError(format!(
                    "{name}: non-human side has no skill horizon and no time budget"
                )));
            }
        }
        Ok(())
    }
}

/// A user's reply to [`Callbacks::get_user_input`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInput {
    Move(Square),
    Undo,
    Redo,
    SettingsChange,
    Exit,
}

/// Host callback interface (spec §6 "Host-side callbacks the core consumes").
///
/// Every method has a default no-op body so a host only overrides the events
/// it cares about, in the style of the teacher's `SearchProgressCallback`
/// being an optional `Option<Arc<dyn Fn(..)>>` rather than a mandatory trait.
pub trait Callbacks {
    /// Full board, side-to-move, and per-side clocks after any change.
    fn board_update(&mut self, _board: &Board, _side_to_move: Disc) {}
    /// The legal moves available to the side to move.
    fn candidate_moves(&mut self, _moves: &[Square]) {}
    /// Requests a move from the host for a human-controlled side. The default
    /// implementation always exits, since a host that does not override this
    /// cannot supply human moves.
    fn get_user_input(&mut self, _side_to_move: Disc) -> UserInput {
        UserInput::Exit
    }
    fn pass(&mut self, _side: Disc) {}
    fn last_move(&mut self, _mv: Square) {}
    fn opening_name(&mut self, _name: &str) {}
    fn game_start(&mut self) {}
    fn game_over(&mut self) {}
    fn move_start(&mut self, _side_to_move: Disc) {}
    fn move_end(&mut self, _side_to_move: Disc) {}
    /// A formatted evaluation string for the move just searched.
    fn eval_text(&mut self, _text: &str) {}
    /// The principal variation found for the move just searched.
    fn pv(&mut self, _pv: &[Square]) {}
    /// Per-candidate-move evaluations, populated only in
    /// [`EngineConfig::practice_mode`].
    fn candidate_evals(&mut self, _evals: &[(Square, crate::types::Scoref)]) {}
    fn error(&mut self, _message: &str) {}
    fn debug(&mut self, _message: &str) {}
}

/// Outcome of [`Engine::compute_move`] beyond the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A move (or pass, carried by [`GameState`] automatically) was played.
    Played,
    /// The side to move is human; the caller must supply a move via
    /// [`Callbacks::get_user_input`] and call [`Engine::apply_user_move`].
    AwaitingHumanInput,
    /// The game has ended.
    GameOver,
}

/// Owns one game plus the search engine used to compute non-human moves.
pub struct Engine {
    game: GameState,
    search: Search,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration and transposition-table size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if either non-human side has
    /// neither a skill horizon nor a time budget.
    pub fn new(config: EngineConfig, tt_mb_size: usize) -> Result<Self, EngineError> {
        config.validate()?;
        let search_options = crate::search::options::SearchOptions::new(tt_mb_size)
            .perturbation_amplitude(config.perturbation);
        Ok(Engine {
            game: GameState::new(),
            search: Search::new(&search_options),
            config,
        })
    }

    /// The current game position.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Resets to a fresh game in the initial position, clearing the
    /// transposition table and evaluation cache.
    pub fn new_game(&mut self) {
        self.game = GameState::new();
        self.search.init();
    }

    /// Replays a board-input byte sequence (spec §6 "Board input format": each
    /// byte is `10*row + col`, `row, col` in `1..=8`) from the empty board,
    /// resetting any game in progress.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMoveInSequence`] naming the first byte
    /// that does not name a playable square or is not legal when played.
    pub fn load_move_sequence(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        let mut game = GameState::new();
        for (index, &byte) in bytes.iter().enumerate() {
            let sq = Square::from_array_index(byte).ok_or_else(|| {
                EngineError::InvalidMoveInSequence {
                    index,
                    detail: format!("byte {byte} is not a playable square index"),
                }
            })?;
            game.make_move(sq).map_err(|detail| EngineError::InvalidMoveInSequence { index, detail })?;
        }
        self.game = game;
        self.search.init();
        Ok(())
    }

    /// Applies a human-supplied move to the current game.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMoveInSequence`] if the move is illegal.
    pub fn apply_user_move(&mut self, sq: Square) -> Result<(), EngineError> {
        self.game.make_move(sq).map_err(|detail| EngineError::InvalidMoveInSequence {
            index: self.game.move_history().len(),
            detail,
        })
    }

    /// Requests the current search be aborted at its next event check,
    /// equivalent to spec §5's soft `force_return`.
    pub fn request_abort(&self) {
        self.search.abort();
    }

    /// Computes and plays one move for the side to move, per spec §4.8's
    /// handoff logic: exact solve when remaining empties are within
    /// `exact_skill`, WLD solve within `wld_skill`, otherwise a midgame
    /// search to a depth derived from `skill`. If the side to move is human
    /// (`skill == 0`), no search runs and [`MoveOutcome::AwaitingHumanInput`]
    /// is returned instead; the host must call [`Engine::apply_user_move`].
    pub fn compute_move(&mut self, callbacks: &mut dyn Callbacks) -> Result<MoveOutcome, EngineError> {
        if self.game.is_game_over() {
            callbacks.game_over();
            return Ok(MoveOutcome::GameOver);
        }

        let side = self.game.side_to_move();
        let side_cfg = *self.config.side(side);

        callbacks.board_update(self.game.board(), side);
        let moves: Vec<Square> = self.game.board().get_moves().iter().collect();
        callbacks.candidate_moves(&moves);

        if side_cfg.is_human() {
            return Ok(MoveOutcome::AwaitingHumanInput);
        }

        if self.config.auto_make_forced_moves && moves.len() == 1 {
            let only = moves[0];
            self.game.make_move(only).map_err(EngineError::InternalInvariantFailure)?;
            callbacks.last_move(only);
            return Ok(MoveOutcome::Played);
        }

        callbacks.move_start(side);
        let result = self.run_search(&side_cfg, side);
        callbacks.move_end(side);

        let Some(best_move) = result.best_move else {
            debug_engine!("compute_move: search returned no move, position is terminal");
            callbacks.game_over();
            return Ok(MoveOutcome::GameOver);
        };

        callbacks.eval_text(&format_eval(result.score, result.is_endgame));
        callbacks.pv(&result.pv_line);

        if self.config.practice_mode {
            let evals: Vec<_> = result
                .pv_moves
                .iter()
                .map(|pv| (pv.sq, pv.score))
                .collect();
            callbacks.candidate_evals(&evals);
        }

        self.game.make_move(best_move).map_err(EngineError::InternalInvariantFailure)?;
        callbacks.last_move(best_move);
        if self.game.last_move().is_none() {
            callbacks.pass(side.opposite());
        }

        Ok(MoveOutcome::Played)
    }

    fn run_search(&mut self, side_cfg: &SideConfig, side: Disc) -> SearchResult {
        let board = *self.game.board();
        let n_empties = board.get_empty_count();

        if n_empties <= side_cfg.exact_skill {
            debug_engine!("{side:?}: handing off to exact solve at {n_empties} empties");
            return self.search.run(
                &board,
                &SearchRunOptions::with_level(level::Level::perfect(), Selectivity::None),
            );
        }

        if n_empties <= side_cfg.wld_skill {
            debug_engine!("{side:?}: handing off to WLD solve at {n_empties} empties");
            return self.search.run(
                &board,
                &SearchRunOptions::with_level(level::Level::perfect(), Selectivity::Level3),
            );
        }

        if side_cfg.time_s > 0.0 {
            let mode = TimeControlMode::Fischer {
                main_time_ms: (side_cfg.time_s * 1000.0) as u64,
                increment_ms: (side_cfg.increment_s * 1000.0) as u64,
            };
            return self
                .search
                .run(&board, &SearchRunOptions::with_time(mode, Selectivity::None));
        }

        let level = level::get_level(side_cfg.skill.min(24) as usize);
        self.search
            .run(&board, &SearchRunOptions::with_level(level, Selectivity::None))
    }

    /// Runs the game loop to completion: repeatedly computes or requests moves
    /// until the game ends or the host asks to exit. Returns normally on
    /// either a natural game over or [`UserInput::Exit`]; propagates any hard
    /// error from [`Engine::compute_move`]/move application.
    pub fn play_game(&mut self, callbacks: &mut dyn Callbacks) -> Result<(), EngineError> {
        callbacks.game_start();
        loop {
            match self.compute_move(callbacks)? {
                MoveOutcome::Played => continue,
                MoveOutcome::GameOver => return Ok(()),
                MoveOutcome::AwaitingHumanInput => {
                    let side = self.game.side_to_move();
                    match callbacks.get_user_input(side) {
                        UserInput::Move(sq) => self.apply_user_move(sq)?,
                        UserInput::Undo => {
                            self.game.undo();
                        }
                        UserInput::Redo => {}
                        UserInput::SettingsChange => {}
                        UserInput::Exit => return Ok(()),
                    }
                }
            }
        }
    }
}

fn format_eval(score: crate::types::Scoref, is_endgame: bool) -> String {
    if is_endgame {
        format!("{score:+.0}")
    } else {
        format!("{score:+.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(row: u8, col: u8) -> u8 {
        10 * row + col
    }

    #[test]
    fn test_new_engine_defaults_to_human_vs_human() {
        let engine = Engine::new(EngineConfig::default(), 1).unwrap();
        assert_eq!(engine.game().side_to_move(), Disc::Black);
    }

    #[test]
    fn test_validate_rejects_unconfigured_ai_side() {
        let mut config = EngineConfig::default();
        config.black = SideConfig::untimed(0, 0, 0);
        let err = Engine::new(config, 1).unwrap_err();
        assert!(matches!(err, EngineError::ConfigurationError(_)));
    }

    #[test]
    fn test_compute_move_awaits_human_input_for_human_side() {
        let config = EngineConfig::default();
        let mut engine = Engine::new(config, 1).unwrap();
        struct NoopCallbacks;
        impl Callbacks for NoopCallbacks {}
        let outcome = engine.compute_move(&mut NoopCallbacks).unwrap();
        assert_eq!(outcome, MoveOutcome::AwaitingHumanInput);
    }

    #[test]
    fn test_ai_side_plays_a_move_at_shallow_skill() {
        let mut config = EngineConfig::default();
        config.black = SideConfig::untimed(2, 0, 0);
        let mut engine = Engine::new(config, 1).unwrap();
        struct NoopCallbacks;
        impl Callbacks for NoopCallbacks {}
        let outcome = engine.compute_move(&mut NoopCallbacks).unwrap();
        assert_eq!(outcome, MoveOutcome::Played);
        assert_eq!(engine.game().side_to_move(), Disc::White);
    }

    #[test]
    fn test_load_move_sequence_replays_legal_moves() {
        let mut engine = Engine::new(EngineConfig::default(), 1).unwrap();
        let moves = [encode(4, 3), encode(3, 3)];
        engine.load_move_sequence(&moves).unwrap();
        assert_eq!(engine.game().move_history().len(), 2);
    }

    #[test]
    fn test_load_move_sequence_reports_illegal_move() {
        let mut engine = Engine::new(EngineConfig::default(), 1).unwrap();
        let moves = [encode(1, 1)];
        let err = engine.load_move_sequence(&moves).unwrap_err();
        match err {
            EngineError::InvalidMoveInSequence { index, .. } => assert_eq!(index, 0),
            other => panic!("expected InvalidMoveInSequence, got {other:?}"),
        }
    }

    #[test]
    fn test_load_move_sequence_rejects_out_of_range_byte() {
        let mut engine = Engine::new(EngineConfig::default(), 1).unwrap();
        let moves = [0u8];
        let err = engine.load_move_sequence(&moves).unwrap_err();
        assert!(matches!(err, EngineError::InvalidMoveInSequence { index: 0, .. }));
    }
}
