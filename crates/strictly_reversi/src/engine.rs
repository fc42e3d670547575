//! Reversi game engine.
//!
//! One engine serves both board shapes; the [`Topology`] supplies the
//! geometry and [`rules`](crate::rules) supplies the capture math.

use crate::board::{Board, Cell, Coord};
use crate::error::{ReversiError, ReversiResult};
use crate::events::{EventBus, GameEvent, GameListener};
use crate::rules::{self, TerminalReason};
use crate::topology::Topology;
use crate::types::{Color, Outcome, Scores};
use tracing::{debug, info, instrument, warn};

/// State changed by one applied move, enough to take it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MoveUndo {
    placed: Coord,
    flipped: Vec<Coord>,
    turn: Color,
    pass_count: u32,
}

/// Reversi engine owning the board and turn state.
///
/// Lifecycle: created not started, [`game_started`](Self::game_started)
/// builds and seeds the board, and the game is over once
/// [`is_game_over`](Self::is_game_over) holds.
///
/// `Clone` yields an independent engine with the same board, turn and
/// pass count but no subscribers.
#[derive(Debug, Clone)]
pub struct ReversiEngine {
    topology: Topology,
    size: usize,
    board: Option<Board>,
    turn: Color,
    pass_count: u32,
    black_hints: bool,
    white_hints: bool,
    over_announced: bool,
    events: EventBus,
}

impl ReversiEngine {
    /// Creates an engine that has not started yet.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid for the topology.
    #[instrument]
    pub fn new(topology: Topology, size: usize) -> ReversiResult<Self> {
        topology.validate_size(size)?;
        debug!("Engine created");
        Ok(Self {
            topology,
            size,
            board: None,
            turn: Color::Black,
            pass_count: 0,
            black_hints: false,
            white_hints: false,
            over_announced: false,
            events: EventBus::new(),
        })
    }

    /// Resumes a started game from an existing position.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid or the board
    /// does not cover exactly this topology's cells.
    #[instrument(skip(board), fields(cells = board.len()))]
    pub fn from_board(
        topology: Topology,
        size: usize,
        board: Board,
        to_move: Color,
    ) -> ReversiResult<Self> {
        let mut engine = Self::new(topology, size)?;
        let expected = topology.coordinates(size)?;
        if board.len() != expected.len() || !expected.iter().all(|&at| board.exists(at)) {
            return Err(ReversiError::argument(format!(
                "Board does not match a {} board of size {}",
                topology, size
            )));
        }
        engine.board = Some(board);
        engine.turn = to_move;
        Ok(engine)
    }

    /// Creates a hexagonal engine.
    pub fn hex(size: usize) -> ReversiResult<Self> {
        Self::new(Topology::Hex, size)
    }

    /// Creates a square engine.
    pub fn square(size: usize) -> ReversiResult<Self> {
        Self::new(Topology::Square, size)
    }

    /// Subscribes to engine events.
    pub fn add_listener(&mut self, listener: impl GameListener + 'static) {
        self.events.subscribe(Box::new(listener));
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Builds and seeds the board; Black moves first.
    ///
    /// Calling it again restarts the game on a fresh board.
    ///
    /// # Errors
    ///
    /// Propagates board construction failures.
    #[instrument(skip(self), fields(topology = %self.topology, size = self.size))]
    pub fn game_started(&mut self) -> ReversiResult<()> {
        self.board = Some(self.topology.initial_board(self.size)?);
        self.turn = Color::Black;
        self.pass_count = 0;
        self.black_hints = false;
        self.white_hints = false;
        self.over_announced = false;
        info!("Game started");
        self.events.publish(GameEvent::GameStarted);
        self.events.publish(GameEvent::TurnChanged(self.turn));
        self.announce_if_over()?;
        Ok(())
    }

    /// Checks if the board has been built.
    pub fn is_started(&self) -> bool {
        self.board.is_some()
    }

    /// Returns the board.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn board(&self) -> ReversiResult<&Board> {
        self.board
            .as_ref()
            .ok_or_else(|| ReversiError::state("Game has not started"))
    }

    fn board_mut(&mut self) -> ReversiResult<&mut Board> {
        self.board
            .as_mut()
            .ok_or_else(|| ReversiError::state("Game has not started"))
    }

    // ─────────────────────────────────────────────────────────────
    //  Read queries
    // ─────────────────────────────────────────────────────────────

    /// Board topology.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Board size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Corner cells for this board, in preference order.
    ///
    /// # Errors
    ///
    /// Propagates [`Topology::corners`] failures.
    pub fn corners(&self) -> ReversiResult<Vec<Coord>> {
        self.topology.corners(self.size)
    }

    /// Consecutive forced passes so far.
    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }

    /// Colour to move.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn current_player(&self) -> ReversiResult<Color> {
        self.board()?;
        Ok(self.turn)
    }

    /// Disc counts.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn scores(&self) -> ReversiResult<Scores> {
        Ok(self.board()?.scores())
    }

    /// Checks if a coordinate is on the board.
    pub fn exists(&self, coord: Coord) -> bool {
        self.board.as_ref().is_some_and(|board| board.exists(coord))
    }

    /// Gets a cell.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts and a `NotFound`
    /// error for coordinates off the board.
    pub fn get(&self, coord: Coord) -> ReversiResult<Cell> {
        self.board()?.get(coord)
    }

    /// Checks if `player` may place a disc at `coord`.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn is_legal(&self, coord: Coord, player: Color) -> ReversiResult<bool> {
        Ok(rules::is_legal(self.board()?, self.topology, coord, player))
    }

    /// Every legal cell for `player`, in upper-left order.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn legal_moves(&self, player: Color) -> ReversiResult<Vec<Coord>> {
        Ok(rules::legal_moves(self.board()?, self.topology, player))
    }

    /// Checks if the player to move has a legal cell.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn has_valid_moves(&self) -> ReversiResult<bool> {
        Ok(rules::has_legal_move(self.board()?, self.topology, self.turn))
    }

    /// Discs `player` would capture at `coord`; never mutates.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn capture_cells(&self, coord: Coord, player: Color) -> ReversiResult<usize> {
        Ok(rules::capture_cells(self.board()?, self.topology, coord, player))
    }

    /// Which terminal clause holds, if any.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn terminal_reason(&self) -> ReversiResult<Option<TerminalReason>> {
        Ok(rules::terminal_reason(
            self.board()?,
            self.topology,
            self.turn,
            self.pass_count,
        ))
    }

    /// Checks the terminal predicate.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    #[instrument(skip(self))]
    pub fn is_game_over(&self) -> ReversiResult<bool> {
        Ok(self.terminal_reason()?.is_some())
    }

    /// The terminal clause that ends play for good, if any.
    ///
    /// Unlike [`terminal_reason`](Self::terminal_reason), a stalled mover
    /// does not count: the game resumes once they pass.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn final_reason(&self) -> ReversiResult<Option<TerminalReason>> {
        Ok(self
            .terminal_reason()?
            .filter(|reason| !reason.allows_pass()))
    }

    /// Decides the finished game.
    ///
    /// # Errors
    ///
    /// Returns a `State` error unless the game is over.
    #[instrument(skip(self))]
    pub fn return_winner(&self) -> ReversiResult<Outcome> {
        if !self.is_game_over()? {
            return Err(ReversiError::state("Game is not over"));
        }
        Ok(self.scores()?.outcome())
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Places a disc for the player to move and flips every sandwich.
    ///
    /// # Errors
    ///
    /// - `State` if the game has not started, is over, or the cell is occupied
    /// - `NotFound` if the coordinate is off the board
    /// - `Argument` if the cell closes no sandwich
    #[instrument(skip(self), fields(player = %self.turn))]
    pub fn make_move(&mut self, coord: Coord) -> ReversiResult<()> {
        if let Some(reason) = self.terminal_reason()? {
            warn!(%reason, "Move rejected, game is over");
            return Err(ReversiError::state(format!("Game is over ({})", reason)));
        }
        let cell = self.get(coord)?;
        if !cell.is_empty() {
            return Err(ReversiError::state(format!("Cell {} is not empty", coord)));
        }
        if !self.is_legal(coord, self.turn)? {
            return Err(ReversiError::argument(format!(
                "{} cannot capture anything from {}",
                self.turn, coord
            )));
        }

        let undo = self.apply_unchecked(coord)?;
        debug!(flipped = undo.flipped.len(), "Move applied");

        self.events.publish(GameEvent::ScoreUpdated);
        self.events.publish(GameEvent::TurnChanged(self.turn));
        self.announce_if_over()?;
        Ok(())
    }

    /// Passes the turn if, and only if, the player to move is stuck.
    ///
    /// A player with a legal move cannot pass; the call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts, or when the game
    /// is over for any reason other than the mover being stuck.
    #[instrument(skip(self), fields(player = %self.turn, passes = self.pass_count))]
    pub fn wanna_pass(&mut self) -> ReversiResult<()> {
        if let Some(reason) = self.final_reason()? {
            return Err(ReversiError::state(format!(
                "Cannot pass, game is over ({})",
                reason
            )));
        }
        if self.has_valid_moves()? {
            debug!("Pass ignored, legal moves exist");
            return Ok(());
        }

        self.pass_count += 1;
        self.turn = self.turn.opponent();
        info!(passes = self.pass_count, "Forced pass");

        self.events.publish(GameEvent::TurnChanged(self.turn));
        self.events.publish(GameEvent::ScoreUpdated);
        self.announce_if_over()?;
        Ok(())
    }

    /// Hands the turn to the other colour.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts, or when the game
    /// is over for any reason other than the mover being stuck.
    #[instrument(skip(self), fields(player = %self.turn))]
    pub fn switch_player(&mut self) -> ReversiResult<()> {
        if let Some(reason) = self.final_reason()? {
            warn!(%reason, "Turn switch rejected, game is over");
            return Err(ReversiError::state(format!(
                "Cannot switch turns, game is over ({})",
                reason
            )));
        }
        self.turn = self.turn.opponent();
        self.events.publish(GameEvent::TurnChanged(self.turn));
        self.announce_if_over()?;
        Ok(())
    }

    /// Publishes `GameOver` the first time play has ended for good.
    ///
    /// A stalled mover is not the end: the pass that follows resumes play.
    fn announce_if_over(&mut self) -> ReversiResult<()> {
        if !self.over_announced && self.final_reason()?.is_some() {
            self.over_announced = true;
            let outcome = self.scores()?.outcome();
            info!(%outcome, "Game over");
            self.events.publish(GameEvent::GameOver(outcome));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Hints
    // ─────────────────────────────────────────────────────────────

    /// Toggles hints for `color`.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts or when it is not
    /// `color`'s turn.
    #[instrument(skip(self))]
    pub fn toggle_hints(&mut self, color: Color) -> ReversiResult<()> {
        if self.current_player()? != color {
            return Err(ReversiError::state(format!(
                "Not {}'s turn, cannot show hints for the opponent",
                color
            )));
        }
        match color {
            Color::Black => self.black_hints = !self.black_hints,
            Color::White => self.white_hints = !self.white_hints,
        }
        Ok(())
    }

    /// Checks if hints are on for `color`.
    pub fn hints_enabled(&self, color: Color) -> bool {
        match color {
            Color::Black => self.black_hints,
            Color::White => self.white_hints,
        }
    }

    /// Legal cells for `color` with the discs each would capture.
    ///
    /// # Errors
    ///
    /// Returns a `State` error before the game starts.
    pub fn hints(&self, color: Color) -> ReversiResult<Vec<(Coord, usize)>> {
        let board = self.board()?;
        Ok(rules::legal_moves(board, self.topology, color)
            .into_iter()
            .map(|at| (at, rules::capture_cells(board, self.topology, at, color)))
            .collect())
    }

    // ─────────────────────────────────────────────────────────────
    //  Search support
    // ─────────────────────────────────────────────────────────────

    /// Applies a move already known to be legal, without events.
    pub(crate) fn apply_unchecked(&mut self, coord: Coord) -> ReversiResult<MoveUndo> {
        let player = self.turn;
        let flipped = rules::discs_to_flip(self.board()?, self.topology, coord, player);
        let board = self.board_mut()?;
        board.set_occupant(coord, player)?;
        for &at in &flipped {
            board.flip(at)?;
        }
        let undo = MoveUndo {
            placed: coord,
            flipped,
            turn: player,
            pass_count: self.pass_count,
        };
        self.turn = player.opponent();
        self.pass_count = 0;
        Ok(undo)
    }

    /// Reverts a move made by [`apply_unchecked`](Self::apply_unchecked).
    ///
    /// Emptying a cell breaks the live-game occupancy rule, so this is
    /// only ever called on a private search copy.
    pub(crate) fn undo(&mut self, undo: MoveUndo) -> ReversiResult<()> {
        let board = self.board_mut()?;
        for &at in &undo.flipped {
            board.flip(at)?;
        }
        board.clear(undo.placed)?;
        self.turn = undo.turn;
        self.pass_count = undo.pass_count;
        Ok(())
    }

    /// Sets the colour to move on a search copy.
    pub(crate) fn force_turn(&mut self, color: Color) {
        self.turn = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReversiErrorKind;
    use crate::testing::position;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn started(topology: Topology, size: usize) -> ReversiEngine {
        let mut engine = ReversiEngine::new(topology, size).unwrap();
        engine.game_started().unwrap();
        engine
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(ReversiEngine::hex(0).is_err());
        assert!(ReversiEngine::square(0).is_err());
    }

    #[test]
    fn test_queries_before_start_fail() {
        let engine = ReversiEngine::hex(3).unwrap();
        assert!(!engine.is_started());
        assert!(matches!(
            engine.is_game_over().unwrap_err().kind(),
            ReversiErrorKind::State(_)
        ));
        assert!(matches!(
            engine.get(Coord::new(0, 0)).unwrap_err().kind(),
            ReversiErrorKind::State(_)
        ));
        assert!(!engine.exists(Coord::new(0, 0)));
    }

    #[test]
    fn test_move_before_start_fails() {
        let mut engine = ReversiEngine::square(8).unwrap();
        let err = engine.make_move(Coord::new(5, 3)).unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::State(_)));
    }

    #[test]
    fn test_move_on_occupied_cell_is_state_error() {
        let mut engine = started(Topology::Square, 8);
        let err = engine.make_move(Coord::new(3, 3)).unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::State(_)));
    }

    #[test]
    fn test_illegal_move_is_argument_error() {
        let mut engine = started(Topology::Square, 8);
        let err = engine.make_move(Coord::new(0, 0)).unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::Argument(_)));
        assert_eq!(engine.scores().unwrap(), Scores::new(2, 2));
        assert_eq!(engine.current_player().unwrap(), Color::Black);
    }

    #[test]
    fn test_off_board_move_is_not_found() {
        let mut engine = started(Topology::Hex, 2);
        let err = engine.make_move(Coord::new(2, 2)).unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::NotFound(_)));
    }

    #[test]
    fn test_move_resets_pass_count() {
        let mut engine = started(Topology::Hex, 3);
        engine.pass_count = 1;
        engine.make_move(Coord::new(1, -2)).unwrap();
        assert_eq!(engine.pass_count(), 0);
    }

    #[test]
    fn test_apply_and_undo_restore_state() {
        let mut engine = started(Topology::Square, 8);
        let before = engine.board().unwrap().clone();
        let undo = engine.apply_unchecked(Coord::new(5, 3)).unwrap();
        assert_ne!(engine.board().unwrap(), &before);
        assert_eq!(engine.current_player().unwrap(), Color::White);

        engine.undo(undo).unwrap();
        assert_eq!(engine.board().unwrap(), &before);
        assert_eq!(engine.current_player().unwrap(), Color::Black);
    }

    #[test]
    fn test_events_in_order() {
        let mut engine = ReversiEngine::square(8).unwrap();
        let seen = recorder(&mut engine);

        engine.game_started().unwrap();
        engine.make_move(Coord::new(5, 3)).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                GameEvent::GameStarted,
                GameEvent::TurnChanged(Color::Black),
                GameEvent::ScoreUpdated,
                GameEvent::TurnChanged(Color::White),
            ]
        );
    }

    fn recorder(engine: &mut ReversiEngine) -> Rc<RefCell<Vec<GameEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.add_listener(move |event: &GameEvent| sink.borrow_mut().push(*event));
        seen
    }

    #[test]
    fn test_switch_player_before_start_fails() {
        let mut engine = ReversiEngine::hex(3).unwrap();
        let err = engine.switch_player().unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::State(_)));
    }

    #[test]
    fn test_switch_player_mid_game() {
        let mut engine = started(Topology::Hex, 3);
        let seen = recorder(&mut engine);
        engine.switch_player().unwrap();
        assert_eq!(engine.current_player().unwrap(), Color::White);
        assert_eq!(engine.pass_count(), 0);
        assert_eq!(*seen.borrow(), vec![GameEvent::TurnChanged(Color::White)]);
    }

    #[test]
    fn test_switch_player_after_game_over_fails() {
        let mut engine = started(Topology::Square, 2);
        let seen = recorder(&mut engine);
        let err = engine.switch_player().unwrap_err();
        assert!(matches!(err.kind(), ReversiErrorKind::State(_)));
        assert_eq!(engine.current_player().unwrap(), Color::Black);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_full_opening_board_announces_game_over() {
        let mut engine = ReversiEngine::square(2).unwrap();
        let seen = recorder(&mut engine);
        engine.game_started().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                GameEvent::GameStarted,
                GameEvent::TurnChanged(Color::Black),
                GameEvent::GameOver(Outcome::Tie),
            ]
        );
    }

    #[test]
    fn test_stalled_mover_does_not_end_the_game() {
        // Black can never close a sandwich; White takes (2, 0) then (2, 2).
        let mut engine = position(
            Topology::Square,
            4,
            &[
                (0, 0, Color::White),
                (1, 0, Color::Black),
                (0, 2, Color::White),
                (1, 2, Color::Black),
            ],
            Color::Black,
        );
        let seen = recorder(&mut engine);

        engine.wanna_pass().unwrap();
        engine.make_move(Coord::new(2, 0)).unwrap();
        assert_eq!(
            engine.terminal_reason().unwrap(),
            Some(TerminalReason::NoLegalMoves)
        );
        assert_eq!(engine.final_reason().unwrap(), None);
        assert!(
            !seen
                .borrow()
                .iter()
                .any(|event| matches!(event, GameEvent::GameOver(_)))
        );

        engine.wanna_pass().unwrap();
        engine.make_move(Coord::new(2, 2)).unwrap();
        assert_eq!(engine.final_reason().unwrap(), Some(TerminalReason::Wipeout));

        let events = seen.borrow();
        let game_overs: Vec<&GameEvent> = events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameOver(_)))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver(engine.return_winner().unwrap()))
        );
        assert_eq!(engine.return_winner().unwrap(), Outcome::Winner(Color::White));
    }

    #[test]
    fn test_clone_is_independent() {
        let engine = started(Topology::Hex, 3);
        let mut copy = engine.clone();
        copy.make_move(Coord::new(1, -2)).unwrap();
        assert_eq!(engine.scores().unwrap(), Scores::new(3, 3));
        assert_eq!(copy.scores().unwrap(), Scores::new(5, 2));
        assert_eq!(engine.current_player().unwrap(), Color::Black);
    }

    #[test]
    fn test_hints_only_on_own_turn() {
        let mut engine = started(Topology::Hex, 3);
        assert!(engine.toggle_hints(Color::White).is_err());
        engine.toggle_hints(Color::Black).unwrap();
        assert!(engine.hints_enabled(Color::Black));
        assert!(!engine.hints_enabled(Color::White));

        let hints = engine.hints(Color::Black).unwrap();
        assert_eq!(hints.len(), 6);
        assert!(hints.iter().all(|&(_, captured)| captured == 1));
    }
}
