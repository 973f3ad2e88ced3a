//! Game state module - one play session
//!
//! Ties together board, spawner and scoring. The session is a pure state
//! machine: the driver owns the clock and the input devices, passes elapsed
//! milliseconds and discrete actions in, and reads the returned [`Outcome`]
//! and the query methods to render.
//!
//! Within one frame the driver applies player actions first and calls
//! [`GameSession::tick`] at most once afterwards.

use std::mem;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::piece::Piece;
use crate::scoring::score_for;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::spawner::Spawner;
use crate::types::{Direction, GameAction, Outcome, SessionState};

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    spawner: Spawner,
    active: Piece,
    held: Option<Piece>,
    /// Cleared by a hold, set again only when a piece locks
    swap_allowed: bool,
    score: u32,
    lines: u32,
    fall_timer_ms: u32,
    fall_ms: u32,
    soft_drop_ms: u32,
    soft_drop: bool,
    state: SessionState,
}

impl GameSession {
    /// Validate the configuration and start a session with its first piece
    pub fn new(config: GameConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejecting game config");
            return Err(err);
        }

        let board = Board::new(config.board_width, config.board_height);
        let mut spawner = Spawner::new(
            config.shapes,
            config.palette,
            config.board_width,
            config.seed,
        )?;
        let active = spawner.spawn();

        tracing::info!(
            width = config.board_width,
            height = config.board_height,
            seed = config.seed,
            "game session started"
        );

        Ok(Self {
            board,
            spawner,
            active,
            held: None,
            swap_allowed: true,
            score: 0,
            lines: 0,
            fall_timer_ms: 0,
            fall_ms: config.fall_ms,
            soft_drop_ms: config.soft_drop_ms,
            soft_drop: false,
            state: SessionState::Running,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn swap_allowed(&self) -> bool {
        self.swap_allowed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Gravity interval currently in effect
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.soft_drop_ms
        } else {
            self.fall_ms
        }
    }

    /// Row the active piece would land on if hard dropped now
    pub fn ghost_y(&self) -> i32 {
        self.board.hard_drop_destination(&self.active)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> Outcome {
        match action {
            GameAction::Move(direction) => self.move_piece(direction),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::HardDrop => self.hard_drop(),
        }
    }

    /// Shift the active piece one cell; reverted if it would collide
    ///
    /// A blocked `Down` reports `landed` but does not lock: the caller decides
    /// when to call [`GameSession::lock_active`]. Gravity in
    /// [`GameSession::tick`] locks on its own.
    pub fn move_piece(&mut self, direction: Direction) -> Outcome {
        if self.is_game_over() {
            return Outcome::default();
        }

        let (dx, dy) = direction.delta();
        self.active.move_by(dx, dy);
        if self.board.is_colliding(&self.active) {
            self.active.move_by(-dx, -dy);
            tracing::trace!(direction = direction.as_str(), "move blocked");
            return Outcome {
                landed: direction == Direction::Down,
                ..Outcome::default()
            };
        }

        Outcome {
            moved: true,
            ..Outcome::default()
        }
    }

    /// Rotate the active piece clockwise; the previous shape is restored if the
    /// rotated one collides. No kicks are attempted.
    pub fn rotate(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::default();
        }

        let previous = self.active.shape.clone();
        self.active.rotate();
        if self.board.is_colliding(&self.active) {
            self.active.shape = previous;
            tracing::trace!("rotation blocked");
            return Outcome::default();
        }

        Outcome {
            moved: true,
            ..Outcome::default()
        }
    }

    /// Drop the active piece to its landing row and lock it
    pub fn hard_drop(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::default();
        }

        let landing_y = self.board.hard_drop_destination(&self.active);
        let moved = landing_y != self.active.y;
        self.active.y = landing_y;

        Outcome {
            moved,
            ..self.settle()
        }
    }

    /// Lock the active piece where it is
    ///
    /// This is the second half of a discrete down move that reported `landed`.
    pub fn lock_active(&mut self) -> Outcome {
        if self.is_game_over() {
            return Outcome::default();
        }
        self.settle()
    }

    /// Set the active piece aside, or exchange it with the held one
    ///
    /// Allowed once per locked piece. A held piece keeps its shape and the
    /// position it was held at; if that position is now blocked it comes back
    /// at the spawn position instead, and if that is blocked too the swap is
    /// refused and nothing changes.
    pub fn hold(&mut self) -> Outcome {
        if self.is_game_over() || !self.swap_allowed {
            return Outcome::default();
        }

        let game_over = match self.held.take() {
            None => {
                let fresh = self.spawner.spawn();
                self.held = Some(mem::replace(&mut self.active, fresh));
                self.spawn_blocked()
            }
            Some(mut held) => {
                if self.board.is_colliding(&held) {
                    let stored = (held.x, held.y);
                    (held.x, held.y) = self.spawner.spawn_position(&held.shape);
                    if self.board.is_colliding(&held) {
                        tracing::trace!("hold swap refused, no room for held piece");
                        (held.x, held.y) = stored;
                        self.held = Some(held);
                        return Outcome::default();
                    }
                }
                self.held = Some(mem::replace(&mut self.active, held));
                false
            }
        };

        self.swap_allowed = false;
        tracing::trace!("piece held");

        if game_over {
            self.end();
        }

        Outcome {
            moved: true,
            game_over,
            ..Outcome::default()
        }
    }

    /// Hold or release the soft drop input
    pub fn set_soft_drop(&mut self, active: bool) {
        self.soft_drop = active;
    }

    /// Advance gravity by `elapsed_ms`
    ///
    /// Once the accumulated time exceeds the current fall interval the piece
    /// steps down one row, or locks if it cannot, and the accumulator restarts
    /// from zero.
    pub fn tick(&mut self, elapsed_ms: u32) -> Outcome {
        if self.is_game_over() {
            return Outcome::default();
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms <= self.fall_interval_ms() {
            return Outcome::default();
        }
        self.fall_timer_ms = 0;

        self.active.move_by(0, 1);
        if !self.board.is_colliding(&self.active) {
            return Outcome {
                moved: true,
                ..Outcome::default()
            };
        }
        self.active.move_by(0, -1);

        self.settle()
    }

    /// Start over on an empty board; the piece sequence continues
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = self.spawner.spawn();
        self.held = None;
        self.swap_allowed = true;
        self.score = 0;
        self.lines = 0;
        self.fall_timer_ms = 0;
        self.soft_drop = false;
        self.state = SessionState::Running;
        tracing::info!(seed = self.spawner.seed(), "game session restarted");
    }

    /// Lock, clear, score, replace the active piece and check for game over
    fn settle(&mut self) -> Outcome {
        self.board.lock(&self.active);
        let lines_cleared = self.board.clear_lines();
        let score_delta = score_for(lines_cleared);

        self.score = self.score.saturating_add(score_delta);
        self.lines = self.lines.saturating_add(lines_cleared as u32);
        self.swap_allowed = true;
        self.fall_timer_ms = 0;

        tracing::debug!(
            x = self.active.x,
            y = self.active.y,
            lines_cleared,
            score = self.score,
            "piece locked"
        );

        self.active = self.spawner.spawn();
        let game_over = self.spawn_blocked();
        if game_over {
            self.end();
        }

        Outcome {
            landed: true,
            locked: true,
            lines_cleared,
            score_delta,
            game_over,
            ..Outcome::default()
        }
    }

    /// Whether the freshly spawned active piece overlaps a locked cell
    fn spawn_blocked(&self) -> bool {
        self.active
            .cells()
            .any(|(x, y)| self.board.locked_at(x, y).is_some())
    }

    fn end(&mut self) {
        self.state = SessionState::GameOver;
        tracing::info!(score = self.score, lines = self.lines, "game over");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.grid.clear();
        out.grid.extend_from_slice(self.board.cells());
        out.active.fill_from(&self.active);
        out.ghost_y = self.ghost_y();
        match (&self.held, &mut out.held) {
            (Some(piece), Some(snap)) => snap.fill_from(piece),
            (Some(piece), slot) => *slot = Some(PieceSnapshot::from(piece)),
            (None, slot) => *slot = None,
        }
        out.swap_allowed = self.swap_allowed;
        out.soft_drop = self.soft_drop;
        out.score = self.score;
        out.lines = self.lines;
        out.state = self.state;
        out.seed = self.spawner.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
