//! Game state module - manages the complete game state
//!
//! This module ties together the board, the falling piece, shape selection,
//! the line-clear pass and level progression.
//!
//! `GameState` never sleeps. Timed pauses (the row flash, each collapse step,
//! banners) are exposed as [`GameState::pending_delay_ms`]; the driver waits
//! that long and then calls [`GameState::resume`]. While a delay is pending the
//! game is [`Phase::Paused`] and every command is ignored.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::board::Board;
use crate::collision;
use crate::events::{BannerKind, GameEvent};
use crate::line_clear::{ClearStep, LineClear};
use crate::piece::Piece;
use crate::rng::ShapePicker;
use crate::scoring::{calculate_line_score, level_delay_ms, next_level};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    Command, Direction, ShapeKind, BANNER_MS, CLEAR_FLASH_MS, COLLAPSE_STEP_MS,
    GAME_OVER_BANNER_MS, SPAWN_SCORE,
};

/// Coarse game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Running,
    /// A banner or the line-clear animation is in progress.
    Paused,
    GameOver,
}

/// Result of applying a command or a gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The piece moved or rotated.
    Moved,
    /// The move was illegal; nothing changed.
    Rejected,
    /// The game is paused, over or not started; nothing changed.
    Ignored,
    /// The piece could not descend and was locked into the board.
    Locked,
}

/// Durations of the timed pauses, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timings {
    pub clear_flash_ms: u32,
    pub collapse_step_ms: u32,
    pub banner_ms: u32,
    pub game_over_banner_ms: u32,
}

impl Timings {
    /// Banners still show up but take no time.
    pub fn without_banners(self) -> Self {
        Self {
            banner_ms: 0,
            game_over_banner_ms: 0,
            ..self
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            clear_flash_ms: CLEAR_FLASH_MS,
            collapse_step_ms: COLLAPSE_STEP_MS,
            banner_ms: BANNER_MS,
            game_over_banner_ms: GAME_OVER_BANNER_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Animation {
    Clearing { pass: LineClear, delay_ms: u32 },
    Banner { kind: BannerKind, delay_ms: u32 },
}

const BANNER_QUEUE: usize = 4;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    picker: ShapePicker,
    /// 1-based, capped at the speed table length.
    level: u32,
    lines_this_level: u32,
    total_lines: u32,
    score: u32,
    /// Monotonic id, incremented on every spawn.
    piece_id: u32,
    game_over: bool,
    started: bool,
    animation: Option<Animation>,
    banner_queue: ArrayVec<BannerKind, BANNER_QUEUE>,
    events: Vec<GameEvent>,
    timings: Timings,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_timings(seed, Timings::default())
    }

    pub fn with_timings(seed: u32, timings: Timings) -> Self {
        Self {
            board: Board::new(),
            active: None,
            picker: ShapePicker::new(seed),
            level: 1,
            lines_this_level: 0,
            total_lines: 0,
            score: 0,
            piece_id: 0,
            game_over: false,
            started: false,
            animation: None,
            banner_queue: ArrayVec::new(),
            events: Vec::new(),
            timings,
        }
    }

    /// Create a game on a pre-filled board.
    pub fn with_board(seed: u32, board: Board) -> Self {
        Self {
            board,
            ..Self::new(seed)
        }
    }

    /// Start the game: show the first level banner and spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!("game started (seed {})", self.picker.seed());
        self.queue_banner(BannerKind::Level(self.level));
        self.spawn_piece();
        self.show_next_banner();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.animation.is_some() {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn paused(&self) -> bool {
        self.animation.is_some()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Lines cleared since the last level-up.
    pub fn lines(&self) -> u32 {
        self.lines_this_level
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Banner currently on screen.
    pub fn banner(&self) -> Option<BannerKind> {
        match self.animation {
            Some(Animation::Banner { kind, .. }) => Some(kind),
            _ => None,
        }
    }

    /// Replace the falling piece. Used to script scenarios.
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Gravity interval for the current level, `None` once the game is over.
    pub fn gravity_interval_ms(&self) -> Option<u32> {
        if !self.started || self.game_over {
            return None;
        }
        Some(level_delay_ms(self.level))
    }

    /// How long the driver must wait before calling [`resume`](Self::resume).
    pub fn pending_delay_ms(&self) -> Option<u32> {
        match self.animation {
            Some(Animation::Clearing { delay_ms, .. })
            | Some(Animation::Banner { delay_ms, .. }) => Some(delay_ms),
            None => None,
        }
    }

    /// Advance the current animation by one step.
    pub fn resume(&mut self) {
        match self.animation.take() {
            Some(Animation::Clearing { mut pass, .. }) => {
                let step = pass.step(&mut self.board);
                self.apply_clear_step(pass, step);
            }
            Some(Animation::Banner { kind, .. }) => {
                debug!("banner {kind} hidden");
                self.show_next_banner();
            }
            None => {}
        }
    }

    /// Run every pending animation step back to back.
    pub fn settle(&mut self) {
        while self.animation.is_some() {
            self.resume();
        }
    }

    /// Gravity: one step down, locking the piece when it cannot descend.
    pub fn tick(&mut self) -> Outcome {
        if self.phase() != Phase::Running {
            return Outcome::Ignored;
        }
        self.gravity_step()
    }

    /// Apply a player command.
    ///
    /// [`Command::HardDrop`] is applied here as an immediate drop; drivers that
    /// animate the drop call [`hard_drop_step`](Self::hard_drop_step) instead.
    pub fn apply_command(&mut self, command: Command) -> Outcome {
        if !self.started || self.phase() != Phase::Running {
            debug!("{} ignored", command.as_str());
            return Outcome::Ignored;
        }
        match command {
            Command::MoveLeft => self.shift(Direction::Left),
            Command::MoveRight => self.shift(Direction::Right),
            Command::SoftDrop => self.gravity_step(),
            Command::RotateCw => self.rotate(),
            Command::HardDrop => loop {
                match self.gravity_step() {
                    Outcome::Moved => continue,
                    outcome => break outcome,
                }
            },
        }
    }

    /// One step of an animated hard drop for the piece `piece_id`.
    ///
    /// Returns `true` while the drop should continue. Returns `false` once the
    /// piece locked, or when the game is not running or another piece is
    /// falling by now.
    pub fn hard_drop_step(&mut self, piece_id: u32) -> bool {
        if self.phase() != Phase::Running || self.piece_id != piece_id {
            return false;
        }
        self.gravity_step() == Outcome::Moved
    }

    /// Events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.banner = self.banner();
        out.level = self.level;
        out.score = self.score;
        out.lines = self.lines_this_level;
        out.total_lines = self.total_lines;
        out.paused = self.paused();
        out.game_over = self.game_over;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn shift(&mut self, direction: Direction) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Ignored;
        };
        match collision::try_move(&self.board, &active, direction) {
            Some(moved) => {
                self.active = Some(moved);
                Outcome::Moved
            }
            None => Outcome::Rejected,
        }
    }

    fn rotate(&mut self) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Ignored;
        };
        match collision::try_rotate(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                Outcome::Moved
            }
            None => Outcome::Rejected,
        }
    }

    fn gravity_step(&mut self) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Ignored;
        };
        match collision::try_move(&self.board, &active, Direction::Down) {
            Some(moved) => {
                self.active = Some(moved);
                Outcome::Moved
            }
            None => {
                self.lock_in(active);
                Outcome::Locked
            }
        }
    }

    /// Lock the piece, spawn the next one, then start the line-clear pass.
    fn lock_in(&mut self, piece: Piece) {
        self.board.lock_piece(&piece);
        self.active = None;
        debug!("piece {} ({}) locked", self.piece_id, piece.kind().as_str());
        self.events.push(GameEvent::Locked {
            kind: piece.kind(),
            piece_id: self.piece_id,
        });

        self.spawn_piece();

        let mut pass = LineClear::new();
        let step = pass.step(&mut self.board);
        self.apply_clear_step(pass, step);
    }

    /// Spawn a new random piece at the top center.
    fn spawn_piece(&mut self) {
        let kind = self.picker.draw();
        self.spawn_kind(kind);
    }

    fn spawn_kind(&mut self, kind: ShapeKind) {
        let piece = collision::spawn_piece(kind);
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if !collision::can_move(&self.board, &piece, Direction::Down) {
            self.set_game_over();
            return;
        }
        self.score = self.score.saturating_add(SPAWN_SCORE);
        self.events.push(GameEvent::Spawned {
            kind,
            piece_id: self.piece_id,
        });
    }

    fn set_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        info!("game over: score {}, lines {}", self.score, self.total_lines);
        self.events.push(GameEvent::GameOver { score: self.score });
        self.queue_banner(BannerKind::GameOver);
    }

    fn apply_clear_step(&mut self, pass: LineClear, step: ClearStep) {
        if let ClearStep::Flashed { row } = step {
            self.events.push(GameEvent::RowFlashed { row });
        }
        if let ClearStep::Collapsed { row } = step {
            self.account_line(row);
        }
        match step.delay_ms(self.timings.clear_flash_ms, self.timings.collapse_step_ms) {
            Some(delay_ms) => self.animation = Some(Animation::Clearing { pass, delay_ms }),
            None => {
                self.animation = None;
                // A collapse that reaches the top can push blocks into the new piece.
                if self.active.is_some_and(|piece| self.board.overlaps(&piece)) {
                    self.set_game_over();
                }
                self.show_next_banner();
            }
        }
    }

    fn account_line(&mut self, row: usize) {
        self.total_lines += 1;
        self.score = self.score.saturating_add(calculate_line_score(1));
        self.events.push(GameEvent::LineCleared {
            row,
            total_lines: self.total_lines,
            score: self.score,
        });

        let progress = next_level(self.level, self.lines_this_level);
        self.lines_this_level = progress.lines_this_level;
        if progress.leveled_up {
            self.level = progress.level;
            info!("level {}", self.level);
            self.events.push(GameEvent::LevelUp { level: self.level });
            self.queue_banner(BannerKind::Level(self.level));
        }
    }

    fn queue_banner(&mut self, kind: BannerKind) {
        if self.banner_queue.try_push(kind).is_err() {
            warn!("banner queue full, dropping {kind}");
        }
    }

    /// Promote the next queued banner when nothing else is animating.
    fn show_next_banner(&mut self) {
        if self.animation.is_some() || self.banner_queue.is_empty() {
            return;
        }
        let kind = self.banner_queue.remove(0);
        let delay_ms = match kind {
            BannerKind::GameOver => self.timings.game_over_banner_ms,
            BannerKind::Level(_) => self.timings.banner_ms,
        };
        self.animation = Some(Animation::Banner { kind, delay_ms });
        self.events.push(GameEvent::BannerShown(kind));
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
