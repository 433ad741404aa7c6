//! Game module - the lifecycle state machine and piece movement engine
//!
//! Ties together the board, the shape table, the RNG and the gravity timer.
//! Every transform follows the same protocol: compute a candidate shape or
//! anchor, fit-test it against the settled blocks, and only then erase the old
//! falling cells and write the new ones. A rejected move changes nothing.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{get_shape, rotate, PieceShape};
use crate::rng::SimpleRng;
use crate::rules::{gravity_interval_ms, ResumePolicy, Rules};
use crate::timer::GravityTimer;
use crate::types::*;

/// Horizontal spawn anchor (board center)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8;

/// Vertical spawn anchor (top row)
pub const SPAWN_Y: i8 = 0;

/// Row indices removed by one lock, top to bottom.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
    level: u32,
    num_lines: u32,
    /// Kind of the falling piece, `None` between lock and spawn
    piece: Option<PieceKind>,
    x: i8,
    y: i8,
    /// Committed offsets of the falling piece
    shape: PieceShape,
    /// Scratch offsets tested by `piece_fits`
    candidate: PieceShape,
    /// Topmost row that may hold a settled block
    skyline: i8,
    timer: GravityTimer,
    rules: Rules,
    rng: SimpleRng,
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        let mut game = Self {
            board: Board::new(),
            status: GameStatus::Intro,
            level: rules.start_level,
            num_lines: 0,
            piece: None,
            x: SPAWN_X,
            y: SPAWN_Y,
            shape: [(0, 0); NUM_SQUARES],
            candidate: [(0, 0); NUM_SQUARES],
            skyline: BOARD_HEIGHT as i8 - 1,
            timer: GravityTimer::new(),
            rules,
            rng: SimpleRng::new(rules.seed),
        };
        game.reset();
        game
    }

    /// Put everything back to the intro state. The RNG keeps its sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = GameStatus::Intro;
        self.level = self.rules.start_level;
        self.num_lines = 0;
        self.piece = None;
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.shape = [(0, 0); NUM_SQUARES];
        self.candidate = self.shape;
        self.skyline = BOARD_HEIGHT as i8 - 1;
        self.timer.stop();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn num_lines(&self) -> u32 {
        self.num_lines
    }

    pub fn skyline(&self) -> i8 {
        self.skyline
    }

    pub fn piece(&self) -> Option<PieceKind> {
        self.piece
    }

    /// Anchor of the falling piece
    pub fn anchor(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Committed offsets of the falling piece
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Gravity interval for the current level
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Apply a frontend command. Returns whether it changed anything.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        trace!(command = command.as_str(), status = self.status.as_str(), "apply");
        match command {
            GameCommand::Start => self.start(),
            GameCommand::Pause => self.pause(),
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::MoveDown => self.move_down(),
            GameCommand::Fall => self.fall(),
        }
    }

    /// Start a game from the intro or game-over screen, or resume a paused one.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Started => false,
            GameStatus::Paused => {
                self.resume();
                true
            }
            GameStatus::Intro | GameStatus::GameOver => {
                if self.status == GameStatus::GameOver {
                    self.reset();
                }
                self.status = GameStatus::Started;
                info!(level = self.level, "game started");
                if self.get_piece() {
                    self.arm_timer();
                } else {
                    self.end_game();
                }
                true
            }
        }
    }

    /// Pause a running game, or resume a paused one.
    pub fn pause(&mut self) -> bool {
        match self.status {
            GameStatus::Started => {
                self.status = GameStatus::Paused;
                self.timer.stop();
                debug!("paused");
                true
            }
            GameStatus::Paused => {
                self.resume();
                true
            }
            GameStatus::Intro | GameStatus::GameOver => false,
        }
    }

    fn resume(&mut self) {
        self.status = GameStatus::Started;
        self.arm_timer();
        debug!(policy = self.rules.resume.as_str(), "resumed");
        if self.rules.resume == ResumePolicy::ImmediateFall {
            self.play();
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.translate(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.translate(1, 0)
    }

    /// Move the piece one row down. False when blocked or not running.
    pub fn move_down(&mut self) -> bool {
        self.translate(0, 1)
    }

    /// Rotate the piece 90° about its anchor. No kicks: a blocked rotation fails.
    pub fn rotate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.candidate = rotate(&self.shape);
        if !self.piece_fits(self.x, self.y) {
            return false;
        }
        self.erase_piece();
        self.shape = self.candidate;
        self.place_piece();
        true
    }

    /// Hard drop: descend until blocked, then lock without waiting for gravity.
    pub fn fall(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.candidate = self.shape;
        if !self.piece_fits(self.x, self.y + 1) {
            return false;
        }
        self.timer.stop();
        self.erase_piece();
        while self.piece_fits(self.x, self.y + 1) {
            self.y += 1;
        }
        self.place_piece();
        self.lock_piece();
        true
    }

    /// One gravity step: fall a row, or lock the piece if it cannot.
    pub fn play(&mut self) {
        if self.status != GameStatus::Started {
            return;
        }
        if self.move_down() {
            self.arm_timer();
        } else {
            self.lock_piece();
        }
    }

    /// Let `elapsed_ms` pass. Runs [`Game::play`] when the gravity timer
    /// expires and returns whether it did.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.timer.advance(elapsed_ms) {
            return false;
        }
        self.play();
        true
    }

    /// Fit test of the candidate offsets at anchor `(x, y)`.
    ///
    /// Squares above the board are allowed; squares outside the side walls or
    /// below the floor are not. Only settled blocks collide.
    pub fn piece_fits(&self, x: i8, y: i8) -> bool {
        Self::fits(&self.board, &self.candidate, x, y)
    }

    fn fits(board: &Board, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape.iter().all(|&(dx, dy)| {
            let cx = x + dx;
            let cy = y + dy;
            if cx < 0 || cx >= BOARD_WIDTH as i8 || cy >= BOARD_HEIGHT as i8 {
                return false;
            }
            !(cy > -1 && board.is_settled(cx, cy))
        })
    }

    /// Row the falling piece would come to rest at if dropped now
    pub fn landing_y(&self) -> Option<i8> {
        self.piece?;
        let mut y = self.y;
        while Self::fits(&self.board, &self.shape, self.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Replace the falling piece (if any) with `kind` at the spawn anchor.
    ///
    /// Returns false without placing anything when the spawn area is blocked.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        self.erase_piece();
        self.piece = None;
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        self.shape = get_shape(kind);
        self.candidate = self.shape;
        if !self.piece_fits(self.x, self.y) {
            debug!(piece = kind.as_str(), "spawn blocked");
            return false;
        }
        self.piece = Some(kind);
        self.place_piece();
        true
    }

    fn get_piece(&mut self) -> bool {
        let kind = self.rng.next_piece();
        self.spawn(kind)
    }

    fn is_active(&self) -> bool {
        self.status == GameStatus::Started && self.piece.is_some()
    }

    fn translate(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_active() {
            return false;
        }
        self.candidate = self.shape;
        if !self.piece_fits(self.x + dx, self.y + dy) {
            return false;
        }
        self.erase_piece();
        self.x += dx;
        self.y += dy;
        self.place_piece();
        true
    }

    fn erase_piece(&mut self) {
        if self.piece.is_none() {
            return;
        }
        for &(dx, dy) in self.shape.iter() {
            let (x, y) = (self.x + dx, self.y + dy);
            if self.board.get(x, y).is_some_and(|c| c < 0) {
                self.board.set(x, y, 0);
            }
        }
    }

    fn place_piece(&mut self) {
        let Some(kind) = self.piece else {
            return;
        };
        for &(dx, dy) in self.shape.iter() {
            self.board.set(self.x + dx, self.y + dy, kind.falling_cell());
        }
    }

    fn lock_piece(&mut self) {
        let Some(kind) = self.piece else {
            return;
        };
        self.fill_matrix(kind);
        let cleared = self.remove_lines();
        debug!(
            piece = kind.as_str(),
            x = self.x,
            y = self.y,
            cleared = cleared.len(),
            skyline = self.skyline,
            "piece locked"
        );
        if self.skyline > 0 && self.get_piece() {
            self.arm_timer();
        } else {
            self.end_game();
        }
    }

    /// Turn the falling cells into settled ones and lower the skyline.
    fn fill_matrix(&mut self, kind: PieceKind) {
        for &(dx, dy) in self.shape.iter() {
            let (x, y) = (self.x + dx, self.y + dy);
            if self.board.set(x, y, kind.settled_cell()) && y < self.skyline {
                self.skyline = y;
            }
        }
        self.piece = None;
    }

    /// Remove every complete row, top to bottom, updating lines and level.
    fn remove_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if !self.board.is_row_complete(y) {
                continue;
            }
            self.board
                .collapse_row(y, self.skyline.clamp(0, y as i8) as usize);
            cleared.push(y);
            self.num_lines += 1;
            self.skyline = (self.skyline + 1).min(BOARD_HEIGHT as i8);
            if self.num_lines % ROWS_PER_LEVEL == 0 && self.level < MAX_LEVEL {
                self.level += 1;
                info!(level = self.level, lines = self.num_lines, "level up");
            }
        }
        cleared
    }

    fn arm_timer(&mut self) {
        self.timer.arm(self.gravity_interval_ms());
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        self.timer.stop();
        info!(level = self.level, lines = self.num_lines, "game over");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}
