//! Auto-repeat for held movement keys.
//!
//! Left, right and down repeat after an initial delay. Terminals that never
//! report key releases are handled with an idle timeout: a held key that has
//! not been seen again for a while is treated as released.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameCommand, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS};

/// Most commands produced by a single [`InputHandler::update`] call.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

// Longer than the typical OS key-repeat interval, so a held key keeps
// refreshing itself, but short enough that a tap does not start repeating.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Horizontal key currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn command(self) -> Option<GameCommand> {
        match self {
            HorizontalDirection::Left => Some(GameCommand::MoveLeft),
            HorizontalDirection::Right => Some(GameCommand::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Delay/rate bookkeeping for one held key.
#[derive(Debug, Clone, Copy, Default)]
struct Repeat {
    held_ms: u32,
    accumulator: u32,
}

impl Repeat {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, delay: u32, rate: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay {
            return 0;
        }
        let excess = if prev < delay {
            self.held_ms - delay
        } else {
            elapsed_ms
        };
        self.accumulator = self.accumulator.saturating_add(excess);

        let rate = rate.max(1);
        let due = self.accumulator / rate;
        self.accumulator %= rate;
        due
    }
}

/// Tracks held movement keys and emits repeated commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    idle_ms: u32,
    repeat_delay_ms: u32,
    repeat_rate_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS)
    }

    pub fn with_config(repeat_delay_ms: u32, repeat_rate_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_repeat: Repeat::default(),
            down_repeat: Repeat::default(),
            idle_ms: 0,
            repeat_delay_ms,
            repeat_rate_ms,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn repeat_delay_ms(&self) -> u32 {
        self.repeat_delay_ms
    }

    pub fn repeat_rate_ms(&self) -> u32 {
        self.repeat_rate_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn is_down_held(&self) -> bool {
        self.down_held
    }

    /// Whether `code` is one of the keys this handler repeats.
    pub fn is_repeatable(code: KeyCode) -> bool {
        matches!(
            code,
            KeyCode::Left
                | KeyCode::Right
                | KeyCode::Down
                | KeyCode::Char('h' | 'H' | 'l' | 'L' | 'j' | 'J')
        )
    }

    /// Register a key press.
    ///
    /// Returns the command for the first press of a repeatable key. A press
    /// of a key that is already held only refreshes the idle timeout, since
    /// repeats come from [`InputHandler::update`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameCommand> {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
                self.press_horizontal(HorizontalDirection::Left)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
                self.press_horizontal(HorizontalDirection::Right)
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
                self.idle_ms = 0;
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_repeat.clear();
                    Some(GameCommand::MoveDown)
                }
            }
            _ => None,
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameCommand> {
        self.idle_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat.clear();
        direction.command()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
                self.release_horizontal(HorizontalDirection::Left)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
                self.release_horizontal(HorizontalDirection::Right)
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
                self.down_held = false;
                self.down_repeat.clear();
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self, direction: HorizontalDirection) {
        if self.horizontal == direction {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_repeat.clear();
        }
    }

    /// Let `elapsed_ms` pass and collect the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameCommand, MAX_REPEATS_PER_UPDATE> {
        let mut commands = ArrayVec::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.release_all();
            return commands;
        }

        if let Some(command) = self.horizontal.command() {
            let due = self.horizontal_repeat.advance(
                elapsed_ms,
                self.repeat_delay_ms,
                self.repeat_rate_ms,
            );
            for _ in 0..due {
                if commands.try_push(command).is_err() {
                    break;
                }
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, self.repeat_delay_ms, self.repeat_rate_ms);
            for _ in 0..due {
                if commands.try_push(GameCommand::MoveDown).is_err() {
                    break;
                }
            }
        }

        commands
    }

    fn release_all(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.horizontal_repeat.clear();
        self.down_repeat.clear();
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.release_all();
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
