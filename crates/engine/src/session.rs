//! Session: one game plus the input state that drives it.

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tracing::{debug, trace};

use crate::core::{Game, Rules};
use crate::input::{handle_key_event, should_quit, InputHandler};
use crate::types::{
    GameCommand, GameStatus, DEFAULT_FRAME_MS, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS,
};

/// Frontend settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub rules: Rules,
    /// Cadence of the frame loop
    pub frame_ms: u32,
    pub repeat_delay_ms: u32,
    pub repeat_rate_ms: u32,
}

impl SessionConfig {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            frame_ms: DEFAULT_FRAME_MS,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_rate_ms: DEFAULT_REPEAT_RATE_MS,
        }
    }

    pub fn with_frame_ms(mut self, frame_ms: u32) -> Self {
        self.frame_ms = frame_ms.max(1);
        self
    }

    pub fn with_repeat(mut self, delay_ms: u32, rate_ms: u32) -> Self {
        self.repeat_delay_ms = delay_ms;
        self.repeat_rate_ms = rate_ms.max(1);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

/// What the frame loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A running game and its input state.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    input: InputHandler,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            game: Game::new(config.rules),
            input: InputHandler::with_config(config.repeat_delay_ms, config.repeat_rate_ms),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn frame_ms(&self) -> u32 {
        self.config.frame_ms
    }

    /// Dispatch a terminal event. Anything other than a key is ignored.
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.press(*key),
                KeyEventKind::Release => {
                    self.release(*key);
                    Control::Continue
                }
            },
            _ => Control::Continue,
        }
    }

    /// Handle a key press.
    ///
    /// Held movement keys go through the auto-repeat handler so the terminal's
    /// own key repeat does not double up with ours.
    pub fn press(&mut self, key: KeyEvent) -> Control {
        if should_quit(key) {
            debug!(
                level = self.game.level(),
                lines = self.game.num_lines(),
                "quit requested"
            );
            return Control::Quit;
        }

        if InputHandler::is_repeatable(key.code) {
            if let Some(command) = self.input.handle_key_press(key.code) {
                self.apply(command);
            }
            return Control::Continue;
        }

        if let Some(command) = handle_key_event(key) {
            self.apply(command);
        }
        Control::Continue
    }

    pub fn release(&mut self, key: KeyEvent) {
        self.input.handle_key_release(key.code);
    }

    /// Apply one command to the game.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        let before = self.game.status();
        let changed = self.game.apply(command);
        if self.game.status() != before {
            // Keys held across a lifecycle change must not keep repeating.
            self.input.reset();
            debug!(
                from = before.as_str(),
                to = self.game.status().as_str(),
                "status changed"
            );
        }
        changed
    }

    /// Let `elapsed_ms` pass: emit due key repeats, then run gravity.
    ///
    /// Returns whether a gravity step ran.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let repeats = self.input.update(elapsed_ms);
        if self.game.status() == GameStatus::Started {
            for command in repeats {
                if !self.game.apply(command) {
                    break;
                }
            }
        }

        let fired = self.game.tick(elapsed_ms);
        if fired {
            trace!(
                status = self.game.status().as_str(),
                interval_ms = self.game.gravity_interval_ms(),
                "gravity"
            );
        }
        fired
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
