//! Terminal game runner (default binary).
//!
//! Polls crossterm events with a timeout up to the next frame, feeds them to
//! the session, advances gravity by the measured elapsed time and redraws.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::prelude::*;

use term_tetris::cli::Args;
use term_tetris::engine::{Control, Session};
use term_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.session_config();
    info!(
        level = config.rules.start_level,
        seed = config.rules.seed,
        resume = config.rules.resume.as_str(),
        frame_ms = config.frame_ms,
        "starting"
    );
    let mut session = Session::new(config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let restored = term.exit();
    info!(
        lines = session.game().num_lines(),
        level = session.game().level(),
        "exiting"
    );
    result.and(restored)
}

/// Logs go to `--log-file` only; stderr would draw over the game.
fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            args.log_level(),
        ))
        .try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(session.frame_ms() as u64);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(session.game(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            if let Event::Resize(..) = event {
                term.invalidate();
            }
            if session.handle_event(&event) == Control::Quit {
                return Ok(());
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            session.advance(elapsed_ms);
        }
    }
}
