//! Command-line options for the binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::Level;

use crate::core::{ResumePolicy, Rules};
use crate::engine::SessionConfig;
use crate::types::{DEFAULT_FRAME_MS, DEFAULT_LEVEL};

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Level to start (and restart) at, 1 to 10.
    #[arg(long, default_value_t = DEFAULT_LEVEL, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub level: u32,

    /// Seed for piece selection. Taken from the clock when omitted.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = DEFAULT_FRAME_MS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub frame_ms: u32,

    /// Gravity behaviour when a paused game resumes: immediate-fall or rearm.
    #[arg(long, default_value = "immediate-fall", value_parser = parse_resume)]
    pub resume: ResumePolicy,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_resume(s: &str) -> Result<ResumePolicy, String> {
    ResumePolicy::from_str(s).ok_or_else(|| format!("unknown resume policy `{s}`"))
}

impl Args {
    pub fn rules(&self) -> Rules {
        Rules::new(self.seed.unwrap_or_else(clock_seed))
            .with_start_level(self.level)
            .with_resume(self.resume)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.rules()).with_frame_ms(self.frame_ms)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Seed derived from the wall clock.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
