//! Rules module - immutable game configuration and the speed model

use crate::types::{DEFAULT_LEVEL, FASTEST_INCREMENT_MS, MAX_LEVEL, SLOWEST_INTERVAL_MS};

/// What happens to gravity when a paused game resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePolicy {
    /// Rearm the timer and evaluate one gravity step right away
    #[default]
    ImmediateFall,
    /// Rearm the timer and wait for it to expire
    Rearm,
}

impl ResumePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "immediate-fall" | "immediate" | "fall" => Some(ResumePolicy::ImmediateFall),
            "rearm" => Some(ResumePolicy::Rearm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumePolicy::ImmediateFall => "immediate-fall",
            ResumePolicy::Rearm => "rearm",
        }
    }
}

/// Configuration fixed for the lifetime of a [`crate::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Level restored on every reset (1..=10)
    pub start_level: u32,
    pub resume: ResumePolicy,
    /// Seed for piece selection
    pub seed: u32,
}

impl Rules {
    pub fn new(seed: u32) -> Self {
        Self {
            start_level: DEFAULT_LEVEL,
            resume: ResumePolicy::default(),
            seed,
        }
    }

    /// Set the starting level, clamped to the valid range
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level.clamp(DEFAULT_LEVEL, MAX_LEVEL);
        self
    }

    pub fn with_resume(mut self, resume: ResumePolicy) -> Self {
        self.resume = resume;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Gravity interval for a level: 700ms minus 60ms per level.
pub fn gravity_interval_ms(level: u32) -> u32 {
    SLOWEST_INTERVAL_MS.saturating_sub(FASTEST_INCREMENT_MS.saturating_mul(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_interval_endpoints() {
        assert_eq!(gravity_interval_ms(1), 640);
        assert_eq!(gravity_interval_ms(5), 400);
        assert_eq!(gravity_interval_ms(10), 100);
    }

    #[test]
    fn test_gravity_interval_strictly_decreases() {
        for level in DEFAULT_LEVEL..MAX_LEVEL {
            assert!(gravity_interval_ms(level + 1) < gravity_interval_ms(level));
        }
    }

    #[test]
    fn test_start_level_is_clamped() {
        assert_eq!(Rules::default().with_start_level(0).start_level, 1);
        assert_eq!(Rules::default().with_start_level(42).start_level, 10);
        assert_eq!(Rules::default().with_start_level(4).start_level, 4);
    }

    #[test]
    fn test_resume_policy_names() {
        assert_eq!(ResumePolicy::from_str("rearm"), Some(ResumePolicy::Rearm));
        assert_eq!(
            ResumePolicy::from_str("Immediate-Fall"),
            Some(ResumePolicy::ImmediateFall)
        );
        assert_eq!(ResumePolicy::from_str("later"), None);
    }
}
