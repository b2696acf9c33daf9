//! Projectile command mini-protocol.
//!
//! A projectile command is either a turning directive by wire name
//! (`HARD_LEFT`, `STRAIGHT`, ...) or a timed detonation
//! (`detonate_after:<seconds>`, prefix matched case-insensitively).

use thiserror::Error;

use crate::battle::ProjectileTurn;

/// Longest accepted detonation delay, seconds.
pub const MAX_DETONATION_DELAY: f64 = 15.0;

const DETONATE_PREFIX: &str = "detonate_after:";

/// A parsed projectile command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOrder {
    Turn(ProjectileTurn),
    DetonateAfter(f64),
}

/// Rejected projectile command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("missing delay after 'detonate_after:'")]
    MissingDelay,

    #[error("invalid detonation delay '{0}'")]
    InvalidDelay(String),

    #[error("detonation delay {0} outside [0, 15] seconds")]
    DelayOutOfRange(f64),

    #[error("unknown projectile directive '{0}'")]
    UnknownDirective(String),
}

/// Parses one raw projectile command.
pub fn parse_projectile_command(raw: &str) -> Result<ProjectileOrder, CommandError> {
    let trimmed = raw.trim();

    let prefix_len = DETONATE_PREFIX.len();
    if trimmed.len() >= prefix_len
        && trimmed.is_char_boundary(prefix_len)
        && trimmed[..prefix_len].eq_ignore_ascii_case(DETONATE_PREFIX)
    {
        return parse_delay(trimmed[prefix_len..].trim());
    }

    ProjectileTurn::from_name(trimmed)
        .map(ProjectileOrder::Turn)
        .ok_or_else(|| CommandError::UnknownDirective(trimmed.to_string()))
}

fn parse_delay(text: &str) -> Result<ProjectileOrder, CommandError> {
    if text.is_empty() {
        return Err(CommandError::MissingDelay);
    }
    let delay: f64 = text
        .parse()
        .map_err(|_| CommandError::InvalidDelay(text.to_string()))?;
    if !delay.is_finite() {
        return Err(CommandError::InvalidDelay(text.to_string()));
    }
    if !(0.0..=MAX_DETONATION_DELAY).contains(&delay) {
        return Err(CommandError::DelayOutOfRange(delay));
    }
    Ok(ProjectileOrder::DetonateAfter(delay))
}
