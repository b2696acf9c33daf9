//! Text protocols.
//!
//! `command` implements the projectile command mini-protocol carried inside
//! `OrdersRequest`; `parser` implements the line protocol read by the
//! engine binary.

pub mod command;
pub mod parser;

pub use command::{parse_projectile_command, CommandError, ProjectileOrder, MAX_DETONATION_DELAY};
pub use parser::{parse_command, Command};
