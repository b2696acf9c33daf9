//! Per-turn order types.
//!
//! Movement and rotation are independent: movement picks a velocity
//! direction relative to the current heading, rotation changes the heading.
//! Projectile commands travel as raw strings and are only interpreted by
//! `protocol::command` at the start of resolution.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use serde::{Deserialize, Serialize};

/// Velocity direction relative to heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    Forward,
    ForwardLeft,
    ForwardRight,
    Left,
    Right,
    Backward,
    BackwardLeft,
    BackwardRight,
    Stop,
}

pub const ALL_MOVEMENTS: [MovementDirection; 9] = [
    MovementDirection::Forward,
    MovementDirection::ForwardLeft,
    MovementDirection::ForwardRight,
    MovementDirection::Left,
    MovementDirection::Right,
    MovementDirection::Backward,
    MovementDirection::BackwardLeft,
    MovementDirection::BackwardRight,
    MovementDirection::Stop,
];

impl MovementDirection {
    /// Angle added to the heading to get the velocity direction, or `None`
    /// for `Stop`. Left is counterclockwise (positive).
    pub fn offset(self) -> Option<f64> {
        match self {
            MovementDirection::Forward => Some(0.0),
            MovementDirection::ForwardLeft => Some(FRAC_PI_4),
            MovementDirection::ForwardRight => Some(-FRAC_PI_4),
            MovementDirection::Left => Some(FRAC_PI_2),
            MovementDirection::Right => Some(-FRAC_PI_2),
            MovementDirection::Backward => Some(PI),
            MovementDirection::BackwardLeft => Some(3.0 * FRAC_PI_4),
            MovementDirection::BackwardRight => Some(-3.0 * FRAC_PI_4),
            MovementDirection::Stop => None,
        }
    }
}

/// Heading change command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationCommand {
    None,
    SoftLeft,
    SoftRight,
    HardLeft,
    HardRight,
}

pub const ALL_ROTATIONS: [RotationCommand; 5] = [
    RotationCommand::None,
    RotationCommand::SoftLeft,
    RotationCommand::SoftRight,
    RotationCommand::HardLeft,
    RotationCommand::HardRight,
];

/// Discrete weapon action taken once at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponAction {
    #[serde(rename = "CONFIGURE_WIDE")]
    ReconfigureWide,
    #[serde(rename = "CONFIGURE_FOCUSED")]
    ReconfigureFocused,
    #[serde(rename = "MAINTAIN_CONFIG")]
    Maintain,
    #[serde(rename = "LAUNCH_TORPEDO")]
    LaunchProjectile,
}

/// Turning directive for a projectile.
///
/// Each directive names a total heading change spread evenly over the whole
/// turn, so a projectile completes its turn gradually like a vessel does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectileTurn {
    Straight,
    SoftLeft,
    SoftRight,
    HardLeft,
    HardRight,
    Reverse,
    ReverseLeft,
    ReverseRight,
    Stop,
}

impl ProjectileTurn {
    /// Total heading change over one turn, radians (left positive).
    pub fn turn_angle(self) -> f64 {
        let degrees: f64 = match self {
            ProjectileTurn::Straight | ProjectileTurn::Stop => 0.0,
            ProjectileTurn::SoftLeft => 15.0,
            ProjectileTurn::SoftRight => -15.0,
            ProjectileTurn::HardLeft => 45.0,
            ProjectileTurn::HardRight => -45.0,
            ProjectileTurn::Reverse => 180.0,
            ProjectileTurn::ReverseLeft => 30.0,
            ProjectileTurn::ReverseRight => -30.0,
        };
        degrees.to_radians()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProjectileTurn::Straight => "STRAIGHT",
            ProjectileTurn::SoftLeft => "SOFT_LEFT",
            ProjectileTurn::SoftRight => "SOFT_RIGHT",
            ProjectileTurn::HardLeft => "HARD_LEFT",
            ProjectileTurn::HardRight => "HARD_RIGHT",
            ProjectileTurn::Reverse => "REVERSE",
            ProjectileTurn::ReverseLeft => "REVERSE_LEFT",
            ProjectileTurn::ReverseRight => "REVERSE_RIGHT",
            ProjectileTurn::Stop => "STOP",
        }
    }

    /// Parses the wire name (`HARD_LEFT`, ...).
    pub fn from_name(name: &str) -> Option<ProjectileTurn> {
        match name {
            "STRAIGHT" => Some(ProjectileTurn::Straight),
            "SOFT_LEFT" => Some(ProjectileTurn::SoftLeft),
            "SOFT_RIGHT" => Some(ProjectileTurn::SoftRight),
            "HARD_LEFT" => Some(ProjectileTurn::HardLeft),
            "HARD_RIGHT" => Some(ProjectileTurn::HardRight),
            "REVERSE" => Some(ProjectileTurn::Reverse),
            "REVERSE_LEFT" => Some(ProjectileTurn::ReverseLeft),
            "REVERSE_RIGHT" => Some(ProjectileTurn::ReverseRight),
            "STOP" => Some(ProjectileTurn::Stop),
            _ => None,
        }
    }
}

/// One side's orders for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersRequest {
    pub movement: MovementDirection,
    pub rotation: RotationCommand,
    pub weapon_action: WeaponAction,
    /// Projectile id → raw command (`HARD_LEFT`, `detonate_after:8.5`, ...).
    #[serde(default)]
    pub projectile_commands: BTreeMap<String, String>,
}

impl Default for OrdersRequest {
    /// Hold position: stop, no rotation, keep the weapon as configured.
    fn default() -> Self {
        OrdersRequest {
            movement: MovementDirection::Stop,
            rotation: RotationCommand::None,
            weapon_action: WeaponAction::Maintain,
            projectile_commands: BTreeMap::new(),
        }
    }
}

impl OrdersRequest {
    pub fn new(movement: MovementDirection, rotation: RotationCommand, weapon_action: WeaponAction) -> Self {
        OrdersRequest {
            movement,
            rotation,
            weapon_action,
            projectile_commands: BTreeMap::new(),
        }
    }

    /// Adds a raw projectile command.
    pub fn with_projectile_command(mut self, id: impl Into<String>, command: impl Into<String>) -> Self {
        self.projectile_commands.insert(id.into(), command.into());
        self
    }
}
