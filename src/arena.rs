//! Scripted match play.
//!
//! Runs whole matches by asking an `OrderSource` for each side's orders
//! every turn and feeding them to the resolver. Both sides are asked at
//! the same time; a side whose source fails or answers too late holds
//! position for the turn. Records the pre-turn snapshot, both sides'
//! orders and the turn's events, so a match can be replayed or inspected
//! later. Batches can run in parallel with rayon.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::battle::{
    BattleState, MovementDirection, OrdersRequest, ProjectileTurn, RotationCommand, Side, VesselState,
    WeaponAction, WeaponMode, ALL_MOVEMENTS, ALL_ROTATIONS,
};
use crate::config::ParameterSet;
use crate::geometry::{direction_to, signed_bearing};
use crate::protocol::MAX_DETONATION_DELAY;
use crate::resolve::{Event, TurnResolver};

/// How long a side may take to produce its orders unless configured otherwise.
pub const DEFAULT_ORDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a side's orders could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("order source failed: {0}")]
    Failed(String),

    #[error("orders arrived after {elapsed_ms} ms (limit {limit_ms} ms)")]
    Timeout { elapsed_ms: u64, limit_ms: u64 },
}

/// Produces one side's orders for the coming turn.
pub trait OrderSource: Send {
    fn orders(&mut self, side: Side, state: &BattleState) -> Result<OrdersRequest, SourceError>;
}

/// Asks `source` for `side`'s orders and checks the answer against the
/// deadline. A failed or late answer becomes a hold order.
///
/// The source itself is not interrupted; an answer that comes back after
/// `timeout` is discarded.
fn solicit(source: &mut dyn OrderSource, side: Side, state: &BattleState, timeout: Duration) -> OrdersRequest {
    let start = Instant::now();
    let result = source.orders(side, state).and_then(|orders| {
        let elapsed = start.elapsed();
        if elapsed > timeout {
            Err(SourceError::Timeout {
                elapsed_ms: elapsed.as_millis() as u64,
                limit_ms: timeout.as_millis() as u64,
            })
        } else {
            Ok(orders)
        }
    });

    match result {
        Ok(orders) => orders,
        Err(e) => {
            warn!(
                ship = side.as_str(),
                turn = state.turn_number + 1,
                error = %e,
                "no usable orders, holding position"
            );
            OrdersRequest::default()
        }
    }
}

/// Built-in scripted strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Close in, fire focused, launch and guide torpedoes.
    Aggressive,
    /// Back away to long range with wide phasers.
    Defensive,
    /// Circle the opponent with lateral movement.
    Strafe,
    /// Uniformly random orders from a seeded generator.
    Random,
}

pub const ALL_STRATEGIES: [Strategy; 4] = [
    Strategy::Aggressive,
    Strategy::Defensive,
    Strategy::Strafe,
    Strategy::Random,
];

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::Strafe => "strafe",
            Strategy::Random => "random",
        }
    }

    pub fn from_name(name: &str) -> Option<Strategy> {
        ALL_STRATEGIES.into_iter().find(|s| s.name() == name)
    }

    /// Builds an order source. `seed` is only used by `Random`.
    pub fn build(self, params: &ParameterSet, seed: u64) -> Box<dyn OrderSource> {
        let tactics = Tactics::from_params(params);
        match self {
            Strategy::Aggressive => Box::new(Aggressive { tactics }),
            Strategy::Defensive => Box::new(Defensive { tactics }),
            Strategy::Strafe => Box::new(Strafe { tactics }),
            Strategy::Random => Box::new(RandomOrders::seeded(seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numbers the scripted strategies steer by, taken from the parameter set.
#[derive(Debug, Clone, Copy)]
struct Tactics {
    wide_range: f64,
    focused_range: f64,
    launch_cost: f64,
    max_active: usize,
    torpedo_speed: f64,
    blast_radius: f64,
}

impl Tactics {
    fn from_params(params: &ParameterSet) -> Self {
        Tactics {
            wide_range: params.phaser.wide.range_units,
            focused_range: params.phaser.focused.range_units,
            launch_cost: params.torpedo.launch_cost_ae,
            max_active: params.torpedo.max_active_per_ship,
            torpedo_speed: params.torpedo.speed_units_per_second,
            blast_radius: params.torpedo.blast_radius_units,
        }
    }
}

/// Distance and signed bearing (degrees) from `me` to `foe`.
fn sight(me: &VesselState, foe: &VesselState) -> (f64, f64) {
    let distance = me.position.distance(foe.position);
    let bearing = signed_bearing(me.heading, direction_to(me.position, foe.position));
    (distance, bearing.to_degrees())
}

/// Rotation that brings a target at `bearing` degrees toward the bow.
fn turn_toward(bearing: f64) -> RotationCommand {
    match bearing {
        b if b > 20.0 => RotationCommand::HardLeft,
        b if b > 2.0 => RotationCommand::SoftLeft,
        b if b < -20.0 => RotationCommand::HardRight,
        b if b < -2.0 => RotationCommand::SoftRight,
        _ => RotationCommand::None,
    }
}

fn switch_to(current: WeaponMode, wanted: WeaponMode) -> Option<WeaponAction> {
    if current == wanted {
        return None;
    }
    Some(match wanted {
        WeaponMode::Wide => WeaponAction::ReconfigureWide,
        WeaponMode::Focused => WeaponAction::ReconfigureFocused,
    })
}

/// Steers each of `side`'s torpedoes at the opponent, and sets a detonation
/// timer once the opponent is dead ahead and reachable this turn.
fn guide_torpedoes(tactics: &Tactics, side: Side, state: &BattleState) -> BTreeMap<String, String> {
    let foe = state.vessel(side.opponent());
    let mut commands = BTreeMap::new();
    for p in state.projectiles.iter().filter(|p| p.owner == side) {
        let distance = p.position.distance(foe.position);
        let bearing = signed_bearing(p.heading, direction_to(p.position, foe.position)).to_degrees();
        let eta = (distance - tactics.blast_radius / 2.0).max(0.0) / tactics.torpedo_speed;

        let command = if bearing.abs() < 10.0 && eta <= MAX_DETONATION_DELAY {
            format!("detonate_after:{:.1}", eta)
        } else {
            let turn = match bearing {
                b if b > 30.0 => ProjectileTurn::HardLeft,
                b if b > 7.0 => ProjectileTurn::SoftLeft,
                b if b < -30.0 => ProjectileTurn::HardRight,
                b if b < -7.0 => ProjectileTurn::SoftRight,
                _ => ProjectileTurn::Straight,
            };
            turn.as_str().to_string()
        };
        commands.insert(p.id.clone(), command);
    }
    commands
}

/// Closes to focused range, fires focused, launches when energy allows.
pub struct Aggressive {
    tactics: Tactics,
}

impl OrderSource for Aggressive {
    fn orders(&mut self, side: Side, state: &BattleState) -> Result<OrdersRequest, SourceError> {
        let t = &self.tactics;
        let me = state.vessel(side);
        let (distance, bearing) = sight(me, state.vessel(side.opponent()));

        let movement = if distance > t.focused_range * 0.8 {
            MovementDirection::Forward
        } else {
            MovementDirection::Stop
        };
        let torpedo_reach = t.torpedo_speed * MAX_DETONATION_DELAY * 2.0;
        let weapon_action = switch_to(me.weapon_mode, WeaponMode::Focused).unwrap_or(
            if me.energy >= t.launch_cost * 2.0
                && state.active_projectiles(side) < t.max_active
                && distance < torpedo_reach
                && bearing.abs() < 30.0
            {
                WeaponAction::LaunchProjectile
            } else {
                WeaponAction::Maintain
            },
        );

        Ok(OrdersRequest {
            movement,
            rotation: turn_toward(bearing),
            weapon_action,
            projectile_commands: guide_torpedoes(t, side, state),
        })
    }
}

/// Backs off to twice focused range, fighting with wide phasers.
pub struct Defensive {
    tactics: Tactics,
}

impl OrderSource for Defensive {
    fn orders(&mut self, side: Side, state: &BattleState) -> Result<OrdersRequest, SourceError> {
        let t = &self.tactics;
        let me = state.vessel(side);
        let (distance, bearing) = sight(me, state.vessel(side.opponent()));

        let movement = if distance < t.focused_range * 2.0 {
            MovementDirection::Backward
        } else {
            MovementDirection::Stop
        };
        Ok(OrdersRequest {
            movement,
            rotation: turn_toward(bearing),
            weapon_action: switch_to(me.weapon_mode, WeaponMode::Wide).unwrap_or(WeaponAction::Maintain),
            projectile_commands: guide_torpedoes(t, side, state),
        })
    }
}

/// Slides sideways around the opponent, nose on target.
pub struct Strafe {
    tactics: Tactics,
}

impl OrderSource for Strafe {
    fn orders(&mut self, side: Side, state: &BattleState) -> Result<OrdersRequest, SourceError> {
        let t = &self.tactics;
        let me = state.vessel(side);
        let (distance, bearing) = sight(me, state.vessel(side.opponent()));

        let movement = if distance > t.wide_range {
            MovementDirection::ForwardLeft
        } else {
            MovementDirection::Left
        };
        Ok(OrdersRequest {
            movement,
            rotation: turn_toward(bearing),
            weapon_action: switch_to(me.weapon_mode, WeaponMode::Wide).unwrap_or(WeaponAction::Maintain),
            projectile_commands: guide_torpedoes(t, side, state),
        })
    }
}

/// Random orders drawn from a seeded `SmallRng`.
pub struct RandomOrders {
    rng: SmallRng,
}

impl RandomOrders {
    /// Seed 0 draws from OS entropy.
    pub fn seeded(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomOrders { rng }
    }
}

const RANDOM_WEAPON_ACTIONS: [WeaponAction; 6] = [
    WeaponAction::Maintain,
    WeaponAction::Maintain,
    WeaponAction::Maintain,
    WeaponAction::ReconfigureWide,
    WeaponAction::ReconfigureFocused,
    WeaponAction::LaunchProjectile,
];

impl OrderSource for RandomOrders {
    fn orders(&mut self, _side: Side, _state: &BattleState) -> Result<OrdersRequest, SourceError> {
        let movement = ALL_MOVEMENTS[self.rng.gen_range(0..ALL_MOVEMENTS.len())];
        let rotation = ALL_ROTATIONS[self.rng.gen_range(0..ALL_ROTATIONS.len())];
        let weapon_action = RANDOM_WEAPON_ACTIONS[self.rng.gen_range(0..RANDOM_WEAPON_ACTIONS.len())];
        Ok(OrdersRequest::new(movement, rotation, weapon_action))
    }
}

/// Match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    ShipA,
    ShipB,
    Tie,
}

impl Winner {
    /// Winner given the final state: a side wins when only its opponent's
    /// shields are gone; anything else is a tie.
    pub fn judge(state: &BattleState) -> Winner {
        match (state.vessel_a.is_destroyed(), state.vessel_b.is_destroyed()) {
            (false, true) => Winner::ShipA,
            (true, false) => Winner::ShipB,
            _ => Winner::Tie,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Winner::ShipA => "ship_a",
            Winner::ShipB => "ship_b",
            Winner::Tie => "tie",
        }
    }
}

/// One resolved turn of a match.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    /// State before the turn was resolved.
    pub state: BattleState,
    pub orders_a: OrdersRequest,
    pub orders_b: OrdersRequest,
    pub events: Vec<Event>,
}

/// A complete match transcript.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub match_id: usize,
    pub strategy_a: String,
    pub strategy_b: String,
    pub turns: Vec<TurnRecord>,
    pub final_state: BattleState,
    pub winner: Winner,
}

/// Plays one match from the opening position until a vessel is destroyed
/// or `max_turns` turns have been resolved. Each turn both sources are
/// asked concurrently, each with its own `order_timeout`.
pub fn play_match(
    params: &ParameterSet,
    source_a: &mut dyn OrderSource,
    source_b: &mut dyn OrderSource,
    max_turns: u32,
    order_timeout: Duration,
) -> MatchRecord {
    let resolver = TurnResolver::new(params.clone());
    let mut state = BattleState::opening(params);
    let mut turns = Vec::new();

    while state.turn_number < max_turns
        && !state.vessel_a.is_destroyed()
        && !state.vessel_b.is_destroyed()
    {
        let (orders_a, orders_b) = rayon::join(
            || solicit(&mut *source_a, Side::A, &state, order_timeout),
            || solicit(&mut *source_b, Side::B, &state, order_timeout),
        );
        let (next, events) = resolver.resolve_turn(&state, &orders_a, &orders_b);
        turns.push(TurnRecord {
            turn: next.turn_number,
            state: state.snapshot(),
            orders_a,
            orders_b,
            events,
        });
        state = next;
    }

    MatchRecord {
        match_id: 0,
        strategy_a: String::new(),
        strategy_b: String::new(),
        turns,
        winner: Winner::judge(&state),
        final_state: state,
    }
}

/// Errors raised while running a batch.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a batch of scripted matches.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub params: ParameterSet,
    pub num_matches: usize,
    pub max_turns: u32,
    pub strategy_a: Strategy,
    pub strategy_b: Strategy,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress logging.
    pub quiet: bool,
    /// Per-side limit for producing one turn's orders.
    pub order_timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            params: ParameterSet::default(),
            num_matches: 4,
            max_turns: 40,
            strategy_a: Strategy::Aggressive,
            strategy_b: Strategy::Defensive,
            threads: 1,
            seed: 0,
            quiet: false,
            order_timeout: DEFAULT_ORDER_TIMEOUT,
        }
    }
}

/// Per-match seeds derive from the batch seed, one stream per side.
fn match_seeds(config: &MatchConfig, match_id: usize) -> (u64, u64) {
    if config.seed == 0 {
        return (0, 0);
    }
    let base = config.seed.wrapping_add((match_id as u64).wrapping_mul(2));
    (base, base.wrapping_add(1))
}

fn run_one(config: &MatchConfig, match_id: usize) -> MatchRecord {
    let (seed_a, seed_b) = match_seeds(config, match_id);
    let mut source_a = config.strategy_a.build(&config.params, seed_a);
    let mut source_b = config.strategy_b.build(&config.params, seed_b);

    let start = Instant::now();
    let mut record = play_match(
        &config.params,
        source_a.as_mut(),
        source_b.as_mut(),
        config.max_turns,
        config.order_timeout,
    );
    record.match_id = match_id;
    record.strategy_a = config.strategy_a.name().to_string();
    record.strategy_b = config.strategy_b.name().to_string();

    if !config.quiet {
        info!(
            match_id,
            winner = record.winner.as_str(),
            turns = record.turns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "match finished"
        );
    }
    record
}

/// Plays a batch of matches. Records come back in match-id order.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
pub fn play_matches(config: &MatchConfig) -> Result<Vec<MatchRecord>, ArenaError> {
    if config.threads <= 1 {
        return Ok((0..config.num_matches).map(|i| run_one(config, i)).collect());
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(pool.install(|| {
        (0..config.num_matches)
            .into_par_iter()
            .map(|i| run_one(config, i))
            .collect()
    }))
}

/// Writes match records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs a win/loss summary for a batch.
pub fn log_summary(records: &[MatchRecord]) {
    let count = |w: Winner| records.iter().filter(|r| r.winner == w).count();
    let total_turns: usize = records.iter().map(|r| r.turns.len()).sum();
    info!(
        matches = records.len(),
        ship_a_wins = count(Winner::ShipA),
        ship_b_wins = count(Winner::ShipB),
        ties = count(Winner::Tie),
        avg_turns = total_turns as f64 / records.len().max(1) as f64,
        "batch summary"
    );
}
