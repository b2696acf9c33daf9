//! Engine session state.
//!
//! Holds the parameter set, the current battle state and any orders staged
//! for the next turn. The stdio front end in `main.rs` drives it one
//! command at a time.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::battle::{BattleState, OrdersRequest, Side};
use crate::config::{ConfigError, ParameterSet};
use crate::resolve::{Event, TurnResolver};

/// Errors surfaced to the engine's caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no battle state; send 'newmatch' or 'state <json>' first")]
    NoState,

    #[error("invalid battle state: {0}")]
    InvalidState(#[source] serde_json::Error),

    #[error("invalid orders for {side}: {source}")]
    InvalidOrders {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one `resolve` command.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub state: BattleState,
    pub events: Vec<Event>,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    resolver: TurnResolver,
    state: Option<BattleState>,
    orders_a: Option<OrdersRequest>,
    orders_b: Option<OrdersRequest>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(ParameterSet::default())
    }
}

impl Engine {
    /// Creates an engine with no battle state.
    pub fn new(params: ParameterSet) -> Self {
        Engine {
            resolver: TurnResolver::new(params),
            state: None,
            orders_a: None,
            orders_b: None,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        self.resolver.params()
    }

    pub fn state(&self) -> Option<&BattleState> {
        self.state.as_ref()
    }

    /// Loads and validates a parameter file. The current state is kept.
    pub fn load_config<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EngineError> {
        let params = ParameterSet::load(path.as_ref())?;
        info!(path = %path.as_ref().display(), "parameters loaded");
        self.resolver = TurnResolver::new(params);
        Ok(())
    }

    /// Resets to the opening position and drops staged orders.
    pub fn new_match(&mut self) {
        self.state = Some(BattleState::opening(self.params()));
        self.clear_orders();
        info!("new match");
    }

    /// Replaces the current state with a JSON document.
    pub fn set_state(&mut self, json: &str) -> Result<(), EngineError> {
        let state: BattleState = serde_json::from_str(json).map_err(EngineError::InvalidState)?;
        self.state = Some(state);
        Ok(())
    }

    /// Stages one side's orders for the next turn, replacing earlier ones.
    pub fn stage_orders(&mut self, side: Side, json: &str) -> Result<(), EngineError> {
        let orders: OrdersRequest =
            serde_json::from_str(json).map_err(|source| EngineError::InvalidOrders { side, source })?;
        match side {
            Side::A => self.orders_a = Some(orders),
            Side::B => self.orders_b = Some(orders),
        }
        Ok(())
    }

    fn clear_orders(&mut self) {
        self.orders_a = None;
        self.orders_b = None;
    }

    /// Resolves one turn with the staged orders. Sides without staged
    /// orders hold position. Staged orders are consumed either way.
    pub fn resolve(&mut self) -> Result<TurnOutcome, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::NoState)?;
        let orders_a = self.orders_a.take().unwrap_or_default();
        let orders_b = self.orders_b.take().unwrap_or_default();

        let (next, events) = self.resolver.resolve_turn(state, &orders_a, &orders_b);
        self.state = Some(next.clone());
        Ok(TurnOutcome { state: next, events })
    }

    /// Handles `resolve`: writes the outcome as one JSON line.
    pub fn handle_resolve<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        let outcome = self.resolve()?;
        write_json_line(out, &outcome)
    }

    /// Handles `show`: writes the current state as one JSON line.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::NoState)?;
        write_json_line(out, state)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "readyok")?;
        out.flush()?;
        Ok(())
    }
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), EngineError> {
    serde_json::to_writer(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
