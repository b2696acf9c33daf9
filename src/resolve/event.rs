//! Turn event log entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of notable occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TorpedoLaunched,
    PhaserReconfigured,
    PhaserHit,
    TorpedoDetonated,
    BlastDamage,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::TorpedoLaunched => "torpedo_launched",
            EventKind::PhaserReconfigured => "phaser_reconfigured",
            EventKind::PhaserHit => "phaser_hit",
            EventKind::TorpedoDetonated => "torpedo_detonated",
            EventKind::BlastDamage => "blast_damage",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a projectile came to detonate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetonationType {
    /// Commanded countdown expired.
    Timed,
    /// Fuel ran out.
    Auto,
}

impl DetonationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DetonationType::Timed => "timed",
            DetonationType::Auto => "auto",
        }
    }
}

/// One append-only log entry. `data` keeps insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub turn: u32,
    pub data: Map<String, Value>,
}

impl Event {
    pub fn new(kind: EventKind, turn: u32) -> Self {
        Event {
            kind,
            turn,
            data: Map::new(),
        }
    }

    /// Appends one payload field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Numeric payload field, if present.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    /// String payload field, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag_and_ordered_data() {
        let event = Event::new(EventKind::PhaserHit, 4)
            .with("attacker", "ship_a")
            .with("target", "ship_b")
            .with("damage", 15.0);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"phaser_hit","turn":4,"data":{"attacker":"ship_a","target":"ship_b","damage":15.0}}"#
        );
    }

    #[test]
    fn typed_accessors() {
        let event = Event::new(EventKind::BlastDamage, 1)
            .with("ship", "ship_b")
            .with("damage", 0.075);
        assert_eq!(event.text("ship"), Some("ship_b"));
        assert_eq!(event.number("damage"), Some(0.075));
        assert_eq!(event.number("ship"), None);
        assert!(event.get("missing").is_none());
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in [
            EventKind::TorpedoLaunched,
            EventKind::PhaserReconfigured,
            EventKind::PhaserHit,
            EventKind::TorpedoDetonated,
            EventKind::BlastDamage,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}
