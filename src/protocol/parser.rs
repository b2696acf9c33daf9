//! Engine command parser.
//!
//! Parses incoming stdin lines into structured `Command` variants that the
//! engine main loop can dispatch on. JSON payloads are carried through as
//! raw text; decoding them is the engine's job.

use tracing::warn;

use crate::battle::Side;

/// A parsed line of engine input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a parameter file.
    Config { path: String },

    /// Reset to the opening position.
    NewMatch,

    /// Replace the current battle state with a JSON document.
    State { json: String },

    /// Stage one side's orders for the next `resolve`.
    Orders { side: Side, json: String },

    /// Resolve one turn with the staged orders.
    Resolve,

    /// Print the current battle state.
    Show,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newmatch" => Some(Command::NewMatch),
        "resolve" => Some(Command::Resolve),
        "show" => Some(Command::Show),

        "config" => parse_config(rest),
        "state" => parse_state(rest),
        "orders" => parse_orders(rest),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `config <path>`.
fn parse_config(rest: &str) -> Option<Command> {
    if rest.is_empty() {
        warn!("malformed config: expected 'config <path>'");
        return None;
    }
    Some(Command::Config {
        path: rest.to_string(),
    })
}

/// Parses `state <json>`; the JSON may contain spaces.
fn parse_state(rest: &str) -> Option<Command> {
    if rest.is_empty() {
        warn!("malformed state: expected 'state <json>'");
        return None;
    }
    Some(Command::State {
        json: rest.to_string(),
    })
}

/// Parses `orders <a|b> <json>`.
fn parse_orders(rest: &str) -> Option<Command> {
    let Some((side_token, json)) = rest.split_once(char::is_whitespace) else {
        warn!("malformed orders: expected 'orders <a|b> <json>'");
        return None;
    };
    let json = json.trim();
    if json.is_empty() {
        warn!("malformed orders: missing JSON payload");
        return None;
    }
    match Side::parse(side_token) {
        Some(side) => Some(Command::Orders {
            side,
            json: json.to_string(),
        }),
        None => {
            warn!(side = side_token, "unknown side");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newmatch"), Some(Command::NewMatch));
        assert_eq!(parse_command("resolve"), Some(Command::Resolve));
        assert_eq!(parse_command("  show  "), Some(Command::Show));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_config_path() {
        assert_eq!(
            parse_command("config /etc/skirmish/params.json"),
            Some(Command::Config {
                path: "/etc/skirmish/params.json".to_string()
            })
        );
        assert_eq!(parse_command("config"), None);
    }

    #[test]
    fn parse_state_keeps_whole_payload() {
        let cmd = parse_command(r#"state {"turn_number": 3, "vessel_a": {}}"#).unwrap();
        assert_eq!(
            cmd,
            Command::State {
                json: r#"{"turn_number": 3, "vessel_a": {}}"#.to_string()
            }
        );
    }

    #[test]
    fn parse_orders_side_and_payload() {
        let cmd = parse_command(r#"orders b {"movement": "LEFT"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Orders {
                side: Side::B,
                json: r#"{"movement": "LEFT"}"#.to_string()
            }
        );
        let cmd = parse_command(r#"orders ship_a {}"#).unwrap();
        assert!(matches!(cmd, Command::Orders { side: Side::A, .. }));
    }

    #[test]
    fn parse_orders_rejects_malformed() {
        assert_eq!(parse_command("orders"), None);
        assert_eq!(parse_command("orders a"), None);
        assert_eq!(parse_command("orders c {}"), None);
    }
}
