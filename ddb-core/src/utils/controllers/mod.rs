//! Module Exports
//!
//! - `hbridge`: timed motion primitives over a two-motor H-bridge.
//! - `pins`: the digital pin capability and an `embedded-hal` pin bank.

pub mod hbridge;
pub mod pins;

use serde::{Deserialize, Serialize};

pub use hbridge::{DriveError, HBridge, Motor, Rotation};
pub use pins::{BankError, PinBank, PinDriver, PinId};

/// Motion command variants accepted by [`HBridge::execute_command`].
///
/// Serialized as JSON with tag `"mc"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "mc", rename_all = "snake_case")] // mc = motion command
pub enum MotionCommand {
    /// Rotate in place for `ms` milliseconds; positive is clockwise.
    Turn { ms: i32 },
    /// Rotate by `n` quarter-turns.
    Quarter { n: i8 },
    /// Drive `n` units; negative is backwards.
    Straight { n: i8 },
    /// Stop both motors, braking or coasting.
    Stop { brake: bool },
}

impl MotionCommand {
    /// Parse a single command from JSON, e.g. `{"mc":"quarter","n":-1}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            MotionCommand::from_json(r#"{"mc":"quarter","n":-1}"#).unwrap(),
            MotionCommand::Quarter { n: -1 }
        );
        assert_eq!(
            MotionCommand::from_json(r#"{"mc":"straight","n":3}"#).unwrap(),
            MotionCommand::Straight { n: 3 }
        );
        assert_eq!(
            MotionCommand::from_json(r#"{"mc":"turn","ms":-450}"#).unwrap(),
            MotionCommand::Turn { ms: -450 }
        );
        assert_eq!(
            MotionCommand::from_json(r#"{"mc":"stop","brake":true}"#).unwrap(),
            MotionCommand::Stop { brake: true }
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(MotionCommand::from_json(r#"{"mc":"straight","n":200}"#).is_err());
        assert!(MotionCommand::from_json(r#"{"mc":"spin","n":1}"#).is_err());
        assert!(MotionCommand::from_json(r#"{"n":1}"#).is_err());
    }
}
