//! Pin assignments and timing calibration for the H-bridge.
//!
//! A `Config` is built once by the application, usually from a JSON document,
//! and lent to the motor controller for the rest of the program.

use serde::{Deserialize, Serialize};

use crate::utils::controllers::{pins::PinId, Motor};

/// Wiring and calibration of the differential drive.
///
/// Serialized as JSON; any missing field falls back to [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Left motor, H-bridge line A.
    pub motor_left_a: PinId,
    /// Left motor, H-bridge line B.
    pub motor_left_b: PinId,
    /// Right motor, H-bridge line A.
    pub motor_right_a: PinId,
    /// Right motor, H-bridge line B.
    pub motor_right_b: PinId,
    /// Time (ms) to rotate the chassis 90 degrees in place.
    pub turn_millis: u32,
    /// Time (ms) to advance the chassis one distance unit.
    pub step_millis: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            motor_left_a: 0,
            motor_left_b: 1,
            motor_right_a: 2,
            motor_right_b: 3,
            turn_millis: 300,
            step_millis: 150,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The `(a, b)` control lines of `motor`.
    pub fn pins(
        &self,
        motor: Motor,
    ) -> (PinId, PinId) {
        match motor {
            Motor::Left => (self.motor_left_a, self.motor_left_b),
            Motor::Right => (self.motor_right_a, self.motor_right_b),
        }
    }

    /// All four control lines, left pair first.
    pub fn all_pins(&self) -> [PinId; 4] {
        [
            self.motor_left_a,
            self.motor_left_b,
            self.motor_right_a,
            self.motor_right_b,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full() {
        let cfg = Config::from_json(
            r#"{"motor_left_a":5,"motor_left_b":6,"motor_right_a":9,"motor_right_b":10,
                "turn_millis":420,"step_millis":90}"#,
        )
        .unwrap();
        assert_eq!(cfg.pins(Motor::Left), (5, 6));
        assert_eq!(cfg.pins(Motor::Right), (9, 10));
        assert_eq!(cfg.turn_millis, 420);
        assert_eq!(cfg.step_millis, 90);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let cfg = Config::from_json(r#"{"turn_millis":250}"#).unwrap();
        assert_eq!(cfg.turn_millis, 250);
        assert_eq!(cfg.step_millis, 150);
        assert_eq!(cfg.all_pins(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        assert!(Config::from_json(r#"{"motor_left_a":"D5"}"#).is_err());
        assert!(Config::from_json(r#"{"turn_millis":-1}"#).is_err());
    }
}
