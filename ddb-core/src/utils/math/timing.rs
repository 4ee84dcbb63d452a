//! Duration math for timed motions.
//!
//! Motion commands take narrow signed counts (`i8`) that are scaled by a
//! calibrated per-unit time. All products are computed in a wider type and
//! saturated, so extreme counts or calibration values never wrap.
//!
//! # Example
//! ```rust
//! use ddb_core::utils::math::timing;
//! assert_eq!(timing::turn_duration(300, -2), -600);
//! assert_eq!(timing::straight_duration(150, 3), 450);
//! ```

/// Signed turn duration for `times` quarter-turns of `turn_millis` each.
///
/// The sign follows `times`: positive is clockwise. Saturates at the `i32` bounds.
pub fn turn_duration(
    turn_millis: u32,
    times: i8,
) -> i32 {
    let wide = i64::from(turn_millis) * i64::from(times);
    wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Blocking duration for `units` straight steps of `step_millis` each.
///
/// Direction is carried separately, so only the magnitude of `units` counts.
pub fn straight_duration(
    step_millis: u32,
    units: i8,
) -> u32 {
    u32::from(units.unsigned_abs()).saturating_mul(step_millis)
}

/// Absolute value of a signed duration, defined for `i32::MIN`.
pub fn magnitude(millis: i32) -> u32 {
    millis.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_duration_sign_follows_times() {
        assert_eq!(turn_duration(300, 1), 300);
        assert_eq!(turn_duration(300, -2), -600);
        assert_eq!(turn_duration(300, 0), 0);
    }

    #[test]
    fn test_turn_duration_saturates() {
        assert_eq!(turn_duration(u32::MAX, 127), i32::MAX);
        assert_eq!(turn_duration(u32::MAX, -128), i32::MIN);
        // 20_000_000 * 100 does not fit in i32
        assert_eq!(turn_duration(20_000_000, 100), i32::MAX);
    }

    #[test]
    fn test_straight_duration_uses_magnitude() {
        assert_eq!(straight_duration(150, 3), 450);
        assert_eq!(straight_duration(150, -1), 150);
        assert_eq!(straight_duration(150, i8::MIN), 128 * 150);
        assert_eq!(straight_duration(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn test_magnitude_of_min() {
        assert_eq!(magnitude(i32::MIN), 2_147_483_648);
        assert_eq!(magnitude(-600), 600);
    }
}
