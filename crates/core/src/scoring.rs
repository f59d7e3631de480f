//! Scoring module - lock points, line bonus and the speed ramp
//!
//! The line bonus doubles per simultaneous line: `100 * 2^lines`, or nothing
//! when no line completed. Together with the flat lock score that gives
//! 25 / 225 / 425 / 825 / 1625 for 0..=4 lines.

use crate::types::{LINE_BONUS_BASE, LOCK_SCORE, MIN_GRAVITY_PERIOD, SPEEDUP_EVERY};

/// Bonus for completing `lines` rows with one lock.
pub fn line_bonus(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    // Only four rows can complete at once in play; saturate anything wilder.
    let shift = lines.min(31) as u32;
    LINE_BONUS_BASE.saturating_mul(1u32 << shift)
}

/// Total points for one lock that completed `lines` rows.
pub fn lock_points(lines: usize) -> u32 {
    LOCK_SCORE.saturating_add(line_bonus(lines))
}

/// Gravity period after the `pieces_placed`-th lock.
///
/// Every [`SPEEDUP_EVERY`]th lock takes one tick off, never going under
/// [`MIN_GRAVITY_PERIOD`].
pub fn gravity_period_after(pieces_placed: u32, current: u32) -> u32 {
    if pieces_placed > 0 && pieces_placed % SPEEDUP_EVERY == 0 && current > MIN_GRAVITY_PERIOD {
        current - 1
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INITIAL_GRAVITY_PERIOD;

    #[test]
    fn test_line_bonus_curve() {
        assert_eq!(line_bonus(0), 0);
        assert_eq!(line_bonus(1), 200);
        assert_eq!(line_bonus(2), 400);
        assert_eq!(line_bonus(3), 800);
        assert_eq!(line_bonus(4), 1600);
    }

    #[test]
    fn test_lock_points() {
        assert_eq!(lock_points(0), 25);
        assert_eq!(lock_points(1), 225);
        assert_eq!(lock_points(2), 425);
        assert_eq!(lock_points(4), 1625);
    }

    #[test]
    fn test_line_bonus_saturates() {
        assert_eq!(line_bonus(40), u32::MAX);
    }

    #[test]
    fn test_speed_ramp_every_tenth_piece() {
        let mut period = INITIAL_GRAVITY_PERIOD;
        for placed in 1..=9 {
            period = gravity_period_after(placed, period);
        }
        assert_eq!(period, 20);
        period = gravity_period_after(10, period);
        assert_eq!(period, 19);
        period = gravity_period_after(11, period);
        assert_eq!(period, 19);
    }

    #[test]
    fn test_speed_ramp_floor() {
        let mut period = INITIAL_GRAVITY_PERIOD;
        for placed in 1..=1000 {
            period = gravity_period_after(placed, period);
        }
        assert_eq!(period, MIN_GRAVITY_PERIOD);
    }
}
