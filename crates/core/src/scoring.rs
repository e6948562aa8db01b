//! Scoring module - line clear points, level progression and gravity speed
//!
//! - Line clears award `LINE_SCORES[lines] * level`, using the level in effect
//!   before the new lines are counted.
//! - Level is `lines / 10 + 1`, so it depends only on the cumulative line count.
//! - Gravity interval shrinks linearly with level down to a floor.

use crate::types::{
    INITIAL_SPEED_MS, LEVEL_SPEED_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_SPEED_MS,
};

/// Calculate line clear score
/// lines: number of lines cleared (0-4, larger values score as 4)
/// level: current level (1-based)
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity curve parameters (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityConfig {
    pub initial_ms: u32,
    pub min_ms: u32,
    pub step_ms: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            initial_ms: INITIAL_SPEED_MS,
            min_ms: MIN_SPEED_MS,
            step_ms: LEVEL_SPEED_STEP_MS,
        }
    }
}

impl GravityConfig {
    /// Get drop interval for a level (in milliseconds)
    ///
    /// `max(min_ms, initial_ms - (level - 1) * step_ms)`, saturating at both ends.
    pub fn interval_ms(&self, level: u32) -> u32 {
        let decrement = level.saturating_sub(1).saturating_mul(self.step_ms);
        self.initial_ms.saturating_sub(decrement).max(self.min_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 600);
        assert_eq!(line_clear_score(4, 1), 1000);

        // Level 3
        assert_eq!(line_clear_score(1, 3), 300);
        assert_eq!(line_clear_score(4, 3), 3000);
    }

    #[test]
    fn test_line_score_clamps_large_clears() {
        assert_eq!(line_clear_score(7, 2), 2000);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        let g = GravityConfig::default();
        assert_eq!(g.interval_ms(1), 500);
        assert_eq!(g.interval_ms(2), 450);
        assert_eq!(g.interval_ms(8), 150);
        assert_eq!(g.interval_ms(9), 100);
        assert_eq!(g.interval_ms(20), 100); // Floor
        assert_eq!(g.interval_ms(u32::MAX), 100);
    }

    #[test]
    fn test_level_zero_treated_as_first() {
        let g = GravityConfig::default();
        assert_eq!(g.interval_ms(0), g.interval_ms(1));
    }

    #[test]
    fn test_custom_gravity() {
        let g = GravityConfig {
            initial_ms: 1000,
            min_ms: 200,
            step_ms: 300,
        };
        assert_eq!(g.interval_ms(2), 700);
        assert_eq!(g.interval_ms(4), 200);
    }
}
