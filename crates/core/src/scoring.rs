//! Scoring module - points, line counting and level progression
//!
//! - A successful spawn is worth [`SPAWN_SCORE`] points.
//! - Each cleared line is worth [`LINE_SCORE`] points, independent of level.
//! - Every [`LINES_PER_LEVEL`] lines the level advances by one, up to [`MAX_LEVEL`].

use crate::types::{LEVEL_DELAYS_MS, LINES_PER_LEVEL, LINE_SCORE, MAX_LEVEL};

/// Gravity interval for a 1-based level. Levels past the table use the fastest entry.
pub fn level_delay_ms(level: u32) -> u32 {
    let idx = (level.max(1) - 1) as usize;
    LEVEL_DELAYS_MS[idx.min(LEVEL_DELAYS_MS.len() - 1)]
}

/// Points for `lines` cleared lines.
pub fn calculate_line_score(lines: u32) -> u32 {
    lines.saturating_mul(LINE_SCORE)
}

/// Result of accounting one cleared line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineProgress {
    pub level: u32,
    pub lines_this_level: u32,
    /// Set when this line advanced the level.
    pub leveled_up: bool,
}

/// Account one cleared line against the per-level counter.
///
/// The counter resets every [`LINES_PER_LEVEL`] lines even when the level is
/// already capped; only the level itself stops advancing.
pub fn next_level(level: u32, lines_this_level: u32) -> LineProgress {
    let counted = lines_this_level + 1;
    if counted < LINES_PER_LEVEL {
        return LineProgress {
            level,
            lines_this_level: counted,
            leveled_up: false,
        };
    }
    let advanced = level < MAX_LEVEL;
    LineProgress {
        level: if advanced { level + 1 } else { level },
        lines_this_level: 0,
        leveled_up: advanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_delay_table() {
        assert_eq!(level_delay_ms(1), 1000);
        assert_eq!(level_delay_ms(2), 750);
        assert_eq!(level_delay_ms(6), 75);
        // Out-of-table levels clamp instead of indexing past the end.
        assert_eq!(level_delay_ms(0), 1000);
        assert_eq!(level_delay_ms(42), 75);
    }

    #[test]
    fn test_line_score() {
        assert_eq!(calculate_line_score(0), 0);
        assert_eq!(calculate_line_score(1), 10);
        assert_eq!(calculate_line_score(4), 40);
    }

    #[test]
    fn test_level_advances_on_tenth_line() {
        let mut progress = LineProgress {
            level: 1,
            ..Default::default()
        };
        for _ in 0..9 {
            progress = next_level(progress.level, progress.lines_this_level);
            assert!(!progress.leveled_up);
        }
        assert_eq!(progress.lines_this_level, 9);

        progress = next_level(progress.level, progress.lines_this_level);
        assert!(progress.leveled_up);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.lines_this_level, 0);
    }

    #[test]
    fn test_level_capped_at_table_length() {
        let progress = next_level(MAX_LEVEL, LINES_PER_LEVEL - 1);
        assert_eq!(progress.level, MAX_LEVEL);
        assert_eq!(progress.lines_this_level, 0);
        assert!(!progress.leveled_up);
    }
}
