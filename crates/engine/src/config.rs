//! Engine configuration.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use blockfall_core::Timings;
use blockfall_types::HARD_DROP_STEP_MS;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    /// Capacity of the command queue.
    pub queue_capacity: usize,
    pub hard_drop_step_ms: u32,
    pub timings: Timings,
    pub log_path: Option<String>,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            queue_capacity: 64,
            hard_drop_step_ms: HARD_DROP_STEP_MS,
            timings: Timings::default(),
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

impl EngineConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let mut timings = defaults.timings;

        let seed = env_parse("BLOCKFALL_SEED").unwrap_or_else(time_seed);
        let queue_capacity = env_parse("BLOCKFALL_QUEUE").unwrap_or(defaults.queue_capacity);
        let hard_drop_step_ms =
            env_parse("BLOCKFALL_HARD_DROP_MS").unwrap_or(defaults.hard_drop_step_ms);

        timings.banner_ms = env_parse("BLOCKFALL_BANNER_MS").unwrap_or(timings.banner_ms);
        timings.game_over_banner_ms =
            env_parse("BLOCKFALL_GAME_OVER_MS").unwrap_or(timings.game_over_banner_ms);
        timings.clear_flash_ms = env_parse("BLOCKFALL_FLASH_MS").unwrap_or(timings.clear_flash_ms);
        timings.collapse_step_ms =
            env_parse("BLOCKFALL_COLLAPSE_MS").unwrap_or(timings.collapse_step_ms);

        let disable_banners = env::var("BLOCKFALL_DISABLE_BANNERS")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        if disable_banners {
            timings = timings.without_banners();
        }

        let log_path = env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });
        let log_level = env::var("BLOCKFALL_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            seed,
            queue_capacity,
            hard_drop_step_ms,
            timings,
            log_path,
            log_level,
        }
    }

    pub fn hard_drop_step(&self) -> Duration {
        Duration::from_millis(self.hard_drop_step_ms as u64)
    }

    /// Config with a fixed seed, as used by tests and replays.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
