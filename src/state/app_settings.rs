use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BALLS_PER_OVER: u8 = 6;
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 400;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Only drives the "over complete" prompt; the scorer never rolls overs itself.
    pub balls_per_over: u8,
    pub replay_interval: Duration,
    pub replay_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            replay_interval: Duration::from_millis(DEFAULT_REPLAY_INTERVAL_MS),
            replay_path: None,
        }
    }
}

impl AppSettings {
    /// Defaults, overridden by CRICTUI_LOG_LEVEL, CRICTUI_BALLS_PER_OVER and
    /// CRICTUI_REPLAY_INTERVAL_MS.
    pub fn load() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: var("CRICTUI_LOG_LEVEL").and_then(|v| parse_log_level(&v)),
            balls_per_over: var("CRICTUI_BALLS_PER_OVER")
                .and_then(|v| v.trim().parse::<u8>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.balls_per_over),
            replay_interval: var("CRICTUI_REPLAY_INTERVAL_MS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.replay_interval),
            ..defaults
        }
    }
}

fn parse_log_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse::<LevelFilter>().ok()
}
