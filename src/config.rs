use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    /// Whole-request timeout; `0` waits indefinitely.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Delay between revealing consecutive tracks; `0` shows all at once.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tick_rate() -> f64 {
    30.0
}

const TICK_RATE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=120.0;

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_reveal_delay_ms() -> u64 {
    40
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            tick_rate_fps: default_tick_rate(),
            request_timeout_secs: default_request_timeout_secs(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Interval between tick events, with the configured rate clamped to
    /// 1..=120 fps. Non-finite or non-positive rates use the default.
    pub fn tick_period(&self) -> Duration {
        let fps = self.tick_rate_fps;
        let fps = if !fps.is_finite() || fps <= 0.0 {
            tracing::warn!(fps, "invalid tick_rate_fps, using default");
            default_tick_rate()
        } else if !TICK_RATE_RANGE.contains(&fps) {
            let clamped = fps.clamp(*TICK_RATE_RANGE.start(), *TICK_RATE_RANGE.end());
            tracing::warn!(fps, clamped, "tick_rate_fps out of range");
            clamped
        } else {
            fps
        };
        Duration::from_secs_f64(1.0 / fps)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/tracktrace/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    parse_config(&contents)
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!("ignoring invalid config file: {e}");
        AppConfig::default()
    })
}
