//! Server configuration
//!
//! Defaults, then an optional TOML file, then `POSELAB__*` environment
//! variables (`POSELAB__RATE_LIMIT__BURST_SIZE=60`).

use activity::SquatThresholds;
use config::{Config, ConfigError, Environment, File};
use realtime::RealtimeConfig;
use sequence::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitConfig;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "poselab.toml";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
    pub log_format: LogFormat,
    /// Concurrent streaming sessions
    pub max_sessions: usize,
    /// Frames accepted in one batch request
    pub max_batch_frames: usize,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
    pub rate_limit: RateLimitConfig,
    pub engine: EngineConfig,
    pub realtime: RealtimeConfig,
    pub squat: SquatThresholds,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            max_sessions: 64,
            max_batch_frames: 2000,
            max_body_bytes: 8 * 1024 * 1024,
            rate_limit: RateLimitConfig::default(),
            engine: EngineConfig::default(),
            realtime: RealtimeConfig::default(),
            squat: SquatThresholds::default(),
        }
    }
}

impl ApiConfig {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`]) layered under the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);
        Config::builder()
            .add_source(File::with_name(file).required(path.is_some()))
            .add_source(Environment::with_prefix("POSELAB").separator("__"))
            .build()?
            .try_deserialize()
    }
}
