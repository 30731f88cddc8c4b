//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP limits on the evaluation routes via tower_governor. GCRA needs no
//! background refill task.

use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tracing::warn;

/// Governor config with X-RateLimit-* headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Seconds to replenish one request
    pub per_second: u64,
    /// Requests that can be made immediately
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 1,
            burst_size: 30,
        }
    }
}

impl RateLimitConfig {
    /// Tight quota for shared deployments
    pub fn strict() -> Self {
        Self {
            per_second: 2,
            burst_size: 10,
            ..Default::default()
        }
    }

    /// Live streaming pushes a frame per tick, so allow a deep burst
    pub fn lenient() -> Self {
        Self {
            per_second: 1,
            burst_size: 120,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Build the governor config, `None` when disabled or misconfigured.
///
/// Keys on the peer IP, so the server must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_governor_config(config: &RateLimitConfig) -> Option<Arc<DefaultGovernorConfig>> {
    if !config.enabled {
        return None;
    }
    let built = GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish();
    if built.is_none() {
        warn!(
            "Invalid rate limit (per_second={}, burst={}), limiting disabled",
            config.per_second, config.burst_size
        );
    }
    built.map(Arc::new)
}
