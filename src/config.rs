//! Configuration management

use tracing::info;

use crate::cache::CachingEstimator;
use crate::error::{PlannerError, Result};
use crate::haversine::{DEFAULT_SPEED_KMH, HaversineEstimator};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::traits::TravelEstimator;

/// Planner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Routing provider base URL (optional, haversine only when unset)
    pub routing_base_url: Option<String>,

    /// Provider routing profile
    pub routing_profile: String,

    /// Bearer token for the provider
    pub routing_api_key: Option<String>,

    /// Per-request provider timeout
    pub routing_timeout_secs: u64,

    /// Average speed for the geometric fallback
    pub fallback_speed_kmh: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            routing_base_url: None,
            routing_profile: "car".to_string(),
            routing_api_key: None,
            routing_timeout_secs: 10,
            fallback_speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let routing_timeout_secs = match get("ROUTING_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| PlannerError::InvalidConfig {
                key: "ROUTING_TIMEOUT_SECS",
                value: raw.clone(),
            })?,
            None => defaults.routing_timeout_secs,
        };

        let fallback_speed_kmh = match get("FALLBACK_SPEED_KMH") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|speed| speed.is_finite() && *speed > 0.0)
                .ok_or_else(|| PlannerError::InvalidConfig {
                    key: "FALLBACK_SPEED_KMH",
                    value: raw.clone(),
                })?,
            None => defaults.fallback_speed_kmh,
        };

        Ok(Self {
            routing_base_url: get("ROUTING_BASE_URL"),
            routing_profile: get("ROUTING_PROFILE").unwrap_or(defaults.routing_profile),
            routing_api_key: get("ROUTING_API_KEY"),
            routing_timeout_secs,
            fallback_speed_kmh,
        })
    }
}

/// Create the travel estimator the configuration asks for.
///
/// A configured provider is wrapped in a cache and falls back to haversine
/// per call; without one, haversine is used directly.
pub fn build_estimator(config: &PlannerConfig) -> Result<Box<dyn TravelEstimator>> {
    let fallback = HaversineEstimator::new(config.fallback_speed_kmh);

    match &config.routing_base_url {
        Some(base_url) => {
            let client = OsrmClient::with_fallback(
                OsrmConfig {
                    base_url: base_url.clone(),
                    profile: config.routing_profile.clone(),
                    api_key: config.routing_api_key.clone(),
                    timeout_secs: config.routing_timeout_secs,
                },
                fallback,
            )?;
            info!(%base_url, "using routing provider");
            Ok(Box::new(CachingEstimator::new(client)))
        }
        None => {
            info!("routing provider not configured, using haversine estimates");
            Ok(Box::new(fallback))
        }
    }
}
