//! OSRM HTTP adapter for leg estimates.
//!
//! Any provider failure (connect error, timeout, non-success status,
//! unusable body) falls back to the haversine estimate.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::haversine::HaversineEstimator;
use crate::traits::{Coordinate, TravelEstimate, TravelEstimator};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
    fallback: HaversineEstimator,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        Self::with_fallback(config, HaversineEstimator::default())
    }

    pub fn with_fallback(config: OsrmConfig, fallback: HaversineEstimator) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            fallback,
        })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.lng,
            from.lat,
            to.lng,
            to.lat
        )
    }

    fn fetch(&self, from: Coordinate, to: Coordinate) -> std::result::Result<TravelEstimate, String> {
        let mut request = self.client.get(self.route_url(from, to));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let body = request
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())
            .map_err(|err| err.to_string())?;

        if body.code != "Ok" {
            return Err(format!("provider answered code {}", body.code));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| "provider returned no routes".to_string())?;

        Ok(TravelEstimate::new(
            (route.duration / 60.0).round().max(0.0) as i32,
            route.distance / 1000.0,
        ))
    }
}

impl TravelEstimator for OsrmClient {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        match self.fetch(from, to) {
            Ok(estimate) => {
                debug!(minutes = estimate.duration_minutes, "osrm leg estimate");
                estimate
            }
            Err(reason) => {
                warn!(%reason, "routing provider unavailable, using haversine estimate");
                self.fallback.estimate(from, to)
            }
        }
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Seconds.
    duration: f64,
    /// Meters.
    distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> OsrmClient {
        OsrmClient::new(OsrmConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            ..OsrmConfig::default()
        })
        .expect("build client")
    }

    #[test]
    fn test_route_url_is_lng_lat_order() {
        let client = unreachable_client();
        let url = client.route_url(Coordinate::new(36.1, -115.2), Coordinate::new(36.3, -115.4));
        assert_eq!(
            url,
            "http://127.0.0.1:1/route/v1/car/-115.200000,36.100000;-115.400000,36.300000?overview=false"
        );
    }

    #[test]
    fn test_unreachable_provider_falls_back_to_haversine() {
        let client = unreachable_client();
        let from = Coordinate::new(36.1126, -115.1767);
        let to = Coordinate::new(36.1707, -115.1440);

        let estimate = client.estimate(from, to);
        assert_eq!(estimate, HaversineEstimator::default().estimate(from, to));
    }

    #[test]
    fn test_parse_route_response() {
        let body = r#"{"code":"Ok","routes":[{"duration":905.4,"distance":12345.0,"weight":1}]}"#;
        let parsed: OsrmRouteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, "Ok");
        assert_eq!(parsed.routes.len(), 1);
        assert!((parsed.routes[0].duration - 905.4).abs() < 1e-9);
    }

    #[test]
    fn test_parse_error_response_without_routes() {
        let body = r#"{"code":"NoRoute","message":"Impossible route"}"#;
        let parsed: OsrmRouteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, "NoRoute");
        assert!(parsed.routes.is_empty());
    }
}
