//! Saved-trip persistence for Ampora
//!
//! A planned trip, together with the stations recommended for it, can be
//! stored against the user's account through the backend API.

use crate::error::{AmporaError, Result};
use crate::logging::get_logger;
use crate::planner::{GeoPoint, RecommendationSet, RouteSummary};
use serde::{Deserialize, Serialize};

/// A named place with optional resolved coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripEndpoint {
    /// Free-form place text as entered by the user
    pub text: String,

    /// Geocoded location, when resolution succeeded
    pub geo: Option<GeoPoint>,
}

/// Trip payload persisted to the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTrip {
    /// Client-generated trip identifier
    pub trip_id: String,

    pub user_id: String,
    pub vehicle_id: String,

    pub start: TripEndpoint,
    pub end: TripEndpoint,
    pub stops: Vec<TripEndpoint>,

    /// The planned route figures
    pub route: RouteSummary,

    /// Stations recommended for this trip, in rank order
    pub recommended_station_ids: Vec<String>,

    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl SavedTrip {
    /// Assemble a trip payload from a completed plan
    pub fn new(
        user_id: String,
        vehicle_id: String,
        start: TripEndpoint,
        end: TripEndpoint,
        stops: Vec<TripEndpoint>,
        route: RouteSummary,
        recommended: RecommendationSet,
    ) -> Self {
        Self {
            trip_id: uuid::Uuid::new_v4().to_string(),
            user_id,
            vehicle_id,
            start,
            end,
            stops,
            route,
            recommended_station_ids: recommended.into_ids(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Client for the backend trip endpoint
pub struct TripClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl TripClient {
    pub fn new(base_url: String, auth_token: String, timeout_secs: u64) -> Result<Self> {
        let logger = get_logger("trips");
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url,
            auth_token,
            client,
            logger,
        })
    }

    /// Persist a trip to the user's account
    pub async fn save_trip(&self, trip: &SavedTrip) -> Result<()> {
        let url = format!("{}/api/trips", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.auth_token.trim())
            .json(trip)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AmporaError::api(format!(
                "Trip endpoint returned {}",
                resp.status()
            )));
        }

        self.logger
            .info(&format!("Saved trip {} for user", trip.trip_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{RecommendationSet, RouteSummary};

    #[test]
    fn saved_trip_serializes_camel_case() {
        let trip = SavedTrip::new(
            "u-1".to_string(),
            "veh-1".to_string(),
            TripEndpoint {
                text: "Colombo".to_string(),
                geo: None,
            },
            TripEndpoint {
                text: "Kandy".to_string(),
                geo: None,
            },
            vec![],
            RouteSummary {
                distance_km: 115.0,
                duration_min: 180.0,
                path: vec![],
            },
            RecommendationSet::empty(),
        );

        let json = serde_json::to_value(&trip).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("vehicleId").is_some());
        assert!(json.get("recommendedStationIds").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
