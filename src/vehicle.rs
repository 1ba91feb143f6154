//! Vehicle catalogue access for Ampora
//!
//! This module provides the vehicle type used by trip planning and a client
//! for the backend vehicle endpoint, behind a trait so tests can inject a
//! canned catalogue.

use crate::error::{AmporaError, Result};
use crate::logging::get_logger;
use serde::{Deserialize, Serialize};

/// A registered vehicle as returned by the backend.
///
/// `range_km` and `connector_type` are the only fields the recommendation
/// scorer reads; both default to neutral values so a sparse record still
/// plans (and simply scores every station without a connector bonus).
/// Explicit JSON nulls count as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Stable vehicle identifier
    #[serde(
        default,
        rename = "vehicleId",
        deserialize_with = "crate::wire::null_to_default"
    )]
    pub vehicle_id: String,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub brand_name: String,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub model_name: String,

    /// Licence plate
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub plate: String,

    /// Rated range in kilometers
    #[serde(
        default,
        rename = "rangeKm",
        deserialize_with = "crate::wire::null_to_default"
    )]
    pub range_km: f64,

    /// Battery capacity in kWh (the backend calls this "variant")
    #[serde(
        default,
        rename = "variant",
        deserialize_with = "crate::wire::null_to_default"
    )]
    pub battery_kwh: f64,

    /// Charging connector standard (e.g. CCS2, CHAdeMO, Type2)
    #[serde(
        default,
        rename = "connectorType",
        deserialize_with = "crate::wire::null_to_default"
    )]
    pub connector_type: String,
}

/// Vehicle catalogue client trait
#[async_trait::async_trait]
pub trait VehicleClient: Send + Sync {
    /// Fetch all vehicles registered to a user
    async fn fetch_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>>;
}

/// Vehicle client backed by the Ampora backend REST API
pub struct BackendVehicleClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl BackendVehicleClient {
    /// Create a new client. The bearer token is an explicit input, not read
    /// from ambient storage.
    pub fn new(base_url: String, auth_token: String, timeout_secs: u64) -> Result<Self> {
        let logger = get_logger("vehicle");
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
}

#[async_trait::async_trait]
impl VehicleClient for BackendVehicleClient {
    async fn fetch_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>> {
        let url = format!(
            "{}/api/vehicles/user/{}",
            self.base_url.trim_end_matches('/'),
            user_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(self.auth_token.trim())
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AmporaError::auth("Vehicle request rejected (401)"));
        }
        if !resp.status().is_success() {
            return Err(AmporaError::api(format!(
                "Vehicle endpoint returned {}",
                resp.status()
            )));
        }

        let vehicles: Vec<Vehicle> = resp.json().await?;
        self.logger
            .debug(&format!("Loaded {} vehicles for user", vehicles.len()));
        Ok(vehicles)
    }
}
