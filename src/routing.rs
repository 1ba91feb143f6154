//! Routing/trip service client for Ampora
//!
//! This module talks to the routing service that computes a drivable route
//! and the charging stations near it, and offers a planning facade that
//! applies station recommendation to the response in one call.

use crate::error::{AmporaError, Result};
use crate::logging::get_logger;
use crate::planner::{self, GeoPoint, RecommendationSet, RouteSummary, Station};
use crate::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

/// One endpoint of a route request, in the routing service's wire shape
#[derive(Debug, Clone, Copy, Serialize)]
struct WirePoint {
    lat: f64,
    lng: f64,
}

impl From<GeoPoint> for WirePoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lon,
        }
    }
}

/// A planning request: start, destination, and intermediate stops
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub stops: Vec<GeoPoint>,
}

#[derive(Serialize)]
struct WireRouteRequest {
    start: WirePoint,
    end: WirePoint,
    stops: Vec<WirePoint>,
}

/// Routing service response envelope. Null lists count as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub routes: Vec<RouteSummary>,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub nearby_stations: Vec<Station>,
}

/// A successfully planned route with its candidate stations
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub route: RouteSummary,
    pub stations: Vec<Station>,
}

/// A route plan with recommendations applied for a specific vehicle
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub route: RouteSummary,
    pub stations: Vec<Station>,
    pub recommended: RecommendationSet,
}

/// Reduce a routing response to the first route and its stations.
///
/// The upstream service orders alternatives itself; the first route wins.
pub fn into_plan(response: RouteResponse) -> Result<RoutePlan> {
    if !response.success {
        let reason = response
            .error
            .unwrap_or_else(|| "Routing service reported failure".to_string());
        return Err(AmporaError::api(reason));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| AmporaError::api("Routing response contained no routes"))?;
    Ok(RoutePlan {
        route,
        stations: response.nearby_stations,
    })
}

/// Client for the routing/trip service
pub struct RoutingClient {
    base_url: String,
    client: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl RoutingClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let logger = get_logger("routing");
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url,
            client,
            logger,
        })
    }

    /// Request a route and the stations near it
    pub async fn plan_route(&self, request: &RouteRequest) -> Result<RoutePlan> {
        let url = format!("{}/api/route", self.base_url.trim_end_matches('/'));
        let body = WireRouteRequest {
            start: request.start.into(),
            end: request.end.into(),
            stops: request.stops.iter().copied().map(WirePoint::from).collect(),
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(AmporaError::api(format!(
                "Routing endpoint returned {}",
                resp.status()
            )));
        }

        let response: RouteResponse = resp.json().await?;
        let plan = into_plan(response)?;
        self.logger.debug(&format!(
            "Planned route: {:.1} km, {} candidate stations",
            plan.route.distance_km,
            plan.stations.len()
        ));
        Ok(plan)
    }
}

/// Planning facade: route retrieval plus station recommendation
pub struct TripPlanner {
    routing: RoutingClient,
}

impl TripPlanner {
    pub fn new(routing: RoutingClient) -> Self {
        Self { routing }
    }

    /// Plan a trip and mark the stations recommended for the vehicle.
    ///
    /// With no vehicle selected the plan still succeeds; the recommendation
    /// set is simply empty.
    pub async fn plan_trip(
        &self,
        request: &RouteRequest,
        vehicle: Option<&Vehicle>,
    ) -> Result<TripPlan> {
        let plan = self.routing.plan_route(request).await?;
        let recommended = planner::recommend_stations(&plan.stations, Some(&plan.route), vehicle);
        Ok(TripPlan {
            route: plan.route,
            stations: plan.stations,
            recommended,
        })
    }
}
