//! Station recommendation for trip planning
//!
//! This module scores candidate charging stations along a planned route
//! against a specific vehicle and selects the subset worth highlighting as
//! recommended. It is pure computation over in-memory data: no I/O, no
//! mutable state, safe to call on every planning response.

use crate::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

/// A geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

fn default_status() -> String {
    "ACTIVE".to_string()
}

fn default_distance_to_route() -> f64 {
    999.0
}

fn status_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

fn distance_or_default<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_distance_to_route))
}

/// A charging station snapshot as returned by the routing service.
///
/// Every field the scorer reads carries a neutral default so a sparse or
/// malformed entry deserializes cleanly and simply scores low; a station is
/// never excluded by a parse error. Explicit JSON nulls count as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Stable station identifier
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub station_id: String,

    /// Display name
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub name: String,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub lat: f64,

    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub lon: f64,

    /// Highest charger output at this station (kW)
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub max_power_kw: f64,

    /// Detour distance from the planned route (km)
    #[serde(default = "default_distance_to_route", deserialize_with = "distance_or_default")]
    pub distance_to_route_km: f64,

    /// Operational status reported by the backend (ACTIVE, OPEN, ...)
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,

    /// Supported connector standards (e.g. CCS2, CHAdeMO, Type2)
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub connector_types: Vec<String>,

    /// Street address, when known
    #[serde(default)]
    pub address: Option<String>,
}

/// Route figures for one planning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total driving distance in kilometers
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub distance_km: f64,

    /// Estimated driving duration in minutes
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub duration_min: f64,

    /// Route polyline as (lat, lon) pairs
    #[serde(default, deserialize_with = "crate::wire::null_to_default")]
    pub path: Vec<[f64; 2]>,
}

/// Station identifiers selected as recommended, in rank order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    ids: Vec<String>,
}

impl RecommendationSet {
    /// Empty set, returned whenever any planning input is absent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the given station id was selected
    pub fn contains(&self, station_id: &str) -> bool {
        self.ids.iter().any(|id| id == station_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate ids in rank order (best first)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Consume into the ranked id list
    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

/// Number of charging stops a trip needs given total distance and rated range.
///
/// The range divisor is floored at 1 km to guard against zero or negative
/// ranges; non-finite inputs count as zero distance.
pub fn required_stops(distance_km: f64, range_km: f64) -> usize {
    let distance = if distance_km.is_finite() {
        distance_km
    } else {
        0.0
    };
    let range = if range_km.is_finite() {
        range_km.max(1.0)
    } else {
        1.0
    };
    let stops = (distance / range).ceil() as i64 - 1;
    stops.max(0) as usize
}

/// Desired recommendation count: at least one station, never more than five
pub fn recommendation_count(required_stops: usize) -> usize {
    required_stops.clamp(1, 5)
}

/// Score one station for one vehicle. Higher is better.
///
/// Connector match is a case-insensitive substring check against the station
/// name and the joined connector list; this mirrors the backend contract,
/// including the quirk that an empty vehicle connector matches every station
/// (a uniform bonus, so ranking is unaffected).
pub fn score_station(station: &Station, vehicle: &Vehicle) -> u32 {
    let connector = vehicle.connector_type.to_uppercase();
    let status = station.status.to_uppercase();
    let name = station.name.to_uppercase();

    let mut score = 0u32;

    // connector match
    let joined = station.connector_types.join("|").to_uppercase();
    if name.contains(&connector) || joined.contains(&connector) {
        score += 3;
    }

    // fast chargers
    if station.max_power_kw >= 90.0 {
        score += 3;
    } else if station.max_power_kw >= 60.0 {
        score += 2;
    } else if station.max_power_kw >= 22.0 {
        score += 1;
    }

    // proximity to route
    if station.distance_to_route_km < 2.0 {
        score += 2;
    } else if station.distance_to_route_km < 5.0 {
        score += 1;
    }

    // open
    if status == "ACTIVE" || status == "OPEN" {
        score += 1;
    }

    score
}

/// Select the stations to highlight for a (route, vehicle) pair.
///
/// An empty station list or an absent route or vehicle yields the empty set;
/// that is a defined edge case, not an error. Ties keep the upstream input
/// order (stable sort).
pub fn recommend_stations(
    stations: &[Station],
    route: Option<&RouteSummary>,
    vehicle: Option<&Vehicle>,
) -> RecommendationSet {
    let (Some(route), Some(vehicle)) = (route, vehicle) else {
        return RecommendationSet::empty();
    };
    if stations.is_empty() {
        return RecommendationSet::empty();
    }

    let stops = required_stops(route.distance_km, vehicle.range_km);
    let k = recommendation_count(stops);

    let mut scored: Vec<(&Station, u32)> = stations
        .iter()
        .map(|s| (s, score_station(s, vehicle)))
        .collect();
    scored.sort_by_key(|(_, score)| std::cmp::Reverse(*score));

    let ids = scored
        .into_iter()
        .take(k)
        .map(|(s, _)| s.station_id.clone())
        .collect();

    RecommendationSet { ids }
}
