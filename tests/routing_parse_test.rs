use ampora::planner::recommend_stations;
use ampora::routing::{RouteResponse, into_plan};
use ampora::vehicle::Vehicle;

const ROUTE_JSON: &str = r#"{
    "success": true,
    "routes": [
        {
            "distance_km": 115.4,
            "duration_min": 182.0,
            "path": [[6.9271, 79.8612], [7.2906, 80.6337]]
        },
        {
            "distance_km": 140.2,
            "duration_min": 210.0,
            "path": []
        }
    ],
    "nearby_stations": [
        {
            "station_id": "st-01",
            "name": "Kegalle CCS2 Fast Charge",
            "lat": 7.2513,
            "lon": 80.3464,
            "max_power_kw": 120,
            "distance_to_route_km": 0.8,
            "status": "ACTIVE",
            "connector_types": ["CCS2", "Type2"]
        },
        {
            "station_id": "st-02",
            "name": "Roadside AC Point",
            "lat": 7.1,
            "lon": 80.2
        }
    ]
}"#;

#[test]
fn first_route_wins_and_stations_parse_leniently() {
    let response: RouteResponse = serde_json::from_str(ROUTE_JSON).unwrap();
    let plan = into_plan(response).unwrap();

    assert!((plan.route.distance_km - 115.4).abs() < 1e-9);
    assert_eq!(plan.route.path.len(), 2);
    assert_eq!(plan.stations.len(), 2);

    // The sparse second station got neutral defaults instead of a parse error
    let sparse = &plan.stations[1];
    assert_eq!(sparse.status, "ACTIVE");
    assert!((sparse.distance_to_route_km - 999.0).abs() < 1e-9);
    assert_eq!(sparse.max_power_kw, 0.0);
}

#[test]
fn parsed_plan_feeds_recommendation() {
    let response: RouteResponse = serde_json::from_str(ROUTE_JSON).unwrap();
    let plan = into_plan(response).unwrap();

    let vehicle = Vehicle {
        vehicle_id: "veh-9".to_string(),
        brand_name: "BYD".to_string(),
        model_name: "Atto 3".to_string(),
        plate: "CBH-9921".to_string(),
        range_km: 400.0,
        battery_kwh: 60.0,
        connector_type: "CCS2".to_string(),
    };

    let set = recommend_stations(&plan.stations, Some(&plan.route), Some(&vehicle));
    // 115 km on a 400 km range needs no stop; one station is still shown
    assert_eq!(set.len(), 1);
    assert!(set.contains("st-01"));
}

#[test]
fn null_station_fields_do_not_poison_the_response() {
    let json = r#"{
        "success": true,
        "routes": [{"distance_km": 115.4, "duration_min": 182.0, "path": []}],
        "nearby_stations": [
            {
                "station_id": "st-01",
                "name": "Kegalle CCS2 Fast Charge",
                "max_power_kw": 120,
                "distance_to_route_km": 0.8,
                "status": "ACTIVE",
                "connector_types": ["CCS2"]
            },
            {
                "station_id": "st-null",
                "name": null,
                "max_power_kw": null,
                "distance_to_route_km": null,
                "status": null,
                "connector_types": null
            }
        ]
    }"#;

    let response: RouteResponse = serde_json::from_str(json).unwrap();
    let plan = into_plan(response).unwrap();

    // The null-bearing station is kept with neutral defaults, not dropped,
    // and it does not take the good station down with it
    assert_eq!(plan.stations.len(), 2);
    let nulled = &plan.stations[1];
    assert_eq!(nulled.station_id, "st-null");
    assert_eq!(nulled.status, "ACTIVE");
    assert!((nulled.distance_to_route_km - 999.0).abs() < 1e-9);
    assert_eq!(nulled.max_power_kw, 0.0);
    assert!(nulled.connector_types.is_empty());

    let vehicle = Vehicle {
        vehicle_id: "veh-9".to_string(),
        brand_name: "BYD".to_string(),
        model_name: "Atto 3".to_string(),
        plate: "CBH-9921".to_string(),
        range_km: 400.0,
        battery_kwh: 60.0,
        connector_type: "CCS2".to_string(),
    };
    let set = recommend_stations(&plan.stations, Some(&plan.route), Some(&vehicle));
    assert!(set.contains("st-01"));
}

#[test]
fn failure_envelope_becomes_api_error() {
    let response: RouteResponse =
        serde_json::from_str(r#"{"success": false, "error": "no road found"}"#).unwrap();
    let err = into_plan(response).unwrap_err();
    assert!(format!("{}", err).contains("no road found"));
}

#[test]
fn success_without_routes_is_an_error() {
    let response: RouteResponse =
        serde_json::from_str(r#"{"success": true, "routes": [], "nearby_stations": []}"#).unwrap();
    assert!(into_plan(response).is_err());
}
