use ampora::planner::{RouteSummary, Station, recommend_stations, score_station};
use ampora::vehicle::Vehicle;

fn vehicle(range_km: f64, connector: &str) -> Vehicle {
    Vehicle {
        vehicle_id: "veh-1".to_string(),
        brand_name: "Hyundai".to_string(),
        model_name: "Kona".to_string(),
        plate: "CBB-2041".to_string(),
        range_km,
        battery_kwh: 64.0,
        connector_type: connector.to_string(),
    }
}

fn route(distance_km: f64) -> RouteSummary {
    RouteSummary {
        distance_km,
        duration_min: distance_km * 1.5,
        path: vec![],
    }
}

fn station(id: &str, kw: f64, dist: f64, status: &str, connectors: &[&str]) -> Station {
    Station {
        station_id: id.to_string(),
        name: format!("{} Charging", id),
        lat: 7.2,
        lon: 80.6,
        max_power_kw: kw,
        distance_to_route_km: dist,
        status: status.to_string(),
        connector_types: connectors.iter().map(|s| s.to_string()).collect(),
        address: None,
    }
}

#[test]
fn absent_inputs_yield_empty_set() {
    let v = vehicle(300.0, "CCS2");
    let r = route(400.0);
    let stations = vec![station("a", 100.0, 1.0, "ACTIVE", &["CCS2"])];

    assert!(recommend_stations(&[], Some(&r), Some(&v)).is_empty());
    assert!(recommend_stations(&stations, None, Some(&v)).is_empty());
    assert!(recommend_stations(&stations, Some(&r), None).is_empty());
}

#[test]
fn set_size_stays_within_bounds() {
    let v = vehicle(100.0, "CCS2");
    // 1450/100 -> 14 required stops, clamped to 5
    let r = route(1450.0);

    let many: Vec<Station> = (0..10)
        .map(|i| station(&format!("s{}", i), 50.0, 3.0, "ACTIVE", &["CCS2"]))
        .collect();
    let set = recommend_stations(&many, Some(&r), Some(&v));
    assert_eq!(set.len(), 5);

    // Never more than the candidates on offer
    let few = &many[..2];
    let set = recommend_stations(few, Some(&r), Some(&v));
    assert_eq!(set.len(), 2);

    // At least one whenever anything usable is supplied
    let short = route(50.0);
    let set = recommend_stations(&many[..3], Some(&short), Some(&v));
    assert_eq!(set.len(), 1);
}

#[test]
fn power_raise_never_worsens_rank() {
    let v = vehicle(200.0, "CCS2");
    let r = route(350.0);

    let mut contender = station("low", 50.0, 3.0, "ACTIVE", &["Type2"]);
    let rival = station("rival", 70.0, 3.0, "ACTIVE", &["Type2"]);

    let before = recommend_stations(
        &[contender.clone(), rival.clone()],
        Some(&r),
        Some(&v),
    );
    assert!(!before.contains("low"));

    // Crossing the >=90 kW tier strictly increases the score
    let score_before = score_station(&contender, &v);
    contender.max_power_kw = 95.0;
    let score_after = score_station(&contender, &v);
    assert!(score_after > score_before);

    let after = recommend_stations(&[contender, rival], Some(&r), Some(&v));
    assert!(after.contains("low"));
}

#[test]
fn ties_keep_input_order() {
    let v = vehicle(100.0, "CCS2");
    let r = route(350.0); // 3 stops required -> K = 3

    // Four identical stations; the first three must win
    let stations: Vec<Station> = ["first", "second", "third", "fourth"]
        .iter()
        .map(|id| station(id, 50.0, 3.0, "ACTIVE", &["CCS2"]))
        .collect();

    let set = recommend_stations(&stations, Some(&r), Some(&v));
    let ids: Vec<&str> = set.iter().collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn ccs2_scenario_selects_the_strong_station() {
    // rangeKm 200, distance 350 -> requiredStops = 1, K = 1
    let v = vehicle(200.0, "CCS2");
    let r = route(350.0);

    let a = station("A", 100.0, 1.0, "ACTIVE", &["CCS2"]); // 3+3+2+1 = 9
    let b = station("B", 20.0, 8.0, "INACTIVE", &["Type2"]); // 0

    assert_eq!(score_station(&a, &v), 9);
    assert_eq!(score_station(&b, &v), 0);

    let set = recommend_stations(&[a, b], Some(&r), Some(&v));
    assert_eq!(set.len(), 1);
    assert!(set.contains("A"));
    assert!(!set.contains("B"));
}

#[test]
fn sparse_station_json_scores_instead_of_failing() {
    // A station missing every optional field still deserializes and ranks
    let sparse: Station = serde_json::from_str(r#"{"station_id": "bare"}"#).unwrap();
    assert_eq!(sparse.status, "ACTIVE");
    assert_eq!(sparse.distance_to_route_km, 999.0);

    let v = vehicle(200.0, "CHADEMO");
    // Only the availability point applies
    assert_eq!(score_station(&sparse, &v), 1);

    let set = recommend_stations(&[sparse], Some(&route(100.0)), Some(&v));
    assert!(set.contains("bare"));
}
