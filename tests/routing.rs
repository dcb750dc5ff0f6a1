use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use minicab::config::RoutingConfig;
use minicab::entities::{Coordinates, RouteKind, VehicleProfile};
use minicab::geo;
use minicab::routing::RouteProvider;

async fn spawn_routing_service(app: Router) -> String {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    format!("http://{}", addr)
}

fn provider(api_base: String, timeout: Duration) -> RouteProvider {
    RouteProvider::new(&RoutingConfig {
        api_key: Some("test-key".into()),
        api_base,
        timeout,
    })
    .unwrap()
}

fn pickup() -> Coordinates {
    Coordinates::new(40.7128, -74.006).unwrap()
}

fn dropoff() -> Coordinates {
    Coordinates::new(40.7228, -74.016).unwrap()
}

async fn directions(
    Path(profile): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let expected = json!([[-74.006, 40.7128], [-74.016, 40.7228]]);

    if profile != "cycling-regular" || body["coordinates"] != expected {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "segments": [{ "distance": 2140.0, "duration": 540.0 }],
                "summary": { "distance": 2140.0, "duration": 540.0 }
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-74.006, 40.7128], [-74.011, 40.7161], [-74.016, 40.7228]]
            }
        }]
    })))
}

#[tokio::test]
async fn real_route_from_service() {
    let base = spawn_routing_service(
        Router::new().route("/v2/directions/:profile/geojson", post(directions)),
    )
    .await;

    let route = provider(base, Duration::from_secs(5))
        .fetch_route(pickup(), dropoff(), VehicleProfile::Bicycle)
        .await;

    assert_eq!(route.kind, RouteKind::Real);
    assert_eq!(route.profile, VehicleProfile::Bicycle);
    assert_eq!(route.distance_meters, 2140.0);
    assert_eq!(route.duration_seconds, 540.0);
    assert_eq!(route.path.len(), 3);
}

#[tokio::test]
async fn padded_key_is_sent_trimmed() {
    let base = spawn_routing_service(
        Router::new().route("/v2/directions/:profile/geojson", post(directions)),
    )
    .await;

    let provider = RouteProvider::new(&RoutingConfig {
        api_key: Some("  test-key\n".into()),
        api_base: base,
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let route = provider
        .fetch_route(pickup(), dropoff(), VehicleProfile::Bicycle)
        .await;

    assert_eq!(route.kind, RouteKind::Real);
}

#[tokio::test]
async fn server_error_falls_back_to_synthetic() {
    let base = spawn_routing_service(Router::new().route(
        "/v2/directions/:profile/geojson",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;

    let route = provider(base, Duration::from_secs(5))
        .fetch_route(pickup(), dropoff(), VehicleProfile::Car)
        .await;

    assert_eq!(route.kind, RouteKind::Synthetic);
    assert_eq!(route.path, vec![pickup(), dropoff()]);
    assert_eq!(route.distance_meters, geo::distance(pickup(), dropoff()) * 1000.0);
}

#[tokio::test]
async fn malformed_body_falls_back_to_synthetic() {
    let base = spawn_routing_service(Router::new().route(
        "/v2/directions/:profile/geojson",
        post(|| async { Json(json!({ "routes": [{ "summary": { "distance": 10.0 } }] })) }),
    ))
    .await;

    let route = provider(base, Duration::from_secs(5))
        .fetch_route(pickup(), dropoff(), VehicleProfile::Van)
        .await;

    assert_eq!(route.kind, RouteKind::Synthetic);
    assert_eq!(route.profile, VehicleProfile::Van);
}

#[tokio::test]
async fn slow_service_falls_back_to_synthetic() {
    let base = spawn_routing_service(Router::new().route(
        "/v2/directions/:profile/geojson",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    ))
    .await;

    let route = provider(base, Duration::from_millis(200))
        .fetch_route(pickup(), dropoff(), VehicleProfile::Car)
        .await;

    assert_eq!(route.kind, RouteKind::Synthetic);
}

#[tokio::test]
async fn unreachable_service_falls_back_to_synthetic() {
    // nothing listens on port 9 of the loopback interface
    let route = provider("http://127.0.0.1:9".into(), Duration::from_secs(2))
        .fetch_route(pickup(), dropoff(), VehicleProfile::Car)
        .await;

    assert_eq!(route.kind, RouteKind::Synthetic);
}
