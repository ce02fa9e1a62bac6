//! HTTP handler functions for the trash map API.

use actix_web::{HttpResponse, web};
use trash_map_analytics::{find_hotspots, find_nearest, summarize};
use trash_map_analytics_models::{
    AreaSummaryParams, DEFAULT_HOTSPOT_RADIUS_KM, DEFAULT_MAX_DISTANCE_KM,
    DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_NEAREST_LIMIT, DEFAULT_SUMMARY_RADIUS_KM, HotspotParams,
    NearestParams,
};
use trash_map_server_models::{
    ApiAreaSummary, ApiCreatedReport, ApiDirtyPlaces, ApiHealth, ApiHotspots, ApiLocationMatch,
    ApiQueryLocation, AreaSummaryQueryParams, DirtyPlacesQueryParams, HotspotQueryParams,
    NewReportRequest, SearchLocationParams,
};

use crate::AppState;
use crate::validation::{
    ValidationError, check_coordinates, clamp_count, non_blank, non_negative,
};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/trash-data`
///
/// Returns every stored report.
pub async fn trash_data(state: web::Data<AppState>) -> HttpResponse {
    match state.repository.list_all().await {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(e) => internal_error("Failed to load reports", &e),
    }
}

/// `POST /api/test-data`
///
/// Stores a report built from the JSON body under a fresh UUID.
pub async fn create_report(
    state: web::Data<AppState>,
    body: web::Json<NewReportRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    if let Err(e) = check_coordinates(request.latitude, request.longitude) {
        return bad_request(&e);
    }
    if let Err(e) = non_negative("estimated_kg", request.estimated_kg, 0.0) {
        return bad_request(&e);
    }

    let report = request.into_report(uuid::Uuid::new_v4().to_string(), chrono::Utc::now());

    match state.repository.insert(report.clone()).await {
        Ok(()) => HttpResponse::Created().json(ApiCreatedReport {
            status: "success".to_string(),
            report,
        }),
        Err(e) => internal_error("Failed to store report", &e),
    }
}

/// `GET /api/dirty-places`
///
/// Ranks the dirtiest reports near a point or address.
pub async fn dirty_places(
    state: web::Data<AppState>,
    params: web::Query<DirtyPlacesQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let max_distance_km = match non_negative(
        "max_distance_km",
        params.max_distance_km,
        DEFAULT_MAX_DISTANCE_KM,
    ) {
        Ok(v) => v,
        Err(e) => return bad_request(&e),
    };
    let location = match resolve_location(&state, params.lat, params.lng, params.address).await {
        Ok(location) => location,
        Err(response) => return response,
    };

    let query = NearestParams {
        latitude: location.latitude,
        longitude: location.longitude,
        limit: clamp_count(params.limit, DEFAULT_NEAREST_LIMIT),
        max_distance_km,
    };

    match find_nearest(state.repository.as_ref(), &query).await {
        Ok(results) => HttpResponse::Ok().json(ApiDirtyPlaces { location, results }),
        Err(e) => internal_error("Failed to find dirty places", &e),
    }
}

/// `GET /api/area-summary`
///
/// Summarizes the reports within a radius of a point or address.
pub async fn area_summary(
    state: web::Data<AppState>,
    params: web::Query<AreaSummaryQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let radius_km = match non_negative("radius_km", params.radius_km, DEFAULT_SUMMARY_RADIUS_KM) {
        Ok(v) => v,
        Err(e) => return bad_request(&e),
    };
    let location = match resolve_location(&state, params.lat, params.lng, params.address).await {
        Ok(location) => location,
        Err(response) => return response,
    };

    let query = AreaSummaryParams {
        latitude: location.latitude,
        longitude: location.longitude,
        radius_km,
    };

    match summarize(state.repository.as_ref(), &query).await {
        Ok(summary) => HttpResponse::Ok().json(ApiAreaSummary { location, summary }),
        Err(e) => internal_error("Failed to summarize area", &e),
    }
}

/// `GET /api/hotspots`
///
/// Finds grid cells with a concentration of reports around a point or
/// address.
pub async fn hotspots(
    state: web::Data<AppState>,
    params: web::Query<HotspotQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let radius_km = match non_negative("radius_km", params.radius_km, DEFAULT_HOTSPOT_RADIUS_KM) {
        Ok(v) => v,
        Err(e) => return bad_request(&e),
    };
    let location = match resolve_location(&state, params.lat, params.lng, params.address).await {
        Ok(location) => location,
        Err(response) => return response,
    };

    let query = HotspotParams {
        latitude: location.latitude,
        longitude: location.longitude,
        radius_km,
        min_cluster_size: clamp_count(params.min_cluster_size, DEFAULT_MIN_CLUSTER_SIZE),
    };

    match find_hotspots(state.repository.as_ref(), &query).await {
        Ok(hotspots) => HttpResponse::Ok().json(ApiHotspots { location, hotspots }),
        Err(e) => internal_error("Failed to find hotspots", &e),
    }
}

/// `GET /api/search-location`
///
/// Geocodes free text so clients can center a map on it.
pub async fn search_location(
    state: web::Data<AppState>,
    params: web::Query<SearchLocationParams>,
) -> HttpResponse {
    let query = match non_blank("q", &params.q) {
        Ok(q) => q,
        Err(e) => return bad_request(&e),
    };

    match state.geocoder.locate(query).await {
        Ok(Some(found)) => HttpResponse::Ok().json(ApiLocationMatch {
            query: query.to_string(),
            latitude: found.latitude,
            longitude: found.longitude,
            display_name: found.matched_address,
        }),
        Ok(None) => not_found(query),
        Err(e) => {
            log::error!("Geocoding '{query}' failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Geocoding service unavailable"
            }))
        }
    }
}

/// Determines the query point from explicit coordinates or, failing that,
/// a geocoded address.
async fn resolve_location(
    state: &AppState,
    lat: Option<f64>,
    lng: Option<f64>,
    address: Option<String>,
) -> Result<ApiQueryLocation, HttpResponse> {
    if let (Some(latitude), Some(longitude)) = (lat, lng) {
        check_coordinates(latitude, longitude).map_err(|e| bad_request(&e))?;
        return Ok(ApiQueryLocation {
            latitude,
            longitude,
            address: None,
        });
    }

    let Some(address) = address else {
        return Err(bad_request(&ValidationError::MissingLocation));
    };
    let address = non_blank("address", &address).map_err(|e| bad_request(&e))?;

    let Some((latitude, longitude)) = state.geocoder.resolve(address).await else {
        return Err(not_found(address));
    };
    check_coordinates(latitude, longitude).map_err(|e| bad_request(&e))?;

    Ok(ApiQueryLocation {
        latitude,
        longitude,
        address: Some(address.to_string()),
    })
}

fn bad_request(e: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found(query: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": format!("Location not found: {query}")
    }))
}

fn internal_error(message: &str, e: &dyn std::fmt::Display) -> HttpResponse {
    log::error!("{message}: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use async_trait::async_trait;
    use trash_map_database::{MemoryRepository, ReportRepository};
    use trash_map_geocoder::{GeocodeError, GeocodedAddress, Geocoder};
    use trash_map_report_models::{Cleanliness, Sparcity, TrashReport, TrashType};

    use super::*;

    /// Knows exactly one place.
    struct OnePlace;

    #[async_trait]
    impl Geocoder for OnePlace {
        async fn locate(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
            Ok((address == "Null Island").then(|| GeocodedAddress {
                latitude: 0.0,
                longitude: 0.0,
                matched_address: Some("Null Island, Atlantic Ocean".to_string()),
            }))
        }
    }

    /// Provider that refuses every request.
    struct Throttled;

    #[async_trait]
    impl Geocoder for Throttled {
        async fn locate(&self, _address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
            Err(GeocodeError::RateLimited)
        }
    }

    fn report_at(id: &str, lat: f64, lng: f64) -> TrashReport {
        TrashReport {
            id: id.to_string(),
            latitude: Some(lat),
            longitude: Some(lng),
            trash_type: Some(TrashType::Plastic),
            estimated_kg: Some(5.0),
            sparcity: Some(Sparcity::High),
            cleanliness: Some(Cleanliness::Poor),
            ..TrashReport::default()
        }
    }

    fn state_with(reports: Vec<TrashReport>) -> (web::Data<AppState>, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::with_reports(reports));
        let state = web::Data::new(AppState {
            repository: repository.clone(),
            geocoder: Arc::new(OnePlace),
        });
        (state, repository)
    }

    fn scenario() -> Vec<TrashReport> {
        vec![
            report_at("origin", 0.0, 0.0),
            report_at("close", 0.0, 0.001),
            report_at("far", 10.0, 10.0),
        ]
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state).configure(crate::configure)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (state, _) = state_with(Vec::new());
        let app = app!(state);
        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/health").to_request())
                .await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn dirty_places_by_coordinates() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/dirty-places?lat=0&lng=0&limit=5&max_distance_km=50")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["report"]["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["origin", "close"]);
        assert!(body["results"][0]["combined_score"].is_number());
        assert!(body["location"].get("address").is_none());
    }

    #[actix_web::test]
    async fn dirty_places_by_address() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/dirty-places?address=Null%20Island")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["location"]["address"], "Null Island");
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn unknown_address_is_not_found() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/area-summary?address=Atlantis")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn invalid_inputs_are_rejected() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        for uri in [
            "/api/dirty-places?lat=91&lng=0",
            "/api/dirty-places?lat=0&lng=0&max_distance_km=-1",
            "/api/area-summary?lat=0",
            "/api/hotspots?lat=0&lng=0&radius_km=-5",
            "/api/search-location?q=%20",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn negative_limit_yields_empty_results() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/dirty-places?lat=0&lng=0&limit=-3")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn empty_area_summary_has_message() {
        let (state, _) = state_with(scenario());
        let app = app!(state);
        let req = test::TestRequest::get()
            .uri("/api/area-summary?lat=-45&lng=-45&radius_km=1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["total_reports"], 0);
        assert!(body["summary"]["message"].is_string());
    }

    #[actix_web::test]
    async fn hotspots_respect_min_cluster_size() {
        let (state, _) = state_with(scenario());
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/hotspots?lat=0&lng=0&min_cluster_size=2")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["hotspots"].as_array().unwrap().len(), 1);
        assert_eq!(body["hotspots"][0]["report_count"], 2);

        let req = test::TestRequest::get()
            .uri("/api/hotspots?lat=0&lng=0")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["hotspots"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn search_location_returns_match() {
        let (state, _) = state_with(Vec::new());
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/search-location?q=Null%20Island")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["display_name"], "Null Island, Atlantic Ocean");

        let req = test::TestRequest::get()
            .uri("/api/search-location?q=Atlantis")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn created_report_is_listed() {
        let (state, repository) = state_with(Vec::new());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/test-data")
            .set_json(serde_json::json!({
                "latitude": 52.52,
                "longitude": 13.405,
                "trash_type": "organic",
                "estimated_kg": 3.0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let stored = repository.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].trash_type, Some(TrashType::Organic));
        assert!(stored[0].timestamp.is_some());
        assert!(!stored[0].id.is_empty());

        let body: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/trash-data").to_request(),
        )
        .await;
        assert_eq!(body[0]["id"], stored[0].id.as_str());
    }

    #[actix_web::test]
    async fn created_report_rejects_bad_input() {
        let (state, repository) = state_with(Vec::new());
        let app = app!(state);

        for body in [
            serde_json::json!({"latitude": 100.0, "longitude": 0.0}),
            serde_json::json!({"latitude": 0.0, "longitude": 0.0, "estimated_kg": -2.0}),
            serde_json::json!({"latitude": 0.0, "longitude": 0.0, "sparcity": "dense"}),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/test-data")
                .set_json(&body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        }
        assert!(repository.list_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn geocoder_failure_is_bad_gateway_for_search_and_not_found_for_queries() {
        let state = web::Data::new(AppState {
            repository: Arc::new(MemoryRepository::with_reports(scenario())),
            geocoder: Arc::new(Throttled),
        });
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/api/search-location?q=Null%20Island")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());

        let req = test::TestRequest::get()
            .uri("/api/dirty-places?address=Null%20Island")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
