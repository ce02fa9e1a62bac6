#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the trash map application.
//!
//! Exposes the report store and the three location queries (dirty places,
//! area summary, hotspots) as a JSON API. Queries accept either explicit
//! coordinates or an address, which is geocoded through Nominatim.

mod handlers;
pub mod validation;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use trash_map_database::{JsonFileRepository, ReportRepository, paths};
use trash_map_geocoder::{Geocoder, NominatimGeocoder};

/// Shared application state.
pub struct AppState {
    /// Report store every query reads from.
    pub repository: Arc<dyn ReportRepository>,
    /// Resolves `address` parameters to coordinates.
    pub geocoder: Arc<dyn Geocoder>,
}

/// Where the server listens and which report file it serves.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// JSON report store (`TRASH_MAP_REPORTS_PATH`, default
    /// `data/reports.json`).
    pub reports_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the environment, falling back to
    /// defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("PORT").ok(),
            paths::reports_path(),
        )
    }

    fn from_values(bind_addr: Option<String>, port: Option<String>, reports_path: PathBuf) -> Self {
        let port = port.and_then(|p| match p.trim().parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                log::warn!("Ignoring invalid PORT value '{p}': {e}");
                None
            }
        });

        Self {
            bind_addr: bind_addr
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: port.unwrap_or(8080),
            reports_path,
        }
    }
}

/// Registers the `/api` routes and the JSON error handlers for malformed
/// bodies and query strings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string()
        }));
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string()
        }));
        error::InternalError::from_response(err, response).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/trash-data", web::get().to(handlers::trash_data))
            .route("/test-data", web::post().to(handlers::create_report))
            .route("/dirty-places", web::get().to(handlers::dirty_places))
            .route("/area-summary", web::get().to(handlers::area_summary))
            .route("/hotspots", web::get().to(handlers::hotspots))
            .route("/search-location", web::get().to(handlers::search_location)),
    );
}

/// Starts the trash map API server.
///
/// Opens the JSON report store at `config.reports_path`, builds the
/// Nominatim geocoder and serves the API until shutdown. This is a regular
/// async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the geocoder cannot be
/// configured, the HTTP server fails to bind, or it encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let geocoder = NominatimGeocoder::from_env().map_err(std::io::Error::other)?;
    log::info!("Geocoding addresses via {}", geocoder.base_url());

    log::info!("Serving reports from {}", config.reports_path.display());
    let state = web::Data::new(AppState {
        repository: Arc::new(JsonFileRepository::new(config.reports_path)),
        geocoder: Arc::new(geocoder),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_values(None, None, PathBuf::from("reports.json"));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.reports_path, PathBuf::from("reports.json"));
    }

    #[test]
    fn values_override_defaults() {
        let config = ServerConfig::from_values(
            Some("0.0.0.0".to_string()),
            Some("9000".to_string()),
            PathBuf::from("/srv/reports.json"),
        );
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.reports_path, PathBuf::from("/srv/reports.json"));
    }

    #[test]
    fn unparseable_port_falls_back() {
        for port in ["http", "70000", "-1", ""] {
            let config =
                ServerConfig::from_values(None, Some(port.to_string()), PathBuf::new());
            assert_eq!(config.port, 8080, "{port}");
        }
    }

    #[test]
    fn blank_bind_addr_falls_back() {
        let config = ServerConfig::from_values(Some("  ".to_string()), None, PathBuf::new());
        assert_eq!(config.bind_addr, "127.0.0.1");
    }
}
