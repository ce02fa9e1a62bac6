#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line tool for the trash map.
//!
//! ```text
//! trash_map_cli create [COUNT]
//! trash_map_cli clear [--yes]
//! trash_map_cli stats
//! trash_map_cli nearest --lat 48.8566 --lng 2.3522 [--limit 5] [--max-distance-km 50]
//! trash_map_cli summary --lat 48.8566 --lng 2.3522 [--radius-km 5]
//! trash_map_cli hotspots --lat 48.8566 --lng 2.3522 [--radius-km 10] [--min-cluster-size 3]
//! trash_map_cli serve
//! ```
//!
//! Every command works on the JSON report store selected by `--reports`,
//! `TRASH_MAP_REPORTS_PATH`, or `data/reports.json`, in that order.

mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use trash_map_analytics::{collect_stats, find_hotspots, find_nearest, summarize};
use trash_map_analytics_models::{
    AreaSummaryParams, DEFAULT_HOTSPOT_RADIUS_KM, DEFAULT_MAX_DISTANCE_KM,
    DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_NEAREST_LIMIT, DEFAULT_SUMMARY_RADIUS_KM, DatasetStats,
    HotspotParams, NearestParams,
};
use trash_map_database::{JsonFileRepository, ReportRepository, paths};
use trash_map_server::ServerConfig;
use trash_map_server::validation::{check_coordinates, non_negative};

#[derive(Parser)]
#[command(
    name = "trash_map_cli",
    about = "Manage trash reports and run location queries"
)]
struct Cli {
    /// JSON report store to use
    #[arg(long, global = true)]
    reports: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create random test reports around major cities
    Create {
        /// Number of reports to create
        #[arg(default_value_t = 50)]
        count: usize,
    },
    /// Delete every stored report
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show statistics about the stored reports
    Stats,
    /// Rank the dirtiest reports near a point
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_NEAREST_LIMIT)]
        limit: usize,
        /// Ignore reports farther away than this
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE_KM)]
        max_distance_km: f64,
    },
    /// Summarize the reports around a point
    Summary {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Summary radius
        #[arg(long, default_value_t = DEFAULT_SUMMARY_RADIUS_KM)]
        radius_km: f64,
    },
    /// Find grid cells with many reports around a point
    Hotspots {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius
        #[arg(long, default_value_t = DEFAULT_HOTSPOT_RADIUS_KM)]
        radius_km: f64,
        /// Minimum number of reports per hotspot
        #[arg(long, default_value_t = DEFAULT_MIN_CLUSTER_SIZE)]
        min_cluster_size: usize,
    },
    /// Start the API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let reports_path = cli.reports.unwrap_or_else(paths::reports_path);
    log::debug!("Using report store {}", reports_path.display());
    let repo = JsonFileRepository::new(reports_path.clone());

    match cli.command {
        Commands::Create { count } => {
            let reports = seed::generate_reports(&mut rand::thread_rng(), count, chrono::Utc::now());
            println!("Creating {count} test reports...");

            let created = repo.insert_many(reports).await?;
            println!(
                "Created {created} reports in {}",
                repo.path().display()
            );
        }
        Commands::Clear { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Delete ALL reports from {}?",
                        repo.path().display()
                    ))
                    .default(false)
                    .interact()?;

            if confirmed {
                let deleted = repo.clear().await?;
                println!("Deleted {deleted} reports");
            } else {
                println!("Cancelled.");
            }
        }
        Commands::Stats => print_stats(&collect_stats(&repo).await?),
        Commands::Nearest {
            lat,
            lng,
            limit,
            max_distance_km,
        } => {
            check_coordinates(lat, lng)?;
            let params = NearestParams {
                latitude: lat,
                longitude: lng,
                limit,
                max_distance_km: non_negative("max_distance_km", Some(max_distance_km), 0.0)?,
            };
            let results = find_nearest(&repo, &params).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Summary { lat, lng, radius_km } => {
            check_coordinates(lat, lng)?;
            let params = AreaSummaryParams {
                latitude: lat,
                longitude: lng,
                radius_km: non_negative("radius_km", Some(radius_km), 0.0)?,
            };
            let summary = summarize(&repo, &params).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Hotspots {
            lat,
            lng,
            radius_km,
            min_cluster_size,
        } => {
            check_coordinates(lat, lng)?;
            let params = HotspotParams {
                latitude: lat,
                longitude: lng,
                radius_km: non_negative("radius_km", Some(radius_km), 0.0)?,
                min_cluster_size,
            };
            let clusters = find_hotspots(&repo, &params).await?;
            println!("{}", serde_json::to_string_pretty(&clusters)?);
        }
        Commands::Serve => {
            let config = ServerConfig {
                reports_path,
                ..ServerConfig::from_env()
            };
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(trash_map_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

fn print_stats(stats: &DatasetStats) {
    if stats.total_reports == 0 {
        println!("The report store is empty");
        return;
    }

    println!("Report statistics:");
    println!("   Total reports: {}", stats.total_reports);
    println!("   With location: {}", stats.spatial_reports);
    println!("   By trash type:");
    for entry in &stats.by_trash_type {
        println!("     {}: {}", entry.trash_type, entry.count);
    }
    if let (Some(earliest), Some(latest)) = (stats.earliest, stats.latest) {
        println!("   Date range: {earliest} to {latest}");
    }
}
