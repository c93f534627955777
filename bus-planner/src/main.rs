use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bus_planner::cache::PlanCacheConfig;
use bus_planner::domain::Dataset;
use bus_planner::network::NetworkIndex;
use bus_planner::planner::PlannerConfig;
use bus_planner::web::{AppState, create_router};

/// Default log filter when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info,bus_planner=debug";

/// Bus trip planner server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the array of bus routes
    #[arg(long, env = "ROUTES_PATH", default_value = "data/routes.json")]
    routes: PathBuf,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Upper bound on one planning request, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    query_timeout_ms: u64,

    /// How long a computed plan is reused, in seconds
    #[arg(long, default_value_t = 300)]
    cache_ttl_secs: u64,

    /// Maximum number of cached plans
    #[arg(long, default_value_t = 1000)]
    cache_capacity: u64,
}

fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();

    // Load and index the network (fail fast if unavailable)
    let dataset = Dataset::from_json_file(&args.routes).unwrap_or_else(|e| {
        error!(path = %args.routes.display(), error = %e, "failed to load bus network");
        std::process::exit(1);
    });
    let index = NetworkIndex::build(&dataset);
    info!(
        routes = dataset.len(),
        stops = index.stop_count(),
        path = %args.routes.display(),
        "loaded bus network"
    );

    let cache_config = PlanCacheConfig {
        ttl: Duration::from_secs(args.cache_ttl_secs),
        max_capacity: args.cache_capacity,
    };
    let state = AppState::new(
        index,
        PlannerConfig::default(),
        &cache_config,
        Duration::from_millis(args.query_timeout_ms),
    );

    let app = create_router(state);

    info!("Bus trip planner listening on http://{}", args.bind);
    info!("  GET  /health              - Health check");
    info!("  GET  /api/stops/search    - Stop name suggestions");
    info!("  GET  /api/routes/popular  - Routes with the most stops");
    info!("  POST /api/plan            - Plan a trip");
    info!("  POST /api/analyze         - Analyse one option of a trip");

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
