use ai::{HttpChatClient, LlmSettings};
use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    middleware::from_fn,
};
use db::connect;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower_http::cors::CorsLayer;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use util::{
    config::{self, AppConfig},
    paths::Storage,
};

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let _log_guards = init_logging(&config::log_dir(), &config::log_level());

    // Media directories
    let storage = Storage::from_config();
    storage
        .ensure_layout()
        .expect("Failed to create media directories");

    // Database
    let db = connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // Language model client
    let settings = {
        let cfg = AppConfig::global();
        if cfg.llm_api_key.is_empty() {
            tracing::warn!("LLM_API_KEY is not set; generation requests will fail");
        }
        LlmSettings {
            api_key: cfg.llm_api_key.clone(),
            base_url: cfg.llm_base_url.clone(),
            model: cfg.llm_model.clone(),
            temperature: cfg.llm_temperature,
            max_tokens: cfg.llm_max_tokens,
            timeout: Duration::from_secs(cfg.llm_timeout_secs),
        }
    };
    let llm = HttpChatClient::new(settings).expect("Failed to build LLM client");

    let app_state = AppState::new(db, Arc::new(llm), storage);

    // Configure middleware
    let origins: Vec<HeaderValue> = config::cors_origins()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    // Build app router
    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    tracing::info!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

/// Services with their own log directory, and the targets routed to each.
const SERVICE_TARGETS: &[(&str, &[&str])] = &[
    ("request", &["request"]),
    ("user_management", &["user_management"]),
    ("course_management", &["course_management"]),
    ("exercise_generator", &["exercise_generator", "ai::exercises"]),
    ("ppt_generator", &["ppt_generator", "ai::slides"]),
];

/// One daily-rotated file per service under `{log_dir}/{service}/`, plus
/// `app` receiving everything and an optional stdout copy.
fn init_logging(log_dir: &str, log_level: &str) -> Vec<WorkerGuard> {
    use tracing::Level;
    use tracing_subscriber::{EnvFilter, Layer, Registry, filter::Targets, fmt, prelude::*};

    let root = Path::new(log_dir);
    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let mut file_writer = |service: &str| {
        std::fs::create_dir_all(root.join(service)).ok();
        let appender = rolling::daily(root.join(service), format!("{service}.log"));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        writer
    };

    layers.push(
        fmt::layer()
            .with_writer(file_writer("app"))
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .boxed(),
    );

    for (service, targets) in SERVICE_TARGETS {
        let filter = targets
            .iter()
            .fold(Targets::new(), |f, t| f.with_target(*t, Level::TRACE));
        layers.push(
            fmt::layer()
                .with_writer(file_writer(service))
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter)
                .boxed(),
        );
    }

    if config::log_to_stdout() {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true)
                .boxed(),
        );
    }

    let env_filter = EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},sqlx=warn,sea_orm=warn")));

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .init();

    guards
}
