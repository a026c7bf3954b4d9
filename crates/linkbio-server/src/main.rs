//! linkbio server - publishes link-in-bio profile pages.
//!
//! Accepts profile payloads on `POST /api/save` and serves each saved
//! profile as a static HTML page at `/u/{identifier}`.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use linkbio_server::config::StorageKind;
use linkbio_server::{AppState, Config, router};

/// linkbio - shareable link-in-bio pages.
#[derive(Parser, Debug)]
#[command(name = "linkbio-server")]
#[command(about = "Save and serve link-in-bio profile pages", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Listen address, overriding `LINKBIO_BIND_ADDR`.
    #[arg(long)]
    bind: Option<String>,

    /// Storage backend (`memory`, `file` or `kv`), overriding `LINKBIO_STORAGE`.
    #[arg(long)]
    storage: Option<StorageKind>,
}

impl Args {
    /// Apply command-line overrides on top of the environment configuration.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
        config
    }
}

/// Where saved profiles go, for the startup log line.
fn storage_location(config: &Config) -> String {
    match config.storage {
        StorageKind::Memory => "in-process (lost on restart)".to_string(),
        StorageKind::File => config.db_path.display().to_string(),
        StorageKind::Kv => match config.kv.credentials() {
            Ok((url, _)) => format!("{url} (prefix {})", config.kv.key_prefix),
            Err(err) => format!("unconfigured: {err}"),
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = args.apply(Config::from_env()?);
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        storage = ?config.storage,
        location = %storage_location(&config),
        base_url = %config.base_url,
        max_body_bytes = config.max_body_bytes,
        "storage selected"
    );

    let state = AppState::new(config)?;

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "linkbio server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
