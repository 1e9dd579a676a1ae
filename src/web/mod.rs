//! Web layer module
//!
//! Thin axum handlers over the repositories and the import pipeline. All
//! JSON responses share the [`ApiResponse`] envelope; errors are mapped to
//! status codes in one place, [`responses::handle_error`].

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::Config,
    database::Database,
    models::{PitcherRecord, PositionPlayerRecord},
};
use handlers::records::{self, ApiRecord};

pub mod handlers;
pub mod responses;
pub mod utils;

pub use responses::ApiResponse;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
}

impl WebServer {
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = router(AppState { database, config });

        Ok(Self { app, addr })
    }

    /// Serve until SIGINT or SIGTERM, then drain in-flight requests
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;
        info!("Listening on {}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes())
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(record_routes::<PositionPlayerRecord>())
        .merge(record_routes::<PitcherRecord>())
        // Bulk import
        .route("/import", post(handlers::import::import_csv))
}

/// CRUD and export routes for one stat table, rooted at its table name
fn record_routes<T: ApiRecord>() -> Router<AppState> {
    let base = format!("/{}", T::KIND);

    Router::new()
        .route(&base, get(records::list::<T>).post(records::create::<T>))
        .route(&format!("{base}/export"), get(records::export::<T>))
        .route(
            &format!("{base}/:id"),
            get(records::get::<T>)
                .put(records::update::<T>)
                .delete(records::delete::<T>),
        )
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Failed to install signal handlers, graceful shutdown disabled: {}", e);
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully");
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler, graceful shutdown disabled: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
