// src/bin/api_server.rs

use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use school_directory::infra::config::{self, StoreBackend};
use school_directory::transport;
use school_directory::{MemorySchoolStore, MySqlSchoolStore, SchoolService, SchoolStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // --- Store Initialization ---
    // Missing DB settings stop the process here; the pool itself opens on the first request.
    let mut mysql: Option<Arc<MySqlSchoolStore>> = None;
    let store: Arc<dyn SchoolStore> = match config::store_backend()? {
        StoreBackend::MySql => {
            let s = Arc::new(MySqlSchoolStore::from_env()?);
            mysql = Some(s.clone());
            info!("using MySQL school store (pool opens on first use)");
            s
        }
        StoreBackend::Memory => {
            warn!("using in-memory school store; data is lost on exit");
            Arc::new(MemorySchoolStore::new())
        }
    };

    let app_state = transport::http::AppState {
        service: SchoolService::new(store),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    if let Some(store) = mysql {
        store.close().await;
    }
    info!("graceful shutdown complete");
    Ok(())
}
