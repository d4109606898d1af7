//! Application startup and lifecycle management.

use crate::config::{RecipeConfig, ServerSettings};
use crate::handlers::{generate_recipe, health_check};
use crate::services::providers::gemini::GeminiProvider;
use crate::services::ContentGenerator;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }
}

/// Build the request-handling entry point.
///
/// Binding a socket is left to the caller, so a host that supplies its own
/// listener can serve this router directly.
pub fn build_router(state: AppState, settings: &ServerSettings) -> Router {
    let static_dir = Path::new(&settings.static_dir);

    Router::new()
        .route("/api/generateRecipe", post(generate_recipe))
        .route("/health", get(health_check))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the real Gemini API.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let provider = GeminiProvider::new(config.gemini.clone()).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::InternalError(e.into())
        })?;

        tracing::info!(
            model = %provider.model(),
            "Initialized Gemini provider"
        );

        Self::build_with_generator(config, Arc::new(provider)).await
    }

    /// Build the application with an injected generator.
    pub async fn build_with_generator(
        config: RecipeConfig,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<Self, AppError> {
        let router = build_router(AppState::new(generator), &config.server);

        // port 0 picks a free port, used by tests
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            mode = %config.mode,
            port,
            api_key_configured = config.has_api_key(),
            static_dir = %config.server.static_dir,
            "Recipe service listening"
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
