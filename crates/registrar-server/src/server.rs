//! HTTP server implementation for the student record API.
//!
//! Routes each request 1:1 onto a [`StudentStore`] operation; there is no
//! background work and no caching between the router and the store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use registrar_core::{Result, Student};
use registrar_store::StudentStore;

use crate::api::{
    ApiError, CreateStudentRequest, HealthResponse, UpdateGradesRequest,
};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Enable permissive CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".parse().unwrap(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new server config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors: Option<bool>,
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Sets whether CORS is enabled.
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = Some(enabled);
        self
    }

    /// Builds the server config.
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr.unwrap_or_else(|| "0.0.0.0:8080".parse().unwrap()),
            cors: self.cors.unwrap_or(true),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// The student store backing all handlers.
    pub store: Arc<dyn StudentStore>,
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Creates a new server over the given store.
    pub fn new(config: ServerConfig, store: Arc<dyn StudentStore>) -> Self {
        let state = Arc::new(AppState { store });
        Self { config, state }
    }

    /// Creates the router.
    fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/v1/health", get(health))
            .route("/v1/students", get(list_students).post(create_student))
            .route(
                "/v1/students/{id}",
                get(get_student).delete(delete_student),
            )
            .route("/v1/students/{id}/grades", put(update_grades))
            .with_state(self.state.clone());

        router = router.layer(TraceLayer::new_for_http());

        if self.config.cors {
            // Credentials rule out the wildcard variant; very_permissive
            // mirrors the request origin instead.
            router = router.layer(CorsLayer::very_permissive());
        }

        router
    }

    /// Runs the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails
    /// while serving.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        tracing::info!(addr = %self.config.addr, "Starting registrar server");
        eprintln!(
            "\n\x1b[32m✓\x1b[0m Server listening on http://{}",
            self.config.addr
        );
        eprintln!("  Press Ctrl+C to stop\n");

        let listener = tokio::net::TcpListener::bind(self.config.addr)
            .await
            .map_err(registrar_core::Error::Io)?;

        // Set up graceful shutdown
        let shutdown_signal = async {
            let ctrl_c = async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("Failed to install Ctrl+C handler");
            };

            #[cfg(unix)]
            let terminate = async {
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to install signal handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                () = ctrl_c => {
                    eprintln!("\nReceived Ctrl+C, shutting down gracefully...");
                },
                () = terminate => {
                    eprintln!("\nReceived SIGTERM, shutting down gracefully...");
                },
            }
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(registrar_core::Error::Io)?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

// === Health Endpoint ===

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Student Management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// === Student Endpoints ===

async fn list_students(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<Vec<Student>>, ApiError> {
    let students = state.store.list().await?;
    Ok(Json(students))
}

async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStudentRequest>,
) -> std::result::Result<Json<Student>, ApiError> {
    let request_id = format!("req-{}", uuid::Uuid::new_v4());
    tracing::debug!(request_id = %request_id, names = %req.names, "Create student");

    let student = state.store.create(req.into()).await?;

    tracing::info!(request_id = %request_id, id = %student.id, "Student created");
    Ok(Json(student))
}

async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Student>, ApiError> {
    let student = state.store.get(&id).await?;
    Ok(Json(student))
}

async fn update_grades(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGradesRequest>,
) -> std::result::Result<Json<Student>, ApiError> {
    let request_id = format!("req-{}", uuid::Uuid::new_v4());
    tracing::debug!(request_id = %request_id, id = %id, count = req.grades.len(), "Update grades");

    let student = state.store.update_grades(&id, req.grades).await?;
    Ok(Json(student))
}

async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    state.store.delete(&id).await?;
    tracing::info!(id = %id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
