//! # facewatch: Control Plane for a Face Recognition SaaS
//!
//! `facewatch` is the data-management backend of a face recognition platform:
//! user accounts, subscription packages, camera registration, face
//! registration, and detection-log retrieval. The recognition pipeline itself
//! (face encoding, matching, camera stream processing) is an external
//! collaborator — this service owns the tables, the access control, and the
//! package entitlements that govern them.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and PostgreSQL (via sqlx) for persistence.
//!
//! The **API layer** ([`api`]) exposes a REST surface under `/auth`,
//! `/packages`, `/cameras`, `/faces`, `/detections`, and `/dashboard`.
//! Uploaded face images are served back as static files under `/uploads`,
//! and interactive API docs live at `/docs`.
//!
//! The **authentication layer** ([`auth`]) issues JWT bearer tokens on login
//! and records each one in a session ledger. Verification is revocation-aware:
//! a token is honored only while its signature checks out *and* its ledger row
//! is present and unexpired, so logout takes effect immediately.
//!
//! The **entitlement layer** ([`entitlements`]) resolves a user's package
//! into camera and face quotas and gates every resource creation inside the
//! same transaction as the insert, taking a row lock on the owning user so
//! concurrent requests cannot race past the limit.
//!
//! The **database layer** ([`db`]) uses the repository pattern; every camera,
//! face, and detection operation is ownership-scoped, so a foreign id is
//! indistinguishable from a missing one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use facewatch::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = facewatch::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     facewatch::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entitlements;
pub mod errors;
mod openapi;
pub mod storage;
pub mod telemetry;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use bon::Builder;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
pub use types::{CameraId, DetectionLogId, FaceId, PackageId, SessionId, UserId};

use crate::storage::{FileStorage, LocalFileStorage};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub storage: Arc<dyn FileStorage>,
}

/// Get the facewatch database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request()))
}

/// Build the main application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let uploads_dir = state.config.storage.uploads_dir.clone();
    let upload_limit = state.config.storage.max_upload_size as usize;

    let auth_routes = Router::new()
        .route("/auth/register", post(api::handlers::auth::register))
        .route("/auth/login", post(api::handlers::auth::login))
        .route("/auth/logout", post(api::handlers::auth::logout))
        .route("/auth/me", get(api::handlers::auth::me));

    let api_routes = Router::new()
        .route("/packages", get(api::handlers::packages::list_packages))
        // Cameras
        .route("/cameras", get(api::handlers::cameras::list_cameras))
        .route("/cameras", post(api::handlers::cameras::create_camera))
        .route("/cameras/{id}", put(api::handlers::cameras::update_camera))
        .route("/cameras/{id}", delete(api::handlers::cameras::delete_camera))
        .route("/cameras/{id}/test", post(api::handlers::cameras::test_camera))
        // Registered faces (upload route gets its own body limit)
        .route(
            "/faces",
            get(api::handlers::faces::list_faces)
                .post(api::handlers::faces::create_face)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/faces/{id}", delete(api::handlers::faces::delete_face))
        // Detection logs and dashboard
        .route("/detections", get(api::handlers::detections::list_detections))
        .route("/dashboard/stats", get(api::handlers::dashboard::stats));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(api_routes)
        .with_state(state)
        // Uploaded images are served back as static files
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL, runs
///    migrations, and prepares the uploads directory
/// 2. **Serve**: [`Application::serve`] binds the listener and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting facewatch with configuration: {:#?}", config);

        let database_url = config
            .database_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("database_url is not configured (set DATABASE_URL or database_url in the config file)"))?;

        let pool = PgPool::connect(&database_url).await?;
        migrator().run(&pool).await?;

        tokio::fs::create_dir_all(&config.storage.uploads_dir).await?;
        let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(config.storage.uploads_dir.clone()));

        let state = AppState::builder().db(pool.clone()).config(config.clone()).storage(storage).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "facewatch listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
