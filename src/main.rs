mod models;
mod handlers;
mod services;
mod middleware;
mod config;
mod errors;
mod state;
mod training;
mod leads;
mod utils;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{any, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use std::sync::Arc;
use crate::{
    config::{Config, CorsConfig},
    services::{ApiClient, RedisWatchStore},
    state::AppState,
    training::QuestionBank,
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
        ]);

    if config.allowed_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("Invalid CORS origin {}", config.allowed_origin))?;
    Ok(layer.allow_origin(origin))
}

fn build_router(state: AppState) -> anyhow::Result<Router> {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");
    let cors = cors_layer(&state.config.cors)?;
    let static_dir = state.config.server.static_dir.clone();

    let app = Router::new()
        // Shell pages
        .route("/", get(handlers::serve_shell))
        .route("/login", get(handlers::serve_shell))
        .route("/register", get(handlers::serve_shell))
        .route("/health", get(handlers::health))

        // Auth routes
        .route("/auth/register", post(handlers::handle_register))
        .route("/auth/login", post(handlers::handle_login))
        .route("/auth/logout", get(handlers::handle_logout).post(handlers::handle_logout))
        .route("/auth/me", get(handlers::current_user))

        // Training gate
        .route("/pre-dashboard", get(handlers::serve_gate))
        .route("/training/videos/:id", get(handlers::video_status))
        .route("/training/videos/:id/events", post(handlers::player_event))
        .route("/training/quiz", get(handlers::quiz_questions).post(handlers::submit_quiz))
        .route("/training/complete", post(handlers::complete_training))

        // Hunter dashboard
        .route("/dashboard", get(handlers::serve_dashboard))
        .route("/leads", get(handlers::list_leads).post(handlers::create_lead))
        .route("/leads/stats", get(handlers::lead_stats))

        // Admin panel
        .route("/admin/leads", get(handlers::admin_leads))
        .route("/admin/leads/:id/status", put(handlers::update_lead_status))
        .route("/admin/candidates", get(handlers::list_candidates))
        .route("/admin/candidates/:id/schedule", put(handlers::schedule_candidate))
        .route("/admin/candidates/:id/approve", put(handlers::approve_candidate))

        // Browser-facing passthrough to the backend
        .route("/api/proxy/*path", any(handlers::proxy_request))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load().context("Failed to load configuration")?;

    let redis_url = if config.redis.sentinel_enabled {
        config
            .redis
            .sentinel_url
            .clone()
            .context("Sentinel URL not configured")?
    } else {
        config.redis.url.clone()
    };
    let redis_client = Arc::new(redis::Client::open(redis_url).context("Failed to connect to Redis")?);

    let upstream = ApiClient::new(&config.backend).context("Failed to build backend client")?;
    let question_bank = QuestionBank::bundled().context("Failed to load quiz questions")?;
    tracing::info!("Loaded {} quiz questions", question_bank.len());

    let state = AppState {
        backend: Arc::new(upstream.clone()),
        upstream,
        watch_store: Arc::new(RedisWatchStore::new(redis_client)),
        question_bank: Arc::new(question_bank),
        config: Arc::new(config.clone()),
    };
    let app = build_router(state)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server stopped")?;
    Ok(())
}
