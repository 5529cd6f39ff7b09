//! WishCard Card API
//!
//! Greeting-card generation service.
//!
//! ## REST Endpoints
//!
//! - `POST /api/v1/cards/generate` - Generate a card image
//! - `GET /api/v1/usage` - Current usage summary
//! - `GET /api/v1/payments/checkout` - Redirect to Stripe checkout
//! - `POST /api/v1/gallery` - Save a card
//! - `GET /api/v1/gallery` - List saved cards
//! - `DELETE /api/v1/gallery/{id}` - Delete a saved card
//! - `POST /webhooks/stripe` - Stripe webhook handler
//! - `GET /generated/*` - Persisted card images
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use wishcard_billing::{StripeProvider, WebhookHandler};
use wishcard_card_core::{
    ArtifactStore, CardService, FalClient, ImageGenerator, LocalArtifactStore, PromptTaxonomy,
};
use wishcard_db::Repositories;
use wishcard_ledger::UsageLedger;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("card_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WishCard Card API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(http_port = config.http_port, "Configuration loaded");

    if config.fal_key.is_none() {
        tracing::warn!("FAL_KEY not set; card generation will fail until configured");
    }
    if config.payments.is_none() {
        tracing::warn!("Stripe not configured; checkout and webhooks are disabled");
    }

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool
    let pool = wishcard_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Create repositories and the usage ledger
    let repos = Repositories::new(pool.clone());
    let ledger = Arc::new(UsageLedger::new(Arc::new(repos.ledger.clone())));

    // Card generation pipeline
    let generator = config
        .fal_key
        .as_deref()
        .map(|key| Arc::new(FalClient::new(key)) as Arc<dyn ImageGenerator>);
    let store = Arc::new(LocalArtifactStore::new(&config.media_dir)) as Arc<dyn ArtifactStore>;
    let cards = Arc::new(CardService::new(
        PromptTaxonomy::builtin(),
        generator,
        store,
        Arc::clone(&ledger),
    ));

    // Payments
    let payments = config
        .payments
        .clone()
        .map(|pc| Arc::new(StripeProvider::new(pc)));
    let webhooks = payments
        .as_ref()
        .map(|p| Arc::new(WebhookHandler::new(p.webhook_secret())));

    // Create application state
    let state = AppState {
        cards,
        ledger,
        gallery: Arc::new(repos.gallery.clone()),
        payments,
        webhooks,
        pool,
        config: Arc::new(config.clone()),
    };

    // Build HTTP router
    let app = build_router(state, metrics_handle, &config.media_dir);

    // Start server
    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    run_http_server(app, http_addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>, media_dir: &str) -> Router {
    let request_timeout = state.request_timeout();

    // API v1 routes
    let api_v1 = Router::new()
        .route("/cards/generate", post(handlers::generate_card))
        .route("/usage", get(handlers::get_usage))
        .route("/payments/checkout", get(handlers::create_checkout))
        .route("/gallery", post(handlers::save_card).get(handlers::list_cards))
        .route("/gallery/{id}", delete(handlers::delete_card));

    // Webhook route (separate - uses raw body, no JSON parsing)
    let webhook_routes = Router::new().route("/webhooks/stripe", post(handlers::stripe_webhook));

    // Persisted artifacts
    let artifact_routes = Router::new().nest_service("/generated", ServeDir::new(media_dir));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::new(request_timeout));

    // Combine all routes
    Router::new()
        .nest("/api/v1", api_v1)
        .merge(webhook_routes)
        .merge(artifact_routes)
        .layer(middleware)
        .merge(health_routes) // Health routes without timeout
        .merge(metrics_route) // Metrics route without timeout
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Generation dominates latency; buckets stretch to the provider timeout
    let generation_latency_buckets = &[0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0];
    let http_latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            http_latency_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("card_generation_duration_seconds".to_string()),
            generation_latency_buckets,
        )?;

    let handle = builder.install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!("cards_generated_total", "Total card generations by result");
    metrics::describe_counter!("checkouts_created_total", "Total checkout sessions by tier");
    metrics::describe_counter!(
        "webhooks_processed_total",
        "Total webhooks processed by status"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    metrics::describe_histogram!(
        "card_generation_duration_seconds",
        "End-to-end card generation latency in seconds"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
