mod api;
mod auth;
mod config;
mod db;
mod inventory;
mod models;
mod schema;
mod telemetry;

use axum::extract::{FromRef, MatchedPath};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::middleware;
use axum::Router;
use mixbuddy_core::vision::{GoogleVisionDetector, LabelDetector, VisionConfig};
use mixbuddy_core::{CocktailAggregator, CocktailDbConfig, CocktailDbSource, ConfigError};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub cocktails: Arc<CocktailAggregator>,
    /// None when no vision API key is configured.
    pub vision: Option<Arc<dyn LabelDetector>>,
}

impl FromRef<AppState> for Arc<db::DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<CocktailAggregator> {
    fn from_ref(state: &AppState) -> Self {
        state.cocktails.clone()
    }
}

impl FromRef<AppState> for Option<Arc<dyn LabelDetector>> {
    fn from_ref(state: &AppState) -> Self {
        state.vision.clone()
    }
}

fn vision_detector() -> Option<Arc<dyn LabelDetector>> {
    let config = match VisionConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingEnvVar(var)) => {
            tracing::info!("{} not set, bottle recognition disabled", var);
            return None;
        }
        Err(e) => {
            tracing::warn!("Invalid vision configuration, bottle recognition disabled: {}", e);
            return None;
        }
    };

    match GoogleVisionDetector::new(&config) {
        Ok(detector) => Some(Arc::new(detector)),
        Err(e) => {
            tracing::warn!("Failed to build vision client, bottle recognition disabled: {}", e);
            None
        }
    }
}

fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    let origin = match origin {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

fn app(state: AppState, cors: CorsLayer) -> Router {
    // Public routes (no auth required)
    let public_router = api::public::router();

    // Protected routes (auth required)
    let protected_router = Router::new()
        .nest("/api/test", api::testing::router())
        .nest("/api/users", api::users::router())
        .nest("/api/inventory", api::inventory::router())
        .nest("/api/cocktails", api::cocktails::router())
        .nest("/api/vision", api::vision::router())
        .layer(middleware::from_fn_with_state(
            state.pool.clone(),
            auth::require_auth,
        ));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .merge(swagger_ui)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Don't create a span at all for noisy endpoints
                    if matched_path == "/api/test/unauthed-ping" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: Duration,
                     span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        match api::openapi().to_pretty_json() {
            Ok(spec) => println!("{}", spec),
            Err(e) => eprintln!("Failed to render OpenAPI spec: {}", e),
        }
        return;
    }

    telemetry::init_telemetry();

    let server_config = config::ServerConfig::from_env().expect("Invalid server configuration");
    let cocktail_config =
        CocktailDbConfig::from_env().expect("Invalid TheCocktailDB configuration");

    let source =
        CocktailDbSource::from_config(&cocktail_config).expect("Failed to build HTTP client");
    let cocktails = CocktailAggregator::new(Arc::new(source))
        .with_max_concurrent_lookups(cocktail_config.max_concurrent_lookups);

    let state = AppState {
        pool: Arc::new(db::create_pool(&server_config.database_url)),
        cocktails: Arc::new(cocktails),
        vision: vision_detector(),
    };

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        cocktaildb = %cocktail_config.base_url,
        cache_ttl_secs = cocktail_config.cache_ttl.as_secs(),
        max_concurrent_lookups = cocktail_config.max_concurrent_lookups,
        "recipe source configured"
    );
    tracing::info!("Server listening on {}", server_config.bind_addr);
    tracing::info!("Swagger UI available at /swagger-ui/");
    tracing::info!("OpenAPI spec available at /api-docs/openapi.json");

    let cors = cors_layer(server_config.cors_allow_origin.clone());
    axum::serve(listener, app(state, cors))
        .await
        .expect("Server error");
}
