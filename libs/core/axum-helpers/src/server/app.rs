use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wrap API routes with docs, the JSON 404 fallback, request tracing and optional CORS.
///
/// `apis` is merged at the root, so its paths are served as written. Swagger UI is served at
/// `/swagger-ui` and the document at `/api-docs/openapi.json`. `cors_origins` is a
/// comma-separated list; `None` adds no CORS layer.
pub fn create_router<T>(apis: Router, cors_origins: Option<&str>) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    match cors_origins {
        Some(origins) => Ok(router.layer(cors_layer(origins)?)),
        None => Ok(router),
    }
}

fn cors_layer(origins: &str) -> io::Result<CorsLayer> {
    let allowed = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if allowed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN is set but lists no origins",
        ));
    }

    info!(origins, "CORS enabled");
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Bind `server_config`, serve until SIGINT/SIGTERM, then run `cleanup` within `cleanup_timeout`.
pub async fn serve<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    serve_with_shutdown(listener, router, shutdown_signal(), cleanup_timeout, cleanup).await
}

/// Serve on an already bound listener until `signal` resolves.
///
/// In-flight requests drain before `cleanup` starts. A cleanup that outlives
/// `cleanup_timeout` is abandoned with a warning.
pub async fn serve_with_shutdown<S, F>(
    listener: TcpListener,
    router: Router,
    signal: S,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()> + Send,
{
    info!("Server listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(signal)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server encountered an error"));

    info!(timeout = ?cleanup_timeout, "Running shutdown cleanup");
    if tokio::time::timeout(cleanup_timeout, cleanup).await.is_err() {
        warn!(timeout = ?cleanup_timeout, "Cleanup timed out, forcing shutdown");
    }

    served
}
