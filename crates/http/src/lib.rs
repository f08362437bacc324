//! HTTP server facade for adboard with Axum, error handling, content
//! negotiation and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use adboard_kernel::{settings::Settings, ModuleRegistry};

pub mod accept;
pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry
///
/// Serves until Ctrl-C is received, then lets in-flight requests drain.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let app = build_router(registry, settings);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let mut router_builder = RouterBuilder::new().route("/heartbeat", get(heartbeat));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /{}",
            module.name()
        );
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    router_builder
        .with_openapi(registry)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

/// Liveness endpoint answering with the current server time
async fn heartbeat() -> String {
    format!("Current date and time:{}", current_timestamp())
}

fn current_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc2822).unwrap_or_else(|_| now.to_string())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        // Without a signal handler there is nothing to wait on; keep serving.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        extract::Request,
        http::{header, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_heartbeat_reports_time() {
        let registry = ModuleRegistry::new();
        let router = build_router(&registry, &Settings::default());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/heartbeat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("text/plain"));

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Current date and time:"));
        assert!(text.len() > "Current date and time:".len());
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let registry = ModuleRegistry::new();
        let router = build_router(&registry, &Settings::default());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let spec: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(spec["paths"]["/heartbeat"]["get"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let registry = ModuleRegistry::new();
        let router = build_router(&registry, &Settings::default());

        let response = router
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
