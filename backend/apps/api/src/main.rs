mod config;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use gateway::HttpBackend;
use platform::client::INIT_DATA_HEADER;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if !config.auth.verification_enabled() {
        tracing::warn!(
            "TELEGRAM_BOT_TOKEN not set: init data is forwarded without signature verification"
        );
    }

    let auth_config = Arc::new(config.auth);
    let backend = HttpBackend::new(config.gateway)?;

    let routes = auth::admin_router(auth_config.clone())
        .merge(gateway::gateway_router(backend, auth_config));

    // CORS configuration
    let origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(INIT_DATA_HEADER),
        ]))
        .allow_credentials(true);

    let routes = if config.api_prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&config.api_prefix, routes)
    };

    let app = routes.layer(TraceLayer::new_for_http()).layer(cors);

    tracing::info!(
        addr = %config.bind_addr,
        prefix = %config.api_prefix,
        "Server listening"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
