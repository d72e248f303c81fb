use actix_web::{web, App, HttpResponse, HttpServer};
use std::env;
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use gk_api::middleware::RateLimiter;
use gk_core::services::rate_limit::TieredRateLimiter;
use gk_core::stores::CounterStore;
use gk_infra::cache::RedisClient;
use gk_infra::stores::{InMemoryCounterStore, RedisCounterStore};
use gk_shared::{CacheStrategyConfig, CacheType, RateLimitConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting GateKeep admission gateway");

    // Load configuration
    let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = env::var("SERVER_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("SERVER_PORT must be a valid port number");

    let rate_limit_config = RateLimitConfig::from_env();
    let store_config = CacheStrategyConfig::from_env();

    let store: Arc<dyn CounterStore> = match store_config.cache_type {
        CacheType::Redis => {
            let cache_config = store_config.redis.unwrap_or_default();
            let client = RedisClient::new(cache_config)
                .await
                .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
            info!("Using Redis counter store");
            Arc::new(RedisCounterStore::new(Arc::new(client)))
        }
        CacheType::Memory => {
            info!("Using in-memory counter store, limits are per-process");
            Arc::new(InMemoryCounterStore::new())
        }
    };

    let limiter = Arc::new(TieredRateLimiter::new(store, rate_limit_config));

    let bind_address = format!("{}:{}", server_host, server_port);
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RateLimiter::new(limiter.clone()))
            .route("/health", web::get().to(health_check))
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "not_found",
                    "message": "The requested resource was not found"
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "gatekeep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
