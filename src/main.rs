use actix_web::HttpServer;
use infra_site_gateway::{AppState, GatewayConfig, create_app, telemetry::init_tracing};
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = GatewayConfig::from_env();
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("failed to initialize tracing: {e}");
    }

    if !config.metrics.enabled {
        warn!("Metrics collection disabled");
    }

    let bind = (config.server.bind_address.clone(), config.server.port);
    info!(
        bind_address = %bind.0,
        port = bind.1,
        environment = config.server.environment.as_str(),
        backend_url = %config.proxy.backend_url,
        "Starting gateway"
    );

    let state = AppState::from_config(config).map_err(std::io::Error::other)?;

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind)?
        .run()
        .await
}
