use std::net::SocketAddr;
use std::sync::Arc;

use dynamic_cors_rs::http::{AppState, router};
use dynamic_cors_rs::{
    AdmissionConfig, AdmissionController, CorsOptions, CorsPolicy, NetworkSummary,
    build_registry,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dynamic_cors_rs=info,dynamic_cors_server=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdmissionConfig::from_env()?;
    config.announce();

    let network = NetworkSummary::collect(&config.synthesis_input());
    network.log();

    let registry = Arc::new(build_registry(&config, &network));
    let controller = AdmissionController::new(registry, config.posture);
    let state = AppState::new(
        CorsPolicy::new(controller, CorsOptions::default()),
        config.admin_token.clone(),
    );

    let listener = TcpListener::bind((config.bind_address, config.port)).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, posture = %config.posture, "server running");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
