// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use dvpn_gateway::{
    api::router,
    blockchain::EntitlementClient,
    config::{GatewayConfig, LOG_FORMAT_ENV},
    state::AppState,
    storage::NodeRegistry,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid gateway configuration: {e}");
            std::process::exit(1);
        }
    };

    let entitlement = EntitlementClient::new(
        config.network.clone(),
        &config.rpc_url,
        &config.contract_address,
        config.rpc_timeout,
    )
    .expect("Failed to initialize entitlement client");

    let registry = NodeRegistry::new(&config.registry_db);
    // Ensure a fresh deployment starts from an empty table rather than a
    // missing one; the approval workflow owns the data itself.
    registry
        .initialize_schema()
        .await
        .expect("Failed to open node registry");

    let state = AppState::new(Arc::new(entitlement), registry);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(
        network = config.network.name,
        contract = %config.contract_address,
        registry = %config.registry_db.display(),
        %addr,
        "dVPN access gateway listening (docs at /docs)"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("shutdown signal received");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
