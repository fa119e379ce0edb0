// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use classroom_api::{
    api::router, config::AppConfig, state::AppState, store::InMemoryStore,
    telemetry::init_tracing,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    if config.signing.secret_key.is_empty() {
        warn!("JWT_KEY is empty; tokens are signed with an empty HMAC key");
    }
    if config.credentials.username.is_none() || config.credentials.password.is_none() {
        warn!("ACCOUNT_USERNAME or ACCOUNT_PASSWORD is unset; login only matches absent fields");
    }
    info!(
        bypass_paths = ?config.gateway.bypass_paths,
        token_lifetime_minutes = config.signing.expiration_minutes,
        validate_lifetime = config.gateway.validate_lifetime,
        "Token gateway configured"
    );

    let mut store = InMemoryStore::new();
    for fullname in &config.seed_classes {
        let class = store.insert_class(fullname.as_str());
        info!(class_id = %class.class_id, fullname = %class.fullname, "Seeded class");
    }

    let state = AppState::new(&config, store);
    let app = router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Classroom API listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server stopped");
    Ok(())
}
