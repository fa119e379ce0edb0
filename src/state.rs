// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{Gateway, TokenIssuer, TokenValidator};
use crate::config::AppConfig;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub issuer: Arc<TokenIssuer>,
    pub gateway: Gateway,
}

impl AppState {
    /// Build the issuer and gateway from the immutable configuration.
    pub fn new(config: &AppConfig, store: InMemoryStore) -> Self {
        let validator = TokenValidator::new(&config.signing, &config.gateway);
        Self {
            store: Arc::new(RwLock::new(store)),
            issuer: Arc::new(TokenIssuer::new(
                config.credentials.clone(),
                &config.signing,
            )),
            gateway: Gateway::new(validator, &config.gateway),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(&crate::config::test_config(), InMemoryStore::new())
    }
}
