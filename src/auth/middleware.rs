// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Every request passes through [`gateway_middleware`] before routing. It
//! either admits the request (attaching an [`AuthenticatedUser`] to its
//! extensions) or ends it with a 401. Bypass paths skip token inspection
//! entirely.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/v1/class/load", get(list_classes))
//!     .layer(axum::middleware::from_fn_with_state(gateway, gateway_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthenticatedUser, RejectionReason, TokenValidator};
use crate::config::GatewayConfig;

/// Path prefixes admitted without a token.
///
/// Matching is per path segment and ignores ASCII case: `/api/v1/login`
/// covers `/api/v1/login` and `/api/v1/login/...` but not `/api/v1/loginx`.
#[derive(Debug, Clone, Default)]
pub struct BypassPaths {
    prefixes: Vec<String>,
}

impl BypassPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| p.trim_end_matches('/').to_string())
            .collect();
        Self { prefixes }
    }

    pub fn matches(&self, path: &str) -> bool {
        let path = path.as_bytes();
        self.prefixes.iter().any(|prefix| {
            let prefix = prefix.as_bytes();
            if path.len() < prefix.len() || !path[..prefix.len()].eq_ignore_ascii_case(prefix) {
                return false;
            }
            let rest = &path[prefix.len()..];
            rest.is_empty() || rest[0] == b'/'
        })
    }
}

/// Gateway state: the validator plus the bypass list.
#[derive(Clone)]
pub struct Gateway {
    validator: Arc<TokenValidator>,
    bypass: Arc<BypassPaths>,
}

impl Gateway {
    pub fn new(validator: TokenValidator, config: &GatewayConfig) -> Self {
        Self {
            validator: Arc::new(validator),
            bypass: Arc::new(BypassPaths::new(&config.bypass_paths)),
        }
    }

    /// Presence check followed by token validation.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, RejectionReason> {
        let token = bearer_token(headers.get(AUTHORIZATION))?;
        self.validator.validate(token)
    }
}

/// Extract the bearer token from an `Authorization` header value.
///
/// A leading `"Bearer "` is stripped when present; a bare value is used as
/// the token itself. Header bytes that are not visible ASCII fail closed.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, RejectionReason> {
    let value = header
        .ok_or(RejectionReason::MissingToken)?
        .to_str()
        .map_err(|_| RejectionReason::Other)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(RejectionReason::MissingToken);
    }
    Ok(token)
}

/// Authentication middleware function.
pub async fn gateway_middleware(
    State(gateway): State<Gateway>,
    mut request: Request,
    next: Next,
) -> Response {
    if gateway.bypass.matches(request.uri().path()) {
        return next.run(request).await;
    }

    match gateway.authenticate(request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(reason) => reason.into_response(),
    }
}
