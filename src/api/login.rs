// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.
//!
//! Credential mismatches are an expected outcome, not an HTTP error: the
//! endpoint always answers 200 and signals the result through `Code`.

use axum::{extract::State, Json};
use tracing::{error, info, warn};

use crate::{
    auth::IssueError,
    error::ApiError,
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

/// Message returned with `Code` 2.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid login credentials.";

/// Exchange the configured username/password for a session token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Code 1 with a token, or Code 2 with a message", body = LoginResponse),
        (status = 500, description = "Token signing failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state
        .issuer
        .issue(request.username.as_deref(), request.password.as_deref())
    {
        Ok(issued) => {
            info!(
                subject = %issued.claims.sub,
                token_id = %issued.claims.jti,
                "Issued session token"
            );
            Ok(Json(LoginResponse::success(issued.token)))
        }
        Err(IssueError::InvalidCredentials) => {
            warn!(
                username = request.username.as_deref().unwrap_or_default(),
                "Login refused: invalid credentials"
            );
            Ok(Json(LoginResponse::failure(INVALID_CREDENTIALS_MESSAGE)))
        }
        Err(e) => {
            error!(error = %e, "Failed to sign session token");
            Err(e.into())
        }
    }
}
