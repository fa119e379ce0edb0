// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Why the gateway refused a request.
///
/// Every variant maps to HTTP 401 with a short plain-text body. Nothing
/// else in the gateway can turn a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    /// No bearer token, or an empty one
    #[error("Token is missing or invalid")]
    MissingToken,
    /// `exp` lies in the past
    #[error("Token has expired")]
    Expired,
    /// HMAC does not match the signing key
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Not a decodable JWT
    #[error("Token is malformed")]
    Malformed,
    /// Anything else, including unreadable header bytes
    #[error("Invalid token")]
    Other,
}

impl RejectionReason {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for RejectionReason {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Token issuance failure.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// Username or password did not match. This is an expected outcome,
    /// reported in-band by the login endpoint.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
