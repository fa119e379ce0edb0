// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Business endpoint errors.
//!
//! Gateway rejections never pass through here; they are answered as
//! plain-text 401s by [`crate::auth::RejectionReason`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::IssueError;

/// Message returned when token signing fails on login.
pub const TOKEN_ISSUE_FAILED: &str = "Failed to issue token";

/// An error answered with a JSON body: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Unknown record on the store level.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Failed input validation, unknown ids in handler paths, bad paging.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<IssueError> for ApiError {
    /// The login handler answers `InvalidCredentials` in-band, so reaching
    /// this conversion with it means a caller skipped that step.
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::InvalidCredentials => Self::bad_request(err.to_string()),
            IssueError::Signing(_) => Self::internal(TOKEN_ISSUE_FAILED),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}
