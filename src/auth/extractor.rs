// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! The gateway middleware has already validated the token by the time a
//! handler runs; `Auth` only reads the identity it attached:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthenticatedUser, RejectionReason};

/// Extractor for the identity admitted by the gateway.
///
/// Rejects with [`RejectionReason::MissingToken`] when no identity is
/// attached, e.g. on a route reached through a bypass path.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = RejectionReason;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Auth)
            .ok_or(RejectionReason::MissingToken)
    }
}
