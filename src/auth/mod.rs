// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module is the token gateway in front of the Classroom API.
//!
//! ## Auth Flow
//!
//! 1. Client posts the configured username/password to the login endpoint
//! 2. [`TokenIssuer`] compares them verbatim and signs an HS256 JWT
//!    (`sub`, `jti`, `iat`, `exp`, optional `iss`/`aud`)
//! 3. Client sends `Authorization: Bearer <token>` on every other request
//! 4. [`middleware::gateway_middleware`]:
//!    - admits bypass paths (login, API docs) untouched
//!    - rejects a missing/empty token
//!    - verifies signature and structure through [`TokenValidator`]
//!    - re-checks `exp` against the current time
//!    - attaches an [`AuthenticatedUser`] and passes the request on
//!
//! ## Security
//!
//! - Validation is stateless: no revocation, no replay tracking
//! - Any failure is a 401; the gateway never admits on error
//! - Credentials are plaintext configuration compared by equality
//! - No clock skew tolerance

pub mod claims;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod middleware;
pub mod validator;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::{IssueError, RejectionReason};
pub use extractor::Auth;
pub use issuer::{IssuedToken, TokenIssuer};
pub use middleware::{gateway_middleware, BypassPaths, Gateway};
pub use validator::TokenValidator;
