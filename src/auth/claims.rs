// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated identity representation.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// `iss` and `aud` are only present when the service is configured with an
/// issuer or audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the configured username, empty if none is configured)
    pub sub: String,

    /// Unique token identifier (UUID v4)
    pub jti: String,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Identity attached to a request once the gateway admits it.
///
/// There are no roles: admission is binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Token subject (`sub`)
    pub subject: String,

    /// Token identifier (`jti`)
    pub token_id: String,

    pub issued_at: Option<DateTime<Utc>>,

    pub expires_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl AuthenticatedUser {
    /// Build from decoded claims.
    ///
    /// Returns `None` when `exp` is outside the representable range.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single()?;
        let issued_at = match claims.iat {
            0 => None,
            iat => Utc.timestamp_opt(iat, 0).single(),
        };

        Some(Self {
            subject: claims.sub,
            token_id: claims.jti,
            issued_at,
            expires_at,
            issuer: claims.iss,
            audience: claims.aud,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: "admin".to_string(),
            jti: "6a3c1f0e-0000-4000-8000-000000000001".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            iss: Some("classroom".to_string()),
            aud: None,
        }
    }

    #[test]
    fn from_claims_copies_identity() {
        let user = AuthenticatedUser::from_claims(sample_claims()).unwrap();
        assert_eq!(user.subject, "admin");
        assert_eq!(user.token_id, "6a3c1f0e-0000-4000-8000-000000000001");
        assert_eq!(user.expires_at.timestamp(), 1_700_003_600);
        assert_eq!(user.issued_at.map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(user.issuer.as_deref(), Some("classroom"));
    }

    #[test]
    fn missing_iat_is_none() {
        let mut claims = sample_claims();
        claims.iat = 0;
        let user = AuthenticatedUser::from_claims(claims).unwrap();
        assert!(user.issued_at.is_none());
    }

    #[test]
    fn optional_claims_are_omitted_when_serialized() {
        let mut claims = sample_claims();
        claims.iss = None;
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("iss").is_none());
        assert!(json.get("aud").is_none());
        assert_eq!(json["sub"], "admin");
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        let mut claims = sample_claims();
        claims.exp = i64::MAX;
        assert!(AuthenticatedUser::from_claims(claims).is_none());
    }
}
