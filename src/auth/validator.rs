// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless token verification.
//!
//! A token passes when, in order:
//!
//! 1. it is non-empty,
//! 2. `jsonwebtoken` accepts it (HS256 signature, structure, and the
//!    optional lifetime/issuer/audience checks, with zero leeway),
//! 3. its `exp` is not before the check instant.
//!
//! Step 3 runs even when library lifetime validation is switched off.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use super::claims::{AuthenticatedUser, TokenClaims};
use super::error::RejectionReason;
use crate::config::{GatewayConfig, ReasonDetail, SigningConfig};

/// Verifies bearer tokens against the immutable signing configuration.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    reason_detail: ReasonDetail,
}

impl TokenValidator {
    pub fn new(signing: &SigningConfig, gateway: &GatewayConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = gateway.validate_lifetime;
        validation.validate_nbf = false;

        // A checked claim must also be present.
        let mut required = vec!["exp"];

        if gateway.validate_issuer {
            if let Some(ref issuer) = signing.issuer {
                validation.set_issuer(&[issuer]);
                required.push("iss");
            }
        }

        match signing.audience {
            Some(ref audience) if gateway.validate_audience => {
                validation.set_audience(&[audience]);
                required.push("aud");
            }
            _ => validation.validate_aud = false,
        }

        validation.set_required_spec_claims(&required);

        Self {
            decoding_key: DecodingKey::from_secret(&signing.secret_key),
            validation,
            reason_detail: gateway.reason_detail,
        }
    }

    /// Validate against the current wall-clock time.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser, RejectionReason> {
        self.validate_at(token, Utc::now())
    }

    /// Validate with the gateway's expiry check evaluated at `now`.
    ///
    /// The library-level expiry check always uses the system clock.
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedUser, RejectionReason> {
        if token.is_empty() {
            return Err(RejectionReason::MissingToken);
        }

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| self.classify(e.kind()))?
            .claims;

        if claims.exp < now.timestamp() {
            return Err(RejectionReason::Expired);
        }

        AuthenticatedUser::from_claims(claims).ok_or(RejectionReason::Malformed)
    }

    fn classify(&self, kind: &ErrorKind) -> RejectionReason {
        if self.reason_detail == ReasonDetail::Generic {
            return RejectionReason::Other;
        }

        match kind {
            ErrorKind::ExpiredSignature => RejectionReason::Expired,
            ErrorKind::InvalidSignature => RejectionReason::InvalidSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => RejectionReason::Malformed,
            _ => RejectionReason::Other,
        }
    }
}
