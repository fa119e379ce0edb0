// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance for the login endpoint.
//!
//! Tokens are HS256 JWTs carrying `sub`, `jti`, `iat`, `exp` and, when
//! configured, `iss`/`aud`. Nothing is stored server-side: a token stays valid
//! until its `exp` passes or the signing key changes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use super::claims::TokenClaims;
use super::error::IssueError;
use crate::config::{Credentials, SigningConfig};

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// Checks login credentials and signs session tokens.
pub struct TokenIssuer {
    credentials: Credentials,
    encoding_key: EncodingKey,
    issuer: Option<String>,
    audience: Option<String>,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(credentials: Credentials, signing: &SigningConfig) -> Self {
        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(&signing.secret_key),
            issuer: signing.issuer.clone(),
            audience: signing.audience.clone(),
            lifetime: Duration::minutes(signing.expiration_minutes),
        }
    }

    /// Issue a token if the credentials match, stamped with the current time.
    pub fn issue(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<IssuedToken, IssueError> {
        self.issue_at(username, password, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, IssueError> {
        if !self.credentials.matches(username, password) {
            return Err(IssueError::InvalidCredentials);
        }

        let claims = TokenClaims {
            sub: self.credentials.username.clone().unwrap_or_default(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn signing() -> SigningConfig {
        SigningConfig {
            secret_key: b"issuer-test-secret".to_vec(),
            issuer: Some("classroom".to_string()),
            audience: Some("classroom-clients".to_string()),
            expiration_minutes: 30,
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(Credentials::new("admin", "P@ssw0rd"), &signing())
    }

    #[test]
    fn valid_credentials_yield_verifiable_token() {
        let issued = issuer().issue(Some("admin"), Some("P@ssw0rd")).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["classroom-clients"]);
        validation.set_issuer(&["classroom"]);
        let decoded = decode::<TokenClaims>(
            &issued.token,
            &DecodingKey::from_secret(b"issuer-test-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "admin");
        assert_eq!(decoded.claims, issued.claims);
        assert_eq!(decoded.header.alg, Algorithm::HS256);
    }

    #[test]
    fn expiry_is_issue_time_plus_lifetime() {
        let now = Utc::now();
        let issued = issuer()
            .issue_at(Some("admin"), Some("P@ssw0rd"), now)
            .unwrap();
        assert_eq!(issued.claims.iat, now.timestamp());
        assert_eq!(issued.claims.exp, now.timestamp() + 30 * 60);
    }

    #[test]
    fn each_token_gets_a_fresh_id() {
        let issuer = issuer();
        let first = issuer.issue(Some("admin"), Some("P@ssw0rd")).unwrap();
        let second = issuer.issue(Some("admin"), Some("P@ssw0rd")).unwrap();
        assert_ne!(first.claims.jti, second.claims.jti);
        assert!(Uuid::parse_str(&first.claims.jti).is_ok());
    }

    #[test]
    fn mismatched_credentials_are_refused() {
        let issuer = issuer();
        for (user, pass) in [
            (Some("admin"), Some("wrong")),
            (Some("ADMIN"), Some("P@ssw0rd")),
            (Some("admin"), Some("p@ssw0rd")),
            (None, Some("P@ssw0rd")),
            (Some("admin"), None),
            (Some(""), Some("")),
        ] {
            assert!(matches!(
                issuer.issue(user, pass),
                Err(IssueError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn issuer_and_audience_omitted_when_unconfigured() {
        let mut signing = signing();
        signing.issuer = None;
        signing.audience = None;
        let issued = TokenIssuer::new(Credentials::new("admin", "pw"), &signing)
            .issue(Some("admin"), Some("pw"))
            .unwrap();
        assert!(issued.claims.iss.is_none());
        assert!(issued.claims.aud.is_none());
    }

    #[test]
    fn unset_username_yields_empty_subject() {
        let issued = TokenIssuer::new(Credentials::default(), &signing())
            .issue(None, None)
            .unwrap();
        assert_eq!(issued.claims.sub, "");
    }
}
