//! HS256 JWT implementation of the `TokenIssuer` port.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{Account, DomainError, DomainResult, Role, TokenClaims, TokenIssuer};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account id
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &SecretString, ttl_hours: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &Account) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id,
            role: account.role(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| DomainError::Internal(format!("token signing failed: {err}")))
    }

    fn decode(&self, token: &str) -> DomainResult<TokenClaims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Unauthorized("Access denied. Token expired.".into())
                }
                _ => DomainError::Unauthorized("Access denied. Invalid token.".into()),
            },
        )?;
        Ok(TokenClaims {
            account_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::RoleProfile;

    fn issuer(ttl_hours: i64) -> JwtTokenIssuer {
        JwtTokenIssuer::new(&SecretString::from("test-secret"), ttl_hours)
    }

    fn account() -> Account {
        Account::new("Ada".into(), "ada@example.com".into(), "hash".into(), RoleProfile::Admin)
    }

    #[test]
    fn issue_then_decode_round_trip() {
        let issuer = issuer(24);
        let account = account();

        let token = issuer.issue(&account).unwrap();
        let claims = issuer.decode(&token).unwrap();
        assert_eq!(claims.account_id, account.id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let issuer = issuer(24);
        let mut token = issuer.issue(&account()).unwrap();
        token.push('x');

        let err = issuer.decode(&token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = issuer(24).issue(&account()).unwrap();
        let other = JwtTokenIssuer::new(&SecretString::from("other-secret"), 24);
        assert!(other.decode(&token).is_err());
    }
}
