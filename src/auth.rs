// src/auth.rs
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CANDIDATE: &str = "candidate";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Candidate/user ID
    pub email: String,
    pub role: String,
    pub exp: usize, // Expiration timestamp
    pub iat: usize, // Issued at timestamp
}

pub struct AuthConfig {
    secret: String,
}

impl AuthConfig {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }
}

/// Authenticated portal user, decoded from the bearer token.
pub struct AuthenticatedUser {
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn role(&self) -> &str {
        &self.claims.role
    }

    pub fn is_admin(&self) -> bool {
        self.claims.role == ROLE_ADMIN
    }

    /// The token subject as a candidate id.
    pub fn candidate_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.claims.sub)
            .map_err(|_| anyhow::anyhow!("Token subject is not a valid candidate id"))
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::ConfigError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        // Extract Authorization header
        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let claims = match verify_token(token, auth_config) {
            Ok(claims) => claims,
            Err(e) => {
                error!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        Outcome::Success(AuthenticatedUser { claims })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    NotAuthorized,
    ConfigError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::NotAuthorized => "User not authorized for this operation",
            AuthError::ConfigError => "Authentication configuration error",
        }
    }
}

fn verify_token(token: &str, auth_config: &AuthConfig) -> Result<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    let decoding_key = DecodingKey::from_secret(auth_config.secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(token_data.claims)
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(role: &str, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "user@example.com".to_string(),
            role: role.to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_token_accepts_valid_token() {
        let config = AuthConfig::new("test-secret".to_string());
        let token = token_for(ROLE_CANDIDATE, "test-secret");

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.role, ROLE_CANDIDATE);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_verify_token_rejects_wrong_secret() {
        let config = AuthConfig::new("test-secret".to_string());
        let token = token_for(ROLE_ADMIN, "other-secret");

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_admin_role_check() {
        let config = AuthConfig::new("s".to_string());
        let admin = AuthenticatedUser {
            claims: verify_token(&token_for(ROLE_ADMIN, "s"), &config).unwrap(),
        };
        let candidate = AuthenticatedUser {
            claims: verify_token(&token_for(ROLE_CANDIDATE, "s"), &config).unwrap(),
        };

        assert!(admin.is_admin());
        assert!(!candidate.is_admin());
        assert!(candidate.candidate_id().is_ok());
    }
}
