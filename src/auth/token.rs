use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// The only audience tokens are accepted for.
pub const AUDIENCE: &str = "TodoApi";

/// Message returned when a valid token carries no principal name.
pub const RELOGIN_MESSAGE: &str = "Unauthorized. Please re-login.";

/// HS256 keys shorter than this are refused.
pub const MIN_SECRET_LEN: usize = 16;

/// Allowed clock drift when checking `exp` and `nbf`, in seconds.
const CLOCK_SKEW_SECS: u64 = 300;

/// Claims read from a validated bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Principal name. Issued as `unique_name`; a plain `name` claim is accepted too.
    #[serde(rename = "unique_name", alias = "name", default)]
    pub name: Option<String>,
    /// Subject identifier, if the issuer sets one.
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl Claims {
    /// The principal name, or `None` when the claim is missing or empty.
    pub fn principal_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Serialize)]
struct IssuedClaims<'a> {
    unique_name: &'a str,
    aud: &'a str,
    iat: usize,
    nbf: usize,
    exp: usize,
}

/// Signing key and validation policy for bearer tokens.
///
/// Lifetime and signature are always checked, the audience must be
/// [`AUDIENCE`], and the issuer is not checked.
pub struct JwtSettings {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSettings {
    /// Derives the symmetric key from the application secret.
    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Configuration(format!(
                "APP_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = CLOCK_SKEW_SECS;
        validation.set_audience(&[AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verifies a JWT string and decodes its claims.
    ///
    /// Signature, lifetime and audience are checked first. A token that passes
    /// those checks is still rejected when it carries no principal name.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.principal_name().is_none() {
            return Err(AppError::Unauthorized(RELOGIN_MESSAGE.into()));
        }
        Ok(claims)
    }

    /// Mints a token for `name` with the same key and audience the API accepts.
    pub fn issue_token(&self, name: &str, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::InternalServerError("Token lifetime out of range".into()))?;

        let claims = IssuedClaims {
            unique_name: name,
            aud: AUDIENCE,
            iat: now.timestamp() as usize,
            nbf: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }
}
