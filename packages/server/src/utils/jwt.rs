use chrono::{Duration, Utc};
use jsonwebtoken::errors::Error;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// User ID. Optional so that a token lacking it can be rejected explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub iat: i64, // Issued-at timestamp
    pub exp: i64, // Expiration timestamp
}

/// Sign a new token for a user, valid for `ttl_secs` seconds.
pub fn sign(user_id: i32, username: &str, secret: &str, ttl_secs: i64) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        username: username.to_owned(),
        id: Some(user_id),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
    };

    encode_claims(&claims, secret)
}

/// Encode an arbitrary claim set. `sign` is the normal entry point.
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, then decode the claims.
pub fn verify(token: &str, secret: &str) -> Result<Claims, Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
