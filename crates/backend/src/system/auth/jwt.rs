use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::settings::{get_setting, set_setting};

const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Generate a signed JWT for the given user.
pub async fn generate_token(user_id: &str, username: &str, is_admin: bool) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp,
        iat,
    };

    let secret = get_jwt_secret().await?;
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(token)
}

/// Validate a JWT and extract its claims.
pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Get the signing secret from sys_settings, generating and persisting
/// one on first use. A secret that cannot be read or persisted still
/// yields a usable (but transient) secret; every outstanding token is
/// invalidated when that happens, so the failure is logged.
pub async fn get_jwt_secret() -> Result<String> {
    let existing = match get_setting("jwt_secret").await {
        Ok(existing) => existing,
        Err(err) => {
            tracing::warn!("Failed to read jwt secret: {err:#}");
            None
        }
    };
    if let Some(secret) = existing {
        return Ok(secret);
    }

    let secret = generate_jwt_secret();
    if let Err(err) = set_setting("jwt_secret", &secret).await {
        tracing::warn!("Failed to persist jwt secret, tokens will not survive restart: {err:#}");
    }
    Ok(secret)
}

/// Generate a cryptographically secure secret (256 bits).
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        let decoded = general_purpose::STANDARD.decode(secret).unwrap();
        assert_eq!(decoded.len(), 32);
    }

    // Token signing must keep working when the settings store is
    // unreachable; the secret is then transient.
    #[tokio::test]
    async fn secret_available_even_without_store() {
        let secret = get_jwt_secret().await.unwrap();
        assert!(!secret.is_empty());
    }
}
