use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse},
    entity::admin_users::{ActiveModel as AdminActive, Column as AdminCol, Entity as AdminUsers},
    error::{AppError, AppResult},
    middleware::auth::ADMIN_ROLE,
    response::ApiResponse,
    state::AppState,
};

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let admin = AdminUsers::find()
        .filter(AdminCol::Username.eq(username.as_str()))
        .one(state.db())
        .await?;

    // Unknown user and wrong password must be indistinguishable to the caller,
    // in timing as well as in the response.
    let admin = match admin {
        Some(a) if verify_password(&password, &a.password_hash)? => a,
        Some(_) => {
            tracing::warn!(username = %username, "admin login rejected");
            return Err(AppError::Unauthorized);
        }
        None => {
            burn_password_check(&password)?;
            tracing::warn!(username = %username, "admin login rejected");
            return Err(AppError::Unauthorized);
        }
    };

    let token = issue_token(
        &admin.username,
        &state.config.jwt_secret,
        Duration::days(state.config.jwt_ttl_days),
    )?;

    tracing::info!(username = %admin.username, "admin logged in");

    Ok(ApiResponse::item(
        "Logged in",
        LoginResponse {
            token,
            username: admin.username,
        },
    ))
}

/// Inserts the configured admin unless one with that username already exists.
/// Returns `true` when a row was created.
pub async fn seed_admin(
    orm: &DatabaseConnection,
    username: &str,
    password: &str,
) -> AppResult<bool> {
    let exists = AdminUsers::find()
        .filter(AdminCol::Username.eq(username))
        .one(orm)
        .await?
        .is_some();
    if exists {
        return Ok(false);
    }

    AdminActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    tracing::info!(username = %username, "seeded initial admin user");
    Ok(true)
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

/// Runs one argon2 hash so a miss on the username costs as much as a
/// wrong password.
fn burn_password_check(password: &str) -> AppResult<()> {
    hash_password(password).map(|_| ())
}

pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(username: &str, secret: &str, ttl: Duration) -> AppResult<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: username.to_string(),
        role: ADMIN_ROLE.to_string(),
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Checks signature and expiry.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-enough-length-for-hs256";

    #[test]
    fn token_round_trips_username_and_admin_role() {
        let token = issue_token("admin", SECRET, Duration::days(7)).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert!(claims.exp - claims.iat >= Duration::days(7).num_seconds() - 1);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token("admin", SECRET, Duration::days(7)).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token("admin", SECRET, Duration::days(-1)).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn unknown_user_path_still_runs_argon2() {
        let started = std::time::Instant::now();
        burn_password_check("admin123").unwrap();
        let burned = started.elapsed();

        let hash = hash_password("admin123").unwrap();
        let started = std::time::Instant::now();
        assert!(!verify_password("wrong", &hash).unwrap());
        let verified = started.elapsed();

        // Same argon2 parameters on both paths; allow generous scheduling noise.
        assert!(burned * 10 >= verified);
    }

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash).unwrap());
        assert!(!verify_password("admin124", &hash).unwrap());
    }
}
