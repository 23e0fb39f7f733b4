//! Cookie-backed sessions. The cookie holds a signed token (HS256 JWT) whose
//! subject is the user id; nothing is stored server-side.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{db, error::AppError, models::user::User};

pub const SESSION_COOKIE: &str = "jokebox_session";

const SESSION_DAYS: i64 = 7;

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
}

/// Looks up the user and checks the password. `None` means unknown username
/// or wrong password; callers should not distinguish the two.
pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = db::find_user_by_username(pool, username).await? else {
        return Ok(None);
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(None);
    }

    Ok(Some(user))
}

pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    let user = db::create_user(pool, username, &password_hash).await?;
    Ok(user)
}

/// Mints a session token for `user_id`, sets the cookie, and redirects.
pub fn create_user_session(
    keys: &SessionKeys,
    jar: CookieJar,
    user_id: i64,
    redirect_to: &str,
) -> Result<(CookieJar, Redirect), AppError> {
    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now() + chrono::Duration::days(SESSION_DAYS)).timestamp() as usize,
    };
    let token = encode(&Header::default(), &claims, &keys.encoding)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to(redirect_to)))
}

/// Session user id, or `None` if the cookie is missing, expired, or tampered
/// with. For pages that render with or without a login.
pub fn get_user_id(keys: &SessionKeys, jar: &CookieJar) -> Option<i64> {
    let token = jar.get(SESSION_COOKIE)?;
    let data = decode::<Claims>(token.value(), &keys.decoding, &Validation::default()).ok()?;
    Some(data.claims.sub)
}

pub fn require_user_id(keys: &SessionKeys, jar: &CookieJar) -> Result<i64, AppError> {
    get_user_id(keys, jar).ok_or(AppError::Unauthenticated)
}

pub fn destroy_session(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build(SESSION_COOKIE).path("/").build();
    (jar.remove(cookie), Redirect::to("/login"))
}
