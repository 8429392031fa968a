use std::collections::HashMap;
use std::sync::RwLock;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{NewUser, User};

use super::{ApiError, AppState};

// ============================================================================
// Auth & Sessions
// ============================================================================
//
// Bearer tokens in an in-process map; passwords stored as salted SHA-256
// digests ("salt$hex"). Deliberately minimal: the session layer is an
// external collaborator to the marketplace core, not part of it.
//
// ============================================================================

/// Token -> user id. Lives inside `AppState`, never global.
pub struct Sessions {
    tokens: RwLock<HashMap<String, i64>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
        }
    }

    pub fn issue(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user_id);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .copied()
    }

    pub fn revoke(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{salt}${}", hex::encode(hasher.finalize()))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, _)) => hash_password(password, salt) == stored,
        None => false,
    }
}

/// Resolve the bearer token on `req` to a full user record.
pub async fn authenticate(req: &HttpRequest, state: &AppState) -> Result<User, ApiError> {
    let token = bearer_token(req).ok_or(ApiError::Unauthenticated)?;

    let user_id = state
        .sessions
        .resolve(token)
        .ok_or(ApiError::Unauthenticated)?;

    state
        .store
        .get_user(user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let mut new_user = body.into_inner();

    if new_user.username.trim().is_empty() {
        return Err(ApiError::Validation("username must not be empty".into()));
    }
    if new_user.password.is_empty() {
        return Err(ApiError::Validation("password must not be empty".into()));
    }
    if state
        .store
        .get_user_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation("username already taken".into()));
    }

    let salt = Uuid::new_v4().simple().to_string();
    new_user.password = hash_password(&new_user.password, &salt);

    let user = state
        .store
        .create_user(User {
            id: 0,
            username: new_user.username,
            password: new_user.password,
            role: new_user.role,
            name: new_user.name,
            phone: new_user.phone,
            address: new_user.address,
            business_name: new_user.business_name,
            latitude: new_user.latitude,
            longitude: new_user.longitude,
        })
        .await?;

    let token = state.sessions.issue(user.id);
    tracing::info!(user_id = user.id, role = user.role.as_str(), "account registered");

    Ok(HttpResponse::Created().json(serde_json::json!({ "token": token, "user": user })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .get_user_by_username(&body.username)
        .await?
        .filter(|u| verify_password(&body.password, &u.password))
        .ok_or(ApiError::Unauthenticated)?;

    let token = state.sessions.issue(user.id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token, "user": user })))
}

pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(token) = bearer_token(&req) {
        state.sessions.revoke(token);
    }
    HttpResponse::Ok().finish()
}

pub async fn current_user(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;
    Ok(HttpResponse::Ok().json(user))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips() {
        let stored = hash_password("hunter2", "abc123");
        assert!(stored.starts_with("abc123$"));
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
        assert!(!verify_password("hunter2", "garbage-without-salt"));
    }

    #[test]
    fn same_password_different_salt_differs() {
        assert_ne!(
            hash_password("hunter2", "saltA"),
            hash_password("hunter2", "saltB")
        );
    }

    #[test]
    fn sessions_issue_resolve_revoke() {
        let sessions = Sessions::new();
        let token = sessions.issue(42);
        assert_eq!(sessions.resolve(&token), Some(42));

        sessions.revoke(&token);
        assert_eq!(sessions.resolve(&token), None);
        assert_eq!(sessions.resolve("unknown"), None);
    }
}
