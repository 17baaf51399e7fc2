use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use log::info;
use serde::Serialize;

use crate::api::auth_extractor::extract_bearer_token;
use crate::api::handlers::{
    internal_error, not_found, upsert_error, ApiError, AppState, ErrorResponse, ListResponse,
};
use crate::logic::validate::{check_email, check_required, FieldErrors};
use crate::model::{
    generate_token, sha256_hex, AuthUser, Id, LoginRequest, NewPasskeyCredential,
    NewUserAccount, PasskeyCredential, Session, UserAccount,
};
use crate::store::traits::Store;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: AuthUser,
}

fn validate_account(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "email", email);
    check_email(&mut errors, "email", email);
    if password.len() < 8 {
        errors.push("password", "must be at least 8 characters");
    }
    errors
}

pub async fn register<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_account): Json<NewUserAccount>,
) -> Result<(StatusCode, Json<UserAccount>), ApiError> {
    let errors = validate_account(&new_account.email, &new_account.password);
    if !errors.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(errors)),
        ));
    }

    match ctx.store.find_user_by_email(&new_account.email).await {
        Ok(Some(_)) => {
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("Email is already registered")),
            ))
        }
        Ok(None) => {}
        Err(e) => return Err(internal_error(e)),
    }

    let user = UserAccount::new(
        new_account.email,
        new_account.display_name,
        &new_account.password,
        new_account.is_admin.unwrap_or(false),
    );

    match ctx.store.upsert_user(user.clone()).await {
        Ok(()) => {
            info!("Registered account {}", user.email);
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => Err(upsert_error(e, "Email is already registered")),
    }
}

pub async fn login<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = match ctx.store.find_user_by_email(&request.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid email or password")),
            ))
        }
        Err(e) => return Err(internal_error(e)),
    };

    if !user.verify_password(&request.password) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid email or password")),
        ));
    }

    // Opportunistic cleanup of stale sessions
    if let Ok(removed) = ctx.store.delete_expired_sessions().await {
        if removed > 0 {
            info!("Removed {} expired sessions", removed);
        }
    }

    let raw_token = generate_token();
    let session = Session::create_for_user(user.id.clone(), &raw_token);
    let expires_at = session.expires_at.to_rfc3339();

    match ctx.store.insert_session(session).await {
        Ok(()) => Ok(Json(LoginResponse {
            token: raw_token,
            expires_at,
            user: AuthUser {
                user_id: user.id,
                email: user.email,
                is_admin: user.is_admin,
            },
        })),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn logout<S: Store>(
    State(ctx): State<AppState<S>>,
    _user: AuthUser,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    // The extractor already proved the token maps to a live session
    let token = extract_bearer_token(&headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Missing bearer token")),
        )
    })?;

    match ctx.store.delete_session(&sha256_hex(&token)).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn me(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}

// ---------------------------------------------------------------------------
// Passkey credentials
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

/// Begin passkey enrollment by issuing a single-use challenge
pub async fn begin_passkey_registration<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
) -> Json<ChallengeResponse> {
    let challenge = ctx.challenges.issue(&user.user_id).await;
    Json(ChallengeResponse { challenge })
}

/// Complete enrollment: the challenge must match the one issued to
/// this user and still be inside its TTL
pub async fn complete_passkey_registration<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Json(new_credential): Json<NewPasskeyCredential>,
) -> Result<(StatusCode, Json<PasskeyCredential>), ApiError> {
    if !ctx
        .challenges
        .take(&new_credential.challenge, &user.user_id)
        .await
    {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("Unknown or expired challenge")),
        ));
    }

    let mut errors = FieldErrors::new();
    check_required(&mut errors, "credential_id", &new_credential.credential_id);
    check_required(&mut errors, "public_key", &new_credential.public_key);
    if !new_credential
        .public_key
        .chars()
        .all(|c| c.is_ascii_hexdigit())
    {
        errors.push("public_key", "must be hex encoded");
    }
    if !errors.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(errors)),
        ));
    }

    let credential = new_credential.into_credential(user.user_id.clone());
    match ctx.store.insert_passkey(credential.clone()).await {
        Ok(()) => {
            info!(
                "Registered passkey {} for user {}",
                credential.id, user.user_id
            );
            Ok((StatusCode::CREATED, Json(credential)))
        }
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn list_passkeys<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
) -> Result<Json<ListResponse<PasskeyCredential>>, ApiError> {
    match ctx.store.list_passkeys_for_user(&user.user_id).await {
        Ok(credentials) => Ok(Json(ListResponse::new(credentials))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn revoke_passkey<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    match ctx.store.delete_passkey(&user.user_id, &id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Passkey")),
        Err(e) => Err(internal_error(e)),
    }
}
