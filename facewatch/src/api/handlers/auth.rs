use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;

use crate::{
    api::models::{
        MessageResponse,
        auth::{LoginRequest, RegisterRequest, TokenResponse},
        packages::PackageResponse,
        users::{CurrentUser, UserResponse},
    },
    auth::{current_user::bearer_token, password, session},
    db::{
        handlers::{Packages, Sessions, Users},
        models::{sessions::SessionCreateDBRequest, users::UserCreateDBRequest},
    },
    errors::Error,
    AppState,
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "auth",
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Invalid input or email already registered"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<UserResponse>), Error> {
    request.validate(&state.config.auth.password)?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // Check if user with this email already exists
    let mut user_repo = Users::new(&mut tx);
    if user_repo.get_user_by_email(&request.email).await?.is_some() {
        return Err(Error::BadRequest {
            message: "An account with this email address already exists".to_string(),
        });
    }

    // Resolve the requested package, falling back to the Standard tier. An
    // unknown name is not an error: the account is simply created without a
    // package (unlimited entitlements).
    let selected = request.selected_package.as_deref().unwrap_or("Standard");
    let mut package_repo = Packages::new(&mut tx);
    let package = match package_repo.find_by_name(selected).await? {
        Some(package) => Some(package),
        None => package_repo.find_by_name("Standard").await?,
    };

    // Hash the password on a blocking thread to avoid blocking the async runtime
    let password = request.password.clone();
    let params = password::Argon2Params::from(&state.config.auth.password);
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let create_request = UserCreateDBRequest {
        email: request.email,
        full_name: request.full_name,
        phone_number: request.phone_number,
        password_hash,
        package_id: package.as_ref().map(|p| p.id),
    };

    let mut user_repo = Users::new(&mut tx);
    let created_user = user_repo.create(&create_request).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let response = UserResponse::from(created_user).with_package(package.map(PackageResponse::from));
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<TokenResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // Find user by email. The failure message never distinguishes an unknown
    // account from a wrong password.
    let mut user_repo = Users::new(&mut conn);
    let user = user_repo
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        })?;

    // Verify password on a blocking thread to avoid blocking the async runtime
    let password = request.password.clone();
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        });
    }

    let token = session::create_session_token(user.id, &user.email, &state.config)?;

    // Record the token in the session ledger; verification requires this row
    let mut session_repo = Sessions::new(&mut conn);
    let purged = session_repo.purge_expired().await?;
    if purged > 0 {
        tracing::debug!("Purged {} expired session ledger rows", purged);
    }

    let expires_at = Utc::now() + state.config.auth.session.timeout;
    session_repo
        .create(&SessionCreateDBRequest {
            user_id: user.id,
            session_token: token.clone(),
            expires_at,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Logout: revoke the presented token in the session ledger
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, current_user: CurrentUser, headers: HeaderMap) -> Result<Json<MessageResponse>, Error> {
    // The extractor already verified this token; revoke its ledger row
    let token = bearer_token(&headers).ok_or(Error::Unauthenticated { message: None })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut session_repo = Sessions::new(&mut conn);
    session_repo.revoke(token).await?;

    tracing::debug!("Revoked session for user {}", current_user.id);
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let mut user_repo = Users::new(&mut conn);
    let user = user_repo.get_by_id(current_user.id).await?.ok_or(Error::Unauthenticated { message: None })?;

    let package = match user.package_id {
        Some(package_id) => {
            let mut package_repo = Packages::new(&mut conn);
            package_repo.get_by_id(package_id).await?.map(PackageResponse::from)
        }
        None => None,
    };

    Ok(Json(UserResponse::from(user).with_package(package)))
}
