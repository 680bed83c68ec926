use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest},
        extractors::AuthUser,
        password::{hash_password, verify_password},
        token::generate_token,
    },
    error::{ApiError, ApiResult},
    state::AppState,
    users::repo::User,
    validate::Validator,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    payload.email = payload.email.trim().to_lowercase();

    let mut v = Validator::new();
    if v.required("firstName", &payload.first_name) {
        v.length("firstName", &payload.first_name, 2, 50);
    }
    if v.required("lastName", &payload.last_name) {
        v.length("lastName", &payload.last_name, 2, 50);
    }
    let email_present = v.required("email", &payload.email);
    if email_present {
        v.email("email", &payload.email);
    }
    if let Some(phone) = payload.phone.as_deref() {
        v.phone("phone", phone);
    }
    if v.required("password", &payload.password) {
        v.min_length("password", &payload.password, 8);
    }
    // Uniqueness joins the same field -> messages map as the shape rules.
    if email_present && User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        v.add("email", "The email has already been taken.");
    }
    v.finish()?;

    let hash = hash_password(&payload.password)?;
    let token = generate_token();
    let user = User::create(
        &state.db,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        payload.phone.as_deref(),
        &hash,
        &token,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, role = ?user.role, "user registered");
    Ok(Json(AuthResponse {
        status: 200,
        username: user.full_name(),
        role: user.role,
        token,
        message: "User Registered Successfully!".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    payload.email = payload.email.trim().to_lowercase();

    let mut v = Validator::new();
    if v.required("email", &payload.email) {
        v.email("email", &payload.email);
    }
    if v.required("password", &payload.password) {
        v.min_length("password", &payload.password, 8);
    }
    v.finish()?;

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    // Rotation: the previously issued token stops resolving here.
    let token = generate_token();
    User::rotate_token(&state.db, user.id, &token).await?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        status: 200,
        username: user.full_name(),
        role: user.role,
        token,
        message: format!("Welcome {}", user.full_name()),
    }))
}

/// Logout rotates to a fresh token the client never sees, so the
/// presented token is single-use: a second logout with it fails token
/// resolution.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    User::rotate_token(&state.db, user.id, &generate_token()).await?;
    info!(user_id = %user.id, "user logged out");
    Ok(Json(MessageResponse::ok("Logged Out")))
}
