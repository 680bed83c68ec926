use std::collections::HashMap;

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::MessageResponse,
        extractors::{AdminUser, AuthUser},
        password::{hash_password, verify_password},
    },
    contacts::repo::Contact,
    error::ApiResult,
    state::AppState,
    users::{
        dto::{
            ChangePasswordRequest, DataResponse, ProfileResponse, UpdateProfileRequest,
            UserWithContacts,
        },
        repo::{User, UserSummary},
    },
    validate::Validator,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", post(profile))
        .route("/profile/update", post(profile_update))
        .route("/profile/password", post(change_password))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/all", post(get_users))
        .route("/users/contacts/all", post(get_user_contacts))
}

#[instrument(skip_all)]
pub async fn profile(AuthUser(user): AuthUser) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse {
        status: 200,
        first_name: user.first_name,
        last_name: user.last_name,
        phone: user.phone,
        email: user.email,
        role: user.role,
    }))
}

#[instrument(skip_all)]
pub async fn profile_update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let mut v = Validator::new();
    if v.required("firstName", &payload.first_name) {
        v.length("firstName", &payload.first_name, 2, 50);
    }
    if v.required("lastName", &payload.last_name) {
        v.length("lastName", &payload.last_name, 2, 50);
    }
    if let Some(phone) = payload.phone.as_deref() {
        v.phone("phone", phone);
    }
    v.finish()?;

    User::update_profile(
        &state.db,
        user.id,
        &payload.first_name,
        &payload.last_name,
        payload.phone.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(MessageResponse::ok("User Profile Updated Successfully!")))
}

#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let mut v = Validator::new();
    if v.required("currentPassword", &payload.current_password)
        && !verify_password(&payload.current_password, &user.password_hash)?
    {
        warn!(user_id = %user.id, "current password mismatch");
        v.add("currentPassword", "The current password does not match.");
    }
    if v.required("password", &payload.password) {
        v.length("password", &payload.password, 8, 50);
    }
    v.finish()?;

    let hash = hash_password(&payload.password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password changed");
    Ok(Json(MessageResponse::ok("Password Changed Successfully!")))
}

#[instrument(skip_all)]
pub async fn get_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<DataResponse<UserSummary>>> {
    let rows = User::list_with_contact_counts(&state.db).await?;
    Ok(Json(DataResponse::ok(rows)))
}

#[instrument(skip_all)]
pub async fn get_user_contacts(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<DataResponse<UserWithContacts>>> {
    let users = User::list_all(&state.db).await?;
    let contacts = Contact::list_all(&state.db).await?;

    let mut by_owner: HashMap<Uuid, Vec<Contact>> = HashMap::new();
    for contact in contacts {
        by_owner.entry(contact.user_id).or_default().push(contact);
    }

    let data = users
        .into_iter()
        .map(|u| UserWithContacts {
            contacts: by_owner.remove(&u.id).unwrap_or_default(),
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            phone: u.phone,
            role: u.role,
        })
        .collect();

    Ok(Json(DataResponse::ok(data)))
}
