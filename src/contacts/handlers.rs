use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    contacts::{dto::AddContactRequest, repo::Contact},
    error::ApiResult,
    state::AppState,
    users::dto::DataResponse,
    validate::Validator,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", post(my_contacts))
        .route("/contacts/add", post(add_contact))
}

#[instrument(skip_all)]
pub async fn my_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<DataResponse<Contact>>> {
    let contacts = Contact::list_by_owner(&state.db, user.id).await?;
    Ok(Json(DataResponse::ok(contacts)))
}

#[instrument(skip_all)]
pub async fn add_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AddContactRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let mut v = Validator::new();
    if v.required("name", &payload.name) {
        v.length("name", &payload.name, 3, 100);
    }
    if v.required("phone", &payload.phone) {
        v.phone("phone", &payload.phone);
    }
    if let Some(note) = payload.note.as_deref() {
        v.max_length("note", note, 255);
    }
    v.finish()?;

    // Ownership is fixed to the caller; clients cannot file contacts
    // under another user.
    let contact = Contact::create(
        &state.db,
        user.id,
        &payload.name,
        &payload.phone,
        payload.note.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, contact_id = %contact.id, "contact added");
    Ok(Json(MessageResponse::ok("Contact Added Successfully!")))
}
