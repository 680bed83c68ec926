use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contacts::repo::Contact;
use crate::users::repo::Role;

/// List payload wrapper used by the contacts and admin endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: u16,
    pub data: Vec<T>,
}

impl<T> DataResponse<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self { status: 200, data }
    }
}

/// Response body for /profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub status: u16,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub role: Role,
}

/// Request body for /profile/update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request body for /profile/password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub password: String,
}

/// Admin view of one user with their full contact list nested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithContacts {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub contacts: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_response_uses_camel_case() {
        let res = ProfileResponse {
            status: 200,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            phone: None,
            email: "ann@x.com".into(),
            role: Role::Standard,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert_eq!(json["role"], "standard");
        assert_eq!(json["status"], 200);
    }

    #[test]
    fn change_password_request_field_names() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"currentPassword":"oldpass99","password":"newpass99"}"#,
        )
        .unwrap();
        assert_eq!(req.current_password, "oldpass99");
        assert_eq!(req.password, "newpass99");
    }
}
