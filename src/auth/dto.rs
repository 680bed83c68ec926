use serde::{Deserialize, Serialize};

use crate::users::repo::Role;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: u16,
    pub username: String,
    pub role: Role,
    pub token: String,
    pub message: String,
}

/// Plain acknowledgement body, shared by logout and the mutation
/// endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_shape() {
        let res = AuthResponse {
            status: 200,
            username: "Ann Lee".into(),
            role: Role::Admin,
            token: "t".repeat(60),
            message: "User Registered Successfully!".into(),
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["username"], "Ann Lee");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["token"].as_str().unwrap().len(), 60);
    }

    #[test]
    fn register_request_accepts_camel_case_and_missing_phone() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Ann","lastName":"Lee","email":"ann@x.com","password":"longpass1"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Ann");
        assert!(req.phone.is_none());
    }
}
