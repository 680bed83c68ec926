use serde::Deserialize;

/// Request body for adding a contact.
#[derive(Debug, Deserialize)]
pub struct AddContactRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub note: Option<String>,
}
