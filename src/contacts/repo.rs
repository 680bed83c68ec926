use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Contact record. Owned by exactly one user, fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub note: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Contact {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        phone: &str,
        note: Option<&str>,
    ) -> anyhow::Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (user_id, name, phone, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, phone, note, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(phone)
        .bind(note)
        .fetch_one(db)
        .await?;
        Ok(contact)
    }

    /// List the contacts owned by one user.
    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Contact>> {
        let rows = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, phone, note, created_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Every contact in the store, for the admin aggregate view.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Contact>> {
        let rows = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, phone, note, created_at
            FROM contacts
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_serializes_camel_case() {
        let contact = Contact {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Bob Stone".into(),
            phone: "555-123-4567".into(),
            note: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&contact).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"note\":null"));
    }
}
