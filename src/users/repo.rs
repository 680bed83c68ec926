use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User role. Stored as a SMALLINT, serialized by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum Role {
    Standard = 0,
    Admin = 1,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, password_hash, role, api_token, created_at";

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Create a user. The first row ever inserted gets the Admin role;
    /// the emptiness check runs inside the insert transaction so two
    /// concurrent first registrations cannot both see an empty table.
    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: &str,
        api_token: &str,
    ) -> anyhow::Result<User> {
        let mut tx = db.begin().await?;
        let have_users: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users)")
            .fetch_one(&mut *tx)
            .await?;
        let role = if have_users {
            Role::Standard
        } else {
            Role::Admin
        };
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password_hash, role, api_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(role)
        .bind(api_token)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Resolve a bearer token to its user.
    pub async fn find_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE api_token = $1"
        ))
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Overwrite the stored token, invalidating the previous one.
    /// Last write wins under concurrent logins.
    pub async fn rotate_token(db: &PgPool, id: Uuid, token: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET api_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET first_name = $2, last_name = $3, phone = $4 WHERE id = $1")
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .bind(phone)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Per-user contact counts for the admin overview.
    pub async fn list_with_contact_counts(db: &PgPool) -> anyhow::Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.first_name, u.last_name, u.email, u.phone, u.role,
                   COUNT(c.id) AS contacts_count
            FROM users u
            LEFT JOIN contacts c ON c.user_id = u.id
            GROUP BY u.id
            ORDER BY u.created_at
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

/// Row of the admin /users/all listing.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub contacts_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Standard).unwrap(),
            "\"standard\""
        );
    }

    #[test]
    fn role_integer_mapping_is_stable() {
        assert_eq!(Role::Standard as i16, 0);
        assert_eq!(Role::Admin as i16, 1);
    }

    #[test]
    fn password_hash_and_token_never_serialize() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@x.com".into(),
            phone: Some("555-123-4567".into()),
            password_hash: "argon2-hash".into(),
            role: Role::Admin,
            api_token: Some("secret-token".into()),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2-hash"));
        assert!(!json.contains("secret-token"));
        assert!(json.contains("ann@x.com"));
    }

    #[test]
    fn summary_uses_camel_case_fields() {
        let row = UserSummary {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@x.com".into(),
            phone: None,
            role: Role::Standard,
            contacts_count: 3,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"firstName\":\"Ann\""));
        assert!(json.contains("\"contactsCount\":3"));
    }
}
