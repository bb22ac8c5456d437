//! User repository. Users are the acting identities recorded on every write.

use inv_core::entities::User;
use inv_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now_utc, parse_datetime, require_text};
use crate::service::InventoryService;

const SELECT_COLS: &str = "id, display_name, email, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        display_name: row.get::<String>(1)?,
        email: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl InventoryService {
    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank display name, or a
    /// libSQL error if the email is already taken.
    pub async fn create_user(
        &self,
        display_name: &str,
        email: Option<&str>,
    ) -> Result<User, DatabaseError> {
        require_text("display_name", display_name)?;
        let _guard = self.lock_writes().await;
        let now = now_utc();
        let id = self.db().generate_id(PREFIX_USER).await?;
        let display_name = display_name.trim();

        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, display_name, email, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), display_name, email, format_datetime(now)],
            )
            .await?;
        tracing::debug!(user_id = %id, "user created");

        Ok(User {
            id,
            display_name: display_name.to_string(),
            email: email.map(String::from),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY display_name LIMIT {limit}"),
                (),
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }
}
