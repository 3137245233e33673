use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::users::repo::User;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("user {0} does not exist")]
    UnknownUser(Uuid),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A single dated journal record owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl Entry {
    /// The owner must exist; the schema backs this with a foreign key, the
    /// explicit check turns the constraint violation into a typed error.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        date: Date,
        content: &str,
    ) -> Result<Entry, EntryError> {
        if !User::exists(db, user_id).await? {
            return Err(EntryError::UnknownUser(user_id));
        }

        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (user_id, date, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, date, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(entry)
    }

    /// Newest first; creation time breaks same-day ties.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Entry>> {
        let rows = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, user_id, date, content, created_at
            FROM entries
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// `None` when no entry matched; callers treat that as a quiet miss.
    pub async fn update_content(
        db: &PgPool,
        id: Uuid,
        content: &str,
    ) -> anyhow::Result<Option<Entry>> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            UPDATE entries
            SET content = $2
            WHERE id = $1
            RETURNING id, user_id, date, content, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(db)
        .await?;
        Ok(entry)
    }

    /// Idempotent: deleting an id that matches nothing still succeeds.
    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn entry_serializes_all_public_fields() {
        let entry = Entry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date!(2024 - 06 - 15),
            content: "went hiking".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["content"], "went hiking");
        assert_eq!(json["date"], "2024-06-15");
        assert_eq!(json["user_id"], entry.user_id.to_string());
    }

    #[test]
    fn unknown_user_error_names_the_id() {
        let id = Uuid::new_v4();
        let err = EntryError::UnknownUser(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
