//! Repository for wish settings and guest wishes.

use knotbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::wish::{GuestWish, NewGuestWish, WishSettings, WISH_STATUS_APPROVED};

const SETTINGS_COLUMNS: &str =
    "project_id, enabled, deadline, max_message_length, require_email";

const WISH_COLUMNS: &str = "id, project_id, guest_name, guest_email, message, status, \
     spam_score, client_addr, submitted_at";

/// Reads wish configuration, appends wishes, lists the public board.
pub struct WishRepo;

impl WishRepo {
    /// Fetch a project's wish settings row, if the editor created one.
    pub async fn find_settings(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<WishSettings>, sqlx::Error> {
        let query = format!("SELECT {SETTINGS_COLUMNS} FROM wish_settings WHERE project_id = $1");
        sqlx::query_as::<_, WishSettings>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a scored wish, returning the stored row.
    pub async fn insert(pool: &PgPool, input: &NewGuestWish) -> Result<GuestWish, sqlx::Error> {
        let query = format!(
            "INSERT INTO guest_wishes (project_id, guest_name, guest_email, message, status, \
                 spam_score, client_addr) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {WISH_COLUMNS}"
        );
        sqlx::query_as::<_, GuestWish>(&query)
            .bind(input.project_id)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(&input.message)
            .bind(&input.status)
            .bind(input.spam_score)
            .bind(&input.client_addr)
            .fetch_one(pool)
            .await
    }

    /// List a project's approved wishes, newest first (the public board).
    pub async fn list_approved(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<GuestWish>, sqlx::Error> {
        let query = format!(
            "SELECT {WISH_COLUMNS} FROM guest_wishes \
             WHERE project_id = $1 AND status = $2 \
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, GuestWish>(&query)
            .bind(project_id)
            .bind(WISH_STATUS_APPROVED)
            .fetch_all(pool)
            .await
    }
}
