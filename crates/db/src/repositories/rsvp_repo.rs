//! Repository for RSVP settings and responses.

use knotbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::rsvp::{NewRsvpResponse, RsvpResponse, RsvpSettings};

const SETTINGS_COLUMNS: &str = "project_id, enabled, deadline, ask_dietary, ask_dance_song, \
     ask_advice, ask_memory, confirmation_message";

const RESPONSE_COLUMNS: &str = "id, project_id, guest_name, guest_email, guest_phone, \
     attendance_status, guest_count, dietary_restrictions, dance_song, advice, \
     favorite_memory, client_addr, submitted_at";

/// Reads RSVP configuration and appends accepted responses.
pub struct RsvpRepo;

impl RsvpRepo {
    /// Fetch a project's RSVP settings row, if the editor created one.
    pub async fn find_settings(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<RsvpSettings>, sqlx::Error> {
        let query = format!("SELECT {SETTINGS_COLUMNS} FROM rsvp_settings WHERE project_id = $1");
        sqlx::query_as::<_, RsvpSettings>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an accepted RSVP, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        input: &NewRsvpResponse,
    ) -> Result<RsvpResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO rsvp_responses (project_id, guest_name, guest_email, guest_phone, \
                 attendance_status, guest_count, dietary_restrictions, dance_song, advice, \
                 favorite_memory, client_addr) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {RESPONSE_COLUMNS}"
        );
        sqlx::query_as::<_, RsvpResponse>(&query)
            .bind(input.project_id)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(&input.guest_phone)
            .bind(&input.attendance_status)
            .bind(input.guest_count)
            .bind(&input.dietary_restrictions)
            .bind(&input.dance_song)
            .bind(&input.advice)
            .bind(&input.favorite_memory)
            .bind(&input.client_addr)
            .fetch_one(pool)
            .await
    }

    /// Whether a response with this (lower-cased) email already exists for
    /// the project.
    pub async fn exists_by_email(
        pool: &PgPool,
        project_id: DbId,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM rsvp_responses \
                 WHERE project_id = $1 AND guest_email = $2 \
             )",
        )
        .bind(project_id)
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Whether a response with this exact guest name already exists for
    /// the project.
    pub async fn exists_by_name(
        pool: &PgPool,
        project_id: DbId,
        guest_name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM rsvp_responses \
                 WHERE project_id = $1 AND guest_name = $2 \
             )",
        )
        .bind(project_id)
        .bind(guest_name)
        .fetch_one(pool)
        .await
    }
}
