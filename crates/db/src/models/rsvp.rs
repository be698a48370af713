//! RSVP settings and response models.

use knotbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Per-project RSVP configuration, written by the editor.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSettings {
    #[serde(skip_serializing)]
    pub project_id: DbId,
    pub enabled: bool,
    pub deadline: Option<Timestamp>,
    pub ask_dietary: bool,
    pub ask_dance_song: bool,
    pub ask_advice: bool,
    pub ask_memory: bool,
    pub confirmation_message: Option<String>,
}

/// An accepted RSVP row from `rsvp_responses`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpResponse {
    pub id: DbId,
    pub project_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub attendance_status: String,
    pub guest_count: i32,
    pub dietary_restrictions: Option<String>,
    pub dance_song: Option<String>,
    pub advice: Option<String>,
    pub favorite_memory: Option<String>,
    #[serde(skip_serializing)]
    pub client_addr: String,
    pub submitted_at: Timestamp,
}

/// Insert DTO for a validated, normalized RSVP submission.
#[derive(Debug, Clone)]
pub struct NewRsvpResponse {
    pub project_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub attendance_status: String,
    pub guest_count: i32,
    pub dietary_restrictions: Option<String>,
    pub dance_song: Option<String>,
    pub advice: Option<String>,
    pub favorite_memory: Option<String>,
    pub client_addr: String,
}
