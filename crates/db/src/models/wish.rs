//! Guest wish settings and wish models.

use knotbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Moderation status values for `guest_wishes.status`.
pub const WISH_STATUS_PENDING: &str = "pending";
pub const WISH_STATUS_APPROVED: &str = "approved";
pub const WISH_STATUS_REJECTED: &str = "rejected";

/// Per-project wishes configuration, written by the editor.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishSettings {
    #[serde(skip_serializing)]
    pub project_id: DbId,
    pub enabled: bool,
    pub deadline: Option<Timestamp>,
    pub max_message_length: i32,
    pub require_email: bool,
}

/// A stored wish from `guest_wishes`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestWish {
    pub id: DbId,
    pub project_id: DbId,
    pub guest_name: String,
    pub message: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub guest_email: Option<String>,
    #[serde(skip_serializing)]
    pub spam_score: i32,
    #[serde(skip_serializing)]
    pub client_addr: String,
    pub submitted_at: Timestamp,
}

/// Insert DTO for a validated, scored wish.
#[derive(Debug, Clone)]
pub struct NewGuestWish {
    pub project_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub message: String,
    pub status: String,
    pub spam_score: i32,
    pub client_addr: String,
}
