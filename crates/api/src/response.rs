//! Success response envelopes for the guest-facing endpoints.
//!
//! Submission responses use a `{"success": true, ...}` envelope with
//! camelCase keys, matching what the published site's frontend consumes.

use knotbook_core::types::{DbId, Timestamp};
use knotbook_db::models::wish::GuestWish;
use serde::Serialize;

/// Envelope for an accepted RSVP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpAccepted {
    pub success: bool,
    pub message: String,
    pub data: RsvpReceipt,
}

/// The fields echoed back to the guest after a stored RSVP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpReceipt {
    pub id: DbId,
    pub guest_name: String,
    pub attendance_status: String,
    pub submitted_at: Timestamp,
}

/// Envelope for an accepted wish.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishAccepted {
    pub success: bool,
    /// Moderation status the wish landed in (`approved` or `pending`).
    pub status: String,
    pub message: String,
    pub wish: GuestWish,
    pub spam_score: i32,
    /// Submissions left in the client's current window.
    pub remaining: u32,
}

/// Envelope for the maintenance cleanup endpoint.
#[derive(Debug, Serialize)]
pub struct CleanupSummary {
    pub success: bool,
    pub deleted: u64,
}
