//! Guest submission payload validation.
//!
//! Pure logic over untyped JSON payloads — no database access. Every check
//! runs even after an earlier one fails, so the guest gets the complete
//! list of problems in a single response. On success the payload comes
//! back parsed and normalized: strings trimmed, email lower-cased, empty
//! optionals collapsed to `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-field length and range limits.
///
/// Kept in one place so the caller wires a single structure into the
/// validator instead of scattering inline constants.
#[derive(Debug, Clone)]
pub struct FieldLimits {
    pub guest_name_max: usize,
    pub email_max: usize,
    pub phone_max: usize,
    pub dietary_max: usize,
    pub dance_song_max: usize,
    pub advice_max: usize,
    pub memory_max: usize,
    pub guest_count_min: i64,
    pub guest_count_max: i64,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            guest_name_max: 100,
            email_max: 255,
            phone_max: 20,
            dietary_max: 500,
            dance_song_max: 200,
            advice_max: 1000,
            memory_max: 1000,
            guest_count_min: 1,
            guest_count_max: 10,
        }
    }
}

/// Whether the guest is coming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Attending,
    NotAttending,
    Maybe,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Attending => "attending",
            AttendanceStatus::NotAttending => "not_attending",
            AttendanceStatus::Maybe => "maybe",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "attending" => Some(AttendanceStatus::Attending),
            "not_attending" => Some(AttendanceStatus::NotAttending),
            "maybe" => Some(AttendanceStatus::Maybe),
            _ => None,
        }
    }
}

/// A parsed, normalized RSVP submission.
#[derive(Debug, Clone)]
pub struct RsvpSubmission {
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub attendance_status: AttendanceStatus,
    pub guest_count: i32,
    pub dietary_restrictions: Option<String>,
    pub dance_song: Option<String>,
    pub advice: Option<String>,
    pub favorite_memory: Option<String>,
}

/// A parsed, normalized guest wish.
///
/// Only structural checks are applied here; the per-project message length
/// cap and the require-email flag are enforced by
/// [`check_wish_settings`] once the project's configuration is known.
#[derive(Debug, Clone)]
pub struct WishSubmission {
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub message: String,
}

/// Validate and normalize an RSVP payload.
///
/// Returns the parsed submission, or every field error found.
pub fn validate_rsvp(payload: &Value, limits: &FieldLimits) -> Result<RsvpSubmission, Vec<String>> {
    let Some(obj) = payload.as_object() else {
        return Err(vec!["Request body must be a JSON object".to_string()]);
    };
    let mut errors = Vec::new();

    let guest_name = required_text(obj, "guestName", "Guest name", limits.guest_name_max, &mut errors);
    let guest_email = optional_email(obj, "guestEmail", limits.email_max, &mut errors);
    let guest_phone = optional_text(obj, "guestPhone", "Phone", limits.phone_max, &mut errors);
    let dietary = optional_text(obj, "dietaryRestrictions", "Dietary restrictions", limits.dietary_max, &mut errors);
    let dance_song = optional_text(obj, "danceSong", "Dance song", limits.dance_song_max, &mut errors);
    let advice = optional_text(obj, "advice", "Advice", limits.advice_max, &mut errors);
    let memory = optional_text(obj, "favoriteMemory", "Favorite memory", limits.memory_max, &mut errors);

    let attendance_status = match obj.get("attendanceStatus") {
        None | Some(Value::Null) => {
            errors.push("Attendance status is required".to_string());
            None
        }
        Some(Value::String(s)) => match AttendanceStatus::parse(s.trim()) {
            Some(status) => Some(status),
            None => {
                errors.push(
                    "Attendance status must be one of: attending, not_attending, maybe".to_string(),
                );
                None
            }
        },
        Some(_) => {
            errors.push("Attendance status must be a string".to_string());
            None
        }
    };

    let guest_count = match obj.get("guestCount") {
        None | Some(Value::Null) => {
            errors.push("Guest count is required".to_string());
            None
        }
        Some(v) => match v.as_i64() {
            Some(n) if (limits.guest_count_min..=limits.guest_count_max).contains(&n) => {
                Some(n as i32)
            }
            Some(_) => {
                errors.push(format!(
                    "Guest count must be between {} and {}",
                    limits.guest_count_min, limits.guest_count_max
                ));
                None
            }
            None => {
                errors.push("Guest count must be a whole number".to_string());
                None
            }
        },
    };

    match (guest_name, attendance_status, guest_count) {
        (Some(guest_name), Some(attendance_status), Some(guest_count)) if errors.is_empty() => {
            Ok(RsvpSubmission {
                guest_name,
                guest_email,
                guest_phone,
                attendance_status,
                guest_count,
                dietary_restrictions: dietary,
                dance_song,
                advice,
                favorite_memory: memory,
            })
        }
        _ => Err(errors),
    }
}

/// Validate and normalize a wish payload (structural checks only).
pub fn validate_wish(payload: &Value, limits: &FieldLimits) -> Result<WishSubmission, Vec<String>> {
    let Some(obj) = payload.as_object() else {
        return Err(vec!["Request body must be a JSON object".to_string()]);
    };
    let mut errors = Vec::new();

    let guest_name = required_text(obj, "guestName", "Guest name", limits.guest_name_max, &mut errors);
    let guest_email = optional_email(obj, "guestEmail", limits.email_max, &mut errors);
    let message = match obj.get("message") {
        None | Some(Value::Null) => {
            errors.push("Message is required".to_string());
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push("Message is required".to_string());
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push("Message must be a string".to_string());
            None
        }
    };

    match (guest_name, message) {
        (Some(guest_name), Some(message)) if errors.is_empty() => Ok(WishSubmission {
            guest_name,
            guest_email,
            message,
        }),
        _ => Err(errors),
    }
}

/// Enforce the per-project wish configuration on an already-parsed wish.
///
/// Returns the (possibly empty) list of violations.
pub fn check_wish_settings(
    wish: &WishSubmission,
    max_message_length: usize,
    require_email: bool,
) -> Vec<String> {
    let mut errors = Vec::new();
    if wish.message.chars().count() > max_message_length {
        errors.push(format!(
            "Message must be at most {max_message_length} characters"
        ));
    }
    if require_email && wish.guest_email.is_none() {
        errors.push("Email is required for this project".to_string());
    }
    errors
}

/// Minimal email shape check: no spaces, a non-empty local part, exactly
/// one `@`, and a dot inside the domain with content on both sides.
pub fn is_valid_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(i) => i > 0 && i + 1 < domain.len(),
        None => false,
    }
}

fn required_text(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    label: &str,
    max: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("{label} is required"));
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(format!("{label} is required"));
                None
            } else if trimmed.chars().count() > max {
                errors.push(format!("{label} must be at most {max} characters"));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push(format!("{label} must be a string"));
            None
        }
    }
}

fn optional_text(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    label: &str,
    max: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.chars().count() > max {
                errors.push(format!("{label} must be at most {max} characters"));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push(format!("{label} must be a string"));
            None
        }
    }
}

fn optional_email(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    max: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    let raw = optional_text(obj, key, "Email", max, errors)?;
    let normalized = raw.to_lowercase();
    if is_valid_email(&normalized) {
        Some(normalized)
    } else {
        errors.push("Email address is not valid".to_string());
        None
    }
}
