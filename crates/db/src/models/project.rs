//! Project entity model.

use knotbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table. One project is one wedding
/// website; rows are created by the site editor, read-only here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
