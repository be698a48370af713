//! Repository for the `projects` table.

use knotbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::Project;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, published, created_at, updated_at";

/// Read access to projects. Rows are owned by the site editor; the
/// submission pipelines only ever look projects up.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
