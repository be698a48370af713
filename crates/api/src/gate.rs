//! Permission gate shared by both submission pipelines.
//!
//! A submission is only accepted when the project exists, is published,
//! the feature's settings row exists with the feature enabled, and the
//! deadline (when configured) has not passed. The gate fails CLOSED: if
//! any of its own queries error, the submission is denied with a generic
//! message rather than let through.

use chrono::Utc;
use knotbook_core::error::CoreError;
use knotbook_core::types::DbId;
use knotbook_db::models::project::Project;
use knotbook_db::models::rsvp::RsvpSettings;
use knotbook_db::models::wish::WishSettings;
use knotbook_db::repositories::{ProjectRepo, RsvpRepo, WishRepo};
use knotbook_db::DbPool;

use crate::error::AppError;

/// Check that RSVPs are open, returning the project's RSVP settings so
/// downstream stages reuse the fetched configuration.
pub async fn check_rsvp_open(pool: &DbPool, project_id: DbId) -> Result<RsvpSettings, AppError> {
    let project = find_published_project(pool, project_id).await?;

    let settings = RsvpRepo::find_settings(pool, project.id)
        .await
        .map_err(|e| fail_closed(e, project_id))?;
    let Some(settings) = settings else {
        return Err(closed("RSVPs are not open for this wedding"));
    };
    if !settings.enabled {
        return Err(closed("RSVPs are not open for this wedding"));
    }
    if let Some(deadline) = settings.deadline {
        if Utc::now() > deadline {
            return Err(closed("The RSVP deadline has passed"));
        }
    }
    Ok(settings)
}

/// Check that guest wishes are open, returning the project's wish settings.
pub async fn check_wishes_open(pool: &DbPool, project_id: DbId) -> Result<WishSettings, AppError> {
    let project = find_published_project(pool, project_id).await?;

    let settings = WishRepo::find_settings(pool, project.id)
        .await
        .map_err(|e| fail_closed(e, project_id))?;
    let Some(settings) = settings else {
        return Err(closed("Guest wishes are not open for this wedding"));
    };
    if !settings.enabled {
        return Err(closed("Guest wishes are not open for this wedding"));
    }
    if let Some(deadline) = settings.deadline {
        if Utc::now() > deadline {
            return Err(closed("Guest wishes are closed for this wedding"));
        }
    }
    Ok(settings)
}

async fn find_published_project(pool: &DbPool, project_id: DbId) -> Result<Project, AppError> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await
        .map_err(|e| fail_closed(e, project_id))?;
    let Some(project) = project else {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    };
    if !project.published {
        return Err(closed("This wedding site is not published"));
    }
    Ok(project)
}

fn closed(message: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(message.to_string()))
}

fn fail_closed(err: sqlx::Error, project_id: DbId) -> AppError {
    tracing::error!(error = %err, project_id, "Permission gate query failed; denying submission");
    AppError::Core(CoreError::Forbidden(
        "Unable to verify that submissions are open. Please try again later.".to_string(),
    ))
}
