//! Project CRUD and review-status transitions against the record store.
//!
//! Unlike [`CommentStore`](crate::comments::CommentStore), this store
//! keeps no local collection: the dashboard re-fetches the list it
//! renders, so every method is a plain request/response pair.

use std::sync::Arc;

use serde_json::json;

use reelnote_core::project::{validate_new_project, NewProject, Project, ProjectStatus};
use reelnote_core::types::RecordId;
use reelnote_core::CoreError;

use crate::error::StoreResult;
use crate::models::{project_from_value, NewProjectRow};
use crate::record::{Filter, OrderBy, RecordStore};

/// Record store table holding projects.
pub const PROJECTS_TABLE: &str = "projects";

/// Stateless project store.
pub struct ProjectStore {
    records: Arc<dyn RecordStore>,
}

impl ProjectStore {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// All projects owned by an editor, newest first.
    pub async fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<Project>> {
        let rows = self
            .records
            .select(
                PROJECTS_TABLE,
                &[Filter::eq("user_id", user_id)],
                Some(&OrderBy::desc("created_at")),
            )
            .await?;
        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            projects.push(project_from_value(row)?);
        }
        Ok(projects)
    }

    /// Fetch a single project by id.
    pub async fn fetch(&self, id: RecordId) -> StoreResult<Project> {
        let rows = self
            .records
            .select(PROJECTS_TABLE, &[Filter::eq("id", id)], None)
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("project", id))?;
        project_from_value(row)
    }

    /// Create a project. New projects always start `pending`.
    pub async fn create(&self, draft: &NewProject) -> StoreResult<Project> {
        validate_new_project(draft)?;
        let row = NewProjectRow::from_draft(draft);
        let stored = self
            .records
            .insert(PROJECTS_TABLE, serde_json::to_value(row)?)
            .await?;
        project_from_value(stored)
    }

    /// Update a project's title and/or status from the edit form.
    pub async fn update(
        &self,
        id: RecordId,
        title: Option<&str>,
        status: Option<ProjectStatus>,
    ) -> StoreResult<Project> {
        let mut body = serde_json::Map::new();
        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Project title must not be empty".to_string(),
                )
                .into());
            }
            body.insert("title".into(), json!(title.trim()));
        }
        if let Some(status) = status {
            body.insert("status".into(), json!(status.as_str()));
        }
        if body.is_empty() {
            return self.fetch(id).await;
        }
        let stored = self
            .records
            .update(PROJECTS_TABLE, id, serde_json::Value::Object(body))
            .await?;
        project_from_value(stored)
    }

    /// Set a project's review status.
    pub async fn set_status(&self, id: RecordId, status: ProjectStatus) -> StoreResult<Project> {
        self.update(id, None, Some(status)).await
    }

    /// The editor shared the review link: project moves to `InReview`.
    pub async fn mark_shared(&self, id: RecordId) -> StoreResult<Project> {
        self.set_status(id, ProjectStatus::Pending.on_shared()).await
    }

    /// A client submitted their feedback batch: project moves to
    /// `CommentNotification` so the dashboard lights up.
    pub async fn send_feedback(&self, id: RecordId) -> StoreResult<Project> {
        self.set_status(id, ProjectStatus::InReview.on_feedback_sent())
            .await
    }

    /// The editor opened a project with fresh feedback.
    ///
    /// Consumes a `CommentNotification` status back to `InReview`;
    /// returns `None` (and issues no request) for any other status.
    pub async fn acknowledge_comments(&self, project: &Project) -> StoreResult<Option<Project>> {
        let next = project.status.acknowledge();
        if next == project.status {
            return Ok(None);
        }
        let updated = self.set_status(project.id, next).await?;
        tracing::debug!(project_id = %project.id, "comment notification acknowledged");
        Ok(Some(updated))
    }

    /// Delete a project. Callers must have confirmed with the user.
    pub async fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.records.delete(PROJECTS_TABLE, id).await
    }
}
