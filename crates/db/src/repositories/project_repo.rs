//! Repository for the `projects` collection.

use vitrine_core::collection::COLLECTION_PROJECTS;
use vitrine_core::project::{Project, ProjectFields};
use vitrine_core::schema::{project_from_document, project_to_document};
use vitrine_core::types::RecordId;

use super::{load_failed, Visibility};
use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

fn to_project(doc: &StoredDocument) -> Option<Project> {
    match project_from_document(doc.id, &doc.data, doc.created_at) {
        Ok(project) => Some(project),
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping unreadable project document");
            None
        }
    }
}

impl ProjectRepo {
    /// List projects, newest first.
    ///
    /// Any store failure is reported as [`StoreError::LoadFailed`].
    pub async fn list(
        store: &dyn DocumentStore,
        visibility: Visibility,
    ) -> Result<Vec<Project>, StoreError> {
        let docs = store
            .list(COLLECTION_PROJECTS)
            .await
            .map_err(|e| load_failed(COLLECTION_PROJECTS, e))?;

        let mut projects: Vec<Project> = docs
            .iter()
            .filter_map(to_project)
            .filter(|p| visibility == Visibility::All || p.is_public())
            .collect();
        projects.sort_by(|a, b| b.fields.created_at.cmp(&a.fields.created_at));
        Ok(projects)
    }

    /// Find a project by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: RecordId,
    ) -> Result<Option<Project>, StoreError> {
        let doc = store.get(COLLECTION_PROJECTS, id).await?;
        Ok(doc.as_ref().and_then(to_project))
    }

    /// Insert a new project, returning the stored record.
    pub async fn create(
        store: &dyn DocumentStore,
        fields: &ProjectFields,
    ) -> Result<Project, StoreError> {
        let id = store
            .create(COLLECTION_PROJECTS, project_to_document(fields))
            .await?;
        Ok(Project {
            id,
            fields: fields.clone(),
        })
    }

    /// Replace a project. Returns `None` if no project with `id` exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: RecordId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, StoreError> {
        let updated = store
            .update(COLLECTION_PROJECTS, id, project_to_document(fields))
            .await?;
        Ok(updated.then(|| Project {
            id,
            fields: fields.clone(),
        }))
    }

    /// Delete a project. Returns `true` if a document was removed.
    pub async fn delete(store: &dyn DocumentStore, id: RecordId) -> Result<bool, StoreError> {
        store.delete(COLLECTION_PROJECTS, id).await
    }
}
