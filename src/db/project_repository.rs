//! Project repository for PROJTRACK.
//!
//! Ownership-scoped CRUD for projects plus the public search query.
//! Every mutation binds both the project ID and the owner ID so a
//! request from a non-owner affects zero rows.

use chrono::NaiveDate;
use sqlx::QueryBuilder;

use super::project::{NewProject, Phase, Project, ProjectWithOwner};
use super::DbPool;
use crate::{ProjtrackError, Result};

const PROJECT_COLUMNS: &str = "id, owner_id, title, short_description, start_date, end_date, \
     phase, created_at, updated_at";

/// Filters for the public project search.
///
/// All fields are optional and combine with AND. Values are always
/// bound as parameters, never interpolated into the query text.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Owner username substring.
    pub username: Option<String>,
    /// Exact phase match.
    pub phase: Option<Phase>,
    /// Only projects starting on or after this date.
    pub start_date: Option<NaiveDate>,
}

/// Repository for project operations.
pub struct ProjectRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new ProjectRepository over the given pool.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new project.
    ///
    /// Returns the created project with the assigned ID.
    pub async fn create(&self, new_project: &NewProject) -> Result<Project> {
        let result = sqlx::query(
            "INSERT INTO projects (owner_id, title, short_description, start_date, end_date, phase)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new_project.owner_id)
        .bind(&new_project.title)
        .bind(&new_project.short_description)
        .bind(new_project.start_date)
        .bind(new_project.end_date)
        .bind(new_project.phase.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_owned(id, new_project.owner_id)
            .await?
            .ok_or_else(|| ProjtrackError::NotFound("project".to_string()))
    }

    /// Get a project by ID, scoped to its owner.
    ///
    /// A wrong ID and a wrong owner are the same outcome: `None`.
    pub async fn get_owned(&self, id: i64, owner_id: i64) -> Result<Option<Project>> {
        let result = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ? AND owner_id = ?"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a project's fields, scoped to its owner.
    ///
    /// `update.owner_id` is the acting user; the WHERE clause binds
    /// both identifiers, so a non-owner's update affects zero rows.
    /// Returns false when nothing was updated.
    pub async fn update_owned(&self, id: i64, update: &NewProject) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE projects
             SET title = ?,
                 short_description = ?,
                 start_date = ?,
                 end_date = ?,
                 phase = ?,
                 updated_at = datetime('now')
             WHERE id = ? AND owner_id = ?",
        )
        .bind(&update.title)
        .bind(&update.short_description)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.phase.as_str())
        .bind(id)
        .bind(update.owner_id)
        .execute(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a project, scoped to its owner.
    ///
    /// Returns true if a row was deleted, false if the ID didn't exist
    /// or belongs to someone else.
    pub async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// List all projects owned by a user, most recent start date first.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = ? ORDER BY start_date DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(projects)
    }

    /// Count projects owned by a user.
    pub async fn count_by_owner(&self, owner_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Search all projects (not ownership-scoped), newest first.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProjectWithOwner>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT p.id, p.owner_id, p.title, p.short_description, p.start_date, p.end_date,
                    p.phase, p.created_at, p.updated_at, u.username, u.email
             FROM projects p
             JOIN users u ON p.owner_id = u.id",
        );

        let mut first = true;

        if let Some(ref title) = filter.title {
            push_connector(&mut query, &mut first);
            query.push("p.title LIKE ");
            query.push_bind(format!("%{title}%"));
        }
        if let Some(ref username) = filter.username {
            push_connector(&mut query, &mut first);
            query.push("u.username LIKE ");
            query.push_bind(format!("%{username}%"));
        }
        if let Some(phase) = filter.phase {
            push_connector(&mut query, &mut first);
            query.push("p.phase = ");
            query.push_bind(phase.as_str());
        }
        if let Some(start_date) = filter.start_date {
            push_connector(&mut query, &mut first);
            query.push("p.start_date >= ");
            query.push_bind(start_date);
        }

        query.push(" ORDER BY p.created_at DESC, p.id DESC");

        let projects = query
            .build_query_as::<ProjectWithOwner>()
            .fetch_all(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(projects)
    }
}

/// Push " WHERE " for the first condition, " AND " for the rest.
fn push_connector(query: &mut QueryBuilder<'_, sqlx::Sqlite>, first: &mut bool) {
    if *first {
        query.push(" WHERE ");
        *first = false;
    } else {
        query.push(" AND ");
    }
}
