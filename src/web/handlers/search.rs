//! Public project search handler.
//!
//! The search page is not ownership-scoped: it browses every project.
//! Anonymous viewers see masked owner usernames and no contact email.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::db::{ProjectRepository, SearchFilter};
use crate::session::Session;
use crate::web::dto::{ApiResponse, PublicProjectResponse, SearchParams, SearchResponse};
use crate::web::error::ApiError;

use super::AppState;

/// Parse the raw query parameters into a typed filter.
///
/// Empty strings mean "no filter". Unparseable phase or date values
/// are rejected at the boundary.
fn build_filter(params: &SearchParams) -> Result<SearchFilter, ApiError> {
    let mut filter = SearchFilter::default();

    if let Some(title) = params.title.as_deref().map(str::trim) {
        if !title.is_empty() {
            filter.title = Some(title.to_string());
        }
    }
    if let Some(username) = params.username.as_deref().map(str::trim) {
        if !username.is_empty() {
            filter.username = Some(username.to_string());
        }
    }
    if let Some(phase) = params.phase.as_deref().map(str::trim) {
        if !phase.is_empty() {
            filter.phase = Some(
                phase
                    .parse()
                    .map_err(|_| ApiError::bad_request("Please select a valid project phase."))?,
            );
        }
    }
    if let Some(start_date) = params.start_date.as_deref().map(str::trim) {
        if !start_date.is_empty() {
            filter.start_date = Some(
                start_date
                    .parse()
                    .map_err(|_| ApiError::bad_request("Start date is not a valid date."))?,
            );
        }
    }

    Ok(filter)
}

/// GET /projects - search all projects, newest first.
pub async fn search_projects(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let filter = build_filter(&params)?;

    let repo = ProjectRepository::new(state.db.pool());
    let results = repo.search(&filter).await.map_err(ApiError::storage)?;

    let authenticated = session.is_authenticated();
    let projects: Vec<_> = results
        .into_iter()
        .map(|p| PublicProjectResponse::new(p, authenticated))
        .collect();

    Ok(Json(ApiResponse::new(SearchResponse {
        count: projects.len(),
        projects,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Phase;

    #[test]
    fn test_build_filter_empty_params() {
        let filter = build_filter(&SearchParams::default()).unwrap();
        assert!(filter.title.is_none());
        assert!(filter.username.is_none());
        assert!(filter.phase.is_none());
        assert!(filter.start_date.is_none());
    }

    #[test]
    fn test_build_filter_blank_strings_ignored() {
        let params = SearchParams {
            title: Some("  ".to_string()),
            username: Some(String::new()),
            phase: Some(String::new()),
            start_date: Some("  ".to_string()),
        };
        let filter = build_filter(&params).unwrap();
        assert!(filter.title.is_none());
        assert!(filter.phase.is_none());
        assert!(filter.start_date.is_none());
    }

    #[test]
    fn test_build_filter_full() {
        let params = SearchParams {
            title: Some(" web ".to_string()),
            username: Some("jo".to_string()),
            phase: Some("testing".to_string()),
            start_date: Some("2024-01-01".to_string()),
        };
        let filter = build_filter(&params).unwrap();
        assert_eq!(filter.title.as_deref(), Some("web"));
        assert_eq!(filter.username.as_deref(), Some("jo"));
        assert_eq!(filter.phase, Some(Phase::Testing));
        assert_eq!(filter.start_date, Some("2024-01-01".parse().unwrap()));
    }

    #[test]
    fn test_build_filter_invalid_phase() {
        let params = SearchParams {
            phase: Some("planning".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&params).is_err());
    }

    #[test]
    fn test_build_filter_invalid_date() {
        let params = SearchParams {
            start_date: Some("01/01/2024".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&params).is_err());
    }
}
