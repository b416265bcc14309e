//! Author collection endpoints (bulk create, batch fetch)

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AuthorDto, CreateAuthor},
    AppState,
};

/// Create a collection of authors in one atomic operation
#[utoipa::path(
    post,
    path = "/authorcollections",
    tag = "author-collections",
    request_body = Vec<CreateAuthor>,
    responses(
        (status = 201, description = "Authors created", body = Vec<AuthorDto>),
        (status = 400, description = "Empty collection"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_author_collection(
    State(state): State<AppState>,
    Json(data): Json<Vec<CreateAuthor>>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Vec<AuthorDto>>)> {
    let authors = state.services.authors.create_many(data).await?;
    let ids = authors
        .iter()
        .map(|a| a.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let location = format!("/api/authorcollections/{}", ids);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(authors)))
}

/// Batch fetch authors by a comma-separated ID list.
///
/// Strict all-or-nothing: if any requested ID is unknown the whole batch
/// is reported as not found.
#[utoipa::path(
    get,
    path = "/authorcollections/{ids}",
    tag = "author-collections",
    params(("ids" = String, Path, description = "Comma-separated author IDs")),
    responses(
        (status = 200, description = "All requested authors", body = Vec<AuthorDto>),
        (status = 400, description = "Malformed ID list"),
        (status = 404, description = "One or more authors not found")
    )
)]
pub async fn get_author_collection(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> AppResult<Json<Vec<AuthorDto>>> {
    let ids = parse_id_list(&ids)?;
    let authors = state.services.authors.get_many(&ids).await?;
    Ok(Json(authors))
}

/// Parse a comma-separated UUID list; parentheses around the whole list
/// are tolerated for compatibility with `(id1,id2)` style URIs
fn parse_id_list(raw: &str) -> AppResult<Vec<Uuid>> {
    let raw = raw.trim().trim_start_matches('(').trim_end_matches(')');
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            Uuid::parse_str(token)
                .map_err(|_| AppError::BadRequest(format!("'{}' is not a valid author ID", token)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_id_list() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let parsed = parse_id_list(&format!("{}, {}", a, b)).unwrap();
        assert_eq!(parsed, vec![a, b]);
    }

    #[test]
    fn test_parse_parenthesized_id_list() {
        let a = Uuid::new_v4();
        let parsed = parse_id_list(&format!("({})", a)).unwrap();
        assert_eq!(parsed, vec![a]);
    }

    #[test]
    fn test_malformed_token_is_bad_request() {
        let err = parse_id_list("not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_empty_list_is_bad_request() {
        assert!(parse_id_list("").is_err());
    }
}
