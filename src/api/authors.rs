//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDto, AuthorsQuery, CreateAuthor},
    pagination::{LinkBuilder, Page, PaginationMetadata, PAGINATION_HEADER},
    shaping::{self, ShapedRecord},
    AppState,
};

/// Query parameters for single-resource field shaping
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FieldsQuery {
    /// Comma-separated list of fields to return
    pub fields: Option<String>,
}

/// List authors with filtering, sorting, shaping and pagination.
///
/// Pagination metadata, including previous/next page links, is emitted in
/// the `X-Pagination` response header.
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(AuthorsQuery),
    responses(
        (status = 200, description = "One page of authors, shaped to the requested fields", body = Vec<AuthorDto>),
        (status = 400, description = "Unknown field or unmapped sort expression")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorsQuery>,
) -> AppResult<(HeaderMap, Json<Vec<ShapedRecord>>)> {
    let services = &state.services;

    if !services
        .mappings
        .valid_mapping_exists_for::<AuthorDto, Author>(query.order_by.as_deref())?
    {
        return Err(AppError::BadRequest(format!(
            "Sort expression '{}' references unmapped fields",
            query.order_by.as_deref().unwrap_or_default()
        )));
    }
    // resolve the field list up front so a bad request fails before any query
    shaping::resolve_fields::<AuthorDto>(query.fields.as_deref())?;

    let order_by = services.mappings.order_by_clause::<AuthorDto, Author>(
        query.order_by.as_deref(),
        "last_name ASC, first_name ASC",
    )?;
    let page = services
        .authors
        .list(&query, &order_by, &state.config.pagination)
        .await?;

    let previous_page_link = page
        .has_previous()
        .then(|| page_link(&query, &page, page.current_page - 1));
    let next_page_link = page
        .has_next()
        .then(|| page_link(&query, &page, page.current_page + 1));
    let metadata = PaginationMetadata::for_page(&page, previous_page_link, next_page_link);

    let shaped = shaping::shape_data(&page.items, query.fields.as_deref())?;
    Ok((pagination_header(&metadata)?, Json(shaped)))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = Uuid, Path, description = "Author ID"),
        FieldsQuery
    ),
    responses(
        (status = 200, description = "Author details, shaped to the requested fields", body = AuthorDto),
        (status = 400, description = "Unknown field requested"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> AppResult<Json<ShapedRecord>> {
    shaping::resolve_fields::<AuthorDto>(query.fields.as_deref())?;

    let author = state.services.authors.get(id).await?;
    Ok(Json(shaping::shape_record(&author, query.fields.as_deref())?))
}

/// Create a new author, optionally with an initial set of books
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<AuthorDto>)> {
    let author = state.services.authors.create(data).await?;
    let location = format!("/api/authors/{}", author.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(author)))
}

/// Block creation at a caller-chosen URI: existing ID conflicts, unknown
/// ID is simply not found
#[utoipa::path(
    post,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author already exists")
    )
)]
pub async fn block_author_creation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.services.authors.exists(id).await? {
        return Err(AppError::Conflict(format!(
            "Author {} already exists; the resource URI is server-assigned",
            id
        )));
    }
    Err(AppError::NotFound(format!("Author {} not found", id)))
}

/// Delete an author and all of their books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn page_link(query: &AuthorsQuery, page: &Page<AuthorDto>, target_page: i64) -> String {
    LinkBuilder::new("/api/authors")
        .param_opt("fields", query.fields.as_deref())
        .param_opt("orderBy", query.order_by.as_deref())
        .param_opt("searchQuery", query.search_query.as_deref())
        .param_opt("genre", query.genre.as_deref())
        .param("pageNumber", target_page)
        .param("pageSize", page.page_size)
        .build()
}

fn pagination_header(metadata: &PaginationMetadata) -> AppResult<HeaderMap> {
    let serialized = serde_json::to_string(metadata)
        .map_err(|e| AppError::Internal(format!("Pagination metadata serialization: {}", e)))?;
    let value = HeaderValue::from_str(&serialized)
        .map_err(|e| AppError::Internal(format!("Pagination header value: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(PAGINATION_HEADER, value);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_link_preserves_query_parameters() {
        let query = AuthorsQuery {
            genre: Some("Horror".to_string()),
            order_by: Some("name desc".to_string()),
            ..Default::default()
        };
        let page: Page<AuthorDto> = Page::new(vec![], 25, 2, 10);

        let link = page_link(&query, &page, 3);
        assert_eq!(
            link,
            "/api/authors?orderBy=name%20desc&genre=Horror&pageNumber=3&pageSize=10"
        );
    }

    #[test]
    fn test_pagination_header_is_json() {
        let page: Page<AuthorDto> = Page::new(vec![], 25, 1, 10);
        let metadata = PaginationMetadata::for_page(&page, None, Some("/api/authors?pageNumber=2".to_string()));
        let headers = pagination_header(&metadata).unwrap();

        let raw = headers.get(PAGINATION_HEADER).unwrap().to_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["totalCount"], 25);
        assert_eq!(parsed["totalPages"], 3);
        assert!(parsed["previousPageLink"].is_null());
    }
}
