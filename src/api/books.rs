//! Book endpoints, nested under their owning author

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookDto, CreateBook, PatchBook, UpdateBook},
    services::books::BookUpsert,
    AppState,
};

/// List all books for an author
#[utoipa::path(
    get,
    path = "/authors/{author_id}/books",
    tag = "books",
    params(("author_id" = Uuid, Path, description = "Owning author ID")),
    responses(
        (status = 200, description = "Books for the author", body = Vec<BookDto>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn list_books_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.list_for_author(author_id).await?;
    Ok(Json(books))
}

/// Get one book for an author
#[utoipa::path(
    get,
    path = "/authors/{author_id}/books/{id}",
    tag = "books",
    params(
        ("author_id" = Uuid, Path, description = "Owning author ID"),
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Author or book not found")
    )
)]
pub async fn get_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_for_author(author_id, id).await?;
    Ok(Json(book))
}

/// Create a book for an author
#[utoipa::path(
    post,
    path = "/authors/{author_id}/books",
    tag = "books",
    params(("author_id" = Uuid, Path, description = "Owning author ID")),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_book_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BookDto>)> {
    let book = state.services.books.create_for_author(author_id, data).await?;
    let location = format!("/api/authors/{}/books/{}", author_id, book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// Full replace of a book. An unknown book ID is upserted: the book is
/// created under the client-supplied ID and 201 is returned.
#[utoipa::path(
    put,
    path = "/authors/{author_id}/books/{id}",
    tag = "books",
    params(
        ("author_id" = Uuid, Path, description = "Owning author ID"),
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 201, description = "Book upserted", body = BookDto),
        (status = 204, description = "Book replaced"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failed, or description equals title")
    )
)]
pub async fn update_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Response> {
    match state
        .services
        .books
        .upsert_for_author(author_id, id, data)
        .await?
    {
        BookUpsert::Created(book) => {
            let location = format!("/api/authors/{}/books/{}", author_id, book.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)).into_response())
        }
        BookUpsert::Replaced => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Partial update of a book; unknown book IDs are upserted from the patch
#[utoipa::path(
    patch,
    path = "/authors/{author_id}/books/{id}",
    tag = "books",
    params(
        ("author_id" = Uuid, Path, description = "Owning author ID"),
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = PatchBook,
    responses(
        (status = 201, description = "Book upserted", body = BookDto),
        (status = 204, description = "Book patched"),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation failed, or description equals title")
    )
)]
pub async fn patch_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<PatchBook>,
) -> AppResult<Response> {
    match state
        .services
        .books
        .patch_for_author(author_id, id, patch)
        .await?
    {
        BookUpsert::Created(book) => {
            let location = format!("/api/authors/{}/books/{}", author_id, book.id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)).into_response())
        }
        BookUpsert::Replaced => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Delete a book for an author
#[utoipa::path(
    delete,
    path = "/authors/{author_id}/books/{id}",
    tag = "books",
    params(
        ("author_id" = Uuid, Path, description = "Owning author ID"),
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Author or book not found")
    )
)]
pub async fn delete_book_for_author(
    State(state): State<AppState>,
    Path((author_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.services.books.delete_for_author(author_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
