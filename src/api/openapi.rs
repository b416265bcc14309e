//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{author_collections, authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Librarium API",
        version = "1.0.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Librarium Team")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::block_author_creation,
        authors::delete_author,
        // Author collections
        author_collections::create_author_collection,
        author_collections::get_author_collection,
        // Books
        books::list_books_for_author,
        books::get_book_for_author,
        books::create_book_for_author,
        books::update_book_for_author,
        books::patch_book_for_author,
        books::delete_book_for_author,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::AuthorDto,
            crate::models::author::CreateAuthor,
            crate::models::author::AuthorsQuery,
            // Books
            crate::models::book::BookDto,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::PatchBook,
            // Pagination
            crate::pagination::PaginationMetadata,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author catalog management"),
        (name = "author-collections", description = "Bulk author operations"),
        (name = "books", description = "Books nested under their author")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
