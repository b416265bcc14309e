//! Authors service

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    models::{AuthorDto, AuthorsQuery, CreateAuthor},
    pagination::Page,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// One page of authors; `order_by` must already be resolved through the
    /// property mapping registry
    pub async fn list(
        &self,
        query: &AuthorsQuery,
        order_by: &str,
        pagination: &PaginationConfig,
    ) -> AppResult<Page<AuthorDto>> {
        let page = query.current_page();
        let page_size =
            query.effective_page_size(pagination.default_page_size, pagination.max_page_size);

        let (authors, total_count) = self
            .repository
            .authors
            .list(
                query.genre.as_deref(),
                query.search_query.as_deref(),
                order_by,
                page,
                page_size,
            )
            .await?;

        let authors = authors.iter().map(AuthorDto::from).collect();
        Ok(Page::new(authors, total_count, page, page_size))
    }

    /// Get author by ID
    pub async fn get(&self, id: Uuid) -> AppResult<AuthorDto> {
        let author = self
            .repository
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
        Ok(AuthorDto::from(&author))
    }

    /// Batch fetch; strict all-or-nothing, any missing ID fails the batch
    pub async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<AuthorDto>> {
        let authors = self.repository.authors.get_by_ids(ids).await?;
        if authors.len() != ids.len() {
            return Err(AppError::NotFound(
                "One or more requested authors were not found".to_string(),
            ));
        }
        Ok(authors.iter().map(AuthorDto::from).collect())
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        self.repository.authors.exists(id).await
    }

    /// Create an author with any nested books
    pub async fn create(&self, data: CreateAuthor) -> AppResult<AuthorDto> {
        data.validate()?;
        let author = self.repository.authors.insert(&data).await?;
        Ok(AuthorDto::from(&author))
    }

    /// Create a collection of authors atomically
    pub async fn create_many(&self, data: Vec<CreateAuthor>) -> AppResult<Vec<AuthorDto>> {
        if data.is_empty() {
            return Err(AppError::BadRequest(
                "Author collection cannot be empty".to_string(),
            ));
        }
        for author in &data {
            author.validate()?;
        }
        let authors = self.repository.authors.insert_many(&data).await?;
        Ok(authors.iter().map(AuthorDto::from).collect())
    }

    /// Delete an author; owned books are cascade-deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.repository.authors.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
