//! Books service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, ValidationDetails},
    models::{BookDto, CreateBook, PatchBook, UpdateBook},
    repository::Repository,
};

/// Outcome of an update against a possibly-absent book
pub enum BookUpsert {
    /// The book did not exist and was created with the client-supplied ID
    Created(BookDto),
    /// The existing book was replaced in place
    Replaced,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books owned by an author
    pub async fn list_for_author(&self, author_id: Uuid) -> AppResult<Vec<BookDto>> {
        self.ensure_author(author_id).await?;
        let books = self.repository.books.list_for_author(author_id).await?;
        Ok(books.iter().map(BookDto::from).collect())
    }

    /// Get one book scoped to its owning author
    pub async fn get_for_author(&self, author_id: Uuid, id: Uuid) -> AppResult<BookDto> {
        self.ensure_author(author_id).await?;
        let book = self
            .repository
            .books
            .get_for_author(author_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        Ok(BookDto::from(&book))
    }

    /// Create a book for an existing author
    pub async fn create_for_author(&self, author_id: Uuid, data: CreateBook) -> AppResult<BookDto> {
        data.validate()?;
        self.ensure_author(author_id).await?;
        let book = self
            .repository
            .books
            .insert_for_author(author_id, Uuid::new_v4(), &data.title, data.description.as_deref())
            .await?;
        Ok(BookDto::from(&book))
    }

    /// Full replace; an absent book is created with the client-supplied ID
    pub async fn upsert_for_author(
        &self,
        author_id: Uuid,
        id: Uuid,
        data: UpdateBook,
    ) -> AppResult<BookUpsert> {
        data.validate()?;
        check_description_rule(&data.title, &data.description)?;
        self.ensure_author(author_id).await?;

        match self.repository.books.get_for_author(author_id, id).await? {
            None => {
                let book = self
                    .repository
                    .books
                    .insert_for_author(author_id, id, &data.title, Some(&data.description))
                    .await?;
                Ok(BookUpsert::Created(BookDto::from(&book)))
            }
            Some(_) => {
                self.repository
                    .books
                    .update_for_author(author_id, id, &data.title, Some(&data.description))
                    .await?;
                Ok(BookUpsert::Replaced)
            }
        }
    }

    /// Partial update; an absent book is upserted from the patch document
    pub async fn patch_for_author(
        &self,
        author_id: Uuid,
        id: Uuid,
        patch: PatchBook,
    ) -> AppResult<BookUpsert> {
        self.ensure_author(author_id).await?;

        match self.repository.books.get_for_author(author_id, id).await? {
            None => {
                let data = patch.into_update();
                data.validate()?;
                check_description_rule(&data.title, &data.description)?;
                let book = self
                    .repository
                    .books
                    .insert_for_author(author_id, id, &data.title, Some(&data.description))
                    .await?;
                Ok(BookUpsert::Created(BookDto::from(&book)))
            }
            Some(book) => {
                let data = patch.apply_to(&book);
                data.validate()?;
                check_description_rule(&data.title, &data.description)?;
                self.repository
                    .books
                    .update_for_author(author_id, id, &data.title, Some(&data.description))
                    .await?;
                Ok(BookUpsert::Replaced)
            }
        }
    }

    /// Delete a book scoped to its owning author
    pub async fn delete_for_author(&self, author_id: Uuid, id: Uuid) -> AppResult<()> {
        self.ensure_author(author_id).await?;
        let deleted = self.repository.books.delete_for_author(author_id, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn ensure_author(&self, author_id: Uuid) -> AppResult<()> {
        if !self.repository.authors.exists(author_id).await? {
            return Err(AppError::NotFound(format!("Author {} not found", author_id)));
        }
        Ok(())
    }
}

/// A book's description must differ from its title
fn check_description_rule(title: &str, description: &str) -> AppResult<()> {
    if title == description {
        let mut details = ValidationDetails::new();
        details.insert(
            "description".to_string(),
            vec!["The provided description should be different from the title".to_string()],
        );
        return Err(AppError::Unprocessable(details));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_equal_to_title_is_rejected() {
        let err = check_description_rule("It", "It").unwrap_err();
        match err {
            AppError::Unprocessable(details) => {
                assert!(details.contains_key("description"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_distinct_description_passes() {
        assert!(check_description_rule("It", "A clown terrorizes Derry").is_ok());
    }
}
