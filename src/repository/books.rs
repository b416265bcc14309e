//! Books repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::Book};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books owned by an author
    pub async fn list_for_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Get one book scoped to its owning author
    pub async fn get_for_author(&self, author_id: Uuid, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE author_id = $1 AND id = $2",
        )
        .bind(author_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Insert a book with a caller-supplied ID (also used for upserts)
    pub async fn insert_for_author(
        &self,
        author_id: Uuid,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, author_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Full replace of a book's mutable fields
    pub async fn update_for_author(
        &self,
        author_id: Uuid,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $1, description = $2
            WHERE author_id = $3 AND id = $4
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(author_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Delete a book scoped to its owning author
    pub async fn delete_for_author(&self, author_id: Uuid, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE author_id = $1 AND id = $2")
            .bind(author_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
