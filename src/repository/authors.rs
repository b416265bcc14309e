//! Authors repository

use sqlx::{Pool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    /// Whether an author with the given ID exists
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List one page of authors with total count.
    ///
    /// `order_by` must only contain columns resolved through the property
    /// mapping registry; it is interpolated, not bound.
    pub async fn list(
        &self,
        genre: Option<&str>,
        search: Option<&str>,
        order_by: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<(Vec<Author>, i64)> {
        let genre = genre.map(|g| g.trim().to_lowercase());
        let search = search.map(|s| format!("%{}%", s.trim().to_lowercase()));

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM authors WHERE 1 = 1");
        push_filters(&mut count_query, genre.as_deref(), search.as_deref());
        let total_count: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM authors WHERE 1 = 1");
        push_filters(&mut query, genre.as_deref(), search.as_deref());
        query.push(" ORDER BY ");
        query.push(order_by);
        query.push(" OFFSET ");
        query.push_bind((page - 1) * page_size);
        query.push(" LIMIT ");
        query.push_bind(page_size);

        let authors = query
            .build_query_as::<Author>()
            .fetch_all(&self.pool)
            .await?;

        Ok((authors, total_count))
    }

    /// Get all authors matching the given IDs
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors WHERE id = ANY($1) ORDER BY first_name, last_name",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Insert an author and any nested books in one transaction
    pub async fn insert(&self, data: &CreateAuthor) -> AppResult<Author> {
        let mut tx = self.pool.begin().await?;
        let author = Self::insert_in_tx(&mut tx, data).await?;
        tx.commit().await?;
        Ok(author)
    }

    /// Insert a collection of authors atomically
    pub async fn insert_many(&self, data: &[CreateAuthor]) -> AppResult<Vec<Author>> {
        let mut tx = self.pool.begin().await?;
        let mut authors = Vec::with_capacity(data.len());
        for author in data {
            authors.push(Self::insert_in_tx(&mut tx, author).await?);
        }
        tx.commit().await?;
        Ok(authors)
    }

    async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateAuthor,
    ) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, first_name, last_name, genre, date_of_birth)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.genre)
        .bind(data.date_of_birth)
        .fetch_one(&mut **tx)
        .await?;

        for book in &data.books {
            sqlx::query("INSERT INTO books (id, author_id, title, description) VALUES ($1, $2, $3, $4)")
                .bind(Uuid::new_v4())
                .bind(author.id)
                .bind(&book.title)
                .bind(&book.description)
                .execute(&mut **tx)
                .await?;
        }

        Ok(author)
    }

    /// Delete an author; owned books cascade at the database level
    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn push_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    genre: Option<&str>,
    search: Option<&str>,
) {
    if let Some(genre) = genre {
        query.push(" AND LOWER(genre) = ");
        query.push_bind(genre.to_string());
    }
    if let Some(search) = search {
        query.push(" AND (LOWER(genre) LIKE ");
        query.push_bind(search.to_string());
        query.push(" OR LOWER(first_name) LIKE ");
        query.push_bind(search.to_string());
        query.push(" OR LOWER(last_name) LIKE ");
        query.push_bind(search.to_string());
        query.push(")");
    }
}
