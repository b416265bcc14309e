//! Author model and related types

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::book::CreateBook;
use crate::shaping::Shape;

/// Full author entity from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub genre: String,
    pub date_of_birth: DateTime<Utc>,
}

/// Client-facing author projection
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    /// Display name, first and last name concatenated
    pub name: String,
    /// Age in full years, derived from the date of birth
    pub age: i32,
    pub genre: String,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_at(&author.date_of_birth, Utc::now()),
            genre: author.genre.clone(),
        }
    }
}

impl Shape for AuthorDto {
    const FIELDS: &'static [&'static str] = &["id", "name", "age", "genre"];

    fn field(&self, name: &str) -> Option<serde_json::Value> {
        match name {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            "age" => Some(json!(self.age)),
            "genre" => Some(json!(self.genre)),
            _ => None,
        }
    }
}

/// Age in full years at `now`, decremented when this year's anniversary
/// has not yet occurred
pub fn age_at(date_of_birth: &DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    let mut age = now.year() - date_of_birth.year();
    if (now.month(), now.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Create author request, optionally with an initial set of books
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 50, message = "First name must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50, message = "Genre must be 1 to 50 characters"))]
    pub genre: String,
    pub date_of_birth: DateTime<Utc>,
    #[serde(default)]
    #[validate(nested)]
    pub books: Vec<CreateBook>,
}

/// Query parameters for listing authors
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsQuery {
    /// Page number (default: 1)
    pub page_number: Option<i64>,
    /// Page size (default: 10, clamped server-side)
    pub page_size: Option<i64>,
    /// Filter on exact genre (case-insensitive)
    pub genre: Option<String>,
    /// Substring search over genre and names
    pub search_query: Option<String>,
    /// Sort expression, e.g. `name desc, age`
    pub order_by: Option<String>,
    /// Comma-separated list of fields to return
    pub fields: Option<String>,
}

impl AuthorsQuery {
    pub fn current_page(&self) -> i64 {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Requested page size, clamped to the configured maximum
    pub fn effective_page_size(&self, default: i64, max: i64) -> i64 {
        self.page_size.unwrap_or(default).clamp(1, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_age_on_exact_anniversary() {
        let dob = Utc.with_ymd_and_hms(1980, 6, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(age_at(&dob, now), 40);
    }

    #[test]
    fn test_age_day_before_anniversary() {
        let dob = Utc.with_ymd_and_hms(1980, 6, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2020, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(age_at(&dob, now), 39);
    }

    #[test]
    fn test_age_day_after_anniversary() {
        let dob = Utc.with_ymd_and_hms(1980, 6, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2020, 6, 16, 0, 0, 0).unwrap();
        assert_eq!(age_at(&dob, now), 40);
    }

    #[test]
    fn test_dto_derives_display_name() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Stephen".to_string(),
            last_name: "King".to_string(),
            genre: "Horror".to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1947, 9, 21, 0, 0, 0).unwrap(),
        };
        let dto = AuthorDto::from(&author);
        assert_eq!(dto.name, "Stephen King");
        assert_eq!(dto.genre, "Horror");
    }

    #[test]
    fn test_page_size_is_clamped() {
        let query = AuthorsQuery {
            page_size: Some(100),
            ..Default::default()
        };
        assert_eq!(query.effective_page_size(10, 20), 20);

        let query = AuthorsQuery::default();
        assert_eq!(query.effective_page_size(10, 20), 10);
        assert_eq!(query.current_page(), 1);
    }

    #[test]
    fn test_page_number_floors_at_one() {
        let query = AuthorsQuery {
            page_number: Some(-3),
            ..Default::default()
        };
        assert_eq!(query.current_page(), 1);
    }
}
