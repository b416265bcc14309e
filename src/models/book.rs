//! Book model and related types

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shaping::Shape;

/// Full book entity from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

/// Client-facing book projection
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            author_id: book.author_id,
        }
    }
}

impl Shape for BookDto {
    const FIELDS: &'static [&'static str] = &["id", "title", "description", "authorId"];

    fn field(&self, name: &str) -> Option<serde_json::Value> {
        match name {
            "id" => Some(json!(self.id)),
            "title" => Some(json!(self.title)),
            "description" => Some(json!(self.description)),
            "authorId" => Some(json!(self.author_id)),
            _ => None,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
}

/// Full-replace book request; the description is required here
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Description must be 1 to 500 characters"))]
    pub description: String,
}

/// Partial-update overlay; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchBook {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PatchBook {
    /// Overlay this patch onto an existing book, yielding a full-replace
    /// document ready for validation
    pub fn apply_to(&self, book: &Book) -> UpdateBook {
        UpdateBook {
            title: self.title.clone().unwrap_or_else(|| book.title.clone()),
            description: self
                .description
                .clone()
                .or_else(|| book.description.clone())
                .unwrap_or_default(),
        }
    }

    /// Treat the patch document as a creation document (upsert path)
    pub fn into_update(self) -> UpdateBook {
        UpdateBook {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "The Stand".to_string(),
            description: Some("Post-apocalyptic dark fantasy".to_string()),
        }
    }

    #[test]
    fn test_patch_overlays_only_present_fields() {
        let patch = PatchBook {
            title: Some("The Stand (Uncut)".to_string()),
            description: None,
        };
        let updated = patch.apply_to(&book());
        assert_eq!(updated.title, "The Stand (Uncut)");
        assert_eq!(updated.description, "Post-apocalyptic dark fantasy");
    }

    #[test]
    fn test_empty_patch_keeps_existing_values() {
        let patch = PatchBook::default();
        let updated = patch.apply_to(&book());
        assert_eq!(updated.title, "The Stand");
    }

    #[test]
    fn test_patch_into_update_requires_title() {
        let update = PatchBook::default().into_update();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_requires_description() {
        let update = UpdateBook {
            title: "It".to_string(),
            description: String::new(),
        };
        assert!(update.validate().is_err());
    }
}
