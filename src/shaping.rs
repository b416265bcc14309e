//! Field shaping for transfer objects
//!
//! Clients can pass a comma-separated `fields` parameter to receive a sparse
//! record holding only the requested fields, in the requested order. Each
//! shapeable type declares its public fields in a compile-time registry, so
//! no runtime reflection is involved.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// An ordered sparse record produced by shaping
pub type ShapedRecord = IndexMap<String, Value>;

/// Per-type registry of shapeable fields
pub trait Shape {
    /// Declared public field names, in declaration order (wire casing)
    const FIELDS: &'static [&'static str];

    /// Value of a declared field; `None` for undeclared names
    fn field(&self, name: &str) -> Option<Value>;
}

/// Resolve a requested field list against the declared fields of `T`.
///
/// An absent or blank list resolves to every declared field. Tokens are
/// matched case-insensitively and resolve to their declared casing; the
/// first unresolvable token fails the whole request.
pub fn resolve_fields<T: Shape>(fields: Option<&str>) -> AppResult<Vec<&'static str>> {
    let requested = match fields {
        Some(f) if !f.trim().is_empty() => f,
        _ => return Ok(T::FIELDS.to_vec()),
    };

    let mut resolved = Vec::new();
    for token in requested.split(',') {
        let token = token.trim();
        let declared = T::FIELDS
            .iter()
            .find(|declared| declared.eq_ignore_ascii_case(token))
            .ok_or_else(|| {
                AppError::BadRequest(format!("Field '{}' does not exist on the resource", token))
            })?;
        resolved.push(*declared);
    }
    Ok(resolved)
}

/// Shape a sequence of records down to the requested fields
pub fn shape_data<T: Shape>(records: &[T], fields: Option<&str>) -> AppResult<Vec<ShapedRecord>> {
    let resolved = resolve_fields::<T>(fields)?;
    Ok(records
        .iter()
        .map(|record| shape_with(record, &resolved))
        .collect())
}

/// Shape a single record down to the requested fields
pub fn shape_record<T: Shape>(record: &T, fields: Option<&str>) -> AppResult<ShapedRecord> {
    let resolved = resolve_fields::<T>(fields)?;
    Ok(shape_with(record, &resolved))
}

fn shape_with<T: Shape>(record: &T, fields: &[&'static str]) -> ShapedRecord {
    fields
        .iter()
        .map(|name| {
            (
                name.to_string(),
                record.field(name).unwrap_or(Value::Null),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Sample {
        id: i32,
        name: &'static str,
        genre: &'static str,
    }

    impl Shape for Sample {
        const FIELDS: &'static [&'static str] = &["id", "name", "genre"];

        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "id" => Some(json!(self.id)),
                "name" => Some(json!(self.name)),
                "genre" => Some(json!(self.genre)),
                _ => None,
            }
        }
    }

    fn sample() -> Sample {
        Sample {
            id: 7,
            name: "Stephen King",
            genre: "Horror",
        }
    }

    #[test]
    fn test_no_fields_returns_all_in_declaration_order() {
        let shaped = shape_record(&sample(), None).unwrap();
        let keys: Vec<&str> = shaped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "genre"]);
    }

    #[test]
    fn test_blank_fields_returns_all() {
        let shaped = shape_record(&sample(), Some("   ")).unwrap();
        assert_eq!(shaped.len(), 3);
    }

    #[test]
    fn test_subset_preserves_requested_order() {
        let shaped = shape_record(&sample(), Some("genre, id")).unwrap();
        let keys: Vec<&str> = shaped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["genre", "id"]);
        assert_eq!(shaped["genre"], json!("Horror"));
        assert_eq!(shaped["id"], json!(7));
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let shaped = shape_record(&sample(), Some("NAME")).unwrap();
        let keys: Vec<&str> = shaped.keys().map(String::as_str).collect();
        // declared casing wins over requested casing
        assert_eq!(keys, vec!["name"]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = shape_record(&sample(), Some("id, nickname")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_unknown_field_fails_whole_collection() {
        let records = vec![sample(), sample()];
        assert!(shape_data(&records, Some("nope")).is_err());
    }

    #[test]
    fn test_shape_data_shapes_every_record() {
        let records = vec![sample(), sample()];
        let shaped = shape_data(&records, Some("id")).unwrap();
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped[0].len(), 1);
    }
}
