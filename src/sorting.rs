//! Sort-field property mapping
//!
//! Client-facing sortable field names do not always line up with storage
//! columns: `name` sorts over two columns and `age` sorts over the stored
//! date of birth in the opposite direction. A [`PropertyMappingService`]
//! holds one registered mapping table per (source, destination) type pair,
//! validated when the service is built.

use std::any::type_name;
use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{Author, AuthorDto};

/// Destination columns for one client-facing field
#[derive(Debug, Clone)]
pub struct PropertyMappingValue {
    pub destination_properties: Vec<String>,
    /// Sort direction is inverted relative to the client's request
    pub revert: bool,
}

impl PropertyMappingValue {
    pub fn new(destinations: &[&str]) -> Self {
        Self {
            destination_properties: destinations.iter().map(|d| d.to_string()).collect(),
            revert: false,
        }
    }

    pub fn reverted(destinations: &[&str]) -> Self {
        Self {
            revert: true,
            ..Self::new(destinations)
        }
    }
}

/// Mapping table for one (source, destination) type pair; keys lowercased
#[derive(Debug, Clone)]
struct PropertyMapping {
    source: &'static str,
    destination: &'static str,
    values: HashMap<String, PropertyMappingValue>,
}

/// Registry of all property mapping tables, built once at startup
#[derive(Debug, Clone)]
pub struct PropertyMappingService {
    mappings: Vec<PropertyMapping>,
}

impl PropertyMappingService {
    /// Build the registry; fails when a type pair is registered twice
    pub fn new() -> AppResult<Self> {
        let mut service = Self { mappings: Vec::new() };

        let mut author_mapping = HashMap::new();
        author_mapping.insert("id".to_string(), PropertyMappingValue::new(&["id"]));
        author_mapping.insert("genre".to_string(), PropertyMappingValue::new(&["genre"]));
        author_mapping.insert(
            "age".to_string(),
            PropertyMappingValue::reverted(&["date_of_birth"]),
        );
        author_mapping.insert(
            "name".to_string(),
            PropertyMappingValue::new(&["first_name", "last_name"]),
        );
        service.register::<AuthorDto, Author>(author_mapping)?;

        Ok(service)
    }

    fn register<TSource, TDestination>(
        &mut self,
        values: HashMap<String, PropertyMappingValue>,
    ) -> AppResult<()> {
        let source = type_name::<TSource>();
        let destination = type_name::<TDestination>();
        if self
            .mappings
            .iter()
            .any(|m| m.source == source && m.destination == destination)
        {
            return Err(AppError::Configuration(format!(
                "Property mapping for <{}, {}> registered more than once",
                source, destination
            )));
        }
        self.mappings.push(PropertyMapping {
            source,
            destination,
            values,
        });
        Ok(())
    }

    /// The single registered mapping table for the given type pair
    pub fn mapping_for<TSource, TDestination>(
        &self,
    ) -> AppResult<&HashMap<String, PropertyMappingValue>> {
        let source = type_name::<TSource>();
        let destination = type_name::<TDestination>();
        let mut matching = self
            .mappings
            .iter()
            .filter(|m| m.source == source && m.destination == destination);

        match (matching.next(), matching.next()) {
            (Some(mapping), None) => Ok(&mapping.values),
            _ => Err(AppError::Configuration(format!(
                "Cannot find exact property mapping instance for <{}, {}>",
                source, destination
            ))),
        }
    }

    /// Whether every clause of a sort expression names a mapped field.
    ///
    /// Clauses are comma-separated; anything after the first space in a
    /// clause (the direction keyword) is ignored. An empty expression is
    /// trivially valid.
    pub fn valid_mapping_exists_for<TSource, TDestination>(
        &self,
        fields: Option<&str>,
    ) -> AppResult<bool> {
        let mapping = self.mapping_for::<TSource, TDestination>()?;

        let fields = match fields {
            Some(f) if !f.trim().is_empty() => f,
            _ => return Ok(true),
        };

        for clause in fields.split(',') {
            let trimmed = clause.trim();
            let property_name = trimmed.split(' ').next().unwrap_or(trimmed);
            if !mapping.contains_key(&property_name.to_lowercase()) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Translate a validated sort expression into an SQL ORDER BY body.
    ///
    /// Only column names from the registry reach the generated SQL; the
    /// client input merely selects among them. `revert` mappings flip the
    /// requested direction.
    pub fn order_by_clause<TSource, TDestination>(
        &self,
        fields: Option<&str>,
        default: &str,
    ) -> AppResult<String> {
        let mapping = self.mapping_for::<TSource, TDestination>()?;

        let fields = match fields {
            Some(f) if !f.trim().is_empty() => f,
            _ => return Ok(default.to_string()),
        };

        let mut columns = Vec::new();
        for clause in fields.split(',') {
            let trimmed = clause.trim();
            let mut parts = trimmed.split(' ');
            let property_name = parts.next().unwrap_or(trimmed);
            let descending = parts
                .next()
                .map(|d| d.eq_ignore_ascii_case("desc"))
                .unwrap_or(false);

            let value = mapping.get(&property_name.to_lowercase()).ok_or_else(|| {
                AppError::BadRequest(format!("Sort field '{}' is not mapped", property_name))
            })?;

            let descending = descending != value.revert;
            for destination in &value.destination_properties {
                columns.push(format!(
                    "{} {}",
                    destination,
                    if descending { "DESC" } else { "ASC" }
                ));
            }
        }
        Ok(columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PropertyMappingService {
        PropertyMappingService::new().unwrap()
    }

    #[test]
    fn test_empty_expression_is_valid() {
        let service = service();
        assert!(service
            .valid_mapping_exists_for::<AuthorDto, Author>(None)
            .unwrap());
        assert!(service
            .valid_mapping_exists_for::<AuthorDto, Author>(Some(""))
            .unwrap());
    }

    #[test]
    fn test_registered_fields_with_direction_are_valid() {
        let service = service();
        assert!(service
            .valid_mapping_exists_for::<AuthorDto, Author>(Some("genre desc, name, age asc"))
            .unwrap());
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        let service = service();
        assert!(service
            .valid_mapping_exists_for::<AuthorDto, Author>(Some("Name Desc, AGE"))
            .unwrap());
    }

    #[test]
    fn test_unregistered_field_invalidates_expression() {
        let service = service();
        assert!(!service
            .valid_mapping_exists_for::<AuthorDto, Author>(Some("name, nickname desc"))
            .unwrap());
    }

    #[test]
    fn test_missing_type_pair_is_configuration_error() {
        let service = service();
        let err = service.mapping_for::<Author, AuthorDto>().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut service = PropertyMappingService::new().unwrap();
        let err = service
            .register::<AuthorDto, Author>(HashMap::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_order_by_defaults_when_expression_absent() {
        let clause = service()
            .order_by_clause::<AuthorDto, Author>(None, "last_name ASC")
            .unwrap();
        assert_eq!(clause, "last_name ASC");
    }

    #[test]
    fn test_reverted_mapping_flips_direction() {
        let service = service();
        let clause = service
            .order_by_clause::<AuthorDto, Author>(Some("age desc"), "id ASC")
            .unwrap();
        assert_eq!(clause, "date_of_birth ASC");

        let clause = service
            .order_by_clause::<AuthorDto, Author>(Some("age"), "id ASC")
            .unwrap();
        assert_eq!(clause, "date_of_birth DESC");
    }

    #[test]
    fn test_composite_mapping_expands_to_all_columns() {
        let clause = service()
            .order_by_clause::<AuthorDto, Author>(Some("name desc, id"), "id ASC")
            .unwrap();
        assert_eq!(clause, "first_name DESC, last_name DESC, id ASC");
    }
}
