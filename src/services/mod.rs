//! Business logic services

pub mod authors;
pub mod books;

use crate::{repository::Repository, sorting::PropertyMappingService};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub mappings: PropertyMappingService,
}

impl Services {
    /// Create all services with the given repository and mapping registry
    pub fn new(repository: Repository, mappings: PropertyMappingService) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository),
            mappings,
        }
    }
}
