//! API handlers for Librarium REST endpoints

pub mod author_collections;
pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
