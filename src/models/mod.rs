//! Data models for Librarium

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDto, AuthorsQuery, CreateAuthor};
pub use book::{Book, BookDto, CreateBook, PatchBook, UpdateBook};
