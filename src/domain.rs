//! Domain models for document projects.
//!
//! This module contains the document configuration and the value types it
//! owns: authors, chapters, the copyright block and the revision history.

mod author;
pub use author::{Author, AuthorRecord};

mod chapter;
pub use chapter::{Chapter, chapter_id};

mod config;
pub use config::{DEFAULT_LANG, DocumentConfig, DocumentType, UnknownDocumentType};

mod copyright;
pub use copyright::Copyright;

mod validation;
pub use validation::{Field, ValidationError};

mod version;
pub use version::VersionEntry;
