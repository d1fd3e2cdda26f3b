//! The AsciiDoc Publishing Toolbox.
//!
//! A document is a directory holding a `document.yml` configuration and one
//! AsciiDoc source per chapter. This crate scaffolds such directories, keeps
//! the chapter list and the sources in step, and renders the configuration
//! into a single document handed to an external converter.

pub mod domain;
pub use domain::{Author, Chapter, Copyright, DocumentConfig, DocumentType, VersionEntry};

pub mod engine;

pub mod render;

pub mod storage;
pub use storage::Project;
