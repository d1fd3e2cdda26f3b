//! Reading and writing document projects.

mod document_file;
pub use document_file::{
    CONFIG_FILE_NAME, LoadError, SaveError, Source, is_document_directory, load, persist,
    serialize,
};

mod project;
pub use project::{
    BuildOutput, ChapterChange, FONTS_DIR, FileChange, InitOptions, Loaded, Project,
    ProjectError, SOURCE_DIR, THEMES_DIR, Unloaded,
};

mod schema;
pub use schema::{JsonSchema, SCHEMA_URL, SchemaError, SchemaValidator, Violation};
