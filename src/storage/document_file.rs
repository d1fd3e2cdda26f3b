//! Loading and saving `document.yml`.
//!
//! The file is read into a generic record first, so that it can be checked
//! against the document schema before anything is built from it. Only a
//! record that passes the schema and the model's own invariants produces a
//! [`DocumentConfig`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{
        Author, AuthorRecord, Chapter, Copyright, DEFAULT_LANG, DocumentConfig, DocumentType,
        ValidationError, VersionEntry,
    },
    storage::schema::{SchemaValidator, Violation},
};

/// The name of the configuration file in a document directory.
pub const CONFIG_FILE_NAME: &str = "document.yml";

/// Where a configuration is loaded from.
#[derive(Debug, Clone)]
pub enum Source<'a> {
    /// YAML (or JSON) text.
    Text(&'a str),
    /// A document directory containing [`CONFIG_FILE_NAME`].
    Directory(&'a Path),
    /// An already parsed record.
    Record(Value),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(directory: &'a Path) -> Self {
        Self::Directory(directory)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(directory: &'a PathBuf) -> Self {
        Self::Directory(directory)
    }
}

impl From<Value> for Source<'_> {
    fn from(record: Value) -> Self {
        Self::Record(record)
    }
}

/// Loads and validates a configuration.
///
/// Either the whole configuration is loaded or nothing is: schema violations
/// are all reported together, and model invariants (blank names, duplicate
/// authors or chapters) are checked before the configuration is returned.
///
/// A missing or unrecognised `type` loads as [`DocumentType::Book`].
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed, violates the
/// schema, or breaks an invariant of the model.
pub fn load<'a>(
    source: impl Into<Source<'a>>,
    schema: &dyn SchemaValidator,
) -> Result<DocumentConfig, LoadError> {
    let record: Value = match source.into() {
        Source::Text(text) => serde_yaml::from_str(text)?,
        Source::Directory(directory) => {
            let path = directory.join(CONFIG_FILE_NAME);
            tracing::debug!("Loading configuration from {}", path.display());
            let text = fs::read_to_string(&path).map_err(|io_error| match io_error.kind() {
                io::ErrorKind::NotFound => LoadError::NotFound(path),
                _ => LoadError::Io(io_error),
            })?;
            serde_yaml::from_str(&text)?
        }
        Source::Record(record) => record,
    };

    schema
        .validate(&record)
        .map_err(LoadError::InvalidConfiguration)?;

    let file: DocumentFile = serde_json::from_value(record)?;
    Ok(DocumentConfig::try_from(file)?)
}

/// Serializes a configuration to its canonical YAML form.
///
/// The output only depends on the configuration, so serializing the same
/// configuration twice yields identical text.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn serialize(config: &DocumentConfig) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&DocumentFile::from(config))
}

/// Writes the configuration to [`CONFIG_FILE_NAME`] in `directory`,
/// replacing any existing file.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or the file
/// cannot be written.
pub fn persist(config: &DocumentConfig, directory: &Path) -> Result<(), SaveError> {
    let path = directory.join(CONFIG_FILE_NAME);
    fs::write(&path, serialize(config)?)?;
    tracing::debug!("Saved configuration to {}", path.display());
    Ok(())
}

/// Whether `directory` exists, is not empty, and holds a
/// [`CONFIG_FILE_NAME`].
#[must_use]
pub fn is_document_directory(directory: &Path) -> bool {
    let non_empty = fs::read_dir(directory).is_ok_and(|mut entries| entries.next().is_some());
    non_empty && directory.join(CONFIG_FILE_NAME).is_file()
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The directory has no configuration file.
    #[error("no configuration file found at {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file could not be read.
    #[error("failed to read the configuration file")]
    Io(#[source] io::Error),

    /// The text is not valid YAML.
    #[error("failed to parse the configuration")]
    Yaml(#[from] serde_yaml::Error),

    /// The record passed the schema but does not have the expected shape.
    #[error("the configuration record is malformed")]
    Record(#[from] serde_json::Error),

    /// The record violates the document schema.
    #[error("invalid configuration:{}", format_violations(.0))]
    InvalidConfiguration(Vec<Violation>),

    /// The record breaks an invariant of the document model.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn format_violations(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n  - {v}")).collect()
}

/// Errors that can occur when saving a configuration.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The configuration could not be serialized.
    #[error("failed to serialize the configuration")]
    Yaml(#[from] serde_yaml::Error),
    /// The configuration file could not be written.
    #[error("failed to write the configuration file")]
    Io(#[from] io::Error),
}

/// The on-disk layout of `document.yml`.
#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile {
    title: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    doc_type: Option<String>,

    #[serde(default)]
    authors: Vec<AuthorRecord>,

    #[serde(default)]
    chapters: Vec<ChapterRecord>,

    #[serde(default = "default_lang")]
    lang: String,

    copyright: Copyright,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<Vec<VersionEntry>>,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct ChapterRecord {
    title: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    part: bool,
}

impl TryFrom<DocumentFile> for DocumentConfig {
    type Error = ValidationError;

    fn try_from(file: DocumentFile) -> Result<Self, Self::Error> {
        let DocumentFile {
            title,
            doc_type,
            authors,
            chapters,
            lang,
            copyright,
            version,
        } = file;

        let authors = authors
            .into_iter()
            .map(Author::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let chapters = chapters
            .into_iter()
            .map(|chapter| Chapter::new(&chapter.title, chapter.part))
            .collect::<Result<Vec<_>, _>>()?;

        let doc_type = doc_type
            .and_then(|name| {
                name.parse::<DocumentType>()
                    .inspect_err(|e| tracing::debug!("Defaulting to 'book': {e}"))
                    .ok()
            })
            .unwrap_or_default();

        Ok(Self::new(&title, authors)?
            .with_type(doc_type)
            .with_chapters(chapters)?
            .with_lang(&lang)?
            .with_copyright(copyright)
            .with_version(version))
    }
}

impl From<&DocumentConfig> for DocumentFile {
    fn from(config: &DocumentConfig) -> Self {
        Self {
            title: config.title().to_string(),
            doc_type: Some(config.doc_type().to_string()),
            authors: config.authors().iter().map(AuthorRecord::from).collect(),
            chapters: config
                .chapters()
                .iter()
                .map(|chapter| ChapterRecord {
                    title: chapter.title().to_string(),
                    part: chapter.is_part(),
                })
                .collect(),
            lang: config.lang().to_string(),
            copyright: config.copyright().clone(),
            version: config.version().map(<[VersionEntry]>::to_vec),
        }
    }
}
