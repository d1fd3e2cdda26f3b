//! JSON Schema validation of configuration records.

use std::{fmt, path::Path};

use jsonschema::JSONSchema;
use serde_json::Value;

/// The address of the hosted document schema.
pub const SCHEMA_URL: &str =
    "https://asciidoc-publishing-toolbox.github.io/document-schema/schemas/document.schema.json";

const BUNDLED_SCHEMA: &str = include_str!("../../schemas/document.schema.json");

/// Checks a configuration record before it is turned into a
/// [`DocumentConfig`](crate::DocumentConfig).
pub trait SchemaValidator {
    /// Validates `record`, reporting every violation found.
    ///
    /// # Errors
    ///
    /// Returns the full list of violations if the record does not conform.
    fn validate(&self, record: &Value) -> Result<(), Vec<Violation>>;
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value. Empty for the root.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A compiled JSON Schema.
pub struct JsonSchema {
    compiled: JSONSchema,
}

impl JsonSchema {
    /// Compiles the schema shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled schema fails to compile.
    pub fn bundled() -> Result<Self, SchemaError> {
        Self::from_str(BUNDLED_SCHEMA)
    }

    /// Downloads and compiles a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a valid
    /// schema.
    pub fn fetch(url: &str) -> Result<Self, SchemaError> {
        tracing::debug!("Fetching schema from {url}");
        let text = reqwest::blocking::get(url)?.error_for_status()?.text()?;
        Self::from_str(&text)
    }

    /// Loads a schema from a URL (`http://` or `https://`) or a file path.
    ///
    /// # Errors
    ///
    /// See [`JsonSchema::fetch`]. Files that cannot be read are reported as
    /// [`SchemaError::Io`].
    pub fn locate(location: &str) -> Result<Self, SchemaError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::fetch(location)
        } else {
            let text = std::fs::read_to_string(Path::new(location))?;
            Self::from_str(&text)
        }
    }

    /// Compiles a schema from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a valid schema.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(text)?;
        Self::from_value(&schema)
    }

    /// Compiles a schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid schema.
    pub fn from_value(schema: &Value) -> Result<Self, SchemaError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { compiled })
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema").finish_non_exhaustive()
    }
}

impl SchemaValidator for JsonSchema {
    fn validate(&self, record: &Value) -> Result<(), Vec<Violation>> {
        self.compiled.validate(record).map_err(|errors| {
            errors
                .map(|error| Violation {
                    path: error.instance_path.to_string(),
                    message: error.to_string(),
                })
                .collect()
        })
    }
}

/// Errors raised while obtaining a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema could not be downloaded.
    #[error("failed to fetch the document schema")]
    Fetch(#[from] reqwest::Error),
    /// The schema file could not be read.
    #[error("failed to read the document schema")]
    Io(#[from] std::io::Error),
    /// The schema is not JSON.
    #[error("the document schema is not valid JSON")]
    Json(#[from] serde_json::Error),
    /// The schema is JSON but not a valid schema.
    #[error("the document schema is invalid: {0}")]
    Compile(String),
}
