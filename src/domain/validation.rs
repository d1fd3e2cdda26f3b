use std::fmt;

use crate::domain::Author;

/// A field that must hold a non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The document title.
    Title,
    /// An author's first name.
    FirstName,
    /// An author's surname.
    Surname,
    /// A chapter title.
    ChapterTitle,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::FirstName => "author name",
            Self::Surname => "author surname",
            Self::ChapterTitle => "chapter title",
        };
        f.write_str(name)
    }
}

/// A broken invariant of the document model.
///
/// These are raised before anything is mutated, so a failed operation
/// leaves the value it was called on untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("the {0} can't be empty")]
    MissingRequiredField(Field),

    /// The same author appears more than once.
    #[error("the authors list must not contain duplicates ({0} appears twice)")]
    DuplicateAuthor(Author),

    /// Two chapters share the same derived identifier.
    #[error(
        "the chapter id '{0}' is already in use (ids are the title in lower case, with spaces \
         replaced by hyphens)"
    )]
    DuplicateChapterId(String),

    /// The language code is not of the form `xx`, `xxx` or `xx-XX`.
    #[error("'{0}' is not a language code (expected something like 'en', 'it' or 'pt-br')")]
    InvalidLanguage(String),

    /// A chapter index does not refer to an existing chapter.
    #[error("chapter index {index} is out of range (the document has {len} chapters)")]
    ChapterOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of chapters in the document.
        len: usize,
    },
}
