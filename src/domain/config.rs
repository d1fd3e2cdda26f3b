use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::domain::{
    Author, Chapter, Copyright, Field, ValidationError, VersionEntry, chapter::check_unique,
};

/// The kind of document being written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentType {
    /// A book, with parts and chapters.
    #[default]
    Book,
    /// A single article.
    Article,
}

impl DocumentType {
    /// The name used in the configuration file and the `doctype` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Article => "article",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "article" => Ok(Self::Article),
            _ => Err(UnknownDocumentType(s.to_string())),
        }
    }
}

/// Error returned when a document type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type '{0}' (expected 'book' or 'article')")]
pub struct UnknownDocumentType(String);

/// The language used when none is given.
pub const DEFAULT_LANG: &str = "en";

// Matches the `lang` pattern of the document schema, after lower-casing.
static LANG_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}([-_][a-z0-9]+)*$").expect("hard-coded regex is valid")
});

/// The settings of a document project.
///
/// This is the aggregate root of the document model. It owns its authors,
/// chapters and revision history, and every constructor and mutator checks
/// that:
///
/// - the title is not blank,
/// - no author appears twice,
/// - no two chapters derive the same identifier.
///
/// Mutators that fail leave the configuration as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    title: String,
    authors: Vec<Author>,
    doc_type: DocumentType,
    chapters: Vec<Chapter>,
    lang: String,
    copyright: Copyright,
    version: Option<Vec<VersionEntry>>,
}

impl DocumentConfig {
    /// Creates a configuration for a book in English, with no chapters, no
    /// revision history and a copyright starting this year.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or the authors contain
    /// duplicates.
    pub fn new(title: &str, authors: Vec<Author>) -> Result<Self, ValidationError> {
        check_authors(&authors)?;
        Ok(Self {
            title: check_title(title)?,
            authors,
            doc_type: DocumentType::default(),
            chapters: Vec::new(),
            lang: DEFAULT_LANG.to_string(),
            copyright: Copyright::default(),
            version: None,
        })
    }

    /// Sets the document type.
    #[must_use]
    pub const fn with_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// Replaces the chapter list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateChapterId`] if two chapters derive
    /// the same identifier.
    pub fn with_chapters(mut self, chapters: Vec<Chapter>) -> Result<Self, ValidationError> {
        check_unique(&chapters)?;
        self.chapters = chapters;
        Ok(self)
    }

    /// Sets the language code. It is trimmed and lower-cased, and a blank
    /// code falls back to [`DEFAULT_LANG`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLanguage`] unless the code is two or
    /// three letters, optionally followed by `-` or `_` separated subtags.
    pub fn with_lang(mut self, lang: &str) -> Result<Self, ValidationError> {
        let lang = lang.trim().to_lowercase();
        if lang.is_empty() {
            self.lang = DEFAULT_LANG.to_string();
        } else if LANG_CODE.is_match(&lang) {
            self.lang = lang;
        } else {
            return Err(ValidationError::InvalidLanguage(lang));
        }
        Ok(self)
    }

    /// Sets the copyright block.
    #[must_use]
    pub fn with_copyright(mut self, copyright: Copyright) -> Self {
        self.copyright = copyright;
        self
    }

    /// Sets the revision history, most recent version first.
    #[must_use]
    pub fn with_version(mut self, version: Option<Vec<VersionEntry>>) -> Self {
        self.version = version;
        self
    }

    /// The document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The document authors, in order.
    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// The document type.
    #[must_use]
    pub const fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    /// The chapters, in reading order.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// The language code.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// The copyright block.
    #[must_use]
    pub const fn copyright(&self) -> &Copyright {
        &self.copyright
    }

    /// The revision history, if one was given.
    #[must_use]
    pub fn version(&self) -> Option<&[VersionEntry]> {
        self.version.as_deref()
    }

    /// The current version: the first entry of the revision history.
    #[must_use]
    pub fn current_version(&self) -> Option<&VersionEntry> {
        self.version.as_ref().and_then(|version| version.first())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredField`] if the title is
    /// blank.
    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = check_title(title)?;
        Ok(())
    }

    /// Replaces the authors.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateAuthor`] if the list contains
    /// duplicates.
    pub fn set_authors(&mut self, authors: Vec<Author>) -> Result<(), ValidationError> {
        check_authors(&authors)?;
        self.authors = authors;
        Ok(())
    }

    /// Whether the configuration can describe a publishable document: it
    /// needs a title and at least one author.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.authors.is_empty()
    }

    /// Appends a chapter (or a part, if `is_part` is set).
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or its identifier is already
    /// used by another chapter. The chapter list is unchanged in that case.
    pub fn add_chapter(&mut self, title: &str, is_part: bool) -> Result<&Chapter, ValidationError> {
        let chapter = Chapter::new(title, is_part)?;
        let id = chapter.id();
        if self.chapters.iter().any(|existing| existing.id() == id) {
            return Err(ValidationError::DuplicateChapterId(id));
        }

        self.chapters.push(chapter);
        Ok(&self.chapters[self.chapters.len() - 1])
    }

    /// Changes the title of the chapter at `index`, keeping its part flag.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range, the title is blank, or
    /// the new identifier collides with another chapter. The chapter list is
    /// unchanged in that case.
    pub fn rename_chapter(&mut self, index: usize, new_title: &str) -> Result<(), ValidationError> {
        let len = self.chapters.len();
        let existing = self
            .chapters
            .get(index)
            .ok_or(ValidationError::ChapterOutOfRange { index, len })?;

        let mut chapters = self.chapters.clone();
        chapters[index] = Chapter::new(new_title, existing.is_part())?;
        check_unique(&chapters)?;

        self.chapters = chapters;
        Ok(())
    }
}

fn check_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingRequiredField(Field::Title));
    }
    Ok(title.to_string())
}

fn check_authors(authors: &[Author]) -> Result<(), ValidationError> {
    for (i, author) in authors.iter().enumerate() {
        if authors[..i].contains(author) {
            return Err(ValidationError::DuplicateAuthor(author.clone()));
        }
    }
    Ok(())
}
