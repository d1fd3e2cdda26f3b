use crate::domain::{Field, ValidationError};

/// Derives the identifier of a chapter (or document) from its title.
///
/// The identifier is the title in lower case with spaces and path
/// separators replaced by hyphens. It doubles as the name of the chapter's
/// source file, so it is always a single path component.
///
/// ```
/// assert_eq!(adpt::domain::chapter_id("First Chapter Title"), "first-chapter-title");
/// ```
#[must_use]
pub fn chapter_id(title: &str) -> String {
    title.trim().to_lowercase().replace([' ', '/', '\\'], "-")
}

/// An entry in the document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    title: String,
    part: bool,
}

impl Chapter {
    /// Creates a chapter, or a structural part if `part` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredField`] if the title is
    /// blank.
    pub fn new(title: &str, part: bool) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingRequiredField(Field::ChapterTitle));
        }
        Ok(Self {
            title: title.to_string(),
            part,
        })
    }

    /// The chapter title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether this entry is a part rather than a regular chapter.
    #[must_use]
    pub const fn is_part(&self) -> bool {
        self.part
    }

    /// The derived identifier. See [`chapter_id`].
    #[must_use]
    pub fn id(&self) -> String {
        chapter_id(&self.title)
    }

    /// The name of the AsciiDoc file backing this chapter.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.adoc", self.id())
    }
}

/// Checks that no two chapters share an identifier.
pub(crate) fn check_unique(chapters: &[Chapter]) -> Result<(), ValidationError> {
    for (i, chapter) in chapters.iter().enumerate() {
        let id = chapter.id();
        if chapters[..i].iter().any(|other| other.id() == id) {
            return Err(ValidationError::DuplicateChapterId(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("First Chapter Title", "first-chapter-title")]
    #[test_case("Introduction", "introduction")]
    #[test_case("  Padded Title ", "padded-title")]
    #[test_case("Two  Spaces", "two--spaces")]
    #[test_case("Input/Output", "input-output"; "slash")]
    #[test_case("../../escape", "..-..-escape"; "parent directories")]
    #[test_case(r"C:\\notes", "c:--notes"; "backslashes")]
    fn ids_are_lower_case_and_hyphenated(title: &str, expected: &str) {
        assert_eq!(chapter_id(title), expected);
        assert_eq!(Chapter::new(title, false).unwrap().id(), expected);
    }

    #[test]
    fn file_name_uses_the_id() {
        let chapter = Chapter::new("A Part", true).unwrap();
        assert_eq!(chapter.file_name(), "a-part.adoc");
        assert!(chapter.is_part());
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert_eq!(
            Chapter::new("  ", false),
            Err(ValidationError::MissingRequiredField(Field::ChapterTitle))
        );
    }

    #[test]
    fn titles_differing_only_in_case_collide() {
        let chapters = [
            Chapter::new("Getting Started", false).unwrap(),
            Chapter::new("getting started", true).unwrap(),
        ];
        assert_eq!(
            check_unique(&chapters),
            Err(ValidationError::DuplicateChapterId("getting-started".into()))
        );
    }
}
