use std::fmt;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::{Field, ValidationError};

/// A contributor to a document.
///
/// First name and surname are required and stored trimmed. The optional
/// fields are trimmed too, and an empty value is treated as absent, so two
/// authors compare equal exactly when their [records](AuthorRecord) do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    first_name: NonEmptyString,
    surname: NonEmptyString,
    email: Option<String>,
    middle_name: Option<String>,
}

impl Author {
    /// Creates an author from a first name and a surname.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredField`] if either value is
    /// blank.
    pub fn new(first_name: &str, surname: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required(first_name, Field::FirstName)?,
            surname: required(surname, Field::Surname)?,
            email: None,
            middle_name: None,
        })
    }

    /// Sets the email address. A blank value clears it.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = optional(email);
        self
    }

    /// Sets the middle name. A blank value clears it.
    #[must_use]
    pub fn with_middle_name(mut self, middle_name: &str) -> Self {
        self.middle_name = optional(middle_name);
        self
    }

    /// Parses an author from its semicolon-delimited form.
    ///
    /// The accepted layouts are tried in order:
    ///
    /// 1. `name;middle name;surname;email`
    /// 2. `name;surname;email`
    /// 3. `name;surname`
    ///
    /// Returns `Ok(None)` when the text is blank or matches none of the
    /// layouts (for example `Name,Surname`). That is a hint that the text is
    /// a plain name, not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRequiredField`] if a layout matches
    /// but the name or surname in it is blank.
    ///
    /// ```
    /// use adpt::Author;
    ///
    /// let parsed = Author::parse("Ada;King;ada@example.com").unwrap();
    /// let expected = Author::new("Ada", "King").unwrap().with_email("ada@example.com");
    /// assert_eq!(parsed, Some(expected));
    ///
    /// assert_eq!(Author::parse("Ada King").unwrap(), None);
    /// ```
    pub fn parse(text: &str) -> Result<Option<Self>, ValidationError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        for layout in LAYOUTS {
            if let Parse::Matched(author) = layout.parse(text) {
                return author.map(Some);
            }
        }

        Ok(None)
    }

    /// The author's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// The author's surname.
    #[must_use]
    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    /// The author's email address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The author's middle name, if any.
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Converts the author into its serializable record.
    #[must_use]
    pub fn to_record(&self) -> AuthorRecord {
        AuthorRecord {
            name: self.first_name.to_string(),
            surname: self.surname.to_string(),
            email: self.email.clone(),
            middlename: self.middle_name.clone(),
        }
    }

    /// Formats the author in the four-field layout accepted by
    /// [`Author::parse`].
    ///
    /// Parsing the result yields the same author, provided the first name,
    /// middle name and surname contain no semicolons.
    #[must_use]
    pub fn to_delimited(&self) -> String {
        format!(
            "{};{};{};{}",
            self.first_name,
            self.middle_name.as_deref().unwrap_or_default(),
            self.surname,
            self.email.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for Author {
    /// Formats the author as `First [Middle] Surname [<email>]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_name)?;
        if let Some(middle_name) = &self.middle_name {
            write!(f, " {middle_name}")?;
        }
        write!(f, " {}", self.surname)?;
        if let Some(email) = &self.email {
            write!(f, " <{email}>")?;
        }
        Ok(())
    }
}

/// The serialized form of an [`Author`].
///
/// Optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// First name.
    pub name: String,
    /// Surname.
    pub surname: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Middle name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middlename: Option<String>,
}

impl TryFrom<AuthorRecord> for Author {
    type Error = ValidationError;

    fn try_from(record: AuthorRecord) -> Result<Self, Self::Error> {
        let author = Self::new(&record.name, &record.surname)?;
        Ok(author
            .with_email(record.email.as_deref().unwrap_or_default())
            .with_middle_name(record.middlename.as_deref().unwrap_or_default()))
    }
}

impl From<&Author> for AuthorRecord {
    fn from(author: &Author) -> Self {
        author.to_record()
    }
}

fn required(value: &str, field: Field) -> Result<NonEmptyString, ValidationError> {
    NonEmptyString::new(value.trim().to_string())
        .map_err(|_| ValidationError::MissingRequiredField(field))
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The delimited layouts understood by [`Author::parse`], in priority order.
const LAYOUTS: [Layout; 3] = [Layout::Full, Layout::WithEmail, Layout::NameOnly];

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// `name;middle;surname;email`
    Full,
    /// `name;surname;email`
    WithEmail,
    /// `name;surname`
    NameOnly,
}

enum Parse {
    Matched(Result<Author, ValidationError>),
    NoMatch,
}

impl Layout {
    const fn arity(self) -> usize {
        match self {
            Self::Full => 4,
            Self::WithEmail => 3,
            Self::NameOnly => 2,
        }
    }

    /// The last field absorbs any surplus delimiters.
    fn parse(self, text: &str) -> Parse {
        let fields: Vec<&str> = text.splitn(self.arity(), ';').collect();

        let author = match (self, fields.as_slice()) {
            (Self::Full, [first, middle, surname, email]) => Author::new(first, surname)
                .map(|author| author.with_middle_name(middle).with_email(email)),
            (Self::WithEmail, [first, surname, email]) => {
                Author::new(first, surname).map(|author| author.with_email(email))
            }
            (Self::NameOnly, [first, surname]) => Author::new(first, surname),
            _ => return Parse::NoMatch,
        };

        Parse::Matched(author)
    }
}
