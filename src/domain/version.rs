use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// One entry of the document's revision history.
///
/// Numbers and dates are kept as text. Unquoted YAML numbers (`1`, `2.1`)
/// are accepted and converted on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version number.
    #[serde(deserialize_with = "scalar")]
    pub number: String,

    /// Release date.
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    /// Free-text description of the changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Who made the changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl VersionEntry {
    /// Creates an entry with only a version number.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            date: None,
            note: None,
            author: None,
        }
    }

    /// Sets the release date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl fmt::Display for VersionEntry {
    /// Formats the entry as `v<number>[, <date>][: <note>][ [<author>]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number)?;
        if let Some(date) = &self.date {
            write!(f, ", {date}")?;
        }
        if let Some(note) = &self.note {
            write!(f, ": {note}")?;
        }
        if let Some(author) = &self.author {
            write!(f, " [{author}]")?;
        }
        Ok(())
    }
}

struct ScalarVisitor;

impl de::Visitor<'_> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor).map(Self)
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(|scalar| scalar.0)
}

fn optional_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|scalar| scalar.map(|s| s.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_present_parts() {
        let entry = VersionEntry::new("1.2")
            .with_date("2021-03-04")
            .with_note("Fixes")
            .with_author("Andrea");
        assert_eq!(entry.to_string(), "v1.2, 2021-03-04: Fixes [Andrea]");
        assert_eq!(VersionEntry::new("3").to_string(), "v3");
    }

    #[test]
    fn numbers_accept_yaml_scalars() {
        let entries: Vec<VersionEntry> =
            serde_yaml::from_str("- number: 1\n- number: '2'\n  date: 2020\n- number: 2.5\n")
                .unwrap();

        assert_eq!(entries[0].number, "1");
        assert_eq!(entries[1].number, "2");
        assert_eq!(entries[1].date.as_deref(), Some("2020"));
        assert_eq!(entries[2].number, "2.5");
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let entry = VersionEntry::new("1");
        let yaml = serde_yaml::to_string(&entry).unwrap();

        assert!(!yaml.contains("date"));
        assert!(!yaml.contains("null"));
        assert_eq!(serde_yaml::from_str::<VersionEntry>(&yaml).unwrap(), entry);
    }
}
