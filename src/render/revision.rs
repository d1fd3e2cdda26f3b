use std::sync::LazyLock;

use regex::Regex;

use crate::domain::VersionEntry;

/// Placeholder emitted when a document has no revision history.
pub(crate) const NO_VERSION: &str = "// No version specified";

const NOT_AVAILABLE: &str = "N/A";

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("hard-coded regex is valid"));

// Quotes touching a word on the outside (apostrophes) are left alone.
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B'([^']+)'\B").expect("hard-coded regex is valid"));

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum QuoteError {
    #[error("unbalanced {0} quotes")]
    Unbalanced(char),
}

/// Rewrites `"text"` and `'text'` to AsciiDoc curved quotes.
pub(crate) fn typographic_quotes(text: &str) -> Result<String, QuoteError> {
    if text.matches('"').count() % 2 != 0 {
        return Err(QuoteError::Unbalanced('"'));
    }

    let text = DOUBLE_QUOTED.replace_all(text, "\"`$1`\"");
    let text = SINGLE_QUOTED.replace_all(&text, "'`$1`'");
    Ok(text.into_owned())
}

/// Builds the revision history appendix.
///
/// The author column only appears when at least one entry names an author.
pub(crate) fn revision_history(version: Option<&[VersionEntry]>) -> String {
    let Some(entries) = version.filter(|entries| !entries.is_empty()) else {
        return NO_VERSION.to_string();
    };

    let with_author = entries.iter().any(|entry| entry.author.is_some());

    let (cols, header) = if with_author {
        (
            "^.^,^.^2,2*^.^3",
            "| {version-label} | {revhistory-date-label} | {revhistory-description-label} | \
             {revhistory-author-label}",
        )
    } else {
        (
            "^.^,^.^2,^.^3",
            "| {version-label} | {revhistory-date-label} | {revhistory-description-label}",
        )
    };

    let rows = entries
        .iter()
        .map(|entry| row(entry, with_author))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "[appendix]\n== {{revhistory-label}}\n\n.{{revhistory-label}}\n[options=\"header\", \
         cols=\"{cols}\"]\n|===\n{header}\n{rows}\n|==="
    )
}

fn row(entry: &VersionEntry, with_author: bool) -> String {
    let note = entry.note.as_deref().map_or_else(
        || NOT_AVAILABLE.to_string(),
        |note| {
            typographic_quotes(note).map_or_else(
                |e| {
                    tracing::warn!("Note of version {} left out: {e}", entry.number);
                    NOT_AVAILABLE.to_string()
                },
                |note| cell(&note),
            )
        },
    );

    let mut row = format!(
        "| {} | {} | {note}",
        cell(&entry.number),
        entry.date.as_deref().map_or(NOT_AVAILABLE.to_string(), cell)
    );
    if with_author {
        row.push_str(" | ");
        row.push_str(&entry.author.as_deref().map_or(NOT_AVAILABLE.to_string(), cell));
    }
    row
}

/// Escapes the table cell separator.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
