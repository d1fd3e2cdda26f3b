//! Language-dependent strings.
//!
//! Asciidoctor publishes a file of translated attributes (captions, labels)
//! for each language it supports. These are fetched at render time through a
//! [`LocaleProvider`]. The few labels the toolbox adds itself live in
//! [`Strings`].

/// Where the Asciidoctor locale files are published.
pub const LOCALE_BASE_URL: &str =
    "https://raw.githubusercontent.com/asciidoctor/asciidoctor/master/data/locale";

/// Supplies the block of locale attributes for a language.
pub trait LocaleProvider {
    /// Returns the AsciiDoc attribute entries for `lang`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be obtained.
    fn attributes(&self, lang: &str) -> Result<String, LocaleError>;
}

/// Fetches locale attributes from the Asciidoctor repository on every call.
#[derive(Debug, Clone)]
pub struct RemoteLocale {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteLocale {
    /// A provider reading from [`LOCALE_BASE_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(LOCALE_BASE_URL)
    }

    /// A provider reading `attributes-<lang>.adoc` files under `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, lang: &str) -> String {
        format!("{}/attributes-{lang}.adoc", self.base_url)
    }
}

impl Default for RemoteLocale {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleProvider for RemoteLocale {
    fn attributes(&self, lang: &str) -> Result<String, LocaleError> {
        let url = self.url(lang);
        tracing::debug!("Fetching locale attributes from {url}");

        let fetch = || -> Result<String, reqwest::Error> {
            self.client.get(&url).send()?.error_for_status()?.text()
        };
        fetch().map_err(|source| LocaleError::Fetch {
            lang: lang.to_string(),
            source,
        })
    }
}

/// A provider that never fetches anything.
///
/// Asciidoctor falls back to its English defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl LocaleProvider for Offline {
    fn attributes(&self, _lang: &str) -> Result<String, LocaleError> {
        Ok(String::new())
    }
}

/// Errors raised while obtaining locale attributes.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// The locale file could not be downloaded.
    #[error("failed to fetch locale attributes for '{lang}'")]
    Fetch {
        /// The requested language.
        lang: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
}

/// Labels added by the toolbox, per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// Title of the revision history appendix.
    pub revhistory_label: &'static str,
    /// Header of the date column.
    pub date_label: &'static str,
    /// Header of the description column.
    pub description_label: &'static str,
    /// Header of the author column.
    pub author_label: &'static str,
    /// The attribution line in the colophon.
    pub created_with_notice: &'static str,
}

const EN: Strings = Strings {
    revhistory_label: "Revision History",
    date_label: "Date",
    description_label: "Description",
    author_label: "Author",
    created_with_notice: "Created using ADPT, the AsciiDoc Publishing Toolbox",
};

const IT: Strings = Strings {
    revhistory_label: "Storico delle revisioni",
    date_label: "Data",
    description_label: "Descrizione",
    author_label: "Autore",
    created_with_notice: "Creato utilizzando ADPT, la Toolbox per la Pubblicazione in AsciiDoc",
};

impl Strings {
    /// The strings for `lang`, falling back to English.
    #[must_use]
    pub fn for_lang(lang: &str) -> &'static Self {
        match lang {
            "it" => &IT,
            _ => &EN,
        }
    }

    /// The strings as `(attribute name, value)` pairs.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, &'static str); 5] {
        [
            ("revhistory-label", self.revhistory_label),
            ("revhistory-date-label", self.date_label),
            ("revhistory-description-label", self.description_label),
            ("revhistory-author-label", self.author_label),
            ("created-with-adpt-notice", self.created_with_notice),
        ]
    }

    /// The strings as AsciiDoc attribute entries.
    #[must_use]
    pub fn to_attributes(&self) -> String {
        attribute_entries(&self.entries())
    }
}

/// Formats `(name, value)` pairs as AsciiDoc attribute entries, one per
/// line.
#[must_use]
pub fn attribute_entries(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!(":{}: {}\n", name.trim(), value.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_entries_are_one_per_line() {
        assert_eq!(
            attribute_entries(&[("a", "value"), (" b ", " value ")]),
            ":a: value\n:b: value\n"
        );
    }

    #[test]
    fn unknown_languages_fall_back_to_english() {
        assert_eq!(Strings::for_lang("it").revhistory_label, "Storico delle revisioni");
        assert_eq!(Strings::for_lang("en"), Strings::for_lang("xx"));
    }

    #[test]
    fn strings_become_attributes() {
        let attributes = Strings::for_lang("en").to_attributes();
        assert!(attributes.starts_with(":revhistory-label: Revision History\n"));
        assert_eq!(attributes.lines().count(), 5);
    }

    #[test]
    fn remote_urls_are_keyed_by_language() {
        let locale = RemoteLocale::with_base_url("https://example.com/locale/");
        assert_eq!(
            locale.url("it"),
            "https://example.com/locale/attributes-it.adoc"
        );
    }

    #[test]
    fn offline_provider_is_empty() {
        assert_eq!(Offline.attributes("it").unwrap(), "");
    }
}
