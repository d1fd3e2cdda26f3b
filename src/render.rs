//! Rendering a configuration into a single AsciiDoc document.
//!
//! The rendered document carries the header, the attributes and the
//! colophon, and pulls the chapters in with `include::` directives, so the
//! chapter sources are read by the engine rather than by the renderer.

use std::{fmt, str::FromStr};

mod locale;
pub use locale::{
    LOCALE_BASE_URL, LocaleError, LocaleProvider, Offline, RemoteLocale, Strings,
    attribute_entries,
};

mod revision;

use crate::{
    domain::{Chapter, DocumentConfig, chapter_id},
    storage::SOURCE_DIR,
};

/// Where the built document is published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    /// Plain output in `out/`.
    #[default]
    Local,
    /// GitHub Pages: output in `docs/`, with the HTML served as
    /// `index.html`.
    Github,
}

impl Target {
    /// The directory, relative to the project root, that receives the
    /// output.
    #[must_use]
    pub const fn output_dir(self) -> &'static str {
        match self {
            Self::Local => "out",
            Self::Github => "docs",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Github => "github",
        })
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "github" => Ok(Self::Github),
            _ => Err(UnknownTarget(s.to_string())),
        }
    }
}

/// Error returned when a deployment target name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target '{0}' (expected 'local' or 'github')")]
pub struct UnknownTarget(String);

/// Assembles the AsciiDoc document described by a configuration.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a DocumentConfig,
    target: Target,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer for `config`, published to `target`.
    #[must_use]
    pub const fn new(config: &'a DocumentConfig, target: Target) -> Self {
        Self { config, target }
    }

    /// The name of an output file, derived from the document title.
    ///
    /// GitHub Pages serves the HTML as `index.html` instead.
    ///
    /// ```
    /// use adpt::{Author, DocumentConfig, render::{Renderer, Target}};
    ///
    /// let authors = vec![Author::new("Ada", "King").unwrap()];
    /// let config = DocumentConfig::new("My Book", authors).unwrap();
    ///
    /// let local = Renderer::new(&config, Target::Local);
    /// assert_eq!(local.file_base_name(Some("html")), "my-book.html");
    /// assert_eq!(local.file_base_name(None), "my-book");
    ///
    /// let github = Renderer::new(&config, Target::Github);
    /// assert_eq!(github.file_base_name(Some("html")), "index.html");
    /// assert_eq!(github.file_base_name(Some("pdf")), "my-book.pdf");
    /// ```
    #[must_use]
    pub fn file_base_name(&self, extension: Option<&str>) -> String {
        match (self.target, extension) {
            (Target::Github, Some("html")) => "index.html".to_string(),
            (_, Some(extension)) => format!("{}.{extension}", chapter_id(self.config.title())),
            (_, None) => chapter_id(self.config.title()),
        }
    }

    /// Renders the whole document.
    ///
    /// The locale attributes for the document language are requested from
    /// `locale` on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale attributes cannot be obtained.
    pub fn render(&self, locale: &dyn LocaleProvider) -> Result<String, LocaleError> {
        let config = self.config;
        let mut header = vec![format!("= {}", config.title())];

        if config.authors().is_empty() {
            // Without an author line the revision line would be read as one.
            header.extend(self.revision_attributes());
        } else {
            let authors: Vec<String> = config.authors().iter().map(ToString::to_string).collect();
            header.push(authors.join("; "));
            header.push(
                config
                    .current_version()
                    .map_or_else(|| revision::NO_VERSION.to_string(), ToString::to_string),
            );
        }

        header.extend([
            format!(":doctype: {}", config.doc_type()),
            ":toc: left".to_string(),
            ":sectnums:".to_string(),
            ":partnums:".to_string(),
            ":sectnumsdepth: 5".to_string(),
            ":xrefstyle: short".to_string(),
            format!(":copyright-year: {}", config.copyright().years()),
            format!(":lang: {}", config.lang()),
        ]);

        // Blank lines would end the document header early.
        let locale_attributes = locale.attributes(config.lang())?;
        header.extend(
            locale_attributes
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
        header.extend(
            Strings::for_lang(config.lang())
                .to_attributes()
                .lines()
                .map(str::to_string),
        );

        let mut blocks = vec![header.join("\n"), self.colophon()];
        blocks.extend(config.chapters().iter().map(include_directive));
        blocks.push(self.revision_history());

        Ok(blocks.join("\n\n") + "\n")
    }

    /// The colophon: copyright notice, optional copyright text, and the
    /// toolkit attribution unless it was switched off.
    #[must_use]
    pub fn colophon(&self) -> String {
        let copyright = self.config.copyright();
        let mut blocks = vec![
            "[colophon#colophon%nonfacing]\n== {doctitle}".to_string(),
            format!(
                "Copyright (c) {{copyright-year}}, {}.",
                copyright.holder.as_deref().unwrap_or("{author}")
            ),
        ];

        if let Some(text) = copyright.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                blocks.push(text.to_string());
            }
        }
        if copyright.shows_notice() {
            blocks.push("_{created-with-adpt-notice}_.".to_string());
        }

        blocks.join("\n\n")
    }

    /// The revision history appendix, or a comment if there is no history.
    #[must_use]
    pub fn revision_history(&self) -> String {
        revision::revision_history(self.config.version())
    }

    fn revision_attributes(&self) -> Vec<String> {
        let Some(current) = self.config.current_version() else {
            return vec![revision::NO_VERSION.to_string()];
        };

        let mut attributes = vec![format!(":revnumber: {}", current.number)];
        if let Some(date) = &current.date {
            attributes.push(format!(":revdate: {date}"));
        }
        if let Some(note) = &current.note {
            attributes.push(format!(":revremark: {note}"));
        }
        attributes
    }
}

/// Chapters are nested one level below the document title. Parts are not.
fn include_directive(chapter: &Chapter) -> String {
    let offset = if chapter.is_part() {
        ""
    } else {
        "leveloffset=+1"
    };
    format!("include::{SOURCE_DIR}/{}[{offset}]", chapter.file_name())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::{Author, Copyright, DocumentType, VersionEntry};

    /// Records the languages it was asked for.
    #[derive(Default)]
    struct StubLocale {
        requested: RefCell<Vec<String>>,
    }

    impl LocaleProvider for StubLocale {
        fn attributes(&self, lang: &str) -> Result<String, LocaleError> {
            self.requested.borrow_mut().push(lang.to_string());
            Ok(":appendix-caption: Appendice\n\n:toc-title: Indice\n".to_string())
        }
    }

    fn config() -> DocumentConfig {
        DocumentConfig::new(
            "A test document",
            vec![
                Author::new("Andrea", "Esposito")
                    .unwrap()
                    .with_email("email@provider.com"),
                Author::new("Ada", "King").unwrap().with_middle_name("Augusta"),
            ],
        )
        .unwrap()
        .with_chapters(vec![
            Chapter::new("Part One", true).unwrap(),
            Chapter::new("First Chapter Title", false).unwrap(),
        ])
        .unwrap()
        .with_lang("it")
        .unwrap()
        .with_copyright(Copyright::since(2020))
    }

    #[test]
    fn renders_the_document_in_order() {
        let config = config();
        let locale = StubLocale::default();

        let document = Renderer::new(&config, Target::Local).render(&locale).unwrap();

        let expected_header = "= A test document\n\
             Andrea Esposito <email@provider.com>; Ada Augusta King\n\
             // No version specified\n\
             :doctype: book\n\
             :toc: left\n\
             :sectnums:\n\
             :partnums:\n\
             :sectnumsdepth: 5\n\
             :xrefstyle: short\n\
             :copyright-year: 2020\n\
             :lang: it\n\
             :appendix-caption: Appendice\n\
             :toc-title: Indice\n\
             :revhistory-label: Storico delle revisioni\n";
        assert!(document.starts_with(expected_header), "{document}");

        let colophon = document.find("[colophon#colophon%nonfacing]").unwrap();
        let part = document.find("include::src/part-one.adoc[]").unwrap();
        let chapter = document
            .find("include::src/first-chapter-title.adoc[leveloffset=+1]")
            .unwrap();
        assert!(colophon < part && part < chapter);
        assert!(document.ends_with("// No version specified\n"));

        assert_eq!(*locale.requested.borrow(), ["it"]);
    }

    #[test]
    fn header_has_no_blank_lines() {
        let config = config();
        let document = Renderer::new(&config, Target::Local)
            .render(&StubLocale::default())
            .unwrap();

        let header = document.split("\n\n").next().unwrap();
        assert!(header.ends_with(":created-with-adpt-notice: Creato utilizzando ADPT, la Toolbox per la Pubblicazione in AsciiDoc"));
    }

    #[test]
    fn version_line_and_history_follow_the_configuration() {
        let config = config()
            .with_type(DocumentType::Article)
            .with_version(Some(vec![
                VersionEntry::new("2")
                    .with_date("2021-01-01")
                    .with_note("Second")
                    .with_author("X"),
                VersionEntry::new("1"),
            ]));

        let document = Renderer::new(&config, Target::Local)
            .render(&Offline)
            .unwrap();

        assert!(document.contains("\nv2, 2021-01-01: Second [X]\n:doctype: article\n"));
        assert!(document.contains("[appendix]\n== {revhistory-label}"));
        assert!(document.ends_with("|===\n"));
    }

    #[test]
    fn copyright_range_uses_a_double_hyphen() {
        let config = config().with_copyright(Copyright {
            to_year: Some(2022),
            ..Copyright::since(2020)
        });

        let document = Renderer::new(&config, Target::Local)
            .render(&Offline)
            .unwrap();

        assert!(document.contains("\n:copyright-year: 2020--2022\n"));
    }

    #[test]
    fn colophon_defaults() {
        let config = config();
        assert_eq!(
            Renderer::new(&config, Target::Local).colophon(),
            "[colophon#colophon%nonfacing]\n== {doctitle}\n\n\
             Copyright (c) {copyright-year}, {author}.\n\n\
             _{created-with-adpt-notice}_."
        );
    }

    #[test]
    fn colophon_with_holder_text_and_no_notice() {
        let config = config().with_copyright(Copyright {
            holder: Some("ACME".into()),
            text: Some("All rights reserved.".into()),
            adpt_notice: Some(false),
            ..Copyright::since(2020)
        });

        assert_eq!(
            Renderer::new(&config, Target::Local).colophon(),
            "[colophon#colophon%nonfacing]\n== {doctitle}\n\n\
             Copyright (c) {copyright-year}, ACME.\n\n\
             All rights reserved."
        );
    }

    #[test]
    fn documents_without_authors_carry_the_version_as_attributes() {
        let config = DocumentConfig::new("Lonely", Vec::new())
            .unwrap()
            .with_version(Some(vec![VersionEntry::new("3").with_date("2022")]));

        let document = Renderer::new(&config, Target::Local)
            .render(&Offline)
            .unwrap();

        assert!(document.starts_with("= Lonely\n:revnumber: 3\n:revdate: 2022\n:doctype: book\n"));
    }

    #[test]
    fn locale_failures_propagate() {
        struct Failing;
        impl LocaleProvider for Failing {
            fn attributes(&self, lang: &str) -> Result<String, LocaleError> {
                let source = reqwest::blocking::Client::new()
                    .get("not a url")
                    .send()
                    .unwrap_err();
                Err(LocaleError::Fetch {
                    lang: lang.to_string(),
                    source,
                })
            }
        }

        let config = config();
        assert!(Renderer::new(&config, Target::Local).render(&Failing).is_err());
    }

    #[test]
    fn targets_parse() {
        assert_eq!("github".parse::<Target>(), Ok(Target::Github));
        assert_eq!("Local".parse::<Target>(), Ok(Target::Local));
        assert!("gitlab".parse::<Target>().is_err());
        assert_eq!(Target::Github.output_dir(), "docs");
    }
}
