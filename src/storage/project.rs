//! A document project on disk.
//!
//! A [`Project`] wraps a directory laid out as:
//!
//! ```text
//! document.yml        the configuration
//! src/<chapter>.adoc  one source file per chapter
//! themes/             PDF themes
//! fonts/              PDF fonts
//! out/ or docs/       build output
//! ```
//!
//! Chapter operations change the configuration and the source files
//! together. They are planned first, as a [`ChapterChange`], so that a
//! change which breaks an invariant touches neither.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    domain::{Author, Chapter, Copyright, DEFAULT_LANG, DocumentConfig, ValidationError},
    engine::{Conversion, Engine, EngineError, Format, SafeMode},
    render::{LocaleError, LocaleProvider, Renderer, Target},
    storage::{
        document_file::{self, LoadError, SaveError, is_document_directory, persist},
        schema::SchemaValidator,
    },
};

/// The directory holding the chapter sources.
pub const SOURCE_DIR: &str = "src";

/// The directory holding PDF themes.
pub const THEMES_DIR: &str = "themes";

/// The directory holding PDF fonts.
pub const FONTS_DIR: &str = "fonts";

const STARTER_THEME: &str = include_str!("../../assets/themes/book-theme.yml");
const STARTER_THEME_FILE: &str = "book-theme.yml";

/// A project whose configuration has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    config: DocumentConfig,
}

/// A project that has not been opened yet.
#[derive(Debug, PartialEq, Eq)]
pub struct Unloaded;

/// A document project rooted at a directory.
#[derive(Debug)]
pub struct Project<S> {
    root: PathBuf,
    state: S,
}

impl<S> Project<S> {
    /// The project directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding the chapter sources.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }
}

/// Settings for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    /// The document title.
    pub title: String,
    /// The document authors.
    pub authors: Vec<Author>,
    /// The title of the first chapter.
    pub first_chapter: String,
    /// The language code.
    pub lang: String,
    /// The copyright block.
    pub copyright: Copyright,
    /// Whether to initialize a directory that already has files in it.
    pub overwrite: bool,
    /// A directory whose contents are copied into the project.
    pub template: Option<PathBuf>,
}

impl InitOptions {
    /// Options for an English document with a copyright starting this year.
    #[must_use]
    pub fn new(title: impl Into<String>, authors: Vec<Author>, first_chapter: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            first_chapter: first_chapter.into(),
            lang: DEFAULT_LANG.to_string(),
            copyright: Copyright::default(),
            overwrite: false,
            template: None,
        }
    }
}

impl Project<Unloaded> {
    /// Refers to the project at `root`. Nothing is read until the project
    /// is loaded or initialized.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            state: Unloaded,
        }
    }

    /// Creates a new project.
    ///
    /// The configuration is validated and the target directory checked
    /// before anything is written. Then the directory is created, the
    /// template (if any) copied in, the starter theme, the fonts directory
    /// and the first chapter written unless already present, and finally the
    /// configuration saved.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::TargetDirectoryNotEmpty`] if the directory has
    /// files in it and `overwrite` is not set, a validation error for an
    /// invalid configuration, or an I/O error.
    pub fn init(self, options: InitOptions) -> Result<Project<Loaded>, ProjectError> {
        let InitOptions {
            title,
            authors,
            first_chapter,
            lang,
            copyright,
            overwrite,
            template,
        } = options;

        check_target_directory(&self.root, overwrite)?;

        let config = DocumentConfig::new(&title, authors)?
            .with_chapters(vec![Chapter::new(&first_chapter, false)?])?
            .with_lang(&lang)?
            .with_copyright(copyright);

        fs::create_dir_all(&self.root)?;

        if let Some(template) = &template {
            let copied = copy_template(template, &self.root)?;
            tracing::debug!("Copied {copied} files from {}", template.display());
        }

        let themes_dir = self.root.join(THEMES_DIR);
        fs::create_dir_all(&themes_dir)?;
        write_if_missing(&themes_dir.join(STARTER_THEME_FILE), STARTER_THEME)?;
        fs::create_dir_all(self.root.join(FONTS_DIR))?;

        for chapter in config.chapters() {
            write_if_missing(
                &self.source_dir().join(chapter.file_name()),
                &heading(chapter),
            )?;
        }

        persist(&config, &self.root)?;
        tracing::info!("Initialized document '{}' in {}", config.title(), self.root.display());

        Ok(Project {
            root: self.root,
            state: Loaded { config },
        })
    }

    /// Loads the project configuration, validating it against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotADocumentDirectory`] if the directory holds
    /// no configuration, or the error raised while loading it.
    pub fn load(self, schema: &dyn SchemaValidator) -> Result<Project<Loaded>, ProjectError> {
        if !is_document_directory(&self.root) {
            return Err(ProjectError::NotADocumentDirectory(self.root));
        }

        let config = document_file::load(self.root.as_path(), schema)?;
        Ok(Project {
            root: self.root,
            state: Loaded { config },
        })
    }
}

/// A change to the chapter list, with the matching change to the source
/// files.
///
/// Built by [`Project::plan_add_chapter`] or
/// [`Project::plan_rename_chapter`], and carried out by [`Project::apply`].
/// A change only applies to the configuration it was planned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterChange {
    base: DocumentConfig,
    config: DocumentConfig,
    file: FileChange,
}

impl ChapterChange {
    /// The configuration after the change.
    #[must_use]
    pub const fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// What happens to the source files.
    #[must_use]
    pub const fn file(&self) -> &FileChange {
        &self.file
    }
}

/// What a [`ChapterChange`] does to the source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// Write a new source file, unless one already exists.
    Create {
        /// The new file.
        path: PathBuf,
        /// Its initial content.
        content: String,
    },
    /// Move a source file.
    Rename {
        /// The current file.
        from: PathBuf,
        /// The new file.
        to: PathBuf,
    },
    /// The source file keeps its name.
    Unchanged(PathBuf),
}

/// The files written by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// The HTML page.
    pub html: PathBuf,
    /// The PDF document.
    pub pdf: PathBuf,
}

impl Project<Loaded> {
    /// The project configuration.
    #[must_use]
    pub const fn config(&self) -> &DocumentConfig {
        &self.state.config
    }

    /// Adds a chapter and creates its source file with a heading.
    ///
    /// Returns the path of the source file.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving files and configuration
    /// untouched, if the title is blank or collides with another chapter.
    /// I/O failures are returned as they happen; a source file written before
    /// a failing save is not removed.
    pub fn add_chapter(&mut self, title: &str, is_part: bool) -> Result<PathBuf, ProjectError> {
        let change = self.plan_add_chapter(title, is_part)?;
        self.apply(change)
    }

    /// Renames the chapter at `index` and its source file.
    ///
    /// Returns the path of the source file.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving files and configuration
    /// untouched, if the index is out of range or the new title is blank or
    /// collides with another chapter. See also [`Project::apply`].
    pub fn rename_chapter(
        &mut self,
        index: usize,
        new_title: &str,
    ) -> Result<PathBuf, ProjectError> {
        let change = self.plan_rename_chapter(index, new_title)?;
        self.apply(change)
    }

    /// Plans adding a chapter, without touching anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the chapter cannot be added to the configuration.
    pub fn plan_add_chapter(
        &self,
        title: &str,
        is_part: bool,
    ) -> Result<ChapterChange, ValidationError> {
        let mut config = self.state.config.clone();
        let chapter = config.add_chapter(title, is_part)?;

        let file = FileChange::Create {
            path: self.source_dir().join(chapter.file_name()),
            content: heading(chapter),
        };
        Ok(ChapterChange {
            base: self.state.config.clone(),
            config,
            file,
        })
    }

    /// Plans renaming a chapter, without touching anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the chapter cannot be renamed in the
    /// configuration.
    pub fn plan_rename_chapter(
        &self,
        index: usize,
        new_title: &str,
    ) -> Result<ChapterChange, ValidationError> {
        let mut config = self.state.config.clone();
        config.rename_chapter(index, new_title)?;

        let from = self
            .source_dir()
            .join(self.state.config.chapters()[index].file_name());
        let to = self.source_dir().join(config.chapters()[index].file_name());

        let file = if from == to {
            FileChange::Unchanged(to)
        } else {
            FileChange::Rename { from, to }
        };
        Ok(ChapterChange {
            base: self.state.config.clone(),
            config,
            file,
        })
    }

    /// Carries out a planned change: first the source file, then the
    /// configuration.
    ///
    /// A missing source file is not an error when renaming; the rename is
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::StaleChange`] if the configuration changed
    /// since the change was planned, [`ProjectError::SourceExists`] if a
    /// rename would overwrite an existing file, or an I/O error. The
    /// configuration is only saved (and updated in memory) once the file
    /// change succeeded.
    pub fn apply(&mut self, change: ChapterChange) -> Result<PathBuf, ProjectError> {
        let ChapterChange { base, config, file } = change;
        if base != self.state.config {
            return Err(ProjectError::StaleChange);
        }

        let path = match file {
            FileChange::Create { path, content } => {
                if !write_if_missing(&path, &content)? {
                    tracing::info!("Keeping existing source file {}", path.display());
                }
                path
            }
            FileChange::Rename { from, to } => {
                if to.exists() {
                    return Err(ProjectError::SourceExists(to));
                }
                if from.exists() {
                    fs::rename(&from, &to)?;
                    tracing::info!("Renamed {} to {}", from.display(), to.display());
                } else {
                    tracing::warn!("Source file {} not found, nothing to rename", from.display());
                }
                to
            }
            FileChange::Unchanged(path) => path,
        };

        persist(&config, &self.root)?;
        self.state.config = config;
        Ok(path)
    }

    /// Renders the document for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale attributes cannot be obtained.
    pub fn render(&self, target: Target, locale: &dyn LocaleProvider) -> Result<String, ProjectError> {
        Ok(Renderer::new(&self.state.config, target).render(locale)?)
    }

    /// Renders the document and converts it to HTML, then PDF.
    ///
    /// Output goes to `out/`, or `docs/` for [`Target::Github`].
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, the output directory cannot be
    /// created, or the engine fails.
    pub fn build(
        &self,
        target: Target,
        locale: &dyn LocaleProvider,
        engine: &dyn Engine,
    ) -> Result<BuildOutput, ProjectError> {
        let renderer = Renderer::new(&self.state.config, target);
        let markup = renderer.render(locale)?;

        let out_dir = self.root.join(target.output_dir());
        fs::create_dir_all(&out_dir)?;

        let html = out_dir.join(renderer.file_base_name(Some(Format::Html.extension())));
        engine.convert(&markup, &self.conversion(Format::Html, html.clone()))?;

        let pdf = out_dir.join(renderer.file_base_name(Some(Format::Pdf.extension())));
        engine.convert(&markup, &self.conversion(Format::Pdf, pdf.clone()))?;

        Ok(BuildOutput { html, pdf })
    }

    fn conversion(&self, format: Format, output: PathBuf) -> Conversion {
        let attributes = match format {
            Format::Html => BTreeMap::new(),
            Format::Pdf => BTreeMap::from([
                ("pdf-theme".to_string(), "book".to_string()),
                (
                    "pdf-themesdir".to_string(),
                    self.root.join(THEMES_DIR).display().to_string(),
                ),
                (
                    "pdf-fontsdir".to_string(),
                    format!("{};GEM_FONTS_DIR", self.root.join(FONTS_DIR).display()),
                ),
                ("media".to_string(), "prepress".to_string()),
            ]),
        };

        Conversion {
            format,
            output,
            base_dir: self.root.clone(),
            attributes,
            safe_mode: SafeMode::Safe,
        }
    }
}

/// The initial content of a chapter source file.
fn heading(chapter: &Chapter) -> String {
    format!("= {}\n", chapter.title())
}

fn check_target_directory(root: &Path, overwrite: bool) -> Result<(), ProjectError> {
    let non_empty = fs::read_dir(root).is_ok_and(|mut entries| entries.next().is_some());
    if non_empty && !overwrite {
        return Err(ProjectError::TargetDirectoryNotEmpty(root.to_path_buf()));
    }
    Ok(())
}

/// Returns whether the file was written.
fn write_if_missing(path: &Path, content: &str) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

fn copy_template(template: &Path, root: &Path) -> Result<usize, ProjectError> {
    let mut copied = 0;
    for entry in WalkDir::new(template).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(template) else {
            continue;
        };
        let target = root.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Errors that can occur when working with a project.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The directory holds no document configuration.
    #[error("{} is not a document directory (no {} found)", .0.display(), document_file::CONFIG_FILE_NAME)]
    NotADocumentDirectory(PathBuf),

    /// A new project was requested in a directory that has files in it.
    #[error("the directory {} exists and is not empty", .0.display())]
    TargetDirectoryNotEmpty(PathBuf),

    /// A rename would overwrite an existing source file.
    #[error("the source file {} already exists", .0.display())]
    SourceExists(PathBuf),

    /// A planned chapter change no longer matches the configuration.
    #[error("the chapter list changed after this change was planned")]
    StaleChange,

    /// The configuration would break an invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration could not be saved.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// The locale attributes could not be obtained.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// The document could not be converted.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A file operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        domain::VersionEntry,
        render::Offline,
        storage::{CONFIG_FILE_NAME, JsonSchema},
    };

    fn options() -> InitOptions {
        let mut options = InitOptions::new(
            "A test document",
            vec![
                Author::new("Andrea", "Esposito")
                    .unwrap()
                    .with_email("email@provider.com"),
            ],
            "First Chapter Title",
        );
        options.copyright = Copyright::since(2020);
        options
    }

    fn setup_temp_project() -> (TempDir, Project<Loaded>) {
        let tmp = tempfile::tempdir().unwrap();
        let project = Project::new(tmp.path().join("doc")).init(options()).unwrap();
        (tmp, project)
    }

    fn reload(project: &Project<Loaded>) -> DocumentConfig {
        Project::new(project.root().to_path_buf())
            .load(&JsonSchema::bundled().unwrap())
            .unwrap()
            .state
            .config
    }

    /// Records conversions instead of running them.
    #[derive(Default)]
    struct RecordingEngine {
        conversions: RefCell<Vec<(String, Conversion)>>,
    }

    impl Engine for RecordingEngine {
        fn convert(&self, markup: &str, conversion: &Conversion) -> Result<(), EngineError> {
            self.conversions
                .borrow_mut()
                .push((markup.to_string(), conversion.clone()));
            Ok(())
        }
    }

    #[test]
    fn init_lays_out_the_project() {
        let (_tmp, project) = setup_temp_project();
        let root = project.root();

        assert!(root.join(CONFIG_FILE_NAME).is_file());
        assert!(root.join("themes/book-theme.yml").is_file());
        assert!(root.join("fonts").is_dir());
        assert_eq!(
            fs::read_to_string(root.join("src/first-chapter-title.adoc")).unwrap(),
            "= First Chapter Title\n"
        );
        assert_eq!(reload(&project), *project.config());
    }

    #[test]
    fn init_refuses_a_non_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.txt"), "keep me").unwrap();

        let error = Project::new(tmp.path().to_path_buf())
            .init(options())
            .unwrap_err();

        assert!(matches!(error, ProjectError::TargetDirectoryNotEmpty(_)));
        assert!(!tmp.path().join(CONFIG_FILE_NAME).exists());
        assert!(!tmp.path().join(SOURCE_DIR).exists());
    }

    #[test]
    fn init_with_overwrite_keeps_existing_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src/first-chapter-title.adoc");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "= Already written\n").unwrap();

        let mut options = options();
        options.overwrite = true;
        Project::new(tmp.path().to_path_buf()).init(options).unwrap();

        assert_eq!(fs::read_to_string(&source).unwrap(), "= Already written\n");
        assert!(is_document_directory(tmp.path()));
    }

    #[test]
    fn init_validates_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("doc");
        let mut options = options();
        options.title = "  ".to_string();

        let error = Project::new(root.clone()).init(options).unwrap_err();

        assert!(matches!(error, ProjectError::Validation(_)));
        assert!(!root.exists());
    }

    #[test]
    fn init_copies_the_template() {
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("template");
        fs::create_dir_all(template.join("themes")).unwrap();
        fs::write(template.join("themes/book-theme.yml"), "extends: base\n").unwrap();
        fs::write(template.join("README.adoc"), "= Readme\n").unwrap();

        let mut options = options();
        options.template = Some(template);
        let project = Project::new(tmp.path().join("doc")).init(options).unwrap();

        let root = project.root();
        assert_eq!(
            fs::read_to_string(root.join("themes/book-theme.yml")).unwrap(),
            "extends: base\n"
        );
        assert!(root.join("README.adoc").is_file());
    }

    #[test]
    fn load_requires_a_document_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Project::new(tmp.path().to_path_buf())
            .load(&JsonSchema::bundled().unwrap())
            .unwrap_err();

        assert!(matches!(error, ProjectError::NotADocumentDirectory(_)));
    }

    #[test]
    fn add_chapter_writes_source_and_configuration() {
        let (_tmp, mut project) = setup_temp_project();

        let path = project.add_chapter("Second Chapter", false).unwrap();

        assert_eq!(path, project.source_dir().join("second-chapter.adoc"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "= Second Chapter\n");
        assert_eq!(project.config().chapters().len(), 2);
        assert_eq!(reload(&project), *project.config());
    }

    #[test]
    fn add_duplicate_chapter_touches_nothing() {
        let (_tmp, mut project) = setup_temp_project();
        let before = fs::read(project.root().join(CONFIG_FILE_NAME)).unwrap();

        let error = project.add_chapter("first chapter title", true).unwrap_err();

        assert!(matches!(
            error,
            ProjectError::Validation(ValidationError::DuplicateChapterId(_))
        ));
        assert_eq!(project.config().chapters().len(), 1);
        assert_eq!(
            fs::read(project.root().join(CONFIG_FILE_NAME)).unwrap(),
            before
        );
        assert_eq!(fs::read_dir(project.source_dir()).unwrap().count(), 1);
    }

    #[test]
    fn rename_chapter_moves_the_source_file() {
        let (_tmp, mut project) = setup_temp_project();
        let old = project.source_dir().join("first-chapter-title.adoc");

        let path = project.rename_chapter(0, "Introduction").unwrap();

        assert_eq!(path, project.source_dir().join("introduction.adoc"));
        assert!(path.is_file());
        assert!(!old.exists());
        assert_eq!(reload(&project).chapters()[0].title(), "Introduction");
    }

    #[test]
    fn failed_rename_touches_nothing() {
        let (_tmp, mut project) = setup_temp_project();
        project.add_chapter("Second", false).unwrap();

        let error = project.rename_chapter(1, "First Chapter Title").unwrap_err();

        assert!(matches!(
            error,
            ProjectError::Validation(ValidationError::DuplicateChapterId(_))
        ));
        assert!(project.source_dir().join("second.adoc").is_file());
        assert_eq!(reload(&project).chapters()[1].title(), "Second");
    }

    #[test]
    fn rename_never_overwrites_a_source_file() {
        let (_tmp, mut project) = setup_temp_project();
        let stray = project.source_dir().join("appendix.adoc");
        fs::write(&stray, "= Something else\n").unwrap();

        let error = project.rename_chapter(0, "Appendix").unwrap_err();

        assert!(matches!(error, ProjectError::SourceExists(_)));
        assert_eq!(fs::read_to_string(&stray).unwrap(), "= Something else\n");
        assert_eq!(project.config().chapters()[0].title(), "First Chapter Title");
    }

    #[test]
    fn rename_without_source_file_still_updates_configuration() {
        let (_tmp, mut project) = setup_temp_project();
        fs::remove_file(project.source_dir().join("first-chapter-title.adoc")).unwrap();

        project.rename_chapter(0, "Preface").unwrap();

        assert_eq!(reload(&project).chapters()[0].title(), "Preface");
    }

    #[test]
    fn case_only_rename_keeps_the_file() {
        let (_tmp, project) = setup_temp_project();

        let change = project.plan_rename_chapter(0, "first chapter title").unwrap();

        assert_eq!(
            change.file(),
            &FileChange::Unchanged(project.source_dir().join("first-chapter-title.adoc"))
        );
    }

    #[test]
    fn a_change_planned_from_an_older_configuration_is_refused() {
        let (_tmp, mut project) = setup_temp_project();
        let second = project.plan_add_chapter("Second", false).unwrap();
        let third = project.plan_add_chapter("Third", false).unwrap();

        project.apply(second).unwrap();
        let error = project.apply(third).unwrap_err();

        assert!(matches!(error, ProjectError::StaleChange));
        assert!(!project.source_dir().join("third.adoc").exists());
        let titles: Vec<_> = reload(&project)
            .chapters()
            .iter()
            .map(|chapter| chapter.title().to_string())
            .collect();
        assert_eq!(titles, ["First Chapter Title", "Second"]);
    }

    #[test]
    fn init_with_another_language_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut options = options();
        options.lang = "pt-BR".to_string();

        let project = Project::new(tmp.path().join("doc")).init(options).unwrap();

        assert_eq!(project.config().lang(), "pt-br");
        assert_eq!(reload(&project), *project.config());
    }

    #[test]
    fn init_rejects_a_language_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("doc");
        let mut options = options();
        options.lang = "english".to_string();

        let error = Project::new(root.clone()).init(options).unwrap_err();

        assert!(matches!(
            error,
            ProjectError::Validation(ValidationError::InvalidLanguage(_))
        ));
        assert!(!root.exists());
    }

    #[test]
    fn chapter_titles_cannot_escape_the_source_directory() {
        let (tmp, mut project) = setup_temp_project();

        let path = project.add_chapter("../../escape", false).unwrap();

        assert_eq!(path.parent().unwrap(), project.source_dir());
        assert!(path.is_file());
        assert!(!tmp.path().join("escape.adoc").exists());
    }

    #[test]
    fn build_converts_html_then_pdf() {
        let (_tmp, project) = setup_temp_project();
        let engine = RecordingEngine::default();

        let output = project.build(Target::Local, &Offline, &engine).unwrap();

        let out = project.root().join("out");
        assert_eq!(output.html, out.join("a-test-document.html"));
        assert_eq!(output.pdf, out.join("a-test-document.pdf"));
        assert!(out.is_dir());

        let conversions = engine.conversions.borrow();
        assert_eq!(conversions.len(), 2);
        let (markup, html) = &conversions[0];
        let (_, pdf) = &conversions[1];

        assert!(markup.starts_with("= A test document\n"));
        assert_eq!(html.format, Format::Html);
        assert!(html.attributes.is_empty());
        assert_eq!(html.base_dir, project.root());
        assert_eq!(pdf.format, Format::Pdf);
        assert_eq!(pdf.attributes["pdf-theme"], "book");
        assert_eq!(pdf.attributes["media"], "prepress");
        assert_eq!(
            pdf.attributes["pdf-themesdir"],
            project.root().join("themes").display().to_string()
        );
        assert_eq!(pdf.safe_mode, SafeMode::Safe);
    }

    #[test]
    fn github_builds_go_to_docs_with_an_index_page() {
        let (_tmp, mut project) = setup_temp_project();
        project.state.config = project
            .config()
            .clone()
            .with_version(Some(vec![VersionEntry::new("1")]));
        let engine = RecordingEngine::default();

        let output = project.build(Target::Github, &Offline, &engine).unwrap();

        let docs = project.root().join("docs");
        assert_eq!(output.html, docs.join("index.html"));
        assert_eq!(output.pdf, docs.join("a-test-document.pdf"));
        assert!(engine.conversions.borrow()[0].0.contains("[appendix]"));
    }
}
