use std::path::PathBuf;

use adpt::{
    Author,
    render::{LocaleProvider, Offline, RemoteLocale},
    storage::{JsonSchema, Loaded, Project, ProjectError, SCHEMA_URL, is_document_directory},
};
use anyhow::Context;
use clap::ArgAction;

mod build;
mod chapter;
mod check;
mod init;
mod terminal;

/// Parse an author from its delimited form.
///
/// Accepts `name;surname`, `name;surname;email` and
/// `name;middle;surname;email`.
fn parse_author(s: &str) -> Result<Author, String> {
    Author::parse(s)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("expected 'name;surname[;email]', got '{s}'"))
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the document directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(flatten)]
    sources: Sources,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.root, &self.sources)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Where the document schema and the locale attributes come from.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Sources {
    /// Work without network access: validate against the bundled schema and
    /// skip the locale attributes
    #[arg(long, global = true)]
    offline: bool,

    /// The document schema to validate against (URL or file path)
    #[arg(long, value_name = "URL|PATH", global = true)]
    schema: Option<String>,
}

impl Sources {
    fn schema(&self) -> anyhow::Result<JsonSchema> {
        let schema = match (&self.schema, self.offline) {
            (Some(location), _) => JsonSchema::locate(location),
            (None, true) => JsonSchema::bundled(),
            (None, false) => JsonSchema::fetch(SCHEMA_URL),
        };
        schema.context("failed to load the document schema")
    }

    fn locale(&self) -> Box<dyn LocaleProvider> {
        if self.offline {
            Box::new(Offline)
        } else {
            Box::new(RemoteLocale::new())
        }
    }

    /// Loads the project at `root`, validating its configuration.
    fn open(&self, root: PathBuf) -> anyhow::Result<Project<Loaded>> {
        if !is_document_directory(&root) {
            return Err(ProjectError::NotADocumentDirectory(root).into());
        }

        let schema = self.schema()?;
        Ok(Project::new(root).load(&schema)?)
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Create a new document
    ///
    /// Values not given on the command line are asked for interactively.
    Init(init::Command),

    /// Build the HTML and PDF outputs
    Build(build::Command),

    /// Add, rename or list chapters
    Chapter(chapter::Command),

    /// Validate the document configuration
    Check(check::Command),
}

impl Command {
    fn run(self, root: PathBuf, sources: &Sources) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run(root)?,
            Self::Build(command) => command.run(root, sources)?,
            Self::Chapter(command) => command.run(root, sources)?,
            Self::Check(command) => command.run(root, sources)?,
        }
        Ok(())
    }
}
