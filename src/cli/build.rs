use std::{path::PathBuf, time::Duration};

use adpt::{
    engine::{Asciidoctor, Conversion, Engine, EngineError},
    render::Target,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;

use crate::cli::{Sources, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Where the output is published: 'local' (out/) or 'github' (docs/)
    #[arg(long, default_value_t)]
    target: Target,
}

impl Command {
    #[instrument(skip(self, sources))]
    pub fn run(self, root: PathBuf, sources: &Sources) -> anyhow::Result<()> {
        let project = sources.open(root)?;
        let locale = sources.locale();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Rendering '{}'", project.config().title()));

        let engine = ProgressEngine {
            inner: Asciidoctor::default(),
            spinner: &spinner,
        };
        let result = project.build(self.target, locale.as_ref(), &engine);
        spinner.finish_and_clear();
        let output = result?;

        println!("{}", format!("✅ Built {} document", self.target).success());
        println!("   {}", output.html.display().to_string().dim());
        println!("   {}", output.pdf.display().to_string().dim());

        Ok(())
    }
}

/// Reports each conversion on a spinner.
struct ProgressEngine<'a, E> {
    inner: E,
    spinner: &'a ProgressBar,
}

impl<E: Engine> Engine for ProgressEngine<'_, E> {
    fn convert(&self, markup: &str, conversion: &Conversion) -> Result<(), EngineError> {
        self.spinner
            .set_message(format!("Converting to {}", conversion.format));
        self.inner.convert(markup, conversion)
    }
}
