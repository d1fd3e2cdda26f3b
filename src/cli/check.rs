use std::path::PathBuf;

use tracing::instrument;

use crate::cli::{Sources, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument(skip(self, sources))]
    pub fn run(self, root: PathBuf, sources: &Sources) -> anyhow::Result<()> {
        let project = sources.open(root)?;
        let config = project.config();

        if !config.is_valid() {
            anyhow::bail!("'{}' has no authors", config.title());
        }

        println!(
            "{}",
            format!("✅ '{}' is a valid document", config.title()).success()
        );
        println!(
            "   {}",
            format!(
                "{} authors, {} chapters, language '{}'",
                config.authors().len(),
                config.chapters().len(),
                config.lang()
            )
            .dim()
        );
        if let Some(version) = config.current_version() {
            println!("   {}", version.to_string().dim());
        }

        Ok(())
    }
}
