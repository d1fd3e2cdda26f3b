use std::path::PathBuf;

use clap::ValueEnum;
use tracing::instrument;

use crate::cli::{Sources, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ChapterCommand,
}

#[derive(Debug, clap::Parser)]
enum ChapterCommand {
    /// Add a chapter and create its source file
    New {
        /// The chapter title
        title: String,

        /// Add a part rather than a chapter
        #[arg(long)]
        part: bool,
    },

    /// Rename a chapter and its source file
    Rename {
        /// The position of the chapter, starting from 1
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,

        /// The new title
        title: String,
    },

    /// List the chapters in reading order
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(skip(self, sources))]
    pub fn run(self, root: PathBuf, sources: &Sources) -> anyhow::Result<()> {
        let mut project = sources.open(root)?;

        match self.command {
            ChapterCommand::New { title, part } => {
                let path = project.add_chapter(&title, part)?;
                let kind = if part { "part" } else { "chapter" };
                println!("{}", format!("✅ Added {kind} '{}'", title.trim()).success());
                println!("   {}", path.display().to_string().dim());
            }
            ChapterCommand::Rename { index, title } => {
                let index = usize::from(index) - 1;
                let old = project
                    .config()
                    .chapters()
                    .get(index)
                    .map(|chapter| chapter.title().to_string());
                let path = project.rename_chapter(index, &title)?;
                println!(
                    "{}",
                    format!(
                        "✅ Renamed '{}' → '{}'",
                        old.unwrap_or_default(),
                        title.trim()
                    )
                    .success()
                );
                println!("   {}", path.display().to_string().dim());
            }
            ChapterCommand::List { output } => {
                let chapters = project.config().chapters();
                match output {
                    OutputFormat::Json => {
                        let records: Vec<_> = chapters
                            .iter()
                            .map(|chapter| {
                                serde_json::json!({
                                    "title": chapter.title(),
                                    "id": chapter.id(),
                                    "part": chapter.is_part(),
                                    "file": chapter.file_name(),
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    }
                    OutputFormat::Table => {
                        if chapters.is_empty() {
                            println!("No chapters yet. Add one with 'adpt chapter new'.");
                        }
                        for (position, chapter) in chapters.iter().enumerate() {
                            let title = if chapter.is_part() {
                                format!("{} {}", chapter.title(), "(part)".info())
                            } else {
                                chapter.title().to_string()
                            };
                            println!(
                                "{:>3}  {title}  {}",
                                position + 1,
                                chapter.file_name().dim()
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
