use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use adpt::{
    Author, Copyright,
    domain::DEFAULT_LANG,
    storage::{InitOptions, Project},
};
use dialoguer::{Input, theme::ColorfulTheme};
use tracing::instrument;

use crate::cli::{parse_author, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The document title
    #[arg(long)]
    title: Option<String>,

    /// An author, as 'name;surname[;email]' or 'name;middle;surname;email'
    ///
    /// May be given more than once.
    #[arg(long = "author", value_name = "AUTHOR", value_parser = parse_author)]
    authors: Vec<Author>,

    /// The title of the first chapter
    #[arg(long)]
    chapter: Option<String>,

    /// The document language
    #[arg(long, default_value = DEFAULT_LANG)]
    lang: String,

    /// The first year covered by the copyright (defaults to this year)
    #[arg(long)]
    from_year: Option<i32>,

    /// The last year covered by the copyright
    #[arg(long)]
    to_year: Option<i32>,

    /// The copyright holder (defaults to the authors)
    #[arg(long)]
    holder: Option<String>,

    /// Initialize the document even if the directory is not empty
    #[arg(long)]
    overwrite: bool,

    /// A directory whose contents are copied into the new document
    #[arg(long, value_name = "DIR")]
    template: Option<PathBuf>,
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let interactive = io::stdin().is_terminal();
        let mut prompt = Prompt::new(interactive);

        let title = match self.title {
            Some(title) => title,
            None => prompt.required("Document title")?,
        };
        let authors = if self.authors.is_empty() {
            prompt.authors()?
        } else {
            self.authors
        };
        let first_chapter = match self.chapter {
            Some(chapter) => chapter,
            None => prompt.required("First chapter title")?,
        };

        let mut copyright = self
            .from_year
            .map_or_else(Copyright::default, Copyright::since);
        copyright.to_year = self.to_year;
        copyright.holder = self.holder;

        let options = InitOptions {
            lang: self.lang,
            copyright,
            overwrite: self.overwrite,
            template: self.template,
            ..InitOptions::new(title, authors, first_chapter)
        };

        let project = Project::new(root).init(options)?;
        let config = project.config();

        println!(
            "{}",
            format!(
                "✅ Created '{}' in {}",
                config.title(),
                project.root().display()
            )
            .success()
        );
        for chapter in config.chapters() {
            println!(
                "   {}",
                format!("src/{}", chapter.file_name()).dim()
            );
        }
        println!();
        println!("Next steps:");
        println!("  adpt chapter new \"Your Next Chapter\"");
        println!("  adpt build");

        Ok(())
    }
}

/// Asks for the values missing from the command line.
struct Prompt {
    interactive: bool,
    theme: ColorfulTheme,
}

impl Prompt {
    fn new(interactive: bool) -> Self {
        Self {
            interactive,
            theme: ColorfulTheme::default(),
        }
    }

    fn ensure_interactive(&self, what: &str) -> anyhow::Result<()> {
        if !self.interactive {
            anyhow::bail!("{what} is required (not reading from a terminal)");
        }
        Ok(())
    }

    fn required(&self, prompt: &str) -> anyhow::Result<String> {
        self.ensure_interactive(prompt)?;
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("this field cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value)
    }

    fn optional(&self, prompt: &str) -> anyhow::Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    /// Collects authors until an empty name is entered.
    ///
    /// A name in the delimited form is taken as a whole author. Otherwise the
    /// remaining fields are asked for one by one.
    fn authors(&self) -> anyhow::Result<Vec<Author>> {
        self.ensure_interactive("At least one author")?;

        let mut authors = Vec::new();
        loop {
            let ordinal = authors.len() + 1;
            let name = if authors.is_empty() {
                self.required(&format!("Author {ordinal} name"))?
            } else {
                self.optional(&format!("Author {ordinal} name (leave empty to stop)"))?
            };
            if name.trim().is_empty() {
                break;
            }

            let author = match Author::parse(&name) {
                Ok(Some(author)) => author,
                Ok(None) => {
                    let surname = self.required(&format!("Author {ordinal} surname"))?;
                    let middle_name = self.optional(&format!("Author {ordinal} middle name"))?;
                    let email = self.optional(&format!("Author {ordinal} email"))?;
                    Author::new(&name, &surname)?
                        .with_middle_name(&middle_name)
                        .with_email(&email)
                }
                Err(e) => {
                    eprintln!("{}", e.to_string().warning());
                    continue;
                }
            };

            if authors.contains(&author) {
                eprintln!("{}", format!("{author} was already added").warning());
                continue;
            }
            authors.push(author);
        }

        Ok(authors)
    }
}
