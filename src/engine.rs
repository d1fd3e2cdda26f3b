//! Conversion of rendered AsciiDoc into HTML and PDF.
//!
//! The toolbox does not convert documents itself. An [`Engine`] receives the
//! rendered markup and writes the output file; [`Asciidoctor`] does so by
//! piping the markup into the `asciidoctor` and `asciidoctor-pdf`
//! executables.

use std::{
    collections::BTreeMap,
    fmt,
    io::{self, Write},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};

/// An output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A standalone HTML page.
    Html,
    /// A PDF document.
    Pdf,
}

impl Format {
    /// The file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
        })
    }
}

/// How much the engine may touch outside the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafeMode {
    /// No restrictions.
    Unsafe,
    /// Includes are confined to the base directory.
    #[default]
    Safe,
    /// Like `Safe`, and some attributes cannot be overridden.
    Server,
    /// Includes are disabled.
    Secure,
}

impl SafeMode {
    /// The name Asciidoctor uses for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsafe => "unsafe",
            Self::Safe => "safe",
            Self::Server => "server",
            Self::Secure => "secure",
        }
    }
}

/// A single conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The output format.
    pub format: Format,
    /// Where to write the output.
    pub output: PathBuf,
    /// The directory `include::` paths are resolved against.
    pub base_dir: PathBuf,
    /// Document attributes set on the command line.
    pub attributes: BTreeMap<String, String>,
    /// The safe mode to convert in.
    pub safe_mode: SafeMode,
}

/// Converts AsciiDoc markup into an output file.
pub trait Engine {
    /// Converts `markup` as described by `conversion`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails.
    fn convert(&self, markup: &str, conversion: &Conversion) -> Result<(), EngineError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn convert(&self, markup: &str, conversion: &Conversion) -> Result<(), EngineError> {
        (**self).convert(markup, conversion)
    }
}

/// Drives the Asciidoctor command line tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asciidoctor {
    html_program: String,
    pdf_program: String,
}

impl Default for Asciidoctor {
    fn default() -> Self {
        Self {
            html_program: "asciidoctor".to_string(),
            pdf_program: "asciidoctor-pdf".to_string(),
        }
    }
}

impl Asciidoctor {
    /// Uses the given executables instead of the ones on `PATH`.
    #[must_use]
    pub fn with_programs(html_program: impl Into<String>, pdf_program: impl Into<String>) -> Self {
        Self {
            html_program: html_program.into(),
            pdf_program: pdf_program.into(),
        }
    }

    fn command(&self, conversion: &Conversion) -> Command {
        let program = match conversion.format {
            Format::Html => &self.html_program,
            Format::Pdf => &self.pdf_program,
        };

        let mut command = Command::new(program);
        if conversion.format == Format::Html {
            command.args(["--backend", "html5"]);
        }
        command
            .args(["--safe-mode", conversion.safe_mode.as_str()])
            .arg("--base-dir")
            .arg(&conversion.base_dir)
            .arg("--out-file")
            .arg(&conversion.output);
        for (name, value) in &conversion.attributes {
            command.arg("--attribute").arg(format!("{name}={value}"));
        }
        // Read the document from stdin.
        command.arg("-");
        command
    }
}

impl Engine for Asciidoctor {
    fn convert(&self, markup: &str, conversion: &Conversion) -> Result<(), EngineError> {
        let mut command = self.command(conversion);
        let program = command.get_program().to_string_lossy().into_owned();
        tracing::debug!(
            "Converting to {} with {program}: {}",
            conversion.format,
            conversion.output.display()
        );

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(markup.as_bytes()) {
                // The converter quit without reading everything; its exit
                // status and stderr tell why.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("{program} closed its input early");
                }
                result => result?,
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(EngineError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::info!("Wrote {}", conversion.output.display());
        Ok(())
    }
}

/// Errors raised by an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The converter could not be started.
    #[error("failed to run '{program}' (is it installed?)")]
    Spawn {
        /// The executable that was run.
        program: String,
        /// Why it could not be started.
        #[source]
        source: io::Error,
    },

    /// The converter ran but reported a failure.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        /// The executable that was run.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// What it printed on stderr.
        stderr: String,
    },

    /// Communicating with the converter failed.
    #[error("failed to communicate with the converter")]
    Io(#[from] io::Error),
}
