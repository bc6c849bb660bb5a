//! Command-line arguments of the `base` binary.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::lexer::LexerOptions;

/// File extensions the front end accepts, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["base", "bxml"];

/// Usage line printed when no file is given.
pub const USAGE: &str = "Usage: base <filename> [--v | --version]";

/// Arguments for the `base` command
#[derive(Debug, Parser)]
#[command(
    name = "base",
    about = "Parse a Base source file and dump its syntax tree"
)]
#[command(disable_version_flag = true)]
pub struct BaseArgs {
    /// Source file to parse (.base or .bxml)
    #[arg()]
    pub file: Option<PathBuf>,

    /// Show version
    #[arg(long = "version", alias = "v", action = ArgAction::SetTrue)]
    pub version: bool,

    /// Print the token stream before parsing
    #[arg(short = 't', long)]
    pub tokens: bool,

    /// Reject backtick template literals
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl BaseArgs {
    /// Lexer options selected by the flags
    pub fn lexer_options(&self) -> LexerOptions {
        if self.strict {
            LexerOptions::strict()
        } else {
            LexerOptions::default()
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Check a path's extension against [`ACCEPTED_EXTENSIONS`].
///
/// Returns the offending extension (with its leading dot, empty if there is
/// none) when the file is rejected.
pub fn check_extension(path: &Path) -> Result<(), String> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(&extension))
    {
        Ok(())
    } else if extension.is_empty() {
        Err(String::new())
    } else {
        Err(format!(".{}", extension))
    }
}
