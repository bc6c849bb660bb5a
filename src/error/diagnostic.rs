//! Diagnostic formatting for better error messages
//!
//! Renders errors and lexer warnings with the surrounding source lines.

use super::{BaseError, LexWarning};
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

/// A renderable error or warning, optionally tied to the source text it came from
pub struct Diagnostic {
    severity: Severity,
    headline: String,
    line: usize,
    source: Option<String>,
    filename: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic for a fatal error
    pub fn error(error: &BaseError) -> Self {
        Self {
            severity: Severity::Error,
            headline: error.to_string(),
            line: error.line(),
            source: None,
            filename: None,
        }
    }

    /// Create a diagnostic for a lexer warning
    pub fn warning(warning: &LexWarning) -> Self {
        Self {
            severity: Severity::Warning,
            headline: warning.to_string(),
            line: warning.line,
            source: None,
            filename: None,
        }
    }

    /// Attach the source code the diagnostic refers to
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Attach the name of the file the source was loaded from
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let headline = match self.severity {
            Severity::Error => self.headline.red().bold(),
            Severity::Warning => self.headline.yellow().bold(),
        };
        output.push_str(&format!("{}\n", headline));

        let location = match self.filename {
            Some(ref filename) => format!("{}:{}", filename, self.line),
            None => format!("line {}", self.line),
        };
        output.push_str(&format!("  {} {}\n", "-->".blue().bold(), location));

        if let Some(ref source) = self.source {
            output.push_str(&self.format_source_context(source));
        }

        output
    }

    /// Format the offending line with one line of context on each side
    fn format_source_context(&self, source: &str) -> String {
        let mut output = String::new();
        let lines: Vec<&str> = source.lines().collect();

        if self.line == 0 || self.line > lines.len() {
            return output;
        }

        let line_idx = self.line - 1;
        let width = (self.line + 1).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", self.line, width = width).blue().bold(),
            lines[line_idx]
        ));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
