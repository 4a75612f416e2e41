//! Diagnostic reporting with source excerpts.
//!
//! A [`Diagnostic`] carries a level, an optional error-kind code, a message
//! and an optional span. The [`Emitter`] renders it as
//!
//! ```text
//! student.xn:4:20: error[TypeError]: field initializer for 'id' ...
//!    4 |     var id: int = "hello";
//!      |                   ^^^^^^^
//! ```

use crate::span::Span;
use std::fmt;
use std::fmt::Write as _;

/// A diagnostic message (error, warning, note, or help).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic level
    pub level: DiagnosticLevel,
    /// Error kind shown in brackets (e.g. `TypeError`)
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Source span, absent for errors with no source location
    pub span: Option<Span>,
    /// Related notes
    pub notes: Vec<DiagnosticNote>,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Error: execution cannot continue
    Error,
    /// Warning: suspicious but not fatal
    Warning,
    /// Note: additional information
    Note,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
        }
    }
}

impl DiagnosticLevel {
    /// Returns the ANSI color code for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",   // Red
            Self::Warning => "\x1b[33m", // Yellow
            Self::Note => "\x1b[36m",    // Cyan
        }
    }

    /// Returns the reset ANSI code.
    #[must_use]
    pub const fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Formats this level with colors if enabled.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}{}", self.color_code(), self, Self::reset_code())
        } else {
            format!("{self}")
        }
    }
}

/// A note attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticNote {
    /// Note message
    pub message: String,
    /// Source span
    pub span: Span,
}

/// Builder for creating diagnostics.
///
/// ```
/// use xenon_syntax::diagnostic::{DiagnosticBuilder, DiagnosticLevel};
/// use xenon_syntax::span::Span;
///
/// let diagnostic = DiagnosticBuilder::new(DiagnosticLevel::Error, "unresolved identifier 'x'")
///     .code("NameError")
///     .span(Span::new(6, 7, 1, 7, 1, 8))
///     .build();
///
/// assert_eq!(diagnostic.code.as_deref(), Some("NameError"));
/// ```
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                code: None,
                message: message.into(),
                span: None,
                notes: Vec::new(),
            },
        }
    }

    /// Sets the error kind shown after the level.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.diagnostic.code = Some(code.into());
        self
    }

    /// Points the diagnostic at a source span.
    #[must_use]
    pub const fn span(mut self, span: Span) -> Self {
        self.diagnostic.span = Some(span);
        self
    }

    /// Adds a note to the diagnostic.
    #[must_use]
    pub fn note(mut self, message: impl Into<String>, span: Span) -> Self {
        self.diagnostic.notes.push(DiagnosticNote {
            message: message.into(),
            span,
        });
        self
    }

    /// Builds the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Emitter for diagnostics.
///
/// Formats diagnostics with source highlighting; [`Emitter::emit`] writes
/// them to stderr.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    /// File name printed in front of locations
    filename: Option<String>,
    /// Use colors in output
    use_colors: bool,
}

impl Emitter {
    /// Creates a new diagnostic emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self {
            filename: None,
            use_colors,
        }
    }

    /// Prefixes every location with `filename`.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Writes a diagnostic to stderr.
    pub fn emit(&self, diagnostic: &Diagnostic, source: &str) {
        eprint!("{}", self.render(diagnostic, source));
    }

    /// Renders a diagnostic with its source excerpt.
    ///
    /// ```
    /// use xenon_syntax::diagnostic::{DiagnosticBuilder, DiagnosticLevel, Emitter};
    /// use xenon_syntax::span::Span;
    ///
    /// let diagnostic = DiagnosticBuilder::new(DiagnosticLevel::Error, "division by zero")
    ///     .code("RuntimeError")
    ///     .build();
    ///
    /// let text = Emitter::new(false).render(&diagnostic, "");
    /// assert_eq!(text, "error[RuntimeError]: division by zero\n");
    /// ```
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut out = String::new();

        if let Some(span) = diagnostic.span {
            if let Some(file) = &self.filename {
                let _ = write!(out, "{file}:");
            }
            let _ = write!(out, "{}:{}: ", span.start_line, span.start_col);
        } else if let Some(file) = &self.filename {
            let _ = write!(out, "{file}: ");
        }

        out.push_str(&diagnostic.level.format_colored(self.use_colors));
        if let Some(code) = &diagnostic.code {
            let _ = write!(out, "[{code}]");
        }
        let _ = writeln!(out, ": {}", diagnostic.message);

        if let Some(span) = diagnostic.span {
            self.render_source_highlight(&mut out, diagnostic.level, span, source);
        }

        for note in &diagnostic.notes {
            let note_prefix = DiagnosticLevel::Note.format_colored(self.use_colors);
            let _ = writeln!(
                out,
                "     = {} at {}:{}: {}",
                note_prefix, note.span.start_line, note.span.start_col, note.message
            );
        }

        out
    }

    /// Renders source lines covered by `span` with a caret underline.
    fn render_source_highlight(
        &self,
        out: &mut String,
        level: DiagnosticLevel,
        span: Span,
        source: &str,
    ) {
        let lines: Vec<&str> = source.lines().collect();

        if lines.is_empty() {
            return;
        }

        // Clamp to valid range
        let start_line = span.start_line.saturating_sub(1).min(lines.len() - 1);
        let end_line = span.end_line.saturating_sub(1).min(lines.len() - 1);

        for (line_idx, line) in lines
            .iter()
            .enumerate()
            .take(end_line + 1)
            .skip(start_line)
        {
            let line_num = line_idx + 1;
            let _ = writeln!(out, "{line_num:4} | {line}");

            let line_start = if line_idx == start_line {
                span.start_col
            } else {
                1
            };
            let line_end = if line_idx == end_line {
                span.end_col
            } else {
                line.chars().count() + 1
            };

            let indent = line_start.saturating_sub(1);
            let width = line_end.saturating_sub(line_start).max(1);

            let carets = "^".repeat(width);
            let underline = if self.use_colors {
                format!(
                    "{}{}{carets}{}",
                    " ".repeat(indent),
                    level.color_code(),
                    DiagnosticLevel::reset_code()
                )
            } else {
                format!("{}{carets}", " ".repeat(indent))
            };

            let _ = writeln!(out, "     | {underline}");
        }
    }
}
