use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::scanner::token::{Span, Token};

/// Input conditions worth reporting to a user.
///
/// The scanner never fails on these: it emits a `Malformed` token or ends the
/// stream. These values exist for collaborators that want to render them.
#[derive(Error, Debug, Diagnostic)]
pub enum ScanError {
    #[error("malformed character {found}")]
    #[diagnostic(
        code(begin::malformed),
        help("only printable ASCII and whitespace are allowed outside comments")
    )]
    Malformed {
        found: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("unterminated block comment")]
    #[diagnostic(code(begin::unterminated_comment), help("close the comment with `*/`"))]
    UnterminatedComment {
        #[label("comment starts here and runs to end of input")]
        span: SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },
}

impl ScanError {
    pub fn malformed(token: &Token) -> Self {
        Self::Malformed {
            found: describe(&token.lexeme),
            span: token.span.into(),
            src: miette::NamedSource::new("input", String::new()),
        }
    }

    pub fn unterminated_comment(span: Span) -> Self {
        Self::UnterminatedComment {
            // only the opener is labelled; the rest of the file would swamp the report
            span: SourceSpan::new(span.offset.into(), span.len.min(2)),
            src: miette::NamedSource::new("input", String::new()),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        let src = miette::NamedSource::new(name.into(), source.into());
        match self {
            Self::Malformed { found, span, .. } => Self::Malformed { found, span, src },
            Self::UnterminatedComment { span, .. } => Self::UnterminatedComment { span, src },
        }
    }

    /// Byte offset of the reported location.
    pub fn offset(&self) -> usize {
        match self {
            Self::Malformed { span, .. } | Self::UnterminatedComment { span, .. } => span.offset(),
        }
    }
}

/// Render a character so control characters stay readable, e.g. `'\u{1}' (U+0001)`.
fn describe(lexeme: &str) -> String {
    match lexeme.chars().next() {
        Some(c) => format!("'{}' (U+{:04X})", c.escape_debug(), c as u32),
        None => "''".to_string(),
    }
}
