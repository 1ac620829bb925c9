use std::fmt;

use serde::Serialize;

/// Words that lex as [`Category::Keyword`] instead of [`Category::Identifier`].
pub const KEYWORDS: [&str; 3] = ["begin", "end", "print"];

/// Exact, case-sensitive keyword membership. Prefixes do not match.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr)]
pub enum Category {
    Keyword,
    Identifier,
    NumericLiteral,
    Operator,
    Punctuation,
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub lexeme: String,
    pub category: Category,
    pub span: Span,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, category: Category, span: Span) -> Self {
        Self {
            lexeme: lexeme.into(),
            category,
            span,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.category == Category::Malformed
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' @{}",
            self.category,
            self.lexeme.escape_debug(),
            self.span.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_membership_is_exact() {
        assert!(is_keyword("begin"));
        assert!(is_keyword("end"));
        assert!(is_keyword("print"));
        assert!(!is_keyword("Begin"));
        assert!(!is_keyword("beg"));
        assert!(!is_keyword("ending"));
        assert!(!is_keyword(""));
    }

    #[test]
    fn category_names() {
        assert_eq!(Category::NumericLiteral.to_string(), "NumericLiteral");
        assert_eq!(Category::Malformed.as_ref(), "Malformed");
    }

    #[test]
    fn token_display_escapes_control_chars() {
        let token = Token::new("\u{1}", Category::Malformed, Span::new(4, 1));
        assert_eq!(token.to_string(), "Malformed '\\u{1}' @4");
    }

    #[test]
    fn token_serializes_category_by_name() {
        let token = Token::new("x", Category::Identifier, Span::new(0, 1));
        let json = serde_json::to_string(&token).expect("serialize");
        assert_eq!(
            json,
            r#"{"lexeme":"x","category":"Identifier","span":{"offset":0,"len":1}}"#
        );
    }
}
