pub mod chars;
pub mod lexer;
mod skip;
pub mod token;

use crate::error::ScanError;
use lexer::Lexer;
use token::Token;

/// Start a lazy scan session over `source`.
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Scan source code into a list of tokens.
pub fn scan(source: &str) -> Vec<Token> {
    lex(source).collect()
}

/// Scan `source` and collect a diagnostic for every malformed character and
/// for an unterminated block comment, in source order.
pub fn diagnostics(source: &str) -> Vec<ScanError> {
    scan_with_diagnostics(source).1
}

/// Tokens and diagnostics from a single pass over `source`.
pub fn scan_with_diagnostics(source: &str) -> (Vec<Token>, Vec<ScanError>) {
    let mut lexer = lex(source);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let mut errors: Vec<ScanError> = tokens
        .iter()
        .filter(|token| token.is_malformed())
        .map(ScanError::malformed)
        .collect();
    if let Some(span) = lexer.unterminated_comment() {
        errors.push(ScanError::unterminated_comment(span));
    }
    (tokens, errors)
}
