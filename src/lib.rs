pub mod error;
pub mod repl;
pub mod scanner;

// Re-export the common entry points for convenience
pub use error::ScanError;
pub use scanner::lexer::Lexer;
pub use scanner::token::{Category, Span, Token};
pub use scanner::{diagnostics, lex, scan, scan_with_diagnostics};
