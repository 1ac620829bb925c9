//! Character classes used by the scanner.
//!
//! Every predicate takes `Option<char>` so that end of input (`None`) can be
//! passed straight through; all of them answer `false` for `None`.

pub fn is_letter(c: Option<char>) -> bool {
    matches!(c, Some('a'..='z' | 'A'..='Z'))
}

pub fn is_digit(c: Option<char>) -> bool {
    matches!(c, Some('0'..='9'))
}

/// Space, tab, newline, carriage return, form feed.
pub fn is_whitespace(c: Option<char>) -> bool {
    matches!(c, Some(' ' | '\t' | '\n' | '\r' | '\x0c'))
}

/// Inclusive range `' '..='~'` (0x20 to 0x7E).
pub fn is_printable_ascii(c: Option<char>) -> bool {
    matches!(c, Some(' '..='~'))
}

/// A present character that is neither whitespace nor printable ASCII.
pub fn is_illegal(c: Option<char>) -> bool {
    c.is_some() && !is_whitespace(c) && !is_printable_ascii(c)
}

/// Continuation character of an identifier or keyword.
pub(crate) fn is_word(c: Option<char>) -> bool {
    is_letter(c) || is_digit(c) || c == Some('_')
}
