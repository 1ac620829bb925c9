use std::iter::FusedIterator;

use tracing::trace;

use crate::scanner::chars::{is_digit, is_illegal, is_letter, is_word};
use crate::scanner::token::{Category, Span, Token, is_keyword};

/// Position of the state machine within the token being scanned.
///
/// `Done` ends a single token's scan; the next token starts over at `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Done,
    /// Nothing read yet.
    Start,
    /// Inside an identifier or keyword.
    Letter,
    /// Inside a number, no decimal point seen.
    Digit,
    /// Inside a number, past the decimal point.
    DigDot,
    /// A lone `.`.
    Dot,
    /// A lone `+`.
    Plus,
    /// A lone `-`.
    Minus,
    /// A lone `*`, `/` or `=`.
    Star,
}

/// One scan session over a program buffer.
///
/// Produces tokens lazily through [`Iterator`]. The session is not
/// restartable: once exhausted, scanning again needs a new `Lexer`.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next character. Never decreases.
    position: usize,
    state: State,
    lexeme: String,
    /// Set exactly once per token, on the transition into `Done`.
    category: Option<Category>,
    pub(super) unterminated_comment: Option<Span>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            state: State::Start,
            lexeme: String::new(),
            category: None,
            unterminated_comment: None,
        }
    }

    /// Byte offset of the next unread character.
    pub fn cursor(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Span from an unclosed `/*` to end of input, once the scan has run into it.
    ///
    /// The token stream itself just ends there; this is the only trace of it.
    pub fn unterminated_comment(&self) -> Option<Span> {
        self.unterminated_comment
    }

    pub(super) fn current(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// One character past the cursor, without consuming anything.
    pub(super) fn peek(&self) -> Option<char> {
        let mut rest = self.source[self.position..].chars();
        rest.next();
        rest.next()
    }

    pub(super) fn drop_one(&mut self) {
        if let Some(c) = self.current() {
            self.position += c.len_utf8();
        }
    }

    fn add_one(&mut self) {
        if let Some(c) = self.current() {
            self.lexeme.push(c);
            self.position += c.len_utf8();
        }
    }

    fn finish(&mut self, category: Category) {
        self.state = State::Done;
        self.category = Some(category);
    }

    /// Run the state machine from `Start` to `Done` and return the token.
    ///
    /// The caller guarantees the cursor is on the first character of a lexeme.
    fn scan_token(&mut self) -> Token {
        let start = self.position;
        self.lexeme.clear();
        self.category = None;
        self.state = State::Start;

        while self.state != State::Done {
            self.step();
        }

        let Some(category) = self.category.take() else {
            unreachable!("reached the done state without a category");
        };
        let lexeme = std::mem::take(&mut self.lexeme);
        Token::new(lexeme, category, Span::new(start, self.position - start))
    }

    fn step(&mut self) {
        let ch = self.current();
        match self.state {
            State::Start => self.start(ch),
            State::Letter => self.letter(ch),
            State::Digit => self.digit(ch),
            State::DigDot => self.digdot(ch),
            State::Dot => self.dot(ch),
            State::Plus => self.sign(ch, '+'),
            State::Minus => self.sign(ch, '-'),
            State::Star => self.star(ch),
            State::Done => unreachable!("the done state is never dispatched"),
        }
    }

    fn start(&mut self, ch: Option<char>) {
        let Some(c) = ch else {
            unreachable!("token scan started at end of input");
        };
        self.add_one();
        if is_illegal(ch) {
            self.finish(Category::Malformed);
            return;
        }
        match c {
            c if is_letter(Some(c)) || c == '_' => self.state = State::Letter,
            c if is_digit(Some(c)) => self.state = State::Digit,
            '.' => self.state = State::Dot,
            '+' => self.state = State::Plus,
            '-' => self.state = State::Minus,
            '*' | '/' | '=' => self.state = State::Star,
            _ => self.finish(Category::Punctuation),
        }
    }

    fn letter(&mut self, ch: Option<char>) {
        if is_word(ch) {
            self.add_one();
        } else if is_keyword(&self.lexeme) {
            self.finish(Category::Keyword);
        } else {
            self.finish(Category::Identifier);
        }
    }

    fn digit(&mut self, ch: Option<char>) {
        if is_digit(ch) {
            self.add_one();
        } else if ch == Some('.') {
            self.add_one();
            self.state = State::DigDot;
        } else {
            self.finish(Category::NumericLiteral);
        }
    }

    fn digdot(&mut self, ch: Option<char>) {
        if is_digit(ch) {
            self.add_one();
        } else {
            self.finish(Category::NumericLiteral);
        }
    }

    fn dot(&mut self, ch: Option<char>) {
        if is_digit(ch) {
            self.add_one();
            self.state = State::DigDot;
        } else {
            self.finish(Category::Operator);
        }
    }

    /// Shared by `+` and `-`: a following digit, or a dot then digit, makes
    /// a signed numeric literal; a doubled sign or `=` makes a compound operator.
    fn sign(&mut self, ch: Option<char>, sign: char) {
        if is_digit(ch) {
            self.add_one();
            self.state = State::Digit;
        } else if ch == Some('.') {
            if is_digit(self.peek()) {
                self.add_one();
                self.state = State::DigDot;
            } else {
                self.finish(Category::Operator);
            }
        } else if ch == Some(sign) || ch == Some('=') {
            self.add_one();
            self.finish(Category::Operator);
        } else {
            self.finish(Category::Operator);
        }
    }

    fn star(&mut self, ch: Option<char>) {
        if ch == Some('=') {
            self.add_one();
        }
        self.finish(Category::Operator);
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_to_next_lexeme();
        if self.is_at_end() {
            return None;
        }
        let token = self.scan_token();
        self.skip_to_next_lexeme();
        trace!(
            category = %token.category,
            offset = token.span.offset,
            lexeme = ?token.lexeme,
            "token"
        );
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;
    use rstest::rstest;

    fn pairs(source: &str) -> Vec<(String, Category)> {
        Lexer::new(source)
            .map(|t| (t.lexeme, t.category))
            .collect()
    }

    fn pair(lexeme: &str, category: Category) -> (String, Category) {
        (lexeme.to_string(), category)
    }

    #[rstest]
    #[case("x", &[("x", Identifier)])]
    #[case("_tmp1", &[("_tmp1", Identifier)])]
    #[case("a_b_9", &[("a_b_9", Identifier)])]
    #[case("begin", &[("begin", Keyword)])]
    #[case("printer", &[("printer", Identifier)])]
    #[case("PRINT", &[("PRINT", Identifier)])]
    #[case("42", &[("42", NumericLiteral)])]
    #[case("42.", &[("42.", NumericLiteral)])]
    #[case("1.2.3", &[("1.2", NumericLiteral), (".3", NumericLiteral)])]
    #[case(".", &[(".", Operator)])]
    #[case("..", &[(".", Operator), (".", Operator)])]
    #[case("+", &[("+", Operator)])]
    #[case("+=", &[("+=", Operator)])]
    #[case("+-", &[("+", Operator), ("-", Operator)])]
    #[case("+7", &[("+7", NumericLiteral)])]
    #[case("+7.25", &[("+7.25", NumericLiteral)])]
    #[case("+.x", &[("+", Operator), (".", Operator), ("x", Identifier)])]
    #[case("-", &[("-", Operator)])]
    #[case("--", &[("--", Operator)])]
    #[case("-=", &[("-=", Operator)])]
    #[case("-+", &[("-", Operator), ("+", Operator)])]
    #[case("-3", &[("-3", NumericLiteral)])]
    #[case("-.5", &[("-.5", NumericLiteral)])]
    #[case("-.", &[("-", Operator), (".", Operator)])]
    #[case("*", &[("*", Operator)])]
    #[case("*=", &[("*=", Operator)])]
    #[case("/=", &[("/=", Operator)])]
    #[case("==", &[("==", Operator)])]
    #[case("===", &[("==", Operator), ("=", Operator)])]
    #[case("**", &[("*", Operator), ("*", Operator)])]
    #[case("(;)", &[("(", Punctuation), (";", Punctuation), (")", Punctuation)])]
    #[case("\"", &[("\"", Punctuation)])]
    fn transitions(#[case] source: &str, #[case] expected: &[(&str, Category)]) {
        let expected: Vec<_> = expected.iter().map(|&(l, c)| pair(l, c)).collect();
        assert_eq!(pairs(source), expected);
    }

    #[test]
    fn no_space_needed_between_tokens() {
        assert_eq!(
            pairs("x=y*2;"),
            vec![
                pair("x", Identifier),
                pair("=", Operator),
                pair("y", Identifier),
                pair("*", Operator),
                pair("2", NumericLiteral),
                pair(";", Punctuation),
            ]
        );
    }

    #[test]
    fn sign_binds_to_following_number() {
        assert_eq!(
            pairs("a-1"),
            vec![pair("a", Identifier), pair("-1", NumericLiteral)]
        );
    }

    #[test]
    fn keyword_needs_whole_word() {
        assert_eq!(pairs("end1"), vec![pair("end1", Identifier)]);
        assert_eq!(
            pairs("end.print"),
            vec![pair("end", Keyword), pair(".", Operator), pair("print", Keyword)]
        );
    }

    #[test]
    fn illegal_character_is_one_malformed_token() {
        assert_eq!(
            pairs("a\u{1}b"),
            vec![
                pair("a", Identifier),
                pair("\u{1}", Malformed),
                pair("b", Identifier),
            ]
        );
    }

    #[test]
    fn non_ascii_character_is_malformed() {
        assert_eq!(
            pairs("x=π"),
            vec![pair("x", Identifier), pair("=", Operator), pair("π", Malformed)]
        );
    }

    #[test]
    fn spans_match_lexemes() {
        let source = "begin  x += -.5 /* c */ end";
        for token in Lexer::new(source) {
            assert_eq!(&source[token.span.offset..token.span.end()], token.lexeme);
        }
        let offsets: Vec<_> = Lexer::new(source).map(|t| t.span.offset).collect();
        assert_eq!(offsets, vec![0, 7, 9, 12, 24]);
    }

    #[test]
    fn spans_count_bytes_for_multibyte_chars() {
        let tokens: Vec<_> = Lexer::new("é x").collect();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 1));
    }

    #[test]
    fn exhausted_session_stays_exhausted() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
        assert!(lexer.is_at_end());
    }

    #[test]
    fn lazy_pull_advances_one_token_at_a_time() {
        let mut lexer = Lexer::new("ab cd ef");
        assert_eq!(lexer.cursor(), 0);
        lexer.next();
        assert_eq!(lexer.cursor(), 3);
        lexer.next();
        assert_eq!(lexer.cursor(), 6);
    }

    #[test]
    fn cursor_readable_through_mutable_borrow() {
        fn pull_and_report(lexer: &mut Lexer<'_>) -> (Option<Token>, usize) {
            let token = lexer.next();
            (token, lexer.cursor())
        }

        let mut lexer = Lexer::new("x /* open");
        let (token, cursor) = pull_and_report(&mut lexer);
        assert_eq!(token.map(|t| t.lexeme), Some("x".to_string()));
        assert_eq!(cursor, 9);
        assert_eq!(lexer.unterminated_comment(), Some(Span::new(2, 7)));
    }

    #[test]
    fn peek_past_end_is_none() {
        let lexer = Lexer::new("+");
        assert_eq!(lexer.current(), Some('+'));
        assert_eq!(lexer.peek(), None);
        assert_eq!(Lexer::new("").current(), None);
    }
}
