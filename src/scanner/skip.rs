use tracing::debug;

use crate::scanner::chars::is_whitespace;
use crate::scanner::lexer::Lexer;
use crate::scanner::token::Span;

impl Lexer<'_> {
    /// Move the cursor past whitespace and `/* ... */` comments, in any
    /// interleaving, leaving it on the first character of the next lexeme.
    ///
    /// A comment left open at end of input leaves the cursor at end of input
    /// and is recorded in `unterminated_comment`.
    pub(super) fn skip_to_next_lexeme(&mut self) {
        loop {
            while is_whitespace(self.current()) {
                self.drop_one();
            }

            if self.current() != Some('/') || self.peek() != Some('*') {
                return;
            }

            let opened_at = self.cursor();
            self.drop_one();
            self.drop_one();
            loop {
                match (self.current(), self.peek()) {
                    (Some('*'), Some('/')) => {
                        self.drop_one();
                        self.drop_one();
                        break;
                    }
                    (None, _) => {
                        let span = Span::new(opened_at, self.cursor() - opened_at);
                        debug!(offset = opened_at, "unterminated block comment");
                        self.unterminated_comment = Some(span);
                        return;
                    }
                    _ => self.drop_one(),
                }
            }
        }
    }
}
