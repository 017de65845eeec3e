//! Turns source text into [`Token`]s.
//!
//! The tokenizer is a table-driven state machine over ten character classes
//! (see [`table`]). Characters outside every class, or characters not allowed
//! in the current state, abort tokenization with
//! [`Error::UnexpectedCharacter`].

mod table;
mod token;


pub use token::{Token, TokenKind};

use crate::api::Error;
use table::{CharClass, Step};

/// Tokenizes `source`.
///
/// At end of input any partial token is flushed and a trailing
/// `EndStatement` is emitted unless the text already ended with one.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    match tokenize_partial(source) {
        (tokens, None) => Ok(tokens),
        (_, Some(error)) => Err(error),
    }
}

/// Like [`tokenize`], but also returns the tokens produced before an error.
pub fn tokenize_partial(source: &str) -> (Vec<Token>, Option<Error>) {
    let mut tokenizer = Tokenizer::new();
    let error = tokenizer.run(source).err();
    (tokenizer.tokens, error)
}

/// Renders a token stream the way `Evaluator::tokenizer_text` shows it.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

struct Tokenizer {
    state: usize,
    pending: String,
    tokens: Vec<Token>,
    line: usize,
    column: usize,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            state: table::START,
            pending: String::new(),
            tokens: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    fn run(&mut self, source: &str) -> Result<(), Error> {
        for ch in source.chars() {
            let Some((next, action)) =
                CharClass::of(ch).and_then(|class| table::transition(class, self.state))
            else {
                return Err(Error::UnexpectedCharacter {
                    ch,
                    line: self.line,
                    column: self.column,
                });
            };

            for step in action {
                self.apply(*step, ch);
            }
            self.state = next;

            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.finish();
        Ok(())
    }

    fn apply(&mut self, step: Step, ch: char) {
        match step {
            Step::Append => self.pending.push(ch),
            Step::Emit(kind) => self.emit(kind),
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let text = std::mem::take(&mut self.pending);
        tracing::trace!(?kind, %text, "token");
        self.tokens.push(Token::new(kind, text));
    }

    fn finish(&mut self) {
        if let Some(kind) = table::pending_kind(self.state) {
            if !self.pending.is_empty() {
                self.emit(kind);
            }
        }

        let ended = self
            .tokens
            .last()
            .is_none_or(|token| token.kind == TokenKind::EndStatement);
        if !ended {
            self.pending.push(';');
            self.emit(TokenKind::EndStatement);
        }
    }
}
