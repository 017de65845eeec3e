use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    #[default]
    None,
    /// Identifier directly followed by `(`.
    Function,
    Variable,
    Constant,
    /// A run of `+ - * /` characters.
    Operator,
    /// Assignment target; the text is the variable name without `=`.
    Assignment,
    Bracket,
    EndStatement,
    Comma,
}

/// A lexical unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_open_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && self.text == "("
    }

    pub fn is_close_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && self.text == ")"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Assignment => write!(f, "{}=", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}
