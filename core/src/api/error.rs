//! Diagnostics produced by the tokenizer, the compiler, and the VM.
//!
//! Nothing in the engine aborts with an error value. Every stage appends
//! [`Error`]s to the evaluator's [`Diagnostics`] queue and keeps going with a
//! best-effort substitution, so one pass can surface several problems. The
//! only exception is a lexical error, which stops tokenization.

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

/// Broad category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Illegal character in the source text.
    Lexical,
    /// Malformed token sequence (brackets, arity, operators).
    Syntax,
    /// Reference to a function or variable that does not exist.
    Name,
    /// Problem detected while executing a program.
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Name => write!(f, "name error"),
            ErrorKind::Runtime => write!(f, "runtime error"),
        }
    }
}

/// Whether a variable slot was being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableAccess {
    Load,
    Save,
}

impl fmt::Display for VariableAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableAccess::Load => write!(f, "load"),
            VariableAccess::Save => write!(f, "save"),
        }
    }
}

/// A single diagnostic. The `Display` output is the message shown to users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Unexpected character '{ch}' in line {line} at column {column}.")]
    UnexpectedCharacter { ch: char, line: usize, column: usize },

    #[error("Closing bracket is missing.")]
    MissingClosingBracket,

    #[error("Unexpected closing bracket.")]
    UnexpectedClosingBracket,

    #[error("Bracket open expected after function name '{name}'.")]
    ExpectedOpeningBracket { name: String },

    #[error("Wrong number of arguments for function '{name}' (expected {expected}).")]
    WrongArgumentCount { name: String, expected: usize },

    #[error("Unknown operator '{text}'.")]
    UnknownOperator { text: String },

    #[error("Invalid number literal '{text}'.")]
    InvalidNumber { text: String },

    #[error("Internal error: {opcode} opcode needs {needed} operand(s).")]
    MissingOperands { opcode: &'static str, needed: usize },

    #[error("Internal error: unexpected token '{token}'.")]
    UnexpectedToken { token: String },

    #[error("Unknown function name '{name}'.")]
    UnknownFunction { name: String },

    #[error("Variable '{name}' does not exist.")]
    UnknownVariable { name: String },

    #[error("At least {} needed for the {opcode} operation.", spell_values(.needed))]
    StackUnderflow { opcode: &'static str, needed: usize },

    #[error("Cannot {action} variable at index '{index}', because it does not exist.")]
    InvalidVariableIndex { index: usize, action: VariableAccess },

    #[error("Cannot find function at index '{index}', because it does not exist.")]
    InvalidFunctionIndex { index: usize },

    #[error("Stack overflow: exceeded maximum size of {max_size} values.")]
    StackOverflow { max_size: usize },

    #[error("Trying to execute bad code at instruction {index}.")]
    BadCode { index: usize },
}

fn spell_values(count: &usize) -> String {
    match *count {
        1 => "one value".to_string(),
        2 => "two values".to_string(),
        n => format!("{n} values"),
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnexpectedCharacter { .. } => ErrorKind::Lexical,
            Error::MissingClosingBracket
            | Error::UnexpectedClosingBracket
            | Error::ExpectedOpeningBracket { .. }
            | Error::WrongArgumentCount { .. }
            | Error::UnknownOperator { .. }
            | Error::InvalidNumber { .. }
            | Error::MissingOperands { .. }
            | Error::UnexpectedToken { .. } => ErrorKind::Syntax,
            Error::UnknownFunction { .. } | Error::UnknownVariable { .. } => ErrorKind::Name,
            Error::StackUnderflow { .. }
            | Error::InvalidVariableIndex { .. }
            | Error::InvalidFunctionIndex { .. }
            | Error::StackOverflow { .. }
            | Error::BadCode { .. } => ErrorKind::Runtime,
        }
    }

    /// Errors that stop the stage that raised them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedCharacter { .. } | Error::StackOverflow { .. } | Error::BadCode { .. }
        )
    }
}

/// FIFO queue of diagnostics owned by one evaluator.
///
/// Stages append with [`Diagnostics::push`]; hosts drain oldest-first with
/// [`Diagnostics::pop_front`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: VecDeque<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: Error) {
        tracing::debug!(kind = %error.kind(), %error, "diagnostic");
        self.errors.push_back(error);
    }

    /// Removes and returns the oldest diagnostic.
    pub fn pop_front(&mut self) -> Option<Error> {
        self.errors.pop_front()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Removes every diagnostic from position `start` onwards, oldest first.
    ///
    /// Used to hand back exactly the diagnostics produced by one call.
    pub fn drain_from(&mut self, start: usize) -> Vec<Error> {
        let start = start.min(self.errors.len());
        self.errors.drain(start..).collect()
    }
}
