//! Lowers a token stream into a flat opcode sequence.
//!
//! Each statement is scanned left to right. Operands go into `inputs` and
//! operators into `operators`; both are pushed at the front and taken from
//! the back, so the leftmost pending item is resolved first. While resolving
//! an operator, any pending operator that binds tighter (see
//! [`Opcode::yields_to`]) is resolved first. A resolved operator consumes its
//! operands from `inputs`, writing them to the output, and leaves a `NoOp`
//! placeholder behind for its result.
//!
//! Brackets and function arguments are compiled recursively and enter
//! `inputs` as [`Opcode::Nested`] sub-programs, which are spliced into the
//! output when consumed.

use std::collections::VecDeque;
use std::ops::Range;

use crate::api::{Diagnostics, Error};
use crate::environment::{Functions, Variables};
use crate::tokenizer::{Token, TokenKind};
use crate::vm::Opcode;

pub struct Compiler<'a> {
    tokens: &'a [Token],
    variables: &'a mut Variables,
    functions: &'a Functions,
    diagnostics: &'a mut Diagnostics,
}

/// Pending work for one statement.
#[derive(Default)]
struct Statement {
    operators: VecDeque<Opcode>,
    inputs: VecDeque<Opcode>,
}

impl<'a> Compiler<'a> {
    pub fn new(
        tokens: &'a [Token],
        variables: &'a mut Variables,
        functions: &'a Functions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            tokens,
            variables,
            functions,
            diagnostics,
        }
    }

    /// Compiles every statement. The result contains no `Nested` opcodes but
    /// may contain `NoOp` placeholders.
    pub fn compile(&mut self) -> Vec<Opcode> {
        self.compile_range(0..self.tokens.len())
    }

    fn compile_range(&mut self, range: Range<usize>) -> Vec<Opcode> {
        let tokens = self.tokens;
        let mut code = Vec::new();
        let mut index = range.start;

        while index < range.end {
            let mut statement = Statement::default();

            let assignment = match tokens[index].kind {
                TokenKind::Assignment => {
                    let slot = self.variables.index_or_insert(&tokens[index].text);
                    index += 1;
                    Some(Opcode::SaveVariable(slot))
                }
                _ => None,
            };

            while index < range.end {
                let token = &tokens[index];
                match token.kind {
                    TokenKind::EndStatement => {
                        index += 1;
                        break;
                    }
                    TokenKind::Bracket if token.is_open_bracket() => {
                        index = self.compile_bracket(index, range.end, &mut statement);
                        continue;
                    }
                    TokenKind::Bracket => {
                        self.diagnostics.push(Error::UnexpectedClosingBracket);
                    }
                    TokenKind::Function => {
                        index = self.compile_call(index, range.end, &mut statement);
                        continue;
                    }
                    TokenKind::Constant => {
                        let opcode = match token.text.parse::<f64>() {
                            Ok(value) => Opcode::LoadConstant(value),
                            Err(_) => {
                                self.diagnostics.push(Error::InvalidNumber {
                                    text: token.text.clone(),
                                });
                                Opcode::NoOp
                            }
                        };
                        statement.inputs.push_front(opcode);
                    }
                    TokenKind::Variable => {
                        let slot = self.variables.index_or_insert(&token.text);
                        statement.inputs.push_front(Opcode::LoadVariable(slot));
                    }
                    TokenKind::Operator => self.push_operator(index, &mut statement),
                    TokenKind::Assignment | TokenKind::Comma | TokenKind::None => {
                        self.diagnostics.push(Error::UnexpectedToken {
                            token: token.to_string(),
                        });
                    }
                }
                index += 1;
            }

            if let Some(save) = assignment {
                statement.operators.push_front(save);
            }
            while !statement.operators.is_empty() {
                self.resolve_operator(&mut code, &mut statement, true);
            }
            while let Some(input) = statement.inputs.pop_back() {
                flatten_into(&mut code, input);
            }
        }

        code
    }

    /// Compiles `( ... )` starting at `open`. Returns the index after `)`.
    fn compile_bracket(&mut self, open: usize, end: usize, statement: &mut Statement) -> usize {
        match self.find_closing_bracket(open, end) {
            Some(close) => {
                let nested = self.compile_range(open + 1..close);
                statement.inputs.push_front(Opcode::Nested(nested));
                close + 1
            }
            None => {
                self.diagnostics.push(Error::MissingClosingBracket);
                statement.inputs.push_front(Opcode::NoOp);
                self.statement_end(open, end)
            }
        }
    }

    /// Compiles `name ( args... )` starting at `at`. Returns the index after
    /// the call.
    fn compile_call(&mut self, at: usize, end: usize, statement: &mut Statement) -> usize {
        let tokens = self.tokens;
        let name = &tokens[at].text;
        let open = at + 1;

        if !tokens.get(open).is_some_and(Token::is_open_bracket) {
            self.diagnostics.push(Error::ExpectedOpeningBracket { name: name.clone() });
            statement.inputs.push_front(Opcode::NoOp);
            return open;
        }

        let Some(close) = self.find_closing_bracket(open, end) else {
            self.diagnostics.push(Error::MissingClosingBracket);
            statement.inputs.push_front(Opcode::NoOp);
            return self.statement_end(open, end);
        };

        let Some(slot) = self.functions.index_of(name) else {
            self.diagnostics.push(Error::UnknownFunction { name: name.clone() });
            statement.inputs.push_front(Opcode::NoOp);
            return close + 1;
        };

        let arity = self.functions.get(slot).map_or(0, |function| function.arity());
        let arguments = self.split_arguments(open, close);
        if arguments.len() != arity || arguments.iter().any(Range::is_empty) {
            self.diagnostics.push(Error::WrongArgumentCount {
                name: name.clone(),
                expected: arity,
            });
            statement.inputs.push_front(Opcode::NoOp);
            return close + 1;
        }

        let mut code = Vec::new();
        for argument in arguments {
            code.extend(self.compile_range(argument));
        }
        code.push(Opcode::CallFunction(slot));
        statement.inputs.push_front(Opcode::Nested(code));
        close + 1
    }

    /// Handles an operator token, deciding between unary and binary use.
    fn push_operator(&mut self, index: usize, statement: &mut Statement) {
        let tokens = self.tokens;
        let text = &tokens[index].text;
        let unary = index == 0 || {
            let previous = &tokens[index - 1];
            previous.is_open_bracket()
                || matches!(
                    previous.kind,
                    TokenKind::Operator
                        | TokenKind::Assignment
                        | TokenKind::Comma
                        | TokenKind::EndStatement
                )
        };

        let mut chars = text.chars();
        match (unary, chars.next(), chars.next(), chars.next()) {
            (true, Some('-'), None, _) => statement.operators.push_front(Opcode::Neg),
            (true, Some('+'), None, _) => {}
            (false, Some(op), sign, None) => {
                let Some(binary) = Opcode::from_operator(op) else {
                    return self.unknown_operator(text);
                };
                statement.operators.push_front(binary);
                match sign {
                    None | Some('+') => {}
                    Some('-') => statement.operators.push_front(Opcode::Neg),
                    Some(_) => self.unknown_operator(text),
                }
            }
            _ => self.unknown_operator(text),
        }
    }

    fn unknown_operator(&mut self, text: &str) {
        self.diagnostics.push(Error::UnknownOperator {
            text: text.to_string(),
        });
    }

    /// Resolves the oldest pending operator into `code`.
    fn resolve_operator(
        &mut self,
        code: &mut Vec<Opcode>,
        statement: &mut Statement,
        check_priority: bool,
    ) {
        let Some(opcode) = statement.operators.pop_back() else {
            return;
        };

        let (needed, produced) = match &opcode {
            op if op.is_binary() => (2, 1),
            Opcode::Neg => (1, 1),
            Opcode::SaveVariable(_) => (1, 0),
            Opcode::Duplicate => (1, 2),
            Opcode::CallFunction(slot) => (
                self.functions.get(*slot).map_or(0, |function| function.arity()),
                1,
            ),
            _ => (0, 0),
        };

        let mut emitted = opcode;
        if statement.inputs.len() < needed {
            self.diagnostics.push(Error::MissingOperands {
                opcode: emitted.mnemonic(),
                needed,
            });
            emitted = Opcode::NoOp;
        } else {
            for _ in 0..needed {
                if let Some(input) = statement.inputs.pop_back() {
                    flatten_into(code, input);
                }
            }
            for _ in 0..produced {
                statement.inputs.push_back(Opcode::NoOp);
            }
        }

        if check_priority {
            while statement
                .operators
                .back()
                .is_some_and(|pending| emitted.yields_to(pending))
            {
                self.resolve_operator(code, statement, false);
            }
        }

        tracing::trace!(opcode = %emitted, "resolved");
        code.push(emitted);
    }

    /// Finds the `)` matching the `(` at `open`, without crossing a statement
    /// boundary.
    fn find_closing_bracket(&self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens[..end].iter().enumerate().skip(open + 1) {
            if token.is_open_bracket() {
                depth += 1;
            } else if token.is_close_bracket() {
                if depth == 0 {
                    return Some(index);
                }
                depth -= 1;
            } else if token.kind == TokenKind::EndStatement {
                return None;
            }
        }
        None
    }

    /// Splits the tokens between `open` and `close` at top-level commas.
    fn split_arguments(&self, open: usize, close: usize) -> Vec<Range<usize>> {
        if open + 1 == close {
            return Vec::new();
        }

        let mut arguments = Vec::new();
        let mut start = open + 1;
        let mut depth = 0usize;
        for index in open + 1..close {
            let token = &self.tokens[index];
            if token.is_open_bracket() {
                depth += 1;
            } else if token.is_close_bracket() {
                depth = depth.saturating_sub(1);
            } else if token.kind == TokenKind::Comma && depth == 0 {
                arguments.push(start..index);
                start = index + 1;
            }
        }
        arguments.push(start..close);
        arguments
    }

    /// Index of the `EndStatement` that ends the statement containing `from`,
    /// or `end`.
    fn statement_end(&self, from: usize, end: usize) -> usize {
        (from..end)
            .find(|&index| self.tokens[index].kind == TokenKind::EndStatement)
            .unwrap_or(end)
    }
}

/// Appends `opcode` to `code`, splicing nested sub-programs in place.
fn flatten_into(code: &mut Vec<Opcode>, opcode: Opcode) {
    match opcode {
        Opcode::Nested(nested) => code.extend(nested),
        other => code.push(other),
    }
}
