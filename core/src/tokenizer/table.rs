//! Character classes and the state/action tables driving the tokenizer.
//!
//! Both tables are indexed `[class][state]`. A `None` next state rejects the
//! character.
//!
//! States:
//!
//! | state | meaning                                    |
//! |-------|--------------------------------------------|
//! | 0     | start of statement                         |
//! | 1     | expecting an operand                       |
//! | 2     | identifier                                 |
//! | 3     | identifier followed by whitespace          |
//! | 4     | operator run                               |
//! | 5     | number                                     |
//! | 6     | identifier at start of statement           |
//! | 7     | identifier at start of statement, then ws  |

use super::token::TokenKind;

pub(super) const STATES: usize = 8;
pub(super) const START: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CharClass {
    Letter,
    Digit,
    Whitespace,
    Dot,
    Open,
    Close,
    Operator,
    Equals,
    Semicolon,
    Comma,
}

impl CharClass {
    pub(super) fn of(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' | 'A'..='Z' | '_' => Some(CharClass::Letter),
            '0'..='9' => Some(CharClass::Digit),
            ' ' | '\t' | '\r' | '\n' => Some(CharClass::Whitespace),
            '.' => Some(CharClass::Dot),
            '(' => Some(CharClass::Open),
            ')' => Some(CharClass::Close),
            '+' | '-' | '*' | '/' => Some(CharClass::Operator),
            '=' => Some(CharClass::Equals),
            ';' => Some(CharClass::Semicolon),
            ',' => Some(CharClass::Comma),
            _ => None,
        }
    }

    fn row(self) -> usize {
        self as usize
    }
}

/// One primitive step of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    /// Append the current character to the pending text.
    Append,
    /// Emit the pending text as a token of this kind and clear it.
    Emit(TokenKind),
}

use Step::{Append, Emit};
use TokenKind::{Assignment, Bracket, Comma, Constant, EndStatement, Function, Operator, Variable};

type Action = &'static [Step];

const SKIP: Action = &[];
const APPEND: Action = &[Append];
const ASSIGN: Action = &[Emit(Assignment)];
const EMIT_OPERATOR: Action = &[Emit(Operator)];
const EMIT_CONSTANT: Action = &[Emit(Constant)];
const OPERATOR_APPEND: Action = &[Emit(Operator), Append];
const VARIABLE_APPEND: Action = &[Emit(Variable), Append];
const CONSTANT_APPEND: Action = &[Emit(Constant), Append];
const BRACKET: Action = &[Append, Emit(Bracket)];
const FUNCTION_BRACKET: Action = &[Emit(Function), Append, Emit(Bracket)];
const OPERATOR_BRACKET: Action = &[Emit(Operator), Append, Emit(Bracket)];
const VARIABLE_BRACKET: Action = &[Emit(Variable), Append, Emit(Bracket)];
const CONSTANT_BRACKET: Action = &[Emit(Constant), Append, Emit(Bracket)];
const END: Action = &[Append, Emit(EndStatement)];
const VARIABLE_END: Action = &[Emit(Variable), Append, Emit(EndStatement)];
const CONSTANT_END: Action = &[Emit(Constant), Append, Emit(EndStatement)];
const COMMA: Action = &[Append, Emit(Comma)];
const VARIABLE_COMMA: Action = &[Emit(Variable), Append, Emit(Comma)];
const CONSTANT_COMMA: Action = &[Emit(Constant), Append, Emit(Comma)];

const X: Option<usize> = None;

#[rustfmt::skip]
const NEXT: [[Option<usize>; STATES]; 10] = [
    //               0        1        2        3        4        5        6        7
    /* letter */   [Some(6), Some(2), Some(2), X,       Some(2), X,       Some(6), X      ],
    /* digit  */   [Some(5), Some(5), Some(2), X,       Some(5), Some(5), Some(6), X      ],
    /* ws     */   [Some(0), Some(1), Some(3), Some(3), Some(1), Some(1), Some(7), Some(7)],
    /* dot    */   [Some(5), Some(5), X,       X,       Some(5), Some(5), X,       X      ],
    /* (      */   [Some(1), Some(1), Some(1), Some(1), Some(1), X,       Some(1), Some(1)],
    /* )      */   [X,       Some(1), Some(1), Some(1), Some(1), Some(1), Some(1), Some(1)],
    /* op     */   [Some(4), Some(4), Some(4), Some(4), Some(4), Some(4), Some(4), Some(4)],
    /* =      */   [X,       X,       X,       X,       X,       X,       Some(1), Some(1)],
    /* ;      */   [X,       Some(0), Some(0), Some(0), X,       Some(0), Some(0), Some(0)],
    /* ,      */   [X,       Some(1), Some(1), X,       X,       Some(1), Some(1), X      ],
];

#[rustfmt::skip]
const ACTIONS: [[Action; STATES]; 10] = [
    //               0        1        2                 3                 4                 5                 6                 7
    /* letter */   [APPEND, APPEND,  APPEND,           SKIP,             OPERATOR_APPEND,  SKIP,             APPEND,           SKIP            ],
    /* digit  */   [APPEND, APPEND,  APPEND,           SKIP,             OPERATOR_APPEND,  APPEND,           APPEND,           SKIP            ],
    /* ws     */   [SKIP,   SKIP,    SKIP,             SKIP,             EMIT_OPERATOR,    EMIT_CONSTANT,    SKIP,             SKIP            ],
    /* dot    */   [APPEND, APPEND,  SKIP,             SKIP,             OPERATOR_APPEND,  APPEND,           SKIP,             SKIP            ],
    /* (      */   [BRACKET, BRACKET, FUNCTION_BRACKET, FUNCTION_BRACKET, OPERATOR_BRACKET, SKIP,            FUNCTION_BRACKET, FUNCTION_BRACKET],
    /* )      */   [SKIP,   BRACKET, VARIABLE_BRACKET, VARIABLE_BRACKET, OPERATOR_BRACKET, CONSTANT_BRACKET, VARIABLE_BRACKET, VARIABLE_BRACKET],
    /* op     */   [APPEND, APPEND,  VARIABLE_APPEND,  VARIABLE_APPEND,  APPEND,           CONSTANT_APPEND,  VARIABLE_APPEND,  VARIABLE_APPEND ],
    /* =      */   [SKIP,   SKIP,    SKIP,             SKIP,             SKIP,             SKIP,             ASSIGN,           ASSIGN          ],
    /* ;      */   [SKIP,   END,     VARIABLE_END,     VARIABLE_END,     SKIP,             CONSTANT_END,     VARIABLE_END,     VARIABLE_END    ],
    /* ,      */   [SKIP,   COMMA,   VARIABLE_COMMA,   SKIP,             SKIP,             CONSTANT_COMMA,   VARIABLE_COMMA,   SKIP            ],
];

/// Looks up the transition for `class` in `state`.
///
/// Returns `None` when the character is not allowed in that state.
pub(super) fn transition(class: CharClass, state: usize) -> Option<(usize, Action)> {
    let next = NEXT[class.row()][state]?;
    Some((next, ACTIONS[class.row()][state]))
}

/// Kind of the token still being accumulated when input ends in `state`.
pub(super) fn pending_kind(state: usize) -> Option<TokenKind> {
    match state {
        2 | 3 | 6 | 7 => Some(Variable),
        4 => Some(Operator),
        5 => Some(Constant),
        _ => None,
    }
}
