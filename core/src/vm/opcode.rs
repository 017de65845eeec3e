//! rushcalc VM opcodes.
//!
//! The VM is a plain stack machine over `f64` values. Every opcode either
//! pushes, pops, or combines values on the operand stack; variables and
//! functions are referenced by index into the evaluator's registries.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single VM instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Opcode {
    /// Push a literal.
    /// Stack: [...] -> [..., value]
    LoadConstant(f64),

    /// Push the value of a variable.
    /// Operand: variable index | Stack: [...] -> [..., value]
    LoadVariable(usize),

    /// Pop into a variable.
    /// Operand: variable index | Stack: [..., value] -> [...]
    SaveVariable(usize),

    /// Call a registered function with its declared arity.
    /// Operand: function index | Stack: [..., arg1, ..., argN] -> [..., result]
    CallFunction(usize),

    /// Stack: [..., a, b] -> [..., a + b]
    Add,

    /// Stack: [..., a, b] -> [..., a - b]
    Sub,

    /// Stack: [..., a, b] -> [..., a * b]
    Mul,

    /// Stack: [..., a, b] -> [..., a / b]
    Div,

    /// Stack: [..., a] -> [..., -a]
    Neg,

    /// Stack: [..., a] -> [..., a, a]
    Duplicate,

    /// No effect. Used by the compiler as a placeholder.
    NoOp,

    /// Unflattened sub-program.
    ///
    /// Only exists while compiling. The VM refuses to run it.
    Nested(Vec<Opcode>),
}

impl Opcode {
    /// Short mnemonic used in disassembly and runtime diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::LoadConstant(_) => "LDC",
            Opcode::LoadVariable(_) => "LDV",
            Opcode::SaveVariable(_) => "SAV",
            Opcode::CallFunction(_) => "CALL",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Neg => "NEG",
            Opcode::Duplicate => "DBL",
            Opcode::NoOp => "NOP",
            Opcode::Nested(_) => "OPCODES",
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div)
    }

    /// Binary operator for an operator glyph.
    pub fn from_operator(ch: char) -> Option<Opcode> {
        match ch {
            '+' => Some(Opcode::Add),
            '-' => Some(Opcode::Sub),
            '*' => Some(Opcode::Mul),
            '/' => Some(Opcode::Div),
            _ => None,
        }
    }

    /// Returns true if `other` must be resolved before `self`.
    ///
    /// Multiplicative operators bind tighter than additive ones, and a pending
    /// negation binds tighter than anything except another negation.
    pub fn yields_to(&self, other: &Opcode) -> bool {
        let additive = matches!(self, Opcode::Add | Opcode::Sub);
        let multiplicative = matches!(other, Opcode::Mul | Opcode::Div);
        (additive && multiplicative) || (*other == Opcode::Neg && *self != Opcode::Neg)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::LoadConstant(value) => write!(f, "LDC {value}"),
            Opcode::LoadVariable(index)
            | Opcode::SaveVariable(index)
            | Opcode::CallFunction(index) => write!(f, "{} #{index}", self.mnemonic()),
            Opcode::Nested(code) => write!(f, "OPCODES {}", code.len()),
            _ => write!(f, "{}", self.mnemonic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Opcode::LoadConstant(1.5).to_string(), "LDC 1.5");
        assert_eq!(Opcode::LoadVariable(0).to_string(), "LDV #0");
        assert_eq!(Opcode::CallFunction(12).to_string(), "CALL #12");
        assert_eq!(Opcode::Duplicate.to_string(), "DBL");
        assert_eq!(
            Opcode::Nested(vec![Opcode::NoOp, Opcode::Add]).to_string(),
            "OPCODES 2"
        );
    }

    #[test]
    fn test_priority() {
        assert!(Opcode::Add.yields_to(&Opcode::Mul));
        assert!(Opcode::Sub.yields_to(&Opcode::Div));
        assert!(!Opcode::Mul.yields_to(&Opcode::Add));
        assert!(!Opcode::Mul.yields_to(&Opcode::Div));
        assert!(!Opcode::Add.yields_to(&Opcode::Sub));

        assert!(Opcode::Mul.yields_to(&Opcode::Neg));
        assert!(Opcode::SaveVariable(0).yields_to(&Opcode::Neg));
        assert!(!Opcode::Neg.yields_to(&Opcode::Neg));
        assert!(!Opcode::Neg.yields_to(&Opcode::Mul));
    }

    #[test]
    fn test_from_operator() {
        assert_eq!(Opcode::from_operator('/'), Some(Opcode::Div));
        assert_eq!(Opcode::from_operator('%'), None);
    }
}
