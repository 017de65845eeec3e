use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::{Functions, Variables};
use crate::vm::Opcode;

/// A flat, runnable sequence of opcodes.
///
/// Programs produced by the compiler never contain [`Opcode::Nested`].
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    opcodes: Vec<Opcode>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps hand-assembled opcodes.
    pub fn from_opcodes(opcodes: Vec<Opcode>) -> Self {
        Self { opcodes }
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opcode> {
        self.opcodes.iter()
    }

    /// Renders the program with variable and function names resolved.
    ///
    /// Every opcode is followed by a single space, e.g.
    /// `LDV 'a' LDC '2.00' MUL SAV 'r' `. Indices that do not resolve are
    /// shown as `'#i'`.
    pub fn render(&self, variables: &Variables, functions: &Functions) -> String {
        let mut text = String::new();
        for opcode in &self.opcodes {
            let operand = match opcode {
                Opcode::LoadConstant(value) => Some(format!("{value:.2}")),
                Opcode::LoadVariable(index) | Opcode::SaveVariable(index) => Some(
                    variables
                        .name_at(*index)
                        .map_or_else(|| format!("#{index}"), str::to_string),
                ),
                Opcode::CallFunction(index) => Some(
                    functions
                        .get(*index)
                        .map_or_else(|| format!("#{index}"), |f| f.name().to_string()),
                ),
                Opcode::Nested(code) => Some(code.len().to_string()),
                _ => None,
            };

            text.push_str(opcode.mnemonic());
            if let Some(operand) = operand {
                text.push_str(" '");
                text.push_str(&operand);
                text.push('\'');
            }
            text.push(' ');
        }
        text
    }
}

impl From<Vec<Opcode>> for Program {
    fn from(opcodes: Vec<Opcode>) -> Self {
        Self::from_opcodes(opcodes)
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program {{")?;
        writeln!(f, "  opcodes: [")?;
        for (addr, opcode) in self.opcodes.iter().enumerate() {
            writeln!(f, "    {:>4}  {}", addr, opcode)?;
        }
        writeln!(f, "  ]")?;
        write!(f, "}}")
    }
}
