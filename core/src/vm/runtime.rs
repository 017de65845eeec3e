use smallvec::SmallVec;

use crate::api::{Diagnostics, Error, ExecutionOptions, VariableAccess};
use crate::environment::{Functions, Variables};
use crate::vm::{Opcode, Program, Stack};

/// Runs a [`Program`] against the variable and function registries.
///
/// Problems are appended to the diagnostics queue. Most of them only skip the
/// offending opcode; a stack overflow or a leftover [`Opcode::Nested`] stops
/// the run.
pub struct VM<'a> {
    program: &'a Program,
    variables: &'a mut Variables,
    functions: &'a Functions,
    diagnostics: &'a mut Diagnostics,
    stack: Stack<f64>,
}

impl<'a> VM<'a> {
    pub fn new(
        program: &'a Program,
        variables: &'a mut Variables,
        functions: &'a Functions,
        diagnostics: &'a mut Diagnostics,
        options: &ExecutionOptions,
    ) -> Self {
        VM {
            program,
            variables,
            functions,
            diagnostics,
            stack: Stack::new(options.max_stack_size),
        }
    }

    /// Executes every opcode in order.
    ///
    /// Returns `true` if no diagnostic was recorded during this run.
    pub fn run(&mut self) -> bool {
        let before = self.diagnostics.len();
        let program = self.program;

        for (index, opcode) in program.iter().enumerate() {
            tracing::trace!(index, %opcode, depth = self.stack.len(), "execute");
            if let Err(error) = self.step(index, opcode) {
                self.diagnostics.push(error);
                break;
            }
        }

        self.diagnostics.len() == before
    }

    /// Value left on top of the stack, if any.
    pub fn result(&self) -> Option<f64> {
        self.stack.peek().copied()
    }

    pub fn stack(&self) -> &Stack<f64> {
        &self.stack
    }

    /// Executes one opcode. `Err` halts the run.
    fn step(&mut self, index: usize, opcode: &Opcode) -> Result<(), Error> {
        match opcode {
            Opcode::LoadConstant(value) => self.stack.push(*value)?,
            Opcode::LoadVariable(slot) => match self.variables.value_at(*slot) {
                Some(value) => self.stack.push(value)?,
                None => self.report(Error::InvalidVariableIndex {
                    index: *slot,
                    action: VariableAccess::Load,
                }),
            },
            Opcode::SaveVariable(slot) => {
                if *slot >= self.variables.len() {
                    self.report(Error::InvalidVariableIndex {
                        index: *slot,
                        action: VariableAccess::Save,
                    });
                } else if let Some([value]) = self.take::<1>(opcode) {
                    self.variables.set_at(*slot, value);
                }
            }
            Opcode::CallFunction(slot) => self.call(*slot)?,
            Opcode::Add => self.binary(opcode, |a, b| a + b)?,
            Opcode::Sub => self.binary(opcode, |a, b| a - b)?,
            Opcode::Mul => self.binary(opcode, |a, b| a * b)?,
            Opcode::Div => self.binary(opcode, |a, b| a / b)?,
            Opcode::Neg => {
                if let Some([value]) = self.take::<1>(opcode) {
                    self.stack.push(-value)?;
                }
            }
            Opcode::Duplicate => {
                if self.stack.is_empty() {
                    self.underflow(opcode, 1);
                } else {
                    self.stack.dup()?;
                }
            }
            Opcode::NoOp => {}
            Opcode::Nested(_) => return Err(Error::BadCode { index }),
        }
        Ok(())
    }

    fn binary(&mut self, opcode: &Opcode, op: impl Fn(f64, f64) -> f64) -> Result<(), Error> {
        if let Some([lhs, rhs]) = self.take::<2>(opcode) {
            self.stack.push(op(lhs, rhs))?;
        }
        Ok(())
    }

    fn call(&mut self, slot: usize) -> Result<(), Error> {
        let functions = self.functions;
        let Some(function) = functions.get(slot) else {
            self.report(Error::InvalidFunctionIndex { index: slot });
            return Ok(());
        };

        let arity = function.arity();
        let Some(args) = self.stack.top_n(arity) else {
            self.underflow(&Opcode::CallFunction(slot), arity);
            return Ok(());
        };
        let args: SmallVec<[f64; 4]> = SmallVec::from_slice(args);
        self.stack.pop_n(arity);

        let result = function.call(&args);
        tracing::trace!(name = function.name(), ?args, result, "call");
        self.stack.push(result)
    }

    /// Pops `N` operands in push order, or records an underflow.
    fn take<const N: usize>(&mut self, opcode: &Opcode) -> Option<[f64; N]> {
        let Some(top) = self.stack.top_n(N) else {
            self.underflow(opcode, N);
            return None;
        };
        let mut operands = [0.0; N];
        operands.copy_from_slice(top);
        self.stack.pop_n(N);
        Some(operands)
    }

    fn underflow(&mut self, opcode: &Opcode, needed: usize) {
        self.report(Error::StackUnderflow {
            opcode: opcode.mnemonic(),
            needed,
        });
    }

    fn report(&mut self, error: Error) {
        self.diagnostics.push(error);
    }
}
