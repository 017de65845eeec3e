//! The rushcalc evaluator.

use super::{Diagnostics, Error, EvaluatorOptions};
use crate::compiler::{Compiler, Optimizer};
use crate::environment::{Functions, Variables};
use crate::function::Function;
use crate::stdlib::register_standard_library;
use crate::tokenizer;
use crate::vm::{Program, VM};

/// Compiles and runs statements against its own variables and functions.
///
/// An evaluator owns:
/// - the variable table, shared by every program it compiles
/// - the function table, pre-populated with the standard library
/// - the most recently compiled program
/// - the diagnostics queue
///
/// Evaluators are independent of each other; use one per thread.
///
/// # Example
///
/// ```
/// use rushcalc_core::Evaluator;
///
/// let mut evaluator = Evaluator::new();
/// evaluator.set_variable("a", 3.0);
/// evaluator.set_variable("b", 4.0);
///
/// assert!(evaluator.compile("c = sqrt(a*a + b*b)"));
/// assert!(evaluator.execute());
/// assert_eq!(evaluator.get_variable("c"), 5.0);
/// assert!(!evaluator.has_errors());
/// ```
pub struct Evaluator {
    options: EvaluatorOptions,
    variables: Variables,
    functions: Functions,
    program: Program,
    diagnostics: Diagnostics,
    result: Option<f64>,
}

impl Evaluator {
    /// Create an evaluator with default options and the standard library.
    pub fn new() -> Self {
        Self::with_options(EvaluatorOptions::default())
    }

    /// Create an evaluator with explicit options.
    pub fn with_options(options: EvaluatorOptions) -> Self {
        let mut functions = Functions::default();
        register_standard_library(&mut functions);

        Self {
            options,
            variables: Variables::default(),
            functions,
            program: Program::new(),
            diagnostics: Diagnostics::new(),
            result: None,
        }
    }

    /// Access the evaluator options.
    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------------

    /// Create or update a variable.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.set(name, value);
    }

    /// Read a variable.
    ///
    /// Unknown names yield 0.0 and record [`Error::UnknownVariable`].
    pub fn get_variable(&mut self, name: &str) -> f64 {
        match self.variables.get(name) {
            Some(value) => value,
            None => {
                self.diagnostics.push(Error::UnknownVariable {
                    name: name.to_string(),
                });
                0.0
            }
        }
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.index_of(name).is_some()
    }

    /// Remove every variable.
    ///
    /// The current program still refers to the old slots; recompile before
    /// executing again.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Variable names in creation order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.names().collect()
    }

    /// `(name, value)` pairs in creation order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables
            .iter()
            .map(|variable| (variable.name.as_str(), variable.value))
    }

    // ------------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------------

    /// Register a function, replacing any function with the same name.
    ///
    /// A replaced function keeps its slot, so an already compiled program
    /// calls the new definition.
    pub fn set_function(&mut self, function: impl Function + 'static) {
        let index = self.functions.set(Box::new(function));
        tracing::debug!(index, "function registered");
    }

    /// Function names in registration order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.names().collect()
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Pop the oldest diagnostic as text, or an empty string if there is none.
    pub fn get_error_message(&mut self) -> String {
        self.pop_error()
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    /// Pop the oldest diagnostic.
    pub fn pop_error(&mut self) -> Option<Error> {
        self.diagnostics.pop_front()
    }

    /// Inspect pending diagnostics without removing them.
    pub fn errors(&self) -> &Diagnostics {
        &self.diagnostics
    }

    // ------------------------------------------------------------------------
    // Compilation and execution
    // ------------------------------------------------------------------------

    /// Compile `source`, replacing the current program.
    ///
    /// Variables referenced by the source are created (at 0.0) if they do not
    /// exist yet. Returns `true` only if the diagnostics queue is empty
    /// afterwards, so unread diagnostics from earlier calls count as failure.
    pub fn compile(&mut self, source: &str) -> bool {
        self.program = Program::new();
        self.result = None;

        let tokens = match tokenizer::tokenize(source) {
            Ok(tokens) => tokens,
            Err(error) => {
                self.diagnostics.push(error);
                return false;
            }
        };

        let mut code = Compiler::new(
            &tokens,
            &mut self.variables,
            &self.functions,
            &mut self.diagnostics,
        )
        .compile();

        if self.options.default_compilation_options.optimize {
            Optimizer::new().optimize(&mut code);
        }
        self.program = Program::from_opcodes(code);

        tracing::debug!(
            source_len = source.len(),
            tokens = tokens.len(),
            opcodes = self.program.len(),
            diagnostics = self.diagnostics.len(),
            "compiled"
        );
        self.diagnostics.is_empty()
    }

    /// Run the current program.
    ///
    /// Returns `true` if this run recorded no diagnostics. Diagnostics left
    /// over from compiling are not taken into account.
    pub fn execute(&mut self) -> bool {
        let (ok, result) = {
            let mut vm = VM::new(
                &self.program,
                &mut self.variables,
                &self.functions,
                &mut self.diagnostics,
                &self.options.default_execution_options,
            );
            let ok = vm.run();
            (ok, vm.result())
        };
        self.result = result;

        tracing::debug!(
            opcodes = self.program.len(),
            diagnostics = self.diagnostics.len(),
            "executed"
        );
        ok
    }

    /// Compile `source`, returning the diagnostics this call produced.
    pub fn try_compile(&mut self, source: &str) -> Result<(), Vec<Error>> {
        let before = self.diagnostics.len();
        self.compile(source);
        self.take_new_errors(before)
    }

    /// Run the current program, returning the diagnostics this run produced.
    pub fn try_execute(&mut self) -> Result<(), Vec<Error>> {
        let before = self.diagnostics.len();
        self.execute();
        self.take_new_errors(before)
    }

    /// Compile and run `source`.
    ///
    /// Returns the value left on top of the stack, which is `None` when every
    /// statement assigned its value to a variable.
    ///
    /// # Example
    ///
    /// ```
    /// use rushcalc_core::Evaluator;
    ///
    /// let mut evaluator = Evaluator::new();
    /// assert_eq!(evaluator.eval("x = 4; x * fact(3)"), Ok(Some(24.0)));
    /// assert_eq!(evaluator.eval("y = 1"), Ok(None));
    /// ```
    pub fn eval(&mut self, source: &str) -> Result<Option<f64>, Vec<Error>> {
        self.try_compile(source)?;
        self.try_execute()?;
        Ok(self.result)
    }

    /// Value left on top of the stack by the last `execute()`.
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    /// The current program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Render the tokens of `source`, one space between tokens.
    ///
    /// If tokenization fails, the tokens read so far are prefixed with
    /// `Parser error: ` and the diagnostic is queued.
    pub fn tokenizer_text(&mut self, source: &str) -> String {
        let (tokens, error) = tokenizer::tokenize_partial(source);
        let text = tokenizer::render(&tokens);
        match error {
            Some(error) => {
                self.diagnostics.push(error);
                format!("Parser error: {text}")
            }
            None => text,
        }
    }

    /// Disassemble the current program with names resolved.
    pub fn opcode_text(&self) -> String {
        self.program.render(&self.variables, &self.functions)
    }

    fn take_new_errors(&mut self, before: usize) -> Result<(), Vec<Error>> {
        let errors = self.diagnostics.drain_from(before);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
