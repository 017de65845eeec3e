//! Configuration options for the evaluator.

/// Configuration options for compilation.
///
/// These options control compile-time behavior and optimizations.
///
/// # Example
///
/// ```
/// use rushcalc_core::api::CompilationOptions;
///
/// let options = CompilationOptions { optimize: false };
/// assert!(CompilationOptions::default().optimize);
/// # let _ = options;
/// ```
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// Run the optimizer over the finished program.
    ///
    /// Leaving NoOps in place is harmless at run time; disabling this is
    /// mostly useful to inspect the raw compiler output.
    ///
    /// Default: true
    pub optimize: bool,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { optimize: true }
    }
}

/// Configuration options for program execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use rushcalc_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_stack_size: 64,
/// };
/// # let _ = options;
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum number of values on the operand stack.
    ///
    /// Pushing beyond it records a stack overflow and halts the run.
    ///
    /// Default: 1024
    pub max_stack_size: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_stack_size: 1024,
        }
    }
}

/// Configuration options for the evaluator.
///
/// # Example
///
/// ```
/// use rushcalc_core::api::{CompilationOptions, EvaluatorOptions, ExecutionOptions};
///
/// let options = EvaluatorOptions {
///     default_compilation_options: CompilationOptions::default(),
///     default_execution_options: ExecutionOptions {
///         max_stack_size: 256,
///     },
/// };
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvaluatorOptions {
    /// Options used by `Evaluator::compile()`.
    pub default_compilation_options: CompilationOptions,

    /// Options used by `Evaluator::execute()`.
    pub default_execution_options: ExecutionOptions,
}
