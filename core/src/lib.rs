//! Core of the rushcalc expression engine.
//!
//! Source text flows through three stages:
//!
//! 1. [`tokenizer`] turns text into a flat list of [`tokenizer::Token`]s.
//! 2. [`compiler`] lowers tokens into a linear [`vm::Program`] of opcodes.
//! 3. [`vm`] runs that program on a value stack against the variable and
//!    function registries held by the [`api::Evaluator`].
//!
//! Every stage reports problems into a shared [`api::Diagnostics`] queue
//! instead of aborting, so a host can collect all messages of a failed run.

pub mod api;
pub mod compiler;
pub mod environment;
pub mod function;
pub mod stdlib;
pub mod tokenizer;
pub mod vm;

pub use api::{
    CompilationOptions, Diagnostics, Error, ErrorKind, Evaluator, EvaluatorOptions,
    ExecutionOptions,
};
pub use function::{Function, NativeFunction};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_precedence() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
