//! Public API of the rushcalc engine.
//!
//! # Example
//!
//! ```
//! use rushcalc_core::api::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.set_variable("x", 3.0);
//!
//! if !evaluator.compile("y = 2*x + 1") {
//!     while evaluator.has_errors() {
//!         eprintln!("{}", evaluator.get_error_message());
//!     }
//! }
//! evaluator.execute();
//! assert_eq!(evaluator.get_variable("y"), 7.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod options;

#[cfg(test)]
mod evaluator_test;

pub use error::{Diagnostics, Error, ErrorKind, VariableAccess};
pub use evaluator::Evaluator;
pub use options::{CompilationOptions, EvaluatorOptions, ExecutionOptions};
