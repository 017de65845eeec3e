//! rushcalc - a small compiler and stack machine for arithmetic statements
//!
//! # Overview
//!
//! rushcalc evaluates statements such as `c = sqrt(a*a + b*b)` against a set of
//! named `f64` variables. Source text is compiled once into a flat program of
//! stack opcodes, which can then be executed any number of times while the
//! host changes variable values in between. Common use cases include:
//!
//! - Formula fields in configuration or spreadsheets
//! - User-supplied scoring and pricing rules
//! - Repeated evaluation of one formula over many inputs
//!
//! # Quick Start
//!
//! ```
//! use rushcalc::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.set_variable("a", 3.0);
//! evaluator.set_variable("b", 4.0);
//!
//! assert!(evaluator.compile("c = sqrt(a*a + b*b)"));
//! assert!(evaluator.execute());
//! assert_eq!(evaluator.get_variable("c"), 5.0);
//! ```
//!
//! # Diagnostics
//!
//! Nothing panics on bad input. Problems are queued on the evaluator and read
//! back oldest first:
//!
//! ```
//! use rushcalc::Evaluator;
//!
//! let mut evaluator = Evaluator::new();
//! assert!(!evaluator.compile("r = pow(2)"));
//! assert_eq!(
//!     evaluator.get_error_message(),
//!     "Wrong number of arguments for function 'pow' (expected 2)."
//! );
//! assert_eq!(evaluator.get_error_message(), "");
//! ```
//!
//! # Custom functions
//!
//! Register native Rust functions with the `NativeFunction` wrapper. A function
//! with the name of a built-in replaces it.
//!
//! ```
//! use rushcalc::{Evaluator, NativeFunction};
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.set_function(NativeFunction::new("hypot", 2, |args| args[0].hypot(args[1])));
//! assert_eq!(evaluator.eval("hypot(6, 8)"), Ok(Some(10.0)));
//! ```

// Re-export public API from rushcalc_core
pub use rushcalc_core::api::{
    CompilationOptions, Diagnostics, Error, ErrorKind, Evaluator, EvaluatorOptions,
    ExecutionOptions, VariableAccess,
};

// Re-export functions and compiled programs
pub use rushcalc_core::function::{Function, NativeFn, NativeFunction};
pub use rushcalc_core::vm::{Opcode, Program};
