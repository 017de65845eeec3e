//! Compiler from tokens to VM opcodes.
//!
//! ## Design
//!
//! - Works directly on the token stream; there is no syntax tree
//! - Operator precedence is resolved with two pending queues per statement
//! - Brackets and call arguments compile recursively into nested sub-programs
//!   that are flattened before the compiler returns
//! - Errors are recorded as diagnostics and replaced by `NoOp` so the rest of
//!   the source still gets checked

mod compile;
mod optimizer;


pub use compile::Compiler;
pub use optimizer::Optimizer;
