//! rushcalc Standard Library
//!
//! Every evaluator starts with the functions registered here. Hosts can add
//! more, or replace these by name, through `Evaluator::set_function`.

use crate::environment::Functions;

pub mod math;

pub use math::register_math_package;

/// Register every standard library package in `functions`.
pub fn register_standard_library(functions: &mut Functions) {
    register_math_package(functions);
}
