//! Math Package
//!
//! The built-in functions every evaluator starts with.
//!
//! Functions: pi, abs, exp, pow, sqrt, root, ln, log10, log, fact, mod,
//!            ceil, floor, frac, int, sin, cos, tan
//!
//! Arguments are not validated. Out-of-domain inputs produce whatever IEEE-754
//! gives (`ln(0)` is -inf, `sqrt(-1)` and `mod(a, 0)` are NaN).

use crate::environment::Functions;
use crate::function::NativeFunction;

/// Largest argument for which `fact` is still finite.
const MAX_FACTORIAL: f64 = 170.0;

// ============================================================================
// Constants
// ============================================================================

/// The constant π
fn math_pi(_args: &[f64]) -> f64 {
    std::f64::consts::PI
}

// ============================================================================
// Basic Operations
// ============================================================================

/// Absolute value
fn math_abs(args: &[f64]) -> f64 {
    args[0].abs()
}

/// Floating remainder with the sign of the dividend
fn math_mod(args: &[f64]) -> f64 {
    args[0] % args[1]
}

/// Round up
fn math_ceil(args: &[f64]) -> f64 {
    args[0].ceil()
}

/// Round down
fn math_floor(args: &[f64]) -> f64 {
    args[0].floor()
}

/// Fractional part, keeping the sign
fn math_frac(args: &[f64]) -> f64 {
    args[0].fract()
}

/// Integer part, truncated towards zero
fn math_int(args: &[f64]) -> f64 {
    args[0].trunc()
}

/// Factorial of the floored argument.
///
/// Anything below 2 (including negatives) gives 1. Arguments above 170
/// overflow `f64` and give infinity without looping.
fn math_fact(args: &[f64]) -> f64 {
    let value = args[0].floor();
    if value > MAX_FACTORIAL {
        return f64::INFINITY;
    }

    let mut result = 1.0;
    let mut factor = 2.0;
    while factor <= value {
        result *= factor;
        factor += 1.0;
    }
    result
}

// ============================================================================
// Powers, Roots, Logarithms
// ============================================================================

/// e raised to the argument
fn math_exp(args: &[f64]) -> f64 {
    args[0].exp()
}

/// Base raised to the exponent
fn math_pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

/// Square root
fn math_sqrt(args: &[f64]) -> f64 {
    args[0].sqrt()
}

/// n-th root, computed as exp(ln(x) / n)
fn math_root(args: &[f64]) -> f64 {
    (args[0].ln() / args[1]).exp()
}

/// Natural logarithm
fn math_ln(args: &[f64]) -> f64 {
    args[0].ln()
}

/// Base-10 logarithm
fn math_log10(args: &[f64]) -> f64 {
    args[0].log10()
}

/// Logarithm of the first argument in the base of the second
fn math_log(args: &[f64]) -> f64 {
    args[0].ln() / args[1].ln()
}

// ============================================================================
// Trigonometry
// ============================================================================

/// Sine (radians)
fn math_sin(args: &[f64]) -> f64 {
    args[0].sin()
}

/// Cosine (radians)
fn math_cos(args: &[f64]) -> f64 {
    args[0].cos()
}

/// Tangent (radians)
fn math_tan(args: &[f64]) -> f64 {
    args[0].tan()
}

/// Name, arity, and implementation of every built-in, in registration order.
const BUILTINS: [(&str, usize, fn(&[f64]) -> f64); 18] = [
    ("pi", 0, math_pi),
    ("abs", 1, math_abs),
    ("exp", 1, math_exp),
    ("pow", 2, math_pow),
    ("sqrt", 1, math_sqrt),
    ("root", 2, math_root),
    ("ln", 1, math_ln),
    ("log10", 1, math_log10),
    ("log", 2, math_log),
    ("fact", 1, math_fact),
    ("mod", 2, math_mod),
    ("ceil", 1, math_ceil),
    ("floor", 1, math_floor),
    ("frac", 1, math_frac),
    ("int", 1, math_int),
    ("sin", 1, math_sin),
    ("cos", 1, math_cos),
    ("tan", 1, math_tan),
];

/// Registers the math package in `functions`.
///
/// Existing functions with the same names are replaced in place.
pub fn register_math_package(functions: &mut Functions) {
    for (name, arity, func) in BUILTINS {
        functions.set(Box::new(NativeFunction::new(name, arity, func)));
    }
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
