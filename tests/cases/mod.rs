#![allow(dead_code, unused_macros)]

use once_cell::sync::Lazy;
use rushcalc::{Error, Evaluator};

pub const TOLERANCE: f64 = 1e-9;

/// A source statement and the value it must evaluate to.
pub struct TestCase {
    pub name: &'static str,
    pub expr: &'static str,
    pub variables: &'static [(&'static str, f64)],
    pub value: f64,
}

/// Reference results shared by the integration tests.
pub static TEST_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    vec![
        TestCase {
            name: "mixed_precedence",
            expr: "55 + 99/33-21+ 13 * 99",
            variables: &[],
            value: 1324.0,
        },
        TestCase {
            name: "alternating_sums_and_products",
            expr: "1+2*3+4*5+6*7+8*9+10",
            variables: &[],
            value: 151.0,
        },
        TestCase {
            name: "nested_brackets",
            expr: "((1+2)*(3+4)*5)*(22)",
            variables: &[],
            value: 2310.0,
        },
        TestCase {
            name: "bracketed_divisor",
            expr: "60/(12*10)",
            variables: &[],
            value: 0.5,
        },
        TestCase {
            name: "bracket_then_product",
            expr: "((1+2)*3+4)*5",
            variables: &[],
            value: 65.0,
        },
        TestCase {
            name: "cube_root",
            expr: "root(125,3)",
            variables: &[],
            value: 5.0,
        },
        TestCase {
            name: "log10_of_power",
            expr: "log10(pow(10,5))",
            variables: &[],
            value: 5.0,
        },
        TestCase {
            name: "modulo",
            expr: "mod(8,6)",
            variables: &[],
            value: 2.0,
        },
        TestCase {
            name: "fraction",
            expr: "frac(8.6)",
            variables: &[],
            value: 0.6,
        },
        TestCase {
            name: "cosine_of_pi",
            expr: "cos(pi())",
            variables: &[],
            value: -1.0,
        },
        TestCase {
            name: "taylor_series",
            expr: "1+(x/fact(1))+(pow(x,2)/fact(2))+(pow(x,3)/fact(3))",
            variables: &[("x", 3.0)],
            value: 13.0,
        },
        TestCase {
            name: "factorial_in_brackets",
            expr: "3.5+(60/fact(5))",
            variables: &[],
            value: 4.0,
        },
    ]
});

/// Evaluates `input` on a fresh evaluator after assigning `variables`.
pub fn eval_with(
    input: &str,
    variables: &[(&str, f64)],
) -> (Evaluator, Result<Option<f64>, Vec<Error>>) {
    let mut evaluator = Evaluator::new();
    for (name, value) in variables {
        evaluator.set_variable(name, *value);
    }
    let outcome = evaluator.eval(input);
    (evaluator, outcome)
}

pub fn assert_close(input: &str, actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{input}: expected {expected}, got {actual}"
    );
}

pub fn assert_value(input: &str, outcome: &Result<Option<f64>, Vec<Error>>, expected: f64) {
    match outcome {
        Ok(Some(actual)) => assert_close(input, *actual, expected),
        Ok(None) => panic!("{input}: no value left on the stack"),
        Err(errors) => panic!("{input}: {errors:?}"),
    }
}

pub fn assert_errors(input: &str, outcome: &Result<Option<f64>, Vec<Error>>, expected: &[&str]) {
    match outcome {
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            pretty_assertions::assert_eq!(messages, expected, "{input}");
        }
        Ok(value) => panic!("{input}: expected errors, got {value:?}"),
    }
}

/// Declares one integration test.
///
/// ```ignore
/// test_case! {
///     name: hypotenuse,
///     input: "c = sqrt(a*a + b*b)",
///     variables: { a: 3.0, b: 4.0 },
///     assigned: { c: 5.0 },
/// }
/// ```
///
/// Every section after `input` is optional but must appear in this order:
/// `variables`, `value`, `assigned`, `opcodes`, `error`.
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $(variables: { $($var:ident: $val:expr),* $(,)? },)?
        $(value: { $value:expr },)?
        $(assigned: { $($target:ident: $expected:expr),* $(,)? },)?
        $(opcodes: { $opcodes:expr },)?
        $(error: { $($error:expr),* $(,)? },)?
    ) => {
        #[test]
        fn $name() {
            let input: &str = $input;
            #[allow(unused_mut)]
            let mut variables: Vec<(&str, f64)> = Vec::new();
            $($(variables.push((stringify!($var), $val));)*)?

            #[allow(unused_mut, unused_variables)]
            let (mut evaluator, outcome) = cases::eval_with(input, &variables);

            $(cases::assert_value(input, &outcome, $value);)?
            $($(
                cases::assert_close(
                    stringify!($target),
                    evaluator.get_variable(stringify!($target)),
                    $expected,
                );
            )*)?
            $(pretty_assertions::assert_eq!(evaluator.opcode_text(), $opcodes, "{}", input);)?
            $(cases::assert_errors(input, &outcome, &[$($error),*]);)?
        }
    };
}
