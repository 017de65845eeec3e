//! Tests for the evaluator API.

use super::*;
use crate::function::NativeFunction;
use crate::test_utils::init_test_logging;
use crate::vm::Opcode;
use pretty_assertions::assert_eq;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn messages(evaluator: &mut Evaluator) -> Vec<String> {
    let mut messages = Vec::new();
    while evaluator.has_errors() {
        messages.push(evaluator.get_error_message());
    }
    messages
}

#[test]
fn test_compile_and_execute() {
    init_test_logging();

    let mut evaluator = Evaluator::new();
    evaluator.set_variable("a", 3.0);
    evaluator.set_variable("b", 5.0);

    assert!(evaluator.compile("result = sqrt(a*a + b*b)"));
    assert!(evaluator.execute());
    assert_eq!(evaluator.get_variable("result"), 5.830951894845301);
    assert!(!evaluator.has_errors());
    assert_eq!(evaluator.result(), None);
}

#[test]
fn test_precedence() {
    let mut evaluator = Evaluator::new();
    for (source, expected) in [
        ("1+2*3+4", 11.0),
        ("1*2+3*4", 14.0),
        ("1+2*3*4", 25.0),
        ("2*-3+1", -5.0),
        ("2 - -3", 5.0),
        ("-2+3*4", 10.0),
        ("60/(12*10)", 0.5),
    ] {
        let value = evaluator.eval(source).unwrap().unwrap();
        assert_close(value, expected);
    }
}

#[test]
fn test_builtins() {
    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.eval("fact(5)"), Ok(Some(120.0)));
    assert_close(evaluator.eval("log(pow(7, 77), 7)").unwrap().unwrap(), 77.0);
    assert_close(evaluator.eval("cos(pi())").unwrap().unwrap(), -1.0);
}

#[test]
fn test_unknown_variable_reads_zero() {
    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.get_variable("zzz"), 0.0);
    assert_eq!(evaluator.error_count(), 1);
    assert_eq!(
        evaluator.get_error_message(),
        "Variable 'zzz' does not exist."
    );
    assert_eq!(evaluator.get_error_message(), "");
}

#[test]
fn test_variables() {
    let mut evaluator = Evaluator::new();
    evaluator.set_variable("x", 1.5);
    assert!(evaluator.compile("y = x * 2"));

    assert!(evaluator.has_variable("y"));
    assert_eq!(evaluator.variable_names(), vec!["x", "y"]);
    // compiling creates but does not assign
    assert_eq!(evaluator.get_variable("y"), 0.0);

    assert!(evaluator.execute());
    assert_eq!(
        evaluator.variables().collect::<Vec<_>>(),
        vec![("x", 1.5), ("y", 3.0)]
    );

    evaluator.clear_variables();
    assert!(!evaluator.has_variable("x"));
    assert!(evaluator.variable_names().is_empty());
}

#[test]
fn test_lexical_error() {
    let mut evaluator = Evaluator::new();
    assert!(!evaluator.compile("result = 1 @ 2"));
    assert!(evaluator.program().is_empty());
    assert_eq!(
        messages(&mut evaluator),
        vec!["Unexpected character '@' in line 1 at column 12."]
    );
}

#[test]
fn test_compile_reports_every_problem() {
    let mut evaluator = Evaluator::new();
    assert!(!evaluator.compile("a = nope(1); b = pow(2); c = (1"));
    assert_eq!(
        messages(&mut evaluator),
        vec![
            "Unknown function name 'nope'.",
            "Wrong number of arguments for function 'pow' (expected 2).",
            "Closing bracket is missing.",
        ]
    );
}

#[test]
fn test_compile_fails_while_diagnostics_are_pending() {
    let mut evaluator = Evaluator::new();
    evaluator.get_variable("missing");

    assert!(!evaluator.compile("r = 1"));
    assert_eq!(evaluator.pop_error().map(|error| error.kind()), Some(ErrorKind::Name));

    assert!(evaluator.compile("r = 1"));
}

#[test]
fn test_execute_is_repeatable() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.compile("r = 2*3"));
    for _ in 0..3 {
        assert!(evaluator.execute());
        assert_eq!(evaluator.get_variable("r"), 6.0);
    }
}

#[test]
fn test_execute_reports_runtime_errors() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.compile("r = a"));
    evaluator.clear_variables();

    assert!(!evaluator.execute());
    let errors: Vec<Error> = evaluator.errors().iter().cloned().collect();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|error| error.kind() == ErrorKind::Runtime));
}

#[test]
fn test_execute_ignores_compile_diagnostics() {
    let mut evaluator = Evaluator::new();
    assert!(!evaluator.compile("r = 1 + 2)"));
    assert!(evaluator.execute());
    assert_eq!(evaluator.get_variable("r"), 3.0);
    assert_eq!(
        messages(&mut evaluator),
        vec!["Unexpected closing bracket."]
    );
}

#[test]
fn test_set_function() {
    let mut evaluator = Evaluator::new();
    evaluator.set_function(NativeFunction::new("avg", 2, |args| (args[0] + args[1]) / 2.0));
    assert_eq!(evaluator.function_names().len(), 19);
    assert_eq!(evaluator.function_names().last(), Some(&"avg"));
    assert_eq!(evaluator.eval("avg(3, 5)"), Ok(Some(4.0)));
}

#[test]
fn test_set_function_replaces_in_place() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.compile("r = sin(4)"));

    evaluator.set_function(NativeFunction::new("sin", 1, |args| args[0] * 2.0));
    assert_eq!(evaluator.function_names().len(), 18);

    // the compiled program picks up the replacement
    assert!(evaluator.execute());
    assert_eq!(evaluator.get_variable("r"), 8.0);
}

#[test]
fn test_try_compile_returns_only_new_errors() {
    let mut evaluator = Evaluator::new();
    evaluator.get_variable("missing");

    assert_eq!(evaluator.try_compile("r = 1"), Ok(()));
    assert_eq!(
        evaluator.try_compile("r = nope(1)"),
        Err(vec![Error::UnknownFunction {
            name: "nope".to_string(),
        }])
    );
    // the older diagnostic is still queued
    assert_eq!(evaluator.error_count(), 1);
}

#[test]
fn test_eval() {
    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.eval("x = 4; x * fact(3)"), Ok(Some(24.0)));
    assert_eq!(evaluator.eval("y = x"), Ok(None));
    assert_eq!(evaluator.get_variable("y"), 4.0);
    assert_eq!(
        evaluator.eval("1 @ 2"),
        Err(vec![Error::UnexpectedCharacter {
            ch: '@',
            line: 1,
            column: 3,
        }])
    );
    assert!(!evaluator.has_errors());
}

#[test]
fn test_tokenizer_text() {
    let mut evaluator = Evaluator::new();
    assert_eq!(
        evaluator.tokenizer_text("result = sqrt(a*a)"),
        "result= sqrt ( a * a ) ;"
    );
    assert!(!evaluator.has_errors());

    assert_eq!(
        evaluator.tokenizer_text("a = 1 + b ?"),
        "Parser error: a= 1 +"
    );
    assert_eq!(evaluator.error_count(), 1);
}

#[test]
fn test_opcode_text() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.compile("r = a * 2 + sin(a)"));
    assert_eq!(
        evaluator.opcode_text(),
        "LDV 'a' LDC '2.00' MUL LDV 'a' CALL 'sin' ADD SAV 'r' "
    );
}

#[test]
fn test_optimize_disabled_keeps_placeholders() {
    let mut evaluator = Evaluator::with_options(EvaluatorOptions {
        default_compilation_options: CompilationOptions { optimize: false },
        ..Default::default()
    });
    assert!(!evaluator.options().default_compilation_options.optimize);

    assert!(evaluator.compile("r = 1 + 2"));
    assert!(evaluator.program().iter().any(|opcode| *opcode == Opcode::NoOp));

    assert!(evaluator.execute());
    assert_eq!(evaluator.get_variable("r"), 3.0);
}

#[test]
fn test_stack_limit() {
    let mut evaluator = Evaluator::with_options(EvaluatorOptions {
        default_execution_options: ExecutionOptions { max_stack_size: 2 },
        ..Default::default()
    });

    assert!(evaluator.compile("r = 1 + 2"));
    assert!(evaluator.execute());

    assert!(evaluator.compile("r = 1 + 2 * 3"));
    assert!(!evaluator.execute());
    assert_eq!(
        messages(&mut evaluator),
        vec!["Stack overflow: exceeded maximum size of 2 values."]
    );
}
