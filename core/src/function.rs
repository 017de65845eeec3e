//! Callable functions exposed to expressions.

use std::fmt;

/// A named function with a fixed number of `f64` arguments.
///
/// The VM guarantees that `args.len() == self.arity()` when calling
/// [`Function::call`], with arguments in left-to-right source order.
pub trait Function {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    fn call(&self, args: &[f64]) -> f64;
}

/// Type alias for the native closures wrapped by [`NativeFunction`].
///
/// # Example
///
/// ```
/// use rushcalc_core::function::NativeFn;
///
/// let hypot: Box<NativeFn> = Box::new(|args| args[0].hypot(args[1]));
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// ```
pub type NativeFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Wrapper for native Rust closures callable from expressions.
///
/// # Example
///
/// ```
/// use rushcalc_core::{Function, NativeFunction};
///
/// let twice = NativeFunction::new("twice", 1, |args| args[0] * 2.0);
/// assert_eq!(twice.name(), "twice");
/// assert_eq!(twice.call(&[21.0]), 42.0);
/// ```
pub struct NativeFunction {
    name: String,
    arity: usize,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Box::new(func),
        }
    }
}

impl Function for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[f64]) -> f64 {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
