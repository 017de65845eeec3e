use std::fmt;

use crate::api::Error;

/// A stack data structure with a hard maximum size.
///
/// This stack is used by the VM for operand storage during execution. Pushing
/// beyond the maximum size fails with [`Error::StackOverflow`] instead of
/// growing without bound.
///
/// # Examples
///
/// ```
/// use rushcalc_core::vm::Stack;
///
/// let mut stack = Stack::new(100);
/// stack.push(42.0).unwrap();
/// stack.push(17.0).unwrap();
/// assert_eq!(stack.pop(), Some(17.0));
/// assert_eq!(stack.peek(), Some(&42.0));
/// assert_eq!(stack.len(), 1);
/// ```
pub struct Stack<T> {
    /// The underlying storage for stack elements.
    items: Vec<T>,
    /// Maximum allowed stack size.
    max_size: usize,
}

impl<T> Stack<T> {
    /// Creates a new stack with the specified maximum size.
    ///
    /// The stack will pre-allocate a reasonable amount of space to avoid
    /// frequent reallocations during normal operation.
    ///
    /// # Arguments
    ///
    /// * `max_size` - Maximum number of elements allowed on the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use rushcalc_core::vm::Stack;
    ///
    /// let stack: Stack<f64> = Stack::new(1000);
    /// assert_eq!(stack.capacity(), 1000);
    /// assert_eq!(stack.len(), 0);
    /// ```
    pub fn new(max_size: usize) -> Self {
        // Pre-allocate a reasonable amount (min of max_size or 64)
        let initial_capacity = max_size.min(64);

        Self {
            items: Vec::with_capacity(initial_capacity),
            max_size,
        }
    }

    /// Pushes a value onto the stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StackOverflow`] if the stack is already at maximum
    /// capacity. The value is dropped in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rushcalc_core::vm::Stack;
    ///
    /// let mut stack = Stack::new(1);
    /// assert!(stack.push(1.0).is_ok());
    /// assert!(stack.push(2.0).is_err());
    /// assert_eq!(stack.len(), 1);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.items.len() >= self.max_size {
            return Err(Error::StackOverflow {
                max_size: self.max_size,
            });
        }
        self.items.push(value);
        Ok(())
    }

    /// Removes and returns the top value from the stack.
    ///
    /// Returns `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the top value without removing it.
    ///
    /// Returns `None` if the stack is empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the current number of elements on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum capacity of the stack.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Clears the stack, removing all values.
    ///
    /// This does not deallocate the underlying storage.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes the top `n` elements from the stack.
    ///
    /// If `n` is greater than the current stack size, all elements are removed.
    /// This is used after operations that consume multiple stack values (like
    /// function calls).
    ///
    /// # Examples
    ///
    /// ```
    /// use rushcalc_core::vm::Stack;
    ///
    /// let mut stack = Stack::new(100);
    /// for value in [10.0, 20.0, 30.0, 40.0] {
    ///     stack.push(value).unwrap();
    /// }
    ///
    /// // Remove top 2 elements
    /// stack.pop_n(2);
    /// assert_eq!(stack.len(), 2);
    /// assert_eq!(stack.peek(), Some(&20.0));
    ///
    /// // Remove more than remaining
    /// stack.pop_n(10);
    /// assert_eq!(stack.len(), 0);
    /// ```
    #[inline]
    pub fn pop_n(&mut self, n: usize) {
        let new_len = self.len().saturating_sub(n);
        self.items.truncate(new_len);
    }

    /// Returns an iterator over references to the stack elements.
    ///
    /// The iterator yields elements from bottom to top.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns a slice of the top `n` elements on the stack.
    ///
    /// The slice is ordered from bottom to top (so `slice[0]` is the oldest
    /// of the n elements, and `slice[n-1]` is the top of the stack). This is
    /// exactly the left-to-right argument order of a call.
    ///
    /// Returns `None` if there are fewer than `n` elements on the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use rushcalc_core::vm::Stack;
    ///
    /// let mut stack = Stack::new(100);
    /// for value in [10.0, 20.0, 30.0, 40.0] {
    ///     stack.push(value).unwrap();
    /// }
    ///
    /// assert_eq!(stack.top_n(2), Some(&[30.0, 40.0][..]));
    /// assert_eq!(stack.top_n(10), None);
    /// ```
    #[inline]
    pub fn top_n(&self, n: usize) -> Option<&[T]> {
        let len = self.items.len();
        if n > len {
            None
        } else {
            Some(&self.items[len - n..])
        }
    }

    /// Consumes the stack, returning its elements from bottom to top.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Stack<T> {
    /// Duplicates the top element of the stack.
    ///
    /// Returns `Ok(false)` if the stack is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StackOverflow`] if the copy does not fit.
    #[inline]
    pub fn dup(&mut self) -> Result<bool, Error> {
        match self.peek().cloned() {
            Some(value) => self.push(value).map(|()| true),
            None => Ok(false),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.items)
            .field("max_size", &self.max_size)
            .finish()
    }
}
