//! Variable and function registries.
//!
//! Both registries are insertion-ordered and hand out stable indices, which
//! is what compiled opcodes refer to. Names are case-sensitive and unique.

use std::fmt;

use hashbrown::HashMap;

use crate::function::Function;

/// A named `f64` slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: f64,
}

/// Insertion-ordered variable table.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl Variables {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the slot for `name`, creating it with value 0.0 if needed.
    pub fn index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        let index = self.entries.len();
        self.entries.push(Variable {
            name: name.to_string(),
            value: 0.0,
        });
        self.index.insert(name.to_string(), index);
        index
    }

    /// Creates or updates `name`.
    pub fn set(&mut self, name: &str, value: f64) {
        let index = self.index_or_insert(name);
        self.entries[index].value = value;
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|index| self.entries[index].value)
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|variable| variable.value)
    }

    /// Stores into an existing slot. Returns false if `index` is out of range.
    pub fn set_at(&mut self, index: usize, value: f64) -> bool {
        match self.entries.get_mut(index) {
            Some(variable) => {
                variable.value = value;
                true
            }
            None => false,
        }
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|variable| variable.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|variable| variable.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Insertion-ordered function table.
#[derive(Default)]
pub struct Functions {
    entries: Vec<Box<dyn Function>>,
    index: HashMap<String, usize>,
}

impl Functions {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Function> {
        self.entries.get(index).map(|function| function.as_ref())
    }

    /// Registers `function`, replacing any function with the same name.
    ///
    /// A replaced function keeps its index, so compiled programs that call it
    /// pick up the new definition.
    pub fn set(&mut self, function: Box<dyn Function>) -> usize {
        match self.index_of(function.name()) {
            Some(index) => {
                self.entries[index] = function;
                index
            }
            None => {
                let index = self.entries.len();
                self.index.insert(function.name().to_string(), index);
                self.entries.push(function);
                index
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|function| function.name())
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|function| format!("{}/{}", function.name(), function.arity())),
            )
            .finish()
    }
}
