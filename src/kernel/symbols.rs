// src/kernel/symbols.rs
use std::collections::HashMap;

/// A named scalar bound to a single integer value.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub value: i64,
}

/// A named integer sequence. Empty until a value source declares its length.
#[derive(Debug, Clone)]
pub struct Array {
    pub name: String,
    pub values: Vec<i64>,
}

/// Every distinct name one expression refers to, in first-occurrence order.
/// A name is classified as scalar or array exactly once; later occurrences
/// never re-classify it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scalars: Vec<Variable>,
    arrays: Vec<Array>,
    by_name: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Scalar(usize),
    Array(usize),
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar, ignoring the call if the name is already known.
    pub fn add_scalar(&mut self, name: &str, value: i64) {
        if self.by_name.contains_key(name) {
            return;
        }
        self.by_name
            .insert(name.to_string(), Slot::Scalar(self.scalars.len()));
        self.scalars.push(Variable {
            name: name.to_string(),
            value,
        });
    }

    /// Register an array, ignoring the call if the name is already known.
    pub fn add_array(&mut self, name: &str) {
        if self.by_name.contains_key(name) {
            return;
        }
        self.by_name
            .insert(name.to_string(), Slot::Array(self.arrays.len()));
        self.arrays.push(Array {
            name: name.to_string(),
            values: Vec::new(),
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn is_array(&self, name: &str) -> bool {
        matches!(self.by_name.get(name), Some(Slot::Array(_)))
    }

    pub fn scalar(&self, name: &str) -> Option<&Variable> {
        match self.by_name.get(name)? {
            Slot::Scalar(i) => Some(&self.scalars[*i]),
            Slot::Array(_) => None,
        }
    }

    pub fn array(&self, name: &str) -> Option<&Array> {
        match self.by_name.get(name)? {
            Slot::Array(i) => Some(&self.arrays[*i]),
            Slot::Scalar(_) => None,
        }
    }

    /// Overwrite a scalar's value. Returns false if the name is not a scalar.
    pub fn set_scalar(&mut self, name: &str, value: i64) -> bool {
        match self.by_name.get(name) {
            Some(Slot::Scalar(i)) => {
                self.scalars[*i].value = value;
                true
            }
            _ => false,
        }
    }

    /// Replace an array's backing sequence wholesale. Last binding wins.
    pub fn bind_array(&mut self, name: &str, values: Vec<i64>) -> bool {
        match self.by_name.get(name) {
            Some(Slot::Array(i)) => {
                self.arrays[*i].values = values;
                true
            }
            _ => false,
        }
    }

    pub fn scalars(&self) -> &[Variable] {
        &self.scalars
    }

    pub fn arrays(&self) -> &[Array] {
        &self.arrays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_wins() {
        let mut t = SymbolTable::new();
        t.add_scalar("x", 0);
        t.add_array("x"); // ignored, x is already a scalar
        t.add_scalar("x", 9); // ignored too
        assert!(t.scalar("x").is_some());
        assert!(t.array("x").is_none());
        assert_eq!(t.scalar("x").map(|v| v.value), Some(0));
    }

    #[test]
    fn insertion_order_preserved() {
        let mut t = SymbolTable::new();
        t.add_scalar("b", 0);
        t.add_scalar("a", 0);
        t.add_array("c");
        let names: Vec<&str> = t.scalars().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(t.arrays()[0].name, "c");
    }

    #[test]
    fn rebinding_replaces_sequence() {
        let mut t = SymbolTable::new();
        t.add_array("a");
        assert!(t.bind_array("a", vec![1, 2, 3]));
        assert!(t.bind_array("a", vec![7]));
        assert_eq!(t.array("a").map(|a| a.values.as_slice()), Some(&[7][..]));
    }

    #[test]
    fn kind_mismatch_rejected() {
        let mut t = SymbolTable::new();
        t.add_scalar("x", 0);
        assert!(!t.bind_array("x", vec![1]));
        assert!(!t.set_scalar("missing", 1));
    }
}
