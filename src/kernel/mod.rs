// src/kernel/mod.rs
pub mod ops;
pub mod symbols;

pub use symbols::{Array, SymbolTable, Variable};
