// src/kernel/ops.rs
use anyhow::{Result, bail};

/// Operator alphabet recognized by the solver.
pub const OPERATORS: &str = "()/*+-";

/// Precedence table. Parentheses sit at 0 so a stacked '(' never wins the
/// pop-before-push comparison; it is only removed by the explicit ')' rule.
const PRECEDENCE: [(char, u8); 6] = [
    ('(', 0),
    (')', 0),
    ('/', 5),
    ('*', 5),
    ('+', 4),
    ('-', 4),
];

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(c)
}

pub fn precedence(op: char) -> u8 {
    PRECEDENCE
        .iter()
        .find(|(c, _)| *c == op)
        .map(|(_, p)| *p)
        .unwrap_or(0)
}

/// `lhs OP rhs` over f64. Division by zero is left to IEEE semantics.
pub fn apply(lhs: f64, op: char, rhs: f64) -> Result<f64> {
    Ok(match op {
        '/' => lhs / rhs,
        '*' => lhs * rhs,
        '+' => lhs + rhs,
        '-' => lhs - rhs,
        other => bail!("not a binary operator: '{other}'"),
    })
}
