// src/eval.rs
//
// The evaluator proper. Array references are flattened to literals first,
// one reference per pass; what remains is pure infix arithmetic solved with
// an operand stack and an operator stack.

use anyhow::{Context, Result, anyhow, bail};

use crate::kernel::{SymbolTable, ops};
use crate::scan::{DELIMS, strip_ws};

/// Evaluate an expression against a bound symbol table.
pub fn evaluate(expr: &str, table: &SymbolTable) -> Result<f64> {
    eval_stripped(&strip_ws(expr), table)
}

fn eval_stripped(expr: &str, table: &SymbolTable) -> Result<f64> {
    if expr.contains('[') {
        let flat = flatten_first(expr, table)?;
        eval_stripped(&flat, table)
    } else {
        solve(expr, table)
    }
}

/// Resolve the leftmost array reference and splice its value back into the
/// expression as a literal. The index sub-expression goes through the full
/// evaluator, so nested references like `a[b[0]]` resolve inside-out.
/// The splice targets the scanned byte range directly; nothing is re-found
/// by pattern search.
fn flatten_first(expr: &str, table: &SymbolTable) -> Result<String> {
    let bytes = expr.as_bytes();
    let mut last_delim: Option<usize> = None;

    for i in 0..bytes.len() {
        let c = bytes[i] as char;
        if c == '[' {
            let start = last_delim.map_or(0, |d| d + 1);
            let name = &expr[start..i];
            let close = matching_bracket(bytes, i)
                .ok_or_else(|| anyhow!("unbalanced brackets in '{expr}'"))?;

            let sub = &expr[i + 1..close];
            let index = eval_stripped(sub, table)? as i64; // truncates toward zero
            let arr = table
                .array(name)
                .with_context(|| format!("unknown array '{name}'"))?;
            if index < 0 || index as usize >= arr.values.len() {
                bail!(
                    "index {index} outside array '{name}' of length {}",
                    arr.values.len()
                );
            }

            let value = arr.values[index as usize];
            return Ok(format!("{}{}{}", &expr[..start], value, &expr[close + 1..]));
        }
        if DELIMS.contains(c) {
            last_delim = Some(i);
        }
    }
    Ok(expr.to_string())
}

fn matching_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}

/// Two-stack scan over a bracket-free expression. Each operator character
/// first flushes the pending operand substring, then reduces any stacked
/// work of equal or higher precedence before taking its place on the stack.
/// Equal precedence reducing first is what makes evaluation left-associative.
fn solve(expr: &str, table: &SymbolTable) -> Result<f64> {
    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<char> = Vec::new();

    let bytes = expr.as_bytes();
    let mut start = 0;
    for i in 0..=bytes.len() {
        let op = if i < bytes.len() { bytes[i] as char } else { '\0' };
        if i < bytes.len() && !ops::is_operator(op) {
            continue;
        }

        push_operand(&expr[start..i], table, &mut operands)?;
        start = i + 1;
        if i == bytes.len() {
            break;
        }

        match op {
            '(' => operators.push(op),
            ')' => loop {
                match operators.pop() {
                    Some('(') => break,
                    Some(top) => reduce(top, &mut operands)?,
                    None => bail!("unbalanced ')' in '{expr}'"),
                }
            },
            _ => {
                while let Some(&top) = operators.last() {
                    if ops::precedence(top) < ops::precedence(op) {
                        break;
                    }
                    operators.pop();
                    reduce(top, &mut operands)?;
                }
                operators.push(op);
            }
        }
    }

    while let Some(top) = operators.pop() {
        if top == '(' {
            bail!("unbalanced '(' in '{expr}'");
        }
        reduce(top, &mut operands)?;
    }
    match operands.as_slice() {
        [result] => Ok(*result),
        _ => bail!("malformed expression '{expr}'"),
    }
}

/// Known scalar name first, f64 literal second. Empty substrings occur
/// between adjacent operators (e.g. before '(') and are skipped.
fn push_operand(token: &str, table: &SymbolTable, operands: &mut Vec<f64>) -> Result<()> {
    if token.is_empty() {
        return Ok(());
    }
    if let Some(var) = table.scalar(token) {
        operands.push(var.value as f64);
        return Ok(());
    }
    let lit: f64 = token
        .parse()
        .map_err(|_| anyhow!("'{token}' is neither a known symbol nor a number"))?;
    operands.push(lit);
    Ok(())
}

fn reduce(op: char, operands: &mut Vec<f64>) -> Result<()> {
    let rhs = operands.pop();
    let lhs = operands.pop();
    match (lhs, rhs) {
        (Some(l), Some(r)) => {
            operands.push(ops::apply(l, op, r)?);
            Ok(())
        }
        _ => bail!("missing operand for '{op}'"),
    }
}
