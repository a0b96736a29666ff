// src/bind.rs
//
// Symbol binding: fill discovered symbols with values from a line-oriented
// source. Scalar lines are `name value`; array lines are
// `name count (i0,v0) (i1,v1) ...` with unlisted positions left at 0.

use anyhow::{Context, Result, bail};
use std::io::BufRead;

use crate::kernel::SymbolTable;

/// Read every line of the value source and apply it to the table.
/// Blank lines and lines naming symbols the expression never uses are
/// skipped without error; the source may describe more than one expression.
pub fn load(reader: impl BufRead, table: &mut SymbolTable) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("reading value source")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        apply_line(line, table)?;
    }
    Ok(())
}

fn apply_line(line: &str, table: &mut SymbolTable) -> Result<()> {
    let mut tokens = line.split_whitespace();
    let name = match tokens.next() {
        Some(t) => t,
        None => return Ok(()),
    };
    if !table.contains(name) {
        return Ok(());
    }

    // The table's classification is authoritative: the same name never
    // switches between scalar and array across lines.
    if table.is_array(name) {
        let count: usize = parse_int(tokens.next(), line)
            .with_context(|| format!("array '{name}' needs a length"))?;
        let mut values = vec![0i64; count];
        for pair in tokens {
            let (index, value) = parse_pair(pair, line)?;
            if index >= values.len() {
                bail!("index {index} outside array '{name}' of length {count} in line '{line}'");
            }
            values[index] = value;
        }
        table.bind_array(name, values);
    } else {
        let value: i64 = parse_int(tokens.next(), line)
            .with_context(|| format!("scalar '{name}' needs a value"))?;
        if tokens.next().is_some() {
            bail!("scalar '{name}' given an array-style line: '{line}'");
        }
        table.set_scalar(name, value);
    }
    Ok(())
}

fn parse_int<T: std::str::FromStr>(token: Option<&str>, line: &str) -> Result<T> {
    let token = token.with_context(|| format!("missing number in line '{line}'"))?;
    token
        .parse()
        .map_err(|_| anyhow::anyhow!("'{token}' is not a valid number in line '{line}'"))
}

fn parse_pair(pair: &str, line: &str) -> Result<(usize, i64)> {
    let inner = pair.trim_matches(|c| c == '(' || c == ')');
    let (idx, val) = inner
        .split_once(',')
        .with_context(|| format!("malformed (index,value) pair '{pair}' in line '{line}'"))?;
    Ok((parse_int(Some(idx), line)?, parse_int(Some(val), line)?))
}
