mod bind;
mod eval;
mod kernel;
mod scan;

use anyhow::{Result, anyhow};
use std::env;
use std::fs::{self, File};
use std::io::BufReader;

fn main() -> Result<()> {
    // Simple CLI: `exprsolve "<expr>" [values-file]` or `exprsolve -f <expr-file> [values-file]`
    let mut args = env::args();
    let _exe = args.next();
    match args.next() {
        Some(flag) if flag == "-f" => {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("-f needs an expression file"))?;
            let expr = first_expr_line(&path)?;
            run(&expr, args.next().as_deref())
        }
        Some(expr) => run(&expr, args.next().as_deref()),
        None => {
            // no args: guide the user
            eprintln!(
                "No expression provided. Usage:\n  exprsolve \"<expr>\" [values-file]\n  exprsolve -f <expr-file> [values-file]"
            );
            Err(anyhow!("no_input"))
        }
    }
}

fn first_expr_line(path: &str) -> Result<String> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no expression found in {path}"))
}

fn run(expr: &str, values: Option<&str>) -> Result<()> {
    let result = solve_input(expr, values)?;
    println!("{result}");
    Ok(())
}

/// Discover symbols, bind them from the optional values file, evaluate.
/// Without a values file every symbol keeps its default of 0.
fn solve_input(expr: &str, values: Option<&str>) -> Result<f64> {
    let mut table = scan::discover(expr);
    if let Some(path) = values {
        let file = File::open(path)?;
        bind::load(BufReader::new(file), &mut table)?;
    }
    eval::evaluate(expr, &table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pipeline_through_real_files() -> Result<()> {
        let mut values = tempfile::NamedTempFile::new()?;
        writeln!(values, "x 5")?;
        writeln!(values, "a 3 (0,10) (1,20) (2,30)")?;

        let expr = "a[a[0]/10] + x*2";
        let path = values.path().display().to_string();
        run(expr, Some(&path))?;
        assert_eq!(solve_input(expr, Some(&path))?, 30.0);
        Ok(())
    }

    #[test]
    fn driver_works_without_a_values_file() -> Result<()> {
        run("2+3*4", None)?;
        assert_eq!(solve_input("2+3*4", None)?, 14.0);
        // unbound symbols stay at their default of 0
        assert_eq!(solve_input("x+7", None)?, 7.0);
        Ok(())
    }

    #[test]
    fn expression_file_takes_first_nonempty_line() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        writeln!(f)?;
        writeln!(f, "  2+3*4  ")?;
        writeln!(f, "ignored")?;
        assert_eq!(first_expr_line(&f.path().display().to_string())?, "2+3*4");
        Ok(())
    }
}
