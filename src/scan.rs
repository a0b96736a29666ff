// src/scan.rs
//
// Symbol discovery: one forward pass over the expression, classifying each
// distinct name as scalar or array by the character that ends its token.

use crate::kernel::SymbolTable;

/// Characters that end a token inside an expression.
pub const DELIMS: &str = " \t*+-/()[]";

/// Drop spaces and tabs so token positions line up across every phase.
pub fn strip_ws(expr: &str) -> String {
    expr.chars().filter(|c| *c != ' ' && *c != '\t').collect()
}

/// Scan the expression and build its symbol table. A token immediately
/// followed by '[' is an array name; anything else is a scalar. Integer
/// literals register as scalars pre-set to their own value, so the solver
/// can resolve every operand through one lookup path.
pub fn discover(expr: &str) -> SymbolTable {
    let mut table = SymbolTable::new();
    let stripped = strip_ws(expr);
    let bytes = stripped.as_bytes();

    let mut start = 0;
    for i in 0..=bytes.len() {
        let at_delim = i < bytes.len() && DELIMS.contains(bytes[i] as char);
        if i < bytes.len() && !at_delim {
            continue;
        }
        if i > start {
            let token = &stripped[start..i];
            if at_delim && bytes[i] == b'[' {
                table.add_array(token);
            } else {
                table.add_scalar(token, token.parse().unwrap_or(0));
            }
        }
        start = i + 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_names(t: &SymbolTable) -> Vec<String> {
        t.scalars().iter().map(|v| v.name.clone()).collect()
    }

    fn array_names(t: &SymbolTable) -> Vec<String> {
        t.arrays().iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn classifies_by_following_bracket() {
        let t = discover("x + a[i] * y");
        assert_eq!(scalar_names(&t), ["x", "i", "y"]);
        assert_eq!(array_names(&t), ["a"]);
    }

    #[test]
    fn literals_become_prefilled_scalars() {
        let t = discover("3*x+41");
        assert_eq!(t.scalar("3").map(|v| v.value), Some(3));
        assert_eq!(t.scalar("41").map(|v| v.value), Some(41));
        assert_eq!(t.scalar("x").map(|v| v.value), Some(0));
    }

    #[test]
    fn duplicates_register_once() {
        let t = discover("a[0]+a[1]+x*x");
        assert_eq!(array_names(&t), ["a"]);
        assert_eq!(scalar_names(&t), ["0", "1", "x"]);
    }

    #[test]
    fn whitespace_is_invisible() {
        let a = discover("x\t+ y[ 2 ]");
        let b = discover("x+y[2]");
        assert_eq!(scalar_names(&a), scalar_names(&b));
        assert_eq!(array_names(&a), array_names(&b));
    }

    #[test]
    fn discovery_is_idempotent() {
        let expr = "varx + vary*varz[(vara+varb[(a+b)*33])]";
        let a = discover(expr);
        let b = discover(expr);
        assert_eq!(scalar_names(&a), scalar_names(&b));
        assert_eq!(array_names(&a), array_names(&b));
    }

    #[test]
    fn nested_index_names_all_found() {
        let t = discover("a[b[c[0]]]");
        assert_eq!(array_names(&t), ["a", "b", "c"]);
        assert_eq!(scalar_names(&t), ["0"]);
    }

    #[test]
    fn garbage_still_accepted() {
        // no failure modes: stray tokens become unbound scalars
        let t = discover("@@@+x");
        assert!(t.scalar("@@@").is_some());
        assert_eq!(t.scalar("@@@").map(|v| v.value), Some(0));
    }
}
