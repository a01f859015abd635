// src/types.rs
//
// C type spelling -> Go type name resolution, and cast construction
// between resolved types. Resolution works from a closed table of known
// spellings; anything else is a recoverable warning and falls back to
// `interface{}` so translation can keep going.

use crate::errors::TranspileError;
use crate::goast::Expr;
use crate::program::Program;

/// Go type used when a C spelling cannot be resolved.
pub const FALLBACK_TYPE: &str = "interface{}";

const SIMPLE_TYPES: &[(&str, &str)] = &[
    ("void", ""),
    ("bool", "bool"),
    ("_Bool", "bool"),
    ("char", "byte"),
    ("signed char", "int8"),
    ("unsigned char", "uint8"),
    ("short", "int16"),
    ("short int", "int16"),
    ("unsigned short", "uint16"),
    ("unsigned short int", "uint16"),
    ("int", "int"),
    ("signed int", "int"),
    ("unsigned int", "uint32"),
    ("long", "int32"),
    ("long int", "int32"),
    ("unsigned long", "uint32"),
    ("unsigned long int", "uint32"),
    ("long long", "int64"),
    ("long long int", "int64"),
    ("unsigned long long", "uint64"),
    ("unsigned long long int", "uint64"),
    ("float", "float32"),
    ("double", "float64"),
    ("long double", "float64"),
    ("size_t", "uint"),
    ("ssize_t", "int"),
    ("char *", "[]byte"),
    ("const char *", "[]byte"),
    ("char **", "[][]byte"),
];

const GO_NUMERIC: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "byte", "rune", "float32", "float64",
];

/// Collapse whitespace runs and normalize `T*` to `T *`.
fn normalize(c_type: &str) -> String {
    let mut spaced = String::with_capacity(c_type.len() + 2);
    for ch in c_type.chars() {
        if ch == '*' && !spaced.ends_with([' ', '*']) {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a C type spelling to a Go type name. `const` qualifiers are
/// ignored except where the table spells them out.
pub fn resolve_type(c_type: &str) -> Result<String, TranspileError> {
    let normalized = normalize(c_type);
    let lookup = |s: &str| {
        SIMPLE_TYPES
            .iter()
            .find(|(c, _)| *c == s)
            .map(|(_, go)| go.to_string())
    };
    if let Some(go) = lookup(&normalized) {
        return Ok(go);
    }
    if let Some(stripped) = normalized.strip_prefix("const ") {
        if let Some(go) = lookup(stripped) {
            return Ok(go);
        }
    }
    // String literals are spelled `char [N]`.
    if normalized.starts_with("char [") && normalized.ends_with(']') {
        return Ok("[]byte".to_string());
    }
    Err(TranspileError::UnknownType {
        c_type: c_type.to_string(),
    })
}

/// Resolve, downgrading failure to a collected warning plus the fallback
/// type.
pub fn resolve_type_or_warn(program: &mut Program, c_type: &str) -> String {
    match resolve_type(c_type) {
        Ok(go) => go,
        Err(warning) => {
            program.add_warning(warning);
            FALLBACK_TYPE.to_string()
        }
    }
}

fn is_numeric(go_type: &str) -> bool {
    GO_NUMERIC.contains(&go_type)
}

/// Build a Go expression converting `expr` from one C type to another.
/// Identical resolved types pass through untouched; distinct numeric
/// types become an explicit Go conversion. Everything else is an error
/// the caller downgrades.
pub fn cast_expr(expr: Expr, from: &str, to: &str) -> Result<Expr, TranspileError> {
    let fail = || TranspileError::InvalidCast {
        from: from.to_string(),
        to: to.to_string(),
    };
    let go_from = resolve_type(from).map_err(|_| fail())?;
    let go_to = resolve_type(to).map_err(|_| fail())?;

    if go_from == go_to || go_to.is_empty() {
        return Ok(expr);
    }
    if is_numeric(&go_from) && is_numeric(&go_to) {
        return Ok(Expr::Conv {
            ty: go_to,
            expr: Box::new(expr),
        });
    }
    Err(fail())
}
