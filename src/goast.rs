// src/goast.rs
//
// Go-side AST nodes plus the low-level constructors the lowering code
// leans on. The shapes mirror the subset of go/ast the translator emits;
// rendering to source text lives elsewhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    String,
    Char,
}

/// A basic literal, value kept as target source text (unquoted for
/// strings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lit {
    pub kind: LitKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Lit(Lit),
    /// `-x`, `!x`
    Unary { op: UnOp, expr: Box<Expr> },
    /// `f(a, b)`
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// `a <op> b`
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A Go type conversion, `T(x)`.
    Conv { ty: String, expr: Box<Expr> },
    /// `pkg.Name` or `x.field`
    Selector { expr: Box<Expr>, field: String },
    /// A composite literal of slice type, `[]T{...}`.
    SliceLit { ty: String, elems: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    /// `return a, b` — empty results for a bare return.
    Return(Vec<Expr>),
    /// `name := value`
    Define { name: String, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    /// `var name T = value`
    Decl {
        name: String,
        ty: String,
        value: Option<Expr>,
    },
    /// `for key, value := range over { ... }`
    Range {
        key: String,
        value: String,
        over: Expr,
        body: Block,
    },
    Block(Block),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// A named parameter or an unnamed result field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Option<String>,
    pub ty: String,
}

/// A top-level `func` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
    pub body: Block,
}

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(name.into())
}

pub fn int_lit(value: impl Into<String>) -> Expr {
    Expr::Lit(Lit {
        kind: LitKind::Int,
        value: value.into(),
    })
}

/// The `nil` identifier, used as the placeholder result when a cast
/// cannot be built.
pub fn nil_lit() -> Expr {
    Expr::Ident("nil".into())
}

/// `name(args...)` where `name` may be dotted (`os.Exit`).
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    let func = match name.split_once('.') {
        Some((pkg, sel)) => Expr::Selector {
            expr: Box::new(ident(pkg)),
            field: sel.to_string(),
        },
        None => ident(name),
    };
    Expr::Call {
        func: Box::new(func),
        args,
    }
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

/// `len(os.Args)`
pub fn os_args_len() -> Expr {
    call("len", vec![os_args()])
}

/// `os.Args`
pub fn os_args() -> Expr {
    Expr::Selector {
        expr: Box::new(ident("os")),
        field: "Args".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_call_builds_selector() {
        let e = call("os.Exit", vec![int_lit("1")]);
        let Expr::Call { func, args } = e else {
            panic!("expected call");
        };
        assert_eq!(
            *func,
            Expr::Selector {
                expr: Box::new(ident("os")),
                field: "Exit".into()
            }
        );
        assert_eq!(args, vec![int_lit("1")]);
    }

    #[test]
    fn plain_call_builds_ident() {
        let e = call("__init", vec![]);
        let Expr::Call { func, .. } = e else {
            panic!("expected call");
        };
        assert_eq!(*func, ident("__init"));
    }
}
