// src/ast.rs
//
// C-side AST nodes, as produced by the clang dump parser. Only the node
// kinds the lowering stage consumes are represented; every node carries
// the C type spelling the parser annotated it with.

/// A function declaration. `ty` is the full prototype spelling, shaped
/// `<return-type> (<arg-types>)`, e.g. `int (int, char **)`. Children hold
/// the parameter declarations and, for a definition, exactly one
/// `CompoundStmt` body.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub ty: String,
    pub children: Vec<Node>,
}

/// A parameter declaration inside a function prototype.
#[derive(Debug, Clone)]
pub struct ParmVarDecl {
    pub name: String,
    pub ty: String,
}

/// A local variable declaration.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: String,
    pub init: Option<Box<Node>>,
}

/// A `{ ... }` block.
#[derive(Debug, Clone)]
pub struct CompoundStmt {
    pub children: Vec<Node>,
}

/// A `return;` or `return <expr>;` statement. At most one child.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub enum Node {
    FunctionDecl(FunctionDecl),
    ParmVarDecl(ParmVarDecl),
    VarDecl(VarDecl),
    CompoundStmt(CompoundStmt),
    ReturnStmt(ReturnStmt),

    /// `42` — value kept as written in the source.
    IntegerLiteral { value: String, ty: String },
    /// `1.5`
    FloatingLiteral { value: String, ty: String },
    /// `"hello"` — value is the unquoted content.
    StringLiteral { value: String, ty: String },
    /// `'a'`
    CharacterLiteral { value: char, ty: String },
    /// A reference to a named declaration.
    DeclRefExpr { name: String, ty: String },
    /// A compiler-inserted conversion, e.g. int -> double at a call site.
    ImplicitCastExpr { ty: String, child: Box<Node> },
    ParenExpr { child: Box<Node> },
    /// `a <op> b`, including `=` in expression position. `ty` is the
    /// result type the parser inferred.
    BinaryOperator {
        op: String,
        ty: String,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// `++a`, `a--`, `-a`, `!a`.
    UnaryOperator {
        op: String,
        prefix: bool,
        ty: String,
        child: Box<Node>,
    },
    /// `f(a, b)` — callee is a `DeclRefExpr` (possibly behind an
    /// implicit cast).
    CallExpr {
        ty: String,
        func: Box<Node>,
        args: Vec<Node>,
    },
}

impl Node {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::FunctionDecl(_) => "FunctionDecl",
            Node::ParmVarDecl(_) => "ParmVarDecl",
            Node::VarDecl(_) => "VarDecl",
            Node::CompoundStmt(_) => "CompoundStmt",
            Node::ReturnStmt(_) => "ReturnStmt",
            Node::IntegerLiteral { .. } => "IntegerLiteral",
            Node::FloatingLiteral { .. } => "FloatingLiteral",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::CharacterLiteral { .. } => "CharacterLiteral",
            Node::DeclRefExpr { .. } => "DeclRefExpr",
            Node::ImplicitCastExpr { .. } => "ImplicitCastExpr",
            Node::ParenExpr { .. } => "ParenExpr",
            Node::BinaryOperator { .. } => "BinaryOperator",
            Node::UnaryOperator { .. } => "UnaryOperator",
            Node::CallExpr { .. } => "CallExpr",
        }
    }
}
