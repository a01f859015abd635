// src/transpile/mod.rs
//
// Lowering from the C AST to the Go AST. Split across files:
// - functions.rs: function declarations, parameter lists, main rewriting
// - stmt.rs: compound statements
// - expr.rs: expressions and pre/post statement hoisting
// - ret.rs: return statements
// - well_known.rs: reserved names and the unsupported-function denylist

pub mod expr;
pub mod functions;
pub mod ret;
pub mod stmt;
pub mod well_known;

use smallvec::SmallVec;

use crate::ast::Node;
use crate::errors::TranspileError;
use crate::goast;
use crate::program::Program;
use crate::registry::FunctionSignature;

/// Short statement list for pre/post hoisting; almost always 0-2 entries.
pub type StmtVec = SmallVec<[goast::Stmt; 2]>;

/// The function currently being lowered, threaded by value through
/// statement and return lowering so nested lowering can resolve the
/// enclosing return type without shared mutable state.
#[derive(Debug, Clone)]
pub(crate) struct FnCtx {
    pub sig: FunctionSignature,
}

impl FnCtx {
    pub fn new(sig: FunctionSignature) -> Self {
        Self { sig }
    }

    pub fn is_entry_point(&self) -> bool {
        well_known::is_entry_point(&self.sig.name)
    }
}

/// What declaration lowering decided to do with one declaration. Exactly
/// one variant per declaration; fatal errors travel on the `Err` side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclOutcome {
    /// A Go definition to append to the output program.
    Emit(goast::FuncDecl),
    /// The registered signature carries a substitution; call sites will
    /// use the Go builtin instead.
    Substituted,
    /// Forward declaration with no body. The registry captured the
    /// signature; Go has no use for the prototype itself.
    PrototypeOnly,
    /// On the unsupported-function denylist; skipped without diagnostic.
    Denylisted,
}

/// Lower one top-level declaration, appending any emitted definition to
/// the program's output list.
pub fn transpile_decl(node: &Node, program: &mut Program) -> Result<(), TranspileError> {
    match node {
        Node::FunctionDecl(decl) => {
            match functions::transpile_function_decl(decl, program)? {
                DeclOutcome::Emit(func) => program.decls.push(func),
                DeclOutcome::Substituted => {
                    tracing::debug!(function = %decl.name, "skipped: substituted builtin");
                }
                DeclOutcome::PrototypeOnly => {
                    tracing::debug!(function = %decl.name, "skipped: prototype only");
                }
                DeclOutcome::Denylisted => {
                    tracing::debug!(function = %decl.name, "skipped: unsupported function");
                }
            }
            Ok(())
        }
        other => Err(TranspileError::UnsupportedNode {
            kind: other.kind(),
            context: "top-level declaration",
        }),
    }
}
