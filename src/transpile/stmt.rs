// src/transpile/stmt.rs
//
// Compound statement lowering. Each child statement is lowered in order,
// with any pre/post statements hoisted out of its expressions spliced
// immediately around it.

use crate::ast::{CompoundStmt, Node, VarDecl};
use crate::errors::TranspileError;
use crate::goast::{Block, Expr, Stmt};
use crate::program::Program;
use crate::types;

use super::expr::transpile_expr;
use super::ret::transpile_return;
use super::FnCtx;

/// An expression statement whose remaining value carries no effect once
/// its side effects are hoisted (e.g. the `x` left over from `x = 3;`).
/// Go rejects such statements, so they are dropped.
fn is_vacuous(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(_) | Expr::Lit(_))
}

/// Lower a `{ ... }` block. Returns the Go block and whether its last
/// statement is a return.
pub(crate) fn transpile_block(
    block: &CompoundStmt,
    program: &mut Program,
    ctx: &FnCtx,
) -> Result<(Block, bool), TranspileError> {
    let mut stmts = Vec::with_capacity(block.children.len());

    for child in &block.children {
        match child {
            Node::ReturnStmt(ret) => {
                let (stmt, pre, post) = transpile_return(ret, program, ctx)?;
                stmts.extend(pre);
                stmts.push(stmt);
                stmts.extend(post);
            }
            Node::VarDecl(decl) => {
                lower_var_decl(decl, program, &mut stmts)?;
            }
            Node::CompoundStmt(inner) => {
                let (lowered, _) = transpile_block(inner, program, ctx)?;
                stmts.push(Stmt::Block(lowered));
            }
            expr_node => {
                let lowered = transpile_expr(expr_node, program)?;
                stmts.extend(lowered.pre);
                if !is_vacuous(&lowered.expr) {
                    stmts.push(Stmt::Expr(lowered.expr));
                }
                stmts.extend(lowered.post);
            }
        }
    }

    let terminal_return = matches!(stmts.last(), Some(Stmt::Return(_)));
    Ok((Block { stmts }, terminal_return))
}

fn lower_var_decl(
    decl: &VarDecl,
    program: &mut Program,
    stmts: &mut Vec<Stmt>,
) -> Result<(), TranspileError> {
    let go_type = types::resolve_type_or_warn(program, &decl.ty);
    let value = match &decl.init {
        Some(init) => {
            let lowered = transpile_expr(init, program)?;
            stmts.extend(lowered.pre);
            let cast = match types::cast_expr(lowered.expr.clone(), &lowered.c_type, &decl.ty) {
                Ok(cast) => cast,
                Err(warning) => {
                    program.add_warning(warning);
                    lowered.expr
                }
            };
            stmts.push(Stmt::Decl {
                name: decl.name.clone(),
                ty: go_type,
                value: Some(cast),
            });
            stmts.extend(lowered.post);
            return Ok(());
        }
        None => None,
    };
    stmts.push(Stmt::Decl {
        name: decl.name.clone(),
        ty: go_type,
        value,
    });
    Ok(())
}
