// src/transpile/ret.rs
//
// Return statement lowering. The declared return type comes from the
// enclosing function's registered signature, threaded in via FnCtx; the
// returned value is cast from the expression's inferred C type to that
// declared type.

use smallvec::smallvec;

use crate::ast::ReturnStmt;
use crate::errors::TranspileError;
use crate::goast::{self, Expr, Stmt};
use crate::program::Program;
use crate::types;

use super::expr::transpile_expr;
use super::well_known::{OS_PACKAGE, PROCESS_EXIT};
use super::{FnCtx, StmtVec};

/// Lower one return statement. Pre/post statements from the value
/// expression are handed back for the caller to splice immediately
/// around the produced statement.
pub(crate) fn transpile_return(
    node: &ReturnStmt,
    program: &mut Program,
    ctx: &FnCtx,
) -> Result<(Stmt, StmtVec, StmtVec), TranspileError> {
    // Bare `return;` needs none of the logic below, entry point included.
    let Some(value) = node.children.first() else {
        return Ok((Stmt::Return(vec![]), smallvec![], smallvec![]));
    };

    let lowered = transpile_expr(value, program)?;

    // The registry holds the signature captured at declaration time; the
    // ctx clone is identical but lookup keeps call-site behavior uniform.
    let declared = program
        .registry
        .lookup(&ctx.sig.name)
        .map(|sig| sig.return_type.clone())
        .unwrap_or_else(|| ctx.sig.return_type.clone());

    let result = match types::cast_expr(lowered.expr.clone(), &lowered.c_type, &declared) {
        Ok(cast) => cast,
        Err(warning) => {
            program.add_warning(warning);
            goast::nil_lit()
        }
    };

    if ctx.is_entry_point() {
        // main() may not return a value in Go. A literal 0 is a plain
        // successful exit; everything else goes through os.Exit. Only
        // the literal spelling "0" is recognized, so a computed zero
        // still exits explicitly.
        let zero_literal = matches!(&lowered.expr, Expr::Lit(lit) if lit.value == "0");
        if zero_literal {
            return Ok((Stmt::Return(vec![]), lowered.pre, lowered.post));
        }
        program.add_import(OS_PACKAGE);
        let exit = goast::expr_stmt(goast::call(PROCESS_EXIT, vec![result]));
        return Ok((exit, lowered.pre, lowered.post));
    }

    Ok((Stmt::Return(vec![result]), lowered.pre, lowered.post))
}
