// src/transpile/expr.rs
//
// Expression lowering. A C expression becomes a Go expression plus its
// inferred C type plus two hoisted statement lists: pre-statements that
// must run before the expression is used and post-statements that must
// run after. Go has no assignment or increment in expression position,
// so those forms surface their side effect as a hoisted statement and
// evaluate to the target operand.

use smallvec::smallvec;

use crate::ast::Node;
use crate::errors::TranspileError;
use crate::goast::{self, BinOp, Expr, Lit, LitKind, Stmt, UnOp};
use crate::program::Program;
use crate::types;

use super::StmtVec;

/// Result of lowering one C expression.
#[derive(Debug, Clone)]
pub struct LoweredExpr {
    pub expr: Expr,
    /// The C type the parser inferred for the expression.
    pub c_type: String,
    pub pre: StmtVec,
    pub post: StmtVec,
}

impl LoweredExpr {
    fn pure(expr: Expr, c_type: impl Into<String>) -> Self {
        Self {
            expr,
            c_type: c_type.into(),
            pre: smallvec![],
            post: smallvec![],
        }
    }
}

fn binary_op(op: &str) -> Option<BinOp> {
    Some(match op {
        "+" => BinOp::Add,
        "-" => BinOp::Sub,
        "*" => BinOp::Mul,
        "/" => BinOp::Div,
        "%" => BinOp::Rem,
        "==" => BinOp::Eq,
        "!=" => BinOp::Ne,
        "<" => BinOp::Lt,
        "<=" => BinOp::Le,
        ">" => BinOp::Gt,
        ">=" => BinOp::Ge,
        "&&" => BinOp::And,
        "||" => BinOp::Or,
        _ => return None,
    })
}

/// Strip the wrappers the parser puts around a callee to find the named
/// function being called.
fn callee_name(node: &Node) -> Option<&str> {
    match node {
        Node::DeclRefExpr { name, .. } => Some(name),
        Node::ImplicitCastExpr { child, .. } | Node::ParenExpr { child } => callee_name(child),
        _ => None,
    }
}

pub(crate) fn transpile_expr(
    node: &Node,
    program: &mut Program,
) -> Result<LoweredExpr, TranspileError> {
    match node {
        Node::IntegerLiteral { value, ty } => Ok(LoweredExpr::pure(
            Expr::Lit(Lit {
                kind: LitKind::Int,
                value: value.clone(),
            }),
            ty,
        )),
        Node::FloatingLiteral { value, ty } => Ok(LoweredExpr::pure(
            Expr::Lit(Lit {
                kind: LitKind::Float,
                value: value.clone(),
            }),
            ty,
        )),
        Node::StringLiteral { value, ty } => Ok(LoweredExpr::pure(
            Expr::Lit(Lit {
                kind: LitKind::String,
                value: value.clone(),
            }),
            ty,
        )),
        Node::CharacterLiteral { value, ty } => Ok(LoweredExpr::pure(
            Expr::Lit(Lit {
                kind: LitKind::Char,
                value: value.to_string(),
            }),
            ty,
        )),
        Node::DeclRefExpr { name, ty } => Ok(LoweredExpr::pure(goast::ident(name.clone()), ty)),
        Node::ParenExpr { child } => transpile_expr(child, program),
        Node::ImplicitCastExpr { ty, child } => {
            let mut lowered = transpile_expr(child, program)?;
            match types::cast_expr(lowered.expr.clone(), &lowered.c_type, ty) {
                Ok(cast) => lowered.expr = cast,
                Err(warning) => program.add_warning(warning),
            }
            lowered.c_type = ty.clone();
            Ok(lowered)
        }
        Node::BinaryOperator { op, ty, lhs, rhs } if op == "=" => {
            transpile_assignment(lhs, rhs, ty, program)
        }
        Node::BinaryOperator { op, ty, lhs, rhs } => {
            let Some(go_op) = binary_op(op) else {
                return Err(TranspileError::UnsupportedNode {
                    kind: "BinaryOperator",
                    context: "expression",
                });
            };
            let left = transpile_expr(lhs, program)?;
            let right = transpile_expr(rhs, program)?;
            let mut pre = left.pre;
            pre.extend(right.pre);
            let mut post = left.post;
            post.extend(right.post);
            Ok(LoweredExpr {
                expr: Expr::Binary {
                    op: go_op,
                    lhs: Box::new(left.expr),
                    rhs: Box::new(right.expr),
                },
                c_type: ty.clone(),
                pre,
                post,
            })
        }
        Node::UnaryOperator {
            op,
            prefix,
            child,
            ..
        } if op == "++" || op == "--" => {
            let operand = transpile_expr(child, program)?;
            let step = Stmt::Assign {
                target: operand.expr.clone(),
                value: Expr::Binary {
                    op: if op == "++" { BinOp::Add } else { BinOp::Sub },
                    lhs: Box::new(operand.expr.clone()),
                    rhs: Box::new(goast::int_lit("1")),
                },
            };
            let mut pre = operand.pre;
            let mut post = operand.post;
            // ++x mutates before the value is used, x++ after.
            if *prefix {
                pre.push(step);
            } else {
                post.push(step);
            }
            Ok(LoweredExpr {
                expr: operand.expr,
                c_type: operand.c_type,
                pre,
                post,
            })
        }
        Node::UnaryOperator {
            op, ty, child, ..
        } => {
            let go_op = match op.as_str() {
                "-" => UnOp::Neg,
                "!" => UnOp::Not,
                _ => {
                    return Err(TranspileError::UnsupportedNode {
                        kind: "UnaryOperator",
                        context: "expression",
                    })
                }
            };
            let operand = transpile_expr(child, program)?;
            Ok(LoweredExpr {
                expr: Expr::Unary {
                    op: go_op,
                    expr: Box::new(operand.expr),
                },
                c_type: ty.clone(),
                pre: operand.pre,
                post: operand.post,
            })
        }
        Node::CallExpr { ty, func, args } => transpile_call(ty, func, args, program),
        other => Err(TranspileError::UnsupportedNode {
            kind: other.kind(),
            context: "expression",
        }),
    }
}

/// `a = b` in expression position: hoist the assignment as a
/// pre-statement and evaluate to the assignment target.
fn transpile_assignment(
    lhs: &Node,
    rhs: &Node,
    ty: &str,
    program: &mut Program,
) -> Result<LoweredExpr, TranspileError> {
    let target = transpile_expr(lhs, program)?;
    let value = transpile_expr(rhs, program)?;

    let assigned = match types::cast_expr(value.expr.clone(), &value.c_type, &target.c_type) {
        Ok(cast) => cast,
        Err(warning) => {
            program.add_warning(warning);
            value.expr
        }
    };

    let mut pre = target.pre;
    pre.extend(value.pre);
    pre.push(Stmt::Assign {
        target: target.expr.clone(),
        value: assigned,
    });
    let mut post = target.post;
    post.extend(value.post);

    Ok(LoweredExpr {
        expr: target.expr,
        c_type: ty.to_string(),
        pre,
        post,
    })
}

fn transpile_call(
    ty: &str,
    func: &Node,
    args: &[Node],
    program: &mut Program,
) -> Result<LoweredExpr, TranspileError> {
    let Some(name) = callee_name(func) else {
        return Err(TranspileError::UnsupportedNode {
            kind: func.kind(),
            context: "call expression",
        });
    };
    let name = name.to_string();

    let signature = program.registry.lookup(&name).cloned();
    if signature.is_none() {
        // Calling a library function whose prototype was never declared
        // is common C; assume a permissive default and keep going.
        program.add_warning(TranspileError::UndeclaredFunction { name: name.clone() });
    }

    let call_name = match &signature {
        Some(sig) if !sig.substitution.is_empty() => sig.substitution.clone(),
        _ => name.clone(),
    };
    if let Some((package, _)) = call_name.split_once('.') {
        program.add_import(package);
    }

    let declared_args: Vec<String> = signature
        .as_ref()
        .map(|sig| sig.argument_types.clone())
        .unwrap_or_default();

    let mut pre: StmtVec = smallvec![];
    let mut post: StmtVec = smallvec![];
    let mut lowered_args = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let lowered = transpile_expr(arg, program)?;
        pre.extend(lowered.pre);
        post.extend(lowered.post);
        let value = match declared_args.get(index) {
            Some(declared) => {
                match types::cast_expr(lowered.expr.clone(), &lowered.c_type, declared) {
                    Ok(cast) => cast,
                    Err(warning) => {
                        program.add_warning(warning);
                        lowered.expr
                    }
                }
            }
            None => lowered.expr,
        };
        lowered_args.push(value);
    }

    Ok(LoweredExpr {
        expr: goast::call(&call_name, lowered_args),
        c_type: signature
            .map(|sig| sig.return_type)
            .unwrap_or_else(|| ty.to_string()),
        pre,
        post,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_node(value: &str) -> Node {
        Node::IntegerLiteral {
            value: value.into(),
            ty: "int".into(),
        }
    }

    fn ref_node(name: &str, ty: &str) -> Node {
        Node::DeclRefExpr {
            name: name.into(),
            ty: ty.into(),
        }
    }

    #[test]
    fn literal_lowering_is_pure() {
        let mut program = Program::new();
        let lowered = transpile_expr(&int_node("42"), &mut program).unwrap();
        assert_eq!(lowered.expr, goast::int_lit("42"));
        assert_eq!(lowered.c_type, "int");
        assert!(lowered.pre.is_empty());
        assert!(lowered.post.is_empty());
    }

    #[test]
    fn postfix_increment_hoists_post_statement() {
        let mut program = Program::new();
        let node = Node::UnaryOperator {
            op: "++".into(),
            prefix: false,
            ty: "int".into(),
            child: Box::new(ref_node("x", "int")),
        };
        let lowered = transpile_expr(&node, &mut program).unwrap();
        assert_eq!(lowered.expr, goast::ident("x"));
        assert!(lowered.pre.is_empty());
        assert_eq!(lowered.post.len(), 1);
        assert!(matches!(&lowered.post[0], Stmt::Assign { .. }));
    }

    #[test]
    fn prefix_increment_hoists_pre_statement() {
        let mut program = Program::new();
        let node = Node::UnaryOperator {
            op: "++".into(),
            prefix: true,
            ty: "int".into(),
            child: Box::new(ref_node("x", "int")),
        };
        let lowered = transpile_expr(&node, &mut program).unwrap();
        assert_eq!(lowered.pre.len(), 1);
        assert!(lowered.post.is_empty());
    }

    #[test]
    fn assignment_in_expression_position_is_hoisted() {
        let mut program = Program::new();
        let node = Node::BinaryOperator {
            op: "=".into(),
            ty: "int".into(),
            lhs: Box::new(ref_node("x", "int")),
            rhs: Box::new(int_node("3")),
        };
        let lowered = transpile_expr(&node, &mut program).unwrap();
        assert_eq!(lowered.expr, goast::ident("x"));
        assert_eq!(
            lowered.pre.as_slice(),
            &[Stmt::Assign {
                target: goast::ident("x"),
                value: goast::int_lit("3"),
            }]
        );
    }

    #[test]
    fn undeclared_call_warns_and_assumes_default() {
        let mut program = Program::new();
        let node = Node::CallExpr {
            ty: "int".into(),
            func: Box::new(ref_node("mystery", "int (int)")),
            args: vec![int_node("1")],
        };
        let lowered = transpile_expr(&node, &mut program).unwrap();
        assert_eq!(lowered.c_type, "int");
        assert_eq!(
            program.warnings(),
            &[TranspileError::UndeclaredFunction {
                name: "mystery".into()
            }]
        );
    }

    #[test]
    fn substituted_call_uses_go_name_and_import() {
        let mut program = Program::new();
        let node = Node::CallExpr {
            ty: "void".into(),
            func: Box::new(ref_node("exit", "void (int)")),
            args: vec![int_node("1")],
        };
        let lowered = transpile_expr(&node, &mut program).unwrap();
        assert_eq!(lowered.expr, goast::call("os.Exit", vec![goast::int_lit("1")]));
        assert!(program.has_import("os"));
        assert!(program.warnings().is_empty());
    }
}
