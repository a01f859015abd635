// src/transpile/functions.rs
//
// Function declaration lowering: registering prototypes, building
// parameter lists, delegating body lowering and rewriting main() for
// Go's entry-point rules.

use crate::ast::{CompoundStmt, FunctionDecl, Node};
use crate::errors::TranspileError;
use crate::goast::{self, Field, Stmt};
use crate::program::Program;
use crate::registry::{extract_return_type, FunctionSignature};
use crate::types;

use super::stmt::transpile_block;
use super::well_known::{is_unsupported, ARGV_LOOP_VAR, OS_PACKAGE, RUNTIME_INIT};
use super::{DeclOutcome, FnCtx};

/// Find the declaration's body. Prototypes and forward declarations have
/// no CompoundStmt child and return None.
fn function_body(decl: &FunctionDecl) -> Option<&CompoundStmt> {
    decl.children.iter().find_map(|child| match child {
        Node::CompoundStmt(body) => Some(body),
        _ => None,
    })
}

/// The C types of the declaration's parameters, in order.
fn argument_types(decl: &FunctionDecl) -> Vec<String> {
    decl.children
        .iter()
        .filter_map(|child| match child {
            Node::ParmVarDecl(param) => Some(param.ty.clone()),
            _ => None,
        })
        .collect()
}

/// Build the Go parameter list. Unresolvable parameter types warn and
/// fall back; order is preserved from the declaration.
fn field_list(decl: &FunctionDecl, program: &mut Program) -> Vec<Field> {
    decl.children
        .iter()
        .filter_map(|child| match child {
            Node::ParmVarDecl(param) => Some(param),
            _ => None,
        })
        .map(|param| Field {
            name: Some(param.name.clone()),
            ty: types::resolve_type_or_warn(program, &param.ty),
        })
        .collect()
}

/// Lower one function declaration.
///
/// The signature is always registered, body or no body; everything past
/// registration can decide to suppress the definition. Hard errors from
/// body lowering abort this declaration only.
pub fn transpile_function_decl(
    decl: &FunctionDecl,
    program: &mut Program,
) -> Result<DeclOutcome, TranspileError> {
    let signature = FunctionSignature {
        name: decl.name.clone(),
        return_type: extract_return_type(&decl.ty)?,
        argument_types: argument_types(decl),
        substitution: String::new(),
    };
    program.registry.register(signature.clone());

    // First registration wins, so an earlier prototype (or a seeded
    // builtin) may own the stored signature.
    let sig = program
        .registry
        .lookup(&decl.name)
        .cloned()
        .unwrap_or(signature);

    if program.registry.has_substitution(&decl.name) {
        return Ok(DeclOutcome::Substituted);
    }

    let Some(body) = function_body(decl) else {
        return Ok(DeclOutcome::PrototypeOnly);
    };

    if is_unsupported(&decl.name) {
        return Ok(DeclOutcome::Denylisted);
    }

    tracing::debug!(
        function = %sig.name,
        arguments = ?sig.argument_types,
        "lowering function definition"
    );

    let mut params = field_list(decl, program);
    let ctx = FnCtx::new(sig.clone());
    let (mut go_body, _terminal) = transpile_block(body, program, &ctx)?;

    let go_return = types::resolve_type_or_warn(program, &sig.return_type);
    let mut results = if go_return.is_empty() {
        vec![]
    } else {
        vec![Field {
            name: None,
            ty: go_return,
        }]
    };

    if ctx.is_entry_point() {
        // Go's main() takes no parameters and returns nothing; program
        // arguments come from os.Args instead.
        results.clear();
        rewrite_entry_point(&mut go_body, &params, program);
        params.clear();
    }

    Ok(DeclOutcome::Emit(goast::FuncDecl {
        name: decl.name.clone(),
        params,
        results,
        body: go_body,
    }))
}

/// Prepend the runtime setup to main(): the __init call, then bindings
/// replacing the argc/argv parameters where the C declaration had them.
/// The original statements follow untouched.
fn rewrite_entry_point(body: &mut goast::Block, params: &[Field], program: &mut Program) {
    let mut prepended = vec![goast::expr_stmt(goast::call(RUNTIME_INIT, vec![]))];

    if let Some(Field {
        name: Some(argc), ..
    }) = params.first()
    {
        program.add_import(OS_PACKAGE);
        prepended.push(Stmt::Define {
            name: argc.clone(),
            value: goast::os_args_len(),
        });
    }

    if let Some(Field {
        name: Some(argv), ..
    }) = params.get(1)
    {
        prepended.push(Stmt::Define {
            name: argv.clone(),
            value: goast::Expr::SliceLit {
                ty: "[][]byte".into(),
                elems: vec![],
            },
        });
        prepended.push(Stmt::Range {
            key: "_".into(),
            value: ARGV_LOOP_VAR.into(),
            over: goast::os_args(),
            body: goast::Block {
                stmts: vec![Stmt::Assign {
                    target: goast::ident(argv.clone()),
                    value: goast::call(
                        "append",
                        vec![
                            goast::ident(argv.clone()),
                            goast::Expr::Conv {
                                ty: "[]byte".into(),
                                expr: Box::new(goast::ident(ARGV_LOOP_VAR)),
                            },
                        ],
                    ),
                }],
            },
        });
    }

    prepended.append(&mut body.stmts);
    body.stmts = prepended;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ParmVarDecl, ReturnStmt};
    use crate::goast::Expr;

    fn param(name: &str, ty: &str) -> Node {
        Node::ParmVarDecl(ParmVarDecl {
            name: name.into(),
            ty: ty.into(),
        })
    }

    fn body_returning(children: Vec<Node>) -> Node {
        Node::CompoundStmt(CompoundStmt {
            children: vec![Node::ReturnStmt(ReturnStmt { children })],
        })
    }

    fn int_node(value: &str) -> Node {
        Node::IntegerLiteral {
            value: value.into(),
            ty: "int".into(),
        }
    }

    #[test]
    fn prototype_only_registers_without_emitting() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "f".into(),
            ty: "int (int)".into(),
            children: vec![param("x", "int")],
        };
        let outcome = transpile_function_decl(&decl, &mut program).unwrap();
        assert_eq!(outcome, DeclOutcome::PrototypeOnly);
        let sig = program.registry.lookup("f").unwrap();
        assert_eq!(sig.return_type, "int");
        assert_eq!(sig.argument_types, vec!["int".to_string()]);
    }

    #[test]
    fn prototype_then_definition_keeps_first_signature() {
        let mut program = Program::new();
        let proto = FunctionDecl {
            name: "f".into(),
            ty: "int (int)".into(),
            children: vec![param("x", "int")],
        };
        transpile_function_decl(&proto, &mut program).unwrap();
        let def = FunctionDecl {
            name: "f".into(),
            ty: "int (int)".into(),
            children: vec![param("x", "int"), body_returning(vec![int_node("1")])],
        };
        let outcome = transpile_function_decl(&def, &mut program).unwrap();
        assert!(matches!(outcome, DeclOutcome::Emit(_)));
        assert_eq!(program.registry.lookup("f").unwrap().return_type, "int");
    }

    #[test]
    fn substituted_builtin_emits_nothing_even_with_body() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "exit".into(),
            ty: "void (int)".into(),
            children: vec![param("status", "int"), body_returning(vec![])],
        };
        let outcome = transpile_function_decl(&decl, &mut program).unwrap();
        assert_eq!(outcome, DeclOutcome::Substituted);
        assert!(program.warnings().is_empty());
    }

    #[test]
    fn denylisted_function_is_silently_skipped() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "__istype".into(),
            ty: "int (int)".into(),
            children: vec![param("c", "int"), body_returning(vec![int_node("0")])],
        };
        let outcome = transpile_function_decl(&decl, &mut program).unwrap();
        assert_eq!(outcome, DeclOutcome::Denylisted);
        assert!(program.warnings().is_empty());
        // The signature is still captured for call sites.
        assert!(program.registry.lookup("__istype").is_some());
    }

    #[test]
    fn malformed_prototype_is_fatal() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "broken".into(),
            ty: " (int)".into(),
            children: vec![],
        };
        let err = transpile_function_decl(&decl, &mut program).unwrap_err();
        assert!(matches!(err, TranspileError::MalformedPrototype { .. }));
    }

    #[test]
    fn simple_definition_keeps_params_and_result() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "square".into(),
            ty: "int (int)".into(),
            children: vec![
                param("x", "int"),
                body_returning(vec![Node::BinaryOperator {
                    op: "*".into(),
                    ty: "int".into(),
                    lhs: Box::new(Node::DeclRefExpr {
                        name: "x".into(),
                        ty: "int".into(),
                    }),
                    rhs: Box::new(Node::DeclRefExpr {
                        name: "x".into(),
                        ty: "int".into(),
                    }),
                }]),
            ],
        };
        let DeclOutcome::Emit(func) = transpile_function_decl(&decl, &mut program).unwrap() else {
            panic!("expected a definition");
        };
        assert_eq!(func.name, "square");
        assert_eq!(
            func.params,
            vec![Field {
                name: Some("x".into()),
                ty: "int".into()
            }]
        );
        assert_eq!(
            func.results,
            vec![Field {
                name: None,
                ty: "int".into()
            }]
        );
        assert_eq!(func.body.stmts.len(), 1);
    }

    #[test]
    fn unresolvable_return_type_warns_and_falls_back() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "now".into(),
            ty: "time_t (void)".into(),
            children: vec![body_returning(vec![int_node("0")])],
        };
        let DeclOutcome::Emit(func) = transpile_function_decl(&decl, &mut program).unwrap() else {
            panic!("expected a definition");
        };
        assert_eq!(func.results[0].ty, types::FALLBACK_TYPE);
        assert!(program
            .warnings()
            .iter()
            .any(|w| matches!(w, TranspileError::UnknownType { .. })));
    }

    #[test]
    fn entry_point_without_params_prepends_only_init() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "main".into(),
            ty: "int (void)".into(),
            children: vec![body_returning(vec![int_node("0")])],
        };
        let DeclOutcome::Emit(func) = transpile_function_decl(&decl, &mut program).unwrap() else {
            panic!("expected a definition");
        };
        assert!(func.params.is_empty());
        assert!(func.results.is_empty());
        assert_eq!(func.body.stmts.len(), 2);
        assert_eq!(
            func.body.stmts[0],
            goast::expr_stmt(goast::call(RUNTIME_INIT, vec![]))
        );
        assert_eq!(func.body.stmts[1], Stmt::Return(vec![]));
        assert!(!program.has_import("os"));
    }

    #[test]
    fn entry_point_with_argc_argv_rewrites_in_order() {
        let mut program = Program::new();
        let decl = FunctionDecl {
            name: "main".into(),
            ty: "int (int, char **)".into(),
            children: vec![
                param("argc", "int"),
                param("argv", "char **"),
                body_returning(vec![int_node("0")]),
            ],
        };
        let DeclOutcome::Emit(func) = transpile_function_decl(&decl, &mut program).unwrap() else {
            panic!("expected a definition");
        };
        assert!(func.params.is_empty());
        assert!(func.results.is_empty());
        assert!(program.has_import("os"));

        // __init, argc binding, argv literal, argv loop, original body.
        assert_eq!(func.body.stmts.len(), 5);
        assert_eq!(
            func.body.stmts[0],
            goast::expr_stmt(goast::call(RUNTIME_INIT, vec![]))
        );
        assert_eq!(
            func.body.stmts[1],
            Stmt::Define {
                name: "argc".into(),
                value: goast::os_args_len(),
            }
        );
        assert_eq!(
            func.body.stmts[2],
            Stmt::Define {
                name: "argv".into(),
                value: Expr::SliceLit {
                    ty: "[][]byte".into(),
                    elems: vec![],
                },
            }
        );
        assert!(matches!(
            &func.body.stmts[3],
            Stmt::Range { key, value, .. } if key == "_" && value == ARGV_LOOP_VAR
        ));
        assert_eq!(func.body.stmts[4], Stmt::Return(vec![]));
    }
}
