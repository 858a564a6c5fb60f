use pretty_assertions::assert_eq;
use rill_diagnostic::ErrorCode;
use rill_ir::{
    ClassDef, Expr, Item, Modifiability, Param, Quality, Stmt, StmtKind, TemplateDef,
    TypeAttributesOptional,
};

use super::*;
use crate::{FunctionOrigin, InferenceSite};

fn ty(env: &Environment, name: &str) -> TypeExpr {
    TypeExpr::named(env.intern(name), Span::DUMMY)
}

fn ty_with(env: &Environment, name: &str, quality: Quality, modifiability: Modifiability) -> TypeExpr {
    TypeExpr::new(
        env.intern(name),
        TypeAttributesOptional::new(Some(quality), Some(modifiability)),
        Span::DUMMY,
    )
}

fn param(env: &Environment, name: &str, ty: TypeExpr) -> Param {
    Param::typed(env.intern(name), None, ty, Span::DUMMY)
}

fn func(
    env: &Environment,
    name: &str,
    params: Vec<Param>,
    ret: Option<TypeExpr>,
    body: Vec<Stmt>,
) -> Item {
    Item::Function(FunctionDef {
        name: env.intern(name),
        params,
        return_type: ret,
        body,
        span: Span::new(0, 100),
    })
}

fn call_at(env: &Environment, name: &str, args: Vec<Expr>, start: u32) -> Expr {
    Expr::call(env.intern(name), args, Span::new(start, start + 5))
}

fn ident(env: &Environment, name: &str) -> Expr {
    Expr::ident(env.intern(name), Span::DUMMY)
}

fn int(value: i64) -> Expr {
    Expr::int(value, Span::DUMMY)
}

fn let_stmt(
    env: &Environment,
    name: &str,
    modifiability: Option<Modifiability>,
    annotation: Option<TypeExpr>,
    init: Expr,
) -> Stmt {
    Stmt::new(
        StmtKind::Let {
            name: env.intern(name),
            modifiability,
            ty: annotation,
            init,
        },
        Span::DUMMY,
    )
}

/// `fn inc(n: ref mutable int) -> void {}`
fn inc(env: &Environment) -> Item {
    func(
        env,
        "inc",
        vec![param(env, "n", ty_with(env, "int", Quality::Ref, Modifiability::Mutable))],
        Some(ty(env, "void")),
        Vec::new(),
    )
}

fn check(env: &mut Environment, items: Vec<Item>) -> CheckResult {
    check_module(env, &Module::new(items)).unwrap()
}

fn codes(result: &CheckResult) -> Vec<ErrorCode> {
    result.errors.iter().map(|e| e.error.code()).collect()
}

#[test]
fn forward_references_resolve() {
    let mut env = Environment::new();
    let items = vec![
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "int")),
            vec![Stmt::ret(call_at(&env, "add", vec![int(1), int(2)], 10))],
        ),
        func(
            &env,
            "add",
            vec![param(&env, "a", ty(&env, "int")), param(&env, "b", ty(&env, "int"))],
            Some(ty(&env, "int")),
            vec![Stmt::ret(ident(&env, "a"))],
        ),
    ];

    let result = check(&mut env, items);
    assert!(!result.has_errors(), "{:?}", result.errors);
}

#[test]
fn unknown_names_are_reported_with_spans() {
    let mut env = Environment::new();
    let items = vec![func(
        &env,
        "main",
        Vec::new(),
        Some(ty(&env, "void")),
        vec![
            Stmt::expr(call_at(&env, "missing", Vec::new(), 20)),
            Stmt::expr(Expr::ident(env.intern("nope"), Span::new(40, 44))),
        ],
    )];

    let result = check(&mut env, items);
    assert_eq!(
        result.errors,
        vec![
            ReportedError {
                error: ResolutionError::UnknownIdentifier {
                    name: env.intern("missing")
                },
                span: Span::new(20, 25),
            },
            ReportedError {
                error: ResolutionError::UnknownIdentifier {
                    name: env.intern("nope")
                },
                span: Span::new(40, 44),
            },
        ]
    );
}

#[test]
fn identical_redeclaration_is_rejected() {
    let mut env = Environment::new();
    let make = |env: &Environment| {
        func(
            env,
            "f",
            vec![param(env, "a", ty(env, "int"))],
            Some(ty(env, "int")),
            vec![Stmt::ret(ident(env, "a"))],
        )
    };
    let items = vec![make(&env), make(&env)];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2006]);

    let root = env.root_scope();
    let set = env.lookup_overloads_in(root, env.intern("f")).unwrap().unwrap();
    assert_eq!(env.overload_set(set).unwrap().len(), 1);
}

#[test]
fn overloads_differing_in_attributes_coexist() {
    let mut env = Environment::new();
    let items = vec![
        func(
            &env,
            "f",
            vec![param(&env, "a", ty(&env, "int"))],
            Some(ty(&env, "void")),
            Vec::new(),
        ),
        func(
            &env,
            "f",
            vec![param(&env, "a", ty_with(&env, "int", Quality::Ref, Modifiability::Const))],
            Some(ty(&env, "void")),
            Vec::new(),
        ),
    ];

    let result = check(&mut env, items);
    assert!(!result.has_errors());
}

#[test]
fn duplicate_class_is_rejected() {
    let mut env = Environment::new();
    let point = env.intern("Point");
    let items = vec![
        Item::Class(ClassDef {
            name: point,
            span: Span::new(0, 5),
        }),
        Item::Class(ClassDef {
            name: point,
            span: Span::new(6, 11),
        }),
        Item::Class(ClassDef {
            name: env.intern("int"),
            span: Span::new(12, 15),
        }),
    ];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2006, ErrorCode::E2006]);
    assert_eq!(result.errors[0].span, Span::new(6, 11));
}

#[test]
fn user_classes_take_part_in_resolution() {
    let mut env = Environment::new();
    let items = vec![
        Item::Class(ClassDef {
            name: env.intern("Point"),
            span: Span::DUMMY,
        }),
        func(
            &env,
            "norm",
            vec![param(&env, "p", ty(&env, "Point"))],
            Some(ty(&env, "int")),
            vec![Stmt::ret(int(0))],
        ),
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "int")),
            vec![Stmt::ret(call_at(&env, "norm", vec![int(1)], 30))],
        ),
    ];

    let result = check(&mut env, items);
    let [reported] = result.errors.as_slice() else {
        panic!("expected one error, got {:?}", result.errors);
    };
    let ResolutionError::NoMatchingOverload { rejections, .. } = &reported.error else {
        panic!("expected NoMatchingOverload");
    };
    assert_eq!(rejections[0].kind, crate::RejectionKind::ClassMismatch { position: 0 });
}

#[test]
fn let_mutable_binding_reaches_ref_mutable_parameter() {
    let mut env = Environment::new();
    let items = vec![
        inc(&env),
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "void")),
            vec![
                let_stmt(&env, "x", Some(Modifiability::Mutable), None, int(1)),
                Stmt::expr(call_at(&env, "inc", vec![ident(&env, "x")], 10)),
                let_stmt(&env, "y", None, None, int(2)),
                Stmt::expr(call_at(&env, "inc", vec![ident(&env, "y")], 20)),
            ],
        ),
    ];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2001]);
    assert_eq!(result.errors[0].span, Span::new(20, 25));
}

#[test]
fn literal_cannot_bind_to_ref_mutable() {
    let mut env = Environment::new();
    let items = vec![
        inc(&env),
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "void")),
            vec![Stmt::expr(call_at(&env, "inc", vec![int(1)], 0))],
        ),
    ];

    let result = check(&mut env, items);
    let diagnostics = result.diagnostics(&env);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2001);
    assert_eq!(
        diagnostics[0].message,
        "no overload of `inc` accepts (val immutable int)"
    );
    assert!(diagnostics[0].notes[0].ends_with("argument 1: modifiability mismatch"));
}

#[test]
fn annotated_let_and_return_are_checked() {
    let mut env = Environment::new();
    let items = vec![func(
        &env,
        "f",
        Vec::new(),
        Some(ty(&env, "bool")),
        vec![
            let_stmt(&env, "b", None, Some(ty(&env, "bool")), int(1)),
            Stmt::ret(int(2)),
            Stmt::new(StmtKind::Return(None), Span::new(50, 57)),
        ],
    )];

    let result = check(&mut env, items);
    assert_eq!(
        codes(&result),
        vec![ErrorCode::E2004, ErrorCode::E2004, ErrorCode::E2004]
    );
    assert_eq!(result.errors[2].span, Span::new(50, 57));
}

#[test]
fn block_bindings_do_not_escape() {
    let mut env = Environment::new();
    let items = vec![func(
        &env,
        "f",
        Vec::new(),
        Some(ty(&env, "int")),
        vec![
            Stmt::new(
                StmtKind::Block(vec![
                    let_stmt(&env, "inner", None, None, int(1)),
                    Stmt::expr(ident(&env, "inner")),
                ]),
                Span::DUMMY,
            ),
            Stmt::ret(ident(&env, "inner")),
        ],
    )];

    let result = check(&mut env, items);
    assert_eq!(
        result.errors.iter().map(|e| &e.error).collect::<Vec<_>>(),
        vec![&ResolutionError::UnknownIdentifier {
            name: env.intern("inner")
        }]
    );
}

#[test]
fn explicit_signatures_need_annotations() {
    let mut env = Environment::new();
    let x = env.intern("x");
    let items = vec![
        func(
            &env,
            "defaulted",
            vec![Param {
                name: x,
                quality: None,
                ty: None,
                default: Some(int(1)),
                span: Span::new(3, 8),
            }],
            Some(ty(&env, "int")),
            Vec::new(),
        ),
        func(&env, "unannotated", Vec::new(), None, Vec::new()),
    ];

    let result = check(&mut env, items);
    assert_eq!(
        result.errors.iter().map(|e| &e.error).collect::<Vec<_>>(),
        vec![
            &ResolutionError::TypeInferenceUnsupported {
                function: env.intern("defaulted"),
                site: InferenceSite::Parameter(x),
            },
            &ResolutionError::TypeInferenceUnsupported {
                function: env.intern("unannotated"),
                site: InferenceSite::ReturnType,
            },
        ]
    );
    assert_eq!(result.errors[0].span, Span::new(3, 8));
}

#[test]
fn unknown_type_name_is_fatal() {
    let mut env = Environment::new();
    let module = Module::new(vec![func(
        &env,
        "f",
        Vec::new(),
        Some(ty(&env, "Nowhere")),
        Vec::new(),
    )]);

    assert_eq!(
        check_module(&mut env, &module).unwrap_err(),
        InternalError::UnresolvedType {
            name: "Nowhere".to_string()
        }
    );
}

#[test]
fn template_call_instantiates_and_types_the_result() {
    let mut env = Environment::new();
    let x = env.intern("x");
    let template = TemplateDef {
        params: vec![TemplateParam {
            name: env.intern("T"),
            span: Span::DUMMY,
        }],
        inner: FunctionDef {
            name: env.intern("id"),
            params: vec![param(&env, "x", ty(&env, "T"))],
            return_type: Some(ty(&env, "T")),
            body: vec![Stmt::ret(Expr::ident(x, Span::DUMMY))],
            span: Span::DUMMY,
        },
        span: Span::DUMMY,
    };
    let items = vec![
        Item::Template(template),
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "void")),
            vec![let_stmt(
                &env,
                "b",
                None,
                Some(ty(&env, "bool")),
                Expr::template_call(env.intern("id"), vec![ty(&env, "int")], vec![int(1)], Span::new(10, 20)),
            )],
        ),
    ];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2004]);

    let root = env.root_scope();
    let set = env.lookup_overloads_in(root, env.intern("id")).unwrap().unwrap();
    let instances = env.overload_set(set).unwrap().functions().to_vec();
    assert_eq!(instances.len(), 1);
    assert!(matches!(
        env.function(instances[0]).unwrap().origin,
        FunctionOrigin::Instantiated(_)
    ));
}

#[test]
fn instantiated_body_returns_are_checked() {
    let mut env = Environment::new();
    let x = env.intern("x");
    let template = TemplateDef {
        params: vec![TemplateParam {
            name: env.intern("T"),
            span: Span::DUMMY,
        }],
        inner: FunctionDef {
            name: env.intern("truthy"),
            params: vec![param(&env, "x", ty(&env, "T"))],
            return_type: Some(ty(&env, "bool")),
            body: vec![Stmt::ret(Expr::ident(x, Span::new(30, 31)))],
            span: Span::DUMMY,
        },
        span: Span::DUMMY,
    };
    let items = vec![
        Item::Template(template),
        func(
            &env,
            "main",
            Vec::new(),
            Some(ty(&env, "void")),
            vec![Stmt::expr(Expr::template_call(
                env.intern("truthy"),
                vec![ty(&env, "int")],
                vec![int(1)],
                Span::new(10, 20),
            ))],
        ),
    ];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2004]);
    assert_eq!(result.errors[0].span, Span::new(30, 31));

    // The mismatch is reported, but the instance still completes.
    let root = env.root_scope();
    let set = env
        .lookup_overloads_in(root, env.intern("truthy"))
        .unwrap()
        .unwrap();
    assert_eq!(env.overload_set(set).unwrap().len(), 1);
}

#[test]
fn template_call_to_unknown_template() {
    let mut env = Environment::new();
    let items = vec![func(
        &env,
        "main",
        Vec::new(),
        Some(ty(&env, "void")),
        vec![Stmt::expr(Expr::template_call(
            env.intern("ghost"),
            vec![ty(&env, "int")],
            Vec::new(),
            Span::new(4, 9),
        ))],
    )];

    let result = check(&mut env, items);
    assert_eq!(codes(&result), vec![ErrorCode::E2003]);
}
