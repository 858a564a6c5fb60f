use pretty_assertions::assert_eq;
use rill_ir::{Modifiability, Quality};
use rill_types::{RejectReason, TypeAttributes};

use super::*;
use crate::ScopeId;

/// Declare a complete function with the given parameter types.
fn declare(env: &mut Environment, scope: ScopeId, name: &str, params: &[TypeId]) -> FunctionId {
    let name = env.intern(name);
    let incomplete = env.begin_construct(scope, name).unwrap();
    for (index, &param) in params.iter().enumerate() {
        let resolved = env.dereference(param).unwrap();
        let param_name = env.intern(&format!("p{index}"));
        env.declare_parameter(&incomplete, param_name, resolved.class, resolved.attributes)
            .unwrap();
    }
    let ret = env
        .make_type_id(env.builtins().void, TypeAttributes::default())
        .unwrap();
    let mangled = env.mangle(scope, name, params, None).unwrap();
    env.complete(incomplete, ret, mangled).unwrap()
}

fn set_of(env: &Environment, function: FunctionId) -> OverloadSetId {
    env.function(function).unwrap().overload_set
}

struct Types {
    int: TypeId,
    int_mutable: TypeId,
    int_ref_mutable: TypeId,
    int_ref_const: TypeId,
    bool: TypeId,
}

fn types(env: &mut Environment) -> Types {
    let builtins = env.builtins();
    let mut make = |class, quality, modifiability| {
        env.make_type_id(class, TypeAttributes::new(quality, modifiability))
            .unwrap()
    };
    Types {
        int: make(builtins.int, Quality::Val, Modifiability::Immutable),
        int_mutable: make(builtins.int, Quality::Val, Modifiability::Mutable),
        int_ref_mutable: make(builtins.int, Quality::Ref, Modifiability::Mutable),
        int_ref_const: make(builtins.int, Quality::Ref, Modifiability::Const),
        bool: make(builtins.bool, Quality::Val, Modifiability::Immutable),
    }
}

#[test]
fn zero_arity_call_matches_zero_parameter_candidate() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let f = declare(&mut env, root, "f", &[]);
    let set = set_of(&env, f);

    let found = resolve(&mut env, set, &[]).unwrap();
    assert_eq!(found.function, f);
    assert!(found.argument_types.is_empty());
}

#[test]
fn identical_type_ids_pass_through() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int, t.bool]);
    let set = set_of(&env, f);

    let found = resolve(&mut env, set, &[t.int, t.bool]).unwrap();
    assert_eq!(found.function, f);
    assert_eq!(found.argument_types.as_slice(), &[t.int, t.bool]);
}

#[test]
fn value_parameter_accepts_any_attributes() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int]);
    let set = set_of(&env, f);

    let found = resolve(&mut env, set, &[t.int_ref_mutable]).unwrap();
    assert_eq!(found.function, f);
    assert_eq!(found.argument_types.as_slice(), &[t.int]);
}

#[test]
fn ref_mutable_parameter_takes_mutable_value() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int_ref_mutable]);
    let set = set_of(&env, f);

    let found = resolve(&mut env, set, &[t.int_mutable]).unwrap();
    // Source quality is kept, target modifiability applied.
    assert_eq!(found.argument_types.as_slice(), &[t.int_mutable]);
}

#[test]
fn ref_mutable_parameter_rejects_immutable_value() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int_ref_mutable]);
    let set = set_of(&env, f);

    let err = resolve(&mut env, set, &[t.int]).unwrap_err();
    assert_eq!(
        err,
        SemaError::Resolution(ResolutionError::NoMatchingOverload {
            name: env.intern("f"),
            arguments: vec![t.int],
            rejections: vec![CandidateRejection {
                function: f,
                kind: RejectionKind::AttributeConversionRejected {
                    position: 0,
                    reason: RejectReason::ModifiabilityMismatch,
                },
            }],
        })
    );
}

#[test]
fn ref_const_parameter_rejects_differing_source() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int_ref_const]);
    let set = set_of(&env, f);

    assert!(resolve(&mut env, set, &[t.int_mutable]).is_err());
    assert!(resolve(&mut env, set, &[t.int_ref_const]).is_ok());
}

#[test]
fn class_mismatch_rejects_after_attributes_pass() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int]);
    let set = set_of(&env, f);

    let Err(SemaError::Resolution(ResolutionError::NoMatchingOverload { rejections, .. })) =
        resolve(&mut env, set, &[t.bool])
    else {
        panic!("expected NoMatchingOverload");
    };
    assert_eq!(rejections[0].kind, RejectionKind::ClassMismatch { position: 0 });
}

#[test]
fn arity_mismatch_is_recorded() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int, t.int]);
    let set = set_of(&env, f);

    let Err(SemaError::Resolution(ResolutionError::NoMatchingOverload { rejections, .. })) =
        resolve(&mut env, set, &[t.int])
    else {
        panic!("expected NoMatchingOverload");
    };
    assert_eq!(
        rejections[0].kind,
        RejectionKind::ArityMismatch {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn picks_the_only_admissible_candidate() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let by_int = declare(&mut env, root, "f", &[t.int]);
    let by_bool = declare(&mut env, root, "f", &[t.bool]);
    let set = set_of(&env, by_int);
    assert_eq!(set, set_of(&env, by_bool));

    assert_eq!(resolve(&mut env, set, &[t.bool]).unwrap().function, by_bool);
    assert_eq!(resolve(&mut env, set, &[t.int]).unwrap().function, by_int);
}

#[test]
fn two_admissible_candidates_are_ambiguous() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    // `val int` and `ref mutable int` both accept a mutable value.
    let by_value = declare(&mut env, root, "f", &[t.int]);
    let by_ref = declare(&mut env, root, "f", &[t.int_ref_mutable]);
    let set = set_of(&env, by_value);

    assert_eq!(
        resolve(&mut env, set, &[t.int_mutable]),
        Err(SemaError::Resolution(ResolutionError::AmbiguousOverload {
            name: env.intern("f"),
            candidates: vec![by_value, by_ref],
        }))
    );
}

#[test]
fn allow_no_entry_turns_no_match_into_none() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let f = declare(&mut env, root, "f", &[t.int]);
    let set = set_of(&env, f);

    assert_eq!(resolve_allow_no_entry(&mut env, set, &[t.bool]), Ok(None));
    assert_eq!(
        resolve_allow_no_entry(&mut env, set, &[t.int])
            .unwrap()
            .map(|found| found.function),
        Some(f)
    );
}

#[test]
fn allow_no_entry_still_reports_ambiguity() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    let first = declare(&mut env, root, "f", &[t.int]);
    declare(&mut env, root, "f", &[t.int_ref_mutable]);
    let set = set_of(&env, first);

    assert!(matches!(
        resolve_allow_no_entry(&mut env, set, &[t.int_mutable]),
        Err(SemaError::Resolution(ResolutionError::AmbiguousOverload { .. }))
    ));
}

#[test]
fn resolution_is_deterministic() {
    let mut env = Environment::new();
    let root = env.root_scope();
    let t = types(&mut env);
    declare(&mut env, root, "f", &[t.int]);
    let g = declare(&mut env, root, "f", &[t.int_ref_const, t.bool]);
    let set = set_of(&env, g);

    let first = resolve(&mut env, set, &[t.int_ref_const, t.bool]);
    let type_count = env.types().len();
    let second = resolve(&mut env, set, &[t.int_ref_const, t.bool]);
    assert_eq!(first, second);
    assert_eq!(env.types().len(), type_count);
}
