use pretty_assertions::assert_eq;

use super::*;
use rill_ir::{Modifiability, Quality};

const INT: ClassId = ClassId::from_raw(0);
const BOOL: ClassId = ClassId::from_raw(1);

#[test]
fn make_type_id_is_memoized() {
    let mut table = TypeTable::new();
    let a = table.make_type_id(INT, TypeAttributes::default()).unwrap();
    let b = table.make_type_id(INT, TypeAttributes::default()).unwrap();

    assert_eq!(a, b);
    assert_eq!(table.len(), 1);
}

#[test]
fn attributes_distinguish_ids() {
    let mut table = TypeTable::new();
    let val = table.make_type_id(INT, TypeAttributes::default()).unwrap();
    let mutable_ref = table
        .make_type_id(
            INT,
            TypeAttributes::new(Quality::Ref, Modifiability::Mutable),
        )
        .unwrap();
    let other_class = table.make_type_id(BOOL, TypeAttributes::default()).unwrap();

    assert_ne!(val, mutable_ref);
    assert_ne!(val, other_class);
    assert_eq!(table.len(), 3);
}

#[test]
fn dereference_roundtrip() {
    let mut table = TypeTable::new();
    let attrs = TypeAttributes::new(Quality::Ref, Modifiability::Const);
    let id = table.make_type_id(BOOL, attrs).unwrap();

    assert_eq!(table.dereference(id), Ok(ResolvedType::new(BOOL, attrs)));
}

#[test]
fn dereference_unknown_id_fails() {
    let table = TypeTable::new();
    let bogus = TypeId::from_raw(17);

    assert!(table.is_empty());
    assert_eq!(
        table.dereference(bogus),
        Err(TypeTableError::UnknownTypeId(bogus))
    );
    assert_eq!(
        TypeTableError::UnknownTypeId(bogus).to_string(),
        "unknown type id 17"
    );
}
