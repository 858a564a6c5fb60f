use pretty_assertions::assert_eq;

use super::*;

#[test]
fn resolve_fills_both_defaults() {
    assert_eq!(
        TypeAttributes::resolve(None, None),
        TypeAttributes::new(Quality::Val, Modifiability::Immutable)
    );
    assert_eq!(TypeAttributes::resolve(None, None), TypeAttributes::default());
}

#[test]
fn resolve_keeps_written_axes() {
    assert_eq!(
        TypeAttributes::resolve(Some(Quality::Ref), None),
        TypeAttributes::new(Quality::Ref, Modifiability::Immutable)
    );
    assert_eq!(
        TypeAttributes::resolve(None, Some(Modifiability::Const)),
        TypeAttributes::new(Quality::Val, Modifiability::Const)
    );
    assert_eq!(
        TypeAttributes::resolve(Some(Quality::Ref), Some(Modifiability::Mutable)),
        TypeAttributes::new(Quality::Ref, Modifiability::Mutable)
    );
}

#[test]
fn from_optional_matches_resolve() {
    let written = TypeAttributesOptional::modifiability(Modifiability::Mutable);
    assert_eq!(
        TypeAttributes::from_optional(written),
        TypeAttributes::resolve(None, Some(Modifiability::Mutable))
    );
}

#[test]
fn with_quality_overrides_only_quality() {
    let attrs = TypeAttributes::new(Quality::Val, Modifiability::Mutable);
    assert_eq!(
        attrs.with_quality(Quality::Ref),
        TypeAttributes::new(Quality::Ref, Modifiability::Mutable)
    );
    assert_eq!(
        attrs.with_modifiability(Modifiability::Const),
        TypeAttributes::new(Quality::Val, Modifiability::Const)
    );
}

#[test]
fn merge_ignores_missing_axes() {
    let attrs = TypeAttributes::new(Quality::Ref, Modifiability::Mutable);
    assert_eq!(attrs.merge(TypeAttributesOptional::NONE), attrs);
    assert_eq!(
        attrs.merge(TypeAttributesOptional::new(Some(Quality::Val), None)),
        TypeAttributes::new(Quality::Val, Modifiability::Mutable)
    );
}

#[test]
fn display() {
    assert_eq!(TypeAttributes::default().to_string(), "val immutable");
    assert_eq!(
        TypeAttributes::new(Quality::Ref, Modifiability::Const).to_string(),
        "ref const"
    );
}
