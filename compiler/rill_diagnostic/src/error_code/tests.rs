use super::*;

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        assert_ne!(
            code.is_resolution_error(),
            code.is_internal_error(),
            "{code} must be in exactly one range"
        );
    }
}

#[test]
fn test_display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
        assert!(!code.description().is_empty());
    }
}

#[test]
fn test_codes_are_unique() {
    use std::collections::HashSet;
    let strings: HashSet<_> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    assert_eq!(strings.len(), ErrorCode::ALL.len());
}
