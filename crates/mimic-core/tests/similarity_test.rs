use mimic_core::similarity::{age_penalty, path_similarity, string_similarity};

#[test]
fn test_string_similarity_identity() {
    assert_eq!(string_similarity("email", "email"), 1.0);
    assert_eq!(string_similarity("", ""), 1.0);
    // Case-insensitive
    assert_eq!(string_similarity("Login", "login"), 1.0);
}

#[test]
fn test_string_similarity_empty_vs_nonempty() {
    assert_eq!(string_similarity("", "x"), 0.0);
    assert_eq!(string_similarity("x", ""), 0.0);
}

#[test]
fn test_string_similarity_edit_distance() {
    // "kitten" -> "sitten" is one edit over max length 6
    let expected = 1.0 - 1.0 / 6.0;
    assert!((string_similarity("kitten", "sitten") - expected).abs() < 1e-9);
}

#[test]
fn test_path_similarity_identity() {
    assert_eq!(path_similarity("/a/b", "/a/b"), 1.0);
    // Empty segments are dropped
    assert_eq!(path_similarity("/a//b/", "/a/b"), 1.0);
    // Both segment-less
    assert_eq!(path_similarity("/", ""), 1.0);
}

#[test]
fn test_path_similarity_jaccard() {
    // {a,b} vs {a,c}: intersection {a}, union {a,b,c} -> 1/3
    let expected = 1.0 / 3.0;
    assert!((path_similarity("/a/b", "/a/c") - expected).abs() < 1e-9);

    // Disjoint
    assert_eq!(path_similarity("/a/b", "/c/d"), 0.0);
}

#[test]
fn test_path_similarity_order_independent() {
    // Segment sets compare equal regardless of order
    assert_eq!(path_similarity("/a/b", "/b/a"), 1.0);
}

#[test]
fn test_age_penalty_steps() {
    assert_eq!(age_penalty(0.0), 1.0);
    assert_eq!(age_penalty(1.0), 1.0);
    assert_eq!(age_penalty(5.0), 0.95);
    assert_eq!(age_penalty(10.0), 0.85);
    assert_eq!(age_penalty(30.0), 0.85);
    assert_eq!(age_penalty(60.0), 0.7);
    assert_eq!(age_penalty(200.0), 0.5);
}
