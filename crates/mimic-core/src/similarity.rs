//! Pure similarity primitives used by the scorer. No state, no I/O.

use std::collections::HashSet;

/// Edit-distance similarity in `[0, 1]`. Case-insensitive: both sides are
/// lower-cased before comparison.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(&a, &b);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Jaccard similarity over path segments, order-independent. Empty segments
/// are dropped, so `/a//b/` and `/a/b` compare equal. Two segment-less paths
/// are considered identical.
pub fn path_similarity(a: &str, b: &str) -> f64 {
    let seg_a: HashSet<&str> = a.split('/').filter(|s| !s.is_empty()).collect();
    let seg_b: HashSet<&str> = b.split('/').filter(|s| !s.is_empty()).collect();

    if seg_a.is_empty() && seg_b.is_empty() {
        return 1.0;
    }

    let intersection = seg_a.intersection(&seg_b).count();
    let union = seg_a.union(&seg_b).count();

    intersection as f64 / union as f64
}

/// Step-function discount for pattern age. Week-old patterns lose almost
/// nothing; anything past a quarter bottoms out at half weight.
pub fn age_penalty(age_days: f64) -> f64 {
    if age_days <= 1.0 {
        1.0
    } else if age_days <= 7.0 {
        0.95
    } else if age_days <= 30.0 {
        0.85
    } else if age_days <= 90.0 {
        0.7
    } else {
        0.5
    }
}
