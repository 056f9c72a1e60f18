//! Unit-aware string slicing.
//!
//! Prefixes are always cut on `char` boundaries, so multi-byte text never
//! panics. Requests past either end clamp instead of failing.

use crate::types::Unit;

/// Number of `unit`s in `text`.
pub fn count(text: &str, unit: Unit) -> usize {
    match unit {
        Unit::Character => text.chars().count(),
        Unit::Word => text.split_whitespace().count(),
    }
}

/// Longest prefix of `full` holding at most `n` units.
///
/// Returns `full` unchanged once `n` reaches its unit count. Word prefixes
/// end right after the n-th word, without the whitespace that follows it.
pub fn prefix(full: &str, unit: Unit, n: usize) -> &str {
    match unit {
        Unit::Character => full
            .char_indices()
            .nth(n)
            .map_or(full, |(end, _)| &full[..end]),
        Unit::Word => {
            if n == 0 {
                return "";
            }
            let mut words = 0;
            let mut in_word = false;
            for (idx, ch) in full.char_indices() {
                if ch.is_whitespace() {
                    if in_word {
                        words += 1;
                        if words == n {
                            return &full[..idx];
                        }
                    }
                    in_word = false;
                } else {
                    in_word = true;
                }
            }
            full
        }
    }
}
