//! Case-insensitive exact name matching.
//!
//! Pharmacy and medicine names are stored with their original casing but compared
//! ignoring case. A match is always anchored to the whole string: `"aspirin"` matches
//! `"Aspirin"` but never `"Aspirin Extra"`.

/// Returns true when `a` and `b` are equal ignoring letter case.
///
/// Compares `str::to_lowercase` forms, so multi-character case expansions
/// (`"ß"` vs `"SS"`) do not match.
pub fn names_match(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ignores_case() {
        assert!(names_match("aspirin", "Aspirin"));
        assert!(names_match("CVS", "cvs"));
        assert!(names_match("Ibuprofène", "IBUPROFÈNE"));
    }

    #[test]
    fn match_is_anchored() {
        assert!(!names_match("aspirin", "Aspirin Extra"));
        assert!(!names_match("Aspirin Extra", "aspirin"));
        assert!(!names_match("spiri", "Aspirin"));
        assert!(!names_match("", "Aspirin"));
    }

    #[test]
    fn case_expansions_are_not_folded() {
        assert!(!names_match("straße", "STRASSE"));
        assert!(names_match("STRASSE", "strasse"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(!names_match("a.pirin", "Aspirin"));
        assert!(!names_match(".*", "Aspirin"));
        assert!(names_match("Vitamin C (500mg)", "vitamin c (500MG)"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a name always matches any recasing of itself.
            #[test]
            fn recased_name_matches(name in "[A-Za-z][A-Za-z0-9 ]{0,40}") {
                prop_assert!(names_match(&name, &name.to_uppercase()));
                prop_assert!(names_match(&name.to_lowercase(), &name));
            }

            /// Property: appending a suffix never matches (anchored comparison).
            #[test]
            fn suffixed_name_never_matches(
                name in "[A-Za-z]{1,20}",
                suffix in "[A-Za-z ]{1,10}"
            ) {
                let longer = format!("{name}{suffix}");
                prop_assert!(!names_match(&name, &longer));
            }
        }
    }
}
