//! Fixed neighborhood options and the "other" sentinel.

/// The pills the intake form always shows, in display order.
pub const FIXED_NEIGHBORHOODS: &[&str] = &[
    "Tribeca",
    "SoHo",
    "Chelsea",
    "Upper East Side",
    "Upper West Side",
    "Financial District",
    "West Village",
    "Greenwich Village",
    "Midtown",
    "Brooklyn Heights",
];

/// Reserved selection value meaning "other is selected".
///
/// Never persisted: validation swaps it for the free-text label.
pub const OTHER_SENTINEL: &str = "__other__";

/// Maximum length of the free-text "other" label.
pub const OTHER_MAX_LEN: usize = 100;

/// Case-insensitive membership test against [`FIXED_NEIGHBORHOODS`].
pub fn is_fixed_option(name: &str) -> bool {
    FIXED_NEIGHBORHOODS
        .iter()
        .any(|fixed| fixed.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_option_lookup_ignores_case() {
        assert!(is_fixed_option("soho"));
        assert!(is_fixed_option("Upper East Side"));
        assert!(!is_fixed_option("Astoria"));
    }

    #[test]
    fn sentinel_is_not_a_real_label() {
        assert!(!is_fixed_option(OTHER_SENTINEL));
        assert!(!crate::gazetteer::GAZETTEER.contains(&OTHER_SENTINEL));
    }
}
