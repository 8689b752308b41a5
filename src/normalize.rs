//! Input normalization.
//!
//! The grammar assumes lowercase ASCII with no tabs and no leading or
//! trailing junk. Feeding it raw catalog text is the caller's mistake;
//! this helper applies the standard pre-processing for callers that want
//! it: lowercase, tabs to spaces, asterisks stripped, leading whitespace
//! and trailing punctuation trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_JUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s.,;:/-]+$").expect("trailing-junk pattern is valid"));

/// Normalize one raw enumchron line for parsing.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase().replace('\t', " ").replace('*', "");
    let trimmed = lowered.trim_start();
    TRAILING_JUNK.replace(trimmed, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_asterisks() {
        assert_eq!(normalize("V.12  No.3*"), "v.12  no.3");
    }

    #[test]
    fn collapses_tabs_to_spaces() {
        assert_eq!(normalize("v.1\tc.2"), "v.1 c.2");
    }

    #[test]
    fn trims_trailing_punctuation_and_whitespace() {
        assert_eq!(normalize("1988-  "), "1988");
        assert_eq!(normalize("v.12, "), "v.12");
        assert_eq!(normalize("  1990:"), "1990");
    }

    #[test]
    fn keeps_interior_punctuation() {
        assert_eq!(normalize("1988/89-1990/91"), "1988/89-1990/91");
    }
}
