//! Primitive character-class parsers shared by the whole grammar.

use chumsky::prelude::*;

use crate::labels::ParserError;

/// A single ASCII digit.
pub(crate) fn digit() -> impl Parser<char, char, Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_digit())
}

/// One or more digits, collected as text.
pub(crate) fn digits() -> impl Parser<char, String, Error = ParserError> + Clone {
    digit().repeated().at_least(1).collect()
}

/// A single lowercase ASCII letter. Input is pre-normalized to lowercase.
pub(crate) fn letter() -> impl Parser<char, char, Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_lowercase())
}

/// One or more whitespace characters.
pub(crate) fn space() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
}

/// Zero or more whitespace characters.
pub(crate) fn space_opt() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace()).repeated().ignored()
}

/// An optional trailing dot, as after an abbreviation ("vol.").
pub(crate) fn dot_opt() -> impl Parser<char, (), Error = ParserError> + Clone {
    just('.').or_not().ignored()
}

/// The separator between a range's endpoints: a dash or slash, optionally
/// padded with whitespace.
pub(crate) fn range_sep() -> impl Parser<char, (), Error = ParserError> + Clone {
    space_opt()
        .then(one_of("-/"))
        .then(space_opt())
        .ignored()
}

/// The separator between list elements: a comma or plus, optionally padded
/// with whitespace.
pub(crate) fn list_sep() -> impl Parser<char, (), Error = ParserError> + Clone {
    space_opt()
        .then(one_of(",+"))
        .then(space_opt())
        .ignored()
}

/// What separates a label from its value: a colon, whitespace, or nothing
/// at all (many records omit any separator, e.g. "v5").
pub(crate) fn label_value_sep() -> impl Parser<char, (), Error = ParserError> + Clone {
    just(':').ignored().then(space_opt()).ignored().or(space_opt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::Parser;

    #[test]
    fn digits_collects_text() {
        assert_eq!(digits().parse("1990").unwrap(), "1990");
        assert!(digits().parse("x").is_err());
    }

    #[test]
    fn range_sep_accepts_padding() {
        let sep = range_sep().then_ignore(end());
        assert!(sep.parse("-").is_ok());
        assert!(sep.parse(" / ").is_ok());
        assert!(sep.parse(",").is_err());
    }

    #[test]
    fn label_value_sep_accepts_nothing() {
        let sep = label_value_sep().then_ignore(end());
        assert!(sep.parse("").is_ok());
        assert!(sep.parse(": ").is_ok());
        assert!(sep.parse(" ").is_ok());
    }
}
