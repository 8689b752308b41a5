//! The parameterized combinators the grammar is assembled from.
//!
//! Three shapes cover nearly everything in real enumchron data:
//!
//! - `range`: `X` or `X-Y` / `X/Y` — a single value or a pair of endpoints.
//! - `list`: one or more separator-delimited repetitions of a component.
//! - `tagged_list`: a field label followed by a list ("v.1-3,5").
//!
//! Each factory takes its base rules as arguments and returns a fresh
//! parser, so differently-configured rule graphs can coexist.

use chumsky::prelude::*;

use crate::atoms::{digits, dot_opt, label_value_sep, letter, list_sep, range_sep};
use crate::labels::{LabelSet, ParserError};
use crate::tree::{ParseNode, Tag};

/// A single value or a dash/slash range between two different base rules.
/// Greedy: when a separator and a valid end are present they are always
/// consumed, never re-read as two bare singles.
pub(crate) fn range_between<S, E>(
    start: S,
    end: E,
) -> impl Parser<char, ParseNode, Error = ParserError> + Clone
where
    S: Parser<char, ParseNode, Error = ParserError> + Clone,
    E: Parser<char, ParseNode, Error = ParserError> + Clone,
{
    start
        .then(range_sep().ignore_then(end).or_not())
        .map(|(start, end)| match end {
            Some(end) => ParseNode::range(start, end),
            None => start,
        })
}

/// `range_between` with a shared base rule for both endpoints.
pub(crate) fn range<P>(base: P) -> impl Parser<char, ParseNode, Error = ParserError> + Clone
where
    P: Parser<char, ParseNode, Error = ParserError> + Clone,
{
    range_between(base.clone(), base)
}

/// A single value or a slash pair ("1988/89", "jan/feb"). The separator is
/// a bare slash with no padding; the end rule may differ from the start
/// rule, which is how a 4-digit year pairs with a 2-digit one.
pub(crate) fn slashed_between<S, E>(
    start: S,
    end: E,
) -> impl Parser<char, ParseNode, Error = ParserError> + Clone
where
    S: Parser<char, ParseNode, Error = ParserError> + Clone,
    E: Parser<char, ParseNode, Error = ParserError> + Clone,
{
    start
        .then(just('/').ignore_then(end).or_not())
        .map(|(start, end)| match end {
            Some(end) => ParseNode::range(start, end),
            None => start,
        })
}

/// One or more `component`s separated by `sep`, in input order. Never
/// fails once the first component has matched.
pub(crate) fn list<S, C>(
    sep: S,
    component: C,
) -> impl Parser<char, ParseNode, Error = ParserError> + Clone
where
    S: Parser<char, (), Error = ParserError> + Clone,
    C: Parser<char, ParseNode, Error = ParserError> + Clone,
{
    component
        .separated_by(sep)
        .at_least(1)
        .map(ParseNode::List)
}

/// A bare digits node.
pub(crate) fn digits_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    digits().map(ParseNode::Single)
}

/// A bare single-letter node.
pub(crate) fn letter_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    letter().map(|c| ParseNode::single(c.to_string()))
}

/// A comma-separated list of integers and integer ranges, tagged numeric.
pub(crate) fn numerics() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    list(list_sep(), range(digits_node())).map(|node| ParseNode::tagged(Tag::Numeric, node))
}

/// A digits token with a trailing letter suffix ("12a"), as catalogs use
/// for inserted issues.
pub(crate) fn suffixed_digits_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    digits()
        .then(letter().repeated().at_least(1).collect::<String>())
        .map(|(number, suffix)| ParseNode::Single(format!("{number}{suffix}")))
}

/// The number-field value list: suffixed integers, plain integers, and
/// integer ranges. The suffixed form is tried first so the suffix is never
/// left behind as trailing input.
pub(crate) fn suffixed_numerics() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let element = suffixed_digits_node().or(range(digits_node()));
    list(list_sep(), element).map(|node| ParseNode::tagged(Tag::Numeric, node))
}

/// A comma-separated list of letters and letter ranges, tagged letters.
pub(crate) fn letters_value() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    list(list_sep(), range(letter_node())).map(|node| ParseNode::tagged(Tag::Letters, node))
}

/// The default tagged-list value: digits or letters, digits preferred.
pub(crate) fn default_list() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    numerics().or(letters_value())
}

/// A field label followed by a list: `label dot? sep? list`. The label
/// alternation comes from the `LabelSet`, already sorted longest-first.
pub(crate) fn tagged_list<L>(
    labels: &LabelSet,
    value: L,
) -> impl Parser<char, ParseNode, Error = ParserError> + Clone
where
    L: Parser<char, ParseNode, Error = ParserError> + Clone,
{
    let field = labels.field();
    labels
        .parser()
        .then_ignore(dot_opt())
        .then_ignore(label_value_sep())
        .ignore_then(value)
        .map(move |payload| ParseNode::tagged(Tag::Field(field), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Field;

    fn single(text: &str) -> ParseNode {
        ParseNode::single(text)
    }

    #[test]
    fn range_parses_a_bare_single() {
        let parsed = range(digits_node()).parse("1990").unwrap();
        assert_eq!(parsed, single("1990"));
    }

    #[test]
    fn range_parses_dash_and_slash_pairs() {
        let rule = range(digits_node());
        assert_eq!(
            rule.parse("3-5").unwrap(),
            ParseNode::range(single("3"), single("5"))
        );
        assert_eq!(
            rule.parse("3 / 5").unwrap(),
            ParseNode::range(single("3"), single("5"))
        );
    }

    #[test]
    fn slashed_works_with_numbers_and_letters() {
        let years = slashed_between(digits_node(), digits_node());
        assert_eq!(
            years.parse("1990/1991").unwrap(),
            ParseNode::range(single("1990"), single("1991"))
        );

        let word = crate::labels::literals_desc(&["sep", "oct"]).map(ParseNode::Single);
        let months = slashed_between(word.clone(), word);
        assert_eq!(
            months.parse("sep/oct").unwrap(),
            ParseNode::range(single("sep"), single("oct"))
        );
    }

    #[test]
    fn slashed_fails_as_expected() {
        let word = crate::labels::literals_desc(&["sep", "oct"]).map(ParseNode::Single);
        let months = slashed_between(word.clone(), word);
        assert!(months.then_ignore(end()).parse("1990").is_err());
    }

    #[test]
    fn list_preserves_order_and_length() {
        let parsed = list(list_sep(), range(digits_node()))
            .parse("4, 2, 9-11")
            .unwrap();
        match parsed {
            ParseNode::List(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], single("4"));
                assert_eq!(items[1], single("2"));
                assert_eq!(
                    items[2],
                    ParseNode::range(single("9"), single("11"))
                );
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn tagged_list_accepts_all_label_forms() {
        let rule = tagged_list(&LabelSet::volume(), default_list()).then_ignore(end());
        for input in ["v.12", "v 12", "v12", "vol. 12", "volume: 12", "volumes 12"] {
            let parsed = rule.parse(input).unwrap_or_else(|e| {
                panic!("failed to parse {input:?}: {e:?}");
            });
            assert_eq!(
                parsed,
                ParseNode::tagged(
                    Tag::Field(Field::Volume),
                    ParseNode::tagged(Tag::Numeric, ParseNode::List(vec![single("12")])),
                ),
            );
        }
    }

    #[test]
    fn suffixed_numbers_keep_their_letter() {
        let rule = suffixed_numerics().then_ignore(end());
        assert_eq!(
            rule.parse("12a, 13").unwrap(),
            ParseNode::tagged(
                Tag::Numeric,
                ParseNode::List(vec![single("12a"), single("13")]),
            )
        );
        assert!(rule.parse("a12").is_err());
    }

    #[test]
    fn tagged_list_requires_a_value() {
        let rule = tagged_list(&LabelSet::volume(), default_list()).then_ignore(end());
        assert!(rule.parse("v").is_err());
        assert!(rule.parse("vol.").is_err());
    }
}
