//! The year grammar.
//!
//! Supports the usual chronology shorthand, singly or in lists:
//!
//! - `1980`
//! - `1980/81` (a dual — one publication cycle spanning two years)
//! - `1980-1981`, `1980-81`
//! - `1980/81-1982`, `1980/81-1981/82`
//!
//! A full year is four digits starting with "1" or "2", which rejects
//! 3-digit false positives; a half year is exactly two digits and only
//! ever appears after a slash or dash.

use chumsky::prelude::*;

use crate::atoms::{digit, dot_opt, label_value_sep, list_sep};
use crate::combinators::{list, range_between, slashed_between};
use crate::labels::{LabelSet, ParserError};
use crate::tree::{ParseNode, Tag};

/// Four digits starting with "1" or "2".
pub(crate) fn full_year() -> impl Parser<char, String, Error = ParserError> + Clone {
    one_of("12")
        .chain(digit().repeated().exactly(3))
        .collect()
}

/// Exactly two digits.
pub(crate) fn half_year() -> impl Parser<char, String, Error = ParserError> + Clone {
    digit().repeated().exactly(2).collect()
}

fn full_year_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    full_year().map(ParseNode::Single)
}

fn half_year_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    half_year().map(ParseNode::Single)
}

/// A full year, optionally slash-paired with a half or full year:
/// "1988" or "1988/89" or "1988/1989".
pub(crate) fn year_or_slash() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    slashed_between(full_year_node(), full_year_node().or(half_year_node())).map(|node| {
        match node {
            range @ ParseNode::Range { .. } => ParseNode::tagged(Tag::YearDual, range),
            single => single,
        }
    })
}

/// A year, dual, or dash range of either. The range end may also be a
/// bare half year ("1988-89").
pub(crate) fn year_component() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    range_between(
        year_or_slash(),
        year_or_slash().or(half_year_node()),
    )
    .map(|node| match node {
        range @ ParseNode::Range { .. } => ParseNode::tagged(Tag::YearSpan, range),
        other => other,
    })
}

/// A comma-separated list of year components.
pub(crate) fn year_list() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    list(list_sep(), year_component())
}

/// A bare year list with no label — the common case.
pub(crate) fn implicit_year() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    year_list().map(|node| ParseNode::tagged(Tag::Field(crate::labels::Field::ImplicitYear), node))
}

/// A year list introduced by an explicit "year"/"yr" label.
pub(crate) fn explicit_year() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let labels = LabelSet::year();
    let field = labels.field();
    labels
        .parser()
        .then_ignore(dot_opt())
        .then_ignore(label_value_sep())
        .ignore_then(year_list())
        .map(move |node| ParseNode::tagged(Tag::Field(field), node))
}
