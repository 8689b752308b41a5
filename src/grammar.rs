//! The top-level enumchron grammar.
//!
//! One `component` rule is an ordered choice over every registered field
//! form. Order is the design decision that makes the grammar deterministic:
//! explicit (labeled) forms are tried before the bare implicit-year form,
//! which is tried before the catch-all unknown list. A string is never
//! classified as an anonymous year or unknown fragment while a labeled
//! interpretation exists.

use chumsky::prelude::*;
use chumsky::BoxedParser;

use crate::atoms::{digit, dot_opt, label_value_sep, list_sep, range_sep, space, space_opt};
use crate::combinators::{
    default_list, list, numerics, range, range_between, suffixed_numerics, tagged_list,
};
use crate::labels::{is_safe_letter, literals_desc, Field, LabelSet, ParserError};
use crate::tree::{ParseNode, Tag};
use crate::year::{explicit_year, implicit_year};

/// A boxed component rule, the unit the builder accumulates.
pub(crate) type ComponentRule = BoxedParser<'static, char, ParseNode, ParserError>;

/// Month-name tables, kept pre-sorted longest-first. Full names never take
/// a trailing dot; abbreviations may.
const FULL_MONTHS: [&str; 12] = [
    "september", "february", "november", "december", "january", "october", "august", "march",
    "april", "june", "july", "may",
];
const SHORT_MONTHS: [&str; 14] = [
    "sept", "febr", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    "may",
];

/// Roman numerals 1..=20, as seen in part/section numbering.
pub(crate) const ROMAN_NUMERALS: [(&str, i64); 20] = [
    ("i", 1),
    ("ii", 2),
    ("iii", 3),
    ("iv", 4),
    ("v", 5),
    ("vi", 6),
    ("vii", 7),
    ("viii", 8),
    ("ix", 9),
    ("x", 10),
    ("xi", 11),
    ("xii", 12),
    ("xiii", 13),
    ("xiv", 14),
    ("xv", 15),
    ("xvi", 16),
    ("xvii", 17),
    ("xviii", 18),
    ("xix", 19),
    ("xx", 20),
];

fn month_name() -> impl Parser<char, String, Error = ParserError> + Clone {
    let full = literals_desc(&FULL_MONTHS);
    let short = literals_desc(&SHORT_MONTHS).then_ignore(dot_opt());
    full.or(short)
}

fn month_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    month_name().map(ParseNode::Single)
}

fn roman_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let words: Vec<&str> = ROMAN_NUMERALS.iter().map(|(w, _)| *w).collect();
    literals_desc(&words).map(ParseNode::Single)
}

/// A comma-separated list of roman numerals and roman ranges ("i-iv").
fn roman_list() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    list(list_sep(), range(roman_node())).map(|node| ParseNode::tagged(Tag::Roman, node))
}

/// The value list for part-like fields: digits, roman numerals, or letters.
fn part_list() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    numerics().or(roman_list()).or(crate::combinators::letters_value())
}

/// An ordinal: digits with an "st"/"nd"/"rd"/"th" suffix, or a range of
/// ordinals ("1st", "2nd-4th").
fn ordinal_value() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let single = crate::atoms::digits()
        .then_ignore(literals_desc(&["st", "nd", "rd", "th"]))
        .map(ParseNode::Single);
    range_between(single.clone(), single)
}

/// An ordinal followed by an edition label: "2nd ed.".
fn edition() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    ordinal_value()
        .then_ignore(space_opt())
        .then_ignore(LabelSet::edition().parser())
        .then_ignore(dot_opt())
        .map(|node| ParseNode::tagged(Tag::Field(Field::Edition), node))
}

/// A bare ordinal component.
fn ordinal() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    ordinal_value().map(|node| ParseNode::tagged(Tag::Field(Field::Ordinal), node))
}

/// A day-of-month number: one or two digits.
fn day_node() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    digit()
        .repeated()
        .at_least(1)
        .at_most(2)
        .collect::<String>()
        .map(ParseNode::Single)
}

/// A month or month range, optionally followed by a year list ("jan 1990")
/// or a day number ("jan 5"). The year branch is tried first so a 4-digit
/// year is never truncated into a day.
fn month_component() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let month_span = range(month_node());
    let trailing_year = space_opt()
        .ignore_then(crate::year::year_list())
        .map(|node| ParseNode::tagged(Tag::Field(Field::ImplicitYear), node));
    let trailing_day = space_opt()
        .ignore_then(day_node())
        .map(|node| ParseNode::tagged(Tag::Field(Field::Day), node));

    month_span
        .then(trailing_year.or(trailing_day).or_not())
        .map(|(span, extra)| {
            let payload = match extra {
                Some(extra) => ParseNode::List(vec![span, extra]),
                None => span,
            };
            ParseNode::tagged(Tag::Field(Field::Month), payload)
        })
}

/// A connector introducing supplemental material: "+", "&", or "plus".
fn and_connector() -> impl Parser<char, (), Error = ParserError> + Clone {
    just('+')
        .ignored()
        .or(just('&').ignored())
        .or(just("plus").ignored())
        .then_ignore(space_opt())
}

/// A labeled marker with an optional trailing numeric list: supplements,
/// appendices, indexes. "supp." alone is a flag; "supp. 2" carries a list.
fn marker(
    labels: LabelSet,
    connector: bool,
) -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let field = labels.field();
    let prefix = if connector {
        and_connector().or_not().ignored().boxed()
    } else {
        empty().boxed()
    };
    prefix
        .ignore_then(labels.parser())
        .then_ignore(dot_opt())
        .ignore_then(
            label_value_sep()
                .ignore_then(numerics())
                .or_not(),
        )
        .map(move |payload| {
            let payload = payload.unwrap_or_else(|| ParseNode::single(field.key()));
            ParseNode::tagged(Tag::Field(field), payload)
        })
}

/// The "maps"/"map" marker.
fn map_marker() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    literals_desc(&["maps", "map"])
        .map(|_| ParseNode::tagged(Tag::Field(Field::Map), ParseNode::single(Field::Map.key())))
}

/// The catch-all: a bare numeric list, or a letter list restricted to the
/// safe alphabet (letters not reserved as one-character field labels).
/// Bare single letters are not accepted — that would be a word.
fn unknown_list() -> impl Parser<char, ParseNode, Error = ParserError> + Clone {
    let safe_node = filter(|c: &char| is_safe_letter(*c)).map(|c| ParseNode::single(c.to_string()));
    let safe_range = safe_node
        .clone()
        .then_ignore(range_sep())
        .then(safe_node.clone())
        .map(|(start, end)| ParseNode::range(start, end));

    let multi = range(safe_node)
        .separated_by(list_sep())
        .at_least(2)
        .map(ParseNode::List);
    let lone_range = safe_range.map(|r| ParseNode::List(vec![r]));
    let letters = multi
        .or(lone_range)
        .map(|node| ParseNode::tagged(Tag::Letters, node));

    numerics()
        .or(letters)
        .map(ParseNode::unknown)
}

/// Accumulates the top-level ordered-choice component rule, one field at a
/// time. `finish` appends the implicit-year and unknown fallbacks and
/// freezes the grammar.
pub struct GrammarBuilder {
    component: Option<ComponentRule>,
}

impl GrammarBuilder {
    /// An empty builder with no registered fields.
    pub fn new() -> Self {
        GrammarBuilder { component: None }
    }

    /// A builder pre-loaded with the standard field vocabulary.
    pub fn standard() -> Self {
        GrammarBuilder::new()
            .field(LabelSet::volume())
            .field_with(LabelSet::number(), suffixed_numerics().boxed())
            .field_with(LabelSet::part(), part_list().boxed())
            .field(LabelSet::copy())
            .field(LabelSet::series())
            .rule(marker(LabelSet::new_series(), true).boxed())
            .field_with(LabelSet::report(), numerics().boxed())
            .field_with(LabelSet::section(), part_list().boxed())
            .rule(marker(LabelSet::appendix(), true).boxed())
            .field(LabelSet::title())
            .field_with(LabelSet::quarter(), numerics().boxed())
            .rule(marker(LabelSet::supplement(), true).boxed())
            .rule(marker(LabelSet::index(), true).boxed())
            .rule(map_marker().boxed())
            .rule(explicit_year().boxed())
            .rule(edition().boxed())
            .rule(ordinal().boxed())
            .rule(month_component().boxed())
    }

    /// Register a tagged-list field with the default digits-or-letters list.
    pub fn field(self, labels: LabelSet) -> Self {
        let rule = tagged_list(&labels, default_list()).boxed();
        self.rule(rule)
    }

    /// Register a tagged-list field with a custom value list.
    pub fn field_with(self, labels: LabelSet, value: ComponentRule) -> Self {
        let rule = tagged_list(&labels, value).boxed();
        self.rule(rule)
    }

    /// Append one alternative to the component rule. Registration order is
    /// match order.
    pub fn rule(mut self, rule: ComponentRule) -> Self {
        self.component = Some(match self.component.take() {
            Some(existing) => existing.or(rule).boxed(),
            None => rule,
        });
        self
    }

    /// Append the implicit-year and unknown-list fallbacks, then build the
    /// record-level rules around the finished component alternation.
    pub(crate) fn into_root(self) -> ComponentRule {
        let component = match self.component {
            Some(existing) => existing
                .or(implicit_year())
                .or(unknown_list())
                .boxed(),
            None => implicit_year().or(unknown_list()).boxed(),
        };

        // One delimiter per component boundary: comma or colon with
        // optional padding, or bare whitespace.
        let ec_delim = space_opt()
            .then(one_of(",:"))
            .then(space_opt())
            .ignored()
            .or(space());

        // ec: delimiter-joined components; ecp: optionally parenthesized;
        // ecset: one or more groups, delimiter optional between groups.
        let ec = component
            .separated_by(ec_delim.clone())
            .at_least(1);
        let ecp = just('(')
            .ignore_then(space_opt())
            .ignore_then(ec.clone())
            .then_ignore(space_opt())
            .then_ignore(just(')'))
            .or(ec);
        let ecset = ecp
            .clone()
            .then(ec_delim.or_not().ignore_then(ecp).repeated())
            .map(|(first, rest)| {
                let mut components = first;
                for group in rest {
                    components.extend(group);
                }
                ParseNode::List(components)
            });

        ecset.then_ignore(end()).boxed()
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        GrammarBuilder::standard()
    }
}

/// Integer value of a roman numeral from the supported table.
pub(crate) fn roman_value(text: &str) -> Option<i64> {
    ROMAN_NUMERALS
        .iter()
        .find(|(w, _)| *w == text)
        .map(|(_, v)| *v)
}
