//! Lowers a parse tree to typed domain values.
//!
//! The walk is bottom-up over a fixed node-shape table: numeric subtrees
//! become integer lists, letter subtrees become letter lists, year subtrees
//! go through the century disambiguation below. Any shape outside the
//! table is an error, never a silent drop.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::TransformError;
use crate::grammar::roman_value;
use crate::labels::Field;
use crate::tree::{ParseNode, Tag};

/// An integer, a letter-suffixed integer ("12a"), or an inclusive integer
/// range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberOrRange {
    Number(i64),
    Suffixed(i64, String),
    Range(i64, i64),
}

/// A letter or inclusive letter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterOrRange {
    Letter(char),
    Range(char, char),
}

/// A word (month name) or word range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordOrRange {
    Word(String),
    Range(String, String),
}

/// One resolved element of a year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearEntry {
    Year(i32),
    /// Two adjacent consecutive years sharing one publication cycle.
    Dual(i32, i32),
    /// A wider inclusive span.
    Range(i32, i32),
}

impl YearEntry {
    pub fn first(self) -> i32 {
        match self {
            YearEntry::Year(y) => y,
            YearEntry::Dual(f, _) | YearEntry::Range(f, _) => f,
        }
    }

    pub fn last(self) -> i32 {
        match self {
            YearEntry::Year(y) => y,
            YearEntry::Dual(_, l) | YearEntry::Range(_, l) => l,
        }
    }
}

/// The generic pre-resolution endpoint pair a `Range` node lowers to
/// before context specializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeEndpoints {
    pub start: String,
    pub end: String,
}

/// A typed value for one field of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainValue {
    /// A single integer (a lone year, a day of month).
    Int(i64),
    IntList(Vec<NumberOrRange>),
    LetterList(Vec<LetterOrRange>),
    /// Adjacent consecutive years (last == first + 1).
    DualYear { first: i32, last: i32 },
    /// A wider year span.
    YearRange { first: i32, last: i32 },
    /// A year list that did not collapse to a single entry.
    Years(Vec<YearEntry>),
    /// Month names and month ranges.
    Words(Vec<WordOrRange>),
    /// A bare marker with no value ("index", "new series", "maps").
    Flag,
}

/// The typed result of one input line: an ordered field→value mapping plus
/// a bucket for fragments the grammar matched but could not classify.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(Field, DomainValue)>,
    unknown: Vec<DomainValue>,
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&DomainValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// Fields in the order they appeared in the input.
    pub fn fields(&self) -> &[(Field, DomainValue)] {
        &self.fields
    }

    pub fn unknown(&self) -> &[DomainValue] {
        &self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.unknown.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }

    /// Insert a value, merging with an existing entry where both sides are
    /// list-like. When no merge applies the first value wins and the
    /// newcomer is routed to the unknown bucket rather than dropped.
    fn insert(&mut self, field: Field, value: DomainValue) {
        let existing = self
            .fields
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v);
        match existing {
            None => self.fields.push((field, value)),
            Some(slot) => {
                if let Some(rejected) = merge(slot, value) {
                    self.unknown.push(rejected);
                }
            }
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.unknown.is_empty());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.key(), value)?;
        }
        if !self.unknown.is_empty() {
            map.serialize_entry("unknown", &self.unknown)?;
        }
        map.end()
    }
}

/// Merge `incoming` into `slot` in place. Returns the rejected value when
/// the pair is not mergeable.
fn merge(slot: &mut DomainValue, incoming: DomainValue) -> Option<DomainValue> {
    if let (Some(mut a), Some(b)) = (year_entries(slot), year_entries(&incoming)) {
        a.extend(b);
        *slot = DomainValue::Years(a);
        return None;
    }
    match (slot, incoming) {
        (DomainValue::IntList(a), DomainValue::IntList(b)) => {
            a.extend(b);
            None
        }
        (DomainValue::LetterList(a), DomainValue::LetterList(b)) => {
            a.extend(b);
            None
        }
        (DomainValue::Words(a), DomainValue::Words(b)) => {
            a.extend(b);
            None
        }
        (DomainValue::Flag, DomainValue::Flag) => None,
        (_, incoming) => Some(incoming),
    }
}

/// View a value as year entries, when it is year-like.
fn year_entries(value: &DomainValue) -> Option<Vec<YearEntry>> {
    match value {
        DomainValue::Int(y) => i32::try_from(*y).ok().map(|y| vec![YearEntry::Year(y)]),
        DomainValue::DualYear { first, last } => Some(vec![YearEntry::Dual(*first, *last)]),
        DomainValue::YearRange { first, last } => Some(vec![YearEntry::Range(*first, *last)]),
        DomainValue::Years(entries) => Some(entries.clone()),
        _ => None,
    }
}

/// Lower a record-level parse tree to a `Record`.
pub fn transform(root: &ParseNode) -> Result<Record, TransformError> {
    let mut record = Record::default();
    for component in root.components() {
        apply_component(&mut record, component)?;
    }
    Ok(record)
}

fn apply_component(record: &mut Record, node: &ParseNode) -> Result<(), TransformError> {
    match node {
        ParseNode::Tagged(Tag::Field(field), payload) => apply_field(record, *field, payload),
        ParseNode::Unknown(payload) => {
            let value = value_of(payload)?;
            record.unknown.push(value);
            Ok(())
        }
        other => Err(unsupported(other)),
    }
}

fn apply_field(record: &mut Record, field: Field, payload: &ParseNode) -> Result<(), TransformError> {
    match field {
        Field::Year | Field::ImplicitYear => {
            let value = year_list_value(payload)?;
            record.insert(field, value);
            Ok(())
        }
        Field::Month => apply_month(record, payload),
        Field::Edition | Field::Ordinal => {
            let value = ordinal_value_of(payload)?;
            record.insert(field, value);
            Ok(())
        }
        _ => {
            let value = value_of(payload)?;
            record.insert(field, value);
            Ok(())
        }
    }
}

/// Months may carry a trailing year list or day number, which land in
/// their own fields alongside the month itself.
fn apply_month(record: &mut Record, payload: &ParseNode) -> Result<(), TransformError> {
    match payload {
        ParseNode::List(items) => {
            let mut items = items.iter();
            let span = items.next().ok_or_else(|| unsupported(payload))?;
            record.insert(Field::Month, DomainValue::Words(words_of(span)?));
            for extra in items {
                match extra {
                    ParseNode::Tagged(Tag::Field(field @ Field::ImplicitYear), years) => {
                        let value = year_list_value(years)?;
                        record.insert(*field, value);
                    }
                    ParseNode::Tagged(Tag::Field(Field::Day), day) => match day.as_ref() {
                        ParseNode::Single(text) => {
                            record.insert(Field::Day, DomainValue::Int(int(text)?));
                        }
                        other => return Err(unsupported(other)),
                    },
                    other => return Err(unsupported(other)),
                }
            }
            Ok(())
        }
        span => {
            record.insert(Field::Month, DomainValue::Words(words_of(span)?));
            Ok(())
        }
    }
}

/// The fixed shape table for non-year payloads.
fn value_of(node: &ParseNode) -> Result<DomainValue, TransformError> {
    match node {
        ParseNode::Tagged(Tag::Numeric, list) => Ok(DomainValue::IntList(int_list(list)?)),
        ParseNode::Tagged(Tag::Roman, list) => Ok(DomainValue::IntList(roman_list(list)?)),
        ParseNode::Tagged(Tag::Letters, list) => Ok(DomainValue::LetterList(letter_list(list)?)),
        // A bare single under a field is a label-only marker.
        ParseNode::Single(_) => Ok(DomainValue::Flag),
        other => Err(unsupported(other)),
    }
}

/// Editions and ordinals carry bare digits, not a tagged list: "2nd ed."
/// lowers to an `Int`, "2nd-4th" to a one-range `IntList`.
fn ordinal_value_of(node: &ParseNode) -> Result<DomainValue, TransformError> {
    match node {
        ParseNode::Single(text) => Ok(DomainValue::Int(int(text)?)),
        ParseNode::Range { start, end } => {
            let pair = endpoints(start, end)?;
            Ok(DomainValue::IntList(vec![NumberOrRange::Range(
                int(&pair.start)?,
                int(&pair.end)?,
            )]))
        }
        other => Err(unsupported(other)),
    }
}

fn list_items(node: &ParseNode) -> Result<&[ParseNode], TransformError> {
    match node {
        ParseNode::List(items) => Ok(items),
        other => Err(unsupported(other)),
    }
}

/// Endpoints of a plain text range node.
fn endpoints(start: &ParseNode, end: &ParseNode) -> Result<RangeEndpoints, TransformError> {
    match (start, end) {
        (ParseNode::Single(start), ParseNode::Single(end)) => Ok(RangeEndpoints {
            start: start.clone(),
            end: end.clone(),
        }),
        _ => Err(unsupported(start)),
    }
}

fn int_list(node: &ParseNode) -> Result<Vec<NumberOrRange>, TransformError> {
    list_items(node)?
        .iter()
        .map(|item| match item {
            ParseNode::Single(text) => number_of(text),
            ParseNode::Range { start, end } => {
                let pair = endpoints(start, end)?;
                Ok(NumberOrRange::Range(int(&pair.start)?, int(&pair.end)?))
            }
            other => Err(unsupported(other)),
        })
        .collect()
}

fn roman_list(node: &ParseNode) -> Result<Vec<NumberOrRange>, TransformError> {
    list_items(node)?
        .iter()
        .map(|item| match item {
            ParseNode::Single(text) => Ok(NumberOrRange::Number(roman(text)?)),
            ParseNode::Range { start, end } => {
                let pair = endpoints(start, end)?;
                Ok(NumberOrRange::Range(roman(&pair.start)?, roman(&pair.end)?))
            }
            other => Err(unsupported(other)),
        })
        .collect()
}

fn letter_list(node: &ParseNode) -> Result<Vec<LetterOrRange>, TransformError> {
    list_items(node)?
        .iter()
        .map(|item| match item {
            ParseNode::Single(text) => Ok(LetterOrRange::Letter(letter(text)?)),
            ParseNode::Range { start, end } => {
                let pair = endpoints(start, end)?;
                Ok(LetterOrRange::Range(letter(&pair.start)?, letter(&pair.end)?))
            }
            other => Err(unsupported(other)),
        })
        .collect()
}

fn words_of(node: &ParseNode) -> Result<Vec<WordOrRange>, TransformError> {
    match node {
        ParseNode::Single(word) => Ok(vec![WordOrRange::Word(word.clone())]),
        ParseNode::Range { start, end } => {
            let pair = endpoints(start, end)?;
            Ok(vec![WordOrRange::Range(pair.start, pair.end)])
        }
        other => Err(unsupported(other)),
    }
}

/// Resolve a year-list payload. A one-element list collapses to `Int`,
/// `DualYear`, or `YearRange`; anything longer stays a `Years` list.
fn year_list_value(node: &ParseNode) -> Result<DomainValue, TransformError> {
    let entries: Vec<YearEntry> = list_items(node)?
        .iter()
        .map(year_entry)
        .collect::<Result<_, _>>()?;
    if entries.len() == 1 {
        Ok(match entries[0] {
            YearEntry::Year(y) => DomainValue::Int(i64::from(y)),
            YearEntry::Dual(first, last) => DomainValue::DualYear { first, last },
            YearEntry::Range(first, last) => DomainValue::YearRange { first, last },
        })
    } else {
        Ok(DomainValue::Years(entries))
    }
}

fn year_entry(node: &ParseNode) -> Result<YearEntry, TransformError> {
    match node {
        ParseNode::Single(text) => Ok(YearEntry::Year(year_int(text)?)),
        ParseNode::Tagged(Tag::YearDual, pair) => match pair.as_ref() {
            ParseNode::Range { start, end } => {
                let pair = endpoints(start, end)?;
                resolve_year_endpoints(&pair.start, &pair.end)
            }
            other => Err(unsupported(other)),
        },
        ParseNode::Tagged(Tag::YearSpan, pair) => match pair.as_ref() {
            ParseNode::Range { start, end } => resolve_year_span(start, end),
            other => Err(unsupported(other)),
        },
        other => Err(unsupported(other)),
    }
}

/// One side of a year span: a plain year or a slash dual.
enum YearSide {
    Plain(String),
    Dual(String, String),
}

fn year_side(node: &ParseNode) -> Result<YearSide, TransformError> {
    match node {
        ParseNode::Single(text) => Ok(YearSide::Plain(text.clone())),
        ParseNode::Tagged(Tag::YearDual, pair) => match pair.as_ref() {
            ParseNode::Range { start, end } => {
                let pair = endpoints(start, end)?;
                Ok(YearSide::Dual(pair.start, pair.end))
            }
            other => Err(unsupported(other)),
        },
        other => Err(unsupported(other)),
    }
}

/// Resolve a dash span whose sides may themselves be duals. Each dual is
/// resolved first; the span then runs from the start side's first year to
/// the end side's last year, with the end's century anchored to the start
/// side's last year when the end is 2-digit shorthand.
fn resolve_year_span(start: &ParseNode, end: &ParseNode) -> Result<YearEntry, TransformError> {
    let (first, context) = match year_side(start)? {
        YearSide::Plain(text) => (year_int(&text)?, text),
        YearSide::Dual(a, b) => {
            let resolved = resolve_year_endpoints(&a, &b)?;
            (resolved.first(), resolved.last().to_string())
        }
    };
    let last = match year_side(end)? {
        // The start-side context anchors a 2-digit end's century; the
        // order check below runs on the span's own endpoints.
        YearSide::Plain(text) if text.len() == 2 => anchor_century(&context, &text)?,
        YearSide::Plain(text) => year_int(&text)?,
        YearSide::Dual(a, b) => resolve_year_endpoints(&a, &b)?.last(),
    };
    if last <= first {
        return Err(TransformError::AmbiguousYearOrder { first, last });
    }
    Ok(classify(first, last))
}

/// The year-endpoint disambiguation algorithm, applied to both slash duals
/// and dash ranges:
///
/// 1. 4-digit start with 2-digit end: if the start's last two digits
///    exceed the end, the end rolls into the next century; otherwise it
///    shares the start's century.
/// 2. Both 2-digit: if the start exceeds the end, assume a turn-of-century
///    pair (19xx/20xx); otherwise assume both are 19xx. A fixed
///    approximation, preserved verbatim for compatibility.
/// 3. An end at or before the start is an error, never silently swapped.
/// 4. Consecutive years are a dual; anything wider is a range.
pub fn resolve_year_endpoints(first: &str, last: &str) -> Result<YearEntry, TransformError> {
    let (first, last) = widen(first, last)?;
    Ok(classify(first, last))
}

// Steps 1-3: widen shorthand endpoints to 4 digits and order-check.
fn widen(first: &str, last: &str) -> Result<(i32, i32), TransformError> {
    let (first, last) = if first.len() == 4 && last.len() == 2 {
        (year_int(first)?, anchor_century(first, last)?)
    } else if first.len() == 2 && last.len() == 2 {
        let f = year_int(first)?;
        let l = year_int(last)?;
        if f > l {
            (1900 + f, 2000 + l)
        } else {
            (1900 + f, 1900 + l)
        }
    } else {
        (year_int(first)?, year_int(last)?)
    };
    if last <= first {
        return Err(TransformError::AmbiguousYearOrder { first, last });
    }
    Ok((first, last))
}

/// Widen a 2-digit year to the century of a 4-digit anchor, rolling into
/// the next century when the anchor's last two digits exceed it.
fn anchor_century(anchor: &str, tail: &str) -> Result<i32, TransformError> {
    if anchor.len() != 4 {
        return Err(TransformError::UnsupportedShape(format!(
            "cannot anchor year {tail:?} to {anchor:?}"
        )));
    }
    let century = year_int(&anchor[..2])?;
    let end = year_int(tail)?;
    let century = if year_int(&anchor[2..])? > end {
        century + 1
    } else {
        century
    };
    Ok(century * 100 + end)
}

/// Step 4.
fn classify(first: i32, last: i32) -> YearEntry {
    if last == first + 1 {
        YearEntry::Dual(first, last)
    } else {
        YearEntry::Range(first, last)
    }
}

/// A plain integer or a letter-suffixed one.
fn number_of(text: &str) -> Result<NumberOrRange, TransformError> {
    match text.find(|c: char| c.is_ascii_alphabetic()) {
        None => Ok(NumberOrRange::Number(int(text)?)),
        Some(at) => Ok(NumberOrRange::Suffixed(
            int(&text[..at])?,
            text[at..].to_string(),
        )),
    }
}

fn int(text: &str) -> Result<i64, TransformError> {
    text.parse()
        .map_err(|_| TransformError::UnsupportedShape(format!("non-numeric text {text:?}")))
}

fn year_int(text: &str) -> Result<i32, TransformError> {
    text.parse()
        .map_err(|_| TransformError::UnsupportedShape(format!("non-numeric year {text:?}")))
}

fn letter(text: &str) -> Result<char, TransformError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TransformError::UnsupportedShape(format!(
            "expected a single letter, got {text:?}"
        ))),
    }
}

fn roman(text: &str) -> Result<i64, TransformError> {
    roman_value(text)
        .ok_or_else(|| TransformError::UnsupportedShape(format!("unknown roman numeral {text:?}")))
}

fn unsupported(node: &ParseNode) -> TransformError {
    TransformError::UnsupportedShape(format!("{node:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dual_shorthand_resolves_within_the_century() {
        assert_eq!(
            resolve_year_endpoints("1988", "89").unwrap(),
            YearEntry::Dual(1988, 1989)
        );
    }

    #[test]
    fn full_pair_stays_a_range() {
        assert_eq!(
            resolve_year_endpoints("1988", "1990").unwrap(),
            YearEntry::Range(1988, 1990)
        );
    }

    #[test]
    fn shorthand_rolls_into_the_next_century() {
        assert_eq!(
            resolve_year_endpoints("1999", "01").unwrap(),
            YearEntry::Range(1999, 2001)
        );
        assert_eq!(
            resolve_year_endpoints("1999", "00").unwrap(),
            YearEntry::Dual(1999, 2000)
        );
    }

    #[test]
    fn two_digit_pairs_use_the_fixed_heuristic() {
        assert_eq!(
            resolve_year_endpoints("99", "01").unwrap(),
            YearEntry::Range(1999, 2001)
        );
        assert_eq!(
            resolve_year_endpoints("88", "91").unwrap(),
            YearEntry::Range(1988, 1991)
        );
        assert_eq!(
            resolve_year_endpoints("88", "89").unwrap(),
            YearEntry::Dual(1988, 1989)
        );
    }

    #[test]
    fn dual_start_spans_to_a_full_year_end() {
        let start = ParseNode::tagged(
            Tag::YearDual,
            ParseNode::range(ParseNode::single("1988"), ParseNode::single("89")),
        );
        assert_eq!(
            resolve_year_span(&start, &ParseNode::single("1989")).unwrap(),
            YearEntry::Dual(1988, 1989)
        );
        assert_eq!(
            resolve_year_span(&start, &ParseNode::single("1993")).unwrap(),
            YearEntry::Range(1988, 1993)
        );
    }

    #[test]
    fn suffixed_numbers_split_into_value_and_letter() {
        assert_eq!(
            number_of("12a").unwrap(),
            NumberOrRange::Suffixed(12, "a".to_string())
        );
        assert_eq!(number_of("12").unwrap(), NumberOrRange::Number(12));
    }

    #[test]
    fn reversed_order_is_an_error_not_a_swap() {
        assert_eq!(
            resolve_year_endpoints("1990", "1989"),
            Err(TransformError::AmbiguousYearOrder {
                first: 1990,
                last: 1989
            })
        );
        assert_eq!(
            resolve_year_endpoints("1988", "88"),
            Err(TransformError::AmbiguousYearOrder {
                first: 1988,
                last: 1988
            })
        );
    }

    #[test]
    fn merge_extends_list_values() {
        let mut record = Record::default();
        record.insert(
            Field::Volume,
            DomainValue::IntList(vec![NumberOrRange::Number(1)]),
        );
        record.insert(
            Field::Volume,
            DomainValue::IntList(vec![NumberOrRange::Number(2)]),
        );
        assert_eq!(
            record.get(Field::Volume),
            Some(&DomainValue::IntList(vec![
                NumberOrRange::Number(1),
                NumberOrRange::Number(2),
            ]))
        );
        assert!(record.unknown().is_empty());
    }

    #[test]
    fn merge_combines_year_values() {
        let mut record = Record::default();
        record.insert(Field::ImplicitYear, DomainValue::Int(1990));
        record.insert(
            Field::ImplicitYear,
            DomainValue::DualYear {
                first: 1992,
                last: 1993,
            },
        );
        assert_eq!(
            record.get(Field::ImplicitYear),
            Some(&DomainValue::Years(vec![
                YearEntry::Year(1990),
                YearEntry::Dual(1992, 1993),
            ]))
        );
    }

    #[test]
    fn unmergeable_values_land_in_unknown() {
        let mut record = Record::default();
        record.insert(Field::Supplement, DomainValue::Flag);
        record.insert(
            Field::Supplement,
            DomainValue::IntList(vec![NumberOrRange::Number(2)]),
        );
        assert_eq!(record.get(Field::Supplement), Some(&DomainValue::Flag));
        assert_eq!(record.unknown().len(), 1);
    }
}
