//! Fields and their label vocabularies.
//!
//! A `LabelSet` owns the spellings and abbreviations that introduce one
//! field ("volumes", "vol", "v", ...). Spellings are sorted by descending
//! length at construction so that a longer spelling is never pre-empted by
//! a shorter prefix when the alternation is tried in order.

use chumsky::prelude::*;
use chumsky::BoxedParser;
use serde::Serialize;

/// Type alias for parser error
pub(crate) type ParserError = Simple<char>;

/// A semantic field an enumchron component can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Volume,
    Number,
    Part,
    Copy,
    Series,
    NewSeries,
    Report,
    Section,
    Appendix,
    Title,
    Quarter,
    Supplement,
    Index,
    Map,
    Edition,
    Ordinal,
    /// A year introduced by an explicit "year"/"yr" label.
    Year,
    /// A bare year with no label — the common case.
    ImplicitYear,
    Month,
    Day,
}

impl Field {
    /// Stable string key used in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            Field::Volume => "volume",
            Field::Number => "number",
            Field::Part => "part",
            Field::Copy => "copy",
            Field::Series => "series",
            Field::NewSeries => "new_series",
            Field::Report => "report",
            Field::Section => "section",
            Field::Appendix => "appendix",
            Field::Title => "title",
            Field::Quarter => "quarter",
            Field::Supplement => "supplement",
            Field::Index => "index",
            Field::Map => "map",
            Field::Edition => "edition",
            Field::Ordinal => "ordinal",
            Field::Year => "year",
            Field::ImplicitYear => "iyear",
            Field::Month => "month",
            Field::Day => "day",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Single letters reserved as one-character field abbreviations. The
/// unlabeled fallback letter list must exclude these, otherwise a bare "v"
/// could be read as an unknown letter instead of an incomplete volume tag.
pub const RESERVED_LETTERS: [char; 4] = ['c', 'n', 't', 'v'];

/// Is `c` usable in an unlabeled fallback letter list?
pub fn is_safe_letter(c: char) -> bool {
    c.is_ascii_lowercase() && !RESERVED_LETTERS.contains(&c)
}

/// The spellings and abbreviations that introduce one field.
#[derive(Debug, Clone)]
pub struct LabelSet {
    field: Field,
    spellings: Vec<String>,
}

impl LabelSet {
    /// Build a label set. Spellings are sorted longest-first (ties broken
    /// lexically) and deduplicated; insertion order is deliberately not
    /// honored.
    pub fn new(field: Field, spellings: &[&str]) -> Self {
        let mut spellings: Vec<String> = spellings.iter().map(|s| s.to_string()).collect();
        spellings.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        spellings.dedup();
        LabelSet { field, spellings }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Spellings in match order (longest first).
    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    /// An ordered-choice parser over the spellings.
    pub(crate) fn parser(&self) -> BoxedParser<'static, char, String, ParserError> {
        literals(&self.spellings)
    }

    // Default vocabularies. These mirror the label tables the original
    // catalog data was collected against.

    pub fn volume() -> Self {
        Self::new(Field::Volume, &["volumes", "volume", "vols", "vol", "vs", "v"])
    }

    pub fn number() -> Self {
        Self::new(
            Field::Number,
            &[
                "numbers", "number", "numbs", "numb", "nums", "num", "nos", "no", "n",
            ],
        )
    }

    pub fn part() -> Self {
        Self::new(Field::Part, &["parts", "part", "pts", "pt"])
    }

    pub fn copy() -> Self {
        Self::new(
            Field::Copy,
            &["copies", "copy", "cops", "cop", "cps", "cp", "c"],
        )
    }

    pub fn series() -> Self {
        Self::new(Field::Series, &["series", "ser"])
    }

    pub fn new_series() -> Self {
        Self::new(
            Field::NewSeries,
            &["new series", "new ser", "n.s.", "n.s", "ns"],
        )
    }

    pub fn report() -> Self {
        Self::new(
            Field::Report,
            &["reports", "report", "repts", "rept", "rep", "rpts", "rpt"],
        )
    }

    pub fn section() -> Self {
        Self::new(
            Field::Section,
            &["sections", "section", "sects", "sect", "secs", "sec"],
        )
    }

    pub fn appendix() -> Self {
        Self::new(Field::Appendix, &["appendices", "appendix", "apps", "app"])
    }

    pub fn title() -> Self {
        Self::new(Field::Title, &["titles", "title", "t"])
    }

    pub fn quarter() -> Self {
        Self::new(
            Field::Quarter,
            &["quarters", "quarter", "quart", "qrtr", "qtr", "q"],
        )
    }

    pub fn supplement() -> Self {
        Self::new(
            Field::Supplement,
            &["supplements", "supplement", "suppl", "supp", "sup"],
        )
    }

    pub fn index() -> Self {
        Self::new(Field::Index, &["indexes", "index"])
    }

    pub fn edition() -> Self {
        Self::new(Field::Edition, &["editions", "edition", "eds", "ed"])
    }

    pub fn year() -> Self {
        Self::new(Field::Year, &["years", "year", "yr"])
    }
}

/// Ordered choice over literal words, longest first. The inputs must
/// already be in match order; `LabelSet` sorts its spellings, other callers
/// (months, roman numerals) keep their tables pre-sorted.
pub(crate) fn literals(words: &[String]) -> BoxedParser<'static, char, String, ParserError> {
    words.iter().cloned().fold(
        filter(|_: &char| false).map(|_| String::new()).boxed(),
        |alt, word| alt.or(just(word)).boxed(),
    )
}

/// Convenience wrapper over static word tables.
pub(crate) fn literals_desc(words: &[&str]) -> BoxedParser<'static, char, String, ParserError> {
    let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    literals(&words)
}
