//! # enumchron
//!
//! A parser for library "enumeration/chronology" strings — the informal
//! volume/issue/part/copy/year descriptions attached to serial holdings in
//! catalog and digitization metadata:
//!
//! - v.12 no.3 1990
//! - 1988/89-1990/91
//! - (1990) supp. 2
//!
//! The grammar is a layered set of parameterized combinators (range, list,
//! tagged-list) over a fixed label vocabulary, with PEG ordered-choice
//! semantics: labeled forms beat bare years, bare years beat unknown
//! fragments. A transform pass lowers the parse tree to typed domain
//! values, resolving two-digit and slash-year shorthand through a
//! documented century heuristic.
//!
//! ```text
//! use enumchron::{normalize, EnumchronParser};
//!
//! let parser = EnumchronParser::new();
//! let record = parser.parse_record(&normalize("V.12 no.3 1990"))?;
//! ```

mod api;
mod atoms;
mod combinators;
mod error;
mod grammar;
mod labels;
mod normalize;
mod transform;
mod tree;
mod year;

pub use api::EnumchronParser;
pub use error::{EnumchronError, ParseFailure, TransformError};
pub use grammar::GrammarBuilder;
pub use labels::{is_safe_letter, Field, LabelSet, RESERVED_LETTERS};
pub use normalize::normalize;
pub use transform::{
    resolve_year_endpoints, transform, DomainValue, LetterOrRange, NumberOrRange, RangeEndpoints,
    Record, WordOrRange, YearEntry,
};
pub use tree::{ParseNode, Tag};
