//! Error types for parsing and transforming enumchron strings.

use std::fmt;

use crate::labels::ParserError;

/// The input did not match from the root rule. Carries the offset of the
/// furthest failed expectation and what was expected there. No partial
/// result accompanies a failure — the whole input parses or none of it
/// does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Byte offset of the furthest failed expectation.
    pub offset: usize,
    /// Descriptions of what was expected at that offset.
    pub expected: Vec<String>,
    /// The character actually found, if any.
    pub found: Option<char>,
}

impl ParseFailure {
    /// Collapse chumsky's error list to the failure that made the most
    /// progress.
    pub(crate) fn from_errors(errors: Vec<ParserError>) -> Self {
        let best = errors.into_iter().max_by_key(|e| e.span().start);
        match best {
            Some(err) => {
                let mut expected: Vec<String> = err
                    .expected()
                    .map(|e| match e {
                        Some(c) => format!("{c:?}"),
                        None => "end of input".to_string(),
                    })
                    .collect();
                expected.sort();
                expected.dedup();
                ParseFailure {
                    offset: err.span().start,
                    expected,
                    found: err.found().copied(),
                }
            }
            None => ParseFailure {
                offset: 0,
                expected: Vec::new(),
                found: None,
            },
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse failed at offset {}", self.offset)?;
        match self.found {
            Some(c) => write!(f, ": found {c:?}")?,
            None => write!(f, ": found end of input")?,
        }
        if !self.expected.is_empty() {
            write!(f, ", expected {}", self.expected.join(" or "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

/// The parse tree could not be lowered to domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A resolved year pair ended at or before its start; never silently
    /// swapped.
    AmbiguousYearOrder { first: i32, last: i32 },
    /// A parse-tree shape the transform table does not recognize.
    UnsupportedShape(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::AmbiguousYearOrder { first, last } => {
                write!(f, "year range ends at {last}, at or before its start {first}")
            }
            TransformError::UnsupportedShape(shape) => {
                write!(f, "unsupported parse-tree shape: {shape}")
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Any failure while parsing one line into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumchronError {
    Parse(ParseFailure),
    Transform(TransformError),
}

impl fmt::Display for EnumchronError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumchronError::Parse(err) => err.fmt(f),
            EnumchronError::Transform(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for EnumchronError {}

impl From<ParseFailure> for EnumchronError {
    fn from(err: ParseFailure) -> Self {
        EnumchronError::Parse(err)
    }
}

impl From<TransformError> for EnumchronError {
    fn from(err: TransformError) -> Self {
        EnumchronError::Transform(err)
    }
}
