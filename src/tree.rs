//! Parse-tree types produced by the grammar.
//!
//! Nodes are built functionally by the combinators and never mutated after
//! creation. The tree is deliberately loose — strings and tagged shapes —
//! and is only given meaning by the transform pass.

use serde::Serialize;

use crate::labels::Field;

/// A tag attached to a subtree, naming either a semantic field or a
/// structural class the transform dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// A semantic field ("volume", "number", "iyear", ...).
    Field(Field),
    /// A list of integers and integer ranges.
    Numeric,
    /// A list of single letters and letter ranges.
    Letters,
    /// A list of roman numerals and roman-numeral ranges.
    Roman,
    /// A slash pair of years ("1988/89").
    YearDual,
    /// A dash pair of years ("1988-1990"), endpoints possibly duals.
    YearSpan,
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseNode {
    /// A single matched token (digits, a letter, a month name, ...).
    Single(String),
    /// A range with a start and an end.
    Range {
        start: Box<ParseNode>,
        end: Box<ParseNode>,
    },
    /// An ordered, non-empty sequence of sibling nodes.
    List(Vec<ParseNode>),
    /// A subtree labeled with a field or structural tag.
    Tagged(Tag, Box<ParseNode>),
    /// A fragment the grammar matched but could not classify.
    Unknown(Box<ParseNode>),
}

impl ParseNode {
    pub fn single(text: impl Into<String>) -> Self {
        ParseNode::Single(text.into())
    }

    pub fn range(start: ParseNode, end: ParseNode) -> Self {
        ParseNode::Range {
            start: Box::new(start),
            end: Box::new(end),
        }
    }

    pub fn tagged(tag: Tag, payload: ParseNode) -> Self {
        ParseNode::Tagged(tag, Box::new(payload))
    }

    pub fn unknown(payload: ParseNode) -> Self {
        ParseNode::Unknown(Box::new(payload))
    }

    /// The components of a record-level node. A parsed input is always a
    /// `List`; anything else is treated as a one-component record.
    pub fn components(&self) -> &[ParseNode] {
        match self {
            ParseNode::List(items) => items,
            _ => std::slice::from_ref(self),
        }
    }
}
