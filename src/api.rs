//! Public API for the parser.
//!
//! An `EnumchronParser` owns one frozen rule graph. Building it is the
//! expensive step; the parser itself is read-only afterwards and can be
//! shared freely across threads parsing distinct lines.

use chumsky::Parser;

use crate::error::{EnumchronError, ParseFailure};
use crate::grammar::{ComponentRule, GrammarBuilder};
use crate::transform::{transform, Record};
use crate::tree::ParseNode;

/// A configured enumchron parser.
pub struct EnumchronParser {
    root: ComponentRule,
}

impl EnumchronParser {
    /// A parser with the standard field vocabulary.
    pub fn new() -> Self {
        GrammarBuilder::standard().finish()
    }

    pub(crate) fn from_builder(builder: GrammarBuilder) -> Self {
        EnumchronParser {
            root: builder.into_root(),
        }
    }

    /// Parse one pre-normalized line into a parse tree. The whole input
    /// must match; there is no partial success.
    pub fn parse(&self, input: &str) -> Result<ParseNode, ParseFailure> {
        self.root
            .parse(input)
            .map_err(ParseFailure::from_errors)
    }

    /// Parse one pre-normalized line and lower it to a typed record.
    pub fn parse_record(&self, input: &str) -> Result<Record, EnumchronError> {
        let tree = self.parse(input)?;
        Ok(transform(&tree)?)
    }
}

impl Default for EnumchronParser {
    fn default() -> Self {
        EnumchronParser::new()
    }
}

impl GrammarBuilder {
    /// Freeze the accumulated grammar into a parser. No further fields can
    /// be registered afterwards.
    pub fn finish(self) -> EnumchronParser {
        EnumchronParser::from_builder(self)
    }
}
