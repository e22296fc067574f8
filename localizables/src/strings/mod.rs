//! Support for the Apple `.strings` localization format.
//!
//! The grammar is a sequence of `"key" = "value";` entries separated by
//! whitespace, `// line` comments and `/* block */` comments. Values are kept
//! verbatim: escape sequences are recognised only to find where a value ends.

pub mod parser;
pub mod printer;

pub use parser::{EntryParser, parse};
pub use printer::render;

use crate::{error::Error, traits::Parser, types::Literal};

/// A parsed `.strings` file, entries kept in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub literals: Vec<Literal>,
}

impl Format {
    pub fn new(literals: Vec<Literal>) -> Self {
        Format { literals }
    }
}

impl Parser for Format {
    fn from_str(text: &str) -> Result<Self, Error> {
        Ok(Format::new(parse(text)?))
    }

    fn render(&self) -> String {
        render(&self.literals)
    }
}
