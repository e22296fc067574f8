//! Hand-written parser for the `"key" = "value";` grammar.
//!
//! The parser walks an immutable byte slice with an explicit position index.
//! Comments and whitespace are only accepted between entries, never inside a
//! key or a value. Values may span several lines and may contain escaped
//! quotes; they end at the first `"` that is not directly preceded by `\`.

use crate::{
    error::{Error, MalformedKind},
    types::Literal,
};

const QUOTE: u8 = b'"';
const SEMICOLON: u8 = b';';
const EQUAL: u8 = b'=';
const SPACE: u8 = b' ';
const BACKSLASH: u8 = b'\\';
const SLASH: u8 = b'/';
const STAR: u8 = b'*';
const NEWLINE: u8 = b'\n';

/// Parses a whole `.strings` document.
///
/// The document must hold at least one entry. Entries are returned in the
/// order they appear, duplicates included.
pub fn parse(raw: &str) -> Result<Vec<Literal>, Error> {
    let mut parser = EntryParser::new(raw);
    let mut literals = Vec::new();

    parser.skip_separators()?;
    while !parser.is_at_end() {
        literals.push(parser.next_entry()?);
        parser.skip_separators()?;
    }

    if literals.is_empty() {
        return Err(parser.malformed(parser.pos, MalformedKind::NoEntries));
    }

    Ok(literals)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorState {
    BeforeEqual,
    AfterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueState {
    Open,
    /// The closing quote was seen at `end`; waiting for `;`.
    Closed { end: usize },
}

/// Cursor over a `.strings` document that yields one entry at a time.
#[derive(Debug, Clone)]
pub struct EntryParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> EntryParser<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        EntryParser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Skips whitespace, `// line` comments and `/* block */` comments.
    pub fn skip_separators(&mut self) -> Result<(), Error> {
        loop {
            match self.bytes.get(self.pos) {
                Some(byte) if byte.is_ascii_whitespace() => self.pos += 1,
                Some(&SLASH) => match self.bytes.get(self.pos + 1) {
                    Some(&SLASH) => self.skip_line_comment(),
                    Some(&STAR) => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.pos = match self.find_byte(self.pos, NEWLINE) {
            Some(newline) => newline + 1,
            None => self.bytes.len(),
        };
    }

    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let start = self.pos;
        let close = self.bytes[start + 2..]
            .windows(2)
            .position(|window| window == [STAR, SLASH])
            .ok_or_else(|| self.malformed(start, MalformedKind::UnterminatedComment))?;
        self.pos = start + 2 + close + 2;
        Ok(())
    }

    /// Parses the entry under the cursor and moves past its `;`.
    pub fn next_entry(&mut self) -> Result<Literal, Error> {
        let start = self.pos;
        match self.bytes.get(start) {
            Some(&QUOTE) => {}
            Some(_) => {
                let found = self.char_at(start);
                return Err(self.malformed(start, MalformedKind::ExpectedOpeningQuote(found)));
            }
            None => return Err(self.malformed(start, MalformedKind::NoEntries)),
        }

        let key_start = start + 1;
        let key_end = self
            .find_byte(key_start, QUOTE)
            .ok_or_else(|| self.malformed(start, MalformedKind::UnterminatedKey))?;

        let value_open = self.scan_separator(key_end + 1)?;
        let (value_end, terminator) = self.scan_value(value_open + 1)?;

        let literal = Literal::new(
            &self.text[key_start..key_end],
            &self.text[value_open + 1..value_end],
        );
        self.pos = terminator + 1;
        Ok(literal)
    }

    /// Walks ` = ` and returns the offset of the quote opening the value.
    fn scan_separator(&self, from: usize) -> Result<usize, Error> {
        let mut state = SeparatorState::BeforeEqual;

        for (offset, &byte) in self.bytes[from..].iter().enumerate() {
            let at = from + offset;
            match (state, byte) {
                (_, SPACE) => {}
                (SeparatorState::BeforeEqual, EQUAL) => state = SeparatorState::AfterEqual,
                (SeparatorState::AfterEqual, QUOTE) => return Ok(at),
                _ => {
                    let found = self.char_at(at);
                    return Err(self.malformed(
                        at,
                        MalformedKind::UnexpectedCharacterBetweenKeyAndValue(found),
                    ));
                }
            }
        }

        Err(self.unterminated_value(from))
    }

    /// Returns the offsets of the closing quote and of the terminating `;`.
    fn scan_value(&self, from: usize) -> Result<(usize, usize), Error> {
        let mut state = ValueState::Open;
        let mut previous = 0u8;

        for (offset, &byte) in self.bytes[from..].iter().enumerate() {
            let at = from + offset;
            state = match state {
                ValueState::Open if byte == QUOTE && previous != BACKSLASH => {
                    ValueState::Closed { end: at }
                }
                ValueState::Open => ValueState::Open,
                ValueState::Closed { end } => match byte {
                    SEMICOLON => return Ok((end, at)),
                    SPACE => ValueState::Closed { end },
                    _ => {
                        let found = self.char_at(at);
                        return Err(
                            self.malformed(at, MalformedKind::UnexpectedCharacterAfterValue(found))
                        );
                    }
                },
            };
            previous = byte;
        }

        Err(self.unterminated_value(from - 1))
    }

    fn find_byte(&self, from: usize, needle: u8) -> Option<usize> {
        self.bytes
            .get(from..)?
            .iter()
            .position(|&byte| byte == needle)
            .map(|offset| from + offset)
    }

    fn char_at(&self, offset: usize) -> char {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// 1-based line and column (in characters) of a byte offset.
    fn location(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.bytes.len());
        let consumed = &self.bytes[..offset];
        let line = consumed.iter().filter(|&&byte| byte == NEWLINE).count() + 1;
        let line_start = consumed
            .iter()
            .rposition(|&byte| byte == NEWLINE)
            .map_or(0, |newline| newline + 1);
        let column = self
            .text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line, column + 1)
    }

    fn malformed(&self, offset: usize, kind: MalformedKind) -> Error {
        let (line, column) = self.location(offset);
        Error::MalformedEntry { line, column, kind }
    }

    fn unterminated_value(&self, offset: usize) -> Error {
        let (line, column) = self.location(offset);
        Error::UnterminatedValue { line, column }
    }
}
