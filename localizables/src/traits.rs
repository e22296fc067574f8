//! The text codec seam shared by on-disk localization documents.

use std::{io::Read, path::Path};

use crate::{atomic::write_file_atomically, error::Error};

/// Decodes raw file bytes to UTF-8.
///
/// UTF-16 input is detected through its BOM; anything else passes through as
/// UTF-8 with a leading BOM removed.
pub fn decode(bytes: &[u8]) -> Result<String, Error> {
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .strip_bom(true)
        .build(bytes);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

/// A document that can be parsed from and rendered to text.
///
/// Implementors provide the grammar; reading files, decoding their encoding
/// and replacing them safely comes for free.
///
/// # Example
///
/// ```rust,no_run
/// use localizables::traits::Parser;
/// let format = localizables::strings::Format::read_from("en.lproj/Localizable.strings")?;
/// format.write_to("en.lproj/Localizable.strings")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser: Sized {
    /// Parse already decoded text.
    fn from_str(text: &str) -> Result<Self, Error>;

    /// Render the document back to text.
    fn render(&self) -> String;

    /// Parse raw file content, honouring a UTF-16 or UTF-8 BOM.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_str(&decode(bytes)?)
    }

    /// Parse any reader to its end.
    fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Parse the file at `path`.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    /// Replace the file at `path` with the rendered document.
    ///
    /// The previous content stays in place if writing fails.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_file_atomically(path, self.render().as_bytes())
    }
}
