//! Absolute URI values carried as their text

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// An absolute URI such as `kcp://host:7777/path`
///
/// Only the scheme is validated: it must start with an ASCII letter and
/// contain letters, digits, `+`, `-` or `.`, followed by `:`. The rest of the
/// text is kept verbatim so it round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Uri {
    text: String,
    scheme_len: usize,
}

impl Uri {
    /// Parse and validate URI text
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidUri(text.to_owned());
        if text.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let scheme_len = text.find(':').ok_or_else(invalid)?;
        let mut scheme = text[..scheme_len].chars();
        match scheme.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return Err(invalid()),
        }
        if !scheme.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return Err(invalid());
        }
        Ok(Self {
            text: text.to_owned(),
            scheme_len,
        })
    }

    /// Scheme without the trailing colon
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.text[..self.scheme_len]
    }

    /// Everything after `scheme:`
    #[inline]
    pub fn rest(&self) -> &str {
        &self.text[self.scheme_len + 1..]
    }

    /// Full URI text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.text
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
