//! RFC 2347 option lists, shared by request and OACK packets.
//!
//! On the wire an option list is a run of `name 0 value 0` pairs with no count
//! prefix; it ends where the datagram ends.

use std::io;
use std::io::Write;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::text;

/// Block size option (RFC 2348).
pub const OPT_BLKSIZE: &str = "blksize";
/// Retransmission timeout in seconds (RFC 2349).
pub const OPT_TIMEOUT: &str = "timeout";
/// Transfer size in bytes (RFC 2349).
pub const OPT_TSIZE: &str = "tsize";
/// Window size (RFC 7440).
pub const OPT_WINDOWSIZE: &str = "windowsize";

/// An ordered list of option name/value pairs.
///
/// Pairs keep the order they were added in (or appeared on the wire in);
/// nothing here sorts or deduplicates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TFTPOptions {
    pairs: Vec<(String, String)>,
}

impl TFTPOptions {
    pub fn new() -> Self {
        TFTPOptions { pairs: Vec::new() }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: &str) {
        self.pairs.push((String::from(name), String::from(value)));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first option called `name`, compared ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// [`get`](Self::get) followed by a parse; `None` when the option is
    /// missing or its value does not parse.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.parse().ok())
    }

    /// Wire size of the whole list.
    pub fn encoded_len(&self) -> usize {
        self.iter()
            .map(|(name, value)| text::wire_len(name) + text::wire_len(value))
            .sum()
    }

    pub(crate) fn validate(&self) -> Result<(), TFTPEncodeError> {
        for (name, value) in self.iter() {
            text::validate("option name", name)?;
            text::validate("option value", value)?;
        }
        Ok(())
    }

    /// Writes the pairs without validating them first.
    pub(crate) fn write_to<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut written = 0;
        for (name, value) in self.iter() {
            written += text::write_terminated(w, name)?;
            written += text::write_terminated(w, value)?;
        }
        Ok(written)
    }
}

impl From<Vec<(String, String)>> for TFTPOptions {
    fn from(pairs: Vec<(String, String)>) -> Self {
        TFTPOptions { pairs }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for TFTPOptions {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        TFTPOptions {
            pairs: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Appends `options` to `w`, returning the number of bytes written.
pub fn encode_options<W: Write>(
    options: &TFTPOptions,
    w: &mut W,
) -> Result<usize, TFTPEncodeError> {
    options.validate()?;
    Ok(options.write_to(w)?)
}

/// Parses a whole buffer as an option list. An empty buffer is an empty list.
pub fn decode_options(buf: &[u8]) -> Result<TFTPOptions, TFTPParseError> {
    decode_options_at(buf, 0)
}

/// Like [`decode_options`], with error offsets shifted by `base` so they point
/// into the enclosing datagram.
pub(crate) fn decode_options_at(buf: &[u8], base: usize) -> Result<TFTPOptions, TFTPParseError> {
    let mut pairs = Vec::new();
    let mut pos = 0;

    while pos < buf.len() {
        let malformed = || TFTPParseError::MalformedOptions { offset: base + pos };
        let (name, name_len) = text::split_terminated(&buf[pos..]).ok_or_else(malformed)?;
        let (value, value_len) =
            text::split_terminated(&buf[pos + name_len..]).ok_or_else(malformed)?;

        pairs.push((name, value));
        pos += name_len + value_len;
    }

    Ok(TFTPOptions { pairs })
}
