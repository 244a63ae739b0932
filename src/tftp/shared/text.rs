//! Null-terminated text fields.
//!
//! Every text byte maps to the character with the same code point, so any
//! non-null byte survives a decode/encode round trip unchanged. 0x00 only
//! ever appears as a terminator.

use std::io;
use std::io::Write;

use byteorder::WriteBytesExt;

use crate::tftp::shared::error::{InvalidText, TFTPEncodeError, TFTPParseError};

pub(crate) const TERMINATOR: u8 = 0x00;

/// Rejects text that cannot be written as one null-terminated field.
pub(crate) fn validate(field: &'static str, text: &str) -> Result<(), TFTPEncodeError> {
    for (offset, ch) in text.chars().enumerate() {
        if ch == '\0' {
            return Err(TFTPEncodeError::validation(
                field,
                InvalidText::EmbeddedTerminator { offset },
            ));
        }
        if u32::from(ch) > 0xFF {
            return Err(TFTPEncodeError::validation(
                field,
                InvalidText::NotSingleByte { ch, offset },
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_non_empty(field: &'static str, text: &str) -> Result<(), TFTPEncodeError> {
    if text.is_empty() {
        return Err(TFTPEncodeError::validation(field, InvalidText::Empty));
    }
    validate(field, text)
}

/// Bytes taken on the wire by `text`, terminator included.
pub(crate) fn wire_len(text: &str) -> usize {
    if text.is_ascii() {
        text.len() + 1
    } else {
        text.chars().count() + 1
    }
}

/// Writes `text` followed by its terminator. `text` must have passed [`validate`].
pub(crate) fn write_terminated<W: Write>(w: &mut W, text: &str) -> io::Result<usize> {
    if text.is_ascii() {
        w.write_all(text.as_bytes())?;
    } else {
        let bytes: Vec<u8> = text.chars().map(|ch| u32::from(ch) as u8).collect();
        w.write_all(&bytes)?;
    }
    w.write_u8(TERMINATOR)?;

    Ok(wire_len(text))
}

/// Splits the next null-terminated field off `buf`.
/// Returns the text and the number of bytes consumed, terminator included.
pub(crate) fn split_terminated(buf: &[u8]) -> Option<(String, usize)> {
    let end = buf.iter().position(|&byte| byte == TERMINATOR)?;
    let text = buf[..end].iter().map(|&byte| char::from(byte)).collect();
    Some((text, end + 1))
}

pub(crate) fn read_terminated(
    buf: &[u8],
    field: &'static str,
) -> Result<(String, usize), TFTPParseError> {
    split_terminated(buf).ok_or(TFTPParseError::MissingTerminator { field })
}

/// [`read_terminated`] for fields that must carry at least one character.
pub(crate) fn read_non_empty(
    buf: &[u8],
    field: &'static str,
) -> Result<(String, usize), TFTPParseError> {
    let (text, used) = read_terminated(buf, field)?;
    if text.is_empty() {
        return Err(TFTPParseError::EmptyField { field });
    }
    Ok((text, used))
}
