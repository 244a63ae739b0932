//! Errors reported by the packet encoder and decoder.
//!
//! A malformed datagram is an ordinary value here: the caller drops it (or
//! answers with an ERROR packet) and keeps serving.

use std::io;

use thiserror::Error;

/// Reasons a datagram could not be turned into a [`TFTPPacket`](super::TFTPPacket).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TFTPParseError {
    /// The buffer ends before a fixed-size field does.
    #[error("buffer too short: {actual} bytes, need at least {required}")]
    BufferTooShort { actual: usize, required: usize },

    /// The first two bytes are not one of the six known opcodes.
    #[error("unknown opcode [{0}]")]
    UnknownOpcode(u16),

    /// A null-terminated field runs off the end of the buffer.
    #[error("missing null terminator after {field}")]
    MissingTerminator { field: &'static str },

    /// A field that must carry text is terminated right away.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// The option list ends with a name that has no terminated value.
    /// `offset` points at the dangling element inside the datagram.
    #[error("malformed options: unpaired option at byte {offset}")]
    MalformedOptions { offset: usize },

    /// Bytes are left over after a complete packet.
    #[error("{count} trailing bytes after {packet} packet")]
    TrailingData { packet: &'static str, count: usize },
}

/// Why a text field cannot be put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidText {
    #[error("embedded null terminator at character {offset}")]
    EmbeddedTerminator { offset: usize },

    #[error("character {ch:?} at {offset} does not fit in one byte")]
    NotSingleByte { ch: char, offset: usize },

    #[error("field must not be empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum TFTPEncodeError {
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: InvalidText,
    },

    #[error("failed to write packet: {0}")]
    Io(#[from] io::Error),
}

impl TFTPEncodeError {
    pub(crate) fn validation(field: &'static str, reason: InvalidText) -> Self {
        TFTPEncodeError::Validation { field, reason }
    }
}
