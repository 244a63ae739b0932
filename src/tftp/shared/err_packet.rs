/// ERROR packet can be the acknowledgment of any other type of packet.
/// The error code is an integer indicating the nature of the error.
/// The error message is intended for human consumption, and like all
/// other strings it is terminated with a zero byte.
///
///  2 bytes     2 bytes      string    1 byte
///  -----------------------------------------
/// | Opcode |  ErrorCode |   ErrMsg   |   0  |
///  -----------------------------------------
use std::fmt;
use std::io::Write;

use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::text;
use crate::tftp::shared::{Opcode, Serializable, OP_LEN};

const ERR_CODE_LEN: usize = 2;
/// Opcode, code and an empty message's terminator.
const ERR_MIN_LEN: usize = OP_LEN + ERR_CODE_LEN + 1;

/// Error codes from RFC 1350, plus code 8 from RFC 2347.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TFTPError {
    UndefinedError,
    FileNotFound,
    AccessViolation,
    DiskFull,
    IllegalOperation,
    UnknownTID,
    FileExists,
    NoSuchUser,
    /// The server refuses the requested options.
    OptionNegotiation,
}

impl TFTPError {
    pub fn code(self) -> u16 {
        match self {
            TFTPError::UndefinedError => 0,
            TFTPError::FileNotFound => 1,
            TFTPError::AccessViolation => 2,
            TFTPError::DiskFull => 3,
            TFTPError::IllegalOperation => 4,
            TFTPError::UnknownTID => 5,
            TFTPError::FileExists => 6,
            TFTPError::NoSuchUser => 7,
            TFTPError::OptionNegotiation => 8,
        }
    }

    pub fn from_code(code: u16) -> Option<TFTPError> {
        match code {
            0 => Some(TFTPError::UndefinedError),
            1 => Some(TFTPError::FileNotFound),
            2 => Some(TFTPError::AccessViolation),
            3 => Some(TFTPError::DiskFull),
            4 => Some(TFTPError::IllegalOperation),
            5 => Some(TFTPError::UnknownTID),
            6 => Some(TFTPError::FileExists),
            7 => Some(TFTPError::NoSuchUser),
            8 => Some(TFTPError::OptionNegotiation),
            _ => None,
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            TFTPError::UndefinedError => "Not defined, see error message (if any).",
            TFTPError::FileNotFound => "File not found.",
            TFTPError::AccessViolation => "Access violation.",
            TFTPError::DiskFull => "Disk full or allocation exceeded.",
            TFTPError::IllegalOperation => "Illegal TFTP operation.",
            TFTPError::UnknownTID => "Unknown transfer ID.",
            TFTPError::FileExists => "File already exists.",
            TFTPError::NoSuchUser => "No such user.",
            TFTPError::OptionNegotiation => "Option negotiation failed.",
        }
    }
}

impl fmt::Display for TFTPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.default_message(), self.code())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorPacket {
    code: u16,
    message: String,
}

impl ErrorPacket {
    /// Any code is accepted, including ones outside [`TFTPError`].
    pub fn new(code: u16, message: &str) -> Self {
        ErrorPacket {
            code,
            message: String::from(message),
        }
    }

    /// Packet for `err` carrying its standard message.
    pub fn from_error(err: TFTPError) -> Self {
        ErrorPacket::new(err.code(), err.default_message())
    }

    pub fn with_message(err: TFTPError, message: &str) -> Self {
        ErrorPacket::new(err.code(), message)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// The code as a known [`TFTPError`], if it is one.
    pub fn kind(&self) -> Option<TFTPError> {
        TFTPError::from_code(self.code)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(super) fn parse_body(body: &[u8]) -> Result<Self, TFTPParseError> {
        if OP_LEN + body.len() < ERR_MIN_LEN {
            return Err(TFTPParseError::BufferTooShort {
                actual: OP_LEN + body.len(),
                required: ERR_MIN_LEN,
            });
        }

        let code = NetworkEndian::read_u16(body);
        let rest = &body[ERR_CODE_LEN..];
        let (message, used) = text::read_terminated(rest, "error message")?;
        if used < rest.len() {
            return Err(TFTPParseError::TrailingData {
                packet: "ERROR",
                count: rest.len() - used,
            });
        }

        Ok(ErrorPacket { code, message })
    }
}

impl From<TFTPError> for ErrorPacket {
    fn from(err: TFTPError) -> Self {
        ErrorPacket::from_error(err)
    }
}

impl Serializable for ErrorPacket {
    fn encoded_len(&self) -> usize {
        OP_LEN + ERR_CODE_LEN + text::wire_len(&self.message)
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        text::validate("error message", &self.message)?;

        let mut written = Opcode::Error.write_to(w)?;
        w.write_u16::<NetworkEndian>(self.code)?;
        written += ERR_CODE_LEN;
        written += text::write_terminated(w, &self.message)?;

        Ok(written)
    }
}
