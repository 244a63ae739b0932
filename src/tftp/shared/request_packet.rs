/// RRQ and WRQ packets open a transfer.
///
///  2 bytes     string    1 byte     string   1 byte
///  ------------------------------------------------
/// | Opcode |  Filename  |   0  |    Mode    |   0  |
///  ------------------------------------------------
///
/// RFC 2347 lets the client append `opt 0 value 0` pairs after the mode.
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::options::{decode_options_at, TFTPOptions};
use crate::tftp::shared::text;
use crate::tftp::shared::{Opcode, Serializable, OP_LEN};

/// Transfer direction of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Read,
    Write,
}

impl RequestKind {
    pub fn opcode(self) -> Opcode {
        match self {
            RequestKind::Read => Opcode::ReadRequest,
            RequestKind::Write => Opcode::WriteRequest,
        }
    }
}

/// The transfer modes RFC 1350 defines. The mode field of a request is
/// free text; this only names the well-known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferMode {
    NetAscii,
    Octet,
    Mail,
}

impl TransferMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferMode::NetAscii => "netascii",
            TransferMode::Octet => "octet",
            TransferMode::Mail => "mail",
        }
    }
}

impl FromStr for TransferMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [TransferMode::NetAscii, TransferMode::Octet, TransferMode::Mail]
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown transfer mode [{}]", s))
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RequestPacket {
    kind: RequestKind,
    filename: String,
    mode: String,
    options: TFTPOptions,
}

impl RequestPacket {
    pub fn new(kind: RequestKind, filename: &str, mode: &str) -> Self {
        RequestPacket::with_options(kind, filename, mode, TFTPOptions::new())
    }

    pub fn with_options(
        kind: RequestKind,
        filename: &str,
        mode: &str,
        options: TFTPOptions,
    ) -> Self {
        RequestPacket {
            kind,
            filename: String::from(filename),
            mode: String::from(mode),
            options,
        }
    }

    /// Read request (RRQ) without options.
    pub fn read(filename: &str, mode: &str) -> Self {
        RequestPacket::new(RequestKind::Read, filename, mode)
    }

    /// Write request (WRQ) without options.
    pub fn write(filename: &str, mode: &str) -> Self {
        RequestPacket::new(RequestKind::Write, filename, mode)
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// The mode as one of the RFC 1350 modes, if it is one.
    pub fn transfer_mode(&self) -> Option<TransferMode> {
        self.mode.parse().ok()
    }

    pub fn options(&self) -> &TFTPOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TFTPOptions {
        &mut self.options
    }

    pub(super) fn parse_body(kind: RequestKind, body: &[u8]) -> Result<Self, TFTPParseError> {
        let (filename, filename_len) = text::read_non_empty(body, "filename")?;
        let rest = &body[filename_len..];
        let (mode, mode_len) = text::read_non_empty(rest, "mode")?;

        let consumed = filename_len + mode_len;
        let options = decode_options_at(&body[consumed..], OP_LEN + consumed)?;

        Ok(RequestPacket {
            kind,
            filename,
            mode,
            options,
        })
    }
}

impl Serializable for RequestPacket {
    fn encoded_len(&self) -> usize {
        OP_LEN
            + text::wire_len(&self.filename)
            + text::wire_len(&self.mode)
            + self.options.encoded_len()
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        text::validate_non_empty("filename", &self.filename)?;
        text::validate_non_empty("mode", &self.mode)?;
        self.options.validate()?;

        let mut written = self.kind.opcode().write_to(w)?;
        written += text::write_terminated(w, &self.filename)?;
        written += text::write_terminated(w, &self.mode)?;
        written += self.options.write_to(w)?;

        Ok(written)
    }
}
