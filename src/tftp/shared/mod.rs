use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use log::{debug, trace};

use crate::tftp::shared::ack_packet::AckPacket;
use crate::tftp::shared::data_packet::DataPacket;
use crate::tftp::shared::err_packet::ErrorPacket;
use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::oack_packet::OptionAckPacket;
use crate::tftp::shared::request_packet::{RequestKind, RequestPacket};

pub mod ack_packet;
pub mod data_packet;
pub mod err_packet;
pub mod error;
pub mod oack_packet;
pub mod options;
pub mod request_packet;
mod text;

/// Length of the opcode field in bytes.
pub(crate) const OP_LEN: usize = 2;

/// Packet type, the first two bytes of every datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    ReadRequest = 1,
    WriteRequest = 2,
    Data = 3,
    Acknowledgment = 4,
    Error = 5,
    OptionAcknowledgment = 6,
}

impl Opcode {
    /// Short protocol name, e.g. `RRQ`.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::ReadRequest => "RRQ",
            Opcode::WriteRequest => "WRQ",
            Opcode::Data => "DATA",
            Opcode::Acknowledgment => "ACK",
            Opcode::Error => "ERROR",
            Opcode::OptionAcknowledgment => "OACK",
        }
    }

    pub(crate) fn write_to<W: Write>(self, w: &mut W) -> io::Result<usize> {
        w.write_u16::<NetworkEndian>(self.into())?;
        Ok(OP_LEN)
    }
}

impl TryFrom<u16> for Opcode {
    type Error = TFTPParseError;

    fn try_from(op: u16) -> Result<Opcode, TFTPParseError> {
        match op {
            1 => Ok(Opcode::ReadRequest),
            2 => Ok(Opcode::WriteRequest),
            3 => Ok(Opcode::Data),
            4 => Ok(Opcode::Acknowledgment),
            5 => Ok(Opcode::Error),
            6 => Ok(Opcode::OptionAcknowledgment),
            op => Err(TFTPParseError::UnknownOpcode(op)),
        }
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> u16 {
        op as u16
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single TFTP datagram.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TFTPPacket {
    Request(RequestPacket),
    Data(DataPacket),
    Ack(AckPacket),
    Error(ErrorPacket),
    OptionAck(OptionAckPacket),
}

impl TFTPPacket {
    pub fn opcode(&self) -> Opcode {
        match self {
            TFTPPacket::Request(p) => p.kind().opcode(),
            TFTPPacket::Data(_) => Opcode::Data,
            TFTPPacket::Ack(_) => Opcode::Acknowledgment,
            TFTPPacket::Error(_) => Opcode::Error,
            TFTPPacket::OptionAck(_) => Opcode::OptionAcknowledgment,
        }
    }

    /// Parses one whole datagram. Every byte of `buf` must belong to the packet.
    pub fn deserialize(buf: &[u8]) -> Result<TFTPPacket, TFTPParseError> {
        let result = TFTPPacket::parse(buf);
        match &result {
            Ok(p) => trace!("decoded {} from {} bytes", p, buf.len()),
            Err(e) => debug!("rejected {} byte datagram: {}", buf.len(), e),
        }

        result
    }

    fn parse(buf: &[u8]) -> Result<TFTPPacket, TFTPParseError> {
        if buf.len() < OP_LEN {
            return Err(TFTPParseError::BufferTooShort {
                actual: buf.len(),
                required: OP_LEN,
            });
        }

        let op = Opcode::try_from(NetworkEndian::read_u16(buf))?;
        let body = &buf[OP_LEN..];

        let p = match op {
            Opcode::ReadRequest => {
                TFTPPacket::Request(RequestPacket::parse_body(RequestKind::Read, body)?)
            }
            Opcode::WriteRequest => {
                TFTPPacket::Request(RequestPacket::parse_body(RequestKind::Write, body)?)
            }
            Opcode::Data => TFTPPacket::Data(DataPacket::parse_body(body)?),
            Opcode::Acknowledgment => TFTPPacket::Ack(AckPacket::parse_body(body)?),
            Opcode::Error => TFTPPacket::Error(ErrorPacket::parse_body(body)?),
            Opcode::OptionAcknowledgment => {
                TFTPPacket::OptionAck(OptionAckPacket::parse_body(body)?)
            }
        };

        Ok(p)
    }
}

impl<'a> TryFrom<&'a [u8]> for TFTPPacket {
    type Error = TFTPParseError;

    fn try_from(buf: &'a [u8]) -> Result<TFTPPacket, TFTPParseError> {
        TFTPPacket::deserialize(buf)
    }
}

impl Serializable for TFTPPacket {
    fn encoded_len(&self) -> usize {
        match self {
            TFTPPacket::Request(p) => p.encoded_len(),
            TFTPPacket::Data(p) => p.encoded_len(),
            TFTPPacket::Ack(p) => p.encoded_len(),
            TFTPPacket::Error(p) => p.encoded_len(),
            TFTPPacket::OptionAck(p) => p.encoded_len(),
        }
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        let written = match self {
            TFTPPacket::Request(p) => p.serialize_to(w),
            TFTPPacket::Data(p) => p.serialize_to(w),
            TFTPPacket::Ack(p) => p.serialize_to(w),
            TFTPPacket::Error(p) => p.serialize_to(w),
            TFTPPacket::OptionAck(p) => p.serialize_to(w),
        }?;
        trace!("encoded {} into {} bytes", self, written);

        Ok(written)
    }
}

impl Display for TFTPPacket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TFTPPacket::Request(p) => {
                write!(f, "{} [{}] [{}]", self.opcode(), p.filename(), p.mode())?;
                if !p.options().is_empty() {
                    write!(f, " ")?;
                    fmt_options(f, p.options())?;
                }
                Ok(())
            }
            TFTPPacket::Data(p) => write!(f, "DATA [{}] ({} bytes)", p.blk(), p.data().len()),
            TFTPPacket::Ack(p) => write!(f, "ACK [{}]", p.blk()),
            TFTPPacket::Error(p) => write!(f, "ERR [{}]: {}", p.code(), p.message()),
            TFTPPacket::OptionAck(p) => {
                write!(f, "OACK ")?;
                fmt_options(f, p.options())
            }
        }
    }
}

fn fmt_options(f: &mut Formatter<'_>, options: &options::TFTPOptions) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (name, value)) in options.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}={}", name, value)?;
    }
    write!(f, "}}")
}

/// Encoding into any byte sink.
///
/// Text fields are checked before the first byte goes out, so a validation
/// error leaves the sink untouched.
pub trait Serializable {
    /// Exact number of bytes [`serialize_to`](Self::serialize_to) writes.
    fn encoded_len(&self) -> usize;

    /// Appends the packet to `w` and returns the number of bytes written.
    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError>;

    fn serialize(&self) -> Result<Vec<u8>, TFTPEncodeError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.serialize_to(&mut buf)?;
        Ok(buf)
    }
}
