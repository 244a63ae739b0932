/// ACK packets are acknowledged by  DATA  or ERROR packets.
/// the opcode is 4.
///
/// The  block  number  in an  ACK echoes
/// the block number of the DATA packet being acknowledged.
///
/// A WRQ is acknowledged with an ACK packet having a
/// block number of zero.
use std::io::Write;

use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::{Opcode, Serializable, OP_LEN};

const ACK_LEN: usize = 4;
const BLK_NUM_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AckPacket {
    blk: u16,
}

impl AckPacket {
    pub fn new(blk: u16) -> Self {
        AckPacket { blk }
    }

    pub fn blk(&self) -> u16 {
        self.blk
    }

    pub(super) fn parse_body(body: &[u8]) -> Result<Self, TFTPParseError> {
        if body.len() < BLK_NUM_LEN {
            return Err(TFTPParseError::BufferTooShort {
                actual: OP_LEN + body.len(),
                required: ACK_LEN,
            });
        }
        if body.len() > BLK_NUM_LEN {
            return Err(TFTPParseError::TrailingData {
                packet: "ACK",
                count: body.len() - BLK_NUM_LEN,
            });
        }

        Ok(AckPacket::new(NetworkEndian::read_u16(body)))
    }
}

impl Serializable for AckPacket {
    fn encoded_len(&self) -> usize {
        ACK_LEN
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        Opcode::Acknowledgment.write_to(w)?;
        w.write_u16::<NetworkEndian>(self.blk)?;

        Ok(ACK_LEN)
    }
}
