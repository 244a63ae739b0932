/// DATA packets carry one block of the file.
///
///  2 bytes     2 bytes      n bytes
///  ----------------------------------
/// | Opcode |   Block #  |   Data     |
///  ----------------------------------
///
/// There is no length field: the payload is whatever follows the block
/// number. Limiting n to 512 (or a negotiated blksize) is left to the
/// transfer layer.
use std::io::Write;

use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::{Opcode, Serializable, OP_LEN};

const BLK_NUM_LEN: usize = 2;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DataPacket {
    blk: u16,
    data: Vec<u8>,
}

impl DataPacket {
    pub fn new(blk: u16, data: Vec<u8>) -> Self {
        DataPacket { blk, data }
    }

    pub fn blk(&self) -> u16 {
        self.blk
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub(super) fn parse_body(body: &[u8]) -> Result<Self, TFTPParseError> {
        if body.len() < BLK_NUM_LEN {
            return Err(TFTPParseError::BufferTooShort {
                actual: OP_LEN + body.len(),
                required: OP_LEN + BLK_NUM_LEN,
            });
        }

        let blk = NetworkEndian::read_u16(body);
        Ok(DataPacket::new(blk, body[BLK_NUM_LEN..].to_vec()))
    }
}

impl Serializable for DataPacket {
    fn encoded_len(&self) -> usize {
        OP_LEN + BLK_NUM_LEN + self.data.len()
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        Opcode::Data.write_to(w)?;
        w.write_u16::<NetworkEndian>(self.blk)?;
        w.write_all(&self.data)?;

        Ok(self.encoded_len())
    }
}
