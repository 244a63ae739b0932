/// OACK packets answer a request that carried options (RFC 2347), listing
/// the options the server accepted.
///
///  2 bytes
///  -------------------------------------------------------
/// | Opcode |  opt1  | 0 | value1 | 0 |  optN  | 0 | valueN | 0 |
///  -------------------------------------------------------
use std::io::Write;

use crate::tftp::shared::error::{TFTPEncodeError, TFTPParseError};
use crate::tftp::shared::options::{decode_options_at, TFTPOptions};
use crate::tftp::shared::{Opcode, Serializable, OP_LEN};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct OptionAckPacket {
    options: TFTPOptions,
}

impl OptionAckPacket {
    pub fn new(options: TFTPOptions) -> Self {
        OptionAckPacket { options }
    }

    pub fn options(&self) -> &TFTPOptions {
        &self.options
    }

    pub fn into_options(self) -> TFTPOptions {
        self.options
    }

    pub(super) fn parse_body(body: &[u8]) -> Result<Self, TFTPParseError> {
        Ok(OptionAckPacket::new(decode_options_at(body, OP_LEN)?))
    }
}

impl Serializable for OptionAckPacket {
    fn encoded_len(&self) -> usize {
        OP_LEN + self.options.encoded_len()
    }

    fn serialize_to<W: Write>(&self, w: &mut W) -> Result<usize, TFTPEncodeError> {
        self.options.validate()?;

        let written = Opcode::OptionAcknowledgment.write_to(w)?;
        Ok(written + self.options.write_to(w)?)
    }
}
