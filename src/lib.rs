//! Wire codec for TFTP packets (RFC 1350) with RFC 2347 option lists.
//!
//! The codec is stateless: [`TFTPPacket::serialize`] turns a packet into the
//! bytes of one UDP datagram and [`TFTPPacket::deserialize`] turns one datagram
//! back into a packet. Sockets, retries and file access are left to the caller.
//!
//! ```
//! use tftpeer_codec::{AckPacket, Serializable, TFTPPacket};
//!
//! let bytes = TFTPPacket::Ack(AckPacket::new(255)).serialize().unwrap();
//! assert_eq!(bytes, vec![0x00, 0x04, 0x00, 0xFF]);
//! assert_eq!(
//!     TFTPPacket::deserialize(&bytes).unwrap(),
//!     TFTPPacket::Ack(AckPacket::new(255))
//! );
//! ```

pub mod tftp;

pub use crate::tftp::shared::ack_packet::AckPacket;
pub use crate::tftp::shared::data_packet::DataPacket;
pub use crate::tftp::shared::err_packet::{ErrorPacket, TFTPError};
pub use crate::tftp::shared::error::{InvalidText, TFTPEncodeError, TFTPParseError};
pub use crate::tftp::shared::oack_packet::OptionAckPacket;
pub use crate::tftp::shared::options::{
    decode_options, encode_options, TFTPOptions, OPT_BLKSIZE, OPT_TIMEOUT, OPT_TSIZE,
    OPT_WINDOWSIZE,
};
pub use crate::tftp::shared::request_packet::{RequestKind, RequestPacket, TransferMode};
pub use crate::tftp::shared::{Opcode, Serializable, TFTPPacket};
