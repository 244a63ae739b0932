use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;
use pretty_bytes::converter::convert;

use tftpeer_codec::{
    AckPacket, DataPacket, ErrorPacket, OptionAckPacket, RequestKind, RequestPacket,
    Serializable, TFTPError, TFTPOptions, TFTPPacket,
};

/// Encode and decode TFTP datagrams.
#[derive(Parser, Debug)]
#[command(version, author = "shakram02")]
pub struct Opts {
    /// only print the result, no log lines.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// decode one datagram given as hex bytes.
    Decode(DecodeArgs),
    /// build a packet and print its bytes as hex.
    #[command(subcommand)]
    Encode(EncodeCommand),
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Datagram bytes in hex. Spaces and ':' between bytes are ignored.
    #[arg(required = true)]
    pub hex: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// name of the file to be read or written.
    pub filename: String,
    /// transfer mode.
    #[arg(short, long, default_value = "octet")]
    pub mode: String,
    /// option as name=value, may be repeated.
    #[arg(short = 'o', long = "option", value_parser = parse_option)]
    pub options: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum EncodeCommand {
    /// read request.
    Rrq(RequestArgs),
    /// write request.
    Wrq(RequestArgs),
    /// data block.
    Data {
        block: u16,
        /// payload bytes in hex.
        #[arg(default_value = "")]
        payload: String,
    },
    /// acknowledgment.
    Ack { block: u16 },
    /// error, with the standard message for the code unless one is given.
    Error { code: u16, message: Option<String> },
    /// option acknowledgment.
    Oack {
        /// option as name=value, may be repeated.
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },
}

impl EncodeCommand {
    pub fn to_packet(&self) -> anyhow::Result<TFTPPacket> {
        let packet = match self {
            EncodeCommand::Rrq(args) => TFTPPacket::Request(args.to_request(RequestKind::Read)),
            EncodeCommand::Wrq(args) => TFTPPacket::Request(args.to_request(RequestKind::Write)),
            EncodeCommand::Data { block, payload } => {
                TFTPPacket::Data(DataPacket::new(*block, parse_hex(&[payload.as_str()])?))
            }
            EncodeCommand::Ack { block } => TFTPPacket::Ack(AckPacket::new(*block)),
            EncodeCommand::Error { code, message } => {
                let message = match (message, TFTPError::from_code(*code)) {
                    (Some(message), _) => message.as_str(),
                    (None, Some(err)) => err.default_message(),
                    (None, None) => "",
                };
                TFTPPacket::Error(ErrorPacket::new(*code, message))
            }
            EncodeCommand::Oack { options } => {
                TFTPPacket::OptionAck(OptionAckPacket::new(options.iter().cloned().collect()))
            }
        };

        Ok(packet)
    }
}

impl RequestArgs {
    fn to_request(&self, kind: RequestKind) -> RequestPacket {
        let options: TFTPOptions = self.options.iter().cloned().collect();
        RequestPacket::with_options(kind, &self.filename, &self.mode, options)
    }
}

pub fn decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let words: Vec<&str> = args.hex.iter().map(String::as_str).collect();
    let buf = parse_hex(&words)?;
    let packet = TFTPPacket::deserialize(&buf)
        .with_context(|| format!("failed to decode {} byte datagram", buf.len()))?;

    info!("decoded {} bytes", buf.len());
    println!("{}", packet);
    match &packet {
        TFTPPacket::Request(p) => {
            if p.transfer_mode().is_none() {
                println!("  nonstandard mode [{}]", p.mode());
            }
            print_options(p.options());
        }
        TFTPPacket::Data(p) => println!("  payload: {}", convert(p.data().len() as f64)),
        TFTPPacket::Error(p) => {
            if let Some(err) = p.kind() {
                println!("  {}", err);
            }
        }
        TFTPPacket::OptionAck(p) => print_options(p.options()),
        TFTPPacket::Ack(_) => {}
    }

    Ok(())
}

pub fn encode(cmd: &EncodeCommand) -> anyhow::Result<()> {
    let packet = cmd.to_packet()?;
    let bytes = packet
        .serialize()
        .with_context(|| format!("failed to encode {}", packet))?;

    info!("{} encodes to {}", packet, convert(bytes.len() as f64));
    println!("{}", to_hex(&bytes));

    Ok(())
}

fn print_options(options: &TFTPOptions) {
    for (name, value) in options.iter() {
        println!("  {} = {}", name, value);
    }
}

fn parse_option(s: &str) -> Result<(String, String), String> {
    match s.find('=') {
        Some(pos) => Ok((s[..pos].to_string(), s[pos + 1..].to_string())),
        None => Err(format!("expected name=value, got [{}]", s)),
    }
}

fn parse_hex(words: &[&str]) -> anyhow::Result<Vec<u8>> {
    let digits: Vec<char> = words
        .iter()
        .flat_map(|w| w.chars())
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits ({})", digits.len());
    }

    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            if !pair.iter().all(char::is_ascii_hexdigit) {
                bail!("invalid hex byte [{}]", byte);
            }
            u8::from_str_radix(&byte, 16).with_context(|| format!("invalid hex byte [{}]", byte))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(" ")
}
