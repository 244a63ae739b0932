use tftpeer_codec::{
    AckPacket, DataPacket, ErrorPacket, OptionAckPacket, RequestKind, RequestPacket,
    Serializable, TFTPOptions, TFTPPacket, TFTPParseError,
};

fn expect_string(buf: &[u8], offset: usize, s: &str) {
    assert_eq!(&buf[offset..offset + s.len()], s.as_bytes());
    assert_eq!(buf[offset + s.len()], 0x00);
}

fn sample_options() -> TFTPOptions {
    TFTPOptions::new()
        .with("saveFiles", "true")
        .with("discardQualifiers", "false")
        .with("secret", "Ix0e86yG8YpFzwz1gS0XxJW3")
}

#[test]
fn request_serialization() {
    let filename = "example_filename.cpp";
    let mode = "netascii";
    let packet = TFTPPacket::Request(RequestPacket::read(filename, mode));

    let mut buf = Vec::new();
    let size = packet.serialize_to(&mut buf).unwrap();
    assert_eq!(size, 2 + filename.len() + mode.len() + 2);
    assert_eq!(size, 32);

    assert_eq!(&buf[..2], &[0x00, 0x01]);
    expect_string(&buf, 2, filename);
    expect_string(&buf, 2 + filename.len() + 1, mode);
    assert_eq!(buf.len(), size);
}

#[test]
fn request_option_serialization() {
    let filename = "example_filename.cpp";
    let mode = "netascii";
    let packet = TFTPPacket::Request(RequestPacket::with_options(
        RequestKind::Read,
        filename,
        mode,
        sample_options(),
    ));

    let mut buf = Vec::new();
    let size = packet.serialize_to(&mut buf).unwrap();
    let options_size: usize = sample_options()
        .iter()
        .map(|(name, value)| name.len() + value.len() + 2)
        .sum();
    assert_eq!(size, 2 + filename.len() + mode.len() + 2 + options_size);
    assert_eq!(buf.len(), size);

    let mut offset = 2 + filename.len() + 1 + mode.len() + 1;
    for (name, value) in sample_options().iter() {
        expect_string(&buf, offset, name);
        offset += name.len() + 1;
        expect_string(&buf, offset, value);
        offset += value.len() + 1;
    }
    assert_eq!(offset, size);
}

#[test]
fn data_serialization() {
    let payload: Vec<u8> = (0..=254).collect();
    let packet = TFTPPacket::Data(DataPacket::new(255, payload.clone()));

    let mut buf = Vec::new();
    let size = packet.serialize_to(&mut buf).unwrap();
    assert_eq!(size, 259);
    assert_eq!(&buf[..4], &[0x00, 0x03, 0x00, 0xFF]);
    assert_eq!(&buf[4..], payload.as_slice());
}

#[test]
fn ack_serialization() {
    let bytes = TFTPPacket::Ack(AckPacket::new(255)).serialize().unwrap();
    assert_eq!(bytes, vec![0x00, 0x04, 0x00, 0xFF]);
}

#[test]
fn error_serialization() {
    let message = "Something went wrong...";
    let packet = TFTPPacket::Error(ErrorPacket::new(1, message));

    let mut buf = Vec::new();
    let size = packet.serialize_to(&mut buf).unwrap();
    assert_eq!(size, 4 + message.len() + 1);
    assert_eq!(&buf[..4], &[0x00, 0x05, 0x00, 0x01]);
    expect_string(&buf, 4, message);
    assert_eq!(buf.len(), size);
}

#[test]
fn option_ack_serialization() {
    let packet = TFTPPacket::OptionAck(OptionAckPacket::new(sample_options()));

    let mut buf = Vec::new();
    let size = packet.serialize_to(&mut buf).unwrap();
    assert_eq!(size, 2 + 15 + 24 + 32);
    assert_eq!(&buf[..2], &[0x00, 0x06]);

    let mut offset = 2;
    for (name, value) in sample_options().iter() {
        expect_string(&buf, offset, name);
        offset += name.len() + 1;
        expect_string(&buf, offset, value);
        offset += value.len() + 1;
    }
    assert_eq!(offset, size);
}

#[test]
fn request_parse() {
    let bytes = [
        0x00, 0x01, 0x2f, 0x73, 0x72, 0x76, 0x2f, 0x74, 0x66, 0x74, 0x70, 0x2f, 0x52, 0x65, 0x61,
        0x64, 0x46, 0x69, 0x6c, 0x65, 0x00, 0x6e, 0x65, 0x74, 0x61, 0x73, 0x63, 0x69, 0x69, 0x00,
    ];

    assert_eq!(
        TFTPPacket::deserialize(&bytes).unwrap(),
        TFTPPacket::Request(RequestPacket::read("/srv/tftp/ReadFile", "netascii"))
    );
}

#[test]
fn request_option_parse_keeps_order() {
    let mut bytes = b"\x00\x01/srv/tftp/ReadFile\0netascii\0".to_vec();
    bytes.extend_from_slice(b"saveFiles\0true\0discardQualifiers\0false\0");
    bytes.extend_from_slice(b"secret\0Ix0e86yG8YpFzwz1gS0XxJW3\0");

    match TFTPPacket::deserialize(&bytes).unwrap() {
        TFTPPacket::Request(p) => {
            assert_eq!(p.filename(), "/srv/tftp/ReadFile");
            assert_eq!(p.mode(), "netascii");
            assert_eq!(p.options(), &sample_options());
        }
        p => panic!("Wrong packet type {}", p),
    }
}

#[test]
fn option_ack_parse() {
    let mut bytes = vec![0x00, 0x06];
    bytes.extend_from_slice(b"saveFiles\0true\0discardQualifiers\0false\0");
    bytes.extend_from_slice(b"secret\0Ix0e86yG8YpFzwz1gS0XxJW3\0");

    assert_eq!(
        TFTPPacket::deserialize(&bytes).unwrap(),
        TFTPPacket::OptionAck(OptionAckPacket::new(sample_options()))
    );
}

#[test]
fn error_parse() {
    let bytes = [
        0x00, 0x05, 0x00, 0x01, 0x46, 0x69, 0x6c, 0x65, 0x20, 0x6e, 0x6f, 0x74, 0x20, 0x66, 0x6f,
        0x75, 0x6e, 0x64, 0x00,
    ];

    assert_eq!(
        TFTPPacket::deserialize(&bytes).unwrap(),
        TFTPPacket::Error(ErrorPacket::new(1, "File not found"))
    );
}

#[test]
fn unknown_opcodes_are_rejected() {
    for op in [0u16, 7, 8, 0x0100, 0xFFFF].iter() {
        let mut bytes = op.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0x00, 0x01]);
        assert_eq!(
            TFTPPacket::deserialize(&bytes).unwrap_err(),
            TFTPParseError::UnknownOpcode(*op)
        );
    }
}

#[test]
fn truncated_packets_are_rejected() {
    let full = TFTPPacket::Request(RequestPacket::with_options(
        RequestKind::Write,
        "a.txt",
        "octet",
        TFTPOptions::new().with("blksize", "1024"),
    ))
    .serialize()
    .unwrap();

    // a prefix ending right after the mode is a valid request without options
    let without_options = 2 + "a.txt".len() + 1 + "octet".len() + 1;
    assert_eq!(
        TFTPPacket::deserialize(&full[..without_options]).unwrap(),
        TFTPPacket::Request(RequestPacket::write("a.txt", "octet"))
    );

    for len in (2..full.len()).filter(|&len| len != without_options) {
        let err = TFTPPacket::deserialize(&full[..len]).unwrap_err();
        match err {
            TFTPParseError::MissingTerminator { .. } | TFTPParseError::MalformedOptions { .. } => {}
            e => panic!("prefix of {} bytes: unexpected error {:?}", len, e),
        }
    }

    let err = TFTPPacket::Error(ErrorPacket::new(2, "Access violation"))
        .serialize()
        .unwrap();
    assert_eq!(
        TFTPPacket::deserialize(&err[..err.len() - 1]).unwrap_err(),
        TFTPParseError::MissingTerminator {
            field: "error message"
        }
    );
}

#[test]
fn ack_with_trailing_bytes_is_rejected() {
    assert_eq!(
        TFTPPacket::deserialize(&[0x00, 0x04, 0x00, 0xFF, 0x00, 0x00]).unwrap_err(),
        TFTPParseError::TrailingData {
            packet: "ACK",
            count: 2
        }
    );
}
