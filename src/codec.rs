//! Encoding side of the DNS wire format.
//!
//! The encoder never emits name compression; the only pointer that appears
//! in replies is the fixed question back-reference written by the response
//! builder.

use bytes::BufMut;

use crate::errors::CodecError;
use crate::protocol::{is_label_byte, Header, Question, MAX_LABEL_LEN, MAX_NAME_LEN};

/// Pack the header flag fields into the 16-bit FLAGS word.
pub fn pack_flags(header: &Header) -> u16 {
    let mut flags: u16 = 0;
    if header.qr {
        flags |= 0x8000;
    }
    flags |= ((header.opcode as u16) & 0x0F) << 11;
    if header.aa {
        flags |= 0x0400;
    }
    if header.tc {
        flags |= 0x0200;
    }
    if header.rd {
        flags |= 0x0100;
    }
    if header.ra {
        flags |= 0x0080;
    }
    flags |= (header.rcode as u16) & 0x0F;
    flags
}

/// Encode the fixed 12-byte header.
pub fn encode_header(header: &Header) -> [u8; 12] {
    let mut buf = [0u8; 12];
    buf[0..2].copy_from_slice(&header.id.to_be_bytes());
    buf[2..4].copy_from_slice(&pack_flags(header).to_be_bytes());
    buf[4..6].copy_from_slice(&header.qdcount.to_be_bytes());
    buf[6..8].copy_from_slice(&header.ancount.to_be_bytes());
    buf[8..10].copy_from_slice(&header.nscount.to_be_bytes());
    buf[10..12].copy_from_slice(&header.arcount.to_be_bytes());
    buf
}

/// Encode a domain name as length-prefixed labels plus a zero terminator.
pub fn encode_name(name: &str) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(name.len() + 2);
    // Terminator byte counts toward the 255-byte wire limit.
    let mut encoded_len = 1usize;

    for label in name.split('.') {
        // Tolerate a trailing dot, as in "example.com."
        if label.is_empty() {
            continue;
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(CodecError::LabelTooLong {
                length: label.len(),
            });
        }
        if let Some(&byte) = label.as_bytes().iter().find(|b| !is_label_byte(**b)) {
            return Err(CodecError::InvalidCharacter { byte });
        }
        encoded_len += label.len() + 1;
        if encoded_len > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong);
        }
        out.put_u8(label.len() as u8);
        out.put_slice(label.as_bytes());
    }
    out.put_u8(0);

    Ok(out)
}

/// Encode a question section. Only used to construct test fixtures; queries
/// on the wire come from clients.
pub fn encode_question(question: &Question) -> Result<Vec<u8>, CodecError> {
    let mut out = encode_name(&question.qname)?;
    out.put_u16(question.qtype);
    out.put_u16(question.qclass);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{decode_header, decode_name};
    use crate::protocol::{CLASS_IN, TYPE_A};

    #[test]
    fn encode_name_example_com() {
        let encoded = encode_name("example.com").unwrap();
        let expected = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', // "example"
            3, b'c', b'o', b'm', // "com"
            0,    // terminator
        ];
        assert_eq!(encoded, expected);
    }

    #[test]
    fn encode_name_tolerates_trailing_dot() {
        assert_eq!(
            encode_name("test.org.").unwrap(),
            encode_name("test.org").unwrap()
        );
    }

    #[test]
    fn name_round_trips_through_both_codecs() {
        for name in ["example.com", "localhost", "a-b_c.x2.example"] {
            let encoded = encode_name(name).unwrap();
            assert_eq!(
                decode_name(&encoded, 0).unwrap(),
                (name.to_string(), encoded.len())
            );
        }
    }

    #[test]
    fn encode_name_rejects_long_label() {
        let name = "a".repeat(64);
        assert_eq!(
            encode_name(&name),
            Err(CodecError::LabelTooLong { length: 64 })
        );
    }

    #[test]
    fn encode_name_rejects_long_name() {
        // Four maximal labels encode to 257 bytes.
        let label = "a".repeat(63);
        let name = [label.as_str(); 4].join(".");
        assert_eq!(encode_name(&name), Err(CodecError::NameTooLong));
    }

    #[test]
    fn encode_name_rejects_bad_characters() {
        assert_eq!(
            encode_name("exa mple.com"),
            Err(CodecError::InvalidCharacter { byte: b' ' })
        );
    }

    #[test]
    fn header_round_trips_through_both_codecs() {
        let header = Header {
            id: 0x1234,
            qr: true,
            opcode: 0,
            aa: true,
            tc: false,
            rd: true,
            ra: true,
            rcode: 0,
            qdcount: 1,
            ancount: 1,
            nscount: 0,
            arcount: 0,
        };

        let bytes = encode_header(&header);
        // QR=1, AA=1, RD=1, RA=1 packs to 0x8580.
        assert_eq!(&bytes[..4], &[0x12, 0x34, 0x85, 0x80]);
        assert_eq!(decode_header(&bytes).unwrap(), header);
    }

    #[test]
    fn encode_question_appends_type_and_class() {
        let question = Question {
            qname: "example.com".to_string(),
            qtype: TYPE_A,
            qclass: CLASS_IN,
        };
        let encoded = encode_question(&question).unwrap();
        assert_eq!(encoded.len(), 13 + 4);
        assert_eq!(&encoded[13..], &[0x00, 0x01, 0x00, 0x01]);
    }
}
