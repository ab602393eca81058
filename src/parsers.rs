//! Decoding side of the DNS wire format.
//!
//! The fixed-layout header is parsed with nom. Domain names cannot be,
//! because compression pointers address the whole datagram by absolute
//! offset, so `decode_name` walks the buffer with an explicit cursor and
//! returns typed errors for every way a hostile packet can go wrong.

use nom::{number::complete::be_u16, IResult};

use crate::errors::CodecError;
use crate::protocol::{
    is_label_byte, Header, ParsedRequest, Question, HEADER_LEN, MAX_LABEL_LEN, MAX_NAME_LEN,
    MAX_POINTER_JUMPS,
};

fn parse_header(input: &[u8]) -> IResult<&[u8], Header> {
    let (input, id) = be_u16(input)?;
    let (input, flags) = be_u16(input)?;
    let (input, qdcount) = be_u16(input)?;
    let (input, ancount) = be_u16(input)?;
    let (input, nscount) = be_u16(input)?;
    let (input, arcount) = be_u16(input)?;

    let header = Header {
        id,
        // qr (Query/Response): bit 15
        qr: (flags & 0x8000) != 0,
        // opcode: bits 11-14
        opcode: ((flags & 0x7800) >> 11) as u8,
        // aa (Authoritative Answer): bit 10
        aa: (flags & 0x0400) != 0,
        // tc (Truncated): bit 9
        tc: (flags & 0x0200) != 0,
        // rd (Recursion Desired): bit 8
        rd: (flags & 0x0100) != 0,
        // ra (Recursion Available): bit 7
        ra: (flags & 0x0080) != 0,
        // rcode (Response Code): bits 0-3
        rcode: (flags & 0x000F) as u8,
        qdcount,
        ancount,
        nscount,
        arcount,
    };

    Ok((input, header))
}

/// Decode the fixed 12-byte header at the start of `buf`.
pub fn decode_header(buf: &[u8]) -> Result<Header, CodecError> {
    if buf.len() < HEADER_LEN {
        return Err(CodecError::Truncated { offset: buf.len() });
    }
    match parse_header(buf) {
        Ok((_, header)) => Ok(header),
        Err(_) => Err(CodecError::Truncated { offset: 0 }),
    }
}

/// Decode a (possibly compressed) domain name starting at `offset`.
///
/// Returns the dotted name and the offset where decoding resumed in the
/// original stream: one past the terminator, or one past the first
/// compression pointer taken, whichever came first. Pointers may only point
/// backwards, so a chain can never revisit a position; the jump cap exists
/// to bound chains built from many distinct backward targets.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), CodecError> {
    let mut pos = offset;
    let mut jumps = 0usize;
    // Offset to report to the caller, fixed once the first pointer is taken.
    let mut resume: Option<usize> = None;
    let mut labels: Vec<String> = Vec::new();
    // Terminator byte counts toward the 255-byte wire limit.
    let mut encoded_len = 1usize;

    loop {
        let len = *buf
            .get(pos)
            .ok_or(CodecError::Truncated { offset: pos })? as usize;

        if len == 0 {
            return Ok((labels.join("."), resume.unwrap_or(pos + 1)));
        }

        if len & 0xC0 == 0xC0 {
            let low = *buf
                .get(pos + 1)
                .ok_or(CodecError::Truncated { offset: pos + 1 })?
                as usize;
            let target = ((len & 0x3F) << 8) | low;
            if target >= pos {
                return Err(CodecError::PointerOutOfRange {
                    target,
                    position: pos,
                });
            }
            jumps += 1;
            if jumps > MAX_POINTER_JUMPS {
                return Err(CodecError::CompressionLoop);
            }
            if resume.is_none() {
                resume = Some(pos + 2);
            }
            pos = target;
            continue;
        }

        // Top bits 01 or 10 land here as lengths 64..=191.
        if len > MAX_LABEL_LEN {
            return Err(CodecError::LabelTooLong { length: len });
        }

        let label = buf
            .get(pos + 1..pos + 1 + len)
            .ok_or(CodecError::Truncated { offset: buf.len() })?;
        if let Some(&byte) = label.iter().find(|b| !is_label_byte(**b)) {
            return Err(CodecError::InvalidCharacter { byte });
        }

        encoded_len += len + 1;
        if encoded_len > MAX_NAME_LEN {
            return Err(CodecError::NameTooLong);
        }

        // Validated ASCII, so the lossy conversion is exact.
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos += len + 1;
    }
}

/// Decode the question section starting at `offset`: a name followed by
/// big-endian QTYPE and QCLASS. Returns the question and the offset past it.
pub fn decode_question(buf: &[u8], offset: usize) -> Result<(Question, usize), CodecError> {
    let (qname, after_name) = decode_name(buf, offset)?;
    let tail = buf
        .get(after_name..after_name + 4)
        .ok_or(CodecError::Truncated { offset: buf.len() })?;
    let qtype = u16::from_be_bytes([tail[0], tail[1]]);
    let qclass = u16::from_be_bytes([tail[2], tail[3]]);

    Ok((
        Question {
            qname,
            qtype,
            qclass,
        },
        after_name + 4,
    ))
}

/// Decode a whole query: header, question-count check, single question.
pub fn decode_request(buf: &[u8]) -> Result<ParsedRequest, CodecError> {
    let header = decode_header(buf)?;
    if header.qdcount != 1 {
        return Err(CodecError::QuestionCountInvalid {
            count: header.qdcount,
        });
    }
    let (question, end) = decode_question(buf, HEADER_LEN)?;
    Ok(ParsedRequest {
        header,
        question,
        question_span: (HEADER_LEN, end),
    })
}
