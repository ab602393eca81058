//! Maps a decoded request and a resolver outcome to response bytes.
//!
//! The question section is echoed verbatim from the request buffer, so the
//! sender's casing survives even though matching is case-insensitive. The
//! only name in the answer section is the fixed 0xC00C back-reference to the
//! question name at offset 12.

use bytes::BufMut;

use crate::codec::encode_header;
use crate::protocol::{
    Header, ParsedRequest, ANSWER_TTL, CLASS_IN, MAX_MESSAGE_LEN, QUESTION_NAME_POINTER,
    RCODE_FORMERR, RCODE_NOERROR, RCODE_NOTIMP, RCODE_NXDOMAIN, TYPE_A,
};
use crate::resolver::Outcome;

/// Build the reply for a fully decoded request.
pub fn build_reply(buf: &[u8], request: &ParsedRequest, outcome: Outcome) -> Vec<u8> {
    let (rcode, answer) = match outcome {
        Outcome::Success(addr) => (RCODE_NOERROR, Some(addr)),
        Outcome::NameNotFound => (RCODE_NXDOMAIN, None),
        Outcome::TypeNotSupported => (RCODE_NOTIMP, None),
    };
    let (start, end) = request.question_span;
    assemble(
        &request.header,
        rcode,
        Some(&buf[start..end]),
        answer,
    )
}

/// Build a FORMERR reply after a decode failure. The question is echoed when
/// it decoded despite the failure (a bad question count, for instance) and
/// omitted otherwise.
pub fn build_format_error(
    buf: &[u8],
    header: &Header,
    question_span: Option<(usize, usize)>,
) -> Vec<u8> {
    let question = question_span.map(|(start, end)| &buf[start..end]);
    assemble(header, RCODE_FORMERR, question, None)
}

fn assemble(
    request_header: &Header,
    rcode: u8,
    question: Option<&[u8]>,
    answer: Option<[u8; 4]>,
) -> Vec<u8> {
    let reply = compose(request_header, rcode, question, answer);
    if reply.len() <= MAX_MESSAGE_LEN {
        return reply;
    }
    // Fail closed: a header-only FORMERR instead of a truncated packet.
    compose(request_header, RCODE_FORMERR, None, None)
}

fn compose(
    request_header: &Header,
    rcode: u8,
    question: Option<&[u8]>,
    answer: Option<[u8; 4]>,
) -> Vec<u8> {
    let header = Header {
        id: request_header.id,
        qr: true,
        opcode: request_header.opcode,
        aa: true,
        tc: false,
        rd: request_header.rd,
        // RA mirrors the request's RD bit.
        ra: request_header.rd,
        rcode,
        qdcount: question.is_some() as u16,
        ancount: answer.is_some() as u16,
        nscount: 0,
        arcount: 0,
    };

    let mut out = Vec::with_capacity(
        12 + question.map_or(0, <[u8]>::len) + answer.map_or(0, |_| 16),
    );
    out.put_slice(&encode_header(&header));
    if let Some(question) = question {
        out.put_slice(question);
    }
    if let Some(addr) = answer {
        out.put_u16(QUESTION_NAME_POINTER);
        out.put_u16(TYPE_A);
        out.put_u16(CLASS_IN);
        out.put_u32(ANSWER_TTL);
        out.put_u16(addr.len() as u16);
        out.put_slice(&addr);
    }
    out
}
