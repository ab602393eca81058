//! Request handling: decode, resolve, build.
//!
//! `handle` is the only entry point the socket layer needs. It is pure and
//! synchronous, shares nothing mutable, and turns every decode failure into
//! a well-formed FORMERR reply instead of propagating it, so it can be
//! invoked concurrently for distinct datagrams without coordination.

use tracing::debug;

use crate::errors::CodecError;
use crate::parsers::{decode_header, decode_question, decode_request};
use crate::protocol::{Header, HEADER_LEN};
use crate::resolver::{resolve, RecordTable};
use crate::response_builder::{build_format_error, build_reply};

/// Answer one datagram. Always returns a syntactically valid DNS response,
/// whatever the input bytes look like.
pub fn handle(buf: &[u8], table: &RecordTable) -> Vec<u8> {
    let request = match decode_request(buf) {
        Ok(request) => request,
        Err(err) => {
            debug!("request decode failed: {err}");
            return failure_reply(buf, &err);
        }
    };

    let outcome = resolve(
        table,
        &request.question.qname,
        request.question.qtype,
        request.question.qclass,
    );
    debug!(question = %request.question, ?outcome, "resolved");

    build_reply(buf, &request, outcome)
}

/// Build the FORMERR reply for a decode failure, echoing whatever still
/// decoded cleanly: the header when it fit, and the first question when the
/// failure was only a bad question count.
fn failure_reply(buf: &[u8], err: &CodecError) -> Vec<u8> {
    let header = decode_header(buf).unwrap_or_else(|_| salvage_header(buf));
    let span = match err {
        CodecError::QuestionCountInvalid { count } if *count >= 1 => {
            decode_question(buf, HEADER_LEN)
                .ok()
                .map(|(_, end)| (HEADER_LEN, end))
        }
        _ => None,
    };
    build_format_error(buf, &header, span)
}

/// Best-effort header for error replies when the real one would not decode:
/// id and RD are taken from whatever prefix arrived, everything else zero.
fn salvage_header(buf: &[u8]) -> Header {
    let mut header = Header::default();
    if buf.len() >= 2 {
        header.id = u16::from_be_bytes([buf[0], buf[1]]);
    }
    if buf.len() >= 4 {
        header.rd = (buf[3] & 0x01) != 0;
    }
    header
}
