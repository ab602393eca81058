// DNS wire-format data model and constants (RFC 1035 subset)

/// Fixed size of the DNS header on the wire.
pub const HEADER_LEN: usize = 12;

/// Classic UDP DNS message size limit; replies never exceed it.
pub const MAX_MESSAGE_LEN: usize = 512;

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum encoded length of a name, terminator included.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum number of compression pointer jumps followed while decoding a name.
pub const MAX_POINTER_JUMPS: usize = 10;

/// Compression pointer to offset 12, where the question name of a
/// single-question message always starts.
pub const QUESTION_NAME_POINTER: u16 = 0xC00C;

// Record type and class constants
pub const TYPE_A: u16 = 1; // IPv4 address
pub const CLASS_IN: u16 = 1; // Internet

/// TTL carried by every answer record.
pub const ANSWER_TTL: u32 = 300;

// Response codes
pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;

/// Bytes allowed inside a label: alphanumerics, `-` and `_`.
pub(crate) fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// The fixed 12-byte DNS header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,      // Identifier, 16 bits
    pub qr: bool,     // Query or Response, 1 bit
    pub opcode: u8,   // Operation code, 4 bits
    pub aa: bool,     // Authoritative answer, 1 bit
    pub tc: bool,     // Truncated, 1 bit
    pub rd: bool,     // Recursion desired, 1 bit
    pub ra: bool,     // Recursion available, 1 bit
    pub rcode: u8,    // Response code, 4 bits
    pub qdcount: u16, // Number of questions, 16 bits
    pub ancount: u16, // Number of answers, 16 bits
    pub nscount: u16, // Number of authority records, 16 bits
    pub arcount: u16, // Number of additional records, 16 bits
}

/// A single question: name plus QTYPE/QCLASS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qtype, self.qclass)
    }
}

/// A fully decoded request.
///
/// `question_span` is the raw byte range of the question section in the
/// original datagram, kept so the response can echo it verbatim with the
/// sender's casing intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub header: Header,
    pub question: Question,
    pub question_span: (usize, usize),
}
