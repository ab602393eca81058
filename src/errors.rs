/// Errors that can occur while decoding or encoding a DNS message.
///
/// Every variant is recoverable: the request handler maps each one to a
/// FORMERR (RCODE 1) response instead of propagating it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("message truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("label length {length} exceeds the 63 byte limit")]
    LabelTooLong { length: usize },

    #[error("encoded name exceeds the 255 byte limit")]
    NameTooLong,

    #[error("compression pointer chain exceeds 10 jumps")]
    CompressionLoop,

    #[error("compression pointer target {target} is not behind position {position}")]
    PointerOutOfRange { target: usize, position: usize },

    #[error("invalid character {byte:#04x} in label")]
    InvalidCharacter { byte: u8 },

    #[error("message carries {count} questions, expected exactly 1")]
    QuestionCountInvalid { count: u16 },
}
