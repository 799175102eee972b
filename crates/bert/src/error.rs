//! BERT decoding error type.

use bert_buffers::BufferError;
use thiserror::Error;

/// Error type for term decoding and envelope unwrapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BertError {
    #[error("unsupported format version byte {0}, expected 131")]
    Format(u8),
    #[error("truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("unrecognized term tag {tag} at offset {offset}")]
    UnrecognizedTag { tag: u8, offset: usize },
    #[error("invalid envelope: {0}")]
    EnvelopeShape(String),
    #[error("invalid float literal {0:?}")]
    InvalidFloat(String),
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

impl From<BufferError> for BertError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer {
                offset,
                needed,
                remaining,
            } => BertError::TruncatedInput {
                offset,
                needed,
                remaining,
            },
        }
    }
}
