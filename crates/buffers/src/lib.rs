//! Byte cursor primitives for binary wire formats.
//!
//! Every read is bounds-checked: a read that would cross the end of the
//! underlying slice fails with [`BufferError::EndOfBuffer`] and leaves the
//! cursor where it was.

mod reader;

pub use reader::Reader;

/// Error returned by [`Reader`] reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("end of buffer at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}
