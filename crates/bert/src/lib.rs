//! BERT (Erlang External Term Format) decoding for channel messages.
//!
//! [`TermDecoder`] turns one binary buffer into a [`Term`] tree;
//! [`decode_envelope`] goes one step further and binds the five fields of a
//! channel message (`join_ref`, `ref`, `topic`, `event`, `payload`) before
//! handing them to a callback.
//!
//! ```
//! use bert::{decode_envelope, Term};
//!
//! // {nil, "3", "lobby", "ping", 7}
//! let bytes = [
//!     131, 104, 5,
//!     100, 0, 3, b'n', b'i', b'l',
//!     109, 0, 0, 0, 1, b'3',
//!     109, 0, 0, 0, 5, b'l', b'o', b'b', b'b', b'y',
//!     109, 0, 0, 0, 4, b'p', b'i', b'n', b'g',
//!     97, 7,
//! ];
//! let event = decode_envelope(&bytes, |env| {
//!     assert_eq!(env.payload, Term::Integer(7));
//!     env.event
//! })
//! .unwrap();
//! assert_eq!(event, "ping");
//! ```

mod constants;
mod decoder;
mod error;
mod term;

pub mod cli;
pub mod envelope;

pub use constants::{TermTag, FLOAT_TEXT_LEN, FORMAT_VERSION};
pub use decoder::{DecoderOptions, TermDecoder, UnknownTag};
pub use envelope::{decode_envelope, Envelope, EnvelopeDecoder};
pub use error::BertError;
pub use term::Term;

/// Decodes one term with default options.
pub fn decode(input: &[u8]) -> Result<Term, BertError> {
    TermDecoder::new().decode(input)
}
