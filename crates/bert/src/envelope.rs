//! Channel message envelope carried atop the term encoding.
//!
//! A message is a five-element tuple or list
//! `[join_ref, ref, topic, event, payload]`.

use serde_json::{json, Value};

use crate::decoder::{DecoderOptions, TermDecoder};
use crate::error::BertError;
use crate::term::Term;

const ENVELOPE_ARITY: usize = 5;

/// A decoded channel message.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub join_ref: Term,
    pub ref_: Term,
    pub topic: String,
    pub event: String,
    pub payload: Term,
}

impl Envelope {
    /// JSON object with `join_ref`, `ref`, `topic`, `event` and `payload` keys.
    pub fn to_json(&self) -> Value {
        json!({
            "join_ref": Value::from(self.join_ref.clone()),
            "ref": Value::from(self.ref_.clone()),
            "topic": self.topic,
            "event": self.event,
            "payload": Value::from(self.payload.clone()),
        })
    }
}

impl TryFrom<Term> for Envelope {
    type Error = BertError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        let items = match term {
            Term::List(items) => items,
            other => {
                return Err(BertError::EnvelopeShape(format!(
                    "expected a {ENVELOPE_ARITY}-element sequence, got {other:?}"
                )))
            }
        };
        let [join_ref, ref_, topic, event, payload]: [Term; ENVELOPE_ARITY] =
            items.try_into().map_err(|items: Vec<Term>| {
                BertError::EnvelopeShape(format!(
                    "expected {ENVELOPE_ARITY} elements, got {}",
                    items.len()
                ))
            })?;
        Ok(Envelope {
            join_ref,
            ref_,
            topic: text_field("topic", topic)?,
            event: text_field("event", event)?,
            payload,
        })
    }
}

fn text_field(name: &str, term: Term) -> Result<String, BertError> {
    match term {
        Term::Str(s) => Ok(s),
        other => Err(BertError::EnvelopeShape(format!(
            "{name} must be text, got {other:?}"
        ))),
    }
}

/// Envelope decoder for one connection; reuses its [`TermDecoder`].
#[derive(Debug, Default)]
pub struct EnvelopeDecoder {
    pub decoder: TermDecoder,
}

impl EnvelopeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            decoder: TermDecoder::with_options(options),
        }
    }

    pub fn decode_envelope(&mut self, input: &[u8]) -> Result<Envelope, BertError> {
        let term = self.decoder.decode(input)?;
        Envelope::try_from(term).inspect_err(|err| {
            tracing::debug!(len = input.len(), "rejected message: {err}");
        })
    }

    /// Decodes `input` and hands the envelope to `handler`, returning what the
    /// handler returns. The handler is not called when decoding fails.
    pub fn decode<F, R>(&mut self, input: &[u8], handler: F) -> Result<R, BertError>
    where
        F: FnOnce(Envelope) -> R,
    {
        self.decode_envelope(input).map(handler)
    }
}

/// Decodes one message with default options and passes it to `handler`.
pub fn decode_envelope<F, R>(input: &[u8], handler: F) -> Result<R, BertError>
where
    F: FnOnce(Envelope) -> R,
{
    EnvelopeDecoder::new().decode(input, handler)
}
