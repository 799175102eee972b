//! Core logic for the `bert-unpack` binary: decode a BERT message and
//! render it as JSON.

use crate::decoder::{DecoderOptions, TermDecoder};
use crate::envelope::EnvelopeDecoder;
use crate::error::BertError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Decode(#[from] BertError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {flag}: {value}")]
    InvalidArg { flag: String, value: String },
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown argument: {0}")]
    UnknownArg(String),
}

/// Options for [`unpack`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Interpret the term as a channel envelope.
    pub envelope: bool,
    pub pretty: bool,
    pub decoder: DecoderOptions,
}

/// Parses `bert-unpack` arguments (without the program name).
///
/// `--envelope`, `--strict`, `--pretty`, `--max-depth N`.
pub fn parse_args<I, S>(args: I) -> Result<UnpackOptions, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut opts = UnpackOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--envelope" => opts.envelope = true,
            "--strict" => opts.decoder.strict_tags = true,
            "--pretty" => opts.pretty = true,
            "--max-depth" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::MissingValue("--max-depth".into()))?;
                let value = value.as_ref();
                opts.decoder.max_depth = value.parse().map_err(|_| CliError::InvalidArg {
                    flag: "--max-depth".into(),
                    value: value.to_string(),
                })?;
            }
            other => return Err(CliError::UnknownArg(other.to_string())),
        }
    }
    Ok(opts)
}

/// Decodes `bytes` and returns the JSON text.
pub fn unpack(bytes: &[u8], opts: &UnpackOptions) -> Result<String, CliError> {
    let value = if opts.envelope {
        EnvelopeDecoder::with_options(opts.decoder)
            .decode_envelope(bytes)?
            .to_json()
    } else {
        TermDecoder::with_options(opts.decoder).decode(bytes)?.into()
    };
    let text = if opts.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}
