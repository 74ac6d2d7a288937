use base64::{engine::general_purpose::STANDARD, Engine};
use derive_more::Display;

#[derive(Debug, Display)]
pub enum DecodeError {
    #[display(fmt = "stored content is not valid base64: {}", _0)]
    Base64(base64::DecodeError),
    #[display(fmt = "stored content is not valid utf-8: {}", _0)]
    Utf8(std::string::FromUtf8Error),
}

/// Turns note content into the form kept in the store.
/// Structural only, anyone holding the stored value can read it back.
pub fn encode_content(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}

pub fn decode_content(stored: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(stored).map_err(DecodeError::Base64)?;
    String::from_utf8(bytes).map_err(DecodeError::Utf8)
}
