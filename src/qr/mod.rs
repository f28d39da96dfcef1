//! QR rendering and reading for tokens.
//!
//! The QR payload is the token text itself, carried verbatim: scanning a
//! rendered code returns the exact string that was rendered, so a token
//! survives a render/scan cycle byte for byte.

mod generator;
mod reader;

pub use generator::{
    render_optical_code, render_optical_code_to_file, QrConfig, QrError, QrFormat, QrOutput,
};
pub use reader::{decode_frame, decode_still, decode_still_from_file};
