//! # didcard - Portable encrypted identity records
//!
//! didcard turns a small identity record (an identifier plus its signing
//! key) into an encrypted, printable token carried as a QR code or a flat
//! text file, and recovers the record again by scanning a live camera
//! stream, decoding an uploaded image, or decoding the raw token text.
//!
//! ## Overview
//!
//! - The record is JSON-serialized and encrypted (ChaCha20-Poly1305 under
//!   a key derived from a fixed embedded secret) into a Base64 **token**
//! - The token is rendered as a **QR code** whose payload is the token
//!   text verbatim, so a scan returns byte-identical text
//! - A **capture session** negotiates a camera through a fallback ladder
//!   of facing descriptors, decodes frames until the first match or
//!   cancellation, and releases the device on every exit path
//! - An **import pipeline** classifies uploaded files (QR image vs token
//!   text) and routes them back through the codec
//! - The last successful record lives in a single persisted **slot**
//!
//! The fixed secret makes tokens tamper-evident and transport-safe, not
//! confidential: this is a data-integrity convenience, not a security
//! boundary.
//!
//! ## Example
//!
//! ```rust
//! use didcard::{decode_token, encode_record, Record};
//!
//! let record = Record::new("did:example:1", "k-secret");
//! let token = encode_record(&record).unwrap();
//! assert_eq!(decode_token(&token).unwrap(), record);
//! ```
//!
//! ## Modules
//!
//! - [`record`]: the identity record data model
//! - [`token`]: record <-> encrypted token codec
//! - [`qr`]: QR rendering and reading
//! - [`capture`]: live camera capture session
//! - [`import`]: uploaded-file import pipeline
//! - [`store`]: persisted record slot

pub mod capture;
pub mod import;
pub mod qr;
pub mod record;
pub mod store;
pub mod token;

// Re-export commonly used types at the crate root
pub use capture::{
    AcquireError, CameraProvider, CameraStream, CaptureError, CaptureOutcome, CaptureSession,
    FacingDescriptor, FacingPreference, Frame, ReportedFacing, SessionState, SessionStopper,
};
pub use import::{classify, import, FileKind, ImportError, ImportOutcome, ImportedFile};
pub use qr::{
    decode_frame, decode_still, decode_still_from_file, render_optical_code,
    render_optical_code_to_file, QrConfig, QrError, QrFormat, QrOutput,
};
pub use record::Record;
pub use store::{FileRecordStore, MemoryStore, RecordStore, StoreError};
pub use token::{decode_token, encode_record, TokenError};
