//! Import pipeline for uploaded or dropped files.
//!
//! Classifies a file by declared content type and name suffix, routes it
//! to the still-image QR decoder or directly to the token decrypt step,
//! and on success persists the recovered record. The outcome carries the
//! original token text actually parsed plus a fresh QR rendered from that
//! same text, so a re-download after import is byte-identical to the
//! imported token.

use std::path::Path;
use thiserror::Error;

use crate::qr::{self, QrConfig, QrError, QrOutput};
use crate::record::Record;
use crate::store::{RecordStore, StoreError};
use crate::token::{self, TokenError};

/// An uploaded file: bytes, declared content type, and name.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub name: String,
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl ImportedFile {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving the content type from its
    /// extension the way a picker would declare it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let declared_type = declared_type_for(&name).to_string();
        Ok(Self {
            name,
            declared_type,
            bytes,
        })
    }
}

fn declared_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Classification of an imported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A raster image that may contain a QR code.
    Image,
    /// A flat file holding the token text.
    TokenText,
    Unsupported,
}

/// Errors that can occur during import.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Neither an image nor a token text file.
    #[error("Unsupported file kind: {declared_type} ({name})")]
    UnsupportedFileKind { name: String, declared_type: String },

    /// A token text file that is not valid UTF-8.
    #[error("Token file is not valid UTF-8 text")]
    NotText,

    #[error("QR decode failed: {0}")]
    Qr(#[from] QrError),

    #[error("Token decode failed: {0}")]
    Token(#[from] TokenError),

    #[error("Store write failed: {0}")]
    Store(#[from] StoreError),
}

/// A successful import.
pub struct ImportOutcome {
    /// The recovered record.
    pub record: Record,
    /// The token text exactly as parsed from the file.
    pub token: String,
    /// Fresh QR rendered from that same token text, not from a
    /// re-encoding of the record.
    pub optical: QrOutput,
}

/// Classify a file by declared content type and name suffix.
pub fn classify(file: &ImportedFile) -> FileKind {
    if file.declared_type.starts_with("image/") {
        FileKind::Image
    } else if file.declared_type == "text/plain" || file.name.ends_with(".txt") {
        FileKind::TokenText
    } else {
        FileKind::Unsupported
    }
}

/// Run the full import: classify, extract the token, decode it, persist
/// the record, re-render the optical code.
///
/// All-or-nothing: the store is written only after every other step has
/// succeeded, and nothing is mutated on any failure.
pub fn import(
    file: &ImportedFile,
    store: &mut dyn RecordStore,
    qr_config: &QrConfig,
) -> Result<ImportOutcome, ImportError> {
    let token = match classify(file) {
        FileKind::Image => {
            let image = image::load_from_memory(&file.bytes)
                .map_err(|e| ImportError::Qr(QrError::Read(e.to_string())))?;
            qr::decode_still(&image)?
        }
        FileKind::TokenText => {
            let text = std::str::from_utf8(&file.bytes).map_err(|_| ImportError::NotText)?;
            text.trim().to_string()
        }
        FileKind::Unsupported => {
            return Err(ImportError::UnsupportedFileKind {
                name: file.name.clone(),
                declared_type: file.declared_type.clone(),
            });
        }
    };

    let record = token::decode_token(&token)?;
    let optical = qr::render_optical_code(&token, qr_config)?;

    store.write(&record)?;

    Ok(ImportOutcome {
        record,
        token,
        optical,
    })
}
