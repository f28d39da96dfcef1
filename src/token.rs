//! Token codec: identity record <-> encrypted printable token.
//!
//! A token is the Base64 of `nonce (12 bytes) || ciphertext`, where the
//! ciphertext is the JSON-serialized record encrypted with
//! ChaCha20-Poly1305 under a key derived (HKDF-SHA256) from a fixed shared
//! secret embedded in the artifact.
//!
//! The fixed secret makes the token a transport/integrity convenience, not
//! a confidentiality boundary: anyone holding the distributed artifact can
//! decrypt tokens. Key management and rotation are explicitly out of scope.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use sha2::Sha256;
use thiserror::Error;

use crate::record::Record;

/// Fixed shared secret embedded in the distributed artifact.
const SHARED_SECRET: &[u8] = b"your-secret-key";

/// HKDF info string for token key derivation.
const HKDF_INFO: &[u8] = b"DIDCARD-V1-TOKEN";

/// Salt for HKDF (fixed so every artifact derives the same key).
const HKDF_SALT: &[u8] = b"DIDCARD-V1-SALT";

/// Nonce size for ChaCha20Poly1305.
const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size.
const TAG_SIZE: usize = 16;

/// Errors that can occur in the token codec.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The record is missing its identifier or signing key.
    #[error("Record is incomplete: identifier and signing key are both required")]
    IncompleteRecord,

    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// The token could not be authenticated/decrypted (corrupted or
    /// foreign input).
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Decryption succeeded but the plaintext is not a JSON object with
    /// both required fields.
    #[error("Malformed token payload: {0}")]
    MalformedPayload(String),

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

/// Derives the 256-bit token key from the embedded shared secret.
fn derive_key() -> Result<[u8; 32], TokenError> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), SHARED_SECRET);
    let mut key = [0u8; 32];
    hk.expand(HKDF_INFO, &mut key)
        .map_err(|_| TokenError::KeyDerivationFailed)?;
    Ok(key)
}

/// Encodes a record into a printable token.
///
/// Fails with [`TokenError::IncompleteRecord`] if either field is empty.
/// Pure apart from nonce generation: no side effects on any store.
pub fn encode_record(record: &Record) -> Result<String, TokenError> {
    if !record.is_complete() {
        return Err(TokenError::IncompleteRecord);
    }

    let plaintext =
        serde_json::to_vec(record).map_err(|e| TokenError::Encryption(e.to_string()))?;

    let key = derive_key()?;

    // Random nonce per token
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::RngCore::fill_bytes(&mut OsRng, &mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| TokenError::Encryption(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_slice())
        .map_err(|e| TokenError::Encryption(e.to_string()))?;

    let mut data = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    data.extend_from_slice(&nonce_bytes);
    data.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(data))
}

/// Decodes a token back into a record.
///
/// Fails with [`TokenError::Decryption`] when the ciphertext cannot be
/// authenticated under the fixed secret, and [`TokenError::MalformedPayload`]
/// when decryption succeeds but the plaintext is not valid JSON or is
/// missing either required field. Field values are returned exactly as
/// stored, with no trimming or normalization. Safe to call repeatedly on
/// the same input with identical output.
pub fn decode_token(token: &str) -> Result<Record, TokenError> {
    let data = BASE64
        .decode(token)
        .map_err(|e| TokenError::Decryption(format!("invalid base64: {}", e)))?;

    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(TokenError::Decryption("ciphertext too short".to_string()));
    }

    let nonce = Nonce::from_slice(&data[..NONCE_SIZE]);
    let ciphertext = &data[NONCE_SIZE..];

    let key = derive_key()?;
    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| TokenError::Decryption(e.to_string()))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| TokenError::Decryption("authentication failed".to_string()))?;

    serde_json::from_slice(&plaintext).map_err(|e| TokenError::MalformedPayload(e.to_string()))
}
