//! Integration tests for didcard
//!
//! The codec round-trip law, QR carriage fidelity, and the import
//! pipeline, exercised end to end the way a user would: fill in a record,
//! encode it, render the QR, scan it back, decode it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};

use didcard::store::RecordStore;
use didcard::{
    classify, decode_still, decode_token, encode_record, import, render_optical_code, FileKind,
    ImportError, ImportedFile, MemoryStore, QrConfig, Record, TokenError,
};

/// The full scenario: record -> token -> QR image -> scanned text -> record.
#[test]
fn test_encode_render_scan_decode_scenario() {
    let record = Record::new("did:example:1", "k-secret");

    let token = encode_record(&record).unwrap();
    assert!(!token.is_empty());

    let image = render_optical_code(&token, &QrConfig::default())
        .unwrap()
        .into_image()
        .unwrap();

    let scanned = decode_still(&image).unwrap();
    assert_eq!(scanned, token);

    let decoded = decode_token(&scanned).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_roundtrip_holds_for_varied_records() {
    let records = [
        Record::new("did:example:1", "k-secret"),
        Record::new("a", "b"),
        Record::new("did:web:example.com:users:alice", "ed25519:AbCdEf=="),
        Record::new("идентификатор", "ключ"),
    ];

    for record in records {
        let token = encode_record(&record).unwrap();
        assert_eq!(decode_token(&token).unwrap(), record);
    }
}

#[test]
fn test_each_encode_yields_a_fresh_token() {
    // Nonces are random, so two tokens for the same record differ while
    // both decode to it
    let record = Record::new("did:example:1", "k-secret");
    let a = encode_record(&record).unwrap();
    let b = encode_record(&record).unwrap();
    assert_ne!(a, b);
    assert_eq!(decode_token(&a).unwrap(), decode_token(&b).unwrap());
}

/// A token built under a different secret must be rejected as a
/// decryption failure, never a crash or a silent empty record.
#[test]
fn test_foreign_secret_token_is_rejected() {
    let foreign_key = [0x42u8; 32];
    let nonce_bytes = [7u8; 12];
    let cipher = ChaCha20Poly1305::new_from_slice(&foreign_key).unwrap();
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            br#"{"identifier":"did:example:1","signingKey":"k"}"#.as_slice(),
        )
        .unwrap();

    let mut data = nonce_bytes.to_vec();
    data.extend_from_slice(&ciphertext);
    let foreign_token = BASE64.encode(data);

    assert!(matches!(
        decode_token(&foreign_token),
        Err(TokenError::Decryption(_))
    ));
}

#[test]
fn test_garbage_text_is_rejected() {
    for garbage in ["", "    ", "hello world", "Zm9v", "!!!not-base64!!!"] {
        assert!(matches!(
            decode_token(garbage),
            Err(TokenError::Decryption(_))
        ));
    }
}

#[test]
fn test_import_classification_matrix() {
    let cases = [
        ("token.txt", "text/plain", FileKind::TokenText),
        ("token.txt", "application/octet-stream", FileKind::TokenText),
        ("notes", "text/plain", FileKind::TokenText),
        ("code.png", "image/png", FileKind::Image),
        ("photo.jpeg", "image/jpeg", FileKind::Image),
        ("data.bin", "application/octet-stream", FileKind::Unsupported),
        ("archive.zip", "application/zip", FileKind::Unsupported),
    ];

    for (name, declared_type, expected) in cases {
        let file = ImportedFile::new(name, declared_type, vec![]);
        assert_eq!(classify(&file), expected, "{} ({})", name, declared_type);
    }
}

/// Importing a QR image must re-render from the token actually parsed,
/// so a re-download is byte-identical to the imported token.
#[test]
fn test_import_rerender_is_byte_identical() {
    let record = Record::new("did:example:7", "k-import");
    let token = encode_record(&record).unwrap();

    let image = render_optical_code(&token, &QrConfig::default())
        .unwrap()
        .into_image()
        .unwrap();
    let mut png = std::io::Cursor::new(Vec::new());
    image.write_to(&mut png, image::ImageFormat::Png).unwrap();

    let file = ImportedFile::new("code.png", "image/png", png.into_inner());
    let mut store = MemoryStore::new();

    let outcome = import(&file, &mut store, &QrConfig::default()).unwrap();

    assert_eq!(outcome.token, token);
    assert_eq!(outcome.record, record);
    assert_eq!(store.read().unwrap(), Some(record));

    let rerendered = outcome.optical.into_image().unwrap();
    assert_eq!(decode_still(&rerendered).unwrap(), token);
}

#[test]
fn test_import_text_file_end_to_end() {
    let record = Record::new("did:example:9", "k-text");
    let token = encode_record(&record).unwrap();

    let file = ImportedFile::new("token.txt", "text/plain", format!("{}\n", token).into_bytes());
    let mut store = MemoryStore::new();

    let outcome = import(&file, &mut store, &QrConfig::default()).unwrap();

    assert_eq!(outcome.record, record);
    assert_eq!(outcome.token, token);
    assert_eq!(store.read().unwrap(), Some(record));
}

#[test]
fn test_failed_import_never_mutates_the_slot() {
    let mut store = MemoryStore::new();
    let existing = Record::new("did:example:old", "k-old");
    store.write(&existing).unwrap();

    // Unsupported kind
    let file = ImportedFile::new("data.bin", "application/octet-stream", vec![0u8; 8]);
    assert!(import(&file, &mut store, &QrConfig::default()).is_err());

    // Valid text file, invalid token
    let file = ImportedFile::new("token.txt", "text/plain", b"not-a-token".to_vec());
    assert!(matches!(
        import(&file, &mut store, &QrConfig::default()),
        Err(ImportError::Token(_))
    ));

    // The previous record survives every failed import
    assert_eq!(store.read().unwrap(), Some(existing));
}
