//! QR code reading from video frames and still images.
//!
//! Live scanning and one-shot imports have different contracts: during a
//! live scan most frames contain no code, so a miss is a normal
//! keep-scanning signal (`Ok(None)`), never an error. A one-shot still
//! decode has no retry opportunity, so a miss there is terminal
//! ([`QrError::CodeNotFound`]).

use image::DynamicImage;
use rqrr::PreparedImage;
use std::path::Path;

use super::QrError;

/// Attempts to decode one QR code from a single video frame.
///
/// Returns `Ok(None)` when no decodable code is present, which is the
/// expected result for the vast majority of frames during a live scan.
pub fn decode_frame(frame: &DynamicImage) -> Result<Option<String>, QrError> {
    let gray = frame.to_luma8();
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    for grid in grids {
        match grid.decode() {
            Ok((_, content)) => return Ok(Some(content)),
            // A partially-visible or blurred grid; keep scanning
            Err(e) => log::trace!("frame grid detected but undecodable: {:?}", e),
        }
    }

    Ok(None)
}

/// Decodes one QR code from a still image (one-shot, for uploads).
///
/// Fails with [`QrError::CodeNotFound`] if no decodable code exists in the
/// image.
pub fn decode_still(image: &DynamicImage) -> Result<String, QrError> {
    decode_frame(image)?.ok_or(QrError::CodeNotFound)
}

/// Decodes one QR code from an image file.
pub fn decode_still_from_file<P: AsRef<Path>>(path: P) -> Result<String, QrError> {
    let image = image::open(path).map_err(|e| QrError::Read(e.to_string()))?;
    decode_still(&image)
}
