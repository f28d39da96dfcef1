//! QR code generation from tokens.

use image::{DynamicImage, Luma};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    /// QR rendering failed (data too large or backend error).
    #[error("QR rendering failed: {0}")]
    Render(String),

    /// No decodable QR code found in a still image.
    #[error("No QR code found in image")]
    CodeNotFound,

    /// Image could not be loaded or decoded.
    #[error("QR read error: {0}")]
    Read(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format for QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrFormat {
    /// PNG image (default)
    #[default]
    Png,
    /// SVG vector image
    Svg,
    /// ASCII art (for terminal display)
    Ascii,
}

/// Configuration for QR code generation.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Error correction level (default: Medium)
    pub ec_level: EcLevel,
    /// Module size in pixels (default: 10)
    pub module_size: u32,
    /// Quiet zone size in modules (default: 4)
    pub quiet_zone: u32,
    /// Output format
    pub format: QrFormat,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            module_size: 10,
            quiet_zone: 4,
            format: QrFormat::Png,
        }
    }
}

/// Output from QR code generation.
pub enum QrOutput {
    /// PNG/image output
    Image(DynamicImage),
    /// SVG string output
    Svg(String),
    /// ASCII art output
    Ascii(String),
}

impl QrOutput {
    /// Returns true if this is an image output.
    pub fn is_image(&self) -> bool {
        matches!(self, QrOutput::Image(_))
    }

    /// Returns the image if this is an image output.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            QrOutput::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Returns the string content (for SVG or ASCII).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            QrOutput::Svg(s) | QrOutput::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders a token into a scannable QR code.
///
/// Deterministic for a given token and config. The only failure mode is a
/// rendering resource error, surfaced as [`QrError::Render`].
pub fn render_optical_code(token: &str, config: &QrConfig) -> Result<QrOutput, QrError> {
    let qr = QrCode::with_error_correction_level(token, config.ec_level)
        .map_err(|e| QrError::Render(e.to_string()))?;

    match config.format {
        QrFormat::Png => {
            let image = qr
                .render::<Luma<u8>>()
                .min_dimensions(100, 100)
                .quiet_zone(config.quiet_zone > 0)
                .module_dimensions(config.module_size, config.module_size)
                .build();

            Ok(QrOutput::Image(DynamicImage::ImageLuma8(image)))
        }
        QrFormat::Svg => {
            let svg_string = qr
                .render()
                .min_dimensions(200, 200)
                .quiet_zone(config.quiet_zone > 0)
                .dark_color(svg::Color("#000000"))
                .light_color(svg::Color("#ffffff"))
                .build();

            Ok(QrOutput::Svg(svg_string))
        }
        QrFormat::Ascii => {
            let ascii = qr
                .render::<char>()
                .quiet_zone(config.quiet_zone > 0)
                .module_dimensions(2, 1)
                .build();

            Ok(QrOutput::Ascii(ascii))
        }
    }
}

/// Renders a token into a QR code and saves it to a file.
pub fn render_optical_code_to_file<P: AsRef<Path>>(
    token: &str,
    path: P,
    config: &QrConfig,
) -> Result<(), QrError> {
    let output = render_optical_code(token, config)?;
    let path = path.as_ref();

    match output {
        QrOutput::Image(img) => {
            img.save(path).map_err(|e| QrError::Render(e.to_string()))?;
        }
        QrOutput::Svg(svg) => {
            std::fs::write(path, svg)?;
        }
        QrOutput::Ascii(ascii) => {
            std::fs::write(path, ascii)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_png() {
        let output = render_optical_code("sample-token", &QrConfig::default()).unwrap();
        assert!(output.is_image());
    }

    #[test]
    fn test_render_ascii() {
        let config = QrConfig {
            format: QrFormat::Ascii,
            ..Default::default()
        };
        let output = render_optical_code("sample-token", &config).unwrap();
        assert!(output.as_string().is_some());
    }

    #[test]
    fn test_render_svg() {
        let config = QrConfig {
            format: QrFormat::Svg,
            ..Default::default()
        };
        let output = render_optical_code("sample-token", &config).unwrap();
        let svg = output.as_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = QrConfig {
            format: QrFormat::Svg,
            ..Default::default()
        };
        let a = render_optical_code("sample-token", &config).unwrap();
        let b = render_optical_code("sample-token", &config).unwrap();
        assert_eq!(a.as_string(), b.as_string());
    }

    #[test]
    fn test_render_too_large_fails() {
        // Exceeds byte-mode capacity of the largest QR version
        let huge = "A".repeat(4000);
        assert!(matches!(
            render_optical_code(&huge, &QrConfig::default()),
            Err(QrError::Render(_))
        ));
    }
}
