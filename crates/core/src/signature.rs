//! Drawn-signature payloads.
//!
//! Signature pads submit a `data:image/png;base64,...` URI of the whole
//! canvas. A signature counts as present only when the URI decodes to a PNG
//! with at least one inked pixel; an untouched canvas is blank.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;

use crate::error::CoreError;
use crate::hashing::sha256_hex;

/// Required prefix of a signature data URI.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Upper bound on the decoded PNG size.
pub const MAX_SIGNATURE_BYTES: usize = 512 * 1024;

/// Upper bound on either canvas dimension.
pub const MAX_SIGNATURE_DIMENSION: u32 = 4096;

/// Channel value above which a fully opaque pixel is treated as paper, not ink.
const PAPER_THRESHOLD: u8 = 240;

/// A decoded, non-blank signature image.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

/// Decode a PNG data URI and confirm it contains ink.
pub fn decode_signature(data_uri: &str) -> Result<SignatureImage, CoreError> {
    let encoded = data_uri
        .trim()
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| CoreError::Validation("Signature must be a PNG data URI".into()))?;

    let png = STANDARD
        .decode(encoded)
        .map_err(|_| CoreError::Validation("Signature is not valid base64".into()))?;

    if png.len() > MAX_SIGNATURE_BYTES {
        return Err(CoreError::Validation(format!(
            "Signature image exceeds {MAX_SIGNATURE_BYTES} bytes"
        )));
    }

    let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
        .map_err(|_| CoreError::Validation("Signature is not a readable PNG".into()))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 || width > MAX_SIGNATURE_DIMENSION || height > MAX_SIGNATURE_DIMENSION {
        return Err(CoreError::Validation(format!(
            "Signature dimensions {width}x{height} are out of range"
        )));
    }

    let inked = decoded.to_rgba8().pixels().any(|p| {
        let [r, g, b, a] = p.0;
        a > 0 && !(r > PAPER_THRESHOLD && g > PAPER_THRESHOLD && b > PAPER_THRESHOLD)
    });
    if !inked {
        return Err(CoreError::Validation("Signature is blank".into()));
    }

    let sha256 = sha256_hex(&png);
    Ok(SignatureImage {
        png,
        width,
        height,
        sha256,
    })
}

/// Whether the payload holds a usable signature.
pub fn is_signature_present(data_uri: Option<&str>) -> bool {
    data_uri.is_some_and(|uri| decode_signature(uri).is_ok())
}

/// Encode PNG bytes as a data URI. The inverse of [`decode_signature`]'s
/// first step; used by tests and for echoing stored signatures.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

#[cfg(test)]
pub(crate) mod test_images {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::png_data_uri;

    fn encode(img: &RgbaImage) -> String {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
        png_data_uri(&buf.into_inner())
    }

    /// A 40x20 transparent canvas with a short dark stroke.
    pub fn inked() -> String {
        let mut img = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0]));
        for x in 5..30 {
            img.put_pixel(x, 10, Rgba([10, 10, 40, 255]));
        }
        encode(&img)
    }

    /// A 40x20 canvas with nothing drawn on it.
    pub fn blank_transparent() -> String {
        encode(&RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0])))
    }

    /// A 40x20 canvas filled with opaque white.
    pub fn blank_white() -> String {
        encode(&RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255])))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::test_images::*;
    use super::*;

    #[test]
    fn inked_canvas_decodes() {
        let sig = decode_signature(&inked()).unwrap();
        assert_eq!((sig.width, sig.height), (40, 20));
        assert_eq!(sig.sha256.len(), 64);
    }

    #[test]
    fn blank_canvases_are_rejected() {
        assert_matches!(
            decode_signature(&blank_transparent()),
            Err(CoreError::Validation(msg)) if msg.contains("blank")
        );
        assert!(decode_signature(&blank_white()).is_err());
    }

    #[test]
    fn wrong_prefix_and_garbage_are_rejected() {
        assert!(decode_signature("data:image/jpeg;base64,AAAA").is_err());
        assert!(decode_signature("data:image/png;base64,!!!").is_err());
        assert!(decode_signature("data:image/png;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn presence_helper() {
        assert!(is_signature_present(Some(&inked())));
        assert!(!is_signature_present(Some(&blank_transparent())));
        assert!(!is_signature_present(None));
    }
}
