use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

/// Encoded images longer than this many characters are downscaled.
pub const IMAGE_COMPRESS_THRESHOLD: usize = 500_000;
/// Width cap for downscaled images; height follows the aspect ratio.
pub const MAX_IMAGE_WIDTH: u32 = 800;
/// JPEG quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 70;

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Error)]
enum ImageError {
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Shrink an oversized encoded image, or return it unchanged.
///
/// Accepts a data URL or bare base64. Images at or below
/// `IMAGE_COMPRESS_THRESHOLD` are returned as-is; larger ones are scaled to at
/// most `MAX_IMAGE_WIDTH` pixels wide and re-encoded as a JPEG data URL. An
/// image that cannot be decoded is kept unchanged.
#[must_use]
pub fn compress_image(encoded: &str) -> String {
    if encoded.len() <= IMAGE_COMPRESS_THRESHOLD {
        return encoded.to_owned();
    }

    match downscale(encoded) {
        Ok(compressed) => {
            tracing::debug!(
                before = encoded.len(),
                after = compressed.len(),
                "compressed question image"
            );
            compressed
        }
        Err(e) => {
            tracing::warn!(error = %e, "image could not be decoded, keeping original");
            encoded.to_owned()
        }
    }
}

fn downscale(encoded: &str) -> Result<String, ImageError> {
    let payload = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, data)| data);
    let bytes = STANDARD.decode(payload.trim())?;
    let decoded = image::load_from_memory(&bytes)?;

    let resized = if decoded.width() > MAX_IMAGE_WIDTH {
        let height = scaled_height(decoded.width(), decoded.height());
        decoded.resize_exact(MAX_IMAGE_WIDTH, height, FilterType::Triangle)
    } else {
        decoded
    };

    let rgb = resized.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
    }

    Ok(format!("{JPEG_DATA_URL_PREFIX}{}", STANDARD.encode(&out)))
}

fn scaled_height(width: u32, height: u32) -> u32 {
    let scaled = (u64::from(height) * u64::from(MAX_IMAGE_WIDTH) + u64::from(width) / 2)
        / u64::from(width);
    u32::try_from(scaled.max(1)).unwrap_or(u32::MAX)
}

/// Noisy PNG, base64 encoded; noise does not compress, so it stays large.
#[cfg(test)]
pub(super) fn noisy_png_base64(width: u32, height: u32) -> String {
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    let mut state: u32 = 0x1234_5678;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    STANDARD.encode(bytes)
}
