//! 画像入力のデコード
//!
//! PNG/JPEGのみ受け付ける。リサイズ等の加工はしない。

use crate::error::{AnalyzerError, Result};
use image::{DynamicImage, ImageFormat};

/// デコード済み画像
///
/// モデルへは元のバイト列をそのままインラインデータとして送る
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl DecodedImage {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            _ => "image/jpeg",
        }
    }
}

/// バイト列を画像としてデコード
pub fn decode_image(bytes: Vec<u8>) -> Result<DecodedImage> {
    let format = image::guess_format(&bytes)
        .map_err(|e| AnalyzerError::ImageDecode(e.to_string()))?;

    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(AnalyzerError::ImageDecode(format!(
            "PNG/JPEG以外の形式です: {:?}",
            format
        )));
    }

    let image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| AnalyzerError::ImageDecode(e.to_string()))?;

    log::debug!(
        "画像デコード: {:?} {}x{} ({} bytes)",
        format,
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(DecodedImage {
        image,
        format,
        bytes,
    })
}
