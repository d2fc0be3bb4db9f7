use image::{DynamicImage, RgbaImage};

use crate::DiffError;

/// Something that can be read as 8-bit RGBA bytes.
pub trait PixelData {
    /// Borrow the raw bytes, or fail when the data is not one byte per channel.
    fn rgba_bytes(&self) -> Result<&[u8], DiffError>;
}

impl PixelData for [u8] {
    fn rgba_bytes(&self) -> Result<&[u8], DiffError> {
        Ok(self)
    }
}

impl<const N: usize> PixelData for [u8; N] {
    fn rgba_bytes(&self) -> Result<&[u8], DiffError> {
        Ok(self)
    }
}

impl PixelData for Vec<u8> {
    fn rgba_bytes(&self) -> Result<&[u8], DiffError> {
        Ok(self)
    }
}

impl PixelData for RgbaImage {
    fn rgba_bytes(&self) -> Result<&[u8], DiffError> {
        Ok(self.as_raw())
    }
}

impl PixelData for DynamicImage {
    fn rgba_bytes(&self) -> Result<&[u8], DiffError> {
        match self {
            DynamicImage::ImageRgba8(img) => Ok(img.as_raw()),
            other => Err(DiffError::InvalidInputType(format!("{:?}", other.color()))),
        }
    }
}
