//! Texture-backed surfaces whose pixels the view snapshot cannot see

use std::fmt;

use image::RgbaImage;

/// Source of pixels for a texture surface
///
/// Implementations fetch the current content of a GPU-backed surface at the
/// requested size.
pub trait TextureSource: fmt::Debug + Send + Sync {
    fn read_pixels(&self, width: u32, height: u32) -> anyhow::Result<RgbaImage>;
}

/// A texture surface showing a fixed image
#[derive(Clone, Debug)]
pub struct StaticTexture {
    pub image: RgbaImage,
}

impl StaticTexture {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl TextureSource for StaticTexture {
    fn read_pixels(&self, width: u32, height: u32) -> anyhow::Result<RgbaImage> {
        if self.image.dimensions() == (width, height) {
            return Ok(self.image.clone());
        }
        Ok(image::imageops::resize(
            &self.image,
            width,
            height,
            image::imageops::FilterType::Nearest,
        ))
    }
}
