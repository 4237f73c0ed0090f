//! Rasterize a screen's view tree into a single image
//!
//! The plain snapshot cannot see texture surfaces, so each one is fetched
//! separately and copied over the snapshot at its own position.

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::domain::Rect;
use crate::error::{Result, ScreengrabError};
use crate::view::ViewNode;

/// A captured screen image
///
/// Owns the pixel buffer until it is encoded; dropping it releases the buffer.
#[derive(Clone, Debug)]
pub struct Raster {
    image: RgbaImage,
    composited: usize,
}

impl Raster {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Number of texture surfaces copied onto the snapshot
    pub fn composited(&self) -> usize {
        self.composited
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Snapshot `root` and composite every texture surface found beneath it
pub fn rasterize(root: &ViewNode) -> Result<Raster> {
    let mut image = snapshot(root).map_err(ScreengrabError::capture)?;

    let surfaces = root.texture_surfaces();
    let mut composited = 0;
    for surface in &surfaces {
        let (Some(source), Some(dims)) = (&surface.texture, surface.bounds.dimensions()) else {
            log::debug!("Skipping empty texture surface at {:?}", surface.bounds);
            continue;
        };
        let pixels = source
            .read_pixels(dims.width(), dims.height())
            .with_context(|| format!("reading texture surface at {:?}", surface.bounds))
            .map_err(ScreengrabError::capture)?;
        if pixels.dimensions() != (dims.width(), dims.height()) {
            return Err(ScreengrabError::capture(anyhow::anyhow!(
                "texture surface at {:?} returned {}x{} pixels, expected {}x{}",
                surface.bounds,
                pixels.width(),
                pixels.height(),
                dims.width(),
                dims.height()
            )));
        }
        let x = i64::from(surface.bounds.left) - i64::from(root.bounds.left);
        let y = i64::from(surface.bounds.top) - i64::from(root.bounds.top);
        image::imageops::replace(&mut image, &pixels, x, y);
        composited += 1;
    }

    log::debug!(
        "Rasterized {}x{} screen with {} texture surface(s)",
        image.width(),
        image.height(),
        composited
    );
    Ok(Raster { image, composited })
}

/// Draw the subtree into an image sized to the root's bounds
///
/// Texture surfaces are left undrawn; their children are still drawn.
pub fn snapshot(root: &ViewNode) -> anyhow::Result<RgbaImage> {
    let dims = root
        .bounds
        .dimensions()
        .with_context(|| format!("root view has empty bounds {:?}", root.bounds))?;
    let mut image = RgbaImage::new(dims.width(), dims.height());
    let canvas = Rect::from_origin_size(0, 0, dims.width(), dims.height());

    for node in root.visible_nodes() {
        if node.is_texture_surface() {
            continue;
        }
        let local = node
            .bounds
            .translate(root.bounds.left.saturating_neg(), root.bounds.top.saturating_neg());

        if let Some(color) = node.background {
            fill(&mut image, canvas, local, color);
        }

        if let (Some(content), Some(dims)) = (&node.content, local.dimensions()) {
            let width = content.width().min(dims.width());
            let height = content.height().min(dims.height());
            let clipped = image::imageops::crop_imm(content, 0, 0, width, height).to_image();
            image::imageops::overlay(
                &mut image,
                &clipped,
                i64::from(local.left),
                i64::from(local.top),
            );
        }
    }

    Ok(image)
}

fn fill(image: &mut RgbaImage, canvas: Rect, area: Rect, color: Rgba<u8>) {
    let Some(area) = canvas.intersect(area) else {
        return;
    };
    for y in area.top..area.bottom {
        for x in area.left..area.right {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{StaticTexture, TextureSource};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[derive(Debug)]
    struct CountingTexture {
        color: Rgba<u8>,
        reads: Arc<AtomicUsize>,
    }

    impl TextureSource for CountingTexture {
        fn read_pixels(&self, width: u32, height: u32) -> anyhow::Result<RgbaImage> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(RgbaImage::from_pixel(width, height, self.color))
        }
    }

    #[derive(Debug)]
    struct BrokenTexture;

    impl TextureSource for BrokenTexture {
        fn read_pixels(&self, _: u32, _: u32) -> anyhow::Result<RgbaImage> {
            anyhow::bail!("surface abandoned")
        }
    }

    fn screen() -> ViewNode {
        ViewNode::new(Rect::new(0, 0, 8, 6))
            .with_background(WHITE)
            .with_child(ViewNode::new(Rect::new(1, 1, 3, 3)).with_background(RED))
    }

    #[test]
    fn test_no_surfaces_equals_snapshot() {
        let root = screen();
        let raster = rasterize(&root).unwrap();
        assert_eq!(raster.composited(), 0);
        assert_eq!(raster.image(), &snapshot(&root).unwrap());
        assert_eq!(*raster.image().get_pixel(1, 1), RED);
        assert_eq!(*raster.image().get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_surfaces_composited_at_their_position() {
        let reads = Arc::new(AtomicUsize::new(0));
        let green = CountingTexture {
            color: GREEN,
            reads: Arc::clone(&reads),
        };
        let blue = CountingTexture {
            color: BLUE,
            reads: Arc::clone(&reads),
        };
        let root = screen()
            .with_child(ViewNode::new(Rect::new(4, 0, 6, 2)).with_texture(green))
            .with_child(ViewNode::new(Rect::new(5, 4, 8, 6)).with_texture(blue));

        let raster = rasterize(&root).unwrap();
        assert_eq!(raster.composited(), 2);
        assert_eq!(reads.load(Ordering::SeqCst), 2);

        let img = raster.image();
        assert_eq!(*img.get_pixel(4, 0), GREEN);
        assert_eq!(*img.get_pixel(5, 1), GREEN);
        assert_eq!(*img.get_pixel(6, 1), WHITE);
        assert_eq!(*img.get_pixel(5, 4), BLUE);
        assert_eq!(*img.get_pixel(7, 5), BLUE);
        assert_eq!(*img.get_pixel(4, 4), WHITE);
    }

    #[test]
    fn test_surface_invisible_to_snapshot() {
        let root = ViewNode::new(Rect::new(0, 0, 4, 4)).with_child(
            ViewNode::new(Rect::new(0, 0, 2, 2))
                .with_background(RED)
                .with_texture(StaticTexture::new(RgbaImage::from_pixel(2, 2, BLUE))),
        );
        assert_eq!(*snapshot(&root).unwrap().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*rasterize(&root).unwrap().image().get_pixel(0, 0), BLUE);
    }

    #[test]
    fn test_offset_root_uses_relative_coordinates() {
        let root = ViewNode::new(Rect::new(100, 50, 104, 54)).with_child(
            ViewNode::new(Rect::new(102, 52, 104, 54))
                .with_texture(StaticTexture::new(RgbaImage::from_pixel(2, 2, GREEN))),
        );
        let raster = rasterize(&root).unwrap();
        assert_eq!(raster.image().dimensions(), (4, 4));
        assert_eq!(*raster.image().get_pixel(2, 2), GREEN);
        assert_eq!(*raster.image().get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_content_clipped_to_bounds() {
        let root = ViewNode::new(Rect::new(0, 0, 4, 4)).with_child(
            ViewNode::new(Rect::new(1, 1, 2, 2)).with_content(RgbaImage::from_pixel(3, 3, RED)),
        );
        let img = snapshot(&root).unwrap();
        assert_eq!(*img.get_pixel(1, 1), RED);
        assert_eq!(*img.get_pixel(2, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_rerun_is_identical() {
        let root = screen().with_child(
            ViewNode::new(Rect::new(4, 0, 6, 2))
                .with_texture(StaticTexture::new(RgbaImage::from_pixel(2, 2, GREEN))),
        );
        let first = rasterize(&root).unwrap();
        let second = rasterize(&root).unwrap();
        assert_eq!(first.image(), second.image());
    }

    #[test]
    fn test_texture_failure_is_capture_failure() {
        let root = screen().with_child(ViewNode::new(Rect::new(0, 0, 2, 2)).with_texture(BrokenTexture));
        match rasterize(&root) {
            Err(ScreengrabError::CaptureFailed(err)) => {
                assert_eq!(err.root_cause().to_string(), "surface abandoned");
            }
            other => panic!("expected CaptureFailed, got {other:?}"),
        }
    }

    #[derive(Debug)]
    struct OversizedTexture;

    impl TextureSource for OversizedTexture {
        fn read_pixels(&self, width: u32, height: u32) -> anyhow::Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(width + 2, height + 2, BLUE))
        }
    }

    #[test]
    fn test_wrong_sized_texture_is_rejected() {
        let root = screen().with_child(ViewNode::new(Rect::new(0, 0, 2, 2)).with_texture(OversizedTexture));
        match rasterize(&root) {
            Err(ScreengrabError::CaptureFailed(err)) => {
                assert!(err.to_string().contains("returned 4x4 pixels, expected 2x2"));
            }
            other => panic!("expected CaptureFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_root_fails() {
        assert!(snapshot(&ViewNode::new(Rect::default())).is_err());
    }
}
