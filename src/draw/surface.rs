use crate::draw::model::Color;
use image::RgbaImage;

/// Owned RGBA raster, row-major with a top-left origin.
///
/// Every accessor clips against the current bounds: reads outside return
/// [`Color::TRANSPARENT`] and writes outside are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; buffer_len(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }

    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(idx) => Color::rgba(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ),
            None => Color::TRANSPARENT,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba_array());
        }
    }

    /// True when every pixel is fully transparent black.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|b| *b == 0)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reallocates to `width` x `height`, keeping the overlapping top-left
    /// region. Returns `false` when the size already matches.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }

        let mut pixels = vec![0u8; buffer_len(width, height)];
        let copy_w = self.width.min(width) as usize * 4;
        let copy_h = self.height.min(height) as usize;
        if copy_w > 0 {
            let old_stride = self.width as usize * 4;
            let new_stride = width as usize * 4;
            for row in 0..copy_h {
                let src = row * old_stride;
                let dst = row * new_stride;
                pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
            }
        }

        self.width = width;
        self.height = height;
        self.pixels = pixels;
        true
    }

    pub fn rgba_pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn to_image(&self) -> RgbaImage {
        // Lengths always agree with the dimensions, so `from_raw` cannot reject them.
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.as_raw().clone(),
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != buffer_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

#[cfg(test)]
mod tests {
    use super::PixelSurface;
    use crate::draw::model::Color;

    const RED: Color = Color::opaque(255, 0, 0);

    #[test]
    fn new_surface_is_transparent() {
        let surface = PixelSurface::new(3, 2);
        assert!(surface.rgba_pixels().iter().all(|b| *b == 0));
        assert_eq!(surface.get(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn out_of_bounds_access_is_clipped() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set(-1, 0, RED);
        surface.set(2, 0, RED);
        surface.set(0, 5, RED);
        assert!(surface.rgba_pixels().iter().all(|b| *b == 0));
        assert_eq!(surface.get(-3, -3), Color::TRANSPARENT);
        assert_eq!(surface.get(2, 1), Color::TRANSPARENT);
    }

    #[test]
    fn resize_to_same_size_keeps_content() {
        let mut surface = PixelSurface::new(4, 4);
        surface.set(3, 3, RED);
        assert!(!surface.resize(4, 4));
        assert_eq!(surface.get(3, 3), RED);
    }

    #[test]
    fn growing_keeps_top_left_and_leaves_new_area_transparent() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set(0, 0, RED);
        surface.set(1, 1, RED);

        assert!(surface.resize(4, 3));
        assert_eq!(surface.size(), (4, 3));
        assert_eq!(surface.get(0, 0), RED);
        assert_eq!(surface.get(1, 1), RED);
        assert_eq!(surface.get(1, 0), Color::TRANSPARENT);
        for y in 0..3 {
            for x in 0..4 {
                if x >= 2 || y >= 2 {
                    assert_eq!(surface.get(x, y), Color::TRANSPARENT);
                }
            }
        }
    }

    #[test]
    fn shrinking_to_zero_produces_an_empty_surface() {
        let mut surface = PixelSurface::new(5, 5);
        surface.set(1, 1, RED);
        surface.resize(0, 5);
        assert!(surface.is_empty());
        assert!(surface.rgba_pixels().is_empty());

        surface.resize(2, 2);
        assert_eq!(surface.get(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn clear_resets_every_pixel() {
        let mut surface = PixelSurface::new(3, 3);
        surface.set(0, 0, RED);
        surface.set(2, 2, RED);
        assert!(!surface.is_blank());
        surface.clear();
        assert!(surface.rgba_pixels().iter().all(|b| *b == 0));
        assert!(surface.is_blank());
    }

    #[test]
    fn image_conversion_preserves_partial_alpha() {
        let mut surface = PixelSurface::new(2, 1);
        surface.set(1, 0, Color::rgba(10, 20, 30, 128));

        let image = surface.to_image();
        assert_eq!(image.get_pixel(1, 0).0, [10, 20, 30, 128]);
        assert_eq!(PixelSurface::from_image(&image), surface);
    }

    #[test]
    fn from_pixels_rejects_mismatched_lengths() {
        assert!(PixelSurface::from_pixels(2, 2, vec![0; 15]).is_none());
        assert!(PixelSurface::from_pixels(2, 2, vec![0; 16]).is_some());
    }
}
