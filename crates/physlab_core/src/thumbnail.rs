//! Catalog thumbnails
//!
//! Images are decoded once when the catalog is built, scaled to fit a square
//! box and given rounded corners through the alpha channel, so the UI only
//! has to upload RGBA bytes.

use std::fmt;
use std::path::Path;

/// Error loading a thumbnail image
#[derive(Debug)]
pub enum ThumbnailError {
    /// The file could not be read or decoded
    Decode(image::ImageError),
}

impl fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailError::Decode(e) => write!(f, "Failed to decode thumbnail: {}", e),
        }
    }
}

impl std::error::Error for ThumbnailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThumbnailError::Decode(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ThumbnailError {
    fn from(e: image::ImageError) -> Self {
        ThumbnailError::Decode(e)
    }
}

/// Decoded, resized RGBA thumbnail
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Thumbnail {
    /// Load an image, fit it inside `max_edge`² and round its corners
    pub fn load(path: &Path, max_edge: u32, corner_radius: u32) -> Result<Self, ThumbnailError> {
        let image = image::open(path)?;
        let rgba = image.thumbnail(max_edge, max_edge).into_rgba8();
        let (width, height) = rgba.dimensions();
        let thumbnail = Self {
            width,
            height,
            rgba: rgba.into_raw(),
        };
        Ok(thumbnail.rounded(corner_radius))
    }

    /// Wrap raw RGBA bytes; `None` if the length does not match the size
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as `[width, height]`, the shape egui's `ColorImage` expects
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Fade the four corners out with an anti-aliased quarter circle
    ///
    /// The radius is clamped to half the shorter side.
    pub fn rounded(mut self, radius: u32) -> Self {
        let r = radius.min(self.width / 2).min(self.height / 2) as f32;
        if r <= 0.0 {
            return self;
        }

        let w = self.width as f32;
        let h = self.height as f32;
        for y in 0..self.height {
            for x in 0..self.width {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Nearest corner circle centre, if this pixel is in a corner box
                let cx = if px < r {
                    r
                } else if px > w - r {
                    w - r
                } else {
                    continue;
                };
                let cy = if py < r {
                    r
                } else if py > h - r {
                    h - r
                } else {
                    continue;
                };

                let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (r - distance + 0.5).clamp(0.0, 1.0);
                let alpha = &mut self.rgba[(y * self.width + x) as usize * 4 + 3];
                *alpha = (*alpha as f32 * coverage).round() as u8;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32) -> Thumbnail {
        Thumbnail::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap()
    }

    fn alpha_at(t: &Thumbnail, x: u32, y: u32) -> u8 {
        t.rgba()[(y * t.width() + x) as usize * 4 + 3]
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Thumbnail::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Thumbnail::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_rounded_corners() {
        let t = opaque(20, 20).rounded(5);
        assert_eq!(alpha_at(&t, 0, 0), 0);
        assert_eq!(alpha_at(&t, 19, 0), 0);
        assert_eq!(alpha_at(&t, 0, 19), 0);
        assert_eq!(alpha_at(&t, 19, 19), 0);
        // Edges and centre untouched
        assert_eq!(alpha_at(&t, 10, 0), 255);
        assert_eq!(alpha_at(&t, 0, 10), 255);
        assert_eq!(alpha_at(&t, 10, 10), 255);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let t = opaque(8, 8);
        assert_eq!(t.clone().rounded(0), t);
    }

    #[test]
    fn test_colour_channels_untouched() {
        let t = opaque(10, 10).rounded(4);
        assert_eq!(&t.rgba()[0..3], &[255, 255, 255]);
    }

    #[test]
    fn test_load_fits_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::from_pixel(200, 100, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let t = Thumbnail::load(&path, 96, 0).unwrap();
        assert_eq!(t.width(), 96);
        assert_eq!(t.height(), 48);
        assert_eq!(t.size(), [96, 48]);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(Thumbnail::load(&path, 96, 12).is_err());
    }
}
