//! Pin state
//!
//! The captured bitmap and the scroll-driven resize step of a pinned
//! screenshot window.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Smallest scale step, i.e. 5% of the captured size.
pub const MIN_SCALE_STEP: i32 = -19;

/// Size change per scale step, relative to the captured size.
pub const SCALE_STEP_FACTOR: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// State of one pinned screenshot.
pub struct PinState {
    /// The bitmap currently displayed
    image: RgbaImage,
    /// Captured width, never changes
    base_width: u32,
    /// Captured height, never changes
    base_height: u32,
    /// Scroll steps away from the captured size
    scale_step: i32,
}

impl PinState {
    pub fn new(image: RgbaImage) -> Self {
        let (base_width, base_height) = image.dimensions();
        Self {
            image,
            base_width,
            base_height,
            scale_step: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[cfg(test)]
    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    #[cfg(test)]
    pub fn base_size(&self) -> (u32, u32) {
        (self.base_width, self.base_height)
    }

    pub fn scale_step(&self) -> i32 {
        self.scale_step
    }

    /// Apply one scroll notch. Scrolling down stops at [`MIN_SCALE_STEP`].
    pub fn scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => self.scale_step += 1,
            ScrollDirection::Down => {
                if self.scale_step > MIN_SCALE_STEP {
                    self.scale_step -= 1;
                }
            }
        }
    }

    /// Window size for the current step, always derived from the captured size.
    pub fn target_size(&self) -> (i32, i32) {
        let factor = 1.0 + self.scale_step as f64 * SCALE_STEP_FACTOR;
        let width = (self.base_width as f64 * factor) as i32;
        let height = (self.base_height as f64 * factor) as i32;
        (width, height)
    }

    /// PNG encoding of the displayed bitmap.
    pub fn png_bytes(&self) -> image::ImageResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}
