//! Region capture
//!
//! Runs the region selector and the capture tool one after the other and
//! decodes the result. Nothing here touches GTK, so it runs before the
//! application is started.

use image::RgbaImage;
use log::{debug, info};

use crate::tools::{ExternalTools, ToolError};

#[derive(Debug)]
pub enum CaptureError {
    Tool(ToolError),

    DecodeFailed(image::ImageError),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tool(e) => write!(f, "Failed to capture region: {}", e),
            Self::DecodeFailed(e) => write!(f, "Failed to decode captured image: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<ToolError> for CaptureError {
    fn from(e: ToolError) -> Self {
        Self::Tool(e)
    }
}

/// A captured region, decoded and ready to display.
#[derive(Debug)]
pub struct Capture {
    pub geometry: String,
    pub image: RgbaImage,
}

/// Let the user select a region and capture it.
///
/// Returns `Ok(None)` when the selection was cancelled; the capture tool is
/// not run in that case.
pub fn capture_selection(tools: &dyn ExternalTools) -> Result<Option<Capture>, CaptureError> {
    let geometry = match tools.select_region()? {
        Some(geometry) => geometry,
        None => return Ok(None),
    };
    debug!("Selected region {:?}", geometry);

    let png = tools.capture_region(&geometry)?;
    let image = image::load_from_memory(&png)
        .map_err(CaptureError::DecodeFailed)?
        .to_rgba8();

    info!(
        "Captured {}x{} region at {}",
        image.width(),
        image.height(),
        geometry
    );

    Ok(Some(Capture { geometry, image }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{RecordingTools, ToolCall};
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_of(image: &RgbaImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_cancelled_selection_skips_capture() {
        let tools = RecordingTools::new(None, Vec::new());

        let result = capture_selection(&tools).unwrap();

        assert!(result.is_none());
        assert_eq!(tools.calls(), vec![ToolCall::SelectRegion]);
    }

    #[test]
    fn test_geometry_passed_through() {
        let image = RgbaImage::from_pixel(6, 4, Rgba([9, 8, 7, 255]));
        let tools = RecordingTools::new(Some("12,34 6x4"), png_of(&image));

        let capture = capture_selection(&tools).unwrap().unwrap();

        assert_eq!(capture.geometry, "12,34 6x4");
        assert_eq!(capture.image.dimensions(), (6, 4));
        assert_eq!(capture.image.get_pixel(5, 3), &Rgba([9, 8, 7, 255]));
        assert_eq!(
            tools.calls(),
            vec![
                ToolCall::SelectRegion,
                ToolCall::CaptureRegion("12,34 6x4".to_string()),
            ]
        );
    }

    #[test]
    fn test_garbage_capture_is_decode_error() {
        let tools = RecordingTools::new(Some("0,0 1x1"), b"not a png".to_vec());

        assert!(matches!(
            capture_selection(&tools),
            Err(CaptureError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_empty_capture_is_decode_error() {
        let tools = RecordingTools::new(Some("0,0 1x1"), Vec::new());

        assert!(matches!(
            capture_selection(&tools),
            Err(CaptureError::DecodeFailed(_))
        ));
    }
}
