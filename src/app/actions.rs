//! Actions a user can apply to a pinned screenshot.
//!
//! These run without any GTK objects so the window handlers stay thin.

use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::app::{PinState, ScrollDirection};
use crate::tools::{ExternalTools, ToolError};

#[derive(Debug)]
pub enum ActionError {
    EncodeFailed(image::ImageError),

    Tool(ToolError),

    WriteFailed { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EncodeFailed(e) => write!(f, "Failed to encode image as PNG: {}", e),
            Self::Tool(e) => write!(f, "{}", e),
            Self::WriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EncodeFailed(e) => Some(e),
            Self::Tool(e) => Some(e),
            Self::WriteFailed { source, .. } => Some(source),
        }
    }
}

impl From<image::ImageError> for ActionError {
    fn from(e: image::ImageError) -> Self {
        Self::EncodeFailed(e)
    }
}

impl From<ToolError> for ActionError {
    fn from(e: ToolError) -> Self {
        Self::Tool(e)
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Copy the displayed image to the clipboard.
pub fn copy_image(state: &PinState, tools: &dyn ExternalTools) -> ActionResult<()> {
    let png = state.png_bytes()?;
    tools.set_clipboard_image(&png)?;
    info!("Image copied to clipboard ({} bytes)", png.len());
    Ok(())
}

/// Write the displayed image to `path`, adding a `.png` suffix if needed.
///
/// Returns the path actually written.
pub fn save_image(state: &PinState, path: &Path) -> ActionResult<PathBuf> {
    let path = with_png_extension(path);
    let png = state.png_bytes()?;

    std::fs::write(&path, png).map_err(|source| ActionError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    info!("Image saved to {:?}", path);
    Ok(path)
}

/// Hand the displayed image to the editor. The caller quits afterwards.
pub fn edit_image(state: &PinState, tools: &dyn ExternalTools) -> ActionResult<()> {
    let png = state.png_bytes()?;
    tools.launch_editor(&png)?;
    info!("Image handed to editor");
    Ok(())
}

/// Apply a scroll notch and ask the compositor for the new window size.
///
/// The resize is issued even when the step is already clamped.
pub fn scroll_resize(
    state: &mut PinState,
    direction: ScrollDirection,
    tools: &dyn ExternalTools,
) -> ActionResult<(i32, i32)> {
    state.scroll(direction);
    let (width, height) = state.target_size();
    debug!(
        "Scale step {} -> resizing to {}x{}",
        state.scale_step(),
        width,
        height
    );
    tools.resize_active_window(width, height)?;
    Ok((width, height))
}

/// `shot` becomes `shot.png`; `shot.png` and `shot.PNG` are left alone.
pub fn with_png_extension(path: &Path) -> PathBuf {
    let has_png_suffix = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".png"))
        .unwrap_or(false);

    if has_png_suffix {
        return path.to_path_buf();
    }

    let mut raw = OsString::from(path.as_os_str());
    raw.push(".png");
    PathBuf::from(raw)
}
