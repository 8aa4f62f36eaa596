//! External tool invocation.
//!
//! Every program pinshot talks to (region selector, capture tool, clipboard
//! writer, compositor control, image editor) sits behind the
//! [`ExternalTools`] trait so the rest of the crate never builds a
//! `Command` itself.

mod system;

pub use system::SystemTools;

/// Errors raised while talking to an external program.
///
/// Exit statuses are reported through return values, not through this type.
#[derive(Debug)]
pub enum ToolError {
    SpawnFailed { program: String, source: std::io::Error },

    PipeFailed { program: String, source: std::io::Error },
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpawnFailed { program, source } => {
                write!(f, "Failed to run {}: {}", program, source)
            }
            Self::PipeFailed { program, source } => {
                write!(f, "Failed to talk to {}: {}", program, source)
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SpawnFailed { source, .. } | Self::PipeFailed { source, .. } => Some(source),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Process-execution seam used by capture and by the window actions.
pub trait ExternalTools {
    /// Lets the user draw a region. `None` means the selection was cancelled.
    fn select_region(&self) -> ToolResult<Option<String>>;

    /// Rasterises `geometry` and returns the PNG bytes.
    fn capture_region(&self, geometry: &str) -> ToolResult<Vec<u8>>;

    /// Hands PNG bytes to the clipboard and waits for the writer to exit.
    fn set_clipboard_image(&self, png: &[u8]) -> ToolResult<()>;

    /// Asks the compositor to resize the focused window to exactly `width`x`height`.
    fn resize_active_window(&self, width: i32, height: i32) -> ToolResult<()>;

    /// Asks the compositor to float the window owned by `pid` and keep it above others.
    fn pin_window(&self, pid: u32) -> ToolResult<()>;

    /// Starts the editor on PNG bytes without waiting for it.
    fn launch_editor(&self, png: &[u8]) -> ToolResult<()>;
}

#[cfg(test)]
pub mod testing {
    use super::{ExternalTools, ToolResult};
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ToolCall {
        SelectRegion,
        CaptureRegion(String),
        SetClipboardImage(Vec<u8>),
        ResizeActiveWindow(i32, i32),
        PinWindow(u32),
        LaunchEditor(Vec<u8>),
    }

    /// Fake that records every call and replays canned selector/capture output.
    pub struct RecordingTools {
        pub selection: Option<String>,
        pub capture: Vec<u8>,
        pub calls: RefCell<Vec<ToolCall>>,
    }

    impl RecordingTools {
        pub fn new(selection: Option<&str>, capture: Vec<u8>) -> Self {
            Self {
                selection: selection.map(str::to_string),
                capture,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<ToolCall> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: ToolCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl ExternalTools for RecordingTools {
        fn select_region(&self) -> ToolResult<Option<String>> {
            self.record(ToolCall::SelectRegion);
            Ok(self.selection.clone())
        }

        fn capture_region(&self, geometry: &str) -> ToolResult<Vec<u8>> {
            self.record(ToolCall::CaptureRegion(geometry.to_string()));
            Ok(self.capture.clone())
        }

        fn set_clipboard_image(&self, png: &[u8]) -> ToolResult<()> {
            self.record(ToolCall::SetClipboardImage(png.to_vec()));
            Ok(())
        }

        fn resize_active_window(&self, width: i32, height: i32) -> ToolResult<()> {
            self.record(ToolCall::ResizeActiveWindow(width, height));
            Ok(())
        }

        fn pin_window(&self, pid: u32) -> ToolResult<()> {
            self.record(ToolCall::PinWindow(pid));
            Ok(())
        }

        fn launch_editor(&self, png: &[u8]) -> ToolResult<()> {
            self.record(ToolCall::LaunchEditor(png.to_vec()));
            Ok(())
        }
    }
}
