mod app;
mod capture;
mod tools;
mod ui;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gio, glib};
use log::{debug, error};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{PinState, ShortcutConfig, ToolCommands};
use crate::capture::{Capture, CaptureError};
use crate::tools::{ExternalTools, SystemTools};

const APP_ID: &str = "org.example.Pinshot";

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let tools: Rc<dyn ExternalTools> = Rc::new(SystemTools::new(ToolCommands::default()));

    // The selector and grim run before GTK starts, so no window exists yet.
    let capture = match pin_or_exit(capture::capture_selection(tools.as_ref())) {
        Ok(capture) => capture,
        Err(code) => return code,
    };

    debug!("Pinning region {}", capture.geometry);
    let state = Rc::new(RefCell::new(PinState::new(capture.image)));

    // Several pins may be open at once.
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        ui::build_ui(app, &state, &tools, ShortcutConfig::default());
    });

    app.run()
}

/// A capture to pin, or the exit code when there is nothing to show.
fn pin_or_exit(result: Result<Option<Capture>, CaptureError>) -> Result<Capture, glib::ExitCode> {
    match result {
        Ok(Some(capture)) => Ok(capture),
        Ok(None) => {
            println!("Selection was cancelled.");
            Err(glib::ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}", e);
            Err(glib::ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{RecordingTools, ToolCall};
    use image::RgbaImage;

    #[test]
    fn test_cancelled_selection_exits_successfully() {
        let tools = RecordingTools::new(None, Vec::new());

        let outcome = pin_or_exit(capture::capture_selection(&tools));

        assert!(matches!(outcome, Err(code) if code == glib::ExitCode::SUCCESS));
        assert_eq!(tools.calls(), vec![ToolCall::SelectRegion]);
    }

    #[test]
    fn test_capture_failure_exits_with_failure() {
        let tools = RecordingTools::new(Some("0,0 1x1"), b"not a png".to_vec());

        let outcome = pin_or_exit(capture::capture_selection(&tools));

        assert!(matches!(outcome, Err(code) if code == glib::ExitCode::FAILURE));
    }

    #[test]
    fn test_successful_capture_is_pinned() {
        let capture = Capture {
            geometry: "1,2 3x4".to_string(),
            image: RgbaImage::new(3, 4),
        };

        let pinned = pin_or_exit(Ok(Some(capture))).unwrap();

        assert_eq!(pinned.geometry, "1,2 3x4");
        assert_eq!(pinned.image.dimensions(), (3, 4));
    }
}
