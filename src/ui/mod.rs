pub mod handlers;
pub mod menu;
pub mod window;

use libadwaita as adw;

use adw::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{PinState, ShortcutConfig};
use crate::tools::ExternalTools;

/// Build and show the pin window for an already captured image.
pub fn build_ui(
    app: &adw::Application,
    state: &Rc<RefCell<PinState>>,
    tools: &Rc<dyn ExternalTools>,
    shortcuts: ShortcutConfig,
) {
    let window::WindowComponents { window, picture } =
        window::create_pin_window(app, state.borrow().image());
    let context_menu = menu::create_context_menu(&picture);

    let components = handlers::UiComponents {
        window,
        picture,
        context_menu,
    };

    handlers::connect_all_handlers(state, tools, shortcuts, &components);

    components.window.present();
}
