use gtk::glib;
use gtk4 as gtk;
use libadwaita as adw;
use log::{debug, error};

use gtk::{gio, EventControllerKey, EventControllerScroll, GestureClick};
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::app::actions;
use crate::app::{Action, PinState, ScrollDirection, ShortcutConfig};
use crate::tools::ExternalTools;
use crate::ui::menu;

const PIN_DELAY: Duration = Duration::from_millis(200);

pub struct UiComponents {
    pub window: adw::ApplicationWindow,
    pub picture: gtk::Picture,
    pub context_menu: gtk::PopoverMenu,
}

pub fn connect_window_actions(
    state: &Rc<RefCell<PinState>>,
    tools: &Rc<dyn ExternalTools>,
    components: &UiComponents,
) {
    for action in Action::ALL {
        let simple = gio::SimpleAction::new(action.name(), None);
        simple.connect_activate({
            let state = state.clone();
            let tools = tools.clone();
            let window = components.window.clone();
            move |_, _| {
                run_action(action, &state, &tools, &window);
            }
        });
        components.window.add_action(&simple);
    }
}

fn run_action(
    action: Action,
    state: &Rc<RefCell<PinState>>,
    tools: &Rc<dyn ExternalTools>,
    window: &adw::ApplicationWindow,
) {
    debug!("Action requested: {:?}", action);
    match action {
        Action::Copy => {
            if let Err(e) = actions::copy_image(&state.borrow(), tools.as_ref()) {
                error!("{}", e);
            }
        }
        Action::Save => save_with_dialog(state, window),
        Action::Edit => {
            if let Err(e) = actions::edit_image(&state.borrow(), tools.as_ref()) {
                error!("{}", e);
                return;
            }
            if let Some(app) = window.application() {
                app.quit();
            }
        }
        Action::Close => window.close(),
    }
}

fn save_with_dialog(state: &Rc<RefCell<PinState>>, window: &adw::ApplicationWindow) {
    let state = state.clone();
    let window = window.clone();
    glib::spawn_future_local(async move {
        let filter = gtk::FileFilter::new();
        filter.set_name(Some("PNG Images (*.png)"));
        filter.add_pattern("*.png");

        let filters = gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&filter);

        let dialog = gtk::FileDialog::builder()
            .title("Save File")
            .modal(true)
            .filters(&filters)
            .default_filter(&filter)
            .build();

        match dialog.save_future(Some(&window)).await {
            Ok(file) => match file.path() {
                Some(path) => {
                    if let Err(e) = actions::save_image(&state.borrow(), &path) {
                        error!("{}", e);
                    }
                }
                None => error!("Chosen file has no local path: {}", file.uri()),
            },
            Err(_) => debug!("Save cancelled"),
        }
    });
}

pub fn connect_click_handlers(components: &UiComponents) {
    let left_click = GestureClick::new();
    left_click.set_button(1);

    left_click.connect_pressed({
        let window = components.window.clone();
        move |_, n_press, _, _| {
            if n_press == 2 {
                activate(&window, Action::Copy);
                activate(&window, Action::Close);
            }
        }
    });

    let right_click = GestureClick::new();
    right_click.set_button(3);

    right_click.connect_pressed({
        let context_menu = components.context_menu.clone();
        move |_, _, x, y| {
            menu::popup_at(&context_menu, x, y);
        }
    });

    components.picture.add_controller(left_click);
    components.picture.add_controller(right_click);
}

pub fn connect_scroll_handler(
    state: &Rc<RefCell<PinState>>,
    tools: &Rc<dyn ExternalTools>,
    components: &UiComponents,
) {
    let scroll = EventControllerScroll::new(
        gtk::EventControllerScrollFlags::VERTICAL | gtk::EventControllerScrollFlags::DISCRETE,
    );

    scroll.connect_scroll({
        let state = state.clone();
        let tools = tools.clone();
        move |_, _, dy| {
            let direction = if dy < 0.0 {
                ScrollDirection::Up
            } else {
                ScrollDirection::Down
            };

            let mut s = state.borrow_mut();
            if let Err(e) = actions::scroll_resize(&mut s, direction, tools.as_ref()) {
                error!("{}", e);
            }
            glib::Propagation::Stop
        }
    });

    components.window.add_controller(scroll);
}

pub fn connect_key_handler(shortcuts: ShortcutConfig, components: &UiComponents) {
    let keys = EventControllerKey::new();

    keys.connect_key_pressed({
        let window = components.window.clone();
        move |_, key, _, modifiers| match shortcuts.get_action(key, modifiers) {
            Some(action) => {
                activate(&window, action);
                glib::Propagation::Stop
            }
            None => glib::Propagation::Proceed,
        }
    });

    components.window.add_controller(keys);
}

pub fn connect_pin_handler(tools: &Rc<dyn ExternalTools>, components: &UiComponents) {
    components.window.connect_map({
        let tools = tools.clone();
        move |_| {
            // Give the compositor time to map the new toplevel first.
            let tools = tools.clone();
            glib::timeout_add_local_once(PIN_DELAY, move || {
                if let Err(e) = tools.pin_window(std::process::id()) {
                    error!("{}", e);
                }
            });
        }
    });

    components.window.connect_destroy({
        let context_menu = components.context_menu.clone();
        move |_| context_menu.unparent()
    });
}

fn activate(window: &adw::ApplicationWindow, action: Action) {
    if let Err(e) = WidgetExt::activate_action(window, &action.detailed_name(), None) {
        error!("Failed to activate {}: {}", action.detailed_name(), e);
    }
}

pub fn connect_all_handlers(
    state: &Rc<RefCell<PinState>>,
    tools: &Rc<dyn ExternalTools>,
    shortcuts: ShortcutConfig,
    components: &UiComponents,
) {
    debug!("Initializing UI handlers");
    connect_window_actions(state, tools, components);
    connect_click_handlers(components);
    connect_scroll_handler(state, tools, components);
    connect_key_handler(shortcuts, components);
    connect_pin_handler(tools, components);
}
