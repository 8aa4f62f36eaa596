use gtk4 as gtk;

use gtk::{gdk, gio};
use gtk4::prelude::*;

use crate::app::Action;

const MENU_CSS: &str = ".pin-menu { font-size: 14pt; }";

/// Context menu listing every [`Action`], bound to the `win.*` actions.
pub fn create_context_menu(parent: &gtk::Picture) -> gtk::PopoverMenu {
    let model = gio::Menu::new();
    for action in Action::ALL {
        model.append(Some(action.label()), Some(&action.detailed_name()));
    }

    let popover = gtk::PopoverMenu::builder()
        .menu_model(&model)
        .has_arrow(false)
        .halign(gtk::Align::Start)
        .build();
    popover.add_css_class("pin-menu");
    popover.set_parent(parent);

    load_menu_css(&parent.display());

    popover
}

pub fn popup_at(popover: &gtk::PopoverMenu, x: f64, y: f64) {
    let rect = gdk::Rectangle::new(x as i32, y as i32, 1, 1);
    popover.set_pointing_to(Some(&rect));
    popover.popup();
}

fn load_menu_css(display: &gdk::Display) {
    let provider = gtk::CssProvider::new();
    provider.load_from_string(MENU_CSS);
    gtk::style_context_add_provider_for_display(
        display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
