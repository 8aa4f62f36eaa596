use gtk::gdk;
use gtk4 as gtk;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Copy,
    Save,
    Edit,
    Close,
}

impl Action {
    /// Context menu order.
    pub const ALL: [Action; 4] = [Action::Copy, Action::Save, Action::Edit, Action::Close];

    pub fn label(&self) -> &str {
        match self {
            Action::Copy => "Copy to Clipboard",
            Action::Save => "Save to File",
            Action::Edit => "Edit with Swappy",
            Action::Close => "Close",
        }
    }

    /// Name of the `gio::SimpleAction` registered on the window.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Save => "save",
            Action::Edit => "edit",
            Action::Close => "close",
        }
    }

    pub fn detailed_name(&self) -> String {
        format!("win.{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: gdk::Key,
    pub modifiers: gdk::ModifierType,
}

#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    bindings: HashMap<Action, Shortcut>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            Action::Copy,
            Shortcut {
                key: gdk::Key::c,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Save,
            Shortcut {
                key: gdk::Key::s,
                modifiers: gdk::ModifierType::CONTROL_MASK,
            },
        );
        bindings.insert(
            Action::Close,
            Shortcut {
                key: gdk::Key::Escape,
                modifiers: gdk::ModifierType::empty(),
            },
        );

        Self { bindings }
    }
}

impl ShortcutConfig {
    pub fn get_action(&self, key: gdk::Key, modifiers: gdk::ModifierType) -> Option<Action> {
        // Filter out irrelevant modifiers like NumLock/CapsLock/ScrollLock
        let mask = gdk::ModifierType::CONTROL_MASK
            | gdk::ModifierType::SHIFT_MASK
            | gdk::ModifierType::ALT_MASK
            | gdk::ModifierType::SUPER_MASK
            | gdk::ModifierType::META_MASK;

        let clean_mods = modifiers & mask;

        self.bindings
            .iter()
            .find(|(_, shortcut)| shortcut.key == key && shortcut.modifiers == clean_mods)
            .map(|(action, _)| *action)
    }

    #[cfg(test)]
    pub fn shortcut(&self, action: Action) -> Option<&Shortcut> {
        self.bindings.get(&action)
    }
}

/// Program names of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommands {
    pub selector: String,
    pub capture: String,
    pub clipboard: String,
    pub editor: String,
    pub compositor: String,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            selector: "slurp".to_string(),
            capture: "grim".to_string(),
            clipboard: "wl-copy".to_string(),
            editor: "swappy".to_string(),
            compositor: "hyprctl".to_string(),
        }
    }
}
