//! Application module
//!
//! This module contains the pin state, its configuration and the actions
//! that can be applied to it.

pub mod actions;
pub mod config;
mod state;

pub use config::{Action, ShortcutConfig, ToolCommands};
pub use state::{PinState, ScrollDirection};
