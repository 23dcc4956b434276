//! Mobile menu toggle

use crate::page::Page;
use tracing::debug;
use unveil_core::ElementId;

/// Class toggled on the menu element
pub const HIDDEN_CLASS: &str = "hidden";

/// Clicking the button shows or hides the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuToggle {
    pub button: ElementId,
    pub menu: ElementId,
}

impl MenuToggle {
    /// Attach to the button and menu, or `None` if either is missing
    pub fn attach(page: &Page, button_id: &str, menu_id: &str) -> Option<Self> {
        let button = page.element_by_dom_id(button_id);
        let menu = page.element_by_dom_id(menu_id);
        match (button, menu) {
            (Some(button), Some(menu)) => Some(Self { button, menu }),
            _ => {
                debug!(button_id, menu_id, "menu toggle inert");
                None
            }
        }
    }

    /// Returns whether the click was handled
    pub fn on_click(&self, target: ElementId, page: &mut Page) -> bool {
        if target != self.button {
            return false;
        }
        page.toggle_class(self.menu, HIDDEN_CLASS);
        true
    }
}
