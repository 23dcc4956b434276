//! Page element data

use unveil_core::{ElementId, Rect};

/// A single element of a page
#[derive(Debug, Clone, PartialEq)]
pub struct PageElement {
    pub handle: ElementId,
    /// DOM-style `id` attribute
    pub dom_id: Option<String>,
    /// Class list in insertion order, without duplicates
    pub classes: Vec<String>,
    /// Position in document space
    pub rect: Rect,
    /// `display: none`
    pub hidden: bool,
    /// Anchor target such as `#about`
    pub href: Option<String>,
}

impl PageElement {
    /// New element with a fresh handle and no attributes
    pub fn new(rect: Rect) -> Self {
        Self {
            handle: ElementId::new(),
            dom_id: None,
            classes: Vec::new(),
            rect,
            hidden: false,
            href: None,
        }
    }

    pub fn with_dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Whether the class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class, returning `false` if it was already present
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class, returning `false` if it was not present
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Anchor target id if `href` is an in-page fragment
    pub fn anchor_target(&self) -> Option<&str> {
        self.href
            .as_deref()
            .and_then(|href| href.strip_prefix('#'))
            .filter(|target| !target.is_empty())
    }

    /// Human-readable label: `#dom-id` when present, else the handle
    pub fn label(&self) -> String {
        match &self.dom_id {
            Some(id) => format!("#{}", id),
            None => match self.classes.first() {
                Some(class) => format!(".{}[{}]", class, self.handle),
                None => format!("[{}]", self.handle),
            },
        }
    }
}
