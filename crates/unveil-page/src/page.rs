//! Page document: element storage, selection and mutation

use crate::element::PageElement;
use crate::selector::Selector;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use unveil_core::{ElementId, Result, UnveilError};
use unveil_observer::RevealHost;

/// One visual mutation applied to the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageChange {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    Hidden { element: ElementId },
    Shown { element: ElementId },
    Scrolled { from: f64, to: f64 },
}

/// An ordered set of elements plus a log of the changes made to them.
///
/// Every mutator is a no-op for handles the page does not know.
#[derive(Debug, Default)]
pub struct Page {
    pub title: String,
    elements: Vec<PageElement>,
    index: HashMap<ElementId, usize>,
    changes: Vec<PageChange>,
}

impl Page {
    /// Create an empty page
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append an element in document order
    pub fn add_element(&mut self, element: PageElement) -> Result<ElementId> {
        if let Some(dom_id) = &element.dom_id {
            if self.element_by_dom_id(dom_id).is_some() {
                return Err(UnveilError::DuplicateElementId(dom_id.clone()));
            }
        }

        let handle = element.handle;
        self.index.insert(handle, self.elements.len());
        self.elements.push(element);
        Ok(handle)
    }

    /// Look up an element by handle
    pub fn get(&self, id: ElementId) -> Option<&PageElement> {
        self.index.get(&id).map(|&i| &self.elements[i])
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut PageElement> {
        match self.index.get(&id) {
            Some(&i) => self.elements.get_mut(i),
            None => None,
        }
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &PageElement> {
        self.elements.iter()
    }

    /// Number of elements on the page
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Handle of the element whose DOM `id` is `dom_id`
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.dom_id.as_deref() == Some(dom_id))
            .map(|e| e.handle)
    }

    /// All elements matching `selector`, in document order.
    ///
    /// An unsupported selector matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector),
            Err(err) => {
                debug!(%err, "selector matches nothing");
                Vec::new()
            }
        }
    }

    /// Elements matching an already parsed selector, in document order
    pub fn select(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| selector.matches(e))
            .map(|e| e.handle)
            .collect()
    }

    /// Bottom edge of the lowest element
    pub fn document_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.rect.bottom())
            .fold(0.0, f64::max)
    }

    /// Whether the element carries `class`; `false` for unknown handles
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class, logging a change only if it was absent
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id) {
            if element.add_class(class) {
                self.changes.push(PageChange::ClassAdded {
                    element: id,
                    class: class.to_string(),
                });
            }
        }
    }

    /// Remove a class, logging a change only if it was present
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id) {
            if element.remove_class(class) {
                self.changes.push(PageChange::ClassRemoved {
                    element: id,
                    class: class.to_string(),
                });
            }
        }
    }

    /// Flip a class, returning whether it is present afterwards
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    /// Take an element out of intersection; the change is logged once
    pub fn hide(&mut self, id: ElementId) {
        if let Some(element) = self.get_mut(id) {
            if !element.hidden {
                element.hidden = true;
                self.changes.push(PageChange::Hidden { element: id });
            }
        }
    }

    /// Undo [`hide`](Self::hide)
    pub fn show(&mut self, id: ElementId) {
        if let Some(element) = self.get_mut(id) {
            if element.hidden {
                element.hidden = false;
                self.changes.push(PageChange::Shown { element: id });
            }
        }
    }

    pub(crate) fn record_scroll(&mut self, from: f64, to: f64) {
        if from != to {
            self.changes.push(PageChange::Scrolled { from, to });
        }
    }

    /// Drain the change log
    pub fn take_changes(&mut self) -> Vec<PageChange> {
        std::mem::take(&mut self.changes)
    }

    /// Label of an element for display, falling back to the raw handle
    pub fn label(&self, id: ElementId) -> String {
        self.get(id)
            .map(PageElement::label)
            .unwrap_or_else(|| format!("[{}]", id))
    }
}

impl RevealHost for Page {
    fn add_class(&mut self, element: ElementId, class: &str) {
        Page::add_class(self, element, class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        Page::remove_class(self, element, class);
    }
}
