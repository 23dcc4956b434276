//! Page element handles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Handle to one element of a page.
///
/// A page hands one out per element it creates. Handles are process-unique,
/// so a handle kept after its element is gone matches nothing and every page
/// operation on it is a no-op. The DOM `id` attribute is separate and
/// optional; this handle exists for every element.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a handle no other element in this process has
    pub fn new() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuild a handle from a number previously taken with [`raw`](Self::raw)
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The numeric value, as serialised
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

// Shown bare so labels like `.slide[7]` stay short
impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
