//! Intersection tracking: turns geometry into visibility-change batches

use crate::page::Page;
use crate::viewport::Viewport;
use std::collections::{HashMap, HashSet};
use tracing::trace;
use unveil_core::{ElementId, Rect, RootMargin};
use unveil_observer::VisibilityEvent;

/// Measure how much of `element` lies inside `root`.
///
/// Returns `None` when the page has no such element. Hidden elements never
/// intersect. A zero-area element counts as fully visible when it touches the
/// root.
pub fn measure(page: &Page, root: &Rect, element: ElementId) -> Option<VisibilityEvent> {
    let el = page.get(element)?;
    if el.hidden {
        return Some(VisibilityEvent::new(element, 0.0, false));
    }

    let event = match el.rect.intersection(root) {
        Some(overlap) => {
            let area = el.rect.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            VisibilityEvent::new(element, ratio, true)
        }
        None => VisibilityEvent::new(element, 0.0, false),
    };
    Some(event)
}

/// What was last delivered for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Delivered {
    is_intersecting: bool,
    above_threshold: bool,
}

/// Per-observer delivery state.
///
/// The first measurement of a target is always delivered; after that an entry
/// is delivered only when the target crosses the threshold or starts/stops
/// intersecting.
#[derive(Debug, Default)]
pub struct IntersectionTracker {
    last: HashMap<ElementId, Delivered>,
}

impl IntersectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the next batch for `targets`, forgetting anything not in it
    pub fn collect<I>(
        &mut self,
        page: &Page,
        viewport: &Viewport,
        margin: &RootMargin,
        threshold: f64,
        targets: I,
    ) -> Vec<VisibilityEvent>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let root = viewport.rect().expand(margin);
        let mut seen = HashSet::new();
        let mut batch = Vec::new();

        for target in targets {
            let Some(event) = measure(page, &root, target) else {
                continue;
            };
            seen.insert(target);

            let state = Delivered {
                is_intersecting: event.is_intersecting,
                above_threshold: event.is_intersecting && event.ratio >= threshold,
            };
            if self.last.insert(target, state) != Some(state) {
                trace!(element = %target, ratio = event.ratio, "visibility changed");
                batch.push(event);
            }
        }

        self.last.retain(|id, _| seen.contains(id));
        batch
    }

    /// Number of targets with recorded state
    pub fn tracked(&self) -> usize {
        self.last.len()
    }

    /// Forget every target so the next pass delivers initial entries again
    pub fn reset(&mut self) {
        self.last.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::PageElement;

    fn page_with(rects: &[Rect]) -> (Page, Vec<ElementId>) {
        let mut page = Page::new("tracker");
        let ids = rects
            .iter()
            .map(|r| page.add_element(PageElement::new(*r)).unwrap())
            .collect();
        (page, ids)
    }

    #[test]
    fn test_measure_partial() {
        let (page, ids) = page_with(&[Rect::new(0.0, 500.0, 800.0, 200.0)]);
        let root = Rect::new(0.0, 0.0, 800.0, 600.0);
        let event = measure(&page, &root, ids[0]).unwrap();
        assert!(event.is_intersecting);
        assert!((event.ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_measure_missing_and_hidden() {
        let (mut page, ids) = page_with(&[Rect::new(0.0, 0.0, 100.0, 100.0)]);
        let root = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(measure(&page, &root, ElementId::new()).is_none());

        page.hide(ids[0]);
        let event = measure(&page, &root, ids[0]).unwrap();
        assert!(!event.is_intersecting);
        assert_eq!(event.ratio, 0.0);
    }

    #[test]
    fn test_measure_zero_area_touching() {
        let (page, ids) = page_with(&[Rect::new(0.0, 600.0, 800.0, 0.0)]);
        let root = Rect::new(0.0, 0.0, 800.0, 600.0);
        let event = measure(&page, &root, ids[0]).unwrap();
        assert!(event.is_intersecting);
        assert_eq!(event.ratio, 1.0);
    }

    #[test]
    fn test_root_margin_excludes_bottom_strip() {
        // Only the element's top 50px is on screen, inside the excluded strip
        let (page, ids) = page_with(&[Rect::new(0.0, 550.0, 800.0, 100.0)]);
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let mut tracker = IntersectionTracker::new();

        let batch = tracker.collect(&page, &vp, &RootMargin::bottom_px(-50.0), 0.3, ids.clone());
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].ratio, 0.0);
        assert!(batch[0].is_intersecting);

        let mut plain = IntersectionTracker::new();
        let batch = plain.collect(&page, &vp, &RootMargin::ZERO, 0.3, ids);
        assert!((batch[0].ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_initial_then_only_changes() {
        let (page, ids) = page_with(&[
            Rect::new(0.0, 0.0, 800.0, 300.0),
            Rect::new(0.0, 1000.0, 800.0, 300.0),
        ]);
        let mut vp = Viewport::new(800.0, 600.0).unwrap();
        let mut tracker = IntersectionTracker::new();
        let margin = RootMargin::ZERO;

        let initial = tracker.collect(&page, &vp, &margin, 0.3, ids.clone());
        assert_eq!(initial.len(), 2);

        // Nothing moved
        assert!(tracker.collect(&page, &vp, &margin, 0.3, ids.clone()).is_empty());

        // First element leaves; second enters but stays below threshold
        vp.scroll_to(450.0, page.document_height());
        let batch = tracker.collect(&page, &vp, &margin, 0.3, ids.clone());
        assert_eq!(batch.len(), 2);
        let second = batch.iter().find(|e| e.element == ids[1]).unwrap();
        assert!(second.is_intersecting);
        assert!(second.ratio < 0.3);

        // Moving further inside the same band delivers nothing
        vp.scroll_to(460.0, page.document_height());
        assert!(tracker.collect(&page, &vp, &margin, 0.3, ids.clone()).is_empty());

        // Crossing the threshold delivers
        vp.scroll_to(700.0, page.document_height());
        let batch = tracker.collect(&page, &vp, &margin, 0.3, ids.clone());
        assert!(batch.iter().any(|e| e.element == ids[1] && e.ratio >= 0.3));
    }

    #[test]
    fn test_forgets_untracked_targets() {
        let (page, ids) = page_with(&[Rect::new(0.0, 0.0, 800.0, 300.0)]);
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let mut tracker = IntersectionTracker::new();

        tracker.collect(&page, &vp, &RootMargin::ZERO, 0.3, ids.clone());
        assert_eq!(tracker.tracked(), 1);

        tracker.collect(&page, &vp, &RootMargin::ZERO, 0.3, Vec::new());
        assert_eq!(tracker.tracked(), 0);

        // Re-observing delivers an initial entry again
        assert_eq!(tracker.collect(&page, &vp, &RootMargin::ZERO, 0.3, ids).len(), 1);
    }
}
