//! Page session: explicit installation of behaviours and the event pump

use crate::behaviors::{MenuToggle, SmoothScroll, SmoothScrollConfig, Splash, SplashConfig};
use crate::event::PageEvent;
use crate::event_bus::EventBus;
use crate::page::{Page, PageChange};
use crate::tracker::IntersectionTracker;
use crate::viewport::Viewport;
use tracing::debug;
use unveil_core::{ElementId, Result, RevealConfig};
use unveil_observer::RevealObserver;

/// Identifies an installed behaviour; pass it to [`PageSession::dispose`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BehaviorHandle(u32);

struct RevealBinding {
    observer: RevealObserver,
    tracker: IntersectionTracker,
}

enum Behavior {
    Reveal(RevealBinding),
    Splash(Splash),
    Menu(MenuToggle),
    Anchors(SmoothScroll),
}

/// Owns a page and its viewport, and drives installed behaviours from queued
/// events.
///
/// Nothing happens until [`pump`](Self::pump) is called: input helpers only
/// queue events, mirroring how a browser delivers callbacks asynchronously.
pub struct PageSession {
    page: Page,
    viewport: Viewport,
    bus: EventBus,
    behaviors: Vec<(BehaviorHandle, Behavior)>,
    next_handle: u32,
}

impl PageSession {
    /// Wrap a page and viewport with no behaviours installed
    pub fn new(page: Page, viewport: Viewport) -> Self {
        Self {
            page,
            viewport,
            bus: EventBus::new(),
            behaviors: Vec::new(),
            next_handle: 1,
        }
    }

    /// The page, including every change applied so far
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The current viewport and scroll position
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn insert(&mut self, behavior: Behavior) -> BehaviorHandle {
        let handle = BehaviorHandle(self.next_handle);
        self.next_handle += 1;
        self.behaviors.push((handle, behavior));
        handle
    }

    /// Watch every element matching `selector` with a new reveal observer.
    ///
    /// Fails only for an invalid config; a selector that matches nothing
    /// installs an inert observer.
    pub fn install_reveal(&mut self, selector: &str, config: RevealConfig) -> Result<BehaviorHandle> {
        let mut observer = RevealObserver::new(config)?;
        let registered = observer.register_all(self.page.query_selector_all(selector));
        debug!(selector, registered, "reveal observer installed");

        Ok(self.insert(Behavior::Reveal(RevealBinding {
            observer,
            tracker: IntersectionTracker::new(),
        })))
    }

    /// Install splash dismissal, or `None` if the page has no splash
    pub fn install_splash(&mut self, config: &SplashConfig) -> Option<BehaviorHandle> {
        let splash = Splash::attach(&self.page, config)?;
        Some(self.insert(Behavior::Splash(splash)))
    }

    /// Install the menu toggle, or `None` if either element is missing
    pub fn install_menu(&mut self, button_id: &str, menu_id: &str) -> Option<BehaviorHandle> {
        let menu = MenuToggle::attach(&self.page, button_id, menu_id)?;
        Some(self.insert(Behavior::Menu(menu)))
    }

    /// Install smooth scrolling for `#target` links. Always succeeds.
    pub fn install_anchors(&mut self, config: SmoothScrollConfig) -> BehaviorHandle {
        self.insert(Behavior::Anchors(SmoothScroll::new(config)))
    }

    /// Remove a behaviour. Returns `false` for an unknown or already disposed handle.
    pub fn dispose(&mut self, handle: BehaviorHandle) -> bool {
        let Some(index) = self.behaviors.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        let (_, behavior) = self.behaviors.remove(index);
        if let Behavior::Reveal(mut binding) = behavior {
            binding.observer.disconnect();
        }
        true
    }

    /// The observer behind a reveal handle
    pub fn observer(&self, handle: BehaviorHandle) -> Option<&RevealObserver> {
        self.behaviors.iter().find_map(|(h, behavior)| match behavior {
            Behavior::Reveal(binding) if *h == handle => Some(&binding.observer),
            _ => None,
        })
    }

    /// Number of installed, undisposed behaviours
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Queue any input event for the next pump
    pub fn push_event(&mut self, event: PageEvent) {
        self.bus.push(event);
    }

    /// Queue the page-loaded event
    pub fn load(&mut self) {
        self.push_event(PageEvent::Loaded);
    }

    /// Queue a click on `element`
    pub fn click(&mut self, element: ElementId) {
        self.push_event(PageEvent::Click(element));
    }

    /// Queue a click on the element with this DOM id. Returns `false`, queuing
    /// nothing, when there is no such element.
    pub fn click_dom_id(&mut self, dom_id: &str) -> bool {
        match self.page.element_by_dom_id(dom_id) {
            Some(element) => {
                self.click(element);
                true
            }
            None => false,
        }
    }

    /// Queue a user scroll to `y`
    pub fn scroll_to(&mut self, y: f64) {
        self.push_event(PageEvent::Scroll(y));
    }

    /// Queue a viewport resize
    pub fn resize(&mut self, width: f64, height: f64) {
        self.push_event(PageEvent::Resize { width, height });
    }

    /// Queue `dt` seconds of elapsed time
    pub fn tick(&mut self, dt: f64) {
        self.push_event(PageEvent::Tick(dt));
    }

    /// Run queued events through the behaviours, then deliver one
    /// visibility batch per reveal observer. Returns the resulting changes.
    pub fn pump(&mut self) -> Vec<PageChange> {
        for event in self.bus.drain() {
            self.dispatch(event);
        }
        self.deliver_visibility();
        self.page.take_changes()
    }

    fn dispatch(&mut self, event: PageEvent) {
        let mut scroll_target = None;

        match event {
            PageEvent::Loaded => {
                for (_, behavior) in &mut self.behaviors {
                    if let Behavior::Splash(splash) = behavior {
                        splash.on_load(&mut self.page);
                    }
                }
            }
            PageEvent::Click(target) => {
                for (_, behavior) in &mut self.behaviors {
                    match behavior {
                        Behavior::Splash(splash) => {
                            splash.on_click(target, &mut self.page);
                        }
                        Behavior::Menu(menu) => {
                            menu.on_click(target, &mut self.page);
                        }
                        Behavior::Anchors(anchors) => {
                            if let Some(y) = anchors.on_click(target, &self.page, &self.viewport) {
                                scroll_target = Some(y);
                            }
                        }
                        Behavior::Reveal(_) => {}
                    }
                }
            }
            PageEvent::Scroll(y) => {
                for (_, behavior) in &mut self.behaviors {
                    if let Behavior::Anchors(anchors) = behavior {
                        anchors.cancel();
                    }
                }
                scroll_target = Some(y);
            }
            PageEvent::Resize { width, height } => {
                let document_height = self.page.document_height();
                let before = self.viewport.scroll_y;
                if self.viewport.resize(width, height, document_height) {
                    self.page.record_scroll(before, self.viewport.scroll_y);
                }
            }
            PageEvent::Tick(dt) => {
                for (_, behavior) in &mut self.behaviors {
                    match behavior {
                        Behavior::Splash(splash) => splash.on_tick(dt, &mut self.page),
                        Behavior::Anchors(anchors) => {
                            if let Some(y) = anchors.on_tick(dt) {
                                scroll_target = Some(y);
                            }
                        }
                        Behavior::Menu(_) | Behavior::Reveal(_) => {}
                    }
                }
            }
        }

        if let Some(y) = scroll_target {
            let before = self.viewport.scroll_y;
            let after = self.viewport.scroll_to(y, self.page.document_height());
            self.page.record_scroll(before, after);
        }
    }

    fn deliver_visibility(&mut self) {
        for (_, behavior) in &mut self.behaviors {
            let Behavior::Reveal(binding) = behavior else {
                continue;
            };
            let config = binding.observer.config();
            let batch = binding.tracker.collect(
                &self.page,
                &self.viewport,
                &config.root_margin,
                config.threshold,
                binding.observer.watched(),
            );
            if !batch.is_empty() {
                binding.observer.handle_batch(&batch, &mut self.page);
            }
        }
    }
}
