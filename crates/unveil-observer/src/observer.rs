//! Reveal-on-scroll observer

use crate::event::VisibilityEvent;
use crate::host::RevealHost;
use std::collections::BTreeSet;
use tracing::{debug, trace};
use unveil_core::{ElementId, Result, RevealConfig};

/// Watch status of a registered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Watching,
    /// Terminal: the reveal effect has been applied
    Revealed,
}

/// Reveals elements the first time they are reported visible enough.
///
/// The transition `Watching → Revealed` happens at most once per element and
/// never reverses. With `once` set (the default) a revealed element leaves the
/// watched set immediately; otherwise it stays subscribed but is not revealed
/// again.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    config: RevealConfig,
    subscribed: BTreeSet<ElementId>,
    revealed: BTreeSet<ElementId>,
    disconnected: bool,
}

impl RevealObserver {
    /// Create an observer with a validated config
    pub fn new(config: RevealConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            subscribed: BTreeSet::new(),
            revealed: BTreeSet::new(),
            disconnected: false,
        })
    }

    /// The config this observer was created with
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Begin watching `element`.
    ///
    /// Returns `false` without doing anything when the element is absent,
    /// already watched, already revealed, or the observer is disconnected.
    pub fn register(&mut self, element: Option<ElementId>) -> bool {
        let Some(element) = element else {
            return false;
        };
        if self.disconnected || self.revealed.contains(&element) {
            return false;
        }

        let added = self.subscribed.insert(element);
        if added {
            trace!(%element, "watching element");
        }
        added
    }

    /// Register every element of a selection, returning how many were added
    pub fn register_all<I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = ElementId>,
    {
        elements
            .into_iter()
            .filter(|element| self.register(Some(*element)))
            .count()
    }

    /// Stop watching `element` without revealing it
    pub fn unregister(&mut self, element: ElementId) -> bool {
        self.subscribed.remove(&element)
    }

    /// Stop watching everything. Later registrations and batches are ignored.
    pub fn disconnect(&mut self) {
        if !self.disconnected {
            debug!(
                watched = self.subscribed.len(),
                revealed = self.revealed.len(),
                "observer disconnected"
            );
        }
        self.subscribed.clear();
        self.disconnected = true;
    }

    /// Whether [`disconnect`](Self::disconnect) has been called
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Status of an element, `None` if it was never registered (or was
    /// unregistered before revealing)
    pub fn status(&self, element: ElementId) -> Option<WatchStatus> {
        if self.revealed.contains(&element) {
            Some(WatchStatus::Revealed)
        } else if self.subscribed.contains(&element) {
            Some(WatchStatus::Watching)
        } else {
            None
        }
    }

    /// Whether the host should keep delivering visibility events for `element`
    pub fn is_watching(&self, element: ElementId) -> bool {
        self.subscribed.contains(&element)
    }

    /// The watched set
    pub fn watched(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.subscribed.iter().copied()
    }

    /// Number of elements still receiving visibility events
    pub fn watched_count(&self) -> usize {
        self.subscribed.len()
    }

    /// Every element revealed so far, in handle order
    pub fn revealed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.revealed.iter().copied()
    }

    /// Number of elements revealed so far
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Whether an event satisfies this observer's threshold.
    ///
    /// A zero threshold accepts any intersection, including edge contact.
    pub fn meets_threshold(&self, event: &VisibilityEvent) -> bool {
        if event.ratio.is_nan() {
            return false;
        }
        let ratio = event.ratio.clamp(0.0, 1.0);
        if self.config.threshold <= 0.0 {
            event.is_intersecting || ratio > 0.0
        } else {
            ratio >= self.config.threshold
        }
    }

    /// Process one visibility-change batch, returning the elements revealed by it.
    ///
    /// Entries are independent; their order within the batch does not matter.
    pub fn handle_batch<H>(&mut self, batch: &[VisibilityEvent], host: &mut H) -> Vec<ElementId>
    where
        H: RevealHost + ?Sized,
    {
        let mut newly_revealed = Vec::new();
        if self.disconnected {
            return newly_revealed;
        }

        for event in batch {
            let element = event.element;
            if !self.subscribed.contains(&element) || self.revealed.contains(&element) {
                continue;
            }
            if !self.meets_threshold(event) {
                trace!(%element, ratio = event.ratio, "below threshold");
                continue;
            }

            self.reveal(element, host);
            newly_revealed.push(element);
        }

        newly_revealed
    }

    fn reveal<H>(&mut self, element: ElementId, host: &mut H)
    where
        H: RevealHost + ?Sized,
    {
        for class in &self.config.effect.add {
            host.add_class(element, class);
        }
        for class in &self.config.effect.remove {
            host.remove_class(element, class);
        }

        self.revealed.insert(element);
        if self.config.once {
            self.subscribed.remove(&element);
        }
        debug!(%element, "revealed element");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::{RevealEffect, UnveilError};

    #[derive(Default)]
    struct RecordingHost {
        added: Vec<(ElementId, String)>,
        removed: Vec<(ElementId, String)>,
    }

    impl RevealHost for RecordingHost {
        fn add_class(&mut self, element: ElementId, class: &str) {
            self.added.push((element, class.to_string()));
        }

        fn remove_class(&mut self, element: ElementId, class: &str) {
            self.removed.push((element, class.to_string()));
        }
    }

    fn observer(threshold: f64) -> RevealObserver {
        let config = RevealConfig::default()
            .with_threshold(threshold)
            .with_effect(RevealEffect::add_class("appear"));
        RevealObserver::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RevealConfig::default().with_threshold(1.2);
        assert!(matches!(
            RevealObserver::new(config),
            Err(UnveilError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_reveal_above_threshold_unregisters() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        assert!(obs.register(Some(el)));

        let revealed = obs.handle_batch(&[VisibilityEvent::new(el, 0.5, true)], &mut host);

        assert_eq!(revealed, vec![el]);
        assert_eq!(obs.status(el), Some(WatchStatus::Revealed));
        assert!(!obs.is_watching(el));
        assert_eq!(host.added, vec![(el, "appear".to_string())]);
    }

    #[test]
    fn test_below_threshold_keeps_watching() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));

        let revealed = obs.handle_batch(&[VisibilityEvent::new(el, 0.1, false)], &mut host);
        assert!(revealed.is_empty());
        assert_eq!(obs.status(el), Some(WatchStatus::Watching));
        assert!(host.added.is_empty());

        let revealed = obs.handle_batch(&[VisibilityEvent::at(el, 0.4)], &mut host);
        assert_eq!(revealed, vec![el]);
        assert_eq!(obs.status(el), Some(WatchStatus::Revealed));
    }

    #[test]
    fn test_ratio_exactly_at_threshold_reveals() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));

        assert_eq!(obs.handle_batch(&[VisibilityEvent::at(el, 0.3)], &mut host), vec![el]);
    }

    #[test]
    fn test_register_absent_element_is_noop() {
        let mut obs = observer(0.3);
        assert!(!obs.register(None));
        assert_eq!(obs.watched_count(), 0);
    }

    #[test]
    fn test_batch_reveals_independently() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let a = ElementId::new();
        let b = ElementId::new();
        let c = ElementId::new();
        assert_eq!(obs.register_all([a, b, c]), 3);

        let batch = [
            VisibilityEvent::at(a, 0.9),
            VisibilityEvent::at(b, 0.2),
            VisibilityEvent::at(c, 0.35),
        ];
        let mut revealed = obs.handle_batch(&batch, &mut host);
        revealed.sort();

        assert_eq!(revealed, vec![a, c]);
        assert_eq!(obs.watched().collect::<Vec<_>>(), vec![b]);
        assert_eq!(obs.status(b), Some(WatchStatus::Watching));
        assert_eq!(host.added.len(), 2);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));

        let batch = [VisibilityEvent::at(el, 1.0), VisibilityEvent::at(el, 1.0)];
        assert_eq!(obs.handle_batch(&batch, &mut host).len(), 1);
        assert!(obs.handle_batch(&batch, &mut host).is_empty());
        assert!(!obs.register(Some(el)));
        assert_eq!(host.added.len(), 1);
        assert_eq!(obs.revealed_count(), 1);
    }

    #[test]
    fn test_unwatched_events_ignored() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let stranger = ElementId::new();

        assert!(obs
            .handle_batch(&[VisibilityEvent::at(stranger, 1.0)], &mut host)
            .is_empty());
        assert_eq!(obs.status(stranger), None);
        assert!(host.added.is_empty());
    }

    #[test]
    fn test_nan_ratio_skipped() {
        let mut obs = observer(0.0);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));

        let revealed = obs.handle_batch(&[VisibilityEvent::new(el, f64::NAN, true)], &mut host);
        assert!(revealed.is_empty());
        assert!(obs.is_watching(el));
    }

    #[test]
    fn test_zero_threshold_needs_intersection() {
        let obs = observer(0.0);
        let el = ElementId::new();
        assert!(!obs.meets_threshold(&VisibilityEvent::new(el, 0.0, false)));
        assert!(obs.meets_threshold(&VisibilityEvent::new(el, 0.0, true)));
        assert!(obs.meets_threshold(&VisibilityEvent::at(el, 0.01)));
    }

    #[test]
    fn test_persistent_mode_stays_subscribed() {
        let mut obs = RevealObserver::new(RevealConfig::slides()).unwrap();
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));

        assert_eq!(obs.handle_batch(&[VisibilityEvent::at(el, 0.6)], &mut host), vec![el]);
        assert!(obs.is_watching(el));
        assert_eq!(obs.status(el), Some(WatchStatus::Revealed));
        assert_eq!(host.added, vec![(el, "opacity-100".to_string())]);
        assert_eq!(host.removed, vec![(el, "opacity-0".to_string())]);

        // Leaving and re-entering does not apply the effect again
        obs.handle_batch(&[VisibilityEvent::at(el, 0.0)], &mut host);
        assert!(obs.handle_batch(&[VisibilityEvent::at(el, 0.8)], &mut host).is_empty());
        assert_eq!(host.added.len(), 1);
    }

    #[test]
    fn test_unregister_then_events_ignored() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));
        assert!(obs.unregister(el));
        assert!(!obs.unregister(el));

        assert!(obs.handle_batch(&[VisibilityEvent::at(el, 1.0)], &mut host).is_empty());
        assert_eq!(obs.status(el), None);
    }

    #[test]
    fn test_disconnect_stops_everything() {
        let mut obs = observer(0.3);
        let mut host = RecordingHost::default();
        let el = ElementId::new();
        obs.register(Some(el));
        obs.disconnect();

        assert!(obs.is_disconnected());
        assert_eq!(obs.watched_count(), 0);
        assert!(!obs.register(Some(ElementId::new())));
        assert!(obs.handle_batch(&[VisibilityEvent::at(el, 1.0)], &mut host).is_empty());
        assert!(host.added.is_empty());
    }
}
