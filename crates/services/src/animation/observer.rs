use std::collections::{BTreeSet, HashMap};

use folio_core::model::TargetId;
use folio_core::viewport::{ObserverOptions, Rect};

/// Visibility change reported for an observed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    pub target: TargetId,
    /// Fraction of the target inside the margin-adjusted viewport, `0.0..=1.0`.
    pub ratio: f64,
}

/// Capability to track whether targets are on screen.
///
/// An engine calls `observe` when a target is registered and `unobserve`
/// right after the target's one-shot trigger fires.
pub trait VisibilityObserver {
    fn observe(&mut self, target: TargetId);
    fn unobserve(&mut self, target: TargetId);
    fn is_observed(&self, target: TargetId) -> bool;
}

/// Observer whose events are fired by hand; for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct ManualObserver {
    observed: BTreeSet<TargetId>,
}

impl ManualObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an event for `target` if it is still observed.
    #[must_use]
    pub fn fire(&self, target: TargetId, ratio: f64) -> Option<VisibilityEvent> {
        self.observed
            .contains(&target)
            .then_some(VisibilityEvent { target, ratio })
    }

    #[must_use]
    pub fn observed(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.observed.iter().copied()
    }
}

impl VisibilityObserver for ManualObserver {
    fn observe(&mut self, target: TargetId) {
        self.observed.insert(target);
    }

    fn unobserve(&mut self, target: TargetId) {
        self.observed.remove(&target);
    }

    fn is_observed(&self, target: TargetId) -> bool {
        self.observed.contains(&target)
    }
}

/// Observer that derives visibility from element and viewport rectangles.
#[derive(Debug, Clone)]
pub struct GeometryObserver {
    options: ObserverOptions,
    observed: BTreeSet<TargetId>,
    layout: HashMap<TargetId, Rect>,
}

impl GeometryObserver {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: BTreeSet::new(),
            layout: HashMap::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Record where a target sits on the page.
    pub fn place(&mut self, target: TargetId, rect: Rect) {
        self.layout.insert(target, rect);
    }

    #[must_use]
    pub fn is_placed(&self, target: TargetId) -> bool {
        self.layout.contains_key(&target)
    }

    /// Report every observed, placed target that overlaps `viewport`.
    #[must_use]
    pub fn scan(&self, viewport: &Rect) -> Vec<VisibilityEvent> {
        self.observed
            .iter()
            .filter_map(|id| {
                let rect = self.layout.get(id)?;
                let ratio = self.options.visible_ratio(rect, viewport);
                (ratio > 0.0).then_some(VisibilityEvent { target: *id, ratio })
            })
            .collect()
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, target: TargetId) {
        self.observed.insert(target);
    }

    fn unobserve(&mut self, target: TargetId) {
        self.observed.remove(&target);
        self.layout.remove(&target);
    }

    fn is_observed(&self, target: TargetId) -> bool {
        self.observed.contains(&target)
    }
}
