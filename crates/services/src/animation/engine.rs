use std::collections::BTreeMap;
use std::time::Duration;

use folio_core::model::{TargetId, Theme};
use folio_core::ramp::{
    Ramp, RampKind, RampSpec, format_display, parse_declared_count, parse_declared_value,
};
use folio_core::viewport::ObserverOptions;

use super::observer::{VisibilityEvent, VisibilityObserver};
use crate::error::AnimationError;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Pacing and trigger settings shared by every target of one engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub name: &'static str,
    pub spec: RampSpec,
    pub options: ObserverOptions,
}

impl EngineConfig {
    /// Skill bars: percentage text and fill width, 50 steps every 30 ms.
    #[must_use]
    pub fn skill_bars() -> Self {
        Self {
            name: "skills",
            spec: RampSpec::new(RampKind::Percent, 50, Duration::from_millis(30)),
            options: ObserverOptions::half_visible(),
        }
    }

    /// Statistic counters: integer text, 100 steps every 20 ms.
    #[must_use]
    pub fn stat_counters() -> Self {
        Self {
            name: "stats",
            spec: RampSpec::new(RampKind::Count, 100, Duration::from_millis(20)),
            options: ObserverOptions::half_visible(),
        }
    }

    /// Project cards: fade in once a tenth of the card is visible.
    #[must_use]
    pub fn card_reveal() -> Self {
        Self {
            name: "cards",
            spec: RampSpec::new(RampKind::Reveal, 1, Duration::ZERO),
            options: ObserverOptions::barely_visible(),
        }
    }
}

//
// ─── FRAMES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    Observed,
    Running,
    Completed,
}

/// Visual update for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub target: TargetId,
    /// New text content, if this kind of target shows text.
    pub text: Option<String>,
    /// Fill width in percent for progress bars.
    pub width_percent: Option<f64>,
    pub revealed: bool,
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct TargetState {
    value: f64,
    ramp: Ramp,
    status: TargetStatus,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Starts a ramp for each target the first time it becomes visible.
#[derive(Debug)]
pub struct AnimationEngine<O: VisibilityObserver> {
    config: EngineConfig,
    observer: O,
    targets: BTreeMap<TargetId, TargetState>,
}

impl<O: VisibilityObserver> AnimationEngine<O> {
    #[must_use]
    pub fn new(config: EngineConfig, observer: O) -> Self {
        Self {
            config,
            observer,
            targets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Register a target and start observing it.
    ///
    /// `declared` is the raw value attribute; `None` means the element or its
    /// attribute could not be found. Counters read the leading integer of the
    /// attribute; malformed values animate towards 0.
    ///
    /// # Errors
    ///
    /// Returns `AnimationError::MissingTarget` when `declared` is `None` and
    /// `AnimationError::DuplicateTarget` when `id` is already registered.
    pub fn register_target(
        &mut self,
        id: TargetId,
        declared: Option<&str>,
    ) -> Result<(), AnimationError> {
        let Some(raw) = declared else {
            return Err(AnimationError::MissingTarget(id));
        };
        if self.targets.contains_key(&id) {
            return Err(AnimationError::DuplicateTarget(id));
        }

        let value = match self.config.spec.kind() {
            RampKind::Reveal => 1.0,
            RampKind::Count => parse_declared_count(raw),
            RampKind::Percent => parse_declared_value(raw),
        };
        self.targets.insert(
            id,
            TargetState {
                value,
                ramp: Ramp::new(value, self.config.spec.steps()),
                status: TargetStatus::Observed,
            },
        );
        self.observer.observe(id);
        Ok(())
    }

    /// Register several targets, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`AnimationEngine::register_target`].
    pub fn register_targets<'a>(
        &mut self,
        targets: impl IntoIterator<Item = (TargetId, Option<&'a str>)>,
    ) -> Result<(), AnimationError> {
        for (id, declared) in targets {
            self.register_target(id, declared)?;
        }
        Ok(())
    }

    /// React to visibility reports; returns frames for ramps that just started.
    ///
    /// Each target triggers at most once and is unobserved as it fires.
    pub fn handle_visibility(&mut self, events: &[VisibilityEvent]) -> Vec<Frame> {
        let mut started = Vec::new();
        for event in events {
            if !self.config.options.crosses(event.ratio) {
                continue;
            }
            let Some(state) = self.targets.get_mut(&event.target) else {
                continue;
            };
            if state.status != TargetStatus::Observed {
                continue;
            }

            state.status = TargetStatus::Running;
            self.observer.unobserve(event.target);
            tracing::debug!(
                engine = self.config.name,
                target = %event.target,
                value = state.value,
                ratio = event.ratio,
                "animation triggered"
            );

            if let Some(frame) = self.start_frame(event.target) {
                started.push(frame);
            }
        }
        started
    }

    /// Advance one target's ramp; `None` unless it is running.
    pub fn tick(&mut self, id: TargetId) -> Option<Frame> {
        let kind = self.config.spec.kind();
        let state = self.targets.get_mut(&id)?;
        if state.status != TargetStatus::Running {
            return None;
        }
        let step = state.ramp.tick()?;
        if step.finished {
            state.status = TargetStatus::Completed;
            tracing::debug!(engine = self.config.name, target = %id, value = step.value, "animation finished");
        }
        Some(Frame {
            target: id,
            text: format_display(kind, step.value),
            width_percent: (kind == RampKind::Percent).then_some(state.value),
            revealed: kind == RampKind::Reveal && step.finished,
            finished: step.finished,
        })
    }

    /// Advance every running ramp by one step.
    pub fn tick_all(&mut self) -> Vec<Frame> {
        let running: Vec<TargetId> = self
            .targets
            .iter()
            .filter(|(_, s)| s.status == TargetStatus::Running)
            .map(|(id, _)| *id)
            .collect();
        running.into_iter().filter_map(|id| self.tick(id)).collect()
    }

    /// Width frames to re-apply after the page theme changes.
    ///
    /// Switching to dark re-applies every bar's full width, whether or not its
    /// ramp has started; other themes and non-percent engines yield nothing.
    #[must_use]
    pub fn restyle_for_theme(&self, theme: Theme) -> Vec<Frame> {
        if !theme.is_dark() || self.config.spec.kind() != RampKind::Percent {
            return Vec::new();
        }
        self.targets
            .iter()
            .map(|(id, state)| Frame {
                target: *id,
                text: None,
                width_percent: Some(state.value),
                revealed: false,
                finished: state.status == TargetStatus::Completed,
            })
            .collect()
    }

    #[must_use]
    pub fn status(&self, id: TargetId) -> Option<TargetStatus> {
        self.targets.get(&id).map(|s| s.status)
    }

    /// Rounded value currently shown for `id`.
    #[must_use]
    pub fn display_value(&self, id: TargetId) -> Option<i64> {
        self.targets.get(&id).map(|s| s.ramp.display_value())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.targets
            .values()
            .any(|s| s.status == TargetStatus::Running)
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    fn start_frame(&self, id: TargetId) -> Option<Frame> {
        let state = self.targets.get(&id)?;
        match self.config.spec.kind() {
            // The bar jumps to its width right away and CSS eases it; only the
            // label counts up.
            RampKind::Percent => Some(Frame {
                target: id,
                text: None,
                width_percent: Some(state.value),
                revealed: false,
                finished: false,
            }),
            RampKind::Count | RampKind::Reveal => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::observer::ManualObserver;

    fn counters() -> AnimationEngine<ManualObserver> {
        AnimationEngine::new(EngineConfig::stat_counters(), ManualObserver::new())
    }

    fn visible(target: TargetId) -> VisibilityEvent {
        VisibilityEvent { target, ratio: 1.0 }
    }

    #[test]
    fn registration_observes_target() {
        let mut engine = counters();
        let id = TargetId::new(1);
        engine.register_target(id, Some("150")).unwrap();
        assert!(engine.observer().is_observed(id));
        assert_eq!(engine.status(id), Some(TargetStatus::Observed));
        assert_eq!(engine.display_value(id), Some(0));
    }

    #[test]
    fn missing_and_duplicate_targets_fail_fast() {
        let mut engine = counters();
        let id = TargetId::new(1);
        assert_eq!(
            engine.register_target(id, None),
            Err(AnimationError::MissingTarget(id))
        );
        engine.register_target(id, Some("3")).unwrap();
        assert_eq!(
            engine.register_target(id, Some("3")),
            Err(AnimationError::DuplicateTarget(id))
        );
    }

    #[test]
    fn below_threshold_does_not_trigger() {
        let mut engine = counters();
        let id = TargetId::new(1);
        engine.register_target(id, Some("10")).unwrap();
        let frames = engine.handle_visibility(&[VisibilityEvent { target: id, ratio: 0.3 }]);
        assert!(frames.is_empty());
        assert_eq!(engine.status(id), Some(TargetStatus::Observed));
        assert!(engine.tick(id).is_none());
    }

    #[test]
    fn counter_ramps_to_target_in_step_count_ticks() {
        let mut engine = counters();
        let id = TargetId::new(1);
        engine.register_target(id, Some("250")).unwrap();
        engine.handle_visibility(&[visible(id)]);
        assert!(!engine.observer().is_observed(id));

        let frames: Vec<Frame> = std::iter::from_fn(|| engine.tick(id)).collect();
        assert_eq!(frames.len(), 100);
        let last = frames.last().unwrap();
        assert_eq!(last.text.as_deref(), Some("250"));
        assert!(last.finished);
        assert_eq!(engine.status(id), Some(TargetStatus::Completed));
        assert!(!engine.is_running());
    }

    #[test]
    fn skill_bar_sets_width_and_percent_text() {
        let mut engine = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
        let id = TargetId::new(9);
        engine.register_target(id, Some("80")).unwrap();

        let started = engine.handle_visibility(&[visible(id)]);
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].width_percent, Some(80.0));
        assert_eq!(started[0].text, None);

        let mut last = None;
        for _ in 0..50 {
            last = engine.tick(id);
        }
        assert_eq!(last.unwrap().text.as_deref(), Some("80%"));
        assert!(engine.tick(id).is_none());
        assert_eq!(engine.display_value(id), Some(80));
    }

    #[test]
    fn trigger_is_one_shot() {
        let mut engine = counters();
        let id = TargetId::new(1);
        engine.register_target(id, Some("5")).unwrap();
        engine.handle_visibility(&[visible(id)]);
        while engine.tick(id).is_some() {}

        // Scrolling away and back again changes nothing.
        let frames = engine.handle_visibility(&[visible(id)]);
        assert!(frames.is_empty());
        assert!(engine.tick(id).is_none());
        assert_eq!(engine.status(id), Some(TargetStatus::Completed));
    }

    #[test]
    fn malformed_value_animates_to_zero() {
        let mut engine = counters();
        let id = TargetId::new(1);
        engine.register_target(id, Some("many")).unwrap();
        engine.handle_visibility(&[visible(id)]);
        let frame = engine.tick(id).unwrap();
        assert_eq!(frame.text.as_deref(), Some("0"));
        assert!(frame.finished);
    }

    #[test]
    fn suffixed_counter_lands_on_leading_integer() {
        let mut engine = counters();
        let id = TargetId::new(3);
        engine.register_target(id, Some("1200+")).unwrap();
        engine.handle_visibility(&[visible(id)]);
        let last = std::iter::from_fn(|| engine.tick(id)).last().unwrap();
        assert_eq!(last.text.as_deref(), Some("1200"));
        assert_eq!(engine.display_value(id), Some(1200));
    }

    #[test]
    fn dark_theme_reapplies_every_bar_width() {
        let mut engine = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
        let seen = TargetId::new(1);
        let unseen = TargetId::new(2);
        engine
            .register_targets([(seen, Some("90")), (unseen, Some("65"))])
            .unwrap();
        engine.handle_visibility(&[visible(seen)]);

        let frames = engine.restyle_for_theme(Theme::Dark);
        let widths: Vec<(TargetId, Option<f64>)> =
            frames.iter().map(|f| (f.target, f.width_percent)).collect();
        assert_eq!(widths, vec![(seen, Some(90.0)), (unseen, Some(65.0))]);
        assert!(frames.iter().all(|f| f.text.is_none()));
        // Restyling leaves the ramps alone.
        assert_eq!(engine.status(unseen), Some(TargetStatus::Observed));

        assert!(engine.restyle_for_theme(Theme::Light).is_empty());
        assert!(counters().restyle_for_theme(Theme::Dark).is_empty());
    }

    #[test]
    fn targets_ramp_independently() {
        let mut engine = counters();
        let early = TargetId::new(1);
        let late = TargetId::new(2);
        engine
            .register_targets([(early, Some("100")), (late, Some("100"))])
            .unwrap();

        engine.handle_visibility(&[visible(early)]);
        for _ in 0..10 {
            engine.tick_all();
        }
        engine.handle_visibility(&[visible(late)]);
        let frames = engine.tick_all();
        assert_eq!(frames.len(), 2);
        assert_eq!(engine.display_value(early), Some(11));
        assert_eq!(engine.display_value(late), Some(1));
    }

    #[test]
    fn card_reveal_completes_in_one_tick() {
        let mut engine = AnimationEngine::new(EngineConfig::card_reveal(), ManualObserver::new());
        let id = TargetId::new(4);
        engine.register_target(id, Some("")).unwrap();
        let started = engine.handle_visibility(&[VisibilityEvent { target: id, ratio: 0.1 }]);
        assert!(started.is_empty());
        let frame = engine.tick(id).unwrap();
        assert!(frame.revealed);
        assert!(frame.finished);
        assert_eq!(frame.text, None);
    }
}
