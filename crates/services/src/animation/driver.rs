use tokio::time::{MissedTickBehavior, interval};

use super::engine::{AnimationEngine, Frame};
use super::observer::VisibilityObserver;

/// Tick every running ramp at the engine's interval until all have landed.
///
/// The first step happens one interval after the call, like a browser
/// `setInterval`. Returns the number of rounds driven.
pub async fn run_until_settled<O, F>(engine: &mut AnimationEngine<O>, mut on_frame: F) -> u32
where
    O: VisibilityObserver,
    F: FnMut(Frame),
{
    if !engine.is_running() {
        return 0;
    }

    let period = engine.config().spec.interval();
    let mut rounds = 0_u32;

    if period.is_zero() {
        while engine.is_running() {
            engine.tick_all().into_iter().for_each(&mut on_frame);
            rounds += 1;
        }
        return rounds;
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // `interval` completes its first tick immediately.
    ticker.tick().await;

    while engine.is_running() {
        ticker.tick().await;
        engine.tick_all().into_iter().for_each(&mut on_frame);
        rounds += 1;
    }

    tracing::debug!(engine = engine.config().name, rounds, "animations settled");
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::engine::EngineConfig;
    use crate::animation::observer::{ManualObserver, VisibilityEvent};
    use folio_core::model::TargetId;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn skill_bars_settle_after_fifty_intervals() {
        let mut engine = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
        let id = TargetId::new(1);
        engine.register_target(id, Some("80")).unwrap();
        engine.handle_visibility(&[VisibilityEvent {
            target: id,
            ratio: 0.75,
        }]);

        let started = tokio::time::Instant::now();
        let mut texts = Vec::new();
        let rounds = run_until_settled(&mut engine, |frame| texts.extend(frame.text)).await;

        assert_eq!(rounds, 50);
        assert_eq!(started.elapsed(), Duration::from_millis(30 * 50));
        assert_eq!(texts.len(), 50);
        assert_eq!(texts.last().map(String::as_str), Some("80%"));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_engine_returns_immediately() {
        let mut engine = AnimationEngine::new(EngineConfig::stat_counters(), ManualObserver::new());
        engine.register_target(TargetId::new(1), Some("10")).unwrap();
        let rounds = run_until_settled(&mut engine, |_| {}).await;
        assert_eq!(rounds, 0);
    }

    #[tokio::test]
    async fn zero_interval_engine_settles_without_timer() {
        let mut engine = AnimationEngine::new(EngineConfig::card_reveal(), ManualObserver::new());
        let id = TargetId::new(2);
        engine.register_target(id, Some("")).unwrap();
        engine.handle_visibility(&[VisibilityEvent { target: id, ratio: 0.2 }]);
        let mut revealed = false;
        let rounds = run_until_settled(&mut engine, |frame| revealed |= frame.revealed).await;
        assert_eq!(rounds, 1);
        assert!(revealed);
    }
}
