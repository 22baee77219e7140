use std::time::Duration;

use folio_core::model::TargetId;
use folio_core::viewport::Rect;
use services::animation::{
    AnimationEngine, EngineConfig, GeometryObserver, ManualObserver, TargetStatus,
    VisibilityObserver, run_until_settled,
};

fn viewport_at(scroll_y: f64) -> Rect {
    Rect::new(0.0, scroll_y, 1280.0, 800.0)
}

#[test]
fn eighty_percent_bar_lands_after_fifty_ticks() {
    let mut engine = AnimationEngine::new(EngineConfig::skill_bars(), ManualObserver::new());
    let id = TargetId::new(1);
    engine.register_target(id, Some("80")).unwrap();
    let event = engine.observer().fire(id, 0.5).unwrap();
    engine.handle_visibility(&[event]);

    for _ in 0..50 {
        assert!(engine.tick(id).is_some());
    }
    assert_eq!(engine.display_value(id), Some(80));
    assert!(engine.tick(id).is_none());
    assert_eq!(engine.display_value(id), Some(80));
}

#[test]
fn scrolling_triggers_each_counter_once() {
    let mut observer = GeometryObserver::new(EngineConfig::stat_counters().options);
    let top = TargetId::new(1);
    let bottom = TargetId::new(2);
    observer.place(top, Rect::new(100.0, 300.0, 200.0, 80.0));
    observer.place(bottom, Rect::new(100.0, 1500.0, 200.0, 80.0));

    let mut engine = AnimationEngine::new(EngineConfig::stat_counters(), observer);
    engine
        .register_targets([(top, Some("42")), (bottom, Some("1200"))])
        .unwrap();

    let events = engine.observer().scan(&viewport_at(0.0));
    engine.handle_visibility(&events);
    assert_eq!(engine.status(top), Some(TargetStatus::Running));
    assert_eq!(engine.status(bottom), Some(TargetStatus::Observed));
    assert!(!engine.observer().is_observed(top));

    // Fully on screen, but only 30 of its 80 units clear the bottom inset.
    let events = engine.observer().scan(&viewport_at(780.0));
    engine.handle_visibility(&events);
    assert_eq!(engine.status(bottom), Some(TargetStatus::Observed));

    let events = engine.observer().scan(&viewport_at(1000.0));
    engine.handle_visibility(&events);
    assert_eq!(engine.status(bottom), Some(TargetStatus::Running));
    assert!(engine.observer().scan(&viewport_at(1000.0)).is_empty());
}

#[tokio::test(start_paused = true)]
async fn counters_settle_on_their_declared_values() {
    let mut engine = AnimationEngine::new(EngineConfig::stat_counters(), ManualObserver::new());
    let ids = [TargetId::new(1), TargetId::new(2), TargetId::new(3)];
    engine
        .register_targets([
            (ids[0], Some("15")),
            (ids[1], Some("250")),
            (ids[2], Some("oops")),
        ])
        .unwrap();
    let events: Vec<_> = ids
        .iter()
        .filter_map(|id| engine.observer().fire(*id, 1.0))
        .collect();
    engine.handle_visibility(&events);

    let started = tokio::time::Instant::now();
    let mut finished = Vec::new();
    run_until_settled(&mut engine, |frame| {
        if frame.finished {
            finished.push((frame.target, frame.text));
        }
    })
    .await;

    assert_eq!(started.elapsed(), Duration::from_millis(20 * 100));
    assert_eq!(engine.display_value(ids[0]), Some(15));
    assert_eq!(engine.display_value(ids[1]), Some(250));
    assert_eq!(engine.display_value(ids[2]), Some(0));
    assert_eq!(finished.len(), 3);
    assert!(ids
        .iter()
        .all(|id| engine.status(*id) == Some(TargetStatus::Completed)));
}
