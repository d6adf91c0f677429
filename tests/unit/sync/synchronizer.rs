use super::*;
use crate::host::sim::SimHost;

fn host(content_width: f64) -> SimHost {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    host.mount_track(0.0, content_width);
    host
}

fn attached(host: &mut SimHost) -> ScrollSynchronizer {
    let mut sync = ScrollSynchronizer::default();
    let event = sync.attach(host).unwrap();
    assert!(matches!(event, SyncEvent::Attached(_)));
    sync
}

#[test]
fn attach_without_mount_is_a_silent_no_op() {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    let mut sync = ScrollSynchronizer::default();
    assert!(sync.attach(&mut host).is_none());
    assert!(!sync.is_attached());
    assert_eq!(host.live_observers(), 0);
    assert_eq!(host.live_timers(), 0);
    assert!(sync.handle(&mut host, &HostEvent::Scroll).is_none());
}

#[test]
fn attach_pins_and_installs_observers() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    assert_eq!(host.pin, Some(2000.0));
    assert_eq!(host.observer_count(ObserverKind::Scroll), 1);
    assert_eq!(host.observer_count(ObserverKind::Resize), 1);
    assert_eq!(host.live_timers(), 1);
    assert!(sync.attach(&mut host).is_none());
    sync.detach(&mut host);
}

#[test]
fn scroll_maps_one_to_one_onto_offset() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    host.drag_scrollbar(1000.0);
    let event = sync.handle(&mut host, &HostEvent::Scroll).unwrap();
    let snap = event.snapshot();
    assert_eq!(snap.progress.get(), 0.5);
    assert_eq!(snap.offset_x, -1000.0);
    assert_eq!(host.track_offset, Some(-1000.0));
    sync.detach(&mut host);
}

#[test]
fn degenerate_range_never_pins_or_transforms() {
    let mut host = host(600.0);
    let mut sync = attached(&mut host);
    assert_eq!(host.pin, None);
    host.drag_scrollbar(5000.0);
    let snap = *sync.handle(&mut host, &HostEvent::Scroll).unwrap().snapshot();
    assert_eq!(snap.progress, Progress::START);
    assert_eq!(snap.offset_x, 0.0);
    assert_eq!(host.track_offset_writes, 0);
    sync.detach(&mut host);
    assert_eq!(host.track_offset_writes, 0);
}

#[test]
fn resize_recomputes_range() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    host.resize(Size::new(1500.0, 800.0));
    let event = sync.handle(&mut host, &HostEvent::Resize).unwrap();
    assert!(event.changes_layout());
    assert_eq!(event.snapshot().range.total_scrollable_distance, 1500.0);
    assert_eq!(host.pin, Some(1500.0));

    let again = sync.handle(&mut host, &HostEvent::Resize).unwrap();
    assert!(!again.changes_layout());
    sync.detach(&mut host);
}

#[test]
fn growing_past_viewport_clears_stale_transform_when_shrinking_back() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    host.drag_scrollbar(800.0);
    sync.handle(&mut host, &HostEvent::Scroll);
    assert_eq!(host.track_offset, Some(-800.0));

    host.set_track_width(900.0);
    let event = sync.handle(&mut host, &HostEvent::Resize).unwrap();
    assert!(event.snapshot().range.is_degenerate());
    assert_eq!(host.track_offset, Some(0.0));
    assert_eq!(host.pin, None);
    sync.detach(&mut host);
}

#[test]
fn settle_timer_remeasures_late_layout() {
    let mut host = host(1000.0);
    let mut sync = attached(&mut host);
    assert_eq!(host.pin, None);

    host.set_track_width(4000.0);
    host.advance(Duration::from_millis(500));
    let timer = host
        .take_events()
        .into_iter()
        .find(|e| matches!(e, HostEvent::Timer(_)))
        .unwrap();
    let event = sync.handle(&mut host, &timer).unwrap();
    assert!(matches!(event, SyncEvent::Remeasured(_)));
    assert_eq!(host.pin, Some(3000.0));
    assert_eq!(host.live_timers(), 0);

    // A replayed or foreign timer id is ignored.
    assert!(sync.handle(&mut host, &timer).is_none());
    sync.detach(&mut host);
}

#[test]
fn all_media_loaded_arms_one_deferred_remeasure() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    assert!(sync.handle(&mut host, &HostEvent::AllMediaLoaded).is_none());
    assert!(sync.handle(&mut host, &HostEvent::AllMediaLoaded).is_none());
    assert_eq!(host.live_timers(), 2);
    sync.detach(&mut host);
}

#[test]
fn detach_releases_everything_and_resets_host() {
    let mut host = host(3000.0);
    let mut sync = attached(&mut host);
    host.drag_scrollbar(300.0);
    sync.handle(&mut host, &HostEvent::Scroll);
    sync.handle(&mut host, &HostEvent::AllMediaLoaded);

    sync.detach(&mut host);
    assert!(!sync.is_attached());
    assert_eq!(host.live_observers(), 0);
    assert_eq!(host.live_timers(), 0);
    assert_eq!(host.pin, None);
    assert_eq!(host.track_offset, Some(0.0));
    assert!(sync.handle(&mut host, &HostEvent::Scroll).is_none());
}

#[test]
fn scrub_lag_eases_applied_offset_towards_target() {
    let mut host = host(3000.0);
    let mut sync = ScrollSynchronizer::new(SyncSettings {
        scrub_lag: Some(Duration::from_millis(200)),
        ..SyncSettings::default()
    });
    sync.attach(&mut host).unwrap();
    assert_eq!(host.observer_count(ObserverKind::AnimationFrame), 1);

    host.drag_scrollbar(1000.0);
    let snap = *sync.handle(&mut host, &HostEvent::Scroll).unwrap().snapshot();
    assert_eq!(snap.progress.get(), 0.5);
    assert_eq!(snap.offset_x, 0.0);

    let mut last = 0.0;
    for _ in 0..120 {
        host.advance(Duration::from_millis(16));
        if let Some(event) = sync.handle(&mut host, &HostEvent::Frame) {
            let x = event.snapshot().offset_x;
            assert!(x <= last);
            last = x;
        }
    }
    assert_eq!(last, -1000.0);
    sync.detach(&mut host);
}
