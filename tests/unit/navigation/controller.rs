use super::*;
use crate::foundation::core::Size;
use crate::host::sim::SimHost;
use crate::sync::clock::ScrollRange;

fn clock() -> ProgressClock {
    ProgressClock::new(ScrollRange::measure(400.0, 3000.0, 1000.0))
}

fn region(id: &str, offset: f64, width: f64) -> Region {
    Region {
        id: RegionId::from(id),
        extent: Extent::new(offset, width),
    }
}

#[test]
fn target_is_the_exact_inverse_minus_margin() {
    let nav = NavigationController::default();
    let clock = clock();
    // x = 1800 - 50 = 1750, so progress 0.875 and native 400 + 1750.
    assert_eq!(nav.target_for(Extent::new(1800.0, 600.0), &clock), 2150.0);
    // Regions near the start clamp to progress 0.
    assert_eq!(nav.target_for(Extent::new(20.0, 600.0), &clock), 400.0);
    // Regions past the end clamp to progress 1.
    assert_eq!(nav.target_for(Extent::new(2800.0, 200.0), &clock), 2400.0);
}

#[test]
fn degenerate_range_targets_the_range_start() {
    let nav = NavigationController::default();
    let clock = ProgressClock::new(ScrollRange::measure(120.0, 800.0, 1000.0));
    assert_eq!(nav.target_for(Extent::new(500.0, 300.0), &clock), 120.0);
}

#[test]
fn pinned_scroll_is_time_boxed_and_lands_on_target() {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    let mut nav = NavigationController::default();
    nav.go_to_pinned(&mut host, RegionId::from("phase-2"), Extent::new(1800.0, 600.0), &clock());
    assert!(nav.is_navigating());

    let mut last = host.scroll_y();
    let mut frames = 0;
    while nav.tick(&mut host) {
        assert!(host.scroll_y() >= last);
        last = host.scroll_y();
        host.advance(Duration::from_millis(16));
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(host.scroll_y(), 2150.0);
    assert!(frames >= 70);
    assert!(
        host.scroll_writes
            .iter()
            .all(|(_, b)| *b == ScrollBehavior::Instant)
    );
}

#[test]
fn user_input_cancels_a_running_scroll() {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    let mut nav = NavigationController::default();
    nav.go_to_pinned(&mut host, RegionId::from("phase-2"), Extent::new(1800.0, 600.0), &clock());
    host.advance(Duration::from_millis(100));
    assert!(nav.tick(&mut host));
    nav.on_user_input();
    assert!(!nav.is_navigating());
    let writes = host.scroll_writes.len();
    host.advance(Duration::from_millis(16));
    assert!(!nav.tick(&mut host));
    assert_eq!(host.scroll_writes.len(), writes);
}

#[test]
fn drift_beyond_tolerance_is_a_manual_override() {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    let mut nav = NavigationController::default();
    nav.go_to_pinned(&mut host, RegionId::from("phase-2"), Extent::new(1800.0, 600.0), &clock());
    host.advance(Duration::from_millis(200));
    nav.tick(&mut host);
    let written = host.scroll_y();

    nav.check_drift(written + 0.5);
    assert!(nav.is_navigating());

    host.drag_scrollbar(written + 40.0);
    host.advance(Duration::from_millis(16));
    assert!(!nav.tick(&mut host));
    assert_eq!(host.scroll_y(), written + 40.0);
}

#[test]
fn flowing_navigation_scrolls_natively() {
    let mut host = SimHost::new(Size::new(400.0, 800.0));
    let mut nav = NavigationController::default();
    nav.go_to_flowing(&mut host, 1600.0);
    assert_eq!(host.scroll_writes, vec![(1600.0, ScrollBehavior::Smooth)]);
    assert!(!nav.is_navigating());
}

#[test]
fn active_region_changes_are_reported_once() {
    let mut nav = NavigationController::default();
    let a = region("phase-1", 1000.0, 800.0);
    let b = region("phase-2", 1800.0, 600.0);

    assert_eq!(nav.update_active(None), None);
    assert_eq!(
        nav.update_active(Some(&a)),
        Some(Some(RegionId::from("phase-1")))
    );
    assert_eq!(nav.update_active(Some(&a)), None);
    assert_eq!(
        nav.update_active(Some(&b)),
        Some(Some(RegionId::from("phase-2")))
    );
    assert_eq!(nav.update_active(None), Some(None));
    assert!(nav.active_region().is_none());
}

#[test]
fn retarget_keeps_the_deadline_and_lands_on_the_new_target() {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    let mut nav = NavigationController::default();
    let clock = clock();
    nav.go_to_pinned(
        &mut host,
        RegionId::from("phase-2"),
        Extent::new(1800.0, 600.0),
        &clock,
    );
    assert_eq!(nav.target(), Some(&RegionId::from("phase-2")));
    host.advance(Duration::from_millis(400));
    assert!(nav.tick(&mut host));
    let before = host.scroll_y();

    // The region moved left; the scroll continues from where it is.
    nav.retarget(&host, Extent::new(1300.0, 600.0), &clock);
    host.advance(Duration::from_millis(16));
    assert!(nav.tick(&mut host));
    assert!((host.scroll_y() - before).abs() < 50.0);

    let mut frames = 0;
    while nav.tick(&mut host) {
        host.advance(Duration::from_millis(16));
        frames += 1;
    }
    // 1200 ms in total: 400 before the move, the rest after it.
    assert!(frames <= 51);
    assert_eq!(host.scroll_y(), 1650.0);
    assert!(nav.target().is_none());
}

#[test]
fn retarget_without_a_flight_is_ignored() {
    let host = SimHost::new(Size::new(1000.0, 800.0));
    let mut nav = NavigationController::default();
    nav.retarget(&host, Extent::new(1300.0, 600.0), &clock());
    assert!(!nav.is_navigating());
}
