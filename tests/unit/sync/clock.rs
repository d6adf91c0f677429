use super::*;

#[test]
fn scrollable_distance_is_content_minus_viewport() {
    for (content, viewport) in [(3000.0, 1000.0), (1000.0, 1000.0), (1440.0, 1280.0)] {
        let r = ScrollRange::measure(0.0, content, viewport);
        assert_eq!(r.total_scrollable_distance, content - viewport);
        assert_eq!(r.native_scroll_span(), r.total_scrollable_distance);
    }
}

#[test]
fn narrow_content_degenerates_to_zero() {
    let r = ScrollRange::measure(120.0, 600.0, 1000.0);
    assert_eq!(r.total_scrollable_distance, 0.0);
    assert!(r.is_degenerate());

    let clock = ProgressClock::new(r);
    for y in [0.0, 120.0, 500.0, 1e9, -40.0, f64::NAN] {
        assert_eq!(clock.progress(y), Progress::START);
    }
    assert_eq!(clock.offset_for(Progress::END), 0.0);
}

#[test]
fn concrete_half_way_scenario() {
    let clock = ProgressClock::new(ScrollRange::measure(0.0, 3000.0, 1000.0));
    let p = clock.progress(1000.0);
    assert_eq!(p.get(), 0.5);
    assert_eq!(clock.offset_for(p), -1000.0);
}

#[test]
fn progress_is_monotonic_and_clamped() {
    let clock = ProgressClock::new(ScrollRange::measure(400.0, 5000.0, 1200.0));
    let span = clock.range().native_scroll_span();
    let mut last = -1.0;
    let mut y = 0.0;
    while y <= 400.0 + span + 200.0 {
        let p = clock.progress(y).get();
        assert!(p >= last);
        assert!((0.0..=1.0).contains(&p));
        last = p;
        y += 37.0;
    }
    assert_eq!(clock.progress(400.0), Progress::START);
    assert_eq!(clock.progress(400.0 + span), Progress::END);
}

#[test]
fn native_position_inverts_progress() {
    let clock = ProgressClock::new(ScrollRange::measure(250.0, 4200.0, 1000.0));
    for y in [250.0, 900.0, 2000.0, 3450.0] {
        let p = clock.progress(y);
        assert!((clock.native_position(p) - y).abs() < 1e-9);
    }
    assert_eq!(clock.native_position(Progress::END), 250.0 + 3200.0);
}
