use super::*;

#[test]
fn extent_contains_is_half_open() {
    let e = Extent::new(1800.0, 600.0);
    assert!(!e.contains(1799.9));
    assert!(e.contains(1800.0));
    assert!(e.contains(2399.0));
    assert!(!e.contains(2400.0));
    assert_eq!(e.end(), 2400.0);
}

#[test]
fn extent_sanitizes_host_values() {
    let e = Extent::new(f64::NAN, -5.0);
    assert_eq!(e, Extent { offset: 0.0, width: 0.0 });
    let e = Extent::new(10.0, f64::INFINITY);
    assert_eq!(e.width, 0.0);
}

#[test]
fn extent_intersection_excludes_touching_edges() {
    let e = Extent::new(100.0, 50.0);
    assert!(e.intersects(0.0, 101.0));
    assert!(!e.intersects(0.0, 100.0));
    assert!(!e.intersects(150.0, 200.0));
    assert!(e.intersects(149.0, 200.0));
}

#[test]
fn progress_clamps_and_rejects_nan() {
    assert_eq!(Progress::new(-0.5), Progress::START);
    assert_eq!(Progress::new(1.5), Progress::END);
    assert_eq!(Progress::new(f64::NAN), Progress::START);
    assert_eq!(Progress::new(0.25).get(), 0.25);
}

#[test]
fn ids_display_and_serialize_as_plain_strings() {
    let id = RegionId::from("phase-2");
    assert_eq!(id.to_string(), "phase-2");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"phase-2\"");
    let back: ItemId = serde_json::from_str("\"p2-1\"").unwrap();
    assert_eq!(back.as_str(), "p2-1");
}
