use super::*;

#[test]
fn defaults_match_documented_constants() {
    let cfg = GalleryConfig::default();
    assert_eq!(cfg.compact_breakpoint, 768.0);
    assert_eq!(cfg.leading_margin, 50.0);
    assert_eq!(cfg.active_anchor, 0.5);
    assert_eq!(cfg.settle_delay(), Duration::from_millis(500));
    assert_eq!(cfg.navigation.duration(), Duration::from_millis(1200));
    assert_eq!(cfg.reveal.card.threshold, 0.85);
    assert_eq!(cfg.scrub_lag(), None);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = GalleryConfig::from_json_str(
        r#"{ "leading_margin": 80, "navigation": { "duration_ms": 600 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.leading_margin, 80.0);
    assert_eq!(cfg.navigation.duration_ms, 600);
    assert_eq!(cfg.navigation.ease, Ease::InOutQuad);
    assert_eq!(cfg.media.image_margin, 300.0);
}

#[test]
fn zero_scrub_lag_disables_smoothing() {
    let cfg = GalleryConfig::from_json_str(r#"{ "scrub_lag_ms": 0 }"#).unwrap();
    assert_eq!(cfg.scrub_lag(), None);
    let cfg = GalleryConfig::from_json_str(r#"{ "scrub_lag_ms": 250 }"#).unwrap();
    assert_eq!(cfg.scrub_lag(), Some(Duration::from_millis(250)));
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = GalleryConfig::from_json_str(r#"{ "active_anchor": 1.5 }"#).unwrap_err();
    assert!(err.to_string().contains("active_anchor"));

    let err = GalleryConfig::from_json_str(r#"{ "compact_breakpoint": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("compact_breakpoint"));

    let err = GalleryConfig::from_json_str(r#"{ "leading_margin": -1 }"#).unwrap_err();
    assert!(err.to_string().contains("leading_margin"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = GalleryConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, GalleryError::Serde(_)));
}

#[test]
fn eases_use_snake_case_names() {
    let cfg =
        GalleryConfig::from_json_str(r#"{ "navigation": { "ease": "out_cubic" } }"#).unwrap();
    assert_eq!(cfg.navigation.ease, Ease::OutCubic);
    let json = serde_json::to_string(&cfg.reveal.grid).unwrap();
    assert!(json.contains(r#""ease":"out_quad""#));

    let err = GalleryConfig::from_json_str(r#"{ "navigation": { "ease": "InOutQuad" } }"#)
        .unwrap_err();
    assert!(matches!(err, GalleryError::Serde(_)));
}
