use super::*;

#[test]
fn style_mix_interpolates_each_field() {
    let hidden = NodeStyle {
        opacity: 0.0,
        scale: 0.9,
        translate_y: 30.0,
    };
    assert_eq!(hidden.mix(NodeStyle::IDENTITY, 0.0), hidden);
    assert_eq!(hidden.mix(NodeStyle::IDENTITY, 1.0), NodeStyle::IDENTITY);

    let mid = hidden.mix(NodeStyle::IDENTITY, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert!((mid.scale - 0.95).abs() < 1e-12);
    assert_eq!(mid.translate_y, 15.0);
}

#[test]
fn style_mix_clamps_time() {
    let hidden = NodeStyle {
        opacity: 0.0,
        scale: 1.0,
        translate_y: 30.0,
    };
    assert_eq!(hidden.mix(NodeStyle::IDENTITY, 4.0), NodeStyle::IDENTITY);
    assert_eq!(hidden.mix(NodeStyle::IDENTITY, -1.0), hidden);
}
