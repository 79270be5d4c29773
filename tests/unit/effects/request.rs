use super::*;
use serde_json::json;

#[test]
fn parse_glow_with_params() {
    let e = parse_effect("glow", &json!({ "intensity": 0.7, "radius": 25 })).unwrap();
    assert_eq!(
        e,
        EffectRequest::Glow(GlowParams {
            intensity: 0.7,
            radius: 25
        })
    );
}

#[test]
fn parse_fills_missing_params_with_defaults() {
    let e = parse_effect("radial_blur", &json!({ "strength": 0.3 })).unwrap();
    assert_eq!(
        e,
        EffectRequest::RadialBlur(RadialBlurParams {
            center: None,
            strength: 0.3,
            masked: false
        })
    );
    assert_eq!(
        parse_effect("shake", &serde_json::Value::Null).unwrap(),
        EffectRequest::Shake(ShakeParams { intensity: 5 })
    );
}

#[test]
fn parse_accepts_kind_spellings() {
    for kind in ["motion_blur", "motion-blur", "MotionBlur", "  motionblur "] {
        let e = parse_effect(kind, &json!({ "strength": 0.4 })).unwrap();
        assert_eq!(e.kind_name(), "motion_blur");
    }
}

#[test]
fn parse_rejects_unknown_kind() {
    let err = parse_effect("sepia", &json!({})).unwrap_err();
    assert!(matches!(err, VfxError::UnsupportedEffectKind(k) if k == "sepia"));
    assert!(parse_effect("  ", &json!({})).is_err());
}

#[test]
fn parse_rejects_out_of_range_params() {
    assert!(parse_effect("glow", &json!({ "radius": 1000 })).is_err());
    assert!(parse_effect("motion_blur", &json!({ "strength": 1.5 })).is_err());
    assert!(parse_effect("glitch", &json!({ "intensity": -0.1 })).is_err());
    assert!(parse_effect("radial_blur", &json!({ "strength": 20.0 })).is_err());
    assert!(parse_effect("glow", &json!({ "radius": "big" })).is_err());
}

#[test]
fn serde_uses_kind_and_params_tags() {
    let e: EffectRequest = serde_json::from_value(json!({
        "kind": "radial_blur",
        "params": { "center": { "x": 10.0, "y": 20.0 }, "strength": 0.3 }
    }))
    .unwrap();
    assert_eq!(
        e,
        EffectRequest::RadialBlur(RadialBlurParams {
            center: Some(Point::new(10.0, 20.0)),
            strength: 0.3,
            masked: false
        })
    );

    let v = serde_json::to_value(EffectRequest::Shake(ShakeParams { intensity: 3 })).unwrap();
    assert_eq!(v, json!({ "kind": "shake", "params": { "intensity": 3 } }));
}
