use super::*;

const ALL: [Ease; 3] = [
    Ease::Ease,
    Ease::EaseOut,
    Ease::CubicBezier(0.42, 0.0, 1.0, 1.0),
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let mut prev = 0.0;
        for i in 1..20 {
            let v = ease.apply(f64::from(i) / 20.0);
            assert!(v > prev, "{ease:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn ease_out_leads_linear() {
    for i in 1..10 {
        let t = f64::from(i) / 10.0;
        assert!(Ease::EaseOut.apply(t) > t);
    }
}

#[test]
fn symmetric_curve_hits_half_at_midpoint() {
    let v = Ease::CubicBezier(0.42, 0.0, 0.58, 1.0).apply(0.5);
    assert!((v - 0.5).abs() < 1e-6);
    assert!((Ease::CubicBezier(0.0, 0.0, 1.0, 1.0).apply(0.3) - 0.3).abs() < 1e-6);
}

#[test]
fn css_names() {
    assert_eq!(Ease::EaseOut.css(), "ease-out");
    assert_eq!(Ease::Ease.css(), "cubic-bezier(0.25,0.1,0.25,1)");
    assert_eq!(
        Ease::CubicBezier(0.25, 0.1, 0.25, 1.0).css(),
        "cubic-bezier(0.25,0.1,0.25,1)"
    );
}
