use enclosurekit_core::{Path, Point, Transform, Vector};
use proptest::prelude::*;

fn close(a: Point, b: Point) -> bool {
    a.approx_eq(b, 1e-6)
}

fn arb_transform() -> impl Strategy<Value = Transform> {
    prop_oneof![
        (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(dx, dy)| Transform::translate(dx, dy)),
        (-360.0f64..360.0).prop_map(Transform::rotate),
    ]
}

proptest! {
    #[test]
    fn composition_is_associative(
        a in arb_transform(),
        b in arb_transform(),
        c in arb_transform(),
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
    ) {
        let p = Point::new(x, y);
        let left = a.clone().then(b.clone()).then(c.clone());
        let right = a.then(b.then(c));
        prop_assert!(close(left.apply(p), right.apply(p)));
    }

    #[test]
    fn nested_application_matches_concatenation(
        parent in arb_transform(),
        child in arb_transform(),
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
    ) {
        let p = Point::new(x, y);
        let nested = parent.apply(child.apply(p));
        let flat = parent.then(child).apply(p);
        prop_assert!(close(nested, flat));
    }

    #[test]
    fn rectangle_walk_closes(w in 0.5f64..200.0, h in 0.5f64..200.0, x in -10.0f64..10.0) {
        let mut path = Path::starting_at(Point::new(x, 0.0));
        path.line_by(Vector::new(0.0, h))
            .horz_by(w)
            .vert_by(-h)
            .horz_by(-w);
        prop_assert!(path.is_closed());
        prop_assert!((path.length() - 2.0 * (w + h)).abs() < 1e-9);
    }
}

#[test]
fn rotation_keeps_distance_from_origin() {
    let p = Point::new(3.0, 4.0);
    for deg in [0.0, 30.0, 90.0, 135.0, -90.0, 270.0] {
        let q = Transform::rotate(deg).apply(p);
        assert!((q.distance_to(Point::ORIGIN) - 5.0).abs() < 1e-9);
    }
}
