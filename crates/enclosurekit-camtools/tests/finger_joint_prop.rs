use enclosurekit_camtools::{EdgeSpec, FingerJoint, JointRole, ParameterError};
use enclosurekit_core::{Direction, Vector};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn direction() -> impl Strategy<Value = (Direction, Direction)> {
    prop_oneof![
        Just((Direction::PosX, Direction::PosY)),
        Just((Direction::PosX, Direction::NegY)),
        Just((Direction::NegX, Direction::PosY)),
        Just((Direction::PosY, Direction::NegX)),
        Just((Direction::NegY, Direction::PosX)),
    ]
}

proptest! {
    #[test]
    fn edge_advances_by_its_length(
        count in 0u32..7,
        finger in 2.0f64..8.0,
        thickness in 1.0f64..5.0,
        spare in 0.1f64..20.0,
        (main, tab) in direction(),
    ) {
        // the adjusted edge loses two thicknesses and must stay positive
        let gap = 2.0 * thickness + spare;
        let length = count as f64 * finger + (count as f64 + 1.0) * gap;
        let joint = FingerJoint::new(thickness, finger).unwrap();
        let spec = EdgeSpec::jointed(length, count, main, tab);

        let path = joint.edge_path(&spec).unwrap();
        let expected = main.unit() * length;
        prop_assert!((path.displacement().dx - expected.dx).abs() < TOL);
        prop_assert!((path.displacement().dy - expected.dy).abs() < TOL);
        prop_assert!((path.length() - (length + 2.0 * count as f64 * thickness)).abs() < 1e-6);

        let adjusted = EdgeSpec::jointed(length - 2.0 * thickness, count, main, tab).adjusted();
        let path = joint.edge_path(&adjusted).unwrap();
        let expected = main.unit() * (length - 2.0 * thickness);
        prop_assert!((path.displacement() + -expected).length() < 1e-6);
    }

    #[test]
    fn adjusted_edge_interlocks_with_full_edge(
        count in 1u32..6,
        finger in 2.0f64..8.0,
        thickness in 1.0f64..5.0,
        spare in 0.1f64..20.0,
    ) {
        let gap = thickness + spare;
        let length = count as f64 * finger + (count as f64 + 1.0) * gap;
        let joint = FingerJoint::new(thickness, finger).unwrap();

        let side = EdgeSpec::jointed(length, count, Direction::PosX, Direction::NegY);
        let back = EdgeSpec::jointed(length - 2.0 * thickness, count, Direction::PosY, Direction::NegX)
            .adjusted();
        let side = joint.profile(&side).unwrap();
        let back = joint.profile(&back).unwrap();

        prop_assert!((side.span() - back.span()).abs() < 1e-9);
        prop_assert!(side.is_complement_of(JointRole::Notch, &back, JointRole::Tab));
        prop_assert!(!side.is_complement_of(JointRole::Tab, &back, JointRole::Tab));
    }
}

#[test]
fn straight_edge_is_one_run() {
    let joint = FingerJoint::new(3.0, 5.0).unwrap();
    let path = joint
        .edge_path(&EdgeSpec::straight(42.0, Direction::NegY))
        .unwrap();
    assert_eq!(path.ops().len(), 1);
    assert!((path.displacement() + -Vector::new(0.0, -42.0)).length() < TOL);
}

#[test]
fn adjusted_edge_shorter_than_both_thicknesses_is_rejected() {
    let joint = FingerJoint::new(3.0, 5.0).unwrap();
    // a 5 mm plain run between 3 mm walls leaves -1 mm for the adjusted edge
    let spec = EdgeSpec::jointed(5.0 - 2.0 * 3.0, 0, Direction::PosX, Direction::NegY).adjusted();
    assert_eq!(
        joint.edge_path(&spec).unwrap_err(),
        ParameterError::NonPositiveLength {
            name: "edge length",
            value: -1.0,
        }
    );

    let spec = EdgeSpec::jointed(2.0, 2, Direction::PosX, Direction::NegY).adjusted();
    assert!(matches!(
        joint.edge_path(&spec),
        Err(ParameterError::NonPositiveGap { count: 2, .. })
    ));
}
