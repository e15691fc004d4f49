use approx::assert_abs_diff_eq;
use cad_construct::core::{MAX_DISTANCE, TOLERANCE};
use cad_construct::geometry::{tan1_2p_centers, tan1_2p_closest, ArcData, CircleData};
use cad_construct::{EntityData, Vector};

#[test]
fn test_distance_is_symmetric_and_zero_on_self() {
    let points = [
        Vector::new(0.0, 0.0),
        Vector::new(3.0, -4.0),
        Vector::new(-1.5, 2.25),
        Vector::new(1e6, -1e-6),
    ];
    for a in points {
        assert_eq!(a.distance_to(a), 0.0);
        for b in points {
            assert_eq!(a.distance_to(b), b.distance_to(a));
        }
    }
}

#[test]
fn test_invalid_distance_is_sentinel() {
    let a = Vector::new(1.0, 2.0);
    let invalid = Vector::invalid();
    assert_eq!(a.distance_to(invalid), MAX_DISTANCE);
    assert_eq!(invalid.distance_to(a), MAX_DISTANCE);
    assert!(!invalid.distance_to(invalid).is_nan());
}

#[test]
fn test_bulge_arc_reproduces_chord_and_bulge() {
    let start = Vector::new(1.0, 2.0);
    let end = Vector::new(7.0, -1.0);
    for bulge in [0.25, 1.0, -0.5, 2.5, -3.0] {
        let arc = ArcData::from_2p_bulge(start, end, bulge).expect("Bogen erwartet");
        assert_abs_diff_eq!(arc.start_point().x, start.x, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.start_point().y, start.y, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.end_point().x, end.x, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.end_point().y, end.y, epsilon = 1e-9);
        assert_abs_diff_eq!((arc.angle_length() / 4.0).tan(), bulge.abs(), epsilon = 1e-9);
        assert_abs_diff_eq!(arc.bulge(), bulge, epsilon = 1e-9);
    }
}

#[test]
fn test_bulge_arc_rejects_degenerate_input() {
    let p = Vector::new(1.0, 1.0);
    assert!(ArcData::from_2p_bulge(p, Vector::new(5.0, 1.0), 0.0).is_none(), "Bulge 0 ist eine Strecke");
    assert!(ArcData::from_2p_bulge(p, p, 1.0).is_none(), "identische Punkte");
}

#[test]
fn test_tangent_circle_touches_base_and_passes_points() {
    let radius = 5.0;
    let base = CircleData::new(Vector::new(0.0, 0.0), radius);
    let curve = EntityData::Circle(base);
    let d = 2.0;
    let p0 = Vector::new(radius + d, 0.0);
    let p1 = Vector::new(0.0, radius + d);

    let centers = tan1_2p_centers(&curve, p0, p1);
    assert!(!centers.is_empty(), "mindestens eine Lösung erwartet");

    for center in centers.iter().filter(|c| c.valid) {
        let r = center.distance_to(p0);
        assert_abs_diff_eq!(center.distance_to(p1), r, epsilon = 1e-6);
        let to_base = center.distance_to(base.center);
        let tangent = (to_base - (radius + r)).abs() < 1e-6 || (to_base - (radius - r).abs()).abs() < 1e-6;
        assert!(tangent, "Lösung ({}, {}) berührt den Kreis nicht", center.x, center.y);
    }

    let circle = tan1_2p_closest(&centers, p0, Vector::new(5.0, 5.0)).expect("Kreis erwartet");
    assert!(circle.radius > TOLERANCE);
}
