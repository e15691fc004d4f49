use super::*;
use crate::document::{DocumentSink, Drawing};
use crate::geometry::{CircleData, LineData, PolylineData};
use approx::assert_abs_diff_eq;

fn only(flag: SnapFlag) -> SnapMode {
    let mut mode = SnapMode::default();
    mode.set(flag, true);
    mode
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> LineData {
    LineData::new(Vector::new(x1, y1), Vector::new(x2, y2))
}

fn drawing_with(entities: Vec<crate::geometry::EntityData>) -> Drawing {
    let mut drawing = Drawing::new();
    for e in entities {
        drawing.add_entity(e);
    }
    drawing
}

// ── Bitfeld ─────────────────────────────────────────────────────────

#[test]
fn test_default_bits_enable_free_grid_endpoint() {
    let mode = SnapMode::from_bits(crate::shared::options::SNAP_MODE_BITS);
    assert!(mode.free && mode.grid && mode.endpoint);
    assert!(!mode.middle && !mode.center && !mode.intersection);
    assert_eq!(mode.restriction, Restriction::Nothing);
}

#[test]
fn test_bits_layout_msb_to_lsb() {
    let mut mode = only(SnapFlag::Intersection);
    mode.restriction = Restriction::Orthogonal;
    assert_eq!(mode.to_bits(), 0b11_0000_0001);

    let mode = SnapMode::from_bits(0b01_0001_0100);
    assert_eq!(mode.restriction, Restriction::Horizontal);
    assert!(mode.middle, "Bit 4 ist Mitte");
    assert!(mode.center, "Bit 2 ist Zentrum");
    assert!(!mode.on_entity);
    assert_eq!(mode.to_bits(), 0b01_0001_0100);
}

// ── Auflösung ───────────────────────────────────────────────────────

#[test]
fn test_endpoint_within_range_wins() {
    let drawing = drawing_with(vec![line(0.0, 0.0, 10.0, 0.0).into()]);
    let mut snapper = Snapper::new(only(SnapFlag::Endpoint), Vector::new(10.0, 10.0));

    let result = snapper.resolve(Vector::new(9.6, 0.3), Vector::invalid(), &drawing);
    assert_eq!(result.snapped, Vector::new(10.0, 0.0));
    assert_eq!(result.raw, Vector::new(9.6, 0.3));
}

#[test]
fn test_far_cursor_falls_back_to_raw_position() {
    let drawing = drawing_with(vec![line(0.0, 0.0, 10.0, 0.0).into()]);
    let mut snapper = Snapper::new(only(SnapFlag::Endpoint), Vector::new(10.0, 10.0));

    let result = snapper.resolve(Vector::new(5.0, 5.0), Vector::invalid(), &drawing);
    assert_eq!(result.snapped, Vector::new(5.0, 5.0));
}

#[test]
fn test_strategies_compete_on_distance() {
    // Endpunkt wird zuerst geprüft, das Zentrum liegt aber näher
    let drawing = drawing_with(vec![
        line(0.0, 0.0, -10.0, 0.0).into(),
        CircleData::new(Vector::new(3.0, 0.0), 1.0).into(),
    ]);
    let mut mode = only(SnapFlag::Endpoint);
    mode.center = true;
    let mut snapper = Snapper::new(mode, Vector::new(10.0, 10.0));

    let result = snapper.resolve(Vector::new(2.5, 0.0), Vector::invalid(), &drawing);
    assert_eq!(result.snapped, Vector::new(3.0, 0.0));
}

#[test]
fn test_grid_snaps_to_nearest_node() {
    let drawing = Drawing::new();
    let mut snapper = Snapper::new(only(SnapFlag::Grid), Vector::new(10.0, 10.0));

    let result = snapper.resolve(Vector::new(12.4, 7.9), Vector::invalid(), &drawing);
    assert_eq!(result.snapped, Vector::new(10.0, 10.0));
}

#[test]
fn test_free_caps_pull_to_half_grid() {
    let drawing = drawing_with(vec![line(0.0, 0.0, 20.0, 0.0).into()]);
    let mut snapper = Snapper::new(only(SnapFlag::Endpoint), Vector::new(10.0, 10.0));
    snapper.snap_range = Some(20.0);

    let cursor = Vector::new(6.5, 0.0);
    let pulled = snapper.resolve(cursor, Vector::invalid(), &drawing);
    assert_eq!(pulled.snapped, Vector::new(0.0, 0.0), "ohne Frei-Fang wird gezogen");

    snapper.set_flag(SnapFlag::Free, true);
    let free = snapper.resolve(cursor, Vector::invalid(), &drawing);
    assert_eq!(free.snapped, cursor, "Versatz > halbe Rasterweite");
}

#[test]
fn test_on_entity_and_intersection() {
    let drawing = drawing_with(vec![
        line(0.0, 0.0, 10.0, 10.0).into(),
        line(0.0, 10.0, 10.0, 0.0).into(),
    ]);
    let mut snapper = Snapper::new(only(SnapFlag::Intersection), Vector::new(10.0, 10.0));
    let result = snapper.resolve(Vector::new(5.3, 4.8), Vector::invalid(), &drawing);
    assert_abs_diff_eq!(result.snapped.x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.snapped.y, 5.0, epsilon = 1e-9);

    snapper.set_mode(only(SnapFlag::OnEntity));
    let result = snapper.resolve(Vector::new(2.0, 3.0), Vector::invalid(), &drawing);
    assert_abs_diff_eq!(result.snapped.x, 2.5, epsilon = 1e-9);
    assert_abs_diff_eq!(result.snapped.y, 2.5, epsilon = 1e-9);
}

#[test]
fn test_middle_point_with_divisions() {
    let drawing = drawing_with(vec![line(0.0, 0.0, 12.0, 0.0).into()]);
    let mut snapper = Snapper::new(only(SnapFlag::Middle), Vector::new(10.0, 10.0));
    let result = snapper.resolve(Vector::new(5.5, 0.5), Vector::invalid(), &drawing);
    assert_abs_diff_eq!(result.snapped.x, 6.0, epsilon = 1e-9);

    snapper.middle_divisions = 3;
    let result = snapper.resolve(Vector::new(3.4, 0.5), Vector::invalid(), &drawing);
    assert_abs_diff_eq!(result.snapped.x, 3.0, epsilon = 1e-9);
}

// ── Einschränkung ───────────────────────────────────────────────────

#[test]
fn test_orthogonal_restriction_picks_closer_projection() {
    let drawing = Drawing::new();
    let mut snapper = Snapper::new(SnapMode::default(), Vector::new(10.0, 10.0));
    snapper.set_restriction(Restriction::Orthogonal);

    let result = snapper.resolve(Vector::new(3.0, 4.0), Vector::ZERO, &drawing);
    assert_eq!(result.snapped, Vector::new(0.0, 4.0));

    let result = snapper.resolve(Vector::new(4.0, 3.0), Vector::ZERO, &drawing);
    assert_eq!(result.snapped, Vector::new(4.0, 0.0));
}

#[test]
fn test_horizontal_and_vertical_restriction() {
    let snapper = {
        let mut s = Snapper::new(SnapMode::default(), Vector::new(10.0, 10.0));
        s.set_restriction(Restriction::Horizontal);
        s
    };
    let rz = Vector::new(1.0, 2.0);
    let spot = Vector::new(5.0, 7.0);
    assert_eq!(snapper.restrict(spot, spot, rz), Vector::new(5.0, 2.0));

    let mut snapper = snapper;
    snapper.set_restriction(Restriction::Vertical);
    assert_eq!(snapper.restrict(spot, spot, rz), Vector::new(1.0, 7.0));

    assert_eq!(snapper.restrict(spot, spot, Vector::invalid()), spot, "ohne Nullpunkt keine Einschränkung");
}

#[test]
fn test_suspended_snapper_returns_raw_and_hides_indicator() {
    let drawing = drawing_with(vec![line(0.0, 0.0, 10.0, 0.0).into()]);
    let mut snapper = Snapper::new(only(SnapFlag::Endpoint), Vector::new(10.0, 10.0));
    snapper.resolve(Vector::new(9.6, 0.3), Vector::invalid(), &drawing);
    assert!(snapper.indicator().is_some());

    snapper.suspend();
    let result = snapper.resolve(Vector::new(9.6, 0.3), Vector::invalid(), &drawing);
    assert_eq!(result.snapped, Vector::new(9.6, 0.3));
    assert!(snapper.indicator().is_none());

    snapper.resume();
    assert!(!snapper.is_suspended());
}

// ── Entitäts-Auswahl ────────────────────────────────────────────────

#[test]
fn test_catch_entity_respects_range_and_flags() {
    let mut drawing = Drawing::new();
    let id = drawing.add_entity(line(0.0, 0.0, 10.0, 0.0).into());
    let snapper = Snapper::new(SnapMode::default(), Vector::new(10.0, 10.0));

    let hit = snapper
        .catch_entity(Vector::new(5.0, 1.0), ResolveLevel::None, &drawing)
        .expect("Linie erwartet");
    assert_eq!(hit.id, id);

    assert!(
        snapper.catch_entity(Vector::new(5.0, 8.0), ResolveLevel::None, &drawing).is_none(),
        "außerhalb des Fangradius"
    );

    drawing.set_ignore_on_modification(id, true);
    assert!(snapper.catch_entity(Vector::new(5.0, 1.0), ResolveLevel::None, &drawing).is_none());

    drawing.set_ignore_on_modification(id, false);
    drawing.set_visible(id, false);
    assert!(snapper.catch_entity(Vector::new(5.0, 1.0), ResolveLevel::None, &drawing).is_none());
}

#[test]
fn test_catch_entity_of_kinds_sees_polyline_segments() {
    let mut poly = PolylineData::new(Vector::new(0.0, 0.0));
    poly.add_vertex(Vector::new(10.0, 0.0), 0.0);
    poly.add_vertex(Vector::new(10.0, 10.0), 0.0);
    let mut drawing = Drawing::new();
    let poly_id = drawing.add_entity(poly.into());
    drawing.add_entity(CircleData::new(Vector::new(30.0, 0.0), 2.0).into());
    let snapper = Snapper::new(SnapMode::default(), Vector::new(10.0, 10.0));

    let hit = snapper
        .catch_entity_of_kinds(Vector::new(9.0, 5.0), &[EntityKind::Line], ResolveLevel::All, &drawing)
        .expect("Polylinien-Segment erwartet");
    assert_eq!(hit.id, poly_id);
    assert_eq!(hit.segment, Some(1));
    assert_eq!(hit.container, Some(EntityKind::Polyline));

    assert!(snapper
        .catch_entity_of_kinds(Vector::new(9.0, 5.0), &[EntityKind::Circle], ResolveLevel::All, &drawing)
        .is_none());
}
