use super::super::common::testing::Harness;
use super::super::ToolAction;
use super::*;
use crate::geometry::EntityData;
use approx::assert_abs_diff_eq;

fn committed_polyline(h: &Harness) -> PolylineData {
    match h.entities().pop() {
        Some(EntityData::Polyline(p)) => p,
        other => panic!("Polylinie erwartet, erhalten: {:?}", other),
    }
}

#[test]
fn test_back_commits_open_polyline() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    h.click(&mut tool, 0.0, 0.0);
    h.click(&mut tool, 10.0, 0.0);
    h.click(&mut tool, 10.0, 10.0);
    assert!(h.entities().is_empty(), "erst beim Abschluss im Dokument");

    assert_eq!(h.back(&mut tool), ToolAction::Committed);
    let poly = committed_polyline(&h);
    assert_eq!(poly.vertex_count(), 3);
    assert!(!poly.closed);
    assert!(tool.is_initial());
    assert_eq!(h.back(&mut tool), ToolAction::Finished);
}

#[test]
fn test_back_without_segment_discards() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    h.click(&mut tool, 0.0, 0.0);
    assert_eq!(h.back(&mut tool), ToolAction::Continue);
    assert!(h.entities().is_empty());
    assert!(tool.is_initial());
}

#[test]
fn test_close_needs_three_vertices() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    h.click(&mut tool, 0.0, 0.0);
    h.click(&mut tool, 10.0, 0.0);
    assert_eq!(h.command(&mut tool, "close"), ToolAction::Ignored);
    assert_eq!(h.last_message(), Some(MSG_CANNOT_CLOSE));

    h.click(&mut tool, 10.0, 10.0);
    assert_eq!(h.command(&mut tool, "close"), ToolAction::Committed);
    let poly = committed_polyline(&h);
    assert!(poly.closed);
    assert_eq!(poly.segment_count(), 3);
    assert_eq!(h.relative_zero, Vector::ZERO);
}

#[test]
fn test_undo_removes_last_vertex() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    h.click(&mut tool, 0.0, 0.0);
    assert_eq!(h.command(&mut tool, "undo"), ToolAction::Ignored);
    assert_eq!(h.last_message(), Some(MSG_CANNOT_UNDO));

    h.click(&mut tool, 10.0, 0.0);
    h.click(&mut tool, 10.0, 10.0);
    assert_eq!(h.command(&mut tool, "undo"), ToolAction::Continue);
    assert_eq!(h.relative_zero, Vector::new(10.0, 0.0));
    let poly = tool.polyline.as_ref().expect("Polylinie im Aufbau");
    assert_eq!(poly.vertex_count(), 2);
}

#[test]
fn test_angle_mode_sets_bulge() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    assert_eq!(h.command(&mut tool, "ang"), ToolAction::UpdatePreview);
    assert_eq!(h.command(&mut tool, "angle 90"), ToolAction::UpdatePreview);
    h.click(&mut tool, 0.0, 0.0);
    h.click(&mut tool, 10.0, 0.0);
    h.back(&mut tool);

    let poly = committed_polyline(&h);
    assert_abs_diff_eq!(poly.bulges[0], (std::f64::consts::PI / 8.0).tan(), epsilon = 1e-12);
}

#[test]
fn test_tangential_segment_follows_previous() {
    let mut h = Harness::new();
    let mut tool = PolylineTool::new();
    h.click(&mut tool, 0.0, 0.0);
    h.click(&mut tool, 10.0, 0.0);
    h.command(&mut tool, "tangential");
    h.move_to(&mut tool, 20.0, 10.0);
    let preview = tool.preview();
    assert!(
        preview.entities.iter().any(|e| matches!(e, EntityData::Arc(_))),
        "Vorschau zeigt den tangentialen Bogen"
    );
    h.click(&mut tool, 20.0, 10.0);
    h.back(&mut tool);

    let poly = committed_polyline(&h);
    assert_abs_diff_eq!(poly.bulges[1], (std::f64::consts::PI / 4.0 / 2.0).tan(), epsilon = 1e-9);
}

#[test]
fn test_settings_roundtrip() {
    let mut settings = ToolSettings::default();
    settings.polyline_mode = SegmentMode::TanRad;
    settings.polyline_radius = 7.5;
    let tool = PolylineTool::from_settings(&settings);
    assert_eq!(tool.params.mode, SegmentMode::TanRad);

    let mut stored = ToolSettings::default();
    tool.store_settings(&mut stored);
    assert_eq!(stored.polyline_mode, SegmentMode::TanRad);
    assert_eq!(stored.polyline_radius, 7.5);
}
