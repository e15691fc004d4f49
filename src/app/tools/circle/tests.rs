use super::super::common::testing::Harness;
use super::super::{ConstructionTool, ToolAction};
use super::*;
use crate::core::Vector;
use crate::geometry::{CircleData, EntityData, LineData};
use approx::assert_abs_diff_eq;

fn committed_circle(h: &Harness) -> CircleData {
    match h.entities().pop() {
        Some(EntityData::Circle(c)) => c,
        other => panic!("Kreis erwartet, erhalten: {:?}", other),
    }
}

// ── Kreis tangential durch 2 Punkte ─────────────────────────────────

#[test]
fn test_tan1_2p_circle_touches_and_passes_points() {
    let mut h = Harness::new();
    h.add(CircleData::new(Vector::ZERO, 5.0));
    let mut tool = CircleTan1_2PTool::new();
    assert!(tool.picks_entities());

    assert_eq!(h.click(&mut tool, 5.0, 0.5), ToolAction::Continue);
    assert_eq!(h.drawing.highlighted().len(), 1, "Kurve hervorgehoben");
    assert!(!tool.picks_entities());
    h.click(&mut tool, 0.0, 8.0);
    let action = h.click(&mut tool, 8.0, 0.0);
    if action == ToolAction::Continue {
        assert_eq!(tool.status, CircleTan1_2PStatus::SetCenter);
        assert!(tool.centers.len() >= 2);
        assert_eq!(h.click(&mut tool, 10.0, 10.0), ToolAction::Committed);
    } else {
        assert_eq!(action, ToolAction::Committed);
    }

    let circle = committed_circle(&h);
    let p0 = Vector::new(0.0, 8.0);
    let p1 = Vector::new(8.0, 0.0);
    assert_abs_diff_eq!(circle.center.distance_to(p0), circle.radius, epsilon = 1e-6);
    assert_abs_diff_eq!(circle.center.distance_to(p1), circle.radius, epsilon = 1e-6);
    let d = circle.center.distance_to(Vector::ZERO);
    let touches = (d - (5.0 + circle.radius)).abs() < 1e-6 || (d - (circle.radius - 5.0).abs()).abs() < 1e-6;
    assert!(touches, "Kreis berührt den Ausgangskreis");
    assert!(h.drawing.highlighted().is_empty(), "Hervorhebung aufgehoben");
    assert!(tool.is_initial());
}

#[test]
fn test_tan1_2p_ignores_empty_space_and_backs_out() {
    let mut h = Harness::new();
    h.add(LineData::new(Vector::ZERO, Vector::new(10.0, 0.0)));
    let mut tool = CircleTan1_2PTool::new();
    assert_eq!(h.click(&mut tool, 5.0, 30.0), ToolAction::Ignored);

    h.click(&mut tool, 5.0, 0.2);
    assert_eq!(h.back(&mut tool), ToolAction::Continue);
    assert!(h.drawing.highlighted().is_empty(), "Zurück hebt Auswahl auf");
    assert_eq!(h.back(&mut tool), ToolAction::Finished);
}

// ── Kreis in 3 Linien ───────────────────────────────────────────────

fn triangle(h: &mut Harness) {
    h.add(LineData::new(Vector::ZERO, Vector::new(10.0, 0.0)));
    h.add(LineData::new(Vector::ZERO, Vector::new(0.0, 10.0)));
    h.add(LineData::new(Vector::new(10.0, 0.0), Vector::new(0.0, 10.0)));
}

#[test]
fn test_inscribe_picks_incircle_near_cursor() {
    let mut h = Harness::new();
    triangle(&mut h);
    let mut tool = CircleInscribeTool::new();
    h.click(&mut tool, 5.0, 0.2);
    h.click(&mut tool, 0.2, 5.0);
    assert_eq!(tool.status(), CircleInscribeStatus::SetLine3);

    h.move_to(&mut tool, 5.2, 5.0);
    assert_eq!(tool.preview().entities.len(), 1, "Vorschau des Kreises");
    assert_eq!(h.click(&mut tool, 5.2, 5.0), ToolAction::Committed);

    let circle = committed_circle(&h);
    let r = 10.0 - 5.0 * 2f64.sqrt();
    assert_abs_diff_eq!(circle.radius, r, epsilon = 1e-9);
    assert_abs_diff_eq!(circle.center.x, r, epsilon = 1e-9);
    assert!(h.drawing.highlighted().is_empty());
    assert!(tool.is_initial());
}

#[test]
fn test_inscribe_rejects_same_line_twice() {
    let mut h = Harness::new();
    triangle(&mut h);
    let mut tool = CircleInscribeTool::new();
    h.click(&mut tool, 5.0, 0.2);
    assert_eq!(h.click(&mut tool, 6.0, 0.1), ToolAction::Ignored);
    assert_eq!(tool.picks.len(), 1);

    assert_eq!(h.back(&mut tool), ToolAction::Continue);
    assert!(h.drawing.highlighted().is_empty());
    assert_eq!(h.back(&mut tool), ToolAction::Finished);
}
