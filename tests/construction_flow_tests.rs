use cad_construct::app::tools::line_chain::MSG_CANNOT_CLOSE;
use cad_construct::app::tools::common::INVALID_EXPRESSION;
use cad_construct::geometry::LineData;
use cad_construct::{
    AppCommand, AppController, AppIntent, AppState, EntityData, EntityKind, Restriction, SnapFlag,
    ToolKind, Vector,
};

fn run(controller: &mut AppController, state: &mut AppState, intents: Vec<AppIntent>) {
    for intent in intents {
        controller
            .handle_intent(state, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }
}

fn tool(kind: ToolKind) -> AppIntent {
    AppIntent::ToolSelected { kind }
}

fn coord(x: f64, y: f64) -> AppIntent {
    AppIntent::CoordinateTyped {
        point: Vector::new(x, y),
        relative: false,
    }
}

fn click(x: f64, y: f64) -> AppIntent {
    AppIntent::PointerClicked {
        point: Vector::new(x, y),
        shift: false,
    }
}

fn cursor(x: f64, y: f64) -> AppIntent {
    AppIntent::PointerMoved {
        point: Vector::new(x, y),
        shift: false,
    }
}

fn cmd(text: &str) -> AppIntent {
    AppIntent::CommandTyped { text: text.into() }
}

fn snap(flag: SnapFlag, on: bool) -> AppIntent {
    AppIntent::SnapFlagToggled { flag, on }
}

fn geometry(state: &AppState) -> Vec<EntityData> {
    state.drawing.export().iter().map(|e| e.data.clone()).collect()
}

fn square_chain() -> Vec<AppIntent> {
    vec![
        tool(ToolKind::LineChain),
        coord(0.0, 0.0),
        coord(10.0, 0.0),
        coord(10.0, 10.0),
        coord(0.0, 10.0),
    ]
}

// ── Linienzug ───────────────────────────────────────────────────────

#[test]
fn test_chain_undo_redo_reproduces_geometry() {
    let mut controller = AppController::new();

    let mut plain = AppState::new();
    run(&mut controller, &mut plain, square_chain());

    let mut replayed = AppState::new();
    let mut intents = square_chain();
    intents.extend([cmd("undo"), cmd("redo")]);
    run(&mut controller, &mut replayed, intents);

    assert_eq!(plain.drawing.count(), 3);
    assert_eq!(geometry(&replayed), geometry(&plain), "Undo + Redo ändert die Geometrie nicht");
}

#[test]
fn test_chain_undo_removes_last_segment_only() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let mut intents = square_chain();
    intents.push(cmd("undo"));
    run(&mut controller, &mut state, intents);

    assert_eq!(state.drawing.count(), 2);
    assert_eq!(state.relative_zero, Vector::new(10.0, 10.0), "Nullpunkt folgt dem Undo");
}

#[test]
fn test_close_needs_three_points() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![tool(ToolKind::LineChain), coord(0.0, 0.0), coord(10.0, 0.0), cmd("close")],
    );
    assert_eq!(state.drawing.count(), 1, "kein Schließ-Segment bei 2 Punkten");
    assert_eq!(state.take_messages(), vec![MSG_CANNOT_CLOSE.to_string()]);

    run(&mut controller, &mut state, vec![coord(10.0, 10.0), cmd("close")]);
    assert_eq!(state.drawing.count(), 3);
    let last = geometry(&state).pop().expect("Schließ-Segment erwartet");
    assert_eq!(
        last,
        EntityData::Line(LineData::new(Vector::new(10.0, 10.0), Vector::new(0.0, 0.0)))
    );
    assert_eq!(state.status_text(), "Startpunkt wählen", "Linienzug ist beendet");
}

// ── Fangen ──────────────────────────────────────────────────────────

#[test]
fn test_endpoint_snap_and_raw_fallback() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![
            tool(ToolKind::LineChain),
            coord(0.0, 0.0),
            coord(10.0, 0.0),
            AppIntent::EscapeRequested,
            snap(SnapFlag::Free, false),
            snap(SnapFlag::Grid, false),
            cursor(9.6, 0.3),
        ],
    );
    assert_eq!(state.preview.snap_indicator, Vector::new(10.0, 0.0));

    run(&mut controller, &mut state, vec![cursor(5.0, 5.0)]);
    assert_eq!(state.preview.snap_indicator, Vector::new(5.0, 5.0), "außerhalb: rohe Position");
}

#[test]
fn test_orthogonal_restriction_corrects_clicked_point() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![
            snap(SnapFlag::Grid, false),
            snap(SnapFlag::Endpoint, false),
            AppIntent::RestrictionSelected {
                restriction: Restriction::Orthogonal,
            },
            tool(ToolKind::LineChain),
            coord(0.0, 0.0),
            click(3.0, 4.0),
            click(1.0, 2.0),
        ],
    );

    assert_eq!(
        geometry(&state),
        vec![
            EntityData::Line(LineData::new(Vector::new(0.0, 0.0), Vector::new(0.0, 4.0))),
            EntityData::Line(LineData::new(Vector::new(0.0, 4.0), Vector::new(0.0, 2.0))),
        ]
    );
    assert_eq!(state.options.snap_mode_bits >> 8, 3, "Einschränkung wird persistiert");
}

// ── Werkzeug-Lebenszyklus ───────────────────────────────────────────

#[test]
fn test_polygon_commits_one_undo_cycle() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![tool(ToolKind::Polygon), cmd("number 5"), coord(0.0, 0.0), coord(10.0, 0.0)],
    );
    assert_eq!(state.drawing.count(), 5);

    run(&mut controller, &mut state, vec![AppIntent::UndoRequested]);
    assert_eq!(state.drawing.count(), 0, "Undo entfernt das ganze Polygon");

    run(&mut controller, &mut state, vec![AppIntent::RedoRequested]);
    assert_eq!(state.drawing.count(), 5);
}

#[test]
fn test_escape_writes_back_tool_settings() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![tool(ToolKind::Polygon), cmd("number 6"), AppIntent::EscapeRequested],
    );
    assert!(state.tool_manager.active_kind().is_none());
    assert_eq!(state.options.tools.polygon_corners, 6);

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert!(matches!(last, AppCommand::FinishTool));
}

#[test]
fn test_invalid_expression_is_reported_and_state_kept() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(&mut controller, &mut state, vec![tool(ToolKind::Polygon), cmd("number 2+"), AppIntent::EscapeRequested]);

    assert_eq!(state.take_messages(), vec![INVALID_EXPRESSION.to_string()]);
    assert_eq!(state.options.tools.polygon_corners, 3);
}

#[test]
fn test_back_in_initial_state_finishes_tool() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(&mut controller, &mut state, vec![tool(ToolKind::Arc3P), coord(0.0, 0.0), AppIntent::BackRequested]);
    assert_eq!(state.tool_manager.active_kind(), Some(ToolKind::Arc3P), "erst eine Phase zurück");

    run(&mut controller, &mut state, vec![AppIntent::BackRequested]);
    assert!(state.tool_manager.active_kind().is_none());
}

#[test]
fn test_round_trims_chain_corner_and_undo_restores_lines() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    run(
        &mut controller,
        &mut state,
        vec![
            tool(ToolKind::LineChain),
            coord(0.0, 10.0),
            coord(0.0, 0.0),
            coord(10.0, 0.0),
            tool(ToolKind::Round),
            click(0.5, 6.0),
            click(6.0, 0.5),
        ],
    );

    let kinds: Vec<EntityKind> = state.drawing.export().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![EntityKind::Line, EntityKind::Line, EntityKind::Arc]);
    assert!(state.preview.highlighted.is_empty(), "Hervorhebung nach Abschluss gelöst");

    run(&mut controller, &mut state, vec![AppIntent::UndoRequested]);
    assert_eq!(
        geometry(&state),
        vec![
            EntityData::Line(LineData::new(Vector::new(0.0, 10.0), Vector::new(0.0, 0.0))),
            EntityData::Line(LineData::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0))),
        ]
    );
}

#[test]
fn test_invalid_grid_spacing_is_an_error() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let result = controller.handle_intent(
        &mut state,
        AppIntent::GridChanged {
            spacing: Vector::new(0.0, 5.0),
        },
    );
    assert!(result.is_err());
    assert_eq!(state.options.grid_spacing_x, 10.0);
}
