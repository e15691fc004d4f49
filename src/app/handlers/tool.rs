//! Handler für das aktive Konstruktions-Werkzeug.
//!
//! Zeiger-Ereignisse werden zuerst über die Fang-Engine aufgelöst (bei
//! Entitäts-Auswahl ausgesetzt), dann als `ToolEvent` an das Werkzeug
//! gereicht. Nach jedem Ereignis wird die Vorschau neu aufgebaut.

use crate::app::tools::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolEvent, ToolKind};
use crate::app::AppState;
use crate::core::Vector;
use crate::shared::PreviewFrame;

/// Aktiviert ein Werkzeug; ein vorher aktives wird beendet.
pub fn activate(state: &mut AppState, kind: ToolKind) {
    state
        .tool_manager
        .set_active(kind, &mut state.options.tools, &mut state.drawing);
    state.snapper.resume();
    refresh_preview(state);
}

/// Beendet das aktive Werkzeug (Escape).
pub fn finish(state: &mut AppState) {
    state
        .tool_manager
        .finish(&mut state.options.tools, &mut state.drawing);
    state.snapper.resume();
    state.snapper.clear_indicator();
    refresh_preview(state);
}

/// Cursor bewegt: fangen und Vorschau nachführen.
pub fn pointer_moved(state: &mut AppState, point: Vector, shift: bool) {
    let pointer = resolve_pointer(state, point, shift);
    dispatch(state, ToolEvent::Moved(pointer));
}

/// Klick: gefangene Position bestätigen.
pub fn pointer_confirmed(state: &mut AppState, point: Vector, shift: bool) {
    let pointer = resolve_pointer(state, point, shift);
    dispatch(state, ToolEvent::Coordinate(pointer));
}

/// Eingegebene Koordinate (ohne Fangen) bestätigen.
pub fn coordinate(state: &mut AppState, point: Vector) {
    dispatch(state, ToolEvent::Coordinate(PointerInput::typed(point)));
}

/// Textbefehl an das aktive Werkzeug.
pub fn command(state: &mut AppState, text: &str) {
    dispatch(state, ToolEvent::Command(text.to_string()));
}

/// Rechtsklick: eine Phase zurück.
pub fn back(state: &mut AppState) {
    dispatch(state, ToolEvent::Back);
}

/// Löst eine Cursor-Position über die Fang-Engine auf.
fn resolve_pointer(state: &mut AppState, point: Vector, shift: bool) -> PointerInput {
    let picking = state
        .tool_manager
        .active_tool()
        .is_some_and(|t| t.picks_entities());
    if picking {
        state.snapper.suspend();
    } else {
        state.snapper.resume();
    }
    let result = state
        .snapper
        .resolve(point, state.relative_zero, &state.drawing);
    PointerInput {
        snapped: result.snapped,
        raw: result.raw,
        shift,
    }
}

/// Reicht ein Ereignis an das aktive Werkzeug und wertet die Aktion aus.
fn dispatch(state: &mut AppState, event: ToolEvent) {
    let Some(tool) = state.tool_manager.active_tool_mut() else {
        log::debug!("Kein aktives Werkzeug, Ereignis verworfen: {:?}", event);
        refresh_preview(state);
        return;
    };

    let action = {
        let mut ctx = ToolContext::new(
            &mut state.drawing,
            &state.snapper,
            &mut state.relative_zero,
            &mut state.messages,
        );
        tool.on_event(&event, &mut ctx)
    };

    match action {
        ToolAction::Finished => {
            state
                .tool_manager
                .finish(&mut state.options.tools, &mut state.drawing);
            state.snapper.resume();
        }
        ToolAction::Ignored => log::debug!("Eingabe abgelehnt: {:?}", event),
        ToolAction::Committed | ToolAction::Continue | ToolAction::UpdatePreview => {}
    }
    refresh_preview(state);
}

/// Baut die Vorschau aus Werkzeug, Hervorhebungen und Fang-Indikator neu.
pub(crate) fn refresh_preview(state: &mut AppState) {
    let preview = state
        .tool_manager
        .active_tool()
        .map(|t| t.preview())
        .unwrap_or_default();
    state.preview = PreviewFrame {
        preview,
        highlighted: state.drawing.highlighted(),
        snap_indicator: state
            .snapper
            .indicator()
            .map(|i| i.spot)
            .unwrap_or_default(),
    };
}
