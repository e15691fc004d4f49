//! Handler für Undo/Redo ganzer Undo-Zyklen der Zeichnung.

use super::tool::refresh_preview;
use crate::app::AppState;

/// Macht den letzten Undo-Zyklus rückgängig, falls vorhanden.
pub fn undo(state: &mut AppState) {
    if state.drawing.undo() {
        log::info!("Undo ausgeführt");
    } else {
        log::debug!("Undo: nichts zu tun");
    }
    refresh_preview(state);
}

/// Stellt den zuletzt rückgängig gemachten Zyklus wieder her.
pub fn redo(state: &mut AppState) {
    if state.drawing.redo() {
        log::info!("Redo ausgeführt");
    } else {
        log::debug!("Redo: nichts zu tun");
    }
    refresh_preview(state);
}
