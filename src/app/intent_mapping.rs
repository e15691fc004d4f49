//! Übersetzt AppIntents in ausführbare AppCommands.

use super::{AppCommand, AppIntent, AppState};
use crate::core::Vector;

/// Mappt einen Intent auf null oder mehr Commands.
///
/// Das Mapping liest den Zustand nur: relative Koordinaten werden hier
/// gegen den relativen Nullpunkt aufgelöst, Zurück und Escape ohne aktives
/// Werkzeug erzeugen keine Commands.
pub(super) fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let has_tool = state.tool_manager.active_kind().is_some();

    match intent {
        AppIntent::ToolSelected { kind } => vec![AppCommand::ActivateTool { kind }],
        AppIntent::PointerMoved { point, shift } => vec![AppCommand::MovePointer { point, shift }],
        AppIntent::PointerClicked { point, shift } => {
            vec![AppCommand::ConfirmPointer { point, shift }]
        }
        AppIntent::CoordinateTyped { point, relative } => {
            if !point.valid {
                return vec![];
            }
            let point = if relative {
                let origin = if state.relative_zero.valid {
                    state.relative_zero
                } else {
                    Vector::ZERO
                };
                origin + point
            } else {
                point
            };
            vec![AppCommand::ApplyCoordinate { point }]
        }
        AppIntent::CommandTyped { text } => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return vec![];
            }
            vec![AppCommand::SendToolCommand { text }]
        }
        AppIntent::BackRequested if has_tool => vec![AppCommand::StepBack],
        AppIntent::EscapeRequested if has_tool => vec![AppCommand::FinishTool],
        AppIntent::BackRequested | AppIntent::EscapeRequested => vec![],
        AppIntent::SnapFlagToggled { flag, on } => vec![AppCommand::SetSnapFlag { flag, on }],
        AppIntent::RestrictionSelected { restriction } => {
            vec![AppCommand::SetRestriction { restriction }]
        }
        AppIntent::GridChanged { spacing } => vec![AppCommand::SetGridSpacing { spacing }],
        AppIntent::UndoRequested => vec![AppCommand::UndoDocument],
        AppIntent::RedoRequested => vec![AppCommand::RedoDocument],
    }
}
