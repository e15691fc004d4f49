//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Eingabe-Events und Werkzeug-Aufrufe auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Werkzeuge ===
            AppCommand::ActivateTool { kind } => handlers::tool::activate(state, kind),
            AppCommand::FinishTool => handlers::tool::finish(state),
            AppCommand::MovePointer { point, shift } => {
                handlers::tool::pointer_moved(state, point, shift)
            }
            AppCommand::ConfirmPointer { point, shift } => {
                handlers::tool::pointer_confirmed(state, point, shift)
            }
            AppCommand::ApplyCoordinate { point } => handlers::tool::coordinate(state, point),
            AppCommand::SendToolCommand { text } => handlers::tool::command(state, &text),
            AppCommand::StepBack => handlers::tool::back(state),

            // === Fangen ===
            AppCommand::SetSnapFlag { flag, on } => handlers::snap::set_flag(state, flag, on),
            AppCommand::SetRestriction { restriction } => {
                handlers::snap::set_restriction(state, restriction)
            }
            AppCommand::SetGridSpacing { spacing } => handlers::snap::set_grid_spacing(state, spacing)?,

            // === Undo/Redo ===
            AppCommand::UndoDocument => handlers::history::undo(state),
            AppCommand::RedoDocument => handlers::history::redo(state),
        }

        Ok(())
    }
}
