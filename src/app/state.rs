//! Application State: zentrale Datenhaltung einer Konstruktions-Sitzung.

use super::snapper::Snapper;
use super::tools::ToolManager;
use super::CommandLog;
use crate::core::Vector;
use crate::document::Drawing;
use crate::shared::{EditorOptions, PreviewFrame};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// In-Memory-Zeichnung (Entitäten, Spatial-Index, Undo-Log)
    pub drawing: Drawing,
    /// Fang-Engine
    pub snapper: Snapper,
    /// Aktives Konstruktions-Werkzeug
    pub tool_manager: ToolManager,
    /// Laufzeit-Optionen inkl. gemerkter Werkzeug-Einstellungen
    pub options: EditorOptions,
    /// Bezugspunkt für relative Eingaben und Richtungs-Einschränkung
    pub relative_zero: Vector,
    /// Zuletzt berechnete Vorschau
    pub preview: PreviewFrame,
    /// Meldungen an den Benutzer (noch nicht abgeholt)
    pub messages: Vec<String>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            drawing: Drawing::new(),
            snapper: Snapper::from_options(&options),
            tool_manager: ToolManager::new(),
            options,
            relative_zero: Vector::invalid(),
            preview: PreviewFrame::default(),
            messages: Vec::new(),
            command_log: CommandLog::new(),
        }
    }

    /// Holt alle offenen Meldungen ab.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Statustext des aktiven Werkzeugs (leer ohne Werkzeug).
    pub fn status_text(&self) -> &str {
        use super::tools::ConstructionTool;
        self.tool_manager
            .active_tool()
            .map(|t| t.status_text())
            .unwrap_or("")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
