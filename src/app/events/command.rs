use crate::app::snapper::{Restriction, SnapFlag};
use crate::app::tools::ToolKind;
use crate::core::Vector;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Werkzeug aktivieren (ein vorher aktives wird beendet)
    ActivateTool { kind: ToolKind },
    /// Aktives Werkzeug beenden
    FinishTool,
    /// Cursor-Position fangen und an das Werkzeug melden
    MovePointer { point: Vector, shift: bool },
    /// Gefangene Klick-Position als Punkt bestätigen
    ConfirmPointer { point: Vector, shift: bool },
    /// Absolute Koordinate ohne Fangen bestätigen
    ApplyCoordinate { point: Vector },
    /// Textbefehl an das aktive Werkzeug
    SendToolCommand { text: String },
    /// Aktives Werkzeug eine Phase zurück
    StepBack,
    /// Fang-Strategie setzen
    SetSnapFlag { flag: SnapFlag, on: bool },
    /// Richtungs-Einschränkung setzen
    SetRestriction { restriction: Restriction },
    /// Rasterweite setzen
    SetGridSpacing { spacing: Vector },
    /// Dokument-Undo
    UndoDocument,
    /// Dokument-Redo
    RedoDocument,
}
