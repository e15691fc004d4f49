use crate::app::snapper::{Restriction, SnapFlag};
use crate::app::tools::ToolKind;
use crate::core::Vector;

/// App-Intent Events.
/// Intents sind Eingaben aus Zeichenfläche, Befehlszeile oder Skript ohne
/// direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Konstruktions-Werkzeug auswählen
    ToolSelected { kind: ToolKind },
    /// Cursor über der Zeichenfläche bewegt (Zeichnungskoordinaten)
    PointerMoved { point: Vector, shift: bool },
    /// Linksklick auf der Zeichenfläche
    PointerClicked { point: Vector, shift: bool },
    /// Koordinate eingegeben; `relative` bezieht sie auf den relativen Nullpunkt
    CoordinateTyped { point: Vector, relative: bool },
    /// Textbefehl in der Befehlszeile
    CommandTyped { text: String },
    /// Rechtsklick: eine Phase zurück
    BackRequested,
    /// Escape: aktives Werkzeug beenden
    EscapeRequested,
    /// Fang-Strategie ein-/ausschalten
    SnapFlagToggled { flag: SnapFlag, on: bool },
    /// Richtungs-Einschränkung wählen
    RestrictionSelected { restriction: Restriction },
    /// Rasterweite geändert
    GridChanged { spacing: Vector },
    /// Letzten Undo-Zyklus der Zeichnung rückgängig machen
    UndoRequested,
    /// Rückgängig gemachten Undo-Zyklus wiederherstellen
    RedoRequested,
}
