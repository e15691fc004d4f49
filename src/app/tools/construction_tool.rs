//! ConstructionTool-Trait: Schnittstelle aller Konstruktions-Werkzeuge.

use crate::document::Document;
use crate::shared::{ToolPreview, ToolSettings};

use super::{PointerInput, ToolAction, ToolContext, ToolEvent, ToolKind};

/// Zustandsautomat eines Zeichenwerkzeugs.
///
/// Jedes Werkzeug verarbeitet Positions-, Koordinaten-, Befehls- und
/// Zurück-Ereignisse. Die Vorschau wird aus dem eigenen Zustand und der
/// zuletzt gemeldeten Cursor-Position berechnet und verändert nichts.
pub trait ConstructionTool {
    /// Art des Werkzeugs (Tag der geschlossenen Variantenmenge)
    fn kind(&self) -> ToolKind;

    /// Statustext für die aktuelle Phase (z.B. "Startpunkt wählen")
    fn status_text(&self) -> &str;

    /// Befindet sich das Werkzeug im Anfangszustand?
    fn is_initial(&self) -> bool;

    /// Wählt das Werkzeug in der aktuellen Phase Entitäten aus?
    /// Dann wird das Fangen ausgesetzt und die rohe Position genutzt.
    fn picks_entities(&self) -> bool {
        false
    }

    /// Cursor bewegt: Vorschau-Zustand nachführen.
    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction;

    /// Bestätigter Punkt (Klick oder eingegebene Koordinate).
    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction;

    /// Textbefehl (z.B. "undo", "close", "angle", Zahlenwert).
    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction;

    /// Rechtsklick / Abbruch: genau eine Phase zurück.
    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction;

    /// Vorschau-Geometrie für die zuletzt gemeldete Cursor-Position.
    fn preview(&self) -> ToolPreview;

    /// Zustand verwerfen (Escape / Werkzeug-Wechsel), Hervorhebungen lösen.
    fn reset(&mut self, doc: &mut dyn Document);

    /// Gemerkte Einstellungen zurückschreiben.
    fn store_settings(&self, _settings: &mut ToolSettings) {}

    /// Übergangsfunktion: verteilt ein Ereignis auf die Handler.
    fn on_event(&mut self, event: &ToolEvent, ctx: &mut ToolContext<'_>) -> ToolAction {
        match event {
            ToolEvent::Moved(pointer) => self.on_mouse_move(*pointer, ctx),
            ToolEvent::Coordinate(pointer) => self.on_coordinate(*pointer, ctx),
            ToolEvent::Command(text) => self.on_command(text, ctx),
            ToolEvent::Back => self.on_back(ctx),
        }
    }
}
