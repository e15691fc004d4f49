//! Konstruktions-Werkzeuge als geschlossene Menge von Zustandsautomaten.
//!
//! Jedes Werkzeug implementiert den `ConstructionTool`-Trait. Das aktive
//! Werkzeug lebt als `Tool`-Variante im `ToolManager`; die Verteilung auf
//! die Varianten erfolgt per `match` (keine offene Vererbung). Abschlüsse
//! laufen zentral über `ToolContext::commit`.

/// Bogen durch drei Punkte.
pub mod arc;
/// Kreis-Werkzeuge (tangential, einbeschrieben).
pub mod circle;
/// Gemeinsame Hilfsfunktionen für Werkzeuge.
pub mod common;
/// ConstructionTool-Trait: Schnittstelle für alle Werkzeuge.
mod construction_tool;
/// Abrunden und Fasen zweier Linien.
pub mod corner;
/// Ellipsen-Werkzeuge (Achsen, Brennpunkte, Zentrum + 3 Punkte, einbeschrieben).
pub mod ellipse;
/// Linie mit Winkel und Länge.
pub mod line_angle;
/// Linienzug mit Undo/Redo/Schließen.
pub mod line_chain;
/// Regelmäßiges Polygon (Zentrum + Ecke).
pub mod polygon;
/// Polylinie mit Segment-Modi.
pub mod polyline;

pub use construction_tool::ConstructionTool;

use crate::app::snapper::Snapper;
use crate::core::Vector;
use crate::document::{Document, EntityHit, EntityId, ResolveLevel};
use crate::geometry::{EntityData, EntityKind};
use crate::shared::{ToolPreview, ToolSettings};

// ── Ereignisse & Aktionen ────────────────────────────────────────────

/// Zeiger-Eingabe: gefangene und rohe Position plus Modifikator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub snapped: Vector,
    pub raw: Vector,
    /// Shift gedrückt (Winkelraster beim Linienzug)
    pub shift: bool,
}

impl PointerInput {
    /// Eingegebene Koordinate (kein Fangen, keine Modifikatoren).
    pub fn typed(point: Vector) -> Self {
        Self {
            snapped: point,
            raw: point,
            shift: false,
        }
    }
}

/// Eingabe-Ereignis für ein Werkzeug.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    /// Cursor bewegt
    Moved(PointerInput),
    /// Punkt bestätigt (Klick oder Koordinaten-Eingabe)
    Coordinate(PointerInput),
    /// Textbefehl
    Command(String),
    /// Rechtsklick / Abbruch
    Back,
}

/// Rückgabe der Ereignis-Handler: steuert den Werkzeug-Flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Eingabe registriert, weitere Eingabe nötig
    Continue,
    /// Nur die Vorschau hat sich geändert
    UpdatePreview,
    /// Entität(en) ins Dokument übernommen
    Committed,
    /// Eingabe abgelehnt, Zustand unverändert
    Ignored,
    /// Zurück im Anfangszustand verlassen: Werkzeug beenden
    Finished,
}

// ── Werkzeug-Kontext ─────────────────────────────────────────────────

/// Kollaborateure, die ein Werkzeug während eines Ereignisses nutzt.
pub struct ToolContext<'a> {
    pub doc: &'a mut dyn Document,
    pub snapper: &'a Snapper,
    pub relative_zero: &'a mut Vector,
    pub messages: &'a mut Vec<String>,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        doc: &'a mut dyn Document,
        snapper: &'a Snapper,
        relative_zero: &'a mut Vector,
        messages: &'a mut Vec<String>,
    ) -> Self {
        Self {
            doc,
            snapper,
            relative_zero,
            messages,
        }
    }

    /// Meldung an den Benutzer.
    pub fn message(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("Meldung: {}", text);
        self.messages.push(text);
    }

    pub fn move_relative_zero(&mut self, point: Vector) {
        if point.valid {
            *self.relative_zero = point;
        }
    }

    /// Nächste auswählbare Entität der Arten `kinds` (leer = alle).
    pub fn catch_entity(&self, coord: Vector, kinds: &[EntityKind], level: ResolveLevel) -> Option<EntityHit> {
        self.snapper.catch_entity_of_kinds(coord, kinds, level, &*self.doc)
    }

    /// Übernimmt neue Entitäten und entfernt ersetzte in einem Undo-Zyklus.
    pub fn commit(&mut self, entities: Vec<EntityData>, replaced: &[EntityId]) -> Vec<EntityId> {
        let ids: Vec<EntityId> = entities.into_iter().map(|e| self.doc.add_entity(e)).collect();
        self.doc.start_undo_cycle();
        for id in &ids {
            self.doc.add_undoable(*id);
        }
        for id in replaced {
            self.doc.set_highlighted(*id, false);
            if self.doc.remove_entity(*id) {
                self.doc.add_undoable(*id);
            }
        }
        self.doc.end_undo_cycle();
        log::info!("{} Entität(en) übernommen, {} ersetzt", ids.len(), replaced.len());
        ids
    }
}

// ── Werkzeug-Arten ───────────────────────────────────────────────────

/// Tag der geschlossenen Werkzeugmenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    LineChain,
    LineAngle,
    Polyline,
    Polygon,
    Arc3P,
    CircleTan1_2P,
    CircleInscribe,
    EllipseAxis,
    EllipseFociPoint,
    EllipseCenter3Points,
    EllipseInscribe,
    Round,
    Bevel,
}

impl ToolKind {
    pub const ALL: [ToolKind; 13] = [
        ToolKind::LineChain,
        ToolKind::LineAngle,
        ToolKind::Polyline,
        ToolKind::Polygon,
        ToolKind::Arc3P,
        ToolKind::CircleTan1_2P,
        ToolKind::CircleInscribe,
        ToolKind::EllipseAxis,
        ToolKind::EllipseFociPoint,
        ToolKind::EllipseCenter3Points,
        ToolKind::EllipseInscribe,
        ToolKind::Round,
        ToolKind::Bevel,
    ];

    /// Kurzname (Skript-Befehl `tool <name>`).
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::LineChain => "line",
            ToolKind::LineAngle => "line_angle",
            ToolKind::Polyline => "polyline",
            ToolKind::Polygon => "polygon",
            ToolKind::Arc3P => "arc3p",
            ToolKind::CircleTan1_2P => "circle_tan1_2p",
            ToolKind::CircleInscribe => "circle_inscribe",
            ToolKind::EllipseAxis => "ellipse_axis",
            ToolKind::EllipseFociPoint => "ellipse_foci",
            ToolKind::EllipseCenter3Points => "ellipse_center3p",
            ToolKind::EllipseInscribe => "ellipse_inscribe",
            ToolKind::Round => "round",
            ToolKind::Bevel => "bevel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Anzeigename
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::LineChain => "Linienzug",
            ToolKind::LineAngle => "Linie mit Winkel",
            ToolKind::Polyline => "Polylinie",
            ToolKind::Polygon => "Polygon (Zentrum, Ecke)",
            ToolKind::Arc3P => "Bogen durch 3 Punkte",
            ToolKind::CircleTan1_2P => "Kreis tangential, 2 Punkte",
            ToolKind::CircleInscribe => "Kreis in 3 Linien",
            ToolKind::EllipseAxis => "Ellipse (Achsen)",
            ToolKind::EllipseFociPoint => "Ellipse (Brennpunkte, Punkt)",
            ToolKind::EllipseCenter3Points => "Ellipse (Zentrum, 3 Punkte)",
            ToolKind::EllipseInscribe => "Ellipse in 4 Linien",
            ToolKind::Round => "Abrunden",
            ToolKind::Bevel => "Fasen",
        }
    }
}

// ── Geschlossene Werkzeugmenge ───────────────────────────────────────

/// Aktives Werkzeug: eine Variante pro Werkzeug-Art.
pub enum Tool {
    LineChain(line_chain::LineChainTool),
    LineAngle(line_angle::LineAngleTool),
    Polyline(polyline::PolylineTool),
    Polygon(polygon::PolygonTool),
    Arc3P(arc::Arc3PTool),
    CircleTan1_2P(circle::CircleTan1_2PTool),
    CircleInscribe(circle::CircleInscribeTool),
    EllipseAxis(ellipse::EllipseAxisTool),
    EllipseFociPoint(ellipse::EllipseFociPointTool),
    EllipseCenter3Points(ellipse::EllipseCenter3PointsTool),
    EllipseInscribe(ellipse::EllipseInscribeTool),
    Round(corner::RoundTool),
    Bevel(corner::BevelTool),
}

/// Verteilt einen Aufruf auf die konkrete Variante.
macro_rules! dispatch {
    ($tool:expr, $t:ident => $body:expr) => {
        match $tool {
            Tool::LineChain($t) => $body,
            Tool::LineAngle($t) => $body,
            Tool::Polyline($t) => $body,
            Tool::Polygon($t) => $body,
            Tool::Arc3P($t) => $body,
            Tool::CircleTan1_2P($t) => $body,
            Tool::CircleInscribe($t) => $body,
            Tool::EllipseAxis($t) => $body,
            Tool::EllipseFociPoint($t) => $body,
            Tool::EllipseCenter3Points($t) => $body,
            Tool::EllipseInscribe($t) => $body,
            Tool::Round($t) => $body,
            Tool::Bevel($t) => $body,
        }
    };
}

impl Tool {
    /// Legt ein Werkzeug an und übernimmt die gemerkten Einstellungen.
    pub fn new(kind: ToolKind, settings: &ToolSettings) -> Self {
        match kind {
            ToolKind::LineChain => Tool::LineChain(line_chain::LineChainTool::new()),
            ToolKind::LineAngle => Tool::LineAngle(line_angle::LineAngleTool::from_settings(settings)),
            ToolKind::Polyline => Tool::Polyline(polyline::PolylineTool::from_settings(settings)),
            ToolKind::Polygon => Tool::Polygon(polygon::PolygonTool::from_settings(settings)),
            ToolKind::Arc3P => Tool::Arc3P(arc::Arc3PTool::new()),
            ToolKind::CircleTan1_2P => Tool::CircleTan1_2P(circle::CircleTan1_2PTool::new()),
            ToolKind::CircleInscribe => Tool::CircleInscribe(circle::CircleInscribeTool::new()),
            ToolKind::EllipseAxis => Tool::EllipseAxis(ellipse::EllipseAxisTool::from_settings(settings)),
            ToolKind::EllipseFociPoint => Tool::EllipseFociPoint(ellipse::EllipseFociPointTool::new()),
            ToolKind::EllipseCenter3Points => {
                Tool::EllipseCenter3Points(ellipse::EllipseCenter3PointsTool::new())
            }
            ToolKind::EllipseInscribe => Tool::EllipseInscribe(ellipse::EllipseInscribeTool::new()),
            ToolKind::Round => Tool::Round(corner::RoundTool::from_settings(settings)),
            ToolKind::Bevel => Tool::Bevel(corner::BevelTool::from_settings(settings)),
        }
    }
}

impl ConstructionTool for Tool {
    fn kind(&self) -> ToolKind {
        dispatch!(self, t => t.kind())
    }

    fn status_text(&self) -> &str {
        dispatch!(self, t => t.status_text())
    }

    fn is_initial(&self) -> bool {
        dispatch!(self, t => t.is_initial())
    }

    fn picks_entities(&self) -> bool {
        dispatch!(self, t => t.picks_entities())
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        dispatch!(self, t => t.on_mouse_move(pointer, ctx))
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        dispatch!(self, t => t.on_coordinate(pointer, ctx))
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        dispatch!(self, t => t.on_command(command, ctx))
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        dispatch!(self, t => t.on_back(ctx))
    }

    fn preview(&self) -> ToolPreview {
        dispatch!(self, t => t.preview())
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        dispatch!(self, t => t.reset(doc))
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        dispatch!(self, t => t.store_settings(settings))
    }
}

// ── ToolManager ──────────────────────────────────────────────────────

/// Verwaltet das aktive Werkzeug. Es gibt höchstens eines.
#[derive(Default)]
pub struct ToolManager {
    active: Option<Tool>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Kurzname und Anzeigename aller Werkzeug-Arten.
    pub fn tool_names(&self) -> Vec<(&'static str, &'static str)> {
        ToolKind::ALL.iter().map(|k| (k.name(), k.label())).collect()
    }

    /// Aktiviert ein Werkzeug. Ein vorher aktives wird verworfen und
    /// schreibt seine Einstellungen zurück.
    pub fn set_active(&mut self, kind: ToolKind, settings: &mut ToolSettings, doc: &mut dyn Document) {
        self.finish(settings, doc);
        self.active = Some(Tool::new(kind, settings));
        log::info!("Werkzeug aktiviert: {}", kind.label());
    }

    pub fn active_kind(&self) -> Option<ToolKind> {
        self.active.as_ref().map(|t| t.kind())
    }

    pub fn active_tool(&self) -> Option<&Tool> {
        self.active.as_ref()
    }

    pub fn active_tool_mut(&mut self) -> Option<&mut Tool> {
        self.active.as_mut()
    }

    /// Beendet das aktive Werkzeug (Zustand verwerfen, Einstellungen sichern).
    pub fn finish(&mut self, settings: &mut ToolSettings, doc: &mut dyn Document) {
        if let Some(mut tool) = self.active.take() {
            tool.reset(doc);
            tool.store_settings(settings);
            log::info!("Werkzeug beendet: {}", tool.kind().label());
        }
    }
}
