//! Linienzug: Startpunkt, dann beliebig viele Endpunkte. Jede Strecke wird
//! sofort übernommen; Undo/Redo/Schließen arbeiten auf der Punkt-Historie.

mod history;

use std::f64::consts::PI;

use super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::app::snapper::Restriction;
use crate::core::{Vector, TOLERANCE2};
use crate::document::Document;
use crate::geometry::LineData;
use crate::shared::ToolPreview;

pub use history::History;

/// Winkelraster bei gedrückter Shift-Taste.
const ANGLE_STEP: f64 = PI / 12.0;

pub const MSG_CANNOT_UNDO: &str = "Cannot undo: Not enough entities defined yet.";
pub const MSG_CANNOT_REDO: &str = "Cannot redo: Not previous line segment defined.";
pub const MSG_CANNOT_CLOSE: &str =
    "Cannot close sequence of lines: Not enough entities defined yet, or already closed.";

/// Phasen des Linienzugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChainStatus {
    SetStartpoint,
    SetEndpoint,
}

/// Linienzug-Werkzeug
pub struct LineChainTool {
    pub(crate) status: LineChainStatus,
    /// Startpunkt der nächsten Strecke
    pub(crate) start: Vector,
    cursor: Vector,
    pub(crate) history: History,
}

impl LineChainTool {
    pub fn new() -> Self {
        Self {
            status: LineChainStatus::SetStartpoint,
            start: Vector::invalid(),
            cursor: Vector::invalid(),
            history: History::default(),
        }
    }

    /// Rastet die Richtung Start→Punkt auf 15°-Schritte ein.
    fn snap_to_angle(&self, point: Vector) -> Vector {
        let angle = (self.start.angle_to(point) / ANGLE_STEP).round() * ANGLE_STEP;
        self.start + Vector::polar(self.start.distance_to(point), angle)
    }

    /// Endpunkt unter Berücksichtigung des Winkelrasters.
    fn end_point(&self, pointer: PointerInput, ctx: &ToolContext<'_>) -> Vector {
        let mode = ctx.snapper.mode();
        if pointer.shift
            && self.status == LineChainStatus::SetEndpoint
            && mode.restriction == Restriction::Nothing
            && !mode.grid
        {
            self.snap_to_angle(pointer.snapped)
        } else {
            pointer.snapped
        }
    }

    fn undo(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        if self.status != LineChainStatus::SetEndpoint || !self.history.can_undo() {
            ctx.message(MSG_CANNOT_UNDO);
            return ToolAction::Ignored;
        }
        if !ctx.doc.undo_cycle() {
            log::debug!("Linienzug: Undo-Log des Dokuments erschöpft");
            ctx.message(MSG_CANNOT_UNDO);
            return ToolAction::Ignored;
        }
        self.start = self.history.undo();
        ctx.move_relative_zero(self.start);
        ToolAction::Continue
    }

    fn redo(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        if self.status != LineChainStatus::SetEndpoint || !self.history.can_redo() {
            ctx.message(MSG_CANNOT_REDO);
            return ToolAction::Ignored;
        }
        if !ctx.doc.redo_cycle() {
            ctx.message(MSG_CANNOT_REDO);
            return ToolAction::Ignored;
        }
        self.start = self.history.redo();
        ctx.move_relative_zero(self.start);
        ToolAction::Continue
    }

    fn close(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        let first = self.history.first();
        if self.status != LineChainStatus::SetEndpoint
            || self.history.confirmed() < 3
            || self.start.squared_to(first) < TOLERANCE2
        {
            ctx.message(MSG_CANNOT_CLOSE);
            return ToolAction::Ignored;
        }
        ctx.commit(vec![LineData::new(self.start, first).into()], &[]);
        ctx.move_relative_zero(first);
        self.history.clear();
        self.start = Vector::invalid();
        self.status = LineChainStatus::SetStartpoint;
        ToolAction::Committed
    }
}

impl Default for LineChainTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for LineChainTool {
    fn kind(&self) -> ToolKind {
        ToolKind::LineChain
    }

    fn status_text(&self) -> &str {
        match self.status {
            LineChainStatus::SetStartpoint => "Startpunkt wählen",
            LineChainStatus::SetEndpoint => "Endpunkt wählen (undo, redo, close)",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == LineChainStatus::SetStartpoint
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.cursor = self.end_point(pointer, ctx);
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let point = self.end_point(pointer, ctx);
        if !point.valid {
            return ToolAction::Ignored;
        }
        match self.status {
            LineChainStatus::SetStartpoint => {
                self.start = point;
                self.history.start(point);
                ctx.move_relative_zero(point);
                self.status = LineChainStatus::SetEndpoint;
                ToolAction::Continue
            }
            LineChainStatus::SetEndpoint => {
                if point.squared_to(self.start) < TOLERANCE2 {
                    log::debug!("Linienzug: Strecke der Länge 0 verworfen");
                    return ToolAction::Ignored;
                }
                ctx.commit(vec![LineData::new(self.start, point).into()], &[]);
                self.history.push(point);
                self.start = point;
                ctx.move_relative_zero(point);
                ToolAction::Committed
            }
        }
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        match command.trim().to_lowercase().as_str() {
            "undo" | "u" => self.undo(ctx),
            "redo" | "r" => self.redo(ctx),
            "close" | "c" => self.close(ctx),
            other => {
                log::debug!("Linienzug: unbekannter Befehl '{}'", other);
                ToolAction::Ignored
            }
        }
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        match self.status {
            LineChainStatus::SetStartpoint => ToolAction::Finished,
            LineChainStatus::SetEndpoint => {
                self.history.clear();
                self.start = Vector::invalid();
                self.status = LineChainStatus::SetStartpoint;
                ToolAction::Continue
            }
        }
    }

    fn preview(&self) -> ToolPreview {
        if self.status != LineChainStatus::SetEndpoint || !self.cursor.valid {
            return ToolPreview::default();
        }
        ToolPreview::single(LineData::new(self.start, self.cursor))
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        *self = Self::new();
    }
}
