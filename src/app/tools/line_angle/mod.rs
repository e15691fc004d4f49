//! Linie mit vorgegebenem Winkel und Länge, angesetzt am Start-, Mittel-
//! oder Endpunkt. Wiederholt sich nach jedem Abschluss.

use super::common::{parse_value, split_command};
use super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{deg_to_rad, rad_to_deg, Vector};
use crate::document::Document;
use crate::geometry::LineData;
use crate::shared::{LineSnapPoint, ToolPreview, ToolSettings};

/// Phasen des Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAngleStatus {
    SetPos,
    /// Wartet auf den Winkel (Grad) als Befehl
    SetAngle,
    /// Wartet auf die Länge als Befehl
    SetLength,
}

/// Linie-mit-Winkel-Werkzeug
pub struct LineAngleTool {
    pub(crate) status: LineAngleStatus,
    /// Winkel in Bogenmaß
    pub(crate) angle: f64,
    pub(crate) length: f64,
    pub(crate) snap_point: LineSnapPoint,
    pos: Vector,
}

impl LineAngleTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            status: LineAngleStatus::SetPos,
            angle: deg_to_rad(settings.line_angle),
            length: settings.line_length,
            snap_point: settings.line_snap_point,
            pos: Vector::invalid(),
        }
    }

    /// Linie, deren Bezugspunkt auf `pos` liegt.
    pub fn line_at(&self, pos: Vector) -> LineData {
        let dir = Vector::polar(self.length, self.angle);
        let offset = match self.snap_point {
            LineSnapPoint::Start => Vector::ZERO,
            LineSnapPoint::Middle => dir * 0.5,
            LineSnapPoint::End => dir,
        };
        let start = pos - offset;
        LineData::new(start, start + dir)
    }

    fn apply_value(&mut self, status: LineAngleStatus, text: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let Some(value) = parse_value(ctx, text) else {
            return ToolAction::Ignored;
        };
        match status {
            LineAngleStatus::SetAngle => self.angle = deg_to_rad(value),
            LineAngleStatus::SetLength => self.length = value,
            LineAngleStatus::SetPos => return ToolAction::Ignored,
        }
        self.status = LineAngleStatus::SetPos;
        ToolAction::UpdatePreview
    }
}

impl Default for LineAngleTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for LineAngleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::LineAngle
    }

    fn status_text(&self) -> &str {
        match self.status {
            LineAngleStatus::SetPos => "Position wählen (angle, length, start, middle, end)",
            LineAngleStatus::SetAngle => "Winkel eingeben",
            LineAngleStatus::SetLength => "Länge eingeben",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == LineAngleStatus::SetPos
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.pos = pointer.snapped;
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        if self.status != LineAngleStatus::SetPos || !pointer.snapped.valid {
            return ToolAction::Ignored;
        }
        self.pos = pointer.snapped;
        ctx.commit(vec![self.line_at(self.pos).into()], &[]);
        ctx.move_relative_zero(self.pos);
        ToolAction::Committed
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let (keyword, rest) = split_command(command);
        let target = match keyword.as_str() {
            "angle" => Some(LineAngleStatus::SetAngle),
            "length" => Some(LineAngleStatus::SetLength),
            "start" | "middle" | "end" => {
                self.snap_point = match keyword.as_str() {
                    "start" => LineSnapPoint::Start,
                    "middle" => LineSnapPoint::Middle,
                    _ => LineSnapPoint::End,
                };
                return ToolAction::UpdatePreview;
            }
            _ => None,
        };
        match (target, self.status) {
            (Some(status), _) if rest.is_empty() => {
                self.status = status;
                ToolAction::Continue
            }
            (Some(status), _) => self.apply_value(status, rest, ctx),
            (None, LineAngleStatus::SetPos) => {
                log::debug!("Linie mit Winkel: unbekannter Befehl '{}'", command);
                ToolAction::Ignored
            }
            (None, status) => self.apply_value(status, command, ctx),
        }
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        match self.status {
            LineAngleStatus::SetPos => ToolAction::Finished,
            _ => {
                self.status = LineAngleStatus::SetPos;
                ToolAction::Continue
            }
        }
    }

    fn preview(&self) -> ToolPreview {
        if !self.pos.valid {
            return ToolPreview::default();
        }
        ToolPreview::single(self.line_at(self.pos)).with_reference(self.pos)
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        self.status = LineAngleStatus::SetPos;
        self.pos = Vector::invalid();
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.line_angle = rad_to_deg(self.angle);
        settings.line_length = self.length;
        settings.line_snap_point = self.snap_point;
    }
}
