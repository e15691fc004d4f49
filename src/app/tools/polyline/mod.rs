//! Polylinie: Startpunkt, dann Folgepunkte. Jedes Segment ist gerade oder
//! ein Bogen nach dem eingestellten Segment-Modus. Rechtsklick übernimmt
//! die Polylinie, `close` schließt sie.

use super::common::{parse_value, split_command};
use super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{Vector, TOLERANCE2};
use crate::document::Document;
use crate::geometry::{solve_bulge, ArcData, BulgeParams, BulgeSolution, LineData, PolylineData, SegmentMode};
use crate::shared::{ToolPreview, ToolSettings};

pub const MSG_CANNOT_UNDO: &str = "Cannot undo: Not enough entities defined yet.";
pub const MSG_CANNOT_CLOSE: &str = "Cannot close sequence of lines: Not enough entities defined yet.";

/// Phasen des Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineStatus {
    SetStartpoint,
    SetNextPoint,
}

/// Polylinien-Werkzeug
pub struct PolylineTool {
    pub(crate) status: PolylineStatus,
    pub(crate) params: BulgeParams,
    /// Im Aufbau befindliche Polylinie (noch nicht im Dokument)
    pub(crate) polyline: Option<PolylineData>,
    /// Nächstes Segment zur Cursor-Position (Endpunkt ggf. korrigiert)
    pending: Option<BulgeSolution>,
}

impl PolylineTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            status: PolylineStatus::SetStartpoint,
            params: BulgeParams {
                mode: settings.polyline_mode,
                radius: settings.polyline_radius,
                angle: settings.polyline_angle,
                reversed: settings.polyline_reversed,
            },
            polyline: None,
            pending: None,
        }
    }

    /// Bulge und tatsächlicher Endpunkt des nächsten Segments bis `point`.
    fn next_segment(&self, point: Vector) -> Option<BulgeSolution> {
        let poly = self.polyline.as_ref()?;
        let last = poly.last_segment();
        Some(solve_bulge(&self.params, last.as_ref(), poly.end_point(), point))
    }

    /// Übernimmt die Polylinie ins Dokument, sofern sie ein Segment hat.
    fn commit(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let Some(poly) = self.polyline.take() else {
            return false;
        };
        self.pending = None;
        self.status = PolylineStatus::SetStartpoint;
        if poly.segment_count() == 0 {
            return false;
        }
        ctx.commit(vec![poly.into()], &[]);
        true
    }

    fn undo(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        let Some(poly) = self.polyline.as_mut().filter(|p| p.vertex_count() >= 2) else {
            ctx.message(MSG_CANNOT_UNDO);
            return ToolAction::Ignored;
        };
        poly.remove_last_vertex();
        let end = poly.end_point();
        ctx.move_relative_zero(end);
        self.pending = None;
        ToolAction::Continue
    }

    fn close(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        let closing = match self.polyline.as_ref() {
            Some(poly) if poly.vertex_count() >= 3 => {
                let start = poly.start_point();
                self.next_segment(start)
                    .filter(|s| s.end_point.squared_to(start) < TOLERANCE2)
                    .map_or(0.0, |s| s.bulge)
            }
            _ => {
                ctx.message(MSG_CANNOT_CLOSE);
                return ToolAction::Ignored;
            }
        };
        if let Some(poly) = self.polyline.as_mut() {
            poly.close(closing);
            let start = poly.start_point();
            ctx.move_relative_zero(start);
        }
        self.commit(ctx);
        ToolAction::Committed
    }

    fn set_value(&mut self, keyword: &str, text: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let Some(value) = parse_value(ctx, text) else {
            return ToolAction::Ignored;
        };
        if keyword == "radius" {
            self.params.radius = value;
        } else {
            self.params.angle = value;
        }
        ToolAction::UpdatePreview
    }
}

impl Default for PolylineTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for PolylineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polyline
    }

    fn status_text(&self) -> &str {
        match self.status {
            PolylineStatus::SetStartpoint => "Startpunkt wählen",
            PolylineStatus::SetNextPoint => "Nächsten Punkt wählen (undo, close; Rechtsklick übernimmt)",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == PolylineStatus::SetStartpoint
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.pending = match self.status {
            PolylineStatus::SetNextPoint => self.next_segment(pointer.snapped),
            PolylineStatus::SetStartpoint => None,
        };
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let point = pointer.snapped;
        if !point.valid {
            return ToolAction::Ignored;
        }
        match self.status {
            PolylineStatus::SetStartpoint => {
                self.polyline = Some(PolylineData::new(point));
                ctx.move_relative_zero(point);
                self.status = PolylineStatus::SetNextPoint;
                ToolAction::Continue
            }
            PolylineStatus::SetNextPoint => {
                let Some(segment) = self.next_segment(point) else {
                    return ToolAction::Ignored;
                };
                let Some(poly) = self.polyline.as_mut() else {
                    return ToolAction::Ignored;
                };
                if segment.end_point.squared_to(poly.end_point()) < TOLERANCE2 {
                    log::debug!("Polylinie: Segment der Länge 0 verworfen");
                    return ToolAction::Ignored;
                }
                poly.add_vertex(segment.end_point, segment.bulge);
                ctx.move_relative_zero(segment.end_point);
                self.pending = None;
                ToolAction::Continue
            }
        }
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let (keyword, rest) = split_command(command);
        match keyword.as_str() {
            "undo" | "u" => return self.undo(ctx),
            "close" | "c" => return self.close(ctx),
            "radius" | "angle" if !rest.is_empty() => return self.set_value(&keyword, rest, ctx),
            "reversed" => {
                self.params.reversed = !self.params.reversed;
                return ToolAction::UpdatePreview;
            }
            _ => {}
        }
        match SegmentMode::from_name(&keyword) {
            Some(mode) => {
                self.params.mode = mode;
                log::debug!("Polylinie: Segment-Modus {}", mode.name());
                ToolAction::UpdatePreview
            }
            None => {
                log::debug!("Polylinie: unbekannter Befehl '{}'", command);
                ToolAction::Ignored
            }
        }
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        match self.status {
            PolylineStatus::SetStartpoint => ToolAction::Finished,
            PolylineStatus::SetNextPoint => {
                if self.commit(ctx) {
                    ToolAction::Committed
                } else {
                    ToolAction::Continue
                }
            }
        }
    }

    fn preview(&self) -> ToolPreview {
        let Some(poly) = self.polyline.as_ref() else {
            return ToolPreview::default();
        };
        let mut preview = ToolPreview::default();
        preview.entities.extend(poly.segments());
        if let Some(next) = self.pending {
            let start = poly.end_point();
            match ArcData::from_2p_bulge(start, next.end_point, next.bulge) {
                Some(arc) => preview.push(arc),
                None if next.end_point.squared_to(start) >= TOLERANCE2 => {
                    preview.push(LineData::new(start, next.end_point))
                }
                None => {}
            }
        }
        preview
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        self.status = PolylineStatus::SetStartpoint;
        self.polyline = None;
        self.pending = None;
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.polyline_mode = self.params.mode;
        settings.polyline_radius = self.params.radius;
        settings.polyline_angle = self.params.angle;
        settings.polyline_reversed = self.params.reversed;
    }
}

#[cfg(test)]
mod tests;
