//! Kreisbogen durch drei Punkte (Start, Zwischenpunkt, Ende).

use super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{Vector, TOLERANCE2};
use crate::document::Document;
use crate::geometry::{ArcData, LineData};
use crate::shared::ToolPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arc3PStatus {
    SetPoint1,
    SetPoint2,
    SetPoint3,
}

pub struct Arc3PTool {
    pub(crate) status: Arc3PStatus,
    points: [Vector; 2],
    cursor: Vector,
}

impl Arc3PTool {
    pub fn new() -> Self {
        Self {
            status: Arc3PStatus::SetPoint1,
            points: [Vector::invalid(); 2],
            cursor: Vector::invalid(),
        }
    }

    /// Liegt `point` auf einem bereits gesetzten Punkt?
    fn coincides(&self, point: Vector) -> bool {
        let set = match self.status {
            Arc3PStatus::SetPoint1 => 0,
            Arc3PStatus::SetPoint2 => 1,
            Arc3PStatus::SetPoint3 => 2,
        };
        self.points[..set].iter().any(|p| p.squared_to(point) < TOLERANCE2)
    }
}

impl Default for Arc3PTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for Arc3PTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Arc3P
    }

    fn status_text(&self) -> &str {
        match self.status {
            Arc3PStatus::SetPoint1 => "Startpunkt wählen",
            Arc3PStatus::SetPoint2 => "Zwischenpunkt wählen",
            Arc3PStatus::SetPoint3 => "Endpunkt wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == Arc3PStatus::SetPoint1
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.cursor = pointer.snapped;
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let point = pointer.snapped;
        if !point.valid || self.coincides(point) {
            return ToolAction::Ignored;
        }
        match self.status {
            Arc3PStatus::SetPoint1 => {
                self.points[0] = point;
                self.status = Arc3PStatus::SetPoint2;
            }
            Arc3PStatus::SetPoint2 => {
                self.points[1] = point;
                self.status = Arc3PStatus::SetPoint3;
            }
            Arc3PStatus::SetPoint3 => {
                let Some(arc) = ArcData::from_3p(self.points[0], self.points[1], point) else {
                    log::debug!("Bogen: Punkte liegen auf einer Geraden");
                    return ToolAction::Ignored;
                };
                ctx.commit(vec![arc.into()], &[]);
                self.points = [Vector::invalid(); 2];
                self.status = Arc3PStatus::SetPoint1;
                ctx.move_relative_zero(point);
                return ToolAction::Committed;
            }
        }
        ctx.move_relative_zero(point);
        ToolAction::Continue
    }

    fn on_command(&mut self, _command: &str, _ctx: &mut ToolContext<'_>) -> ToolAction {
        ToolAction::Ignored
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.status = match self.status {
            Arc3PStatus::SetPoint1 => return ToolAction::Finished,
            Arc3PStatus::SetPoint2 => Arc3PStatus::SetPoint1,
            Arc3PStatus::SetPoint3 => Arc3PStatus::SetPoint2,
        };
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        if !self.cursor.valid {
            return ToolPreview::default();
        }
        match self.status {
            Arc3PStatus::SetPoint1 => ToolPreview::default(),
            Arc3PStatus::SetPoint2 => {
                ToolPreview::single(LineData::new(self.points[0], self.cursor)).with_reference(self.points[0])
            }
            Arc3PStatus::SetPoint3 => match ArcData::from_3p(self.points[0], self.points[1], self.cursor) {
                Some(arc) => ToolPreview::single(arc),
                None => ToolPreview::single(LineData::new(self.points[0], self.cursor)),
            }
            .with_reference(self.points[0])
            .with_reference(self.points[1]),
        }
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        *self = Self::new();
    }
}
