//! Ellipse über zwei Brennpunkte und einen Punkt (bzw. die Summe der
//! Brennpunkt-Abstände).

use super::super::common::parse_value;
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{Vector, TOLERANCE};
use crate::document::Document;
use crate::geometry::{EllipseData, LineData};
use crate::shared::ToolPreview;

pub const MSG_TOTAL_TOO_SMALL: &str = "is smaller than distance between foci";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipseFociPointStatus {
    SetFocus1,
    SetFocus2,
    SetPoint,
}

pub struct EllipseFociPointTool {
    pub(crate) status: EllipseFociPointStatus,
    foci: [Vector; 2],
    cursor: Vector,
}

impl EllipseFociPointTool {
    pub fn new() -> Self {
        Self {
            status: EllipseFociPointStatus::SetFocus1,
            foci: [Vector::invalid(); 2],
            cursor: Vector::invalid(),
        }
    }

    fn commit(&mut self, ellipse: EllipseData, ctx: &mut ToolContext<'_>) -> ToolAction {
        ctx.commit(vec![ellipse.into()], &[]);
        ctx.move_relative_zero(ellipse.center);
        self.status = EllipseFociPointStatus::SetFocus1;
        ToolAction::Committed
    }
}

impl Default for EllipseFociPointTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for EllipseFociPointTool {
    fn kind(&self) -> ToolKind {
        ToolKind::EllipseFociPoint
    }

    fn status_text(&self) -> &str {
        match self.status {
            EllipseFociPointStatus::SetFocus1 => "Ersten Brennpunkt wählen",
            EllipseFociPointStatus::SetFocus2 => "Zweiten Brennpunkt wählen",
            EllipseFociPointStatus::SetPoint => "Punkt auf der Ellipse oder Abstandssumme angeben",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == EllipseFociPointStatus::SetFocus1
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.cursor = pointer.snapped;
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let point = pointer.snapped;
        if !point.valid {
            return ToolAction::Ignored;
        }
        match self.status {
            EllipseFociPointStatus::SetFocus1 => {
                self.foci[0] = point;
                ctx.move_relative_zero(point);
                self.status = EllipseFociPointStatus::SetFocus2;
                ToolAction::Continue
            }
            EllipseFociPointStatus::SetFocus2 => {
                if self.foci[0].distance_to(point) < 2.0 * TOLERANCE {
                    return ToolAction::Ignored;
                }
                self.foci[1] = point;
                ctx.move_relative_zero(point);
                self.status = EllipseFociPointStatus::SetPoint;
                ToolAction::Continue
            }
            EllipseFociPointStatus::SetPoint => {
                match EllipseData::from_foci_point(self.foci[0], self.foci[1], point) {
                    Some(ellipse) => self.commit(ellipse, ctx),
                    None => ToolAction::Ignored,
                }
            }
        }
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        if self.status != EllipseFociPointStatus::SetPoint {
            return ToolAction::Ignored;
        }
        let Some(total) = parse_value(ctx, command) else {
            return ToolAction::Ignored;
        };
        match EllipseData::from_foci_distance(self.foci[0], self.foci[1], total.abs()) {
            Some(ellipse) => self.commit(ellipse, ctx),
            None => {
                ctx.message(format!("Total distance {} {}", total.abs(), MSG_TOTAL_TOO_SMALL));
                ToolAction::Ignored
            }
        }
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.status = match self.status {
            EllipseFociPointStatus::SetFocus1 => return ToolAction::Finished,
            EllipseFociPointStatus::SetFocus2 => EllipseFociPointStatus::SetFocus1,
            EllipseFociPointStatus::SetPoint => EllipseFociPointStatus::SetFocus2,
        };
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        match self.status {
            EllipseFociPointStatus::SetFocus2 if self.cursor.valid => {
                ToolPreview::single(LineData::new(self.foci[0], self.cursor)).with_reference(self.foci[0])
            }
            EllipseFociPointStatus::SetPoint => {
                match EllipseData::from_foci_point(self.foci[0], self.foci[1], self.cursor) {
                    Some(ellipse) => ToolPreview::single(ellipse),
                    None => ToolPreview::default(),
                }
                .with_reference(self.foci[0])
                .with_reference(self.foci[1])
            }
            _ => ToolPreview::default(),
        }
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        *self = Self::new();
    }
}
