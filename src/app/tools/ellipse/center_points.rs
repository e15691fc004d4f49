//! Ellipse über Zentrum und drei Punkte. Der erste Punkt ergibt einen
//! Kreis, der zweite eine achsenparallele Ellipse, der dritte die
//! allgemeine Lage.

use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{Vector, TOLERANCE15};
use crate::document::Document;
use crate::geometry::{CircleData, EllipseData, EntityData};
use crate::shared::ToolPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipseCenter3PointsStatus {
    SetCenter,
    SetPoint1,
    SetPoint2,
    SetPoint3,
}

pub struct EllipseCenter3PointsTool {
    pub(crate) status: EllipseCenter3PointsStatus,
    center: Vector,
    points: Vec<Vector>,
    cursor: Vector,
}

impl EllipseCenter3PointsTool {
    pub fn new() -> Self {
        Self {
            status: EllipseCenter3PointsStatus::SetCenter,
            center: Vector::invalid(),
            points: Vec::with_capacity(3),
            cursor: Vector::invalid(),
        }
    }

    /// Form aus den bestätigten Punkten plus `next`.
    fn shape_with(&self, next: Vector) -> Option<EntityData> {
        let mut points = self.points.clone();
        points.push(next);
        match points.as_slice() {
            [p1] => CircleData::from_cr(self.center, self.center.distance_to(*p1)).map(Into::into),
            _ => EllipseData::from_center_points(self.center, &points).map(Into::into),
        }
    }
}

impl Default for EllipseCenter3PointsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for EllipseCenter3PointsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::EllipseCenter3Points
    }

    fn status_text(&self) -> &str {
        match self.status {
            EllipseCenter3PointsStatus::SetCenter => "Zentrum wählen",
            EllipseCenter3PointsStatus::SetPoint1 => "Ersten Punkt auf der Ellipse wählen",
            EllipseCenter3PointsStatus::SetPoint2 => "Zweiten Punkt auf der Ellipse wählen",
            EllipseCenter3PointsStatus::SetPoint3 => "Dritten Punkt auf der Ellipse wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == EllipseCenter3PointsStatus::SetCenter
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
        if self.status == EllipseCenter3PointsStatus::SetCenter {
            self.center = point;
            self.points.clear();
            ctx.move_relative_zero(point);
            self.status = EllipseCenter3PointsStatus::SetPoint1;
            return ToolAction::Continue;
        }
        if self.points.iter().any(|p| p.squared_to(point) < TOLERANCE15) {
            return ToolAction::Ignored;
        }
        let Some(shape) = self.shape_with(point) else {
            log::debug!("Ellipse: Punkte bestimmen keine Ellipse");
            return ToolAction::Ignored;
        };
        self.status = match self.status {
            EllipseCenter3PointsStatus::SetPoint1 => EllipseCenter3PointsStatus::SetPoint2,
            EllipseCenter3PointsStatus::SetPoint2 => EllipseCenter3PointsStatus::SetPoint3,
            _ => {
                ctx.commit(vec![shape], &[]);
                ctx.move_relative_zero(self.center);
                self.points.clear();
                self.status = EllipseCenter3PointsStatus::SetCenter;
                return ToolAction::Committed;
            }
        };
        self.points.push(point);
        ToolAction::Continue
    }

    fn on_command(&mut self, _command: &str, _ctx: &mut ToolContext<'_>) -> ToolAction {
        ToolAction::Ignored
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.status = match self.status {
            EllipseCenter3PointsStatus::SetCenter => return ToolAction::Finished,
            EllipseCenter3PointsStatus::SetPoint1 => EllipseCenter3PointsStatus::SetCenter,
            EllipseCenter3PointsStatus::SetPoint2 => EllipseCenter3PointsStatus::SetPoint1,
            EllipseCenter3PointsStatus::SetPoint3 => EllipseCenter3PointsStatus::SetPoint2,
        };
        self.points.pop();
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        if self.status == EllipseCenter3PointsStatus::SetCenter || !self.cursor.valid {
            return ToolPreview::default();
        }
        let mut preview = ToolPreview::default().with_reference(self.center);
        if let Some(shape) = self.shape_with(self.cursor) {
            preview.push(shape);
        }
        preview.reference_points.extend(self.points.iter().copied());
        preview
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        *self = Self::new();
    }
}
