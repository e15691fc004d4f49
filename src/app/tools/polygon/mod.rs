//! Regelmäßiges Polygon aus Zentrum und einer Ecke.

use std::f64::consts::TAU;

use super::common::{parse_value, split_command};
use super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{Vector, TOLERANCE2};
use crate::document::Document;
use crate::geometry::{EntityData, LineData};
use crate::shared::{ToolPreview, ToolSettings};

/// Kleinste sinnvolle Eckenzahl
pub const MIN_CORNERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonStatus {
    SetCenter,
    SetCorner,
    /// Eckenzahl per Befehlszeile; merkt die Phase, in die zurückgekehrt wird
    SetNumber(ReturnTo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTo {
    Center,
    Corner,
}

pub struct PolygonTool {
    pub(crate) status: PolygonStatus,
    pub(crate) corners: usize,
    center: Vector,
    cursor: Vector,
}

impl PolygonTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            status: PolygonStatus::SetCenter,
            corners: settings.polygon_corners.max(MIN_CORNERS),
            center: Vector::invalid(),
            cursor: Vector::invalid(),
        }
    }

    /// Kanten des Polygons mit Zentrum `center` und erster Ecke `corner`.
    pub fn edges(center: Vector, corner: Vector, corners: usize) -> Vec<EntityData> {
        if !center.valid || !corner.valid || center.squared_to(corner) < TOLERANCE2 || corners < MIN_CORNERS {
            return Vec::new();
        }
        let step = TAU / corners as f64;
        let points: Vec<Vector> = (0..corners).map(|i| corner.rotate(center, step * i as f64)).collect();
        points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| LineData::new(*a, *b).into())
            .collect()
    }

    fn set_number(&mut self, text: &str, ctx: &mut ToolContext<'_>) -> bool {
        let Some(value) = parse_value(ctx, text) else {
            return false;
        };
        let n = value.round();
        if n < MIN_CORNERS as f64 || n > 10_000.0 {
            ctx.message(format!("Number of corners must be at least {}", MIN_CORNERS));
            return false;
        }
        self.corners = n as usize;
        true
    }

    fn leave_number(&mut self, back: ReturnTo) {
        self.status = match back {
            ReturnTo::Center => PolygonStatus::SetCenter,
            ReturnTo::Corner => PolygonStatus::SetCorner,
        };
    }
}

impl Default for PolygonTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for PolygonTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polygon
    }

    fn status_text(&self) -> &str {
        match self.status {
            PolygonStatus::SetCenter => "Zentrum wählen",
            PolygonStatus::SetCorner => "Ecke wählen",
            PolygonStatus::SetNumber(_) => "Anzahl der Ecken eingeben",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == PolygonStatus::SetCenter
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
            PolygonStatus::SetCenter => {
                self.center = point;
                ctx.move_relative_zero(point);
                self.status = PolygonStatus::SetCorner;
                ToolAction::Continue
            }
            PolygonStatus::SetCorner => {
                let edges = Self::edges(self.center, point, self.corners);
                if edges.is_empty() {
                    log::debug!("Polygon: Ecke fällt mit dem Zentrum zusammen");
                    return ToolAction::Ignored;
                }
                ctx.commit(edges, &[]);
                self.status = PolygonStatus::SetCenter;
                self.center = Vector::invalid();
                ToolAction::Committed
            }
            PolygonStatus::SetNumber(_) => ToolAction::Ignored,
        }
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        if let PolygonStatus::SetNumber(back) = self.status {
            if self.set_number(command, ctx) {
                self.leave_number(back);
                return ToolAction::UpdatePreview;
            }
            return ToolAction::Ignored;
        }
        let (keyword, rest) = split_command(command);
        if keyword != "number" && keyword != "n" {
            return ToolAction::Ignored;
        }
        if !rest.is_empty() {
            return if self.set_number(rest, ctx) {
                ToolAction::UpdatePreview
            } else {
                ToolAction::Ignored
            };
        }
        let back = match self.status {
            PolygonStatus::SetCorner => ReturnTo::Corner,
            _ => ReturnTo::Center,
        };
        self.status = PolygonStatus::SetNumber(back);
        ToolAction::Continue
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        match self.status {
            PolygonStatus::SetCenter => ToolAction::Finished,
            PolygonStatus::SetCorner => {
                self.status = PolygonStatus::SetCenter;
                self.center = Vector::invalid();
                ToolAction::Continue
            }
            PolygonStatus::SetNumber(back) => {
                self.leave_number(back);
                ToolAction::Continue
            }
        }
    }

    fn preview(&self) -> ToolPreview {
        match self.status {
            PolygonStatus::SetCorner => ToolPreview {
                entities: Self::edges(self.center, self.cursor, self.corners),
                reference_points: Vec::new(),
            }
            .with_reference(self.center),
            _ => ToolPreview::default(),
        }
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        self.status = PolygonStatus::SetCenter;
        self.center = Vector::invalid();
        self.cursor = Vector::invalid();
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.polygon_corners = self.corners;
    }
}
