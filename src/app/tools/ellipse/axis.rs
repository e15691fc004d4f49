//! Ellipse über Zentrum, Hauptachsen-Endpunkt und Nebenachse; im
//! Bogen-Modus zusätzlich Start- und Endwinkel.

use super::super::common::{parse_value, split_command};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{deg_to_rad, Vector, TOLERANCE, TOLERANCE2};
use crate::document::Document;
use crate::geometry::{EllipseData, LineData};
use crate::shared::{ToolPreview, ToolSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipseAxisStatus {
    SetCenter,
    SetMajor,
    SetMinor,
    SetAngle1,
    SetAngle2,
}

pub struct EllipseAxisTool {
    pub(crate) status: EllipseAxisStatus,
    pub(crate) is_arc: bool,
    center: Vector,
    major_p: Vector,
    ratio: f64,
    angle1: f64,
    cursor: Vector,
}

impl EllipseAxisTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            status: EllipseAxisStatus::SetCenter,
            is_arc: settings.ellipse_is_arc,
            center: Vector::invalid(),
            major_p: Vector::invalid(),
            ratio: 0.5,
            angle1: 0.0,
            cursor: Vector::invalid(),
        }
    }

    /// Achsenverhältnis aus dem Abstand eines Punkts zur Hauptachse.
    fn ratio_at(&self, point: Vector) -> f64 {
        let axis = LineData::new(self.center - self.major_p, self.center + self.major_p);
        axis.distance_to_infinite(point) / self.major_p.magnitude()
    }

    fn full(&self) -> EllipseData {
        EllipseData::new(self.center, self.major_p, self.ratio)
    }

    /// Parameterwinkel eines Punkts auf der aktuellen Ellipse.
    fn param_at(&self, point: Vector) -> f64 {
        self.full().param_of(point)
    }

    /// Legt das Verhältnis fest und übernimmt bzw. wechselt zur Winkel-Eingabe.
    fn accept_ratio(&mut self, ratio: f64, ctx: &mut ToolContext<'_>) -> ToolAction {
        if !ratio.is_finite() || ratio.abs() < TOLERANCE {
            log::debug!("Ellipse: Nebenachse der Länge 0 verworfen");
            return ToolAction::Ignored;
        }
        self.ratio = ratio.abs();
        if self.is_arc {
            self.status = EllipseAxisStatus::SetAngle1;
            ToolAction::Continue
        } else {
            self.commit(self.full(), ctx)
        }
    }

    fn commit(&mut self, mut ellipse: EllipseData, ctx: &mut ToolContext<'_>) -> ToolAction {
        if ellipse.ratio > 1.0 && !ellipse.switch_major_minor() {
            return ToolAction::Ignored;
        }
        ctx.commit(vec![ellipse.into()], &[]);
        self.status = EllipseAxisStatus::SetCenter;
        ToolAction::Committed
    }

    fn arc_to(&self, angle2: f64) -> EllipseData {
        EllipseData::arc(self.center, self.major_p, self.ratio, self.angle1, angle2, false)
    }
}

impl Default for EllipseAxisTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for EllipseAxisTool {
    fn kind(&self) -> ToolKind {
        ToolKind::EllipseAxis
    }

    fn status_text(&self) -> &str {
        match self.status {
            EllipseAxisStatus::SetCenter => "Zentrum wählen",
            EllipseAxisStatus::SetMajor => "Endpunkt der Hauptachse wählen",
            EllipseAxisStatus::SetMinor => "Endpunkt oder Länge der Nebenachse angeben",
            EllipseAxisStatus::SetAngle1 => "Startwinkel angeben",
            EllipseAxisStatus::SetAngle2 => "Endwinkel angeben",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == EllipseAxisStatus::SetCenter
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
            EllipseAxisStatus::SetCenter => {
                self.center = point;
                ctx.move_relative_zero(point);
                self.status = EllipseAxisStatus::SetMajor;
                ToolAction::Continue
            }
            EllipseAxisStatus::SetMajor => {
                let major_p = point - self.center;
                if major_p.squared() < TOLERANCE2 {
                    return ToolAction::Ignored;
                }
                self.major_p = major_p;
                self.status = EllipseAxisStatus::SetMinor;
                ToolAction::Continue
            }
            EllipseAxisStatus::SetMinor => {
                let ratio = self.ratio_at(point);
                self.accept_ratio(ratio, ctx)
            }
            EllipseAxisStatus::SetAngle1 => {
                self.angle1 = self.param_at(point);
                self.status = EllipseAxisStatus::SetAngle2;
                ToolAction::Continue
            }
            EllipseAxisStatus::SetAngle2 => {
                let arc = self.arc_to(self.param_at(point));
                self.commit(arc, ctx)
            }
        }
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let (keyword, _) = split_command(command);
        if keyword == "arc" && self.status == EllipseAxisStatus::SetCenter {
            self.is_arc = !self.is_arc;
            log::debug!("Ellipse: Bogen-Modus {}", self.is_arc);
            return ToolAction::UpdatePreview;
        }
        match self.status {
            EllipseAxisStatus::SetMinor => {
                let Some(minor) = parse_value(ctx, command) else {
                    return ToolAction::Ignored;
                };
                let ratio = minor / self.major_p.magnitude();
                self.accept_ratio(ratio, ctx)
            }
            EllipseAxisStatus::SetAngle1 => {
                let Some(angle) = parse_value(ctx, command) else {
                    return ToolAction::Ignored;
                };
                self.angle1 = deg_to_rad(angle);
                self.status = EllipseAxisStatus::SetAngle2;
                ToolAction::Continue
            }
            EllipseAxisStatus::SetAngle2 => {
                let Some(angle) = parse_value(ctx, command) else {
                    return ToolAction::Ignored;
                };
                let arc = self.arc_to(deg_to_rad(angle));
                self.commit(arc, ctx)
            }
            _ => ToolAction::Ignored,
        }
    }

    fn on_back(&mut self, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.status = match self.status {
            EllipseAxisStatus::SetCenter => return ToolAction::Finished,
            EllipseAxisStatus::SetMajor => EllipseAxisStatus::SetCenter,
            EllipseAxisStatus::SetMinor => EllipseAxisStatus::SetMajor,
            EllipseAxisStatus::SetAngle1 => EllipseAxisStatus::SetMinor,
            EllipseAxisStatus::SetAngle2 => EllipseAxisStatus::SetAngle1,
        };
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        if !self.cursor.valid {
            return ToolPreview::default();
        }
        match self.status {
            EllipseAxisStatus::SetCenter => ToolPreview::default(),
            EllipseAxisStatus::SetMajor => {
                let major_p = self.cursor - self.center;
                ToolPreview::single(LineData::new(self.center - major_p, self.cursor)).with_reference(self.center)
            }
            EllipseAxisStatus::SetMinor => {
                let ratio = self.ratio_at(self.cursor);
                if ratio < TOLERANCE {
                    return ToolPreview::default();
                }
                ToolPreview::single(EllipseData::new(self.center, self.major_p, ratio)).with_reference(self.center)
            }
            EllipseAxisStatus::SetAngle1 => {
                let mut preview = ToolPreview::single(self.full());
                preview.push(LineData::new(self.center, self.cursor));
                preview
            }
            EllipseAxisStatus::SetAngle2 => {
                let mut preview = ToolPreview::single(self.arc_to(self.param_at(self.cursor)));
                preview.push(LineData::new(self.center, self.cursor));
                preview
            }
        }
    }

    fn reset(&mut self, _doc: &mut dyn Document) {
        self.status = EllipseAxisStatus::SetCenter;
        self.cursor = Vector::invalid();
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.ellipse_is_arc = self.is_arc;
    }
}
