//! Kreis, der eine Kurve (Linie, Bogen, Kreis) berührt und durch zwei
//! Punkte geht.

use super::super::common::{pick, release_all, PickedEntity};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::{SolutionSet, Vector, TOLERANCE2};
use crate::document::{Document, ResolveLevel};
use crate::geometry::{tan1_2p_centers, tan1_2p_closest, CircleData, EntityKind};
use crate::shared::ToolPreview;

const CURVE_KINDS: [EntityKind; 3] = [EntityKind::Line, EntityKind::Arc, EntityKind::Circle];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleTan1_2PStatus {
    SetCircle1,
    SetPoint1,
    SetPoint2,
    /// Mehrere Lösungen: Mittelpunkt per Klick wählen
    SetCenter,
}

pub struct CircleTan1_2PTool {
    pub(crate) status: CircleTan1_2PStatus,
    /// Gewählte Kurve (als einziges Element, für die gemeinsamen Helfer)
    curve: Vec<PickedEntity>,
    points: [Vector; 2],
    pub(crate) centers: SolutionSet,
    cursor: Vector,
}

impl CircleTan1_2PTool {
    pub fn new() -> Self {
        Self {
            status: CircleTan1_2PStatus::SetCircle1,
            curve: Vec::new(),
            points: [Vector::invalid(); 2],
            centers: SolutionSet::new(),
            cursor: Vector::invalid(),
        }
    }

    fn centers_through(&self, p1: Vector) -> SolutionSet {
        match self.curve.first() {
            Some(curve) => tan1_2p_centers(&curve.data, self.points[0], p1),
            None => SolutionSet::new(),
        }
    }

    fn finish_circle(&mut self, circle: CircleData, ctx: &mut ToolContext<'_>) -> ToolAction {
        ctx.commit(vec![circle.into()], &[]);
        ctx.move_relative_zero(circle.center);
        release_all(ctx.doc, &mut self.curve);
        self.points = [Vector::invalid(); 2];
        self.centers.clear();
        self.status = CircleTan1_2PStatus::SetCircle1;
        ToolAction::Committed
    }
}

impl Default for CircleTan1_2PTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for CircleTan1_2PTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CircleTan1_2P
    }

    fn status_text(&self) -> &str {
        match self.status {
            CircleTan1_2PStatus::SetCircle1 => "Linie, Bogen oder Kreis wählen",
            CircleTan1_2PStatus::SetPoint1 => "Ersten Punkt wählen",
            CircleTan1_2PStatus::SetPoint2 => "Zweiten Punkt wählen",
            CircleTan1_2PStatus::SetCenter => "Lösung wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.status == CircleTan1_2PStatus::SetCircle1
    }

    fn picks_entities(&self) -> bool {
        self.status == CircleTan1_2PStatus::SetCircle1
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, _ctx: &mut ToolContext<'_>) -> ToolAction {
        self.cursor = pointer.snapped;
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        match self.status {
            CircleTan1_2PStatus::SetCircle1 => {
                let Some(curve) = pick(ctx, pointer.raw, &CURVE_KINDS, ResolveLevel::All, &[]) else {
                    return ToolAction::Ignored;
                };
                self.curve.push(curve);
                self.status = CircleTan1_2PStatus::SetPoint1;
                ToolAction::Continue
            }
            CircleTan1_2PStatus::SetPoint1 => {
                if !pointer.snapped.valid {
                    return ToolAction::Ignored;
                }
                self.points[0] = pointer.snapped;
                ctx.move_relative_zero(pointer.snapped);
                self.status = CircleTan1_2PStatus::SetPoint2;
                ToolAction::Continue
            }
            CircleTan1_2PStatus::SetPoint2 => {
                let point = pointer.snapped;
                if !point.valid || point.squared_to(self.points[0]) < TOLERANCE2 {
                    return ToolAction::Ignored;
                }
                let centers = self.centers_through(point);
                if centers.is_empty() {
                    log::debug!("Kreis tangential: keine Lösung");
                    return ToolAction::Ignored;
                }
                self.points[1] = point;
                if centers.len() == 1 {
                    let Some(circle) = tan1_2p_closest(&centers, self.points[0], point) else {
                        return ToolAction::Ignored;
                    };
                    return self.finish_circle(circle, ctx);
                }
                self.centers = centers;
                ctx.move_relative_zero(point);
                self.status = CircleTan1_2PStatus::SetCenter;
                ToolAction::Continue
            }
            CircleTan1_2PStatus::SetCenter => {
                match tan1_2p_closest(&self.centers, self.points[0], pointer.snapped) {
                    Some(circle) => self.finish_circle(circle, ctx),
                    None => ToolAction::Ignored,
                }
            }
        }
    }

    fn on_command(&mut self, _command: &str, _ctx: &mut ToolContext<'_>) -> ToolAction {
        ToolAction::Ignored
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.status = match self.status {
            CircleTan1_2PStatus::SetCircle1 => return ToolAction::Finished,
            CircleTan1_2PStatus::SetPoint1 => {
                release_all(ctx.doc, &mut self.curve);
                CircleTan1_2PStatus::SetCircle1
            }
            CircleTan1_2PStatus::SetPoint2 => CircleTan1_2PStatus::SetPoint1,
            CircleTan1_2PStatus::SetCenter => {
                self.centers.clear();
                CircleTan1_2PStatus::SetPoint2
            }
        };
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        if !self.cursor.valid {
            return ToolPreview::default();
        }
        let circle = match self.status {
            CircleTan1_2PStatus::SetPoint2 => {
                tan1_2p_closest(&self.centers_through(self.cursor), self.points[0], self.cursor)
            }
            CircleTan1_2PStatus::SetCenter => tan1_2p_closest(&self.centers, self.points[0], self.cursor),
            _ => None,
        };
        let mut preview = match circle {
            Some(c) => ToolPreview::single(c),
            None => ToolPreview::default(),
        };
        if self.status == CircleTan1_2PStatus::SetCenter {
            preview.reference_points.extend(self.centers.iter().copied());
        }
        preview.with_reference(self.points[0])
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        release_all(doc, &mut self.curve);
        *self = Self::new();
    }
}
