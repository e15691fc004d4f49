//! Kreis, der drei Linien berührt (Inkreis oder Ankreis).

use super::super::common::{pick, release_all, release_last, PickedEntity};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::core::Vector;
use crate::document::{Document, ResolveLevel};
use crate::geometry::{inscribe_3_lines, CircleData, EntityKind, LineData};
use crate::shared::ToolPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleInscribeStatus {
    SetLine1,
    SetLine2,
    SetLine3,
}

pub struct CircleInscribeTool {
    pub(crate) picks: Vec<PickedEntity>,
    /// Linie unter dem Cursor während der Wahl der dritten Linie
    hover: Option<LineData>,
    cursor: Vector,
}

impl CircleInscribeTool {
    pub fn new() -> Self {
        Self {
            picks: Vec::new(),
            hover: None,
            cursor: Vector::invalid(),
        }
    }

    pub fn status(&self) -> CircleInscribeStatus {
        match self.picks.len() {
            0 => CircleInscribeStatus::SetLine1,
            1 => CircleInscribeStatus::SetLine2,
            _ => CircleInscribeStatus::SetLine3,
        }
    }

    fn circle_with(&self, third: &LineData, coord: Vector) -> Option<CircleData> {
        let l1 = self.picks.first()?.as_line()?;
        let l2 = self.picks.get(1)?.as_line()?;
        inscribe_3_lines([l1, l2, third], coord)
    }
}

impl Default for CircleInscribeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for CircleInscribeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CircleInscribe
    }

    fn status_text(&self) -> &str {
        match self.status() {
            CircleInscribeStatus::SetLine1 => "Erste Linie wählen",
            CircleInscribeStatus::SetLine2 => "Zweite Linie wählen",
            CircleInscribeStatus::SetLine3 => "Dritte Linie wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.picks.is_empty()
    }

    fn picks_entities(&self) -> bool {
        true
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.cursor = pointer.raw;
        self.hover = None;
        if self.status() == CircleInscribeStatus::SetLine3 {
            self.hover = ctx
                .catch_entity(pointer.raw, &[EntityKind::Line], ResolveLevel::All)
                .filter(|hit| !self.picks.iter().any(|p| p.same_as(hit)))
                .and_then(|hit| match hit.data {
                    crate::geometry::EntityData::Line(l) => Some(l),
                    _ => None,
                });
        }
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let Some(picked) = pick(ctx, pointer.raw, &[EntityKind::Line], ResolveLevel::All, &self.picks) else {
            return ToolAction::Ignored;
        };
        if self.status() != CircleInscribeStatus::SetLine3 {
            self.picks.push(picked);
            return ToolAction::Continue;
        }

        let circle = picked.as_line().and_then(|third| self.circle_with(third, pointer.raw));
        self.picks.push(picked);
        let Some(circle) = circle else {
            log::debug!("Inkreis: Linien bestimmen keinen Kreis");
            release_last(ctx.doc, &mut self.picks);
            return ToolAction::Ignored;
        };
        ctx.commit(vec![circle.into()], &[]);
        ctx.move_relative_zero(circle.center);
        release_all(ctx.doc, &mut self.picks);
        self.hover = None;
        ToolAction::Committed
    }

    fn on_command(&mut self, _command: &str, _ctx: &mut ToolContext<'_>) -> ToolAction {
        ToolAction::Ignored
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        if release_last(ctx.doc, &mut self.picks).is_none() {
            return ToolAction::Finished;
        }
        self.hover = None;
        ToolAction::Continue
    }

    fn preview(&self) -> ToolPreview {
        match self.hover.as_ref().and_then(|third| self.circle_with(third, self.cursor)) {
            Some(circle) => ToolPreview::single(circle).with_reference(circle.center),
            None => ToolPreview::default(),
        }
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        release_all(doc, &mut self.picks);
        self.hover = None;
        self.cursor = Vector::invalid();
    }
}
