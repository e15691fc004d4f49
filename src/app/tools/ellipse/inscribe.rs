//! Inellipse von vier Linien.

use super::super::common::{pick, release_all, release_last, PickedEntity};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use crate::document::{Document, ResolveLevel};
use crate::geometry::{EllipseData, EntityData, EntityKind, LineData};
use crate::shared::ToolPreview;

pub const MSG_NOT_UNIQUE: &str = "Can not determine uniquely an ellipse";

const LINES: usize = 4;

pub struct EllipseInscribeTool {
    pub(crate) picks: Vec<PickedEntity>,
    /// Kandidat für die vierte Linie unter dem Cursor
    hover: Option<LineData>,
}

impl EllipseInscribeTool {
    pub fn new() -> Self {
        Self {
            picks: Vec::with_capacity(LINES),
            hover: None,
        }
    }

    fn ellipse_with(&self, fourth: &LineData) -> Option<EllipseData> {
        let lines: Vec<&LineData> = self.picks.iter().filter_map(PickedEntity::as_line).collect();
        match lines.as_slice() {
            [l1, l2, l3] => EllipseData::inscribe_quadrilateral([*l1, *l2, *l3, fourth]),
            _ => None,
        }
    }
}

impl Default for EllipseInscribeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for EllipseInscribeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::EllipseInscribe
    }

    fn status_text(&self) -> &str {
        match self.picks.len() {
            0 => "Erste Linie wählen",
            1 => "Zweite Linie wählen",
            2 => "Dritte Linie wählen",
            _ => "Vierte Linie wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.picks.is_empty()
    }

    fn picks_entities(&self) -> bool {
        true
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.hover = None;
        if self.picks.len() == LINES - 1 {
            self.hover = ctx
                .catch_entity(pointer.raw, &[EntityKind::Line], ResolveLevel::All)
                .filter(|hit| !self.picks.iter().any(|p| p.same_as(hit)))
                .and_then(|hit| match hit.data {
                    EntityData::Line(l) => Some(l),
                    _ => None,
                });
        }
        ToolAction::UpdatePreview
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let Some(picked) = pick(ctx, pointer.raw, &[EntityKind::Line], ResolveLevel::All, &self.picks) else {
            return ToolAction::Ignored;
        };
        if self.picks.len() < LINES - 1 {
            self.picks.push(picked);
            return ToolAction::Continue;
        }

        let ellipse = picked.as_line().and_then(|fourth| self.ellipse_with(fourth));
        self.picks.push(picked);
        let Some(ellipse) = ellipse else {
            ctx.message(MSG_NOT_UNIQUE);
            release_last(ctx.doc, &mut self.picks);
            return ToolAction::Ignored;
        };
        ctx.commit(vec![ellipse.into()], &[]);
        release_all(ctx.doc, &mut self.picks);
        self.hover = None;
        ToolAction::Committed
    }

    fn on_command(&mut self, _command: &str, _ctx: &mut ToolContext<'_>) -> ToolAction {
        ToolAction::Ignored
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.hover = None;
        match release_last(ctx.doc, &mut self.picks) {
            Some(_) => ToolAction::Continue,
            None => ToolAction::Finished,
        }
    }

    fn preview(&self) -> ToolPreview {
        match self.hover.as_ref().and_then(|fourth| self.ellipse_with(fourth)) {
            Some(ellipse) => ToolPreview::single(ellipse).with_reference(ellipse.center),
            None => ToolPreview::default(),
        }
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        release_all(doc, &mut self.picks);
        self.hover = None;
    }
}
