//! Ecken-Werkzeuge: Abrunden und Fasen zweier Linien.
//!
//! Beide wählen nacheinander zwei Linien; die Klickpunkte bestimmen die
//! behaltenen Linienteile. Mit Trimmen werden die Ausgangslinien im selben
//! Undo-Zyklus durch die gekürzten ersetzt.

mod bevel;
mod round;

pub use bevel::BevelTool;
pub use round::RoundTool;

use super::common::{pick, release_all, release_last, PickedEntity};
use super::{PointerInput, ToolAction, ToolContext};
use crate::core::Vector;
use crate::document::{Document, EntityId, ResolveLevel};
use crate::geometry::{CornerResult, EntityData, EntityKind, LineData};
use crate::shared::ToolPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStatus {
    SetEntity1,
    SetEntity2,
}

/// Gemeinsamer Auswahl-Zustand der Ecken-Werkzeuge.
#[derive(Debug, Default)]
pub(crate) struct CornerPicker {
    pub(crate) picks: Vec<PickedEntity>,
    /// Zweite Linie unter dem Cursor samt Cursor-Position
    hover: Option<(LineData, Vector)>,
}

impl CornerPicker {
    pub(crate) fn status(&self) -> CornerStatus {
        if self.picks.is_empty() {
            CornerStatus::SetEntity1
        } else {
            CornerStatus::SetEntity2
        }
    }

    fn first(&self) -> Option<(&LineData, Vector)> {
        let first = self.picks.first()?;
        Some((first.as_line()?, first.click))
    }

    /// Merkt die Linie unter dem Cursor für die Vorschau.
    pub(crate) fn hover(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.hover = None;
        if self.status() == CornerStatus::SetEntity2 {
            self.hover = ctx
                .catch_entity(pointer.raw, &[EntityKind::Line], ResolveLevel::None)
                .filter(|hit| !self.picks.iter().any(|p| p.same_as(hit)))
                .and_then(|hit| match hit.data {
                    EntityData::Line(l) => Some((l, pointer.raw)),
                    _ => None,
                });
        }
        ToolAction::UpdatePreview
    }

    /// Wählt eine Linie; mit der zweiten wird `solve` ausgewertet und das
    /// Ergebnis übernommen.
    pub(crate) fn click<F>(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>, solve: F) -> ToolAction
    where
        F: Fn(&LineData, Vector, &LineData, Vector) -> Option<CornerResult>,
    {
        let Some(picked) = pick(ctx, pointer.raw, &[EntityKind::Line], ResolveLevel::None, &self.picks) else {
            return ToolAction::Ignored;
        };
        let solved = match (self.first(), picked.as_line()) {
            (Some((l1, c1)), Some(l2)) => Some(solve(l1, c1, l2, picked.click)),
            _ => None,
        };
        self.picks.push(picked);
        let Some(result) = solved else {
            return ToolAction::Continue;
        };
        let Some(result) = result else {
            log::debug!("Ecke: Linien schneiden sich nicht bzw. Parameter zu groß");
            release_last(ctx.doc, &mut self.picks);
            return ToolAction::Ignored;
        };

        let mut entities = Vec::with_capacity(3);
        let mut replaced: Vec<EntityId> = Vec::new();
        if let Some((t1, t2)) = result.trimmed {
            entities.push(t1.into());
            entities.push(t2.into());
            replaced.extend(self.picks.iter().map(|p| p.id));
        }
        entities.push(result.corner);
        ctx.commit(entities, &replaced);
        release_all(ctx.doc, &mut self.picks);
        self.hover = None;
        ToolAction::Committed
    }

    pub(crate) fn back(&mut self, doc: &mut dyn Document) -> ToolAction {
        self.hover = None;
        match release_last(doc, &mut self.picks) {
            Some(_) => ToolAction::Continue,
            None => ToolAction::Finished,
        }
    }

    pub(crate) fn preview<F>(&self, solve: F) -> ToolPreview
    where
        F: Fn(&LineData, Vector, &LineData, Vector) -> Option<CornerResult>,
    {
        let (Some((l1, c1)), Some((l2, c2))) = (self.first(), self.hover.as_ref()) else {
            return ToolPreview::default();
        };
        let Some(result) = solve(l1, c1, l2, *c2) else {
            return ToolPreview::default();
        };
        let mut preview = ToolPreview::single(result.corner);
        if let Some((t1, t2)) = result.trimmed {
            preview.push(t1);
            preview.push(t2);
        }
        preview
    }

    pub(crate) fn reset(&mut self, doc: &mut dyn Document) {
        release_all(doc, &mut self.picks);
        self.hover = None;
    }
}
