//! Gemeinsame Hilfsfunktionen für Konstruktions-Werkzeuge:
//! Entitäts-Auswahl mit Hervorhebung und Auswertung von Zahlen-Befehlen.

use crate::core::Vector;
use crate::document::{Document, EntityHit, EntityId, ResolveLevel};
use crate::geometry::{EntityData, EntityKind, LineData};
use crate::shared::evaluate;

use super::ToolContext;

#[cfg(test)]
pub mod testing;

/// Meldung bei nicht auswertbarer Zahleneingabe.
pub const INVALID_EXPRESSION: &str = "Not a valid expression";

/// Ausgewählte Entität (bzw. Polylinien-Segment) samt Klickposition.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedEntity {
    pub id: EntityId,
    pub segment: Option<usize>,
    pub data: EntityData,
    /// Rohe Klickposition (bestimmt z.B. die beizubehaltende Seite)
    pub click: Vector,
}

impl PickedEntity {
    pub fn from_hit(hit: EntityHit, click: Vector) -> Self {
        Self {
            id: hit.id,
            segment: hit.segment,
            data: hit.data,
            click,
        }
    }

    /// Dieselbe Entität bzw. dasselbe Segment?
    pub fn same_as(&self, hit: &EntityHit) -> bool {
        self.id == hit.id && self.segment == hit.segment
    }

    pub fn as_line(&self) -> Option<&LineData> {
        match &self.data {
            EntityData::Line(l) => Some(l),
            _ => None,
        }
    }
}

/// Fängt eine Entität der Arten `kinds` an der rohen Position und hebt sie
/// hervor. Bereits gewählte Entitäten werden nicht erneut angenommen.
pub fn pick(
    ctx: &mut ToolContext<'_>,
    raw: Vector,
    kinds: &[EntityKind],
    level: ResolveLevel,
    already: &[PickedEntity],
) -> Option<PickedEntity> {
    let hit = ctx.catch_entity(raw, kinds, level)?;
    if already.iter().any(|p| p.same_as(&hit)) {
        log::debug!("Entität {} bereits gewählt", hit.id);
        return None;
    }
    ctx.doc.set_highlighted(hit.id, true);
    Some(PickedEntity::from_hit(hit, raw))
}

/// Gibt die zuletzt gewählte Entität frei.
pub fn release_last(doc: &mut dyn Document, picks: &mut Vec<PickedEntity>) -> Option<PickedEntity> {
    let last = picks.pop()?;
    if !picks.iter().any(|p| p.id == last.id) {
        doc.set_highlighted(last.id, false);
    }
    Some(last)
}

/// Gibt alle gewählten Entitäten frei.
pub fn release_all(doc: &mut dyn Document, picks: &mut Vec<PickedEntity>) {
    for p in picks.drain(..) {
        doc.set_highlighted(p.id, false);
    }
}

/// Zerlegt einen Befehl in Schlüsselwort (klein geschrieben) und Rest.
pub fn split_command(text: &str) -> (String, &str) {
    let trimmed = text.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    }
}

/// Wertet einen Zahlen-Befehl aus; bei Fehler Meldung, Zustand bleibt.
pub fn parse_value(ctx: &mut ToolContext<'_>, text: &str) -> Option<f64> {
    match evaluate(text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ausdruck '{}' abgelehnt: {}", text, e);
            ctx.message(INVALID_EXPRESSION);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_command_separates_keyword() {
        assert_eq!(split_command("  Angle 30+15 "), ("angle".to_string(), "30+15"));
        assert_eq!(split_command("close"), ("close".to_string(), ""));
        assert_eq!(split_command(""), (String::new(), ""));
    }
}
