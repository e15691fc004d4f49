//! Vorschau als expliziter Übergabevertrag zwischen Werkzeug und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein Renderer sie konsumiert.
//! Die Vorschau besteht nur aus Wert-Deskriptoren und wird bei jedem
//! Ereignis komplett ersetzt.

use crate::core::Vector;
use crate::document::EntityId;
use crate::geometry::EntityData;

/// Flüchtige Vorschau des aktiven Werkzeugs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPreview {
    /// Vorschau-Geometrie (wird nicht ins Dokument übernommen)
    pub entities: Vec<EntityData>,
    /// Hilfspunkte (z. B. Mittelpunkt, Brennpunkte)
    pub reference_points: Vec<Vector>,
}

impl ToolPreview {
    /// Vorschau mit einer einzelnen Entität.
    pub fn single(data: impl Into<EntityData>) -> Self {
        Self {
            entities: vec![data.into()],
            reference_points: Vec::new(),
        }
    }

    /// Hängt einen Hilfspunkt an (ungültige Punkte werden übersprungen).
    pub fn with_reference(mut self, point: Vector) -> Self {
        if point.valid {
            self.reference_points.push(point);
        }
        self
    }

    pub fn push(&mut self, data: impl Into<EntityData>) {
        self.entities.push(data.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.reference_points.is_empty()
    }
}

/// Vom Renderer hervorzuhebende Entitäten plus aktuelle Vorschau.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewFrame {
    pub preview: ToolPreview,
    pub highlighted: Vec<EntityId>,
    /// Fang-Indikator (ungültig = keiner)
    pub snap_indicator: Vector,
}
