//! Dokument-Schicht: Entitäten, In-Memory-Zeichnung und die Schnittstellen,
//! über die Fangfunktionen lesen und Werkzeuge schreiben.

pub mod drawing;
pub mod spatial;
pub mod undo;

pub use drawing::Drawing;
pub use spatial::{PointIndex, PointMatch};
pub use undo::{UndoCycle, UndoLog, DEFAULT_UNDO_DEPTH};

use serde::{Deserialize, Serialize};

use crate::core::Vector;
use crate::geometry::{EntityData, EntityKind};

/// Eindeutige ID einer Entität im Dokument.
pub type EntityId = u64;

/// Entität im Dokument: Geometrie plus Zustands-Flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub data: EntityData,
    pub visible: bool,
    /// Von Modifikations-Werkzeugen ausgenommen (z. B. gerade bearbeitet)
    pub ignore_on_modification: bool,
    #[serde(skip)]
    pub highlighted: bool,
    /// Durch Undo entfernt bzw. durch eine Modifikation ersetzt
    #[serde(skip)]
    pub undone: bool,
}

impl Entity {
    pub fn new(id: EntityId, data: EntityData) -> Self {
        Self {
            id,
            data,
            visible: true,
            ignore_on_modification: false,
            highlighted: false,
            undone: false,
        }
    }

    /// Sichtbar und nicht rückgängig gemacht.
    pub fn is_active(&self) -> bool {
        self.visible && !self.undone
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }
}

/// Auflösungstiefe bei der Entitäts-Suche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveLevel {
    /// Ganze Entitäten (Polylinien als Einheit)
    #[default]
    None,
    /// Atomare Segmente (Polylinien zerlegt)
    All,
}

/// Treffer einer Entitäts-Suche.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHit {
    /// ID der (Top-Level-)Entität
    pub id: EntityId,
    /// Segment-Index innerhalb eines Containers
    pub segment: Option<usize>,
    /// Art des umgebenden Containers, falls das Segment verschachtelt ist
    pub container: Option<EntityKind>,
    /// Geometrie des Treffers (Entität oder Segment)
    pub data: EntityData,
    pub distance: f64,
}

impl EntityHit {
    /// Passt der Treffer zu einer der Arten (direkt oder über den Container)?
    pub fn matches(&self, kinds: &[EntityKind]) -> bool {
        kinds.is_empty()
            || kinds.contains(&self.data.kind())
            || self.container.is_some_and(|c| kinds.contains(&c))
    }
}

/// Lesender Zugriff auf die Zeichnung (Fangen, Entitäts-Suche).
///
/// Alle Abfragen liefern "nicht gefunden" als ungültigen Vektor bzw. `None`.
pub trait DrawingQuery {
    fn nearest_endpoint(&self, coord: Vector) -> Vector;
    fn nearest_center(&self, coord: Vector) -> Vector;
    fn nearest_middle(&self, coord: Vector, divisions: usize) -> Vector;
    fn nearest_dist(&self, distance: f64, coord: Vector) -> Vector;
    fn nearest_intersection(&self, coord: Vector) -> Vector;
    fn nearest_point_on_entity(&self, coord: Vector, on_entity: bool) -> Vector;
    fn nearest_entity(&self, coord: Vector, level: ResolveLevel, kinds: &[EntityKind]) -> Option<EntityHit>;
    fn entity(&self, id: EntityId) -> Option<&Entity>;
}

/// Schreibender Zugriff auf das Dokument.
pub trait DocumentSink {
    fn add_entity(&mut self, data: EntityData) -> EntityId;
    /// Markiert eine Entität als entfernt (rückgängig machbar).
    fn remove_entity(&mut self, id: EntityId) -> bool;
    fn start_undo_cycle(&mut self);
    fn add_undoable(&mut self, id: EntityId);
    fn end_undo_cycle(&mut self);
    /// Macht den letzten abgeschlossenen Zyklus rückgängig.
    fn undo_cycle(&mut self) -> bool;
    /// Stellt den zuletzt rückgängig gemachten Zyklus wieder her.
    fn redo_cycle(&mut self) -> bool;
    fn set_highlighted(&mut self, id: EntityId, highlighted: bool);
}

/// Vollständiges Dokument, wie es die Werkzeuge sehen.
pub trait Document: DrawingQuery + DocumentSink {}

impl<T: DrawingQuery + DocumentSink> Document for T {}
