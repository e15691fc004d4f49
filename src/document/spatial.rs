//! Spatial-Index (KD-Tree) über Referenzpunkten der Entitäten.

use kiddo::{KdTree, SquaredEuclidean};

use super::EntityId;
use crate::core::Vector;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMatch {
    /// ID der Entität, zu der der Punkt gehört
    pub entity_id: EntityId,
    pub point: Vector,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Index über einer Punktmenge (z. B. alle Endpunkte).
#[derive(Debug, Clone)]
pub struct PointIndex {
    tree: KdTree<f64, 2>,
    owners: Vec<EntityId>,
    points: Vec<Vector>,
}

impl PointIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            owners: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Baut einen Index aus `(Entität, Punkt)`-Paaren; ungültige Punkte
    /// werden übersprungen.
    pub fn from_points(entries: impl IntoIterator<Item = (EntityId, Vector)>) -> Self {
        let (owners, points): (Vec<EntityId>, Vec<Vector>) =
            entries.into_iter().filter(|(_, p)| p.valid).unzip();
        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        Self {
            tree: (&coords).into(),
            owners,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nächster Punkt zur Abfrageposition.
    pub fn nearest(&self, query: Vector) -> Option<PointMatch> {
        if self.is_empty() || !query.valid {
            return None;
        }
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let idx = result.item as usize;
        Some(PointMatch {
            entity_id: *self.owners.get(idx)?,
            point: *self.points.get(idx)?,
            distance: result.distance.sqrt(),
        })
    }

    /// Alle Punkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vector, radius: f64) -> Vec<PointMatch> {
        if self.is_empty() || !query.valid || radius.is_sign_negative() {
            return Vec::new();
        }
        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .filter_map(|entry| {
                let idx = entry.item as usize;
                Some(PointMatch {
                    entity_id: *self.owners.get(idx)?,
                    point: *self.points.get(idx)?,
                    distance: entry.distance.sqrt(),
                })
            })
            .collect::<Vec<_>>();
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::empty()
    }
}
