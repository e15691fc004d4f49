//! Geometrische Primitive (Beschreibungs-Records) und Konstruktions-Solver.
//!
//! Die Records sind reine Daten: Linie, Bogen, Kreis, Ellipse, Polylinie.
//! Jede Primitive bringt ihre Abfragen (End-/Mittelpunkte, nächster Punkt)
//! und ihre Konstruktions-Solver mit. Solver liefern `Option`/`SolutionSet`
//! und verändern bei Misserfolg nichts.

pub mod arc;
pub mod circle;
pub mod corner;
pub mod ellipse;
pub mod intersection;
pub mod line;
pub mod polyline;

pub use arc::ArcData;
pub use circle::{inscribe_3_lines, tan1_2p_centers, tan1_2p_closest, CircleData};
pub use corner::{bevel_lines, round_lines, CornerResult};
pub use ellipse::EllipseData;
pub use intersection::{intersect_entities, self_intersections};
pub use line::{intersect_lines, LineData};
pub use polyline::{exit_direction, solve_bulge, BulgeParams, BulgeSolution, PolylineData, SegmentMode};

use serde::{Deserialize, Serialize};

use crate::core::{Quadratic, Vector};

/// Entitäts-Art (Tag für die geschlossene Variantenmenge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Line,
    Arc,
    Circle,
    Ellipse,
    Polyline,
}

impl EntityKind {
    /// Container-Arten enthalten atomare Segmente.
    pub fn is_container(self) -> bool {
        matches!(self, EntityKind::Polyline)
    }
}

/// Geometrie einer Entität.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityData {
    Line(LineData),
    Arc(ArcData),
    Circle(CircleData),
    Ellipse(EllipseData),
    Polyline(PolylineData),
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::Line(_) => EntityKind::Line,
            EntityData::Arc(_) => EntityKind::Arc,
            EntityData::Circle(_) => EntityKind::Circle,
            EntityData::Ellipse(_) => EntityKind::Ellipse,
            EntityData::Polyline(_) => EntityKind::Polyline,
        }
    }

    /// Atomare Segmente: die Entität selbst oder die Segmente einer Polylinie.
    pub fn segments(&self) -> Vec<EntityData> {
        match self {
            EntityData::Polyline(p) => p.segments(),
            other => vec![other.clone()],
        }
    }

    /// Startpunkt (ungültig für geschlossene Kurven).
    pub fn start_point(&self) -> Vector {
        match self {
            EntityData::Line(l) => l.start,
            EntityData::Arc(a) => a.start_point(),
            EntityData::Ellipse(e) if !e.is_full() => e.start_point(),
            EntityData::Polyline(p) => p.start_point(),
            _ => Vector::invalid(),
        }
    }

    /// Endpunkt (ungültig für geschlossene Kurven).
    pub fn end_point(&self) -> Vector {
        match self {
            EntityData::Line(l) => l.end,
            EntityData::Arc(a) => a.end_point(),
            EntityData::Ellipse(e) if !e.is_full() => e.end_point(),
            EntityData::Polyline(p) => p.end_point(),
            _ => Vector::invalid(),
        }
    }

    /// Alle Endpunkte der atomaren Segmente.
    pub fn endpoints(&self) -> Vec<Vector> {
        self.segments()
            .iter()
            .flat_map(|s| [s.start_point(), s.end_point()])
            .filter(|v| v.valid)
            .collect()
    }

    /// Mittelpunkt (ungültig für Linien und Polylinien).
    pub fn center(&self) -> Vector {
        match self {
            EntityData::Arc(a) => a.center,
            EntityData::Circle(c) => c.center,
            EntityData::Ellipse(e) => e.center,
            _ => Vector::invalid(),
        }
    }

    /// Radius für Kreis und Bogen.
    pub fn radius(&self) -> Option<f64> {
        match self {
            EntityData::Arc(a) => Some(a.radius),
            EntityData::Circle(c) => Some(c.radius),
            _ => None,
        }
    }

    /// Teilungspunkte bei `divisions` gleichen Abschnitten-Grenzen.
    pub fn middle_points(&self, divisions: usize) -> Vec<Vector> {
        match self {
            EntityData::Line(l) => l.middle_points(divisions),
            EntityData::Arc(a) => a.middle_points(divisions),
            EntityData::Ellipse(e) if !e.is_full() => e.middle_points(divisions),
            EntityData::Polyline(p) => p
                .segments()
                .iter()
                .flat_map(|s| s.middle_points(divisions))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Nächster Punkt auf der Entität (bzw. ihrer Verlängerung bei
    /// `on_entity == false`) und dessen Distanz.
    pub fn nearest_point_on(&self, coord: Vector, on_entity: bool) -> (Vector, f64) {
        let point = match self {
            EntityData::Line(l) => l.nearest_point_on(coord, on_entity),
            EntityData::Arc(a) => a.nearest_point_on(coord, on_entity),
            EntityData::Circle(c) => c.nearest_point_on(coord),
            EntityData::Ellipse(e) => e.nearest_point_on(coord, on_entity),
            EntityData::Polyline(p) => {
                return p
                    .segments()
                    .iter()
                    .map(|s| s.nearest_point_on(coord, on_entity))
                    .fold((Vector::invalid(), crate::core::MAX_DISTANCE), |best, cur| {
                        if cur.1 < best.1 {
                            cur
                        } else {
                            best
                        }
                    });
            }
        };
        (point, coord.distance_to(point))
    }

    /// Distanz eines Punkts zur Entität.
    pub fn distance_to_point(&self, coord: Vector) -> f64 {
        self.nearest_point_on(coord, true).1
    }

    /// Punkt im Abstand `distance` vom nächstgelegenen Endpunkt entlang der Entität.
    pub fn nearest_dist(&self, distance: f64, coord: Vector) -> Vector {
        match self {
            EntityData::Line(l) => l.nearest_dist(distance, coord),
            EntityData::Arc(a) => a.nearest_dist(distance, coord),
            EntityData::Polyline(p) => p
                .segments()
                .iter()
                .map(|s| s.nearest_dist(distance, coord))
                .min_by(|a, b| coord.squared_to(*a).total_cmp(&coord.squared_to(*b)))
                .unwrap_or_default(),
            _ => Vector::invalid(),
        }
    }

    /// Liegt der Punkt (innerhalb `tolerance`) auf dem begrenzten Segment?
    pub fn is_point_on(&self, point: Vector, tolerance: f64) -> bool {
        self.segments()
            .iter()
            .any(|s| s.nearest_point_on(point, true).1 <= tolerance)
    }

    /// Implizite Darstellung der Trägerkurve (nur atomare Entitäten).
    pub fn to_quadratic(&self) -> Quadratic {
        match self {
            EntityData::Line(l) => Quadratic::from_line(l.start, l.end),
            EntityData::Arc(a) => Quadratic::from_circle(a.center, a.radius),
            EntityData::Circle(c) => Quadratic::from_circle(c.center, c.radius),
            EntityData::Ellipse(e) => Quadratic::from_ellipse(e.center, e.major_p, e.ratio),
            EntityData::Polyline(_) => Quadratic::invalid(),
        }
    }

    /// Verschiebt die Entität.
    pub fn move_by(&mut self, offset: Vector) {
        match self {
            EntityData::Line(l) => {
                l.start = l.start + offset;
                l.end = l.end + offset;
            }
            EntityData::Arc(a) => a.center = a.center + offset,
            EntityData::Circle(c) => c.center = c.center + offset,
            EntityData::Ellipse(e) => e.center = e.center + offset,
            EntityData::Polyline(p) => {
                for v in p.vertices.iter_mut() {
                    *v = *v + offset;
                }
            }
        }
    }
}

impl From<LineData> for EntityData {
    fn from(d: LineData) -> Self {
        EntityData::Line(d)
    }
}

impl From<ArcData> for EntityData {
    fn from(d: ArcData) -> Self {
        EntityData::Arc(d)
    }
}

impl From<CircleData> for EntityData {
    fn from(d: CircleData) -> Self {
        EntityData::Circle(d)
    }
}

impl From<EllipseData> for EntityData {
    fn from(d: EllipseData) -> Self {
        EntityData::Ellipse(d)
    }
}

impl From<PolylineData> for EntityData {
    fn from(d: PolylineData) -> Self {
        EntityData::Polyline(d)
    }
}
