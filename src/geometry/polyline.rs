//! Polylinie aus Scheitelpunkten und Bulges sowie die Bulge-Berechnung für
//! das nächste Segment.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::arc::ArcData;
use super::line::LineData;
use super::EntityData;
use crate::core::{Vector, TOLERANCE, TOLERANCE2, TOLERANCE_ANGLE};

/// Polylinie. `bulges[i]` gehört zum Segment von `vertices[i]` nach
/// `vertices[i + 1]` (bzw. zum Schluss-Segment bei `closed`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylineData {
    pub vertices: Vec<Vector>,
    pub bulges: Vec<f64>,
    pub closed: bool,
}

impl PolylineData {
    /// Polylinie mit einem Startpunkt.
    pub fn new(start: Vector) -> Self {
        Self {
            vertices: vec![start],
            bulges: vec![0.0],
            closed: false,
        }
    }

    /// Hängt einen Scheitelpunkt an; `bulge` gilt für das neue Segment.
    pub fn add_vertex(&mut self, vertex: Vector, bulge: f64) {
        if let Some(last) = self.bulges.last_mut() {
            *last = bulge;
        }
        self.vertices.push(vertex);
        self.bulges.push(0.0);
    }

    /// Entfernt den letzten Scheitelpunkt samt Segment.
    pub fn remove_last_vertex(&mut self) -> Option<Vector> {
        if self.vertices.len() <= 1 {
            return None;
        }
        let v = self.vertices.pop();
        self.bulges.pop();
        if let Some(last) = self.bulges.last_mut() {
            *last = 0.0;
        }
        v
    }

    /// Schließt die Polylinie mit dem angegebenen Bulge für das Schluss-Segment.
    pub fn close(&mut self, bulge: f64) {
        if let Some(last) = self.bulges.last_mut() {
            *last = bulge;
        }
        self.closed = true;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn segment_count(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    pub fn start_point(&self) -> Vector {
        self.vertices.first().copied().unwrap_or_default()
    }

    pub fn end_point(&self) -> Vector {
        if self.closed {
            return self.start_point();
        }
        self.vertices.last().copied().unwrap_or_default()
    }

    /// Segment `i` als atomare Entität (Linie oder Bogen).
    pub fn segment(&self, i: usize) -> Option<EntityData> {
        if i >= self.segment_count() {
            return None;
        }
        let a = self.vertices[i];
        let b = self.vertices[(i + 1) % self.vertices.len()];
        let bulge = self.bulges.get(i).copied().unwrap_or(0.0);
        Some(segment_between(a, b, bulge))
    }

    /// Zerlegt die Polylinie in ihre Segmente.
    pub fn segments(&self) -> Vec<EntityData> {
        (0..self.segment_count()).filter_map(|i| self.segment(i)).collect()
    }

    pub fn last_segment(&self) -> Option<EntityData> {
        self.segment_count().checked_sub(1).and_then(|i| self.segment(i))
    }
}

fn segment_between(a: Vector, b: Vector, bulge: f64) -> EntityData {
    match ArcData::from_2p_bulge(a, b, bulge) {
        Some(arc) => EntityData::Arc(arc),
        None => EntityData::Line(LineData::new(a, b)),
    }
}

// ── Segment-Modi ────────────────────────────────────────────────────

/// Zeichenmodus für das nächste Polylinien-Segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentMode {
    /// Gerades Segment
    #[default]
    Line,
    /// Bogen tangential an das vorherige Segment
    Tangential,
    /// Tangentialer Bogen mit festem Radius
    TanRad,
    /// Bogen mit festem eingeschlossenem Winkel
    Ang,
}

impl SegmentMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "line" => Some(SegmentMode::Line),
            "tangential" | "tan" => Some(SegmentMode::Tangential),
            "tanrad" => Some(SegmentMode::TanRad),
            "ang" | "angle" => Some(SegmentMode::Ang),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentMode::Line => "line",
            SegmentMode::Tangential => "tangential",
            SegmentMode::TanRad => "tanrad",
            SegmentMode::Ang => "ang",
        }
    }
}

/// Parameter der Bulge-Berechnung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeParams {
    pub mode: SegmentMode,
    pub radius: f64,
    /// Eingeschlossener Winkel in Grad (Modus `Ang`)
    pub angle: f64,
    pub reversed: bool,
}

/// Ergebnis von [`solve_bulge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeSolution {
    pub bulge: f64,
    /// Tatsächlicher Endpunkt; weicht nur im Modus `TanRad` vom Eingabepunkt ab
    pub end_point: Vector,
}

/// Austrittsrichtung eines Segments an seinem Endpunkt (in Laufrichtung).
pub fn exit_direction(segment: &EntityData) -> Option<f64> {
    match segment {
        EntityData::Line(l) => Some(l.direction2() + PI),
        EntityData::Arc(a) => Some(a.direction2() + PI),
        _ => None,
    }
}

/// Bulge des Segments von `start` nach `end` gemäß Modus.
///
/// Ohne vorheriges Segment verhalten sich die tangentialen Modi wie `Line`.
/// Entartete Eingaben liefern Bulge 0 statt eines Fehlers.
pub fn solve_bulge(params: &BulgeParams, previous: Option<&EntityData>, start: Vector, end: Vector) -> BulgeSolution {
    let straight = BulgeSolution {
        bulge: 0.0,
        end_point: end,
    };
    if start.squared_to(end) < TOLERANCE2 {
        return straight;
    }
    let direction = previous.and_then(exit_direction);
    match params.mode {
        SegmentMode::Line => straight,
        SegmentMode::Tangential => {
            let Some(dir) = direction else {
                return straight;
            };
            let delta = start.angle_to(end) - dir;
            let rem = delta - PI * (delta / PI).round();
            if rem.abs() > TOLERANCE_ANGLE {
                BulgeSolution {
                    bulge: (delta / 2.0).tan(),
                    end_point: end,
                }
            } else {
                straight
            }
        }
        SegmentMode::TanRad => {
            let Some(dir) = direction else {
                return straight;
            };
            match ArcData::from_2p_direction_radius(start, end, dir, params.radius) {
                Some(arc) => BulgeSolution {
                    bulge: arc.bulge(),
                    end_point: arc.end_point(),
                },
                None => straight,
            }
        }
        SegmentMode::Ang => {
            let sign = if params.reversed { -1.0 } else { 1.0 };
            let bulge = (sign * params.angle * PI / 720.0).tan();
            if bulge.is_finite() && bulge.abs() > TOLERANCE {
                BulgeSolution {
                    bulge,
                    end_point: end,
                }
            } else {
                straight
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn previous_line() -> EntityData {
        EntityData::Line(LineData::new(Vector::ZERO, Vector::new(10.0, 0.0)))
    }

    fn params(mode: SegmentMode) -> BulgeParams {
        BulgeParams {
            mode,
            radius: 10.0,
            angle: 90.0,
            reversed: false,
        }
    }

    #[test]
    fn tangential_continues_previous_direction() {
        let prev = previous_line();
        let sol = solve_bulge(&params(SegmentMode::Tangential), Some(&prev), Vector::new(10.0, 0.0), Vector::new(20.0, 10.0));
        assert_abs_diff_eq!(sol.bulge, (PI / 8.0).tan(), epsilon = 1e-12);
        let arc = ArcData::from_2p_bulge(Vector::new(10.0, 0.0), Vector::new(20.0, 10.0), sol.bulge)
            .expect("Bogen erwartet");
        assert_abs_diff_eq!(arc.direction1(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn tangential_in_line_gives_straight_segment() {
        let prev = previous_line();
        let sol = solve_bulge(&params(SegmentMode::Tangential), Some(&prev), Vector::new(10.0, 0.0), Vector::new(20.0, 0.0));
        assert_eq!(sol.bulge, 0.0);
    }

    #[test]
    fn tanrad_corrects_end_point() {
        let prev = previous_line();
        let sol = solve_bulge(&params(SegmentMode::TanRad), Some(&prev), Vector::new(10.0, 0.0), Vector::new(20.0, 12.0));
        // Endpunkt liegt auf dem Kreis um (10, 10) mit Radius 10
        assert_abs_diff_eq!(sol.end_point.distance_to(Vector::new(10.0, 10.0)), 10.0, epsilon = 1e-9);
        assert!(sol.bulge > 0.0);
    }

    #[test]
    fn fixed_angle_and_reversed() {
        let mut p = params(SegmentMode::Ang);
        let sol = solve_bulge(&p, None, Vector::ZERO, Vector::new(5.0, 0.0));
        assert_abs_diff_eq!(sol.bulge, (PI / 8.0).tan(), epsilon = 1e-12);
        p.reversed = true;
        let sol = solve_bulge(&p, None, Vector::ZERO, Vector::new(5.0, 0.0));
        assert_abs_diff_eq!(sol.bulge, -(PI / 8.0).tan(), epsilon = 1e-12);
    }

    #[test]
    fn closed_polyline_segments() {
        let mut poly = PolylineData::new(Vector::ZERO);
        poly.add_vertex(Vector::new(4.0, 0.0), 0.0);
        poly.add_vertex(Vector::new(4.0, 4.0), 0.5);
        assert_eq!(poly.segment_count(), 2);
        assert!(matches!(poly.segments()[1], EntityData::Arc(_)));
        poly.close(0.0);
        assert_eq!(poly.segment_count(), 3);
        assert_eq!(poly.end_point(), Vector::ZERO);
        assert_eq!(poly.remove_last_vertex(), Some(Vector::new(4.0, 4.0)));
    }
}
