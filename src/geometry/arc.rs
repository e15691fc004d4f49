//! Kreisbogen: Abfragen und Konstruktionen (3 Punkte, Richtung+Radius,
//! Richtung+Winkel, Bulge).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use super::circle::CircleData;
use crate::core::math::{angle_difference_abs, correct_angle, is_angle_between};
use crate::core::{Vector, TOLERANCE, TOLERANCE2, TOLERANCE_ANGLE};

/// Kreisbogen von `angle1` nach `angle2`; `reversed` = im Uhrzeigersinn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcData {
    pub center: Vector,
    pub radius: f64,
    pub angle1: f64,
    pub angle2: f64,
    pub reversed: bool,
}

impl ArcData {
    pub fn new(center: Vector, radius: f64, angle1: f64, angle2: f64, reversed: bool) -> Self {
        Self {
            center,
            radius,
            angle1,
            angle2,
            reversed,
        }
    }

    // ── Konstruktionen ──────────────────────────────────────────

    /// Bogen durch drei Punkte (Start, Zwischenpunkt, Ende).
    pub fn from_3p(p1: Vector, p2: Vector, p3: Vector) -> Option<Self> {
        let circle = CircleData::from_3p(p1, p2, p3)?;
        let reversed = (p2 - p1).cross(p3 - p1) < 0.0;
        Some(Self {
            center: circle.center,
            radius: circle.radius,
            angle1: circle.center.angle_to(p1),
            angle2: circle.center.angle_to(p3),
            reversed,
        })
    }

    /// Bogen ab `start` mit Start-Tangentenrichtung `direction1` und Radius.
    ///
    /// Der Endwinkel zeigt auf `end`; der tatsächliche Endpunkt liegt auf dem
    /// Kreis und weicht im Allgemeinen von `end` ab.
    pub fn from_2p_direction_radius(
        start: Vector,
        end: Vector,
        direction1: f64,
        radius: f64,
    ) -> Option<Self> {
        if radius < TOLERANCE || start.squared_to(end) < TOLERANCE2 {
            return None;
        }
        let ortho = Vector::polar(radius, direction1 + FRAC_PI_2);
        let center1 = start + ortho;
        let center2 = start - ortho;
        let center = if center1.distance_to(end) < center2.distance_to(end) {
            center1
        } else {
            center2
        };
        let mut arc = Self {
            center,
            radius,
            angle1: center.angle_to(start),
            angle2: center.angle_to(end),
            reversed: false,
        };
        if angle_difference_abs(arc.direction1(), direction1) > 0.1 {
            arc.reversed = true;
        }
        Some(arc)
    }

    /// Bogen ab `start` mit Start-Tangentenrichtung und eingeschlossenem Winkel.
    ///
    /// Der Radius folgt aus Sehnenlänge `|end - start|` und Winkel; die Seite
    /// aus der Lage von `end` relativ zur Tangente.
    pub fn from_2p_direction_angle(
        start: Vector,
        end: Vector,
        direction1: f64,
        angle_length: f64,
    ) -> Option<Self> {
        if angle_length <= TOLERANCE_ANGLE || angle_length >= TAU - TOLERANCE_ANGLE {
            return None;
        }
        let chord = start.distance_to(end);
        if chord < TOLERANCE {
            return None;
        }
        let radius = chord / (2.0 * (angle_length / 2.0).sin());
        let tangent = Vector::unit_from_angle(direction1);
        let reversed = tangent.cross(end - start) < 0.0;
        let normal_angle = if reversed {
            direction1 - FRAC_PI_2
        } else {
            direction1 + FRAC_PI_2
        };
        let center = start + Vector::polar(radius, normal_angle);
        let angle1 = center.angle_to(start);
        let angle2 = if reversed {
            correct_angle(angle1 - angle_length)
        } else {
            correct_angle(angle1 + angle_length)
        };
        Some(Self {
            center,
            radius,
            angle1,
            angle2,
            reversed,
        })
    }

    /// Bogen aus Sehne und Bulge (`bulge = tan(θ/4)`, negativ = im Uhrzeigersinn).
    ///
    /// Scheitert bei Bulge ≈ 0 (gerades Segment) oder zusammenfallenden Punkten.
    pub fn from_2p_bulge(start: Vector, end: Vector, bulge: f64) -> Option<Self> {
        if bulge.abs() < TOLERANCE || start.squared_to(end) < TOLERANCE2 {
            return None;
        }
        let alpha = bulge.atan() * 4.0;
        let middle = (start + end) / 2.0;
        let half_chord = start.distance_to(end) / 2.0;
        let radius = (half_chord / (alpha / 2.0).sin()).abs();
        let mut h = (radius * radius - half_chord * half_chord).abs().sqrt();
        let mut angle = start.angle_to(end);
        if bulge > 0.0 {
            angle += FRAC_PI_2;
        } else {
            angle -= FRAC_PI_2;
        }
        if alpha.abs() > PI {
            h = -h;
        }
        let center = middle + Vector::polar(h, angle);
        Some(Self {
            center,
            radius,
            angle1: center.angle_to(start),
            angle2: center.angle_to(end),
            reversed: bulge < 0.0,
        })
    }

    // ── Abfragen ────────────────────────────────────────────────

    pub fn start_point(&self) -> Vector {
        self.center + Vector::polar(self.radius, self.angle1)
    }

    pub fn end_point(&self) -> Vector {
        self.center + Vector::polar(self.radius, self.angle2)
    }

    /// Eingeschlossener Winkel in `(0, 2π]`.
    pub fn angle_length(&self) -> f64 {
        let raw = if self.reversed {
            self.angle1 - self.angle2
        } else {
            self.angle2 - self.angle1
        };
        let len = correct_angle(raw);
        if len < TOLERANCE_ANGLE {
            TAU
        } else {
            len
        }
    }

    pub fn length(&self) -> f64 {
        self.angle_length() * self.radius
    }

    /// Bulge des Bogens (`tan(θ/4)`, negativ wenn im Uhrzeigersinn).
    pub fn bulge(&self) -> f64 {
        let b = (self.angle_length() / 4.0).tan();
        if self.reversed {
            -b
        } else {
            b
        }
    }

    /// Tangentenrichtung am Start (in Laufrichtung).
    pub fn direction1(&self) -> f64 {
        if self.reversed {
            correct_angle(self.angle1 - FRAC_PI_2)
        } else {
            correct_angle(self.angle1 + FRAC_PI_2)
        }
    }

    /// Tangentenrichtung am Ende (zurück in den Bogen).
    pub fn direction2(&self) -> f64 {
        if self.reversed {
            correct_angle(self.angle2 + FRAC_PI_2)
        } else {
            correct_angle(self.angle2 - FRAC_PI_2)
        }
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        is_angle_between(angle, self.angle1, self.angle2, self.reversed)
    }

    /// Winkel nach `t ∈ [0, 1]` des Bogens.
    fn angle_at(&self, t: f64) -> f64 {
        let sweep = self.angle_length() * t;
        if self.reversed {
            self.angle1 - sweep
        } else {
            self.angle1 + sweep
        }
    }

    pub fn middle_points(&self, divisions: usize) -> Vec<Vector> {
        let n = divisions.max(1);
        (1..=n)
            .map(|i| self.center + Vector::polar(self.radius, self.angle_at(i as f64 / (n + 1) as f64)))
            .collect()
    }

    pub fn nearest_point_on(&self, coord: Vector, on_entity: bool) -> Vector {
        let d = coord - self.center;
        if d.squared() < TOLERANCE2 {
            return self.start_point();
        }
        let angle = d.angle();
        if !on_entity || self.contains_angle(angle) {
            return self.center + Vector::polar(self.radius, angle);
        }
        let (s, e) = (self.start_point(), self.end_point());
        if coord.squared_to(s) <= coord.squared_to(e) {
            s
        } else {
            e
        }
    }

    /// Punkt mit Bogenlänge `distance` vom `coord` näheren Endpunkt.
    pub fn nearest_dist(&self, distance: f64, coord: Vector) -> Vector {
        if self.radius < TOLERANCE || distance > self.length() {
            return Vector::invalid();
        }
        let sweep = distance / self.radius;
        let from_start = coord.squared_to(self.start_point()) <= coord.squared_to(self.end_point());
        // Vom Start aus in Laufrichtung, vom Ende aus dagegen
        let forward = from_start != self.reversed;
        let base = if from_start { self.angle1 } else { self.angle2 };
        let angle = if forward { base + sweep } else { base - sweep };
        self.center + Vector::polar(self.radius, angle)
    }
}
