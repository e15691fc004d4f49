//! Strecke: Abfragen und Geraden-Schnitt.

use serde::{Deserialize, Serialize};

use crate::core::{Quadratic, SolutionSet, Vector, TOLERANCE, TOLERANCE2};

/// Strecke von `start` nach `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub start: Vector,
    pub end: Vector,
}

impl LineData {
    pub fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Richtungswinkel am Start (Start → Ende).
    pub fn direction1(&self) -> f64 {
        self.start.angle_to(self.end)
    }

    /// Richtungswinkel am Ende (Ende → Start).
    pub fn direction2(&self) -> f64 {
        self.end.angle_to(self.start)
    }

    pub fn middle_point(&self) -> Vector {
        self.start.lerp(self.end, 0.5)
    }

    /// Innere Teilungspunkte bei `divisions` Punkten (Teilung in `divisions + 1` Stücke).
    pub fn middle_points(&self, divisions: usize) -> Vec<Vector> {
        let n = divisions.max(1);
        (1..=n)
            .map(|i| self.start.lerp(self.end, i as f64 / (n + 1) as f64))
            .collect()
    }

    /// Lotfußpunkt; bei `on_entity` auf die Strecke begrenzt.
    pub fn nearest_point_on(&self, coord: Vector, on_entity: bool) -> Vector {
        let dir = self.end - self.start;
        let len2 = dir.squared();
        if len2 < TOLERANCE2 {
            return self.start;
        }
        let mut t = (coord - self.start).dot(dir) / len2;
        if on_entity {
            t = t.clamp(0.0, 1.0);
        }
        self.start + dir * t
    }

    /// Punkt im Abstand `distance` vom `coord` näheren Endpunkt, entlang der Strecke.
    pub fn nearest_dist(&self, distance: f64, coord: Vector) -> Vector {
        let len = self.length();
        if len < TOLERANCE || distance > len {
            return Vector::invalid();
        }
        let (from, to) = if coord.squared_to(self.start) <= coord.squared_to(self.end) {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        from.lerp(to, distance / len)
    }

    /// Abstand eines Punkts zur unbegrenzten Geraden.
    pub fn distance_to_infinite(&self, coord: Vector) -> f64 {
        coord.distance_to(self.nearest_point_on(coord, false))
    }
}

/// Schnittpunkt zweier unbegrenzter Geraden.
///
/// Liefert genau einen Eintrag, der bei (innerhalb der Toleranz) parallelen
/// Geraden ungültig ist.
pub fn intersect_lines(l1: &LineData, l2: &LineData) -> SolutionSet {
    let hits = Quadratic::intersection(
        &Quadratic::from_line(l1.start, l1.end),
        &Quadratic::from_line(l2.start, l2.end),
    );
    SolutionSet::from_slice(&[hits.get(0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nearest_point_clamps_to_segment() {
        let line = LineData::new(Vector::ZERO, Vector::new(10.0, 0.0));
        let p = line.nearest_point_on(Vector::new(12.0, 3.0), true);
        assert_eq!(p, Vector::new(10.0, 0.0));
        let q = line.nearest_point_on(Vector::new(12.0, 3.0), false);
        assert_abs_diff_eq!(q.x, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn middle_points_split_evenly() {
        let line = LineData::new(Vector::ZERO, Vector::new(9.0, 0.0));
        let pts = line.middle_points(2);
        assert_eq!(pts.len(), 2);
        assert_abs_diff_eq!(pts[0].x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1].x, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn nearest_dist_starts_at_closer_end() {
        let line = LineData::new(Vector::ZERO, Vector::new(10.0, 0.0));
        let p = line.nearest_dist(2.0, Vector::new(9.0, 1.0));
        assert_abs_diff_eq!(p.x, 8.0, epsilon = 1e-12);
        assert!(!line.nearest_dist(11.0, Vector::ZERO).valid);
    }

    #[test]
    fn intersect_crossing_lines() {
        let l1 = LineData::new(Vector::ZERO, Vector::new(4.0, 4.0));
        let l2 = LineData::new(Vector::new(0.0, 4.0), Vector::new(4.0, 0.0));
        let hit = intersect_lines(&l1, &l2);
        assert_eq!(hit.len(), 1);
        assert_abs_diff_eq!(hit.get(0).x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.get(0).y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_give_invalid_solution() {
        let l1 = LineData::new(Vector::ZERO, Vector::new(1.0, 0.0));
        let l2 = LineData::new(Vector::new(0.0, 1.0), Vector::new(1.0, 1.0));
        let hit = intersect_lines(&l1, &l2);
        assert_eq!(hit.len(), 1);
        assert!(!hit.has_valid());
    }
}
