//! Ellipse und elliptischer Bogen: Abfragen und Konstruktionen
//! (Brennpunkte+Punkt, Mittelpunkt+Punkte, Inellipse von vier Geraden).
//!
//! Winkel sind Parameterwinkel: `P(t) = c + û·a·cos t + v̂·b·sin t` mit
//! Hauptachsen-Richtung `û`, `v̂ = û⊥`, `a = |major_p|`, `b = a·ratio`.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat2, DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::line::{intersect_lines, LineData};
use crate::core::math::{correct_angle, is_angle_between};
use crate::core::{Vector, TOLERANCE, TOLERANCE2, TOLERANCE_ANGLE};

/// Abtastschritte für die Startwerte der Nächster-Punkt-Suche.
const NEAREST_SAMPLES: usize = 48;
const NEWTON_STEPS: usize = 8;

/// Relative Toleranz, mit der die Inellipse alle vier Berührbedingungen
/// erfüllen muss.
const INSCRIBE_RESIDUAL: f64 = 1.0e-6;

/// Ellipse bzw. elliptischer Bogen. `angle1 == angle2` bedeutet Vollellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseData {
    pub center: Vector,
    /// Hauptachsen-Endpunkt relativ zum Mittelpunkt
    pub major_p: Vector,
    /// Nebenachse / Hauptachse
    pub ratio: f64,
    pub angle1: f64,
    pub angle2: f64,
    pub reversed: bool,
}

impl EllipseData {
    /// Vollellipse.
    pub fn new(center: Vector, major_p: Vector, ratio: f64) -> Self {
        Self {
            center,
            major_p,
            ratio,
            angle1: 0.0,
            angle2: 0.0,
            reversed: false,
        }
    }

    /// Elliptischer Bogen zwischen zwei Parameterwinkeln.
    pub fn arc(center: Vector, major_p: Vector, ratio: f64, angle1: f64, angle2: f64, reversed: bool) -> Self {
        Self {
            center,
            major_p,
            ratio,
            angle1: correct_angle(angle1),
            angle2: correct_angle(angle2),
            reversed,
        }
    }

    // ── Konstruktionen ──────────────────────────────────────────

    /// Ellipse aus zwei Brennpunkten und der Summe der Brennpunkt-Abstände.
    ///
    /// Scheitert bei zusammenfallenden Brennpunkten oder wenn die Summe
    /// nicht größer als der Brennpunkt-Abstand ist.
    pub fn from_foci_distance(focus1: Vector, focus2: Vector, total: f64) -> Option<Self> {
        let focal = focus1.distance_to(focus2);
        if !focus1.valid || !focus2.valid || focal < TOLERANCE {
            return None;
        }
        let a = total / 2.0;
        let c = focal / 2.0;
        if a <= c + TOLERANCE {
            return None;
        }
        let b = (a * a - c * c).sqrt();
        let major_p = (focus2 - focus1).normalized() * a;
        Some(Self::new(focus1.lerp(focus2, 0.5), major_p, b / a))
    }

    /// Ellipse aus zwei Brennpunkten und einem Punkt auf der Ellipse.
    pub fn from_foci_point(focus1: Vector, focus2: Vector, point: Vector) -> Option<Self> {
        if !point.valid {
            return None;
        }
        let total = point.distance_to(focus1) + point.distance_to(focus2);
        Self::from_foci_distance(focus1, focus2, total)
    }

    /// Ellipse aus Mittelpunkt und zwei oder drei Punkten auf der Ellipse.
    ///
    /// Mit zwei Punkten wird eine achsenparallele Ellipse
    /// `A·x² + C·y² = 1` gesucht, mit drei Punkten die allgemeine
    /// `A·x² + B·xy + C·y² = 1` (Koordinaten relativ zum Mittelpunkt).
    pub fn from_center_points(center: Vector, points: &[Vector]) -> Option<Self> {
        if !center.valid || points.iter().any(|p| !p.valid) {
            return None;
        }
        let rel: Vec<DVec2> = points.iter().map(|p| (*p - center).to_dvec2()).collect();
        if rel.iter().any(|p| p.length_squared() < TOLERANCE2) {
            return None;
        }
        let shape = match rel.as_slice() {
            [p1, p2] => {
                let m = DMat2::from_cols(
                    DVec2::new(p1.x * p1.x, p2.x * p2.x),
                    DVec2::new(p1.y * p1.y, p2.y * p2.y),
                );
                if m.determinant().abs() < TOLERANCE * m.col(0).length().max(m.col(1).length()).powi(2) {
                    return None;
                }
                let ac = m.inverse() * DVec2::ONE;
                DMat2::from_cols(DVec2::new(ac.x, 0.0), DVec2::new(0.0, ac.y))
            }
            [p1, p2, p3] => {
                let row = |p: &DVec2| DVec3::new(p.x * p.x, p.x * p.y, p.y * p.y);
                let m = DMat3::from_cols(row(p1), row(p2), row(p3)).transpose();
                let scale = [p1, p2, p3].iter().fold(0.0_f64, |acc, p| acc.max(p.length_squared()));
                if m.determinant().abs() < TOLERANCE * scale.powi(3) {
                    return None;
                }
                let abc = m.inverse() * DVec3::ONE;
                DMat2::from_cols(DVec2::new(abc.x, abc.y / 2.0), DVec2::new(abc.y / 2.0, abc.z))
            }
            _ => return None,
        };
        Self::from_shape_matrix(center, shape)
    }

    /// Ellipse `(X - c)ᵀ M (X - c) = 1`; `M` muss positiv definit sein.
    pub fn from_shape_matrix(center: Vector, m: DMat2) -> Option<Self> {
        let p = m.x_axis.x;
        let q = m.y_axis.x;
        let r = m.y_axis.y;
        let mean = (p + r) / 2.0;
        let spread = (((p - r) / 2.0).powi(2) + q * q).sqrt();
        let lambda_min = mean - spread;
        let lambda_max = mean + spread;
        if !lambda_min.is_finite() || lambda_min <= TOLERANCE * lambda_max.abs().max(TOLERANCE) {
            return None;
        }
        // Kleinster Eigenwert gehört zur Hauptachse
        let direction = if q.abs() > TOLERANCE * spread.max(TOLERANCE) {
            Vector::new(q, lambda_min - p).normalized()
        } else if p <= r {
            Vector::new(1.0, 0.0)
        } else {
            Vector::new(0.0, 1.0)
        };
        if !direction.valid {
            return None;
        }
        let a = 1.0 / lambda_min.sqrt();
        let b = 1.0 / lambda_max.sqrt();
        Some(Self::new(center, direction * a, b / a))
    }

    /// Inellipse eines von vier Geraden gebildeten konvexen Vierecks.
    ///
    /// Die Inellipsen eines Vierecks bilden eine einparametrige Schar mit
    /// Mittelpunkten auf der Newton-Geraden. Gewählt wird die Ellipse um den
    /// Schwerpunkt der vier Ecken. Beim Parallelogramm ist die Wahl nicht
    /// eindeutig: dann `None`.
    pub fn inscribe_quadrilateral(lines: [&LineData; 4]) -> Option<Self> {
        let (order, corners) = convex_cycle(lines)?;
        let center = corners.iter().fold(Vector::ZERO, |acc, v| acc + *v) / 4.0;

        // Berührbedingung pro Gerade n·X + c = 0 (|n| = 1): nᵀ P n = (n·center + c)²
        let mut normal_eq = DMat3::ZERO;
        let mut rhs = DVec3::ZERO;
        let mut rows = Vec::with_capacity(4);
        for &i in &order {
            let line = lines[i];
            let n = (line.end - line.start).perpendicular().normalized();
            if !n.valid {
                return None;
            }
            let h = n.dot(center) - n.dot(line.start);
            let row = DVec3::new(n.x * n.x, 2.0 * n.x * n.y, n.y * n.y);
            let target = h * h;
            normal_eq += outer3(row);
            rhs += row * target;
            rows.push((row, target));
        }
        if normal_eq.determinant().abs() < TOLERANCE {
            return None;
        }
        let pqr = normal_eq.inverse() * rhs;
        let scale = rows.iter().fold(0.0_f64, |acc, (_, t)| acc.max(*t));
        if rows
            .iter()
            .any(|(row, target)| (row.dot(pqr) - target).abs() > INSCRIBE_RESIDUAL * scale.max(TOLERANCE))
        {
            return None;
        }
        let p_mat = DMat2::from_cols(DVec2::new(pqr.x, pqr.y), DVec2::new(pqr.y, pqr.z));
        if p_mat.x_axis.x <= 0.0 || p_mat.determinant() <= TOLERANCE2 {
            return None;
        }
        Self::from_shape_matrix(center, p_mat.inverse())
    }

    // ── Abfragen ────────────────────────────────────────────────

    pub fn is_full(&self) -> bool {
        (self.angle1 - self.angle2).abs() < TOLERANCE_ANGLE
    }

    pub fn major_radius(&self) -> f64 {
        self.major_p.magnitude()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_p.magnitude() * self.ratio
    }

    /// Richtungswinkel der Hauptachse.
    pub fn angle(&self) -> f64 {
        self.major_p.angle()
    }

    pub fn point_at(&self, t: f64) -> Vector {
        let u = self.major_p;
        let v = self.major_p.perpendicular() * self.ratio;
        self.center + u * t.cos() + v * t.sin()
    }

    fn derivative_at(&self, t: f64) -> Vector {
        let u = self.major_p;
        let v = self.major_p.perpendicular() * self.ratio;
        v * t.cos() - u * t.sin()
    }

    /// Parameterwinkel eines Punkts (Drehung um −Hauptachsenwinkel, y / ratio).
    pub fn param_of(&self, point: Vector) -> f64 {
        let local = (point - self.center).rotate(Vector::ZERO, -self.angle());
        if self.ratio.abs() < TOLERANCE {
            return local.angle();
        }
        Vector::new(local.x, local.y / self.ratio).angle()
    }

    pub fn start_point(&self) -> Vector {
        self.point_at(self.angle1)
    }

    pub fn end_point(&self) -> Vector {
        self.point_at(self.angle2)
    }

    /// Überstrichener Parameterbereich in `(0, 2π]`.
    pub fn angle_length(&self) -> f64 {
        if self.is_full() {
            return TAU;
        }
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

    fn param_at(&self, fraction: f64) -> f64 {
        let sweep = self.angle_length() * fraction;
        if self.reversed {
            self.angle1 - sweep
        } else {
            self.angle1 + sweep
        }
    }

    pub fn contains_param(&self, t: f64) -> bool {
        self.is_full() || is_angle_between(t, self.angle1, self.angle2, self.reversed)
    }

    pub fn middle_points(&self, divisions: usize) -> Vec<Vector> {
        let n = divisions.max(1);
        (1..=n)
            .map(|i| self.point_at(self.param_at(i as f64 / (n + 1) as f64)))
            .collect()
    }

    /// Nächster Punkt: Abtastung plus Newton-Verfeinerung auf
    /// `(P(t) - coord)·P'(t) = 0`.
    pub fn nearest_point_on(&self, coord: Vector, on_entity: bool) -> Vector {
        if !coord.valid || self.major_p.squared() < TOLERANCE2 {
            return Vector::invalid();
        }
        let restrict = on_entity && !self.is_full();
        let mut best_t = self.angle1;
        let mut best_d2 = f64::MAX;
        for i in 0..NEAREST_SAMPLES {
            let t = if restrict {
                self.param_at(i as f64 / (NEAREST_SAMPLES - 1) as f64)
            } else {
                TAU * i as f64 / NEAREST_SAMPLES as f64
            };
            let d2 = coord.squared_to(self.point_at(t));
            if d2 < best_d2 {
                best_d2 = d2;
                best_t = t;
            }
        }

        let mut t = best_t;
        for _ in 0..NEWTON_STEPS {
            let d = self.point_at(t) - coord;
            let d1 = self.derivative_at(t);
            let d2 = self.center - self.point_at(t);
            let f = d.dot(d1);
            let df = d1.dot(d1) + d.dot(d2);
            if df.abs() < TOLERANCE2 {
                break;
            }
            let step = f / df;
            t -= step;
            if step.abs() < TOLERANCE_ANGLE {
                break;
            }
        }
        let refined = self.point_at(t);
        let candidate = if coord.squared_to(refined) <= best_d2 { t } else { best_t };

        if restrict && !self.contains_param(correct_angle(candidate)) {
            let (s, e) = (self.start_point(), self.end_point());
            return if coord.squared_to(s) <= coord.squared_to(e) { s } else { e };
        }
        self.point_at(candidate)
    }

    /// Tauscht Haupt- und Nebenachse (für `ratio > 1`).
    ///
    /// Die Kurve bleibt gleich; Parameterwinkel verschieben sich um −π/2.
    pub fn switch_major_minor(&mut self) -> bool {
        if self.ratio.abs() < TOLERANCE {
            return false;
        }
        let full = self.is_full();
        self.major_p = self.major_p.perpendicular() * self.ratio;
        self.ratio = 1.0 / self.ratio;
        if !full {
            self.angle1 = correct_angle(self.angle1 - FRAC_PI_2);
            self.angle2 = correct_angle(self.angle2 - FRAC_PI_2);
        }
        true
    }
}

fn outer3(v: DVec3) -> DMat3 {
    DMat3::from_cols(v * v.x, v * v.y, v * v.z)
}

/// Sucht die zyklische Reihenfolge der vier Geraden, deren Nachbar-Schnitte
/// ein konvexes Viereck bilden. Liefert Reihenfolge und Ecken.
fn convex_cycle(lines: [&LineData; 4]) -> Option<([usize; 4], [Vector; 4])> {
    const ORDERS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 1, 3, 2], [0, 2, 1, 3]];
    'orders: for order in ORDERS {
        let mut corners = [Vector::invalid(); 4];
        for k in 0..4 {
            let a = lines[order[k]];
            let b = lines[order[(k + 1) % 4]];
            let hit = intersect_lines(a, b).get(0);
            if !hit.valid {
                continue 'orders;
            }
            corners[k] = hit;
        }
        let mut sign = 0.0_f64;
        for k in 0..4 {
            let e1 = corners[(k + 1) % 4] - corners[k];
            let e2 = corners[(k + 2) % 4] - corners[(k + 1) % 4];
            let c = e1.cross(e2);
            if c.abs() < TOLERANCE {
                continue 'orders;
            }
            if sign == 0.0 {
                sign = c.signum();
            } else if c.signum() != sign {
                continue 'orders;
            }
        }
        return Some((order, corners));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn foci_point_yields_expected_axes() {
        let e = EllipseData::from_foci_point(Vector::new(-3.0, 0.0), Vector::new(3.0, 0.0), Vector::new(0.0, 4.0))
            .expect("Ellipse erwartet");
        assert_abs_diff_eq!(e.major_radius(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e.minor_radius(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e.center.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn foci_fail_when_degenerate() {
        assert!(EllipseData::from_foci_distance(Vector::ZERO, Vector::ZERO, 5.0).is_none());
        assert!(EllipseData::from_foci_distance(Vector::ZERO, Vector::new(4.0, 0.0), 3.0).is_none());
        assert!(EllipseData::from_foci_distance(Vector::ZERO, Vector::new(4.0, 0.0), 4.0).is_none());
    }

    #[test]
    fn center_and_two_points_axis_aligned() {
        let e = EllipseData::from_center_points(Vector::ZERO, &[Vector::new(4.0, 0.0), Vector::new(0.0, 2.0)])
            .expect("Ellipse erwartet");
        assert_abs_diff_eq!(e.major_radius(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.ratio, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn center_and_three_points_on_rotated_ellipse() {
        let reference = EllipseData::new(Vector::new(1.0, 2.0), Vector::polar(5.0, 0.4), 0.6);
        let pts = [reference.point_at(0.3), reference.point_at(1.9), reference.point_at(4.0)];
        let e = EllipseData::from_center_points(reference.center, &pts).expect("Ellipse erwartet");
        assert_abs_diff_eq!(e.major_radius(), 5.0, epsilon = 1e-7);
        assert_abs_diff_eq!(e.ratio, 0.6, epsilon = 1e-7);
        let diff = (e.angle() - 0.4).rem_euclid(PI);
        assert!(diff < 1e-7 || PI - diff < 1e-7, "Hauptachse falsch: {}", e.angle());
    }

    #[test]
    fn inscribed_ellipse_touches_all_lines() {
        // Trapez
        let l1 = LineData::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0));
        let l2 = LineData::new(Vector::new(10.0, 0.0), Vector::new(7.0, 4.0));
        let l3 = LineData::new(Vector::new(7.0, 4.0), Vector::new(2.0, 4.0));
        let l4 = LineData::new(Vector::new(2.0, 4.0), Vector::new(0.0, 0.0));
        let e = EllipseData::inscribe_quadrilateral([&l1, &l3, &l2, &l4]).expect("Inellipse erwartet");
        let u = e.major_p.normalized();
        let v = u.perpendicular();
        for line in [&l1, &l2, &l3, &l4] {
            // Stützfunktion der Ellipse in Normalenrichtung = Abstand Mittelpunkt–Gerade
            let n = (line.end - line.start).perpendicular().normalized();
            let support = ((e.major_radius() * n.dot(u)).powi(2) + (e.minor_radius() * n.dot(v)).powi(2)).sqrt();
            let h = line.distance_to_infinite(e.center);
            assert_abs_diff_eq!(support, h, epsilon = 1e-6);
        }
    }

    #[test]
    fn parallelogram_is_not_unique() {
        let l1 = LineData::new(Vector::new(0.0, 0.0), Vector::new(4.0, 0.0));
        let l2 = LineData::new(Vector::new(4.0, 0.0), Vector::new(5.0, 3.0));
        let l3 = LineData::new(Vector::new(5.0, 3.0), Vector::new(1.0, 3.0));
        let l4 = LineData::new(Vector::new(1.0, 3.0), Vector::new(0.0, 0.0));
        assert!(EllipseData::inscribe_quadrilateral([&l1, &l2, &l3, &l4]).is_none());
    }

    #[test]
    fn switch_major_minor_keeps_points() {
        let mut e = EllipseData::arc(Vector::ZERO, Vector::new(2.0, 0.0), 1.5, 0.2, 2.0, false);
        let start = e.start_point();
        let end = e.end_point();
        assert!(e.switch_major_minor());
        assert_abs_diff_eq!(e.ratio, 1.0 / 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(e.start_point().x, start.x, epsilon = 1e-9);
        assert_abs_diff_eq!(e.start_point().y, start.y, epsilon = 1e-9);
        assert_abs_diff_eq!(e.end_point().x, end.x, epsilon = 1e-9);
        assert_abs_diff_eq!(e.end_point().y, end.y, epsilon = 1e-9);
    }

    #[test]
    fn nearest_point_on_full_ellipse() {
        let e = EllipseData::new(Vector::ZERO, Vector::new(4.0, 0.0), 0.5);
        let p = e.nearest_point_on(Vector::new(6.0, 0.0), true);
        assert_abs_diff_eq!(p.x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    }
}
