//! Kreis: Abfragen und Konstruktionen (Mittelpunkt+Radius, 2 und 3 Punkte,
//! Berührkreis an eine Kurve durch 2 Punkte, Inkreis dreier Geraden).

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::line::LineData;
use super::EntityData;
use crate::core::{Quadratic, SolutionSet, Vector, TOLERANCE, TOLERANCE15, TOLERANCE2};

/// Vollkreis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleData {
    pub center: Vector,
    pub radius: f64,
}

impl CircleData {
    pub fn new(center: Vector, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Kreis aus Mittelpunkt und Radius; `None` bei Radius ≈ 0.
    pub fn from_cr(center: Vector, radius: f64) -> Option<Self> {
        (center.valid && radius > TOLERANCE).then_some(Self { center, radius })
    }

    /// Kreis mit der Strecke `p1`–`p2` als Durchmesser.
    pub fn from_2p(p1: Vector, p2: Vector) -> Option<Self> {
        if p1.squared_to(p2) < TOLERANCE2 {
            return None;
        }
        Some(Self {
            center: p1.lerp(p2, 0.5),
            radius: p1.distance_to(p2) / 2.0,
        })
    }

    /// Umkreis dreier Punkte; `None` bei kollinearen Punkten.
    pub fn from_3p(p1: Vector, p2: Vector, p3: Vector) -> Option<Self> {
        if !p1.valid || !p2.valid || !p3.valid {
            return None;
        }
        let a = p2 - p1;
        let b = p3 - p1;
        let d = 2.0 * a.cross(b);
        let scale = a.squared().max(b.squared());
        if d.abs() <= TOLERANCE * scale.max(1.0) {
            return None;
        }
        let a2 = a.squared();
        let b2 = b.squared();
        let offset = Vector::new((b.y * a2 - a.y * b2) / d, (a.x * b2 - b.x * a2) / d);
        let center = p1 + offset;
        Some(Self {
            center,
            radius: offset.magnitude(),
        })
    }

    pub fn nearest_point_on(&self, coord: Vector) -> Vector {
        let d = coord - self.center;
        if d.squared() < TOLERANCE2 {
            return self.center + Vector::new(self.radius, 0.0);
        }
        self.center + Vector::polar(self.radius, d.angle())
    }

    pub fn contains(&self, point: Vector) -> bool {
        point.distance_to(self.center) <= self.radius + TOLERANCE
    }
}

// ── Berührkreis an eine Kurve durch zwei Punkte ─────────────────────

/// Alle Mittelpunkte von Kreisen durch `p0` und `p1`, die `curve` berühren.
///
/// Der Tangenten-Ort bezüglich `p0` wird mit der Mittelsenkrechten von
/// `p0`/`p1` geschnitten; die Kandidaten werden gegen die Berührbedingung
/// geprüft und dedupliziert. Unterstützt Linie, Bogen und Kreis.
pub fn tan1_2p_centers(curve: &EntityData, p0: Vector, p1: Vector) -> SolutionSet {
    if p0.squared_to(p1) < TOLERANCE2 {
        return SolutionSet::new();
    }
    let locus = match curve {
        EntityData::Line(l) => Quadratic::line_tangent_locus(l.start, l.end, p0),
        EntityData::Arc(a) => Quadratic::circle_tangent_locus(a.center, a.radius, p0),
        EntityData::Circle(c) => Quadratic::circle_tangent_locus(c.center, c.radius, p0),
        _ => return SolutionSet::new(),
    };
    let bisector = Quadratic::bisector(p0, p1);
    let candidates = Quadratic::intersection(&locus, &bisector);

    let mut centers = SolutionSet::new();
    for center in candidates.iter().copied().filter(|v| v.valid) {
        let ds = center.distance_to(p0);
        let tol = TOLERANCE * 1.0e3 * (1.0 + ds);
        let touches = match curve {
            EntityData::Line(l) => (l.distance_to_infinite(center) - ds).abs() <= tol,
            EntityData::Arc(a) => touches_circle(center, ds, a.center, a.radius, tol),
            EntityData::Circle(c) => touches_circle(center, ds, c.center, c.radius, tol),
            _ => false,
        };
        if !touches {
            continue;
        }
        if centers.iter().any(|c| c.squared_to(center) < TOLERANCE15) {
            continue;
        }
        centers.push(center);
    }
    centers.set_tangent(candidates.is_tangent());
    centers
}

/// Kreis um `center` mit Radius `ds` berührt den Kreis (`base`, `r`) von
/// außen oder innen.
fn touches_circle(center: Vector, ds: f64, base: Vector, r: f64, tol: f64) -> bool {
    let ds0 = center.distance_to(base);
    (ds0 - (ds + r)).abs() <= tol || (ds0 - (ds - r).abs()).abs() <= tol
}

/// Berührkreis mit dem Mittelpunkt aus `centers`, der `coord` am nächsten liegt.
pub fn tan1_2p_closest(centers: &SolutionSet, p0: Vector, coord: Vector) -> Option<CircleData> {
    let center = centers.closest(coord)?.point;
    CircleData::from_cr(center, center.distance_to(p0))
}

// ── Inkreis / Ankreise dreier Geraden ───────────────────────────────

/// Kreis, der die drei (unbegrenzten) Geraden berührt und dessen Mittelpunkt
/// `coord` am nächsten liegt.
///
/// Mit Einheitsnormalen `n_i` und `c_i = -n_i·p_i` gilt für den Mittelpunkt X
/// `σ_i (n_i·X + c_i) = r`. Jede Vorzeichenwahl (bis auf globales Vorzeichen)
/// liefert ein lineares 3×3-System; bis zu vier Lösungen (In- und Ankreise).
pub fn inscribe_3_lines(lines: [&LineData; 3], coord: Vector) -> Option<CircleData> {
    inscribe_3_lines_all(lines)
        .into_iter()
        .min_by(|a, b| coord.squared_to(a.center).total_cmp(&coord.squared_to(b.center)))
}

/// Alle Kreise, die drei Geraden berühren.
pub fn inscribe_3_lines_all(lines: [&LineData; 3]) -> Vec<CircleData> {
    let mut normals = [Vector::ZERO; 3];
    let mut offsets = [0.0; 3];
    for (i, line) in lines.iter().enumerate() {
        let n = (line.end - line.start).perpendicular().normalized();
        if !n.valid {
            return Vec::new();
        }
        normals[i] = n;
        offsets[i] = -n.dot(line.start);
    }

    const SIGNS: [[f64; 3]; 4] = [
        [1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    let mut result: Vec<CircleData> = Vec::new();
    for sign in SIGNS {
        // Zeilen: σ_i n_ix · x + σ_i n_iy · y - r = -σ_i c_i
        let rows: [DVec3; 3] = std::array::from_fn(|i| {
            DVec3::new(sign[i] * normals[i].x, sign[i] * normals[i].y, -1.0)
        });
        let m = DMat3::from_cols(rows[0], rows[1], rows[2]).transpose();
        if m.determinant().abs() < TOLERANCE {
            continue;
        }
        let rhs = DVec3::new(
            -sign[0] * offsets[0],
            -sign[1] * offsets[1],
            -sign[2] * offsets[2],
        );
        let sol = m.inverse() * rhs;
        // Globales Vorzeichen: negativer Radius entspricht der Spiegel-Wahl
        let radius = sol.z.abs();
        if !sol.is_finite() || radius <= TOLERANCE {
            continue;
        }
        let center = Vector::new(sol.x, sol.y);
        if result.iter().any(|c| c.center.squared_to(center) < TOLERANCE15) {
            continue;
        }
        result.push(CircleData { center, radius });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circumcircle_of_right_triangle() {
        let c = CircleData::from_3p(Vector::ZERO, Vector::new(4.0, 0.0), Vector::new(0.0, 3.0))
            .expect("Umkreis erwartet");
        assert_abs_diff_eq!(c.center.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.center.y, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(c.radius, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn collinear_points_have_no_circumcircle() {
        assert!(CircleData::from_3p(Vector::ZERO, Vector::new(1.0, 0.0), Vector::new(2.0, 0.0)).is_none());
    }

    #[test]
    fn tangent_circle_through_two_points_outside_circle() {
        let r = 2.0;
        let d = 1.5;
        let base = EntityData::Circle(CircleData::new(Vector::ZERO, r));
        let p0 = Vector::new(r + d, 0.0);
        let p1 = Vector::new(0.0, r + d);
        let centers = tan1_2p_centers(&base, p0, p1);
        assert!(centers.has_valid(), "mindestens eine Lösung erwartet");
        for c in centers.iter() {
            let sr = c.distance_to(p0);
            assert_abs_diff_eq!(c.distance_to(p1), sr, epsilon = 1e-8);
            let dc = c.magnitude();
            let touches = (dc - (r + sr)).abs() < 1e-7 || (dc - (r - sr).abs()).abs() < 1e-7;
            assert!(touches, "Kreis berührt den Basiskreis nicht: {c:?}");
        }
    }

    #[test]
    fn tangent_circle_to_line() {
        let base = EntityData::Line(LineData::new(Vector::new(-10.0, 0.0), Vector::new(10.0, 0.0)));
        let p0 = Vector::new(-1.0, 2.0);
        let p1 = Vector::new(1.0, 2.0);
        let centers = tan1_2p_centers(&base, p0, p1);
        assert_eq!(centers.len(), 1, "symmetrische Lage ergibt genau einen Kreis");
        let c = centers.get(0);
        assert_abs_diff_eq!(c.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 1.25, epsilon = 1e-9);
    }

    #[test]
    fn incircle_of_triangle() {
        let l1 = LineData::new(Vector::ZERO, Vector::new(4.0, 0.0));
        let l2 = LineData::new(Vector::new(4.0, 0.0), Vector::new(0.0, 3.0));
        let l3 = LineData::new(Vector::new(0.0, 3.0), Vector::ZERO);
        let all = inscribe_3_lines_all([&l1, &l2, &l3]);
        assert_eq!(all.len(), 4, "Inkreis und drei Ankreise erwartet");
        let c = inscribe_3_lines([&l1, &l2, &l3], Vector::new(1.0, 1.0)).expect("Inkreis erwartet");
        assert_abs_diff_eq!(c.center.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.center.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_have_no_incircle() {
        let l1 = LineData::new(Vector::ZERO, Vector::new(1.0, 0.0));
        let l2 = LineData::new(Vector::new(0.0, 1.0), Vector::new(1.0, 1.0));
        let l3 = LineData::new(Vector::new(0.0, 2.0), Vector::new(1.0, 2.0));
        assert!(inscribe_3_lines([&l1, &l2, &l3], Vector::ZERO).is_none());
    }
}
