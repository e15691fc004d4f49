//! Implizite Kurven zweiten Grades (Kegelschnitte und Geraden).
//!
//! `a·x² + b·xy + c·y² + d·x + e·y + f = 0`. Verschwindet der quadratische
//! Anteil, ist die Kurve eine Gerade (`is_linear`). Tangenten-Orte für die
//! Kreis-Konstruktion werden ebenfalls in dieser Form dargestellt und über
//! [`Quadratic::intersection`] geschnitten.

use glam::{DMat2, DMat3, DVec2, DVec3};

use super::math::{solve_quadratic, solve_quartic, TOLERANCE, TOLERANCE15, TOLERANCE2};
use super::solutions::SolutionSet;
use super::vector::Vector;

/// Relative Rest-Toleranz, mit der ein polierter Schnittpunkt beide Kurven
/// erfüllen muss.
const RESIDUAL_TOLERANCE: f64 = 1.0e-6;

/// Drehwinkel, die bei verschwindenden y²-Koeffizienten probiert werden.
const ROTATION_CANDIDATES: [f64; 4] = [
    0.0,
    std::f64::consts::FRAC_PI_4,
    std::f64::consts::FRAC_PI_3,
    std::f64::consts::FRAC_PI_6,
];

/// Kurve zweiten Grades in allgemeiner impliziter Form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    /// Koeffizienten `[a, b, c, d, e, f]`
    coeffs: [f64; 6],
    linear: bool,
    valid: bool,
}

impl Quadratic {
    /// Erstellt eine Kurve aus den sechs Koeffizienten.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        let coeffs = [a, b, c, d, e, f];
        let scale = coeffs.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let quad_scale = a.abs().max(b.abs()).max(c.abs());
        let linear = quad_scale <= TOLERANCE * scale;
        let lin_scale = d.abs().max(e.abs());
        let valid = scale > 0.0
            && coeffs.iter().all(|v| v.is_finite())
            && (!linear || lin_scale > TOLERANCE * scale);
        Self {
            coeffs: if linear { [0.0, 0.0, 0.0, d, e, f] } else { coeffs },
            linear,
            valid,
        }
    }

    /// Ungültige Kurve (kein geometrischer Ort).
    pub fn invalid() -> Self {
        Self {
            coeffs: [0.0; 6],
            linear: false,
            valid: false,
        }
    }

    /// Gerade durch zwei Punkte; ungültig wenn die Punkte zusammenfallen.
    pub fn from_line(p1: Vector, p2: Vector) -> Self {
        if p1.squared_to(p2) < TOLERANCE2 {
            return Self::invalid();
        }
        let normal = (p2 - p1).perpendicular();
        Self::new(0.0, 0.0, 0.0, normal.x, normal.y, -normal.dot(p1))
    }

    /// Kreis um `center` mit Radius `radius`.
    pub fn from_circle(center: Vector, radius: f64) -> Self {
        if !center.valid || radius < TOLERANCE {
            return Self::invalid();
        }
        Self::from_symmetric(DMat2::IDENTITY, center, radius * radius)
    }

    /// Ellipse aus Mittelpunkt, Hauptachsen-Vektor und Achsenverhältnis.
    pub fn from_ellipse(center: Vector, major_p: Vector, ratio: f64) -> Self {
        let major = major_p.magnitude();
        let minor = major * ratio;
        if !center.valid || major < TOLERANCE || minor < TOLERANCE {
            return Self::invalid();
        }
        let u = major_p.to_dvec2() / major;
        let v = u.perp();
        let m = outer(u) / (major * major) + outer(v) / (minor * minor);
        Self::from_symmetric(m, center, 1.0)
    }

    /// Ort aller Kreismittelpunkte, deren Kreis durch `point` geht und den
    /// Kreis (`center`, `radius`) berührt.
    ///
    /// Mit `d1 = |X - center|`, `d2 = |X - point|` gilt `|d1 ± d2| = radius`,
    /// also `(d1² - d2²)² - 2r²(d1² + d2²) + r⁴ = 0`. Da `d1² - d2²` linear
    /// in X ist, bleibt die Gleichung quadratisch.
    pub fn circle_tangent_locus(center: Vector, radius: f64, point: Vector) -> Self {
        if !center.valid || !point.valid || radius < TOLERANCE {
            return Self::invalid();
        }
        let r2 = radius * radius;
        let alpha = 2.0 * (point.x - center.x);
        let beta = 2.0 * (point.y - center.y);
        let gamma = center.squared() - point.squared();
        Self::new(
            alpha * alpha - 4.0 * r2,
            2.0 * alpha * beta,
            beta * beta - 4.0 * r2,
            2.0 * alpha * gamma + 4.0 * r2 * (center.x + point.x),
            2.0 * beta * gamma + 4.0 * r2 * (center.y + point.y),
            gamma * gamma - 2.0 * r2 * (center.squared() + point.squared()) + r2 * r2,
        )
    }

    /// Ort aller Kreismittelpunkte, deren Kreis durch `point` geht und die
    /// Gerade durch `p1`, `p2` berührt (Parabel mit Brennpunkt `point`).
    pub fn line_tangent_locus(p1: Vector, p2: Vector, point: Vector) -> Self {
        let normal = (p2 - p1).perpendicular().normalized();
        if !normal.valid || !point.valid {
            return Self::invalid();
        }
        let s = normal.dot(p1);
        Self::new(
            1.0 - normal.x * normal.x,
            -2.0 * normal.x * normal.y,
            1.0 - normal.y * normal.y,
            -2.0 * point.x + 2.0 * s * normal.x,
            -2.0 * point.y + 2.0 * s * normal.y,
            point.squared() - s * s,
        )
    }

    /// Mittelsenkrechte von `p0` und `p1`.
    pub fn bisector(p0: Vector, p1: Vector) -> Self {
        if p0.squared_to(p1) < TOLERANCE2 {
            return Self::invalid();
        }
        Self::new(
            0.0,
            0.0,
            0.0,
            2.0 * (p0.x - p1.x),
            2.0 * (p0.y - p1.y),
            p1.squared() - p0.squared(),
        )
    }

    /// `(X - center)ᵀ M (X - center) - k = 0`
    fn from_symmetric(m: DMat2, center: Vector, k: f64) -> Self {
        let c = center.to_dvec2();
        let mc = m * c;
        Self::new(
            m.x_axis.x,
            2.0 * m.y_axis.x,
            m.y_axis.y,
            -2.0 * mc.x,
            -2.0 * mc.y,
            c.dot(mc) - k,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_linear(&self) -> bool {
        self.linear
    }

    /// Koeffizienten `[a, b, c, d, e, f]`.
    pub fn coefficients(&self) -> [f64; 6] {
        self.coeffs
    }

    /// Wert der impliziten Gleichung am Punkt.
    pub fn eval(&self, p: DVec2) -> f64 {
        let [a, b, c, d, e, f] = self.coeffs;
        a * p.x * p.x + b * p.x * p.y + c * p.y * p.y + d * p.x + e * p.y + f
    }

    /// Summe der Beträge aller Terme (Skala für relative Residuen).
    fn magnitude_at(&self, p: DVec2) -> f64 {
        let [a, b, c, d, e, f] = self.coeffs;
        (a * p.x * p.x).abs()
            + (b * p.x * p.y).abs()
            + (c * p.y * p.y).abs()
            + (d * p.x).abs()
            + (e * p.y).abs()
            + f.abs()
    }

    /// Gradient der impliziten Gleichung.
    pub fn gradient(&self, p: DVec2) -> DVec2 {
        let [a, b, c, d, e, _] = self.coeffs;
        DVec2::new(2.0 * a * p.x + b * p.y + d, b * p.x + 2.0 * c * p.y + e)
    }

    /// Homogene 3×3-Matrixform.
    fn to_matrix(self) -> DMat3 {
        let [a, b, c, d, e, f] = self.coeffs;
        DMat3::from_cols(
            DVec3::new(a, b / 2.0, d / 2.0),
            DVec3::new(b / 2.0, c, e / 2.0),
            DVec3::new(d / 2.0, e / 2.0, f),
        )
    }

    fn from_matrix(m: DMat3) -> Self {
        Self::new(
            m.x_axis.x,
            m.y_axis.x + m.x_axis.y,
            m.y_axis.y,
            m.z_axis.x + m.x_axis.z,
            m.z_axis.y + m.y_axis.z,
            m.z_axis.z,
        )
    }

    /// Kurve nach Anwendung der inversen Punkttransformation `t_inv`.
    fn transformed(&self, t_inv: DMat3) -> Self {
        if !self.valid {
            return *self;
        }
        Self::from_matrix(t_inv.transpose() * self.to_matrix() * t_inv)
    }

    /// Dreht die Kurve um den Ursprung.
    pub fn rotated(&self, angle: f64) -> Self {
        let (s, c) = (-angle).sin_cos();
        // Inverse Drehung als homogene Matrix
        let t_inv = DMat3::from_cols(
            DVec3::new(c, s, 0.0),
            DVec3::new(-s, c, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        );
        self.transformed(t_inv)
    }

    /// Verschiebt die Kurve um `offset`.
    pub fn moved(&self, offset: Vector) -> Self {
        let t_inv = DMat3::from_cols(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(-offset.x, -offset.y, 1.0),
        );
        self.transformed(t_inv)
    }

    /// Schnittpunkte zweier Kurven.
    ///
    /// Doppelwurzeln (Berührungen) setzen das Tangenten-Flag der Ergebnismenge.
    pub fn intersection(q1: &Quadratic, q2: &Quadratic) -> SolutionSet {
        if !q1.valid || !q2.valid {
            return SolutionSet::new();
        }
        match (q1.linear, q2.linear) {
            (true, true) => line_line(q1, q2),
            (true, false) => line_conic(q1, q2),
            (false, true) => line_conic(q2, q1),
            (false, false) => conic_conic(q1, q2),
        }
    }
}

fn outer(v: DVec2) -> DMat2 {
    DMat2::from_cols(v * v.x, v * v.y)
}

fn line_line(l1: &Quadratic, l2: &Quadratic) -> SolutionSet {
    let [_, _, _, d1, e1, f1] = l1.coeffs;
    let [_, _, _, d2, e2, f2] = l2.coeffs;
    let m = DMat2::from_cols(DVec2::new(d1, d2), DVec2::new(e1, e2));
    let det = m.determinant();
    let scale = (d1.abs() + e1.abs()) * (d2.abs() + e2.abs());
    if det.abs() <= TOLERANCE * scale {
        return SolutionSet::new();
    }
    let p = m.inverse() * DVec2::new(-f1, -f2);
    SolutionSet::from_slice(&[Vector::from(p)])
}

/// Schnitt Gerade ∩ Kegelschnitt über die parametrisierte Gerade.
fn line_conic(line: &Quadratic, conic: &Quadratic) -> SolutionSet {
    let [_, _, _, d, e, f] = line.coeffs;
    let n2 = d * d + e * e;
    let p0 = DVec2::new(d, e) * (-f / n2);
    let dir = DVec2::new(-e, d) / n2.sqrt();

    let [a, b, c, dc, ec, _] = conic.coeffs;
    let m = DMat2::from_cols(DVec2::new(a, b / 2.0), DVec2::new(b / 2.0, c));
    let qa = dir.dot(m * dir);
    let qb = 2.0 * p0.dot(m * dir) + DVec2::new(dc, ec).dot(dir);
    let qc = conic.eval(p0);

    let roots = solve_quadratic(qa, qb, qc);
    let mut result: SolutionSet = roots
        .values
        .iter()
        .map(|t| Vector::from(p0 + dir * *t))
        .collect();
    result.set_tangent(roots.double_root);
    result
}

/// Schnitt zweier echter Kegelschnitte.
fn conic_conic(q1: &Quadratic, q2: &Quadratic) -> SolutionSet {
    // Proportionale quadratische Anteile (z. B. zwei Kreise): Differenz ist linear
    let quad1 = DVec3::new(q1.coeffs[0], q1.coeffs[1], q1.coeffs[2]);
    let quad2 = DVec3::new(q2.coeffs[0], q2.coeffs[1], q2.coeffs[2]);
    let k = quad2.dot(quad1) / quad1.dot(quad1);
    if (quad2 - quad1 * k).length() <= TOLERANCE * quad2.length() {
        let [_, _, _, d1, e1, f1] = q1.coeffs;
        let [_, _, _, d2, e2, f2] = q2.coeffs;
        let radical = Quadratic::new(0.0, 0.0, 0.0, d2 - k * d1, e2 - k * e1, f2 - k * f1);
        if !radical.valid || !radical.linear {
            return SolutionSet::new();
        }
        return line_conic(&radical, q1);
    }

    let scale = quad1.abs().max_element().max(quad2.abs().max_element());
    let angle = ROTATION_CANDIDATES
        .iter()
        .copied()
        .find(|angle| {
            let (r1, r2) = (q1.rotated(*angle), q2.rotated(*angle));
            r1.coeffs[2].abs().max(r2.coeffs[2].abs()) > TOLERANCE * scale * 1.0e3
        })
        .unwrap_or(0.0);

    let (r1, r2) = (q1.rotated(angle), q2.rotated(angle));
    let mut result = resultant_intersection(&r1, &r2);
    result.rotate(Vector::ZERO, -angle);
    result
}

/// Eliminiert y über die Sylvester-Resultante und löst die Quartik in x.
fn resultant_intersection(q1: &Quadratic, q2: &Quadratic) -> SolutionSet {
    let [a1, b1, c1, d1, e1, f1] = q1.coeffs;
    let [a2, b2, c2, d2, e2, f2] = q2.coeffs;

    // Als Polynome in y: A·y² + B(x)·y + C(x), Koeffizienten aufsteigend in x
    let (ya1, yb1, yc1) = (c1, [e1, b1], [f1, d1, a1]);
    let (ya2, yb2, yc2) = (c2, [e2, b2], [f2, d2, a2]);

    let p = poly_sub(&poly_scale(&yc2, ya1), &poly_scale(&yc1, ya2));
    let q = poly_sub(&poly_scale(&yb2, ya1), &poly_scale(&yb1, ya2));
    let r = poly_sub(&poly_mul(&yb1, &yc2), &poly_mul(&yb2, &yc1));
    let res = poly_sub(&poly_mul(&p, &p), &poly_mul(&q, &r));

    let coeff = |i: usize| res.get(i).copied().unwrap_or(0.0);
    let roots = solve_quartic(coeff(4), coeff(3), coeff(2), coeff(1), coeff(0));

    let primary = if ya1.abs() >= ya2.abs() { q1 } else { q2 };
    let [pa, pb, pc, pd, pe, pf] = primary.coeffs;

    let mut result = SolutionSet::new();
    for x in roots.values {
        // Zu einer Wurzel x können zwei Schnittpunkte gehören (symmetrische Lage)
        let ys = solve_quadratic(pc, pb * x + pe, pa * x * x + pd * x + pf);
        for y in ys.values {
            let polished = newton_polish(q1, q2, DVec2::new(x, y));
            let within = |q: &Quadratic| {
                q.eval(polished).abs() <= RESIDUAL_TOLERANCE * q.magnitude_at(polished).max(1.0)
            };
            if !within(q1) || !within(q2) {
                continue;
            }
            let v = Vector::from(polished);
            if result.iter().all(|s| s.squared_to(v) >= TOLERANCE15) {
                if is_touching(q1, q2, polished) {
                    result.set_tangent(true);
                }
                result.push(v);
            }
        }
    }
    result
}

/// Parallele Gradienten am Schnittpunkt bedeuten Berührung.
fn is_touching(q1: &Quadratic, q2: &Quadratic, p: DVec2) -> bool {
    let g1 = q1.gradient(p);
    let g2 = q2.gradient(p);
    g1.perp_dot(g2).abs() <= 1.0e-6 * g1.length() * g2.length()
}

/// Newton-Verfeinerung auf dem Gleichungssystem `q1 = q2 = 0`.
fn newton_polish(q1: &Quadratic, q2: &Quadratic, mut p: DVec2) -> DVec2 {
    for _ in 0..6 {
        let f = DVec2::new(q1.eval(p), q2.eval(p));
        let g1 = q1.gradient(p);
        let g2 = q2.gradient(p);
        let jac = DMat2::from_cols(DVec2::new(g1.x, g2.x), DVec2::new(g1.y, g2.y));
        let det = jac.determinant();
        if det.abs() < f64::EPSILON * (g1.length_squared() + g2.length_squared()) {
            break;
        }
        let step = jac.inverse() * f;
        p -= step;
        if step.length_squared() < TOLERANCE2 {
            break;
        }
    }
    p
}

// ── Polynom-Hilfen (Koeffizienten aufsteigend) ──────────────────────

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

fn poly_scale(a: &[f64], k: f64) -> Vec<f64> {
    a.iter().map(|v| v * k).collect()
}

fn poly_sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| a.get(i).copied().unwrap_or(0.0) - b.get(i).copied().unwrap_or(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn line_cuts_circle_twice() {
        let circle = Quadratic::from_circle(Vector::ZERO, 5.0);
        let line = Quadratic::from_line(Vector::new(-10.0, 3.0), Vector::new(10.0, 3.0));
        let hits = Quadratic::intersection(&circle, &line);
        assert_eq!(hits.len(), 2);
        for p in &hits {
            assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-9);
            assert_abs_diff_eq!(p.x.abs(), 4.0, epsilon = 1e-9);
        }
        assert!(!hits.is_tangent());
    }

    #[test]
    fn tangent_line_sets_flag() {
        let circle = Quadratic::from_circle(Vector::ZERO, 2.0);
        let line = Quadratic::from_line(Vector::new(-5.0, 2.0), Vector::new(5.0, 2.0));
        let hits = Quadratic::intersection(&line, &circle);
        assert_eq!(hits.len(), 1);
        assert!(hits.is_tangent());
        assert_abs_diff_eq!(hits.get(0).x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn two_circles_use_radical_line() {
        let c1 = Quadratic::from_circle(Vector::ZERO, 5.0);
        let c2 = Quadratic::from_circle(Vector::new(8.0, 0.0), 5.0);
        let hits = Quadratic::intersection(&c1, &c2);
        assert_eq!(hits.len(), 2);
        for p in &hits {
            assert_abs_diff_eq!(p.x, 4.0, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y.abs(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn ellipse_and_circle_intersect_via_quartic() {
        // x²/16 + y²/4 = 1 und x² + y² = 9
        let ellipse = Quadratic::from_ellipse(Vector::ZERO, Vector::new(4.0, 0.0), 0.5);
        let circle = Quadratic::from_circle(Vector::ZERO, 3.0);
        let hits = Quadratic::intersection(&ellipse, &circle);
        assert_eq!(hits.len(), 4);
        let x = (20.0_f64 / 3.0).sqrt();
        let y = (7.0_f64 / 3.0).sqrt();
        for p in &hits {
            assert_abs_diff_eq!(p.x.abs(), x, epsilon = 1e-7);
            assert_abs_diff_eq!(p.y.abs(), y, epsilon = 1e-7);
        }
    }

    #[test]
    fn parallel_lines_have_no_solution() {
        let l1 = Quadratic::from_line(Vector::ZERO, Vector::new(1.0, 1.0));
        let l2 = Quadratic::from_line(Vector::new(0.0, 1.0), Vector::new(1.0, 2.0));
        assert!(Quadratic::intersection(&l1, &l2).is_empty());
    }

    #[test]
    fn moved_circle_keeps_radius() {
        let c = Quadratic::from_circle(Vector::ZERO, 2.0).moved(Vector::new(3.0, 1.0));
        assert_abs_diff_eq!(c.eval(DVec2::new(5.0, 1.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.eval(DVec2::new(3.0, 3.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn circle_locus_contains_tangent_centers() {
        // Kreis r=5 um 0, Punkt (7,0): Kreis um (6,0) mit r=1 berührt außen
        let locus = Quadratic::circle_tangent_locus(Vector::ZERO, 5.0, Vector::new(7.0, 0.0));
        assert_abs_diff_eq!(locus.eval(DVec2::new(6.0, 0.0)), 0.0, epsilon = 1e-9);
    }
}
