//! Numerische Grundlagen: Toleranzklassen, Winkel-Hilfen und Polynom-Nullstellen.
//!
//! Die drei Toleranzklassen (linear, quadriert, Winkel) werden bewusst
//! getrennt gehalten und nie gegeneinander ausgetauscht.

use std::f64::consts::{PI, TAU};

// ── Toleranzen ──────────────────────────────────────────────────────

/// Lineare Toleranz für "zusammenfallend".
pub const TOLERANCE: f64 = 1.0e-10;
/// Quadrierte Toleranz für Abstandsvergleiche ohne Wurzel.
pub const TOLERANCE2: f64 = 1.0e-20;
/// Quadrierte Toleranz für die Duplikat-Erkennung von Solver-Kandidaten.
pub const TOLERANCE15: f64 = 1.5e-15;
/// Winkel-Toleranz (Radiant).
pub const TOLERANCE_ANGLE: f64 = 1.0e-8;
/// Sentinel "maximale Distanz" für ungültige Vektoren.
pub const MAX_DISTANCE: f64 = f64::MAX;

// ── Winkel ──────────────────────────────────────────────────────────

/// Normiert einen Winkel in das Intervall `[0, 2π)`.
pub fn correct_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid kann durch Rundung exakt TAU liefern
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Betrag der kleinsten Winkeldifferenz zwischen zwei Richtungen, in `[0, π]`.
pub fn angle_difference_abs(a1: f64, a2: f64) -> f64 {
    let d = correct_angle(a2 - a1);
    if d > PI {
        TAU - d
    } else {
        d
    }
}

/// Prüft ob `a` im Bogen von `a1` nach `a2` liegt (gegen den Uhrzeigersinn,
/// bei `reversed` im Uhrzeigersinn).
pub fn is_angle_between(a: f64, a1: f64, a2: f64, reversed: bool) -> bool {
    let (start, end) = if reversed { (a2, a1) } else { (a1, a2) };
    let span = correct_angle(end - start);
    let offset = correct_angle(a - start);
    if span < TOLERANCE_ANGLE {
        // Vollkreis oder entarteter Bogen
        return true;
    }
    offset <= span + TOLERANCE_ANGLE || offset >= TAU - TOLERANCE_ANGLE
}

/// Grad → Radiant.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Radiant → Grad.
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

// ── Polynome ────────────────────────────────────────────────────────

/// Reelle Nullstellen eines Polynoms, zusammen mit einem Flag für Doppelwurzeln.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roots {
    /// Aufsteigend sortierte reelle Nullstellen
    pub values: Vec<f64>,
    /// Mindestens eine Nullstelle ist (numerisch) doppelt
    pub double_root: bool,
}

/// Löst `a·x² + b·x + c = 0`.
///
/// Fällt bei `a ≈ 0` auf die lineare Gleichung zurück. Eine leicht negative
/// Diskriminante (Rundungsfehler) wird als Doppelwurzel behandelt.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale == 0.0 {
        return Roots::default();
    }
    let (a, b, c) = (a / scale, b / scale, c / scale);

    if a.abs() < TOLERANCE {
        if b.abs() < TOLERANCE {
            return Roots::default();
        }
        return Roots {
            values: vec![-c / b],
            double_root: false,
        };
    }

    let disc = b * b - 4.0 * a * c;
    let disc_tol = TOLERANCE * (b * b + (4.0 * a * c).abs()).max(1.0);
    if disc.abs() <= disc_tol {
        return Roots {
            values: vec![-b / (2.0 * a)],
            double_root: true,
        };
    }
    if disc < 0.0 {
        return Roots::default();
    }

    // Numerisch stabile Variante (keine Auslöschung bei b ≈ ±sqrt(disc))
    let sq = disc.sqrt();
    let q = -0.5 * (b + b.signum() * sq);
    let q = if q == 0.0 { -0.5 * sq } else { q };
    let mut values = vec![q / a, c / q];
    values.sort_by(f64::total_cmp);
    Roots {
        values,
        double_root: false,
    }
}

/// Löst `a·x³ + b·x² + c·x + d = 0` (reelle Nullstellen).
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Roots {
    let scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    if scale == 0.0 {
        return Roots::default();
    }
    if (a / scale).abs() < TOLERANCE {
        return solve_quadratic(b, c, d);
    }
    let (b, c, d) = (b / a, c / a, d / a);

    // Reduzierte Form t³ + p·t + q = 0 mit x = t - b/3
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let disc = (q / 2.0).powi(2) + (p / 3.0).powi(3);
    let disc_tol = TOLERANCE * ((q / 2.0).powi(2) + (p / 3.0).powi(3).abs()).max(TOLERANCE);

    let mut roots = Roots::default();
    if disc.abs() <= disc_tol {
        if p.abs() < TOLERANCE && q.abs() < TOLERANCE {
            roots.values.push(-shift);
            roots.double_root = true;
        } else {
            let u = (-q / 2.0).cbrt();
            roots.values.push(2.0 * u - shift);
            roots.values.push(-u - shift);
            roots.double_root = true;
        }
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        let u = (-q / 2.0 + sq).cbrt();
        let v = (-q / 2.0 - sq).cbrt();
        roots.values.push(u + v - shift);
    } else {
        // Drei verschiedene reelle Wurzeln (trigonometrische Form)
        let r = (-p / 3.0).sqrt();
        let phi = (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0).acos();
        for k in 0..3 {
            let t = 2.0 * r * ((phi + TAU * k as f64) / 3.0).cos();
            roots.values.push(t - shift);
        }
    }

    for x in roots.values.iter_mut() {
        *x = polish_root(&[a, a * b, a * c, a * d], *x);
    }
    roots.values.sort_by(f64::total_cmp);
    roots
}

/// Löst `a·x⁴ + b·x³ + c·x² + d·x + e = 0` (Ferrari-Verfahren).
///
/// Fällt auf kubische bzw. quadratische Gleichungen zurück, wenn die führenden
/// Koeffizienten relativ zur Skala verschwinden.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Roots {
    let scale = [a, b, c, d, e]
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Roots::default();
    }
    if (a / scale).abs() < TOLERANCE {
        return solve_cubic(b, c, d, e);
    }
    let coeffs = [a, b, c, d, e];
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);

    // Reduzierte Form y⁴ + p·y² + q·y + r = 0 mit x = y - b/4
    let shift = b / 4.0;
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    let mut roots = Roots::default();
    let q_scale = p.abs().max(r.abs().sqrt()).max(1.0);

    if q.abs() < TOLERANCE * q_scale {
        // Biquadratisch: z = y²
        let z = solve_quadratic(1.0, p, r);
        roots.double_root = z.double_root;
        for zv in z.values {
            if zv > TOLERANCE {
                let y = zv.sqrt();
                roots.values.push(y - shift);
                roots.values.push(-y - shift);
            } else if zv > -TOLERANCE {
                roots.values.push(-shift);
                roots.double_root = true;
            }
        }
    } else {
        // Resolvente: m³ + p·m² + (p²/4 - r)·m - q²/8 = 0, positive Wurzel wählen
        let resolvent = solve_cubic(1.0, p, p * p / 4.0 - r, -q * q / 8.0);
        let Some(m) = resolvent
            .values
            .iter()
            .copied()
            .filter(|m| *m > 0.0)
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |a| a.max(m))))
        else {
            return roots;
        };
        let s = (2.0 * m).sqrt();
        for (sign, q_sign) in [(-1.0, 1.0), (1.0, -1.0)] {
            let part = solve_quadratic(1.0, sign * s, p / 2.0 + m + q_sign * q / (2.0 * s));
            roots.double_root |= part.double_root;
            roots.values.extend(part.values.into_iter().map(|y| y - shift));
        }
    }

    for x in roots.values.iter_mut() {
        *x = polish_root(&coeffs, *x);
    }
    roots.values.sort_by(f64::total_cmp);
    roots.values.dedup_by(|x, y| (*x - *y).abs() < TOLERANCE * (1.0 + y.abs()));
    roots
}

/// Wertet ein Polynom (höchster Koeffizient zuerst) per Horner-Schema aus.
pub fn eval_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Verfeinert eine Nullstelle mit wenigen Newton-Schritten.
///
/// Der Schritt wird verworfen, sobald er das Residuum nicht verbessert.
fn polish_root(coeffs: &[f64], mut x: f64) -> f64 {
    let n = coeffs.len();
    let derivative: Vec<f64> = coeffs[..n - 1]
        .iter()
        .enumerate()
        .map(|(i, c)| c * (n - 1 - i) as f64)
        .collect();
    for _ in 0..4 {
        let f = eval_polynomial(coeffs, x);
        let df = eval_polynomial(&derivative, x);
        if df.abs() < f64::MIN_POSITIVE {
            break;
        }
        let next = x - f / df;
        if eval_polynomial(coeffs, next).abs() >= f.abs() {
            break;
        }
        x = next;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn correct_angle_wraps_into_full_turn() {
        assert_abs_diff_eq!(correct_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(correct_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(correct_angle(0.0), 0.0);
    }

    #[test]
    fn angle_between_respects_direction() {
        assert!(is_angle_between(PI / 2.0, 0.0, PI, false));
        assert!(!is_angle_between(PI / 2.0, 0.0, PI, true));
        assert!(is_angle_between(0.1, 1.5 * PI, 0.5 * PI, false));
    }

    #[test]
    fn quadratic_roots_sorted() {
        let roots = solve_quadratic(1.0, -3.0, 2.0);
        assert_eq!(roots.values.len(), 2);
        assert_abs_diff_eq!(roots.values[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(roots.values[1], 2.0, epsilon = 1e-12);
        assert!(!roots.double_root);
    }

    #[test]
    fn quadratic_double_root_flagged() {
        let roots = solve_quadratic(1.0, -2.0, 1.0);
        assert_eq!(roots.values.len(), 1);
        assert!(roots.double_root);
    }

    #[test]
    fn cubic_three_real_roots() {
        // (x-1)(x-2)(x+3) = x³ - 7x + 6
        let roots = solve_cubic(1.0, 0.0, -7.0, 6.0);
        assert_eq!(roots.values.len(), 3);
        assert_abs_diff_eq!(roots.values[0], -3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(roots.values[1], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(roots.values[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn quartic_four_real_roots() {
        // (x-1)(x+1)(x-2)(x+3) = x⁴ + x³ - 7x² - x + 6
        let roots = solve_quartic(1.0, 1.0, -7.0, -1.0, 6.0);
        assert_eq!(roots.values.len(), 4);
        for (got, want) in roots.values.iter().zip([-3.0, -1.0, 1.0, 2.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-8);
        }
    }

    #[test]
    fn quartic_degenerates_to_quadratic() {
        let roots = solve_quartic(0.0, 0.0, 1.0, 0.0, -4.0);
        assert_eq!(roots.values.len(), 2);
        assert_abs_diff_eq!(roots.values[0], -2.0, epsilon = 1e-12);
    }
}
