//! 2D-Vektor mit Gültigkeits-Flag.
//!
//! Ein ungültiger Vektor trägt keine verwertbaren Koordinaten: alle metrischen
//! Abfragen liefern dann den Sentinel [`MAX_DISTANCE`] bzw. 0 und rechnen nie
//! mit den gespeicherten Werten.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::math::{correct_angle, MAX_DISTANCE, TOLERANCE, TOLERANCE2};

/// Wertetyp für Punkte und Richtungen in der Zeichenebene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub valid: bool,
}

impl Default for Vector {
    /// Der Default ist ungültig ("kein Punkt").
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for Vector {
    /// Gleichheit schließt das Gültigkeits-Flag ein; zwei ungültige Vektoren
    /// sind unabhängig von ihren Koordinaten gleich.
    fn eq(&self, other: &Self) -> bool {
        if !self.valid || !other.valid {
            return self.valid == other.valid;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Vector {
    /// Ursprung.
    pub const ZERO: Vector = Vector {
        x: 0.0,
        y: 0.0,
        valid: true,
    };

    /// Erstellt einen gültigen Vektor.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, valid: true }
    }

    /// Erstellt einen ungültigen Vektor.
    pub const fn invalid() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            valid: false,
        }
    }

    /// Vektor aus Polarkoordinaten.
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    /// Einheitsvektor in Richtung `angle`.
    pub fn unit_from_angle(angle: f64) -> Self {
        Self::polar(1.0, angle)
    }

    /// Setzt den Vektor auf Polarkoordinaten (macht ihn gültig).
    pub fn set_polar(&mut self, radius: f64, angle: f64) {
        *self = Self::polar(radius, angle);
    }

    /// Richtungswinkel `atan2(y, x)`, normiert auf `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        correct_angle(self.y.atan2(self.x))
    }

    /// Winkel der Strecke `self → other`; 0 wenn einer der beiden ungültig ist.
    pub fn angle_to(&self, other: Vector) -> f64 {
        if !self.valid || !other.valid {
            return 0.0;
        }
        (other - *self).angle()
    }

    /// Winkel von `v1` nach `v2` (gegen den Uhrzeigersinn), in `[0, 2π)`.
    pub fn angle_between(v1: Vector, v2: Vector) -> f64 {
        if !v1.valid || !v2.valid {
            return 0.0;
        }
        correct_angle(v2.angle() - v1.angle())
    }

    /// Länge; 0 für ungültige Vektoren.
    pub fn magnitude(&self) -> f64 {
        if !self.valid {
            return 0.0;
        }
        self.x.hypot(self.y)
    }

    /// Quadrierte Länge; Sentinel für ungültige Vektoren.
    pub fn squared(&self) -> f64 {
        if !self.valid {
            return MAX_DISTANCE;
        }
        self.x * self.x + self.y * self.y
    }

    /// Quadrierte Distanz; Sentinel wenn einer der beiden ungültig ist.
    pub fn squared_to(&self, other: Vector) -> f64 {
        if !self.valid || !other.valid {
            return MAX_DISTANCE;
        }
        (*self - other).squared()
    }

    /// Euklidische Distanz; Sentinel wenn einer der beiden ungültig ist.
    pub fn distance_to(&self, other: Vector) -> f64 {
        if !self.valid || !other.valid {
            return MAX_DISTANCE;
        }
        (*self - other).magnitude()
    }

    /// Lineare Interpolation; ungültig wenn einer der beiden ungültig ist.
    pub fn lerp(&self, other: Vector, t: f64) -> Vector {
        if !self.valid || !other.valid {
            return Vector::invalid();
        }
        *self + (other - *self) * t
    }

    /// Prüft ob der Punkt im achsenparallelen Fenster zwischen `c1` und `c2` liegt.
    pub fn is_in_window(&self, c1: Vector, c2: Vector) -> bool {
        if !self.valid || !c1.valid || !c2.valid {
            return false;
        }
        let lo = c1.minimum(c2);
        let hi = c1.maximum(c2);
        self.x >= lo.x && self.x <= hi.x && self.y >= lo.y && self.y <= hi.y
    }

    /// Verschiebt um `offset`.
    pub fn move_by(&self, offset: Vector) -> Vector {
        *self + offset
    }

    /// Dreht um `center` um den Winkel `angle`.
    pub fn rotate(&self, center: Vector, angle: f64) -> Vector {
        self.rotate_by_unit(center, Vector::unit_from_angle(angle))
    }

    /// Dreht um `center` mit einem vorberechneten Einheitsvektor `(cos, sin)`.
    pub fn rotate_by_unit(&self, center: Vector, unit: Vector) -> Vector {
        if !self.valid || !center.valid || !unit.valid {
            return Vector::invalid();
        }
        let d = *self - center;
        center + Vector::new(d.x * unit.x - d.y * unit.y, d.x * unit.y + d.y * unit.x)
    }

    /// Skaliert komponentenweise relativ zu `center`.
    pub fn scale(&self, center: Vector, factor: Vector) -> Vector {
        if !self.valid || !center.valid || !factor.valid {
            return Vector::invalid();
        }
        let d = *self - center;
        center + Vector::new(d.x * factor.x, d.y * factor.y)
    }

    /// Spiegelt an der Achse durch `axis1` und `axis2`.
    ///
    /// Ungültig, wenn die Achsenpunkte (quadriert) zusammenfallen.
    pub fn mirror(&self, axis1: Vector, axis2: Vector) -> Vector {
        if !self.valid || !axis1.valid || !axis2.valid {
            return Vector::invalid();
        }
        let direction = axis2 - axis1;
        let len2 = direction.squared();
        if len2 < TOLERANCE2 {
            return Vector::invalid();
        }
        let t = (*self - axis1).dot(direction) / len2;
        let foot = axis1 + direction * t;
        foot * 2.0 - *self
    }

    /// Skalarprodukt.
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-Komponente des Kreuzprodukts.
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Vertauscht x und y.
    pub fn flip_xy(&self) -> Vector {
        Vector {
            x: self.y,
            y: self.x,
            valid: self.valid,
        }
    }

    /// Komponentenweises Minimum.
    pub fn minimum(&self, other: Vector) -> Vector {
        Vector::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Komponentenweises Maximum.
    pub fn maximum(&self, other: Vector) -> Vector {
        Vector::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Einheitsvektor gleicher Richtung; ungültig bei Länge ≈ 0.
    pub fn normalized(&self) -> Vector {
        let len = self.magnitude();
        if len < TOLERANCE {
            return Vector::invalid();
        }
        Vector::new(self.x / len, self.y / len)
    }

    /// Um 90° gegen den Uhrzeigersinn gedrehter Vektor.
    pub fn perpendicular(&self) -> Vector {
        Vector {
            x: -self.y,
            y: self.x,
            valid: self.valid,
        }
    }

    /// Konvertiert nach `glam::DVec2` (Koordinaten unabhängig vom Flag).
    pub fn to_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        if v.is_finite() {
            Vector::new(v.x, v.y)
        } else {
            Vector::invalid()
        }
    }
}

// ── Operatoren ──────────────────────────────────────────────────────

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            valid: self.valid && rhs.valid,
        }
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            valid: self.valid && rhs.valid,
        }
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
            valid: self.valid,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
            valid: self.valid,
        }
    }
}

/// Komponentenweise Multiplikation.
impl Mul<Vector> for Vector {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        Vector {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            valid: self.valid && rhs.valid,
        }
    }
}

/// Division durch einen Skalar ≤ TOLERANCE ist ein No-op.
impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        if rhs.abs() <= TOLERANCE {
            return self;
        }
        Vector {
            x: self.x / rhs,
            y: self.y / rhs,
            valid: self.valid,
        }
    }
}

/// Komponentenweise Division; No-op sobald eine Komponente ≤ TOLERANCE ist.
impl Div<Vector> for Vector {
    type Output = Vector;
    fn div(self, rhs: Vector) -> Vector {
        if rhs.x.abs() <= TOLERANCE || rhs.y.abs() <= TOLERANCE {
            return self;
        }
        Vector {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
            valid: self.valid && rhs.valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Vector::new(1.5, -2.0);
        let b = Vector::new(-3.0, 4.25);
        assert_eq!(a.distance_to(b), b.distance_to(a));
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn invalid_operands_return_sentinel() {
        let a = Vector::new(1.0, 1.0);
        let bad = Vector::invalid();
        assert_eq!(a.distance_to(bad), MAX_DISTANCE);
        assert_eq!(bad.distance_to(a), MAX_DISTANCE);
        assert_eq!(bad.squared_to(a), MAX_DISTANCE);
        assert_eq!(bad.squared(), MAX_DISTANCE);
        assert_eq!(bad.magnitude(), 0.0);
        assert_eq!(bad.angle_to(a), 0.0);
    }

    #[test]
    fn angle_is_normalized() {
        assert_abs_diff_eq!(Vector::new(0.0, -1.0).angle(), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(
            Vector::new(1.0, 1.0).angle_to(Vector::new(0.0, 2.0)),
            0.75 * PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotate_about_center() {
        let p = Vector::new(2.0, 1.0).rotate(Vector::new(1.0, 1.0), PI / 2.0);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn mirror_on_degenerate_axis_is_invalid() {
        let p = Vector::new(3.0, 4.0);
        let axis = Vector::new(1.0, 1.0);
        assert!(!p.mirror(axis, axis).valid);

        let m = p.mirror(Vector::ZERO, Vector::new(1.0, 0.0));
        assert_abs_diff_eq!(m.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, -4.0, epsilon = 1e-12);
    }

    #[test]
    fn division_by_near_zero_is_noop() {
        let p = Vector::new(3.0, 4.0);
        assert_eq!(p / 0.0, p);
        assert_eq!(p / Vector::new(2.0, 1.0e-12), p);
        assert_eq!(p / 2.0, Vector::new(1.5, 2.0));
    }

    #[test]
    fn equality_includes_valid_flag() {
        assert_ne!(Vector::new(0.0, 0.0), Vector::invalid());
        assert_eq!(Vector::invalid(), Vector::invalid());
    }

    #[test]
    fn scale_relative_to_center() {
        let p = Vector::new(3.0, 3.0).scale(Vector::new(1.0, 1.0), Vector::new(2.0, 0.5));
        assert_eq!(p, Vector::new(5.0, 2.0));
    }
}
