//! Lösungsmenge geometrischer Abfragen (Schnittpunkte, Tangenten-Mittelpunkte).

use super::math::MAX_DISTANCE;
use super::vector::Vector;

/// Ergebnis von `SolutionSet::closest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestSolution {
    /// Nächstgelegene gültige Lösung
    pub point: Vector,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
    /// Index in der Lösungsmenge
    pub index: usize,
}

/// Geordnete Menge von Lösungskandidaten.
///
/// Die Reihenfolge ist die Einfüge-Reihenfolge des Solvers; eine
/// Sortierung nach Nähe findet nicht automatisch statt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSet {
    items: Vec<Vector>,
    tangent: bool,
}

impl SolutionSet {
    /// Leere Lösungsmenge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leere Lösungsmenge mit reservierter Kapazität.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            tangent: false,
        }
    }

    /// Lösungsmenge aus vorhandenen Vektoren.
    pub fn from_slice(items: &[Vector]) -> Self {
        Self {
            items: items.to_vec(),
            tangent: false,
        }
    }

    /// Setzt die Größe auf `n`; neue Plätze sind ungültig.
    pub fn alloc(&mut self, n: usize) {
        self.items.resize(n, Vector::invalid());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element an Index `i`; ungültig außerhalb des Bereichs.
    pub fn get(&self, i: usize) -> Vector {
        self.items.get(i).copied().unwrap_or_default()
    }

    /// Setzt Element `i`. Wächst bei Bedarf; Zwischenplätze werden ungültig
    /// aufgefüllt.
    pub fn set(&mut self, i: usize, v: Vector) {
        if i >= self.items.len() {
            self.items.resize(i, Vector::invalid());
            self.items.push(v);
        } else {
            self.items[i] = v;
        }
    }

    pub fn push(&mut self, v: Vector) {
        self.items.push(v);
    }

    /// Entfernt das Element an Index `i` (no-op außerhalb des Bereichs).
    pub fn remove_at(&mut self, i: usize) {
        if i < self.items.len() {
            self.items.remove(i);
        }
    }

    /// Hängt alle Elemente einer anderen Menge an; das Tangenten-Flag wird geodert.
    pub fn append(&mut self, other: &SolutionSet) {
        self.items.extend_from_slice(&other.items);
        self.tangent |= other.tangent;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.tangent = false;
    }

    /// `true` wenn mindestens eine Lösung gültig ist.
    pub fn has_valid(&self) -> bool {
        self.items.iter().any(|v| v.valid)
    }

    /// Mindestens eine Lösung ist eine Doppelwurzel (Berührung).
    pub fn is_tangent(&self) -> bool {
        self.tangent
    }

    pub fn set_tangent(&mut self, tangent: bool) {
        self.tangent = tangent;
    }

    /// Nächste gültige Lösung zu `coord` (quadrierter Vergleich).
    ///
    /// Bei Gleichstand gewinnt die zuerst eingefügte Lösung.
    pub fn closest(&self, coord: Vector) -> Option<ClosestSolution> {
        let mut best: Option<(usize, f64)> = None;
        for (i, v) in self.items.iter().enumerate() {
            if !v.valid {
                continue;
            }
            let d2 = coord.squared_to(*v);
            if best.is_none_or(|(_, min)| d2 < min) {
                best = Some((i, d2));
            }
        }
        best.map(|(index, d2)| ClosestSolution {
            point: self.items[index],
            distance: if d2 == MAX_DISTANCE { MAX_DISTANCE } else { d2.sqrt() },
            index,
        })
    }

    /// Nächste gültige Lösung als Vektor (ungültig wenn keine vorhanden).
    pub fn closest_point(&self, coord: Vector) -> Vector {
        self.closest(coord).map(|c| c.point).unwrap_or_default()
    }

    /// Kleinste Distanz zu `coord` unter den ersten `counts` Einträgen.
    pub fn closest_distance(&self, coord: Vector, counts: usize) -> f64 {
        let d2 = self
            .items
            .iter()
            .take(counts)
            .filter(|v| v.valid)
            .map(|v| coord.squared_to(*v))
            .fold(MAX_DISTANCE, f64::min);
        if d2 == MAX_DISTANCE {
            MAX_DISTANCE
        } else {
            d2.sqrt()
        }
    }

    /// Dreht alle gültigen Lösungen um `center`.
    pub fn rotate(&mut self, center: Vector, angle: f64) {
        let unit = Vector::unit_from_angle(angle);
        for v in self.items.iter_mut().filter(|v| v.valid) {
            *v = v.rotate_by_unit(center, unit);
        }
    }

    /// Verschiebt alle gültigen Lösungen.
    pub fn move_by(&mut self, offset: Vector) {
        for v in self.items.iter_mut().filter(|v| v.valid) {
            *v = v.move_by(offset);
        }
    }

    /// Skaliert alle gültigen Lösungen relativ zu `center`.
    pub fn scale(&mut self, center: Vector, factor: Vector) {
        for v in self.items.iter_mut().filter(|v| v.valid) {
            *v = v.scale(center, factor);
        }
    }

    /// Vertauscht x und y aller Lösungen.
    pub fn flip_xy(&mut self) {
        for v in self.items.iter_mut() {
            *v = v.flip_xy();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Vector] {
        &self.items
    }
}

impl IntoIterator for SolutionSet {
    type Item = Vector;
    type IntoIter = std::vec::IntoIter<Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Vector> for SolutionSet {
    fn from_iter<T: IntoIterator<Item = Vector>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
            tangent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_beyond_len_fills_with_invalid() {
        let mut set = SolutionSet::new();
        set.set(3, Vector::new(1.0, 2.0));
        assert_eq!(set.len(), 4);
        assert!(!set.get(0).valid);
        assert!(!set.get(2).valid);
        assert_eq!(set.get(3), Vector::new(1.0, 2.0));
        assert!(!set.get(10).valid);
        assert!(set.has_valid());
    }

    #[test]
    fn alloc_creates_invalid_slots() {
        let mut set = SolutionSet::new();
        set.alloc(2);
        assert_eq!(set.len(), 2);
        assert!(!set.has_valid());
    }

    #[test]
    fn closest_prefers_first_on_tie() {
        let set = SolutionSet::from_slice(&[
            Vector::invalid(),
            Vector::new(1.0, 0.0),
            Vector::new(-1.0, 0.0),
        ]);
        let hit = set.closest(Vector::ZERO).expect("Treffer erwartet");
        assert_eq!(hit.index, 1);
        assert_eq!(hit.distance, 1.0);
    }

    #[test]
    fn closest_on_empty_set_is_none() {
        let set = SolutionSet::from_slice(&[Vector::invalid()]);
        assert!(set.closest(Vector::ZERO).is_none());
        assert!(!set.closest_point(Vector::ZERO).valid);
    }

    #[test]
    fn transforms_skip_invalid_members() {
        let mut set = SolutionSet::from_slice(&[Vector::new(1.0, 0.0), Vector::invalid()]);
        set.move_by(Vector::new(1.0, 1.0));
        assert_eq!(set.get(0), Vector::new(2.0, 1.0));
        assert!(!set.get(1).valid);
    }
}
