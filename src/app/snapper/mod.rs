//! Fang-Engine: bestimmt zu einer Cursor-Position den besten Fangpunkt.
//!
//! Die Strategien werden in fester Reihenfolge abgefragt (Endpunkt, Zentrum,
//! Mitte, Abstand, Schnittpunkt, auf Entität, Raster) und konkurrieren über
//! das Abstandsquadrat zum Cursor. Anschließend greifen die Frei-Prüfung und
//! die Richtungs-Einschränkung.

mod mode;

pub use mode::{Restriction, SnapFlag, SnapMode};

use crate::core::{Vector, MAX_DISTANCE, TOLERANCE};
use crate::document::{DrawingQuery, EntityHit, ResolveLevel};
use crate::geometry::EntityKind;
use crate::shared::EditorOptions;

/// Ergebnis einer Fang-Auflösung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Gefangener (und ggf. eingeschränkter) Punkt
    pub snapped: Vector,
    /// Unveränderte Cursor-Position
    pub raw: Vector,
}

/// Anzeige-Zustand des Fang-Indikators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapIndicator {
    pub spot: Vector,
    pub cursor: Vector,
}

/// Fang-Engine mit Modus, Raster und Indikator-Zustand.
#[derive(Debug, Clone)]
pub struct Snapper {
    pub(crate) mode: SnapMode,
    /// Rasterweite (x, y)
    pub(crate) grid_spacing: Vector,
    /// Fangradius-Override; sonst halbe Rasterweite
    pub(crate) snap_range: Option<f64>,
    /// Abstand für "Punkt im Abstand"
    pub(crate) distance: f64,
    pub(crate) middle_divisions: usize,
    /// Ausgesetzt während Entitäts-Auswahl
    suspended: bool,
    snap_spot: Vector,
    snap_coord: Vector,
}

impl Snapper {
    pub fn new(mode: SnapMode, grid_spacing: Vector) -> Self {
        Self {
            mode,
            grid_spacing,
            snap_range: None,
            distance: crate::shared::options::SNAP_DISTANCE,
            middle_divisions: crate::shared::options::MIDDLE_DIVISIONS,
            suspended: false,
            snap_spot: Vector::invalid(),
            snap_coord: Vector::invalid(),
        }
    }

    /// Übernimmt Raster, Fangradius und Modus aus den Optionen.
    pub fn from_options(options: &EditorOptions) -> Self {
        let mut snapper = Self::new(
            SnapMode::from_bits(options.snap_mode_bits),
            Vector::new(options.grid_spacing_x, options.grid_spacing_y),
        );
        snapper.snap_range = options.snap_range;
        snapper.distance = options.snap_distance;
        snapper.middle_divisions = options.middle_divisions.max(1);
        snapper
    }

    /// Schreibt den Modus zurück in die Optionen (Persistenz).
    pub fn store(&self, options: &mut EditorOptions) {
        options.snap_mode_bits = self.mode.to_bits();
        options.grid_spacing_x = self.grid_spacing.x;
        options.grid_spacing_y = self.grid_spacing.y;
    }

    pub fn mode(&self) -> SnapMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SnapMode) {
        self.mode = mode;
    }

    pub fn set_flag(&mut self, flag: SnapFlag, on: bool) {
        self.mode.set(flag, on);
    }

    pub fn set_restriction(&mut self, restriction: Restriction) {
        self.mode.restriction = restriction;
    }

    pub fn set_grid_spacing(&mut self, spacing: Vector) {
        if spacing.valid {
            self.grid_spacing = spacing;
        }
    }

    /// Fangradius: Override oder `|Raster / 2|`.
    pub fn snap_range(&self) -> f64 {
        self.snap_range
            .unwrap_or_else(|| self.grid_spacing.x.abs().max(self.grid_spacing.y.abs()) / 2.0)
    }

    // ── Auflösung ───────────────────────────────────────────────────

    /// Bestimmt den Fangpunkt zu `coord`.
    ///
    /// Ohne gültigen Kandidaten wird die rohe Cursor-Position geliefert.
    /// `relative_zero` ist der Bezugspunkt der Richtungs-Einschränkung.
    pub fn resolve<Q>(&mut self, coord: Vector, relative_zero: Vector, query: &Q) -> SnapResult
    where
        Q: DrawingQuery + ?Sized,
    {
        if self.suspended || !coord.valid {
            self.snap_coord = coord;
            self.snap_spot = coord;
            return SnapResult {
                snapped: coord,
                raw: coord,
            };
        }

        let range2 = self.snap_range().powi(2);
        let mut best = Nearest::new(coord);
        let mode = self.mode;
        if mode.endpoint {
            best.consider(query.nearest_endpoint(coord), range2);
        }
        if mode.center {
            best.consider(query.nearest_center(coord), range2);
        }
        if mode.middle {
            best.consider(query.nearest_middle(coord, self.middle_divisions), range2);
        }
        if mode.distance {
            best.consider(query.nearest_dist(self.distance, coord), range2);
        }
        if mode.intersection {
            best.consider(query.nearest_intersection(coord), range2);
        }
        if mode.on_entity && best.d2 > self.distance * self.distance {
            best.consider(query.nearest_point_on_entity(coord, true), range2);
        }
        if mode.grid {
            best.consider(self.snap_grid(coord), MAX_DISTANCE);
        }
        let best = best.point;

        let mut spot = if best.valid { best } else { coord };

        if mode.free && best.valid {
            let ds = spot - coord;
            if ds.x.abs() > (self.grid_spacing.x / 2.0).abs()
                || ds.y.abs() > (self.grid_spacing.y / 2.0).abs()
            {
                spot = coord;
            }
        }

        spot = self.restrict(spot, coord, relative_zero);

        self.snap_coord = coord;
        self.snap_spot = spot;
        log::trace!("Fangpunkt ({:.4}, {:.4})", spot.x, spot.y);
        SnapResult {
            snapped: spot,
            raw: coord,
        }
    }

    /// Nächster Rasterpunkt.
    pub fn snap_grid(&self, coord: Vector) -> Vector {
        if !coord.valid {
            return Vector::invalid();
        }
        let round = |v: f64, step: f64| {
            if step.abs() < TOLERANCE {
                v
            } else {
                (v / step).round() * step
            }
        };
        Vector::new(
            round(coord.x, self.grid_spacing.x),
            round(coord.y, self.grid_spacing.y),
        )
    }

    /// Wendet die Richtungs-Einschränkung gegenüber `relative_zero` an.
    pub fn restrict(&self, spot: Vector, coord: Vector, relative_zero: Vector) -> Vector {
        if !relative_zero.valid || !spot.valid {
            return spot;
        }
        let vertical = Vector::new(relative_zero.x, spot.y);
        let horizontal = Vector::new(spot.x, relative_zero.y);
        match self.mode.restriction {
            Restriction::Nothing => spot,
            Restriction::Horizontal => horizontal,
            Restriction::Vertical => vertical,
            Restriction::Orthogonal => {
                if vertical.distance_to(coord) < horizontal.distance_to(coord) {
                    vertical
                } else {
                    horizontal
                }
            }
        }
    }

    // ── Entitäts-Auswahl ────────────────────────────────────────────

    /// Nächste auswählbare Entität innerhalb des Fangradius.
    pub fn catch_entity<Q>(&self, coord: Vector, level: ResolveLevel, query: &Q) -> Option<EntityHit>
    where
        Q: DrawingQuery + ?Sized,
    {
        self.catch_entity_of_kinds(coord, &[], level, query)
    }

    /// Wie [`Snapper::catch_entity`], beschränkt auf die Arten `kinds`
    /// (direkt oder über den umgebenden Container).
    pub fn catch_entity_of_kinds<Q>(
        &self,
        coord: Vector,
        kinds: &[EntityKind],
        level: ResolveLevel,
        query: &Q,
    ) -> Option<EntityHit>
    where
        Q: DrawingQuery + ?Sized,
    {
        if !coord.valid {
            return None;
        }
        let hit = query.nearest_entity(coord, level, kinds)?;
        let entity = query.entity(hit.id)?;
        if !entity.is_active() || entity.ignore_on_modification {
            log::debug!("Entität {} nicht auswählbar", hit.id);
            return None;
        }
        if hit.distance > self.snap_range() {
            return None;
        }
        Some(hit)
    }

    // ── Indikator ───────────────────────────────────────────────────

    /// Letzter Fangpunkt samt Cursor (für die Anzeige).
    pub fn indicator(&self) -> Option<SnapIndicator> {
        (self.snap_spot.valid && !self.suspended).then_some(SnapIndicator {
            spot: self.snap_spot,
            cursor: self.snap_coord,
        })
    }

    pub fn clear_indicator(&mut self) {
        self.snap_spot = Vector::invalid();
        self.snap_coord = Vector::invalid();
    }

    /// Setzt das Fangen aus (Entitäts-Auswahl nutzt die rohe Position).
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

/// Laufendes Minimum über alle Strategien.
struct Nearest {
    coord: Vector,
    point: Vector,
    d2: f64,
}

impl Nearest {
    fn new(coord: Vector) -> Self {
        Self {
            coord,
            point: Vector::invalid(),
            d2: MAX_DISTANCE,
        }
    }

    /// Übernimmt `candidate`, wenn es näher liegt und innerhalb `limit2`.
    fn consider(&mut self, candidate: Vector, limit2: f64) {
        let d2 = self.coord.squared_to(candidate);
        if d2 < self.d2 && d2 <= limit2 {
            self.d2 = d2;
            self.point = candidate;
        }
    }
}

impl Default for Snapper {
    fn default() -> Self {
        Self::from_options(&EditorOptions::default())
    }
}

#[cfg(test)]
mod tests;
