//! In-Memory-Zeichnung: Entitäts-Speicher, Spatial-Index und Undo-Log.

use indexmap::IndexMap;

use super::spatial::PointIndex;
use super::undo::{UndoLog, DEFAULT_UNDO_DEPTH};
use super::{DocumentSink, DrawingQuery, Entity, EntityHit, EntityId, ResolveLevel};
use crate::core::{Vector, MAX_DISTANCE};
use crate::geometry::{intersect_entities, self_intersections, EntityData, EntityKind};

/// Container für alle Entitäten einer Zeichnung.
///
/// Die Einfüge-Reihenfolge bleibt erhalten (Tie-Break bei gleich weit
/// entfernten Treffern: zuerst eingefügt gewinnt).
#[derive(Debug)]
pub struct Drawing {
    entities: IndexMap<EntityId, Entity>,
    next_id: EntityId,
    endpoints: PointIndex,
    centers: PointIndex,
    undo_log: UndoLog,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    pub fn new() -> Self {
        Self::with_undo_depth(DEFAULT_UNDO_DEPTH)
    }

    /// Leere Zeichnung mit begrenzter Undo-Tiefe.
    pub fn with_undo_depth(max_depth: usize) -> Self {
        Self {
            entities: IndexMap::new(),
            next_id: 1,
            endpoints: PointIndex::empty(),
            centers: PointIndex::empty(),
            undo_log: UndoLog::new_with_capacity(max_depth),
        }
    }

    /// Anzahl aktiver (sichtbarer, nicht rückgängig gemachter) Entitäten.
    pub fn count(&self) -> usize {
        self.active().count()
    }

    /// Aktive Entitäten in Einfüge-Reihenfolge.
    pub fn active(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(|e| e.is_active())
    }

    pub fn set_visible(&mut self, id: EntityId, visible: bool) -> bool {
        let changed = self.entities.get_mut(&id).map(|e| e.visible = visible).is_some();
        if changed {
            self.rebuild_index();
        }
        changed
    }

    pub fn set_ignore_on_modification(&mut self, id: EntityId, ignore: bool) -> bool {
        self.entities
            .get_mut(&id)
            .map(|e| e.ignore_on_modification = ignore)
            .is_some()
    }

    /// IDs aller hervorgehobenen Entitäten.
    pub fn highlighted(&self) -> Vec<EntityId> {
        self.active().filter(|e| e.highlighted).map(|e| e.id).collect()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_log.can_redo()
    }

    /// Macht den letzten Undo-Zyklus rückgängig.
    pub fn undo(&mut self) -> bool {
        let Some(cycle) = self.undo_log.pop_undo() else {
            return false;
        };
        self.toggle_undone(&cycle.undoables);
        log::info!("Undo: {} Entität(en) umgeschaltet", cycle.undoables.len());
        self.purge_dropped();
        true
    }

    /// Stellt den zuletzt rückgängig gemachten Zyklus wieder her.
    pub fn redo(&mut self) -> bool {
        let Some(cycle) = self.undo_log.pop_redo() else {
            return false;
        };
        self.toggle_undone(&cycle.undoables);
        log::info!("Redo: {} Entität(en) umgeschaltet", cycle.undoables.len());
        self.purge_dropped();
        true
    }

    /// Entfernt rückgängig gemachte Entitäten, deren Zyklen aus dem
    /// Undo-Log gefallen sind und die kein anderer Zyklus mehr enthält.
    /// Aktive Entitäten bleiben, sie sind Teil der Zeichnung.
    fn purge_dropped(&mut self) {
        let dropped = self.undo_log.take_dropped();
        let mut purged = 0;
        for id in dropped.iter().flat_map(|cycle| &cycle.undoables) {
            let unreachable = self.entities.get(id).is_some_and(|e| e.undone)
                && !self.undo_log.references(*id);
            if unreachable && self.entities.shift_remove(id).is_some() {
                purged += 1;
            }
        }
        if purged > 0 {
            log::debug!("{purged} nicht mehr erreichbare Entität(en) entfernt");
        }
    }

    fn toggle_undone(&mut self, ids: &[EntityId]) {
        for id in ids {
            if let Some(e) = self.entities.get_mut(id) {
                e.undone = !e.undone;
            }
        }
        self.rebuild_index();
    }

    /// Baut die Punkt-Indizes aus den aktiven Entitäten neu auf.
    fn rebuild_index(&mut self) {
        let endpoints: Vec<(EntityId, Vector)> = self
            .active()
            .flat_map(|e| e.data.endpoints().into_iter().map(move |p| (e.id, p)))
            .collect();
        let centers: Vec<(EntityId, Vector)> = self
            .active()
            .flat_map(|e| e.data.segments().into_iter().map(move |s| (e.id, s.center())))
            .collect();
        self.endpoints = PointIndex::from_points(endpoints);
        self.centers = PointIndex::from_points(centers);
    }

    /// Nächster Kandidat aus einer Punktliste pro Entität.
    fn nearest_over<F>(&self, coord: Vector, candidates: F) -> Vector
    where
        F: Fn(&EntityData) -> Vec<Vector>,
    {
        let mut best = Vector::invalid();
        let mut best_d2 = MAX_DISTANCE;
        for e in self.active() {
            for p in candidates(&e.data) {
                let d2 = coord.squared_to(p);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = p;
                }
            }
        }
        best
    }

    /// Aktive Entitäten als serialisierbare Liste (Export).
    pub fn export(&self) -> Vec<&Entity> {
        self.active().collect()
    }
}

impl DrawingQuery for Drawing {
    fn nearest_endpoint(&self, coord: Vector) -> Vector {
        self.endpoints.nearest(coord).map(|m| m.point).unwrap_or_default()
    }

    fn nearest_center(&self, coord: Vector) -> Vector {
        self.centers.nearest(coord).map(|m| m.point).unwrap_or_default()
    }

    fn nearest_middle(&self, coord: Vector, divisions: usize) -> Vector {
        self.nearest_over(coord, |d| d.middle_points(divisions))
    }

    fn nearest_dist(&self, distance: f64, coord: Vector) -> Vector {
        self.nearest_over(coord, |d| vec![d.nearest_dist(distance, coord)])
    }

    fn nearest_intersection(&self, coord: Vector) -> Vector {
        let active: Vec<&Entity> = self.active().collect();
        let mut best = Vector::invalid();
        let mut best_d2 = MAX_DISTANCE;
        let mut consider = |points: &crate::core::SolutionSet| {
            if let Some(c) = points.closest(coord) {
                let d2 = c.distance * c.distance;
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = c.point;
                }
            }
        };
        for (i, a) in active.iter().enumerate() {
            if a.data.kind().is_container() {
                consider(&self_intersections(&a.data));
            }
            for b in &active[i + 1..] {
                consider(&intersect_entities(&a.data, &b.data));
            }
        }
        best
    }

    fn nearest_point_on_entity(&self, coord: Vector, on_entity: bool) -> Vector {
        let mut best = Vector::invalid();
        let mut best_dist = MAX_DISTANCE;
        for e in self.active() {
            let (p, d) = e.data.nearest_point_on(coord, on_entity);
            if p.valid && d < best_dist {
                best_dist = d;
                best = p;
            }
        }
        best
    }

    fn nearest_entity(&self, coord: Vector, level: ResolveLevel, kinds: &[EntityKind]) -> Option<EntityHit> {
        let mut best: Option<EntityHit> = None;
        for e in self.active() {
            let candidates: Vec<EntityHit> = match level {
                ResolveLevel::All if e.kind().is_container() => e
                    .data
                    .segments()
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| EntityHit {
                        id: e.id,
                        segment: Some(i),
                        container: Some(e.kind()),
                        distance: s.distance_to_point(coord),
                        data: s,
                    })
                    .collect(),
                _ => vec![EntityHit {
                    id: e.id,
                    segment: None,
                    container: None,
                    distance: e.data.distance_to_point(coord),
                    data: e.data.clone(),
                }],
            };
            for hit in candidates.into_iter().filter(|h| h.matches(kinds)) {
                if best.as_ref().is_none_or(|b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        }
        best
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }
}

impl DocumentSink for Drawing {
    fn add_entity(&mut self, data: EntityData) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Entität {id} angelegt: {:?}", data.kind());
        self.entities.insert(id, Entity::new(id, data));
        self.rebuild_index();
        id
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(e) = self.entities.get_mut(&id) else {
            return false;
        };
        if e.undone {
            return false;
        }
        e.undone = true;
        e.highlighted = false;
        self.rebuild_index();
        true
    }

    fn start_undo_cycle(&mut self) {
        self.undo_log.start_cycle();
        self.purge_dropped();
    }

    fn add_undoable(&mut self, id: EntityId) {
        if !self.undo_log.add(id) {
            log::warn!("Entität {id} ohne offenen Undo-Zyklus hinzugefügt");
        }
    }

    fn end_undo_cycle(&mut self) {
        self.undo_log.end_cycle();
        self.purge_dropped();
    }

    fn undo_cycle(&mut self) -> bool {
        self.undo()
    }

    fn redo_cycle(&mut self) -> bool {
        self.redo()
    }

    fn set_highlighted(&mut self, id: EntityId, highlighted: bool) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.highlighted = highlighted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CircleData, LineData, PolylineData};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> EntityData {
        EntityData::Line(LineData::new(Vector::new(x1, y1), Vector::new(x2, y2)))
    }

    fn commit(drawing: &mut Drawing, data: EntityData) -> EntityId {
        let id = drawing.add_entity(data);
        drawing.start_undo_cycle();
        drawing.add_undoable(id);
        drawing.end_undo_cycle();
        id
    }

    #[test]
    fn endpoint_and_center_queries() {
        let mut d = Drawing::new();
        d.add_entity(line(0.0, 0.0, 10.0, 0.0));
        d.add_entity(EntityData::Circle(CircleData::new(Vector::new(20.0, 20.0), 2.0)));
        assert_eq!(d.nearest_endpoint(Vector::new(9.6, 0.3)), Vector::new(10.0, 0.0));
        assert_eq!(d.nearest_center(Vector::new(15.0, 15.0)), Vector::new(20.0, 20.0));
        assert_eq!(d.nearest_middle(Vector::new(4.0, 1.0), 1), Vector::new(5.0, 0.0));
    }

    #[test]
    fn empty_drawing_reports_not_found() {
        let d = Drawing::new();
        assert!(!d.nearest_endpoint(Vector::ZERO).valid);
        assert!(!d.nearest_intersection(Vector::ZERO).valid);
        assert!(d.nearest_entity(Vector::ZERO, ResolveLevel::None, &[]).is_none());
    }

    #[test]
    fn intersection_of_two_lines() {
        let mut d = Drawing::new();
        d.add_entity(line(0.0, 0.0, 4.0, 4.0));
        d.add_entity(line(0.0, 4.0, 4.0, 0.0));
        let p = d.nearest_intersection(Vector::new(1.0, 1.0));
        assert!((p.x - 2.0).abs() < 1e-9 && (p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn entity_search_respects_kind_filter_and_containers() {
        let mut d = Drawing::new();
        let mut poly = PolylineData::new(Vector::ZERO);
        poly.add_vertex(Vector::new(10.0, 0.0), 0.0);
        let poly_id = d.add_entity(EntityData::Polyline(poly));
        let line_id = d.add_entity(line(0.0, 5.0, 10.0, 5.0));

        let hit = d
            .nearest_entity(Vector::new(5.0, 1.0), ResolveLevel::None, &[EntityKind::Line])
            .expect("Linie erwartet");
        assert_eq!(hit.id, line_id, "Polylinie als Ganzes ist keine Linie");

        let hit = d
            .nearest_entity(Vector::new(5.0, 1.0), ResolveLevel::All, &[EntityKind::Line])
            .expect("Segment erwartet");
        assert_eq!(hit.id, poly_id);
        assert_eq!(hit.segment, Some(0));
        assert_eq!(hit.container, Some(EntityKind::Polyline));
    }

    #[test]
    fn undo_hides_and_redo_restores() {
        let mut d = Drawing::new();
        commit(&mut d, line(0.0, 0.0, 10.0, 0.0));
        assert_eq!(d.count(), 1);
        assert!(d.undo());
        assert_eq!(d.count(), 0);
        assert!(!d.nearest_endpoint(Vector::ZERO).valid, "Index nach Undo aktualisiert");
        assert!(d.redo());
        assert_eq!(d.count(), 1);
        assert!(!d.redo());
    }

    #[test]
    fn removed_entity_comes_back_on_undo() {
        let mut d = Drawing::new();
        let old = commit(&mut d, line(0.0, 0.0, 10.0, 0.0));
        let new = d.add_entity(line(0.0, 0.0, 5.0, 0.0));
        d.remove_entity(old);
        d.start_undo_cycle();
        d.add_undoable(new);
        d.add_undoable(old);
        d.end_undo_cycle();
        assert_eq!(d.export()[0].id, new);
        d.undo();
        assert_eq!(d.export()[0].id, old);
    }

    #[test]
    fn new_cycle_purges_discarded_redo_entities() {
        let mut d = Drawing::new();
        let kept = commit(&mut d, line(0.0, 0.0, 10.0, 0.0));
        let discarded = commit(&mut d, line(0.0, 5.0, 10.0, 5.0));
        assert!(d.undo());
        assert_eq!(d.entities.len(), 2, "Redo kann die Linie noch zurückholen");

        let fresh = commit(&mut d, line(0.0, 9.0, 10.0, 9.0));
        assert!(!d.entities.contains_key(&discarded), "Redo-Zyklus verworfen");
        assert_eq!(d.entities.keys().copied().collect::<Vec<_>>(), vec![kept, fresh]);
    }

    #[test]
    fn cycles_beyond_undo_depth_purge_only_unreachable_entities() {
        let mut d = Drawing::with_undo_depth(1);
        let old = commit(&mut d, line(0.0, 0.0, 10.0, 0.0));

        // Ersetzen: `old` bleibt über den neuen Zyklus erreichbar
        let new = d.add_entity(line(0.0, 0.0, 5.0, 0.0));
        d.remove_entity(old);
        d.start_undo_cycle();
        d.add_undoable(new);
        d.add_undoable(old);
        d.end_undo_cycle();
        assert!(d.entities.contains_key(&old), "noch per Undo erreichbar");

        // Weiterer Zyklus verdrängt das Ersetzen: `old` ist endgültig weg
        let other = commit(&mut d, line(0.0, 9.0, 10.0, 9.0));
        assert!(!d.entities.contains_key(&old));
        assert_eq!(d.entities.keys().copied().collect::<Vec<_>>(), vec![new, other]);
        assert_eq!(d.count(), 2);

        assert!(d.undo());
        assert_eq!(d.count(), 1, "nur der letzte Zyklus ist rückgängig");
        assert!(!d.undo());
    }

    #[test]
    fn long_sessions_keep_the_store_bounded() {
        let mut d = Drawing::with_undo_depth(5);
        for i in 0..50 {
            let y = f64::from(i);
            let id = commit(&mut d, line(0.0, y, 10.0, y));
            d.undo();
            assert!(d.entities.contains_key(&id));
        }
        assert!(d.entities.len() <= 1, "verworfene Redo-Einträge werden entfernt");
        assert!(d.redo());
        assert_eq!(d.count(), 1);
    }
}
