//! Schnittpunkte zwischen Entitäten (begrenzte Segmente).

use super::EntityData;
use crate::core::{Quadratic, SolutionSet};

/// Abstand, innerhalb dessen ein Schnittpunkt der Trägerkurven noch als auf
/// dem begrenzten Segment liegend gilt.
const ON_ENTITY_TOLERANCE: f64 = 1.0e-6;

/// Schnittpunkte zweier Entitäten.
///
/// Container werden in Segmente zerlegt; pro Segment-Paar werden die
/// Trägerkurven geschnitten und nur Punkte auf beiden Segmenten behalten.
pub fn intersect_entities(e1: &EntityData, e2: &EntityData) -> SolutionSet {
    let mut result = SolutionSet::new();
    let segs1 = e1.segments();
    let segs2 = e2.segments();
    for s1 in &segs1 {
        let q1 = s1.to_quadratic();
        for s2 in &segs2 {
            let q2 = s2.to_quadratic();
            let hits = Quadratic::intersection(&q1, &q2);
            let on_both: SolutionSet = hits
                .iter()
                .copied()
                .filter(|p| p.valid)
                .filter(|p| s1.is_point_on(*p, ON_ENTITY_TOLERANCE) && s2.is_point_on(*p, ON_ENTITY_TOLERANCE))
                .collect();
            if on_both.is_empty() {
                continue;
            }
            let mut on_both = on_both;
            on_both.set_tangent(hits.is_tangent());
            result.append(&on_both);
        }
    }
    result
}

/// Schnittpunkte einer Entität mit sich selbst (Polylinien-Segmente
/// untereinander, ohne gemeinsame Nachbar-Scheitel).
pub fn self_intersections(entity: &EntityData) -> SolutionSet {
    let segs = entity.segments();
    let mut result = SolutionSet::new();
    for i in 0..segs.len() {
        for j in (i + 2)..segs.len() {
            // Schluss-Segment einer geschlossenen Polylinie berührt das erste
            if i == 0 && j + 1 == segs.len() && segs[j].end_point() == segs[0].start_point() {
                continue;
            }
            result.append(&intersect_entities(&segs[i], &segs[j]));
        }
    }
    result
}
