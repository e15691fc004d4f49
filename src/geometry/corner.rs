//! Ecken zweier Linien: Abrunden (Bogen mit Radius) und Fasen (Schräge).

use super::arc::ArcData;
use super::line::{intersect_lines, LineData};
use super::EntityData;
use crate::core::{Vector, TOLERANCE, TOLERANCE_ANGLE};

/// Ergebnis einer Ecken-Operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerResult {
    /// Neues Verbindungs-Element (Bogen beim Abrunden, Linie beim Fasen)
    pub corner: EntityData,
    /// Gekürzte bzw. verlängerte Linien, nur wenn getrimmt wird
    pub trimmed: Option<(LineData, LineData)>,
}

/// Gemeinsame Vorbereitung: Schnittpunkt und die Richtungen zu den
/// behaltenen Linienteilen (Seite des jeweiligen Klickpunkts).
struct Corner {
    apex: Vector,
    dir1: Vector,
    dir2: Vector,
    keep1: Vector,
    keep2: Vector,
}

fn prepare(l1: &LineData, click1: Vector, l2: &LineData, click2: Vector) -> Option<Corner> {
    let apex = intersect_lines(l1, l2).get(0);
    if !apex.valid {
        return None;
    }
    let (dir1, keep1) = kept_side(l1, click1, apex)?;
    let (dir2, keep2) = kept_side(l2, click2, apex)?;
    let between = Vector::angle_between(dir1, dir2);
    if between < TOLERANCE_ANGLE || (between - std::f64::consts::PI).abs() < TOLERANCE_ANGLE {
        return None;
    }
    Some(Corner {
        apex,
        dir1,
        dir2,
        keep1,
        keep2,
    })
}

/// Richtung vom Scheitel zum Klickpunkt entlang der Linie und der dort
/// liegende Endpunkt.
fn kept_side(line: &LineData, click: Vector, apex: Vector) -> Option<(Vector, Vector)> {
    let foot = line.nearest_point_on(click, false);
    let mut dir = (foot - apex).normalized();
    if !dir.valid {
        // Klick auf dem Scheitel: zum weiter entfernten Endpunkt
        let far = if apex.squared_to(line.start) > apex.squared_to(line.end) {
            line.start
        } else {
            line.end
        };
        dir = (far - apex).normalized();
    }
    if !dir.valid {
        return None;
    }
    let keep = if (line.start - apex).dot(dir) >= (line.end - apex).dot(dir) {
        line.start
    } else {
        line.end
    };
    Some((dir, keep))
}

/// Linie zwischen dem behaltenen Endpunkt und `cut`, Richtung wie `line`.
fn trimmed_line(line: &LineData, keep: Vector, cut: Vector) -> LineData {
    if keep == line.start {
        LineData::new(line.start, cut)
    } else {
        LineData::new(cut, line.end)
    }
}

/// Rundet die Ecke zweier Linien mit `radius` ab.
///
/// Die Klickpunkte bestimmen, welche Linienteile erhalten bleiben.
pub fn round_lines(
    l1: &LineData,
    click1: Vector,
    l2: &LineData,
    click2: Vector,
    radius: f64,
    trim: bool,
) -> Option<CornerResult> {
    if radius < TOLERANCE {
        return None;
    }
    let c = prepare(l1, click1, l2, click2)?;
    let half = c.dir1.dot(c.dir2).clamp(-1.0, 1.0).acos() / 2.0;
    let tangent_dist = radius / half.tan();
    let t1 = c.apex + c.dir1 * tangent_dist;
    let t2 = c.apex + c.dir2 * tangent_dist;
    let bisector = (c.dir1 + c.dir2).normalized();
    if !bisector.valid {
        return None;
    }
    let center = c.apex + bisector * (radius / half.sin());
    let reversed = (t1 - center).cross(t2 - center) < 0.0;
    let arc = ArcData::new(center, radius, center.angle_to(t1), center.angle_to(t2), reversed);
    Some(CornerResult {
        corner: EntityData::Arc(arc),
        trimmed: trim.then(|| (trimmed_line(l1, c.keep1, t1), trimmed_line(l2, c.keep2, t2))),
    })
}

/// Fast die Ecke zweier Linien mit den Schenkellängen `length1`/`length2`.
pub fn bevel_lines(
    l1: &LineData,
    click1: Vector,
    l2: &LineData,
    click2: Vector,
    length1: f64,
    length2: f64,
    trim: bool,
) -> Option<CornerResult> {
    if length1 < TOLERANCE || length2 < TOLERANCE {
        return None;
    }
    let c = prepare(l1, click1, l2, click2)?;
    let b1 = c.apex + c.dir1 * length1;
    let b2 = c.apex + c.dir2 * length2;
    Some(CornerResult {
        corner: EntityData::Line(LineData::new(b1, b2)),
        trimmed: trim.then(|| (trimmed_line(l1, c.keep1, b1), trimmed_line(l2, c.keep2, b2))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn corner_lines() -> (LineData, LineData) {
        (
            LineData::new(Vector::ZERO, Vector::new(10.0, 0.0)),
            LineData::new(Vector::ZERO, Vector::new(0.0, 10.0)),
        )
    }

    #[test]
    fn round_right_angle() {
        let (l1, l2) = corner_lines();
        let r = round_lines(&l1, Vector::new(5.0, 0.0), &l2, Vector::new(0.0, 5.0), 2.0, true)
            .expect("Rundung erwartet");
        let EntityData::Arc(arc) = r.corner else {
            panic!("Bogen erwartet");
        };
        assert_abs_diff_eq!(arc.center.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.center.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.angle_length(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        let (t1, t2) = r.trimmed.expect("getrimmte Linien erwartet");
        assert_abs_diff_eq!(t1.start.x, 2.0, epsilon = 1e-12);
        assert_eq!(t1.end, Vector::new(10.0, 0.0));
        assert_abs_diff_eq!(t2.start.y, 2.0, epsilon = 1e-12);
        assert_eq!(t2.end, Vector::new(0.0, 10.0));
    }

    #[test]
    fn trimmed_lines_keep_their_direction() {
        // l1 läuft zum Scheitel hin, l2 vom Scheitel weg
        let l1 = LineData::new(Vector::new(10.0, 0.0), Vector::ZERO);
        let l2 = LineData::new(Vector::ZERO, Vector::new(0.0, 10.0));
        let click1 = Vector::new(5.0, 0.0);
        let click2 = Vector::new(0.0, 5.0);

        let r = round_lines(&l1, click1, &l2, click2, 2.0, true).expect("Rundung erwartet");
        let (t1, t2) = r.trimmed.expect("getrimmte Linien erwartet");
        assert_eq!(t1.start, l1.start, "Startpunkt von l1 bleibt Startpunkt");
        assert_abs_diff_eq!(t1.end.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t2.start.y, 2.0, epsilon = 1e-12);
        assert_eq!(t2.end, l2.end, "Endpunkt von l2 bleibt Endpunkt");

        let r = bevel_lines(&l1, click1, &l2, click2, 3.0, 4.0, true).expect("Fase erwartet");
        let (b1, b2) = r.trimmed.expect("getrimmte Linien erwartet");
        assert_eq!(b1.start, l1.start);
        assert_abs_diff_eq!(b1.end.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b2.start.y, 4.0, epsilon = 1e-12);
        assert_eq!(b2.end, l2.end);
    }

    #[test]
    fn bevel_right_angle_without_trim() {
        let (l1, l2) = corner_lines();
        let r = bevel_lines(&l1, Vector::new(5.0, 0.0), &l2, Vector::new(0.0, 5.0), 3.0, 4.0, false)
            .expect("Fase erwartet");
        assert!(r.trimmed.is_none());
        let EntityData::Line(line) = r.corner else {
            panic!("Linie erwartet");
        };
        assert_abs_diff_eq!(line.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_cannot_be_rounded() {
        let l1 = LineData::new(Vector::ZERO, Vector::new(10.0, 0.0));
        let l2 = LineData::new(Vector::new(0.0, 1.0), Vector::new(10.0, 1.0));
        assert!(round_lines(&l1, Vector::new(5.0, 0.0), &l2, Vector::new(5.0, 1.0), 1.0, true).is_none());
    }
}
