//! Bestätigte Punkte eines Linienzugs mit Index für Undo/Redo.

use crate::core::Vector;
use crate::document::DEFAULT_UNDO_DEPTH;

/// Höchstens so viele Punkte werden gehalten: ein Startpunkt plus ein
/// Punkt je Strecke, die das Undo-Log des Dokuments noch zurücknehmen kann.
pub const MAX_POINTS: usize = DEFAULT_UNDO_DEPTH + 1;

/// Punkt-Historie. `index` zeigt auf den aktuellen Startpunkt; Einträge
/// dahinter sind rückgängig gemachte Punkte, die per Redo zurückkommen.
/// Der erste Punkt des Zugs bleibt für `close` erhalten, auch wenn ältere
/// Einträge verworfen wurden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    points: Vec<Vector>,
    index: usize,
    first: Vector,
}

impl History {
    /// Beginnt eine neue Historie mit dem Startpunkt.
    pub fn start(&mut self, point: Vector) {
        self.points.clear();
        self.points.push(point);
        self.index = 0;
        self.first = point;
    }

    /// Hängt einen Punkt an; rückgängig gemachte Einträge entfallen.
    pub fn push(&mut self, point: Vector) {
        self.points.truncate(self.index + 1);
        self.points.push(point);
        if self.points.len() > MAX_POINTS {
            self.points.remove(0);
        }
        self.index = self.points.len() - 1;
    }

    pub fn current(&self) -> Vector {
        self.points.get(self.index).copied().unwrap_or_default()
    }

    pub fn first(&self) -> Vector {
        self.first
    }

    /// Anzahl bestätigter Punkte bis einschließlich `index`.
    pub fn confirmed(&self) -> usize {
        if self.points.is_empty() {
            0
        } else {
            self.index + 1
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.points.len()
    }

    pub fn undo(&mut self) -> Vector {
        if self.can_undo() {
            self.index -= 1;
        }
        self.current()
    }

    pub fn redo(&mut self) -> Vector {
        if self.can_redo() {
            self.index += 1;
        }
        self.current()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.index = 0;
        self.first = Vector::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_capped_but_keeps_first_point() {
        let mut history = History::default();
        history.start(Vector::ZERO);
        for i in 1..=MAX_POINTS + 9 {
            history.push(Vector::new(i as f64, 0.0));
        }
        assert_eq!(history.confirmed(), MAX_POINTS);
        assert_eq!(history.first(), Vector::ZERO, "Startpunkt für close");

        let mut undos = 0;
        while history.can_undo() {
            history.undo();
            undos += 1;
        }
        assert_eq!(undos, DEFAULT_UNDO_DEPTH);
        assert_eq!(history.current(), Vector::new(10.0, 0.0));
    }
}
