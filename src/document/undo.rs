//! Undo-Zyklen des Dokuments.
//!
//! Ein Zyklus sammelt die IDs aller Entitäten, die eine Operation angelegt
//! oder entfernt hat. Rückgängig machen schaltet deren `undone`-Zustand um;
//! das Dokument wendet den Zyklus an.
//!
//! Zyklen, die über die maximale Tiefe hinausfallen oder beim Start eines
//! neuen Zyklus vom Redo-Stapel verworfen werden, sammelt das Log in
//! `dropped`. Das Dokument holt sie mit [`UndoLog::take_dropped`] ab und
//! entfernt rückgängig gemachte Entitäten, die nicht mehr erreichbar sind.

use super::EntityId;

/// Standard-Tiefe des Undo-Logs.
pub const DEFAULT_UNDO_DEPTH: usize = 200;

/// Ein abgeschlossener Undo-Zyklus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoCycle {
    pub undoables: Vec<EntityId>,
}

/// Undo/Redo-Stapel für Zyklen mit maximaler Tiefe.
#[derive(Debug, Default)]
pub struct UndoLog {
    undo_stack: Vec<UndoCycle>,
    redo_stack: Vec<UndoCycle>,
    current: Option<UndoCycle>,
    max_depth: usize,
    dropped: Vec<UndoCycle>,
}

impl UndoLog {
    /// Erstellt ein Undo-Log mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            current: None,
            max_depth,
            dropped: Vec::new(),
        }
    }

    /// Öffnet einen neuen Zyklus. Ein noch offener Zyklus wird vorher geschlossen.
    pub fn start_cycle(&mut self) {
        if self.current.is_some() {
            log::warn!("Undo-Zyklus war noch offen, wird abgeschlossen");
            self.end_cycle();
        }
        self.current = Some(UndoCycle::default());
    }

    /// Fügt dem offenen Zyklus eine Entität hinzu. Ohne offenen Zyklus no-op.
    pub fn add(&mut self, id: EntityId) -> bool {
        match self.current.as_mut() {
            Some(cycle) => {
                cycle.undoables.push(id);
                true
            }
            None => false,
        }
    }

    /// Schließt den offenen Zyklus. Leere Zyklen werden verworfen.
    pub fn end_cycle(&mut self) {
        let Some(cycle) = self.current.take() else {
            return;
        };
        if cycle.undoables.is_empty() {
            return;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.dropped.push(self.undo_stack.remove(0));
        }
        self.undo_stack.push(cycle);
        self.dropped.append(&mut self.redo_stack);
    }

    pub fn is_cycle_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Holt den letzten Zyklus vom Undo-Stapel und legt ihn auf den Redo-Stapel.
    pub fn pop_undo(&mut self) -> Option<UndoCycle> {
        let cycle = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.dropped.push(self.redo_stack.remove(0));
        }
        self.redo_stack.push(cycle.clone());
        Some(cycle)
    }

    /// Holt den letzten Zyklus vom Redo-Stapel und legt ihn auf den Undo-Stapel.
    pub fn pop_redo(&mut self) -> Option<UndoCycle> {
        let cycle = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.dropped.push(self.undo_stack.remove(0));
        }
        self.undo_stack.push(cycle.clone());
        Some(cycle)
    }

    /// Nicht mehr erreichbare Zyklen seit dem letzten Aufruf.
    pub fn take_dropped(&mut self) -> Vec<UndoCycle> {
        std::mem::take(&mut self.dropped)
    }

    /// Ob ein erreichbarer (oder offener) Zyklus die Entität enthält.
    pub fn references(&self, id: EntityId) -> bool {
        self.undo_stack
            .iter()
            .chain(&self.redo_stack)
            .chain(&self.current)
            .any(|cycle| cycle.undoables.contains(&id))
    }
}
