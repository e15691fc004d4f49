//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler mutiert den AppState für genau einen Bereich und erneuert
//! danach die Vorschau.

pub mod history;
pub mod snap;
pub mod tool;
