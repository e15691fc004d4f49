//! Handler für Fangmodus, Einschränkung und Raster.

use anyhow::bail;

use super::tool::refresh_preview;
use crate::app::snapper::{Restriction, SnapFlag};
use crate::app::AppState;
use crate::core::{Vector, TOLERANCE};

/// Schaltet eine Fang-Strategie und übernimmt sie in die Optionen.
pub fn set_flag(state: &mut AppState, flag: SnapFlag, on: bool) {
    state.snapper.set_flag(flag, on);
    state.snapper.store(&mut state.options);
    log::info!("Fangen {:?}: {}", flag, if on { "an" } else { "aus" });
}

/// Setzt die Richtungs-Einschränkung.
pub fn set_restriction(state: &mut AppState, restriction: Restriction) {
    state.snapper.set_restriction(restriction);
    state.snapper.store(&mut state.options);
    log::info!("Einschränkung: {:?}", restriction);
}

/// Setzt die Rasterweite. Nicht-positive Werte werden abgelehnt.
pub fn set_grid_spacing(state: &mut AppState, spacing: Vector) -> anyhow::Result<()> {
    if !spacing.valid || spacing.x.abs() < TOLERANCE || spacing.y.abs() < TOLERANCE {
        bail!("ungültige Rasterweite ({}, {})", spacing.x, spacing.y);
    }
    state.snapper.set_grid_spacing(spacing);
    state.snapper.store(&mut state.options);
    log::info!("Rasterweite: ({}, {})", spacing.x, spacing.y);
    refresh_preview(state);
    Ok(())
}
