//! Zentrale Konfiguration des Konstruktions-Editors.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::geometry::SegmentMode;

// ── Raster & Fangen ─────────────────────────────────────────────────

/// Standard-Rasterweite (x und y, Zeichnungseinheiten).
pub const GRID_SPACING: f64 = 10.0;
/// Standard-Abstand für das Fangen "Punkt im Abstand".
pub const SNAP_DISTANCE: f64 = 1.0;
/// Standard-Anzahl der Teilungspunkte beim Mittelpunkt-Fangen.
pub const MIDDLE_DIVISIONS: usize = 1;
/// Standard-Fangmodus als Bitfeld: Endpunkt + Raster + frei.
pub const SNAP_MODE_BITS: u32 = 0b00_1110_0000;

// ── Werkzeuge ───────────────────────────────────────────────────────

/// Standard-Winkel (Grad) des Linien-mit-Winkel-Werkzeugs.
pub const LINE_ANGLE: f64 = 45.0;
/// Standard-Länge des Linien-mit-Winkel-Werkzeugs.
pub const LINE_LENGTH: f64 = 10.0;
/// Standard-Eckenzahl des Polygon-Werkzeugs.
pub const POLYGON_CORNERS: usize = 3;
/// Standard-Radius beim Abrunden und im Polylinien-Modus `TanRad`.
pub const ROUND_RADIUS: f64 = 1.0;
/// Standard-Schenkellänge beim Fasen.
pub const BEVEL_LENGTH: f64 = 1.0;
/// Standard-Bogenwinkel (Grad) im Polylinien-Modus `Ang`.
pub const POLYLINE_ANGLE: f64 = 180.0;

/// Bezugspunkt des Linien-mit-Winkel-Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineSnapPoint {
    #[default]
    Start,
    Middle,
    End,
}

impl LineSnapPoint {
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => LineSnapPoint::Middle,
            2 => LineSnapPoint::End,
            _ => LineSnapPoint::Start,
        }
    }
}

/// Gemerkte Werkzeug-Einstellungen. Werkzeuge lesen sie beim Anlegen und
/// schreiben sie beim Beenden zurück.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolSettings {
    // ── Linie mit Winkel ────────────────────────────────────────
    /// Winkel in Grad
    pub line_angle: f64,
    pub line_length: f64,
    pub line_snap_point: LineSnapPoint,

    // ── Polylinie ───────────────────────────────────────────────
    pub polyline_mode: SegmentMode,
    pub polyline_radius: f64,
    /// Eingeschlossener Winkel in Grad (Modus `Ang`)
    pub polyline_angle: f64,
    pub polyline_reversed: bool,

    // ── Polygon ─────────────────────────────────────────────────
    pub polygon_corners: usize,

    // ── Abrunden / Fasen ────────────────────────────────────────
    pub round_radius: f64,
    pub round_trim: bool,
    pub bevel_length1: f64,
    pub bevel_length2: f64,
    pub bevel_trim: bool,

    // ── Ellipse ─────────────────────────────────────────────────
    /// Ellipsen-Werkzeug erzeugt einen elliptischen Bogen statt einer Vollellipse
    pub ellipse_is_arc: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            line_angle: LINE_ANGLE,
            line_length: LINE_LENGTH,
            line_snap_point: LineSnapPoint::Start,
            polyline_mode: SegmentMode::Line,
            polyline_radius: ROUND_RADIUS,
            polyline_angle: POLYLINE_ANGLE,
            polyline_reversed: false,
            polygon_corners: POLYGON_CORNERS,
            round_radius: ROUND_RADIUS,
            round_trim: true,
            bevel_length1: BEVEL_LENGTH,
            bevel_length2: BEVEL_LENGTH,
            bevel_trim: true,
            ellipse_is_arc: false,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `cad_construct.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Raster ──────────────────────────────────────────────────
    /// Rasterweite in x
    pub grid_spacing_x: f64,
    /// Rasterweite in y
    pub grid_spacing_y: f64,

    // ── Fangen ──────────────────────────────────────────────────
    /// Fangradius; ohne Angabe die halbe Rasterweite
    #[serde(default)]
    pub snap_range: Option<f64>,
    /// Fangmodus als Bitfeld (siehe `SnapMode::to_bits`)
    pub snap_mode_bits: u32,
    /// Abstand für das Fangen "Punkt im Abstand"
    pub snap_distance: f64,
    /// Teilungspunkte für das Mittelpunkt-Fangen
    #[serde(default = "default_middle_divisions")]
    pub middle_divisions: usize,

    // ── Werkzeuge ───────────────────────────────────────────────
    #[serde(default)]
    pub tools: ToolSettings,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_spacing_x: GRID_SPACING,
            grid_spacing_y: GRID_SPACING,
            snap_range: None,
            snap_mode_bits: SNAP_MODE_BITS,
            snap_distance: SNAP_DISTANCE,
            middle_divisions: MIDDLE_DIVISIONS,
            tools: ToolSettings::default(),
        }
    }
}

/// Serde-Default für `middle_divisions` (Abwärtskompatibilität).
fn default_middle_divisions() -> usize {
    MIDDLE_DIVISIONS
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("cad_construct"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("cad_construct.toml")
    }

    /// Effektiver Fangradius: Override oder `|Raster / 2|`.
    pub fn effective_snap_range(&self) -> f64 {
        self.snap_range
            .unwrap_or_else(|| (self.grid_spacing_x.abs().max(self.grid_spacing_y.abs())) / 2.0)
    }
}
