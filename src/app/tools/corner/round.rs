//! Abrunden: Bogen mit festem Radius zwischen zwei Linien.

use super::super::common::{parse_value, split_command};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use super::{CornerPicker, CornerStatus};
use crate::core::{Vector, TOLERANCE};
use crate::document::Document;
use crate::geometry::{round_lines, CornerResult, LineData};
use crate::shared::{ToolPreview, ToolSettings};

pub struct RoundTool {
    pub(crate) picker: CornerPicker,
    pub(crate) radius: f64,
    pub(crate) trim: bool,
}

impl RoundTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            picker: CornerPicker::default(),
            radius: settings.round_radius,
            trim: settings.round_trim,
        }
    }
}

impl Default for RoundTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for RoundTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Round
    }

    fn status_text(&self) -> &str {
        match self.picker.status() {
            CornerStatus::SetEntity1 => "Erste Linie wählen",
            CornerStatus::SetEntity2 => "Zweite Linie wählen",
        }
    }

    fn is_initial(&self) -> bool {
        self.picker.status() == CornerStatus::SetEntity1
    }

    fn picks_entities(&self) -> bool {
        true
    }

    fn on_mouse_move(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.picker.hover(pointer, ctx)
    }

    fn on_coordinate(&mut self, pointer: PointerInput, ctx: &mut ToolContext<'_>) -> ToolAction {
        let solve = round_solver(self.radius, self.trim);
        self.picker.click(pointer, ctx, solve)
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let (keyword, rest) = split_command(command);
        let text = match keyword.as_str() {
            "trim" => {
                self.trim = !self.trim;
                return ToolAction::UpdatePreview;
            }
            "radius" | "r" => rest,
            _ => command,
        };
        let Some(radius) = parse_value(ctx, text) else {
            return ToolAction::Ignored;
        };
        if radius < TOLERANCE {
            ctx.message("Radius must be positive");
            return ToolAction::Ignored;
        }
        self.radius = radius;
        ToolAction::UpdatePreview
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.picker.back(ctx.doc)
    }

    fn preview(&self) -> ToolPreview {
        self.picker.preview(round_solver(self.radius, self.trim))
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        self.picker.reset(doc);
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.round_radius = self.radius;
        settings.round_trim = self.trim;
    }
}

/// Löser mit festen Parametern (für Klick und Vorschau).
fn round_solver(
    radius: f64, trim: bool,
) -> impl Fn(&LineData, Vector, &LineData, Vector) -> Option<CornerResult> {
    move |l1, c1, l2, c2| round_lines(l1, c1, l2, c2, radius, trim)
}
