//! Fasen: gerade Schräge mit zwei Schenkellängen.

use super::super::common::{parse_value, split_command};
use super::super::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolKind};
use super::{CornerPicker, CornerStatus};
use crate::core::{Vector, TOLERANCE};
use crate::document::Document;
use crate::geometry::{bevel_lines, CornerResult, LineData};
use crate::shared::{ToolPreview, ToolSettings};

pub struct BevelTool {
    pub(crate) picker: CornerPicker,
    pub(crate) length1: f64,
    pub(crate) length2: f64,
    pub(crate) trim: bool,
}

impl BevelTool {
    pub fn new() -> Self {
        Self::from_settings(&ToolSettings::default())
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            picker: CornerPicker::default(),
            length1: settings.bevel_length1,
            length2: settings.bevel_length2,
            trim: settings.bevel_trim,
        }
    }
}

impl Default for BevelTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionTool for BevelTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Bevel
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
        let solve = bevel_solver(self.length1, self.length2, self.trim);
        self.picker.click(pointer, ctx, solve)
    }

    fn on_command(&mut self, command: &str, ctx: &mut ToolContext<'_>) -> ToolAction {
        let (keyword, rest) = split_command(command);
        let target = match keyword.as_str() {
            "trim" => {
                self.trim = !self.trim;
                return ToolAction::UpdatePreview;
            }
            "length1" | "l1" => &mut self.length1,
            "length2" | "l2" => &mut self.length2,
            _ => return ToolAction::Ignored,
        };
        let Some(length) = parse_value(ctx, rest) else {
            return ToolAction::Ignored;
        };
        if length < TOLERANCE {
            ctx.message("Length must be positive");
            return ToolAction::Ignored;
        }
        *target = length;
        ToolAction::UpdatePreview
    }

    fn on_back(&mut self, ctx: &mut ToolContext<'_>) -> ToolAction {
        self.picker.back(ctx.doc)
    }

    fn preview(&self) -> ToolPreview {
        self.picker.preview(bevel_solver(self.length1, self.length2, self.trim))
    }

    fn reset(&mut self, doc: &mut dyn Document) {
        self.picker.reset(doc);
    }

    fn store_settings(&self, settings: &mut ToolSettings) {
        settings.bevel_length1 = self.length1;
        settings.bevel_length2 = self.length2;
        settings.bevel_trim = self.trim;
    }
}

fn bevel_solver(
    length1: f64, length2: f64, trim: bool,
) -> impl Fn(&LineData, Vector, &LineData, Vector) -> Option<CornerResult> {
    move |l1, c1, l2, c2| bevel_lines(l1, c1, l2, c2, length1, length2, trim)
}
