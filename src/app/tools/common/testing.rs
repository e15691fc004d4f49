//! Test-Gerüst: Dokument, Fang-Engine und Meldungen für Werkzeug-Tests.

use crate::app::snapper::{SnapMode, Snapper};
use crate::app::tools::{ConstructionTool, PointerInput, ToolAction, ToolContext, ToolEvent};
use crate::core::Vector;
use crate::document::{DocumentSink, Drawing, EntityId};
use crate::geometry::EntityData;

pub struct Harness {
    pub drawing: Drawing,
    pub snapper: Snapper,
    pub relative_zero: Vector,
    pub messages: Vec<String>,
}

impl Harness {
    /// Leeres Dokument, Fangen ohne Strategien, Raster 10.
    pub fn new() -> Self {
        Self {
            drawing: Drawing::new(),
            snapper: Snapper::new(SnapMode::default(), Vector::new(10.0, 10.0)),
            relative_zero: Vector::invalid(),
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, data: impl Into<EntityData>) -> EntityId {
        self.drawing.add_entity(data.into())
    }

    pub fn send<T: ConstructionTool>(&mut self, tool: &mut T, event: ToolEvent) -> ToolAction {
        let mut ctx = ToolContext::new(
            &mut self.drawing,
            &self.snapper,
            &mut self.relative_zero,
            &mut self.messages,
        );
        tool.on_event(&event, &mut ctx)
    }

    pub fn click<T: ConstructionTool>(&mut self, tool: &mut T, x: f64, y: f64) -> ToolAction {
        self.send(tool, ToolEvent::Coordinate(PointerInput::typed(Vector::new(x, y))))
    }

    pub fn move_to<T: ConstructionTool>(&mut self, tool: &mut T, x: f64, y: f64) -> ToolAction {
        self.send(tool, ToolEvent::Moved(PointerInput::typed(Vector::new(x, y))))
    }

    pub fn command<T: ConstructionTool>(&mut self, tool: &mut T, text: &str) -> ToolAction {
        self.send(tool, ToolEvent::Command(text.to_string()))
    }

    pub fn back<T: ConstructionTool>(&mut self, tool: &mut T) -> ToolAction {
        self.send(tool, ToolEvent::Back)
    }

    /// Geometrie aller aktiven Entitäten in Einfüge-Reihenfolge.
    pub fn entities(&self) -> Vec<EntityData> {
        self.drawing.active().map(|e| e.data.clone()).collect()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}
