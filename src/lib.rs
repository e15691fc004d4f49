//! cad_construct Library.
//! Interaktiver 2D-Konstruktionskern als Library exportiert für den
//! Headless-Treiber, Tests und Wiederverwendung in einer Oberfläche.

pub mod app;
pub mod core;
pub mod document;
pub mod geometry;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, ConstructionTool, Restriction, SnapFlag,
    SnapMode, Snapper, ToolAction, ToolKind,
};
pub use core::{SolutionSet, Vector};
pub use document::{Drawing, Entity, EntityId};
pub use geometry::{EntityData, EntityKind};
pub use shared::{EditorOptions, PreviewFrame, ToolPreview, ToolSettings};
