//! Application-Layer: Controller, State, Events, Fang-Engine und Werkzeuge.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod snapper;
/// Application State
///
/// Dieses Modul verwaltet den Zustand einer Konstruktions-Sitzung
/// (Zeichnung, Fangen, aktives Werkzeug, Vorschau).
pub mod state;
pub mod tools;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use snapper::{Restriction, SnapFlag, SnapMode, Snapper};
pub use state::AppState;
pub use tools::{ConstructionTool, ToolAction, ToolKind, ToolManager};
