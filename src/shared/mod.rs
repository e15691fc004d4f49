//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die Auswertung numerischer Eingaben und
//! die Vorschau-Deskriptoren, die zwischen `app` und einem Renderer
//! ausgetauscht werden.

pub mod expression;
pub mod options;
mod preview;

pub use expression::{evaluate, ExpressionError};
pub use options::{EditorOptions, LineSnapPoint, ToolSettings};
pub use preview::{PreviewFrame, ToolPreview};
