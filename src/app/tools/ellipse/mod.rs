//! Ellipsen-Werkzeuge: über Achsen (optional als Bogen), über Brennpunkte,
//! über Zentrum und Punkte sowie als Inellipse von vier Linien.

mod axis;
mod center_points;
mod foci;
mod inscribe;

pub use axis::{EllipseAxisStatus, EllipseAxisTool};
pub use center_points::{EllipseCenter3PointsStatus, EllipseCenter3PointsTool};
pub use foci::{EllipseFociPointStatus, EllipseFociPointTool, MSG_TOTAL_TOO_SMALL};
pub use inscribe::{EllipseInscribeTool, MSG_NOT_UNIQUE};
