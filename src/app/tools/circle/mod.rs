//! Kreis-Werkzeuge, die an vorhandener Geometrie konstruieren.

mod inscribe;
mod tan1_2p;

pub use inscribe::{CircleInscribeStatus, CircleInscribeTool};
pub use tan1_2p::{CircleTan1_2PStatus, CircleTan1_2PTool};

#[cfg(test)]
mod tests;
