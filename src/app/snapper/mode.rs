//! Fangmodus: unabhängige Flags plus genau eine Richtungs-Einschränkung.

use serde::{Deserialize, Serialize};

/// Richtungs-Einschränkung relativ zum relativen Nullpunkt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Restriction {
    #[default]
    Nothing,
    Horizontal,
    Vertical,
    Orthogonal,
}

impl Restriction {
    /// Kodierung in den zwei obersten Bits des Fangmodus.
    fn code(self) -> u32 {
        match self {
            Restriction::Nothing => 0,
            Restriction::Horizontal => 1,
            Restriction::Vertical => 2,
            Restriction::Orthogonal => 3,
        }
    }

    fn from_code(code: u32) -> Self {
        match code & 0b11 {
            1 => Restriction::Horizontal,
            2 => Restriction::Vertical,
            3 => Restriction::Orthogonal,
            _ => Restriction::Nothing,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" | "nothing" => Some(Restriction::Nothing),
            "h" | "horizontal" => Some(Restriction::Horizontal),
            "v" | "vertical" => Some(Restriction::Vertical),
            "ortho" | "orthogonal" => Some(Restriction::Orthogonal),
            _ => None,
        }
    }
}

/// Einzeln schaltbare Fangstrategie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapFlag {
    Free,
    Grid,
    Endpoint,
    Middle,
    Distance,
    Center,
    OnEntity,
    Intersection,
}

impl SnapFlag {
    /// Bitposition im persistierten Fangmodus.
    fn bit(self) -> u32 {
        match self {
            SnapFlag::Intersection => 0,
            SnapFlag::OnEntity => 1,
            SnapFlag::Center => 2,
            SnapFlag::Distance => 3,
            SnapFlag::Middle => 4,
            SnapFlag::Endpoint => 5,
            SnapFlag::Grid => 6,
            SnapFlag::Free => 7,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "free" => Some(SnapFlag::Free),
            "grid" => Some(SnapFlag::Grid),
            "endpoint" | "end" => Some(SnapFlag::Endpoint),
            "middle" | "mid" => Some(SnapFlag::Middle),
            "distance" | "dist" => Some(SnapFlag::Distance),
            "center" => Some(SnapFlag::Center),
            "onentity" | "on_entity" | "on" => Some(SnapFlag::OnEntity),
            "intersection" | "int" => Some(SnapFlag::Intersection),
            _ => None,
        }
    }
}

const RESTRICTION_SHIFT: u32 = 8;

/// Aktivierte Fangstrategien und Einschränkung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapMode {
    pub free: bool,
    pub grid: bool,
    pub endpoint: bool,
    pub middle: bool,
    pub distance: bool,
    pub center: bool,
    pub on_entity: bool,
    pub intersection: bool,
    pub restriction: Restriction,
}

impl SnapMode {
    pub fn is_set(&self, flag: SnapFlag) -> bool {
        match flag {
            SnapFlag::Free => self.free,
            SnapFlag::Grid => self.grid,
            SnapFlag::Endpoint => self.endpoint,
            SnapFlag::Middle => self.middle,
            SnapFlag::Distance => self.distance,
            SnapFlag::Center => self.center,
            SnapFlag::OnEntity => self.on_entity,
            SnapFlag::Intersection => self.intersection,
        }
    }

    pub fn set(&mut self, flag: SnapFlag, on: bool) {
        let slot = match flag {
            SnapFlag::Free => &mut self.free,
            SnapFlag::Grid => &mut self.grid,
            SnapFlag::Endpoint => &mut self.endpoint,
            SnapFlag::Middle => &mut self.middle,
            SnapFlag::Distance => &mut self.distance,
            SnapFlag::Center => &mut self.center,
            SnapFlag::OnEntity => &mut self.on_entity,
            SnapFlag::Intersection => &mut self.intersection,
        };
        *slot = on;
    }

    /// Schaltet alle Strategien ab und hebt die Einschränkung auf.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Bitfeld (MSB→LSB): Einschränkung (2 Bit), frei, Raster, Endpunkt,
    /// Mitte, Abstand, Zentrum, auf Entität, Schnittpunkt.
    pub fn to_bits(&self) -> u32 {
        const FLAGS: [SnapFlag; 8] = [
            SnapFlag::Free,
            SnapFlag::Grid,
            SnapFlag::Endpoint,
            SnapFlag::Middle,
            SnapFlag::Distance,
            SnapFlag::Center,
            SnapFlag::OnEntity,
            SnapFlag::Intersection,
        ];
        FLAGS
            .iter()
            .filter(|f| self.is_set(**f))
            .fold(self.restriction.code() << RESTRICTION_SHIFT, |bits, f| bits | (1 << f.bit()))
    }

    pub fn from_bits(bits: u32) -> Self {
        let flag = |f: SnapFlag| bits & (1 << f.bit()) != 0;
        Self {
            free: flag(SnapFlag::Free),
            grid: flag(SnapFlag::Grid),
            endpoint: flag(SnapFlag::Endpoint),
            middle: flag(SnapFlag::Middle),
            distance: flag(SnapFlag::Distance),
            center: flag(SnapFlag::Center),
            on_entity: flag(SnapFlag::OnEntity),
            intersection: flag(SnapFlag::Intersection),
            restriction: Restriction::from_code(bits >> RESTRICTION_SHIFT),
        }
    }
}
