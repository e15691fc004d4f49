//! Mathematischer Kern: Vektor, Lösungsmenge, Toleranzen, Polynom-Löser und
//! implizite Kurven zweiten Grades.

pub mod math;
pub mod quadratic;
pub mod solutions;
pub mod vector;

pub use math::{
    angle_difference_abs, correct_angle, deg_to_rad, is_angle_between, rad_to_deg, MAX_DISTANCE,
    TOLERANCE, TOLERANCE15, TOLERANCE2, TOLERANCE_ANGLE,
};
pub use quadratic::Quadratic;
pub use solutions::{ClosestSolution, SolutionSet};
pub use vector::Vector;
