pub mod constants;
pub mod math;

pub use math::{div_rem_floor, rectangular_to_spherical, spherical_to_rectangular};
