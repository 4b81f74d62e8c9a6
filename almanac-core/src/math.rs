//! Small numeric helpers shared across the workspace.

/// Floored division of a float by an integer denominator.
///
/// Returns `(quotient, remainder)` with the remainder normalized into the
/// half-open interval `[0, denominator)`, so negative inputs round toward
/// negative infinity rather than toward zero.
pub fn div_rem_floor(numerator: f64, denominator: i64) -> (i64, f64) {
    let mut quotient = (numerator / denominator as f64) as i64;
    let mut remainder = numerator % denominator as f64;
    if remainder < 0.0 {
        quotient -= 1;
        remainder += denominator as f64;
    }
    (quotient, remainder)
}

/// Converts rectangular `[x, y, z]` coordinates to spherical
/// `[radius, inclination, azimuth]`.
///
/// The degenerate column x = y = 0 maps to azimuth 0.
pub fn rectangular_to_spherical(coordinates: &[f64; 3]) -> [f64; 3] {
    let [x, y, z] = *coordinates;
    let radius = libm::sqrt(x * x + y * y + z * z);
    let inclination = libm::acos(z / radius);
    let mut azimuth = libm::atan(y / x);
    if azimuth.is_nan() {
        azimuth = 0.0;
    }
    [radius, inclination, azimuth]
}

/// Converts spherical `[radius, inclination, azimuth]` coordinates back to
/// rectangular `[x, y, z]`.
pub fn spherical_to_rectangular(coordinates: &[f64; 3]) -> [f64; 3] {
    let [radius, inclination, azimuth] = *coordinates;
    let ri = radius * libm::sin(inclination);
    let x = ri * libm::cos(azimuth);
    let y = ri * libm::sin(azimuth);
    let z = radius * libm::cos(inclination);
    [x, y, z]
}
