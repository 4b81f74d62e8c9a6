//! Chebyshev series evaluation.

/// Evaluates a Chebyshev series and its derivative at the normalized
/// parameter `x` in `[-1, 1]`.
///
/// Position and velocity are accumulated in one pass: the polynomial
/// recurrence `p2 = 2x·p1 - p0` runs alongside the derivative recurrence
/// `v2 = 2x·v1 - v0 + 2·p1`, which reuses the running polynomial term. The
/// returned velocity is the derivative with respect to `x`; the caller scales
/// it to a per-day rate.
pub fn position_velocity(coefficients: &[f64], x: f64) -> (f64, f64) {
    let mut position = match coefficients.first() {
        Some(&c0) => c0,
        None => return (0.0, 0.0),
    };
    let mut velocity = 0.0;

    let mut p0 = 1.0;
    let mut p1 = x;
    let mut v0 = 0.0;
    let mut v1 = 1.0;
    for &c in &coefficients[1..] {
        position += c * p1;
        velocity += c * v1;

        let p2 = 2.0 * x * p1 - p0;
        let v2 = 2.0 * x * v1 - v0 + 2.0 * p1;
        p0 = p1;
        p1 = p2;
        v0 = v1;
        v1 = v2;
    }

    (position, velocity)
}
