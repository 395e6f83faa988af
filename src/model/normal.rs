//! Standard normal draws via the Box-Muller transform

use rand::Rng;
use std::f64::consts::PI;

/// Draw z ~ N(0, 1) from two uniform(0, 1) draws.
///
/// Draws that land exactly on 0 are rejected so `ln(u)` stays finite.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = positive_uniform(rng);
    let v = positive_uniform(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

fn positive_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}
