use crate::geometry::Pixel;

use super::{Vector2, TOLERANCE};

/// Number of pixels to look ahead when estimating a chain's direction.
///
/// Long enough to smooth out single-pixel staircase jitter, short enough to
/// stay local to the start of the chain.
pub const TANGENT_LOOKAHEAD: usize = 5;

/// Returns the unit direction at the start of a pixel chain.
///
/// The direction runs from `chain[0]` to `chain[min(5, last)]`. Chains with
/// fewer than two pixels, or whose lookahead pixel coincides with the start,
/// yield the zero vector.
#[must_use]
pub fn tangent(chain: &[Pixel]) -> Vector2 {
    if chain.len() < 2 {
        return Vector2::zeros();
    }
    let ahead = chain[TANGENT_LOOKAHEAD.min(chain.len() - 1)];
    let v = ahead.to_vector() - chain[0].to_vector();
    let norm = v.norm();
    if norm < TOLERANCE {
        return Vector2::zeros();
    }
    v / norm
}

/// Returns the unit direction at the end of a chain, pointing past its last
/// pixel in the direction of travel.
#[must_use]
pub fn exit_tangent(chain: &[Pixel]) -> Vector2 {
    let reversed: Vec<Pixel> = chain.iter().rev().copied().collect();
    -tangent(&reversed)
}

/// Alignment score of two unit vectors: `1` continues straight, `0` is a
/// right-angle turn and `-1` doubles back.
///
/// Callers are responsible for normalization.
#[must_use]
pub fn angle_score(incoming: &Vector2, outgoing: &Vector2) -> f64 {
    incoming.dot(outgoing)
}
