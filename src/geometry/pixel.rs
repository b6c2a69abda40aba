use std::fmt;

use crate::math::Vector2;

/// A mask cell addressed by `(row, col)`.
///
/// Pixels order lexicographically by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pixel {
    /// Row index (y).
    pub row: i32,
    /// Column index (x).
    pub col: i32,
}

impl Pixel {
    /// Creates a new pixel coordinate.
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the pixel as a `(row, col)` vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(f64::from(self.row), f64::from(self.col))
    }

    /// Squared Euclidean distance to another pixel.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i64 {
        let dr = i64::from(self.row) - i64::from(other.row);
        let dc = i64::from(self.col) - i64::from(other.col);
        dr * dr + dc * dc
    }

    /// Euclidean distance to another pixel.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        let mut pixels = vec![Pixel::new(2, 0), Pixel::new(0, 5), Pixel::new(0, 1)];
        pixels.sort();
        assert_eq!(
            pixels,
            vec![Pixel::new(0, 1), Pixel::new(0, 5), Pixel::new(2, 0)]
        );
    }

    #[test]
    fn distance_3_4_5() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }
}
