pub mod tangent;

pub use tangent::{angle_score, tangent, TANGENT_LOOKAHEAD};

/// 2D vector type, laid out as `(row, col)`.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
