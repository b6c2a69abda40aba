pub mod mask;
pub mod pixel;

pub use mask::SkeletonMask;
pub use pixel::Pixel;
