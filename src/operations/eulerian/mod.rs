mod transform;

pub use transform::{EulerianTransform, Traversability};
