mod angular_walker;
mod path_generator;

pub use angular_walker::{AngularWalker, TourSegment};
pub use path_generator::PathGenerator;
