pub mod build;
pub mod eulerian;
pub mod pipeline;
pub mod traverse;
