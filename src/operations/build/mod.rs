mod build_graph;
mod merge_close_nodes;
mod prune_spurs;

pub use build_graph::BuildGraph;
pub use merge_close_nodes::MergeCloseNodes;
pub use prune_spurs::PruneSpurs;
