// Domain model: records, the merged graph, visibility, degree statistics.

pub mod degree;
pub mod filter;
pub mod graph;
pub mod ingest;
pub mod node_kind;
