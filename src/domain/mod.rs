pub mod node;
pub mod edge;
pub mod graph;
pub mod policy;
pub mod locality;
pub mod builder;
pub mod ports;
