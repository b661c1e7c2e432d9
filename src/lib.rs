//! gopkgviewer library: Go package import graph discovery and serving.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod server;
