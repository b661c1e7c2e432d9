//! Go toolchain adapters
//!
//! Package resolution shells out to `go list`; module identity comes from `go.mod`.

pub mod list;
pub mod modfile;

pub use list::GoListResolver;
pub use modfile::GoModFile;
