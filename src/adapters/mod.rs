pub mod browser;
pub mod go;
