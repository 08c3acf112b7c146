// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{read_rgba, DecodedImage};
pub use writer::write_png;
