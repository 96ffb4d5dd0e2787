pub mod config;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod field_generator;
pub mod group_finder;
pub mod pipeline;
pub mod png_renderer;
pub mod server;
pub mod svg_renderer;
