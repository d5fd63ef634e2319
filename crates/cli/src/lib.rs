//! Public library modules for the gallery binary
pub mod http;
pub mod render;
