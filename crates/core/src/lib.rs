//! Core library: photo scanning, date grouping, and the gallery view model.

pub mod config;
pub mod gallery;
pub mod indexer;
pub mod models;
pub mod scanner;
