//! Data types for the grid layout engine.

mod config;
mod element;
mod geometry;
mod grid;

pub use config::*;
pub use element::*;
pub use geometry::*;
pub use grid::*;
