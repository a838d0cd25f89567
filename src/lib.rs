//! gridflow - grid layout engine for rectangular elements
//!
//! Detects, optimizes, and reflows collections of rectangular visual
//! elements (or native table cells) into a logical grid:
//! - Adaptive row/column clustering from raw positions
//! - Text-driven cell dimension estimation
//! - Proportional dimension reconciliation under min-size constraints
//! - Positional reflow from finalized widths/heights/spacing
//! - Identity-preserving decorative row separators
//! - Overlay-to-cell mapping by center-point containment
//!
//! The engine is single-threaded and synchronous, holds no persistent
//! state, and talks to the host document only through the
//! [`host::Container`] trait. Every operation rederives the grid from
//! live element geometry.
//!
//! # Usage
//!
//! ```no_run
//! use gridflow::{ops, host::NoMeasurer, OptimizationTarget, SeparatorStyle};
//! # fn demo<C: gridflow::host::Container>(container: &mut C) -> gridflow::Result<()> {
//! let selection = container.elements()?;
//! let outcome = ops::optimize_layout(
//!     container,
//!     &selection,
//!     &OptimizationTarget::default(),
//!     &SeparatorStyle::default(),
//!     &NoMeasurer,
//! )?;
//! assert!(outcome.is_complete());
//! # Ok(())
//! # }
//! ```

pub mod allocate;
pub mod detect;
pub mod error;
pub mod estimate;
pub mod host;
pub mod mutate;
pub mod ops;
pub mod overlay;
pub mod paste;
pub mod reflow;
pub mod separator;
pub mod types;

pub use error::{GridError, Result};
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
