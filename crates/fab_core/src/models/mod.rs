//! Data models for kicad-fab.
//!
//! This module contains the core data structures shared by the pipeline:
//! - Rotation override records and their lookup table
//! - Pick-and-place rows
//! - Project file locations

mod fixup;
mod placement;
mod project;

// Re-export all public types
pub use fixup::{FixupRecord, FixupTable};
pub use placement::{PlacementRow, POSITION_HEADER};
pub use project::ProjectPaths;
