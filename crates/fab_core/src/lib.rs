//! kicad-fab core - backend logic for generating PCB fabrication outputs
//!
//! This crate drives `kicad-cli` through a fixed pipeline of steps and
//! post-processes its exports. It has zero presentation dependencies and
//! can be used by the bundled CLI or any other front end.

pub mod config;
pub mod fixups;
pub mod io;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod positions;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
