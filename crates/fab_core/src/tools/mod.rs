//! External tool integration.
//!
//! This module knows how to talk to the tools the pipeline drives:
//!
//! - **kicad**: argument vectors for `kicad-cli` exports
//! - **probe**: locating the `kicad-cli` executable
//! - **archive**: fabrication file discovery and the `zip` command line

mod archive;
mod kicad;
mod probe;

pub use archive::{find_fab_files, zip_args, FabFileKind};
pub use kicad::{KicadCli, KICAD_CLI};
pub use probe::{probe_kicad_path, resolve_kicad_path};
