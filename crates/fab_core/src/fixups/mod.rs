//! Rotation fixup table loading.
//!
//! KiCad's placement export does not carry manual rotation corrections, but
//! its BOM export can carry any symbol field. The loader exports just the
//! reference and rotation-override columns to a scratch file, parses it into
//! a [`FixupTable`], and removes the scratch file on every exit path.
//!
//! # Export format
//!
//! ```text
//! "Reference","PosRotAdjust"
//! "R1","90"
//! "C2",""
//! ```
//!
//! Columns are located by header name. A blank override cell means the
//! component has no override.

use std::io::Read;
use std::path::Path;

use crate::io::ScratchFile;
use crate::models::{FixupRecord, FixupTable};
use crate::orchestrator::{Context, StepError, StepResult};

/// Scratch file name for the rotation-override export.
pub const FIXUPS_SCRATCH_FILE: &str = "pos-fixups.csv";

/// Header of the reference column in the BOM export.
pub const REFERENCE_COLUMN: &str = "Reference";

/// Export and parse the rotation-override table.
///
/// The scratch file is deleted before returning, whether the export, the
/// read or the parse failed. Errors propagate after cleanup.
pub fn load_fixups(ctx: &Context) -> StepResult<FixupTable> {
    let scratch = ScratchFile::new(&ctx.output_dir, FIXUPS_SCRATCH_FILE)
        .map_err(|e| StepError::io_error("claiming scratch file", e))?;
    let rotation_field = &ctx.settings.positions.rotation_field;

    ctx.run_command(&ctx.kicad.export_rotation_fixups(
        &ctx.settings.positions,
        scratch.path(),
        ctx.schema(),
    ))?;

    let table = read_fixups(scratch.path(), rotation_field)?;
    tracing::info!(
        "Loaded {} fixup row(s), {} with a rotation override",
        table.len(),
        table.override_count()
    );

    Ok(table)
}

/// Parse a rotation-override export file.
pub fn read_fixups(path: &Path, rotation_field: &str) -> StepResult<FixupTable> {
    let file = std::fs::File::open(path)
        .map_err(|e| StepError::io_error(format!("opening {}", path.display()), e))?;
    parse_fixups(file, rotation_field)
}

/// Parse a rotation-override export from any reader.
///
/// The first row is the header. `Reference` must be present; when the
/// rotation column is missing every record has no override.
pub fn parse_fixups<R: Read>(reader: R, rotation_field: &str) -> StepResult<FixupTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| StepError::parse_error("fixup export header", e.to_string()))?
        .clone();

    let reference_idx = column_index(&headers, REFERENCE_COLUMN).ok_or_else(|| {
        StepError::parse_error(
            "fixup export header",
            format!("no '{}' column", REFERENCE_COLUMN),
        )
    })?;
    let rotation_idx = column_index(&headers, rotation_field);
    if rotation_idx.is_none() {
        tracing::warn!(
            "Fixup export has no '{}' column; no rotations will be overridden",
            rotation_field
        );
    }

    let mut table = FixupTable::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| StepError::parse_error("fixup export row", e.to_string()))?;

        let Some(reference) = record.get(reference_idx).filter(|r| !r.is_empty()) else {
            continue;
        };
        let rotation = rotation_idx.and_then(|idx| record.get(idx));

        table.insert(FixupRecord::new(reference, rotation));
    }

    Ok(table)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
