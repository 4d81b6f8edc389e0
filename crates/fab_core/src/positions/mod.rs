//! Pick-and-place generation and rotation reconciliation.
//!
//! The raw placement export from kicad-cli is the join point with the
//! rotation fixup table: each row's rotation is replaced when the table
//! holds a non-empty override for its reference, and the result is
//! rewritten in the column layout assemblers expect.
//!
//! ```text
//! raw:    R1,10k,0805,12.5,8.2,0,top        fixups: R1 -> 90
//! final:  "R1","10k","0805",12.5,8.2,90,top
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};

use crate::io::ScratchFile;
use crate::models::{FixupTable, PlacementRow, POSITION_HEADER};
use crate::orchestrator::{Context, PositionsOutput, StepError, StepResult};

/// Scratch file name for the raw placement export.
pub const RAW_POSITIONS_SCRATCH_FILE: &str = "pre-fixup-pos.pos";

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Rows written.
    pub rows: usize,
    /// Rows whose rotation came from the fixup table.
    pub rotations_overridden: usize,
}

/// Export placements, apply fixups and write `<output>/<project>.pos`.
///
/// The fixup table is an explicit input: it must have been loaded by an
/// earlier step. The raw export is deleted on every exit path.
pub fn generate_positions(ctx: &Context, fixups: &FixupTable) -> StepResult<PositionsOutput> {
    let scratch = ScratchFile::new(&ctx.output_dir, RAW_POSITIONS_SCRATCH_FILE)
        .map_err(|e| StepError::io_error("claiming scratch file", e))?;

    ctx.run_command(&ctx.kicad.export_positions(
        &ctx.settings.positions,
        scratch.path(),
        ctx.pcb(),
    ))?;

    let raw = File::open(scratch.path()).map_err(|e| {
        StepError::io_error(format!("opening {}", scratch.path().display()), e)
    })?;

    let output_path = ctx.positions_path();
    let out = File::create(&output_path).map_err(|e| {
        StepError::io_error(format!("creating {}", output_path.display()), e)
    })?;

    let stats = reconcile_positions(raw, fixups, BufWriter::new(out))?;
    tracing::info!(
        "Wrote {} placement row(s), {} rotation(s) overridden",
        stats.rows,
        stats.rotations_overridden
    );

    Ok(PositionsOutput {
        path: output_path,
        rows: stats.rows,
        rotations_overridden: stats.rotations_overridden,
    })
}

/// Rewrite a raw placement export with fixups applied.
///
/// The first row of `raw` is the exporter's header and is discarded; the
/// fixed position-file header is written in its place.
pub fn reconcile_positions<R: Read, W: Write>(
    raw: R,
    fixups: &FixupTable,
    mut out: W,
) -> StepResult<ReconcileStats> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);

    let write_err = |e: std::io::Error| StepError::io_error("writing position file", e);

    writeln!(out, "{}", POSITION_HEADER.join(",")).map_err(write_err)?;

    let mut stats = ReconcileStats::default();
    for (index, result) in reader.records().enumerate().skip(1) {
        let record = result
            .map_err(|e| StepError::parse_error("placement export", e.to_string()))?;

        let mut row = PlacementRow::from_fields(record.iter()).ok_or_else(|| {
            StepError::parse_error(
                "placement export",
                format!(
                    "line {} has {} field(s), expected {}",
                    index + 1,
                    record.len(),
                    PlacementRow::COLUMNS
                ),
            )
        })?;

        if row.apply_rotation(fixups.rotation_for(&row.reference_id)) {
            tracing::debug!("{}: rotation -> {}", row.reference_id, row.rotation);
            stats.rotations_overridden += 1;
        }

        writeln!(out, "{}", row.to_line()).map_err(write_err)?;
        stats.rows += 1;
    }

    out.flush().map_err(write_err)?;
    Ok(stats)
}
