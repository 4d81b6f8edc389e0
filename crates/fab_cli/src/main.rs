//! kicad-fab entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use fab_cli::Args;
use fab_core::logging::init_tracing;
use fab_core::orchestrator::PipelineError;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

/// Resolve config, prepare the output folder, then run the pipeline.
///
/// The logging guard is dropped before returning, so the log file is
/// flushed on every exit path.
fn run(args: &Args) -> Result<(), PipelineError> {
    let config = fab_cli::load_config(args)?;
    let level = args.log_level.unwrap_or(config.settings().logging.level);

    if let Some(path) = &args.write_config {
        let _guard = init_tracing(level, None);
        return fab_cli::write_config(&config, path);
    }

    // The log file lives in the output folder, which prepare() re-creates.
    let plan = fab_cli::prepare(args, config)?;
    let log_file = plan.log_file();
    let _guard = init_tracing(level, log_file.as_deref());

    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Using kicad-cli at {}", plan.kicad_path());

    fab_cli::execute(plan).map(|_| ())
}

/// Print the error title (red on a terminal) and details.
fn report(err: &PipelineError) {
    let title = err.title();
    if std::io::stdout().is_terminal() {
        println!("\x1b[31m{}\x1b[0m", title);
    } else {
        println!("{}", title);
    }

    let details = err.details();
    if !details.is_empty() {
        println!("{}", details);
    }
}
