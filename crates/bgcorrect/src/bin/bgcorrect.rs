use std::path::PathBuf;
use std::process::ExitCode;

use bgcorrect::imageio::run_replay_file;
use bgcorrect::SessionState;
use clap::Parser;
use log::LevelFilter;

/// Replay recorded sample clicks on an image and write the flattened result.
#[derive(Debug, Parser)]
#[command(name = "bgcorrect", version, about)]
struct Cli {
    /// JSON replay config (image path, grid parameters, clicks, output paths).
    config: PathBuf,

    /// Log level for status output.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Emit JSON-formatted tracing events instead of plain status lines.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_log: bool,
}

fn init_logging(cli: &Cli) -> Result<(), log::SetLoggerError> {
    #[cfg(feature = "tracing")]
    {
        let bridged = tracing_log::LogTracer::init_with_filter(cli.log_level);
        bgcorrect::core::init_tracing(cli.json_log);
        bridged
    }
    #[cfg(not(feature = "tracing"))]
    {
        bgcorrect::core::init_with_level(cli.log_level)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli) {
        eprintln!("logger already installed: {err}");
    }

    match run_replay_file(&cli.config) {
        Ok(out) => {
            let report = &out.report;
            println!(
                "{} samples, {} rejected, {} sectors missing",
                report.samples.len(),
                report.rejected.len(),
                report.missing.len()
            );
            if report.state == SessionState::Ready {
                println!("background corrected");
                ExitCode::SUCCESS
            } else {
                println!("sample grid incomplete");
                ExitCode::from(2)
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
