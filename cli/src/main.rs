//! zpack
//!
//! Packs `<name>` into `<name>.z` and back, through the stream adapter.
//! Exit status: 0 on success, 1 on usage errors, 2 when the job fails.

mod commands;
mod plan;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zstream_core::compression::CompressionCodec;
use zstream_core::config::Settings;

use crate::plan::Plan;

const USAGE_FAILURE: u8 = 1;
const JOB_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "zpack", version, about = "Pack files into .z streams and back")]
struct Cli {
    /// [pack|unpack] <file> [<target>]
    #[arg(value_name = "ARGS", required = true)]
    args: Vec<String>,

    /// Compression level, 0 (store) to 9 (best)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: Option<u32>,

    /// Codec: deflate (alias zlib) or none (alias store)
    #[arg(short, long, default_value = "deflate")]
    codec: CompressionCodec,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print stream counters as JSON on stderr
    #[arg(long)]
    stats: bool,

    /// More logging: -v debug, -vv trace (RUST_LOG applies otherwise)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Settings::from_json(&text).with_context(|| format!("bad settings in {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(level) = cli.level {
        settings.codec.level = level;
    }
    Ok(settings)
}

fn run(cli: &Cli, plan: &Plan) -> Result<()> {
    let settings = load_settings(cli)?;
    info!(
        mode = %plan.mode,
        input = %plan.input.display(),
        output = %plan.output.display(),
        codec = %cli.codec,
        level = settings.codec.level,
        "starting"
    );
    let counters = commands::execute(plan, cli.codec, &settings)?;
    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(&counters)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(USAGE_FAILURE) } else { ExitCode::SUCCESS };
        }
    };
    init_tracing(cli.verbose);

    let plan = match plan::plan(&cli.args) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("zpack: {e}");
            return ExitCode::from(USAGE_FAILURE);
        }
    };

    match run(&cli, &plan) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zpack: {e:#}");
            ExitCode::from(JOB_FAILURE)
        }
    }
}
