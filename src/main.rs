//! Command line entry point writing `sourcelist.cmake` for a Dart SDK checkout.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use env_logger::{Env, Target};
use log::Level;

use vm_srclist::{EmptySourceList, SourceLayout, SourceListBuilder, SourceListConfig};

#[derive(Parser)]
#[command(name = "vm-srclist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect Dart VM C++ sources into a CMake source list", long_about = None)]
struct Cli {
    /// Dart SDK checkout or its runtime directory
    #[arg(default_value = ".")]
    base_dir: PathBuf,

    /// JSON file overriding the built-in directory, library and file lists
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (defaults to sourcelist.cmake inside BASE_DIR)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = run(&cli);
    if let Err(err) = &result {
        for (level, message) in failure_messages(err) {
            log::log!(level, "{message}");
        }
    }
    ExitCode::from(exit_status(&result))
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.base_dir.is_dir() {
        bail!("base directory {} does not exist", cli.base_dir.display());
    }

    let config = match &cli.config {
        Some(path) => SourceListConfig::load(path)?,
        None => SourceListConfig::discover(&cli.base_dir),
    };
    let layout = SourceLayout::resolve(&cli.base_dir, &config);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output_path(&cli.base_dir));

    SourceListBuilder::new(&layout, &config).build_and_write(&output)?;
    Ok(())
}

/// Every fatal error, the empty source list included, exits with status 1.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Lines logged for a fatal error, in order.
fn failure_messages(err: &anyhow::Error) -> Vec<(Level, String)> {
    if err.downcast_ref::<EmptySourceList>().is_some() {
        vec![
            (
                Level::Error,
                "No source files found! This will cause CMake to fail.".to_string(),
            ),
            (
                Level::Info,
                "Please check if the Dart SDK was properly downloaded and the directory structure is correct."
                    .to_string(),
            ),
        ]
    } else {
        vec![(Level::Error, format!("{err:#}"))]
    }
}

fn line_prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "Error: ",
        Level::Warn => "Warning: ",
        _ => "",
    }
}

/// Diagnostics go to stdout: warnings and errors carry a prefix, progress lines are bare.
fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| {
            writeln!(buf, "{}{}", line_prefix(record.level()), record.args())
        })
        .init();
}
