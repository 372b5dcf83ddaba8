use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::logging::{self, LogTarget};

use self::{encode::EncodeArg, form::FormArg, predict::PredictArg};

mod applicant;
mod encode;
mod form;
mod predict;

/// Default location of the charge model artifact.
pub(crate) const DEFAULT_MODEL_PATH: &str = "models/charges.json";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log output to this file (the interactive form logs nowhere otherwise)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Log level; `RUST_LOG` takes precedence when set
    #[clap(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fill in the interactive prediction form
    Form(#[clap(flatten)] FormArg),
    /// Predict charges for one applicant given on the command line
    Predict(#[clap(flatten)] PredictArg),
    /// Print derived features and the model input row as JSON
    Encode(#[clap(flatten)] EncodeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Form(FormArg::default()));

    let log_target = match (&args.log_file, &mode) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, Mode::Form(_)) => LogTarget::Disabled,
        (None, _) => LogTarget::Stderr,
    };
    logging::init(&log_target, args.log_level)?;

    match mode {
        Mode::Form(arg) => form::run(&arg)?,
        Mode::Predict(arg) => predict::run(&arg)?,
        Mode::Encode(arg) => encode::run(&arg)?,
    }
    Ok(())
}
