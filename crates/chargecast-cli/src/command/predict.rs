use std::path::PathBuf;

use crate::{
    backend::{ModelArtifact, PredictionBackend},
    command::{DEFAULT_MODEL_PATH, applicant::ApplicantArg},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    #[clap(flatten)]
    pub(crate) applicant: ApplicantArg,
    /// Path to the charge model file (JSON format)
    #[clap(long = "model", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let PredictArg {
        applicant,
        model_path,
    } = arg;

    let applicant = applicant.to_applicant()?;
    let prediction = ModelArtifact::new(model_path).predict(&applicant)?;

    println!("{}", prediction.greeting());
    println!("{}", prediction.summary());
    Ok(())
}
