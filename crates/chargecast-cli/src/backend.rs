use std::{fmt, path::PathBuf};

use anyhow::Context;
use chargecast_engine::Applicant;
use chargecast_evaluator::prediction::{self, ChargePrediction};

use crate::schema::charge_model::ChargeModel;

/// Produces a charge prediction for a validated applicant.
pub(crate) trait PredictionBackend: fmt::Debug {
    fn predict(&self, applicant: &Applicant) -> anyhow::Result<ChargePrediction>;
}

/// Model artifact on disk.
///
/// The file is read and validated on every request, so each prediction sees the
/// artifact as it currently is.
#[derive(Debug, Clone)]
pub(crate) struct ModelArtifact {
    path: PathBuf,
}

impl ModelArtifact {
    pub(crate) fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }
}

impl PredictionBackend for ModelArtifact {
    fn predict(&self, applicant: &Applicant) -> anyhow::Result<ChargePrediction> {
        let model = ChargeModel::open(&self.path)?;
        let regressor = model.to_regressor().with_context(|| {
            format!("Invalid charge model file: {}", self.path.display())
        })?;
        let prediction = prediction::predict_charges(regressor.as_ref(), applicant)
            .with_context(|| format!("Failed to score applicant with model '{}'", model.name))?;
        tracing::info!(charges = prediction.charges, "prediction complete");
        Ok(prediction)
    }
}
