use chargecast_engine::Applicant;

use crate::{
    feature::{self, FeatureVector},
    regressor::ChargeRegressor,
};

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PredictionError {
    #[display("model produced a non-finite prediction ({value})")]
    NonFinite { value: f64 },
}

/// A scored applicant, ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargePrediction {
    pub first_name: String,
    pub last_name: String,
    pub features: FeatureVector,
    pub charges: f64,
}

impl ChargePrediction {
    #[must_use]
    pub fn greeting(&self) -> String {
        format!(
            "Hello {} {}, here is the prediction:",
            self.first_name, self.last_name
        )
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!("Predicted Insurance Charges: {}", format_currency(self.charges))
    }
}

/// Encodes `applicant` and scores it with `regressor`.
pub fn predict_charges<R>(
    regressor: &R,
    applicant: &Applicant,
) -> Result<ChargePrediction, PredictionError>
where
    R: ChargeRegressor + ?Sized,
{
    let features = feature::encode(applicant);
    tracing::debug!(%features, "encoded applicant");

    let charges = regressor.predict(&features);
    if !charges.is_finite() {
        return Err(PredictionError::NonFinite { value: charges });
    }
    tracing::debug!(charges, "scored applicant");

    Ok(ChargePrediction {
        first_name: applicant.first_name.clone(),
        last_name: applicant.last_name.clone(),
        features,
        charges,
    })
}

/// Formats an amount as dollars with thousands separators and cents, e.g. `$12,345.68`.
///
/// Negative amounts keep their sign after the dollar symbol (`$-12.50`).
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = amount.is_sign_negative() && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    format!("${sign}{grouped}.{fraction}")
}
