use chargecast_engine::{Applicant, FormSession, Gender, NumericField, Region, Smoker};
use clap::builder::RangedI64ValueParser;

/// Applicant attributes given as flags.
///
/// Mirrors the interactive form: numeric values default to the lower bound of
/// their range and the discrete selections are optional, so that a missing one
/// is reported the same way the form reports it.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ApplicantArg {
    /// First name (display only)
    #[clap(long, default_value = "")]
    first_name: String,
    /// Last name (display only)
    #[clap(long, default_value = "")]
    last_name: String,
    /// Gender: Male or Female (display only)
    #[clap(long)]
    gender: Option<Gender>,
    /// Age in years
    #[clap(
        long,
        default_value_t = NumericField::Age.initial(),
        value_parser = numeric_parser(NumericField::Age),
    )]
    age: u16,
    /// Height in centimetres
    #[clap(
        long,
        default_value_t = NumericField::Height.initial(),
        value_parser = numeric_parser(NumericField::Height),
    )]
    height: u16,
    /// Weight in kilograms
    #[clap(
        long,
        default_value_t = NumericField::Weight.initial(),
        value_parser = numeric_parser(NumericField::Weight),
    )]
    weight: u16,
    /// Smoker: Yes or No
    #[clap(long)]
    smoker: Option<Smoker>,
    /// Number of children
    #[clap(
        long,
        default_value_t = NumericField::Children.initial(),
        value_parser = numeric_parser(NumericField::Children),
    )]
    children: u16,
    /// Region: Northeast, Northwest, Southeast or Southwest (display only)
    #[clap(long)]
    region: Option<Region>,
}

/// Parses a `u16` flag restricted to the collector's range for `field`.
fn numeric_parser(field: NumericField) -> RangedI64ValueParser<u16> {
    let range = field.range();
    clap::value_parser!(u16).range(i64::from(*range.start())..=i64::from(*range.end()))
}

impl ApplicantArg {
    /// Fills a fresh form session from the flags.
    pub(crate) fn to_session(&self) -> FormSession {
        let mut session = FormSession::new();
        session.first_name_mut().clone_from(&self.first_name);
        session.last_name_mut().clone_from(&self.last_name);
        for (field, value) in [
            (NumericField::Age, self.age),
            (NumericField::Height, self.height),
            (NumericField::Weight, self.weight),
            (NumericField::Children, self.children),
        ] {
            session.set_value(field, value);
        }
        if let Some(gender) = self.gender {
            session.select_gender(gender);
        }
        if let Some(smoker) = self.smoker {
            session.select_smoker(smoker);
        }
        if let Some(region) = self.region {
            session.select_region(region);
        }
        session
    }

    /// Validates the flags the way the form's submit button does.
    pub(crate) fn to_applicant(&self) -> anyhow::Result<Applicant> {
        self.to_session().submit().map_err(|err| {
            tracing::warn!(%err, "incomplete applicant");
            anyhow::Error::new(err)
        })
    }
}
