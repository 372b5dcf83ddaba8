use std::path::PathBuf;

use chargecast_engine::Applicant;
use chargecast_evaluator::feature::{self, DerivedFeatures, FeatureColumn, FeatureVector};
use serde::Serialize;

use crate::{command::applicant::ApplicantArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EncodeArg {
    #[clap(flatten)]
    applicant: ApplicantArg,
    /// Write the report to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EncodeReport<'a> {
    applicant: &'a Applicant,
    derived: DerivedFeatures,
    columns: [&'static str; FeatureColumn::COUNT],
    features: FeatureVector,
}

impl<'a> EncodeReport<'a> {
    fn new(applicant: &'a Applicant) -> Self {
        let derived = feature::derive(applicant);
        let features = FeatureVector::from_derived(applicant.age, &derived);
        Self {
            applicant,
            derived,
            columns: FeatureColumn::ALL.map(FeatureColumn::name),
            features,
        }
    }
}

pub(crate) fn run(arg: &EncodeArg) -> anyhow::Result<()> {
    let applicant = arg.applicant.to_applicant()?;
    let report = EncodeReport::new(&applicant);
    tracing::debug!(features = %report.features, "encoded applicant");
    util::write_json(&report, arg.output.as_deref())
}

#[cfg(test)]
mod tests {
    use chargecast_engine::{Gender, Region, Smoker};

    use super::*;

    #[test]
    fn test_report_json_shape() {
        let applicant = Applicant {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            gender: Gender::Female,
            age: 22,
            height_cm: 160,
            weight_kg: 45,
            smoker: Smoker::No,
            children: 0,
            region: Region::Northeast,
        };
        let json = serde_json::to_value(EncodeReport::new(&applicant)).unwrap();

        assert_eq!(json["applicant"]["smoker"], "no");
        assert_eq!(json["derived"]["age_category"], "young_adult");
        assert_eq!(json["derived"]["bmi_category"], "under_weight");
        assert_eq!(json["derived"]["children_str"], "0");
        assert_eq!(json["columns"][7], "children_str_0");
        assert_eq!(json["features"]["age_category_young_adult"], 1);
        assert_eq!(json["features"]["children_str_0"], 1);
        assert_eq!(json["features"]["bmi_category_over_weight"], 0);
    }
}
