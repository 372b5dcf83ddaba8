//! Feature derivation and encoding.
//!
//! # Derived Features
//!
//! [`derive()`] computes every intermediate value from an applicant:
//!
//! - **BMI** - `weight_kg / (height_cm / 100)²`
//! - **Smoker** - `1` for [`Smoker::Yes`], `0` otherwise
//! - **Age bucket** ([`AgeCategory`]) - half-open intervals, see [`AgeCategory::from_age()`]
//! - **BMI bucket** ([`BmiCategory`]) - WHO-style thresholds, see [`BmiCategory::from_bmi()`]
//! - **Children bucket** - the decimal string of the children count
//!
//! # Encoding
//!
//! [`encode()`] keeps only the columns listed in [`FeatureColumn::ALL`], in that order.
//! Indicators of buckets outside that list (mid/late adulthood, under/normal weight,
//! any non-zero children count) are dropped, so such applicants encode as all-zero in
//! the corresponding indicator group.
//!
//! Ages of 18 and below fall into [`AgeCategory::LateAdulthood`] and therefore also
//! produce all-zero age indicators. The bundled models were fitted with this mapping.

use std::fmt;

use chargecast_engine::{Applicant, Smoker};
use serde::Serialize;

use crate::regressor::ModelLoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    YoungAdult,
    EarlyAdulthood,
    MidAdulthood,
    LateAdulthood,
}

impl AgeCategory {
    /// Buckets an age: `(18, 26)`, `[26, 36)`, `[36, 46)`, everything else.
    #[must_use]
    pub fn from_age(age: u16) -> Self {
        match age {
            19..26 => Self::YoungAdult,
            26..36 => Self::EarlyAdulthood,
            36..46 => Self::MidAdulthood,
            _ => Self::LateAdulthood,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YoungAdult => "young_adult",
            Self::EarlyAdulthood => "early_adulthood",
            Self::MidAdulthood => "mid_adulthood",
            Self::LateAdulthood => "late_adulthood",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    UnderWeight,
    NormalWeight,
    OverWeight,
    Obese,
}

impl BmiCategory {
    /// Buckets a BMI: `< 18.5`, `[18.5, 25)`, `[25, 30)`, `>= 30`.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::UnderWeight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::OverWeight
        } else {
            Self::Obese
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderWeight => "under_weight",
            Self::NormalWeight => "normal_weight",
            Self::OverWeight => "over_weight",
            Self::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body-mass index from integer centimetres and kilograms.
#[must_use]
pub fn bmi(height_cm: u16, weight_kg: u16) -> f64 {
    let height_m = f64::from(height_cm) / 100.0;
    f64::from(weight_kg) / (height_m * height_m)
}

/// Every value derived from an applicant before column selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedFeatures {
    pub bmi: f64,
    pub smoker: u8,
    pub age_category: AgeCategory,
    pub bmi_category: BmiCategory,
    pub children_str: String,
}

#[must_use]
pub fn derive(applicant: &Applicant) -> DerivedFeatures {
    let bmi = bmi(applicant.height_cm, applicant.weight_kg);
    DerivedFeatures {
        bmi,
        smoker: u8::from(applicant.smoker == Smoker::Yes),
        age_category: AgeCategory::from_age(applicant.age),
        bmi_category: BmiCategory::from_bmi(bmi),
        children_str: applicant.children.to_string(),
    }
}

/// Encodes an applicant into the model's input row.
#[must_use]
pub fn encode(applicant: &Applicant) -> FeatureVector {
    FeatureVector::from_derived(applicant.age, &derive(applicant))
}

/// Columns of the model input, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureColumn {
    Smoker,
    Age,
    Bmi,
    AgeCategoryYoungAdult,
    AgeCategoryEarlyAdulthood,
    BmiCategoryOverWeight,
    BmiCategoryObese,
    ChildrenStr0,
}

impl FeatureColumn {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Smoker,
        Self::Age,
        Self::Bmi,
        Self::AgeCategoryYoungAdult,
        Self::AgeCategoryEarlyAdulthood,
        Self::BmiCategoryOverWeight,
        Self::BmiCategoryObese,
        Self::ChildrenStr0,
    ];

    /// Column name as it appears in model artifacts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smoker => "smoker",
            Self::Age => "age",
            Self::Bmi => "bmi",
            Self::AgeCategoryYoungAdult => "age_category_young_adult",
            Self::AgeCategoryEarlyAdulthood => "age_category_early_adulthood",
            Self::BmiCategoryOverWeight => "bmi_category_over_weight",
            Self::BmiCategoryObese => "bmi_category_obese",
            Self::ChildrenStr0 => "children_str_0",
        }
    }

    /// Position of this column in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Result<Self, ModelLoadError> {
        Self::ALL
            .into_iter()
            .find(|column| column.name() == name)
            .ok_or_else(|| ModelLoadError::UnknownColumn {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model input row.
///
/// Field order (and the serialized key order) follows [`FeatureColumn::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub smoker: u8,
    pub age: u16,
    pub bmi: f64,
    pub age_category_young_adult: u8,
    pub age_category_early_adulthood: u8,
    pub bmi_category_over_weight: u8,
    pub bmi_category_obese: u8,
    pub children_str_0: u8,
}

impl FeatureVector {
    #[must_use]
    pub fn from_derived(age: u16, derived: &DerivedFeatures) -> Self {
        Self {
            smoker: derived.smoker,
            age,
            bmi: derived.bmi,
            age_category_young_adult: u8::from(derived.age_category == AgeCategory::YoungAdult),
            age_category_early_adulthood: u8::from(
                derived.age_category == AgeCategory::EarlyAdulthood,
            ),
            bmi_category_over_weight: u8::from(derived.bmi_category == BmiCategory::OverWeight),
            bmi_category_obese: u8::from(derived.bmi_category == BmiCategory::Obese),
            children_str_0: u8::from(derived.children_str == "0"),
        }
    }

    #[must_use]
    pub fn get(&self, column: FeatureColumn) -> f64 {
        match column {
            FeatureColumn::Smoker => f64::from(self.smoker),
            FeatureColumn::Age => f64::from(self.age),
            FeatureColumn::Bmi => self.bmi,
            FeatureColumn::AgeCategoryYoungAdult => f64::from(self.age_category_young_adult),
            FeatureColumn::AgeCategoryEarlyAdulthood => {
                f64::from(self.age_category_early_adulthood)
            }
            FeatureColumn::BmiCategoryOverWeight => f64::from(self.bmi_category_over_weight),
            FeatureColumn::BmiCategoryObese => f64::from(self.bmi_category_obese),
            FeatureColumn::ChildrenStr0 => f64::from(self.children_str_0),
        }
    }

    /// Values in column order.
    #[must_use]
    pub fn values(&self) -> [f64; FeatureColumn::COUNT] {
        FeatureColumn::ALL.map(|column| self.get(column))
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in FeatureColumn::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}={}", self.get(column))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chargecast_engine::{Gender, Region};

    use super::*;

    fn applicant(
        age: u16,
        height_cm: u16,
        weight_kg: u16,
        smoker: Smoker,
        children: u16,
    ) -> Applicant {
        Applicant {
            first_name: "Test".into(),
            last_name: "User".into(),
            gender: Gender::Male,
            age,
            height_cm,
            weight_kg,
            smoker,
            children,
            region: Region::Northeast,
        }
    }

    #[test]
    fn test_age_category_boundaries() {
        assert_eq!(AgeCategory::from_age(18), AgeCategory::LateAdulthood);
        assert_eq!(AgeCategory::from_age(19), AgeCategory::YoungAdult);
        assert_eq!(AgeCategory::from_age(25), AgeCategory::YoungAdult);
        assert_eq!(AgeCategory::from_age(26), AgeCategory::EarlyAdulthood);
        assert_eq!(AgeCategory::from_age(35), AgeCategory::EarlyAdulthood);
        assert_eq!(AgeCategory::from_age(36), AgeCategory::MidAdulthood);
        assert_eq!(AgeCategory::from_age(45), AgeCategory::MidAdulthood);
        assert_eq!(AgeCategory::from_age(46), AgeCategory::LateAdulthood);
        assert_eq!(AgeCategory::from_age(0), AgeCategory::LateAdulthood);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::UnderWeight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::OverWeight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::OverWeight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_reference_applicant() {
        let vector = encode(&applicant(30, 170, 80, Smoker::Yes, 2));
        assert!((vector.bmi - 27.68).abs() < 0.005, "bmi = {}", vector.bmi);
        assert_eq!(
            vector,
            FeatureVector {
                smoker: 1,
                age: 30,
                bmi: vector.bmi,
                age_category_young_adult: 0,
                age_category_early_adulthood: 1,
                bmi_category_over_weight: 1,
                bmi_category_obese: 0,
                children_str_0: 0,
            }
        );
    }

    #[test]
    fn test_derive_reports_dropped_buckets() {
        let derived = derive(&applicant(40, 180, 55, Smoker::No, 3));
        assert_eq!(derived.age_category, AgeCategory::MidAdulthood);
        assert_eq!(derived.bmi_category, BmiCategory::UnderWeight);
        assert_eq!(derived.children_str, "3");
        assert_eq!(derived.smoker, 0);

        let vector = FeatureVector::from_derived(40, &derived);
        assert_eq!(vector.values()[3..], [0.0; 5]);
    }

    #[test]
    fn test_children_zero_indicator() {
        assert_eq!(encode(&applicant(30, 170, 80, Smoker::No, 0)).children_str_0, 1);
        assert_eq!(encode(&applicant(30, 170, 80, Smoker::No, 10)).children_str_0, 0);
    }

    #[test]
    fn test_column_order_and_names() {
        let names = FeatureColumn::ALL.map(FeatureColumn::name);
        assert_eq!(
            names,
            [
                "smoker",
                "age",
                "bmi",
                "age_category_young_adult",
                "age_category_early_adulthood",
                "bmi_category_over_weight",
                "bmi_category_obese",
                "children_str_0",
            ]
        );
        for (i, column) in FeatureColumn::ALL.into_iter().enumerate() {
            assert_eq!(column.index(), i);
            assert_eq!(FeatureColumn::from_name(column.name()).unwrap(), column);
        }
        assert!(FeatureColumn::from_name("region_northeast").is_err());
    }

    #[test]
    fn test_serialized_key_order_matches_columns() {
        let vector = encode(&applicant(22, 160, 90, Smoker::Yes, 0));
        let json = serde_json::to_value(&vector).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        let mut sorted_columns = FeatureColumn::ALL.map(|c| c.name().to_owned()).to_vec();
        // serde_json's default map is sorted by key
        sorted_columns.sort();
        assert_eq!(keys, sorted_columns);

        let rendered = serde_json::to_string(&vector).unwrap();
        let mut last = 0;
        for column in FeatureColumn::ALL {
            let pos = rendered.find(&format!("\"{}\"", column.name())).unwrap();
            assert!(pos >= last, "{column} out of order in {rendered}");
            last = pos;
        }
    }

    #[test]
    fn test_display_lists_columns_in_order() {
        let vector = encode(&applicant(30, 200, 100, Smoker::No, 0));
        assert_eq!(
            vector.to_string(),
            "smoker=0, age=30, bmi=25, age_category_young_adult=0, \
             age_category_early_adulthood=1, bmi_category_over_weight=1, \
             bmi_category_obese=0, children_str_0=1"
        );
    }
}
