use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

/// A single-choice option set presented as a row of buttons.
pub trait Choice: fmt::Debug + fmt::Display + Copy + Eq + 'static {
    /// Field label shown next to the options.
    const LABEL: &'static str;
    /// All options, in display order.
    const ALL: &'static [Self];
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[display("Male")]
    Male,
    #[display("Female")]
    Female,
}

impl Choice for Gender {
    const LABEL: &'static str = "Gender";
    const ALL: &'static [Self] = &[Self::Male, Self::Female];
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Smoker {
    #[display("Yes")]
    Yes,
    #[display("No")]
    No,
}

impl Choice for Smoker {
    const LABEL: &'static str = "Smoker";
    const ALL: &'static [Self] = &[Self::Yes, Self::No];
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[display("Northeast")]
    Northeast,
    #[display("Northwest")]
    Northwest,
    #[display("Southeast")]
    Southeast,
    #[display("Southwest")]
    Southwest,
}

impl Choice for Region {
    const LABEL: &'static str = "Region";
    const ALL: &'static [Self] = &[
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
    ];
}

/// Bounded integer inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    Height,
    Weight,
    Children,
}

impl NumericField {
    pub const ALL: [Self; 4] = [Self::Age, Self::Height, Self::Weight, Self::Children];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Height => "Height (cm)",
            Self::Weight => "Weight (kg)",
            Self::Children => "Number of Children",
        }
    }

    /// Accepted values, inclusive on both ends.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<u16> {
        match self {
            Self::Age => 0..=120,
            Self::Height => 50..=250,
            Self::Weight => 10..=300,
            Self::Children => 0..=20,
        }
    }

    /// Initial value of a fresh form (the lower bound).
    #[must_use]
    pub const fn initial(self) -> u16 {
        *self.range().start()
    }

    /// Clamps `value` into [`Self::range()`].
    #[must_use]
    pub fn clamp(self, value: u16) -> u16 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

/// A fully specified applicant, ready to be encoded.
///
/// Gender, region and the name pair are carried for display only; the charge
/// model never sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: u16,
    pub height_cm: u16,
    pub weight_kg: u16,
    pub smoker: Smoker,
    pub children: u16,
    pub region: Region,
}

impl Applicant {
    /// Full name as entered, separated by a single space.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
