use crate::{
    IncompleteSelection,
    applicant::{Applicant, Gender, NumericField, Region, Smoker},
};

/// Transient state of one form session.
///
/// Numeric fields always hold an in-range value. Discrete selections start
/// unset and, once chosen, stay chosen until a different option is picked;
/// submitting never resets anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    first_name: String,
    last_name: String,
    gender: Option<Gender>,
    age: u16,
    height_cm: u16,
    weight_kg: u16,
    smoker: Option<Smoker>,
    children: u16,
    region: Option<Region>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            gender: None,
            age: NumericField::Age.initial(),
            height_cm: NumericField::Height.initial(),
            weight_kg: NumericField::Weight.initial(),
            smoker: None,
            children: NumericField::Children.initial(),
            region: None,
        }
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name_mut(&mut self) -> &mut String {
        &mut self.first_name
    }

    pub fn last_name_mut(&mut self) -> &mut String {
        &mut self.last_name
    }

    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    #[must_use]
    pub fn smoker(&self) -> Option<Smoker> {
        self.smoker
    }

    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn select_gender(&mut self, gender: Gender) {
        self.gender = Some(gender);
    }

    pub fn select_smoker(&mut self, smoker: Smoker) {
        self.smoker = Some(smoker);
    }

    pub fn select_region(&mut self, region: Region) {
        self.region = Some(region);
    }

    #[must_use]
    pub fn value(&self, field: NumericField) -> u16 {
        match field {
            NumericField::Age => self.age,
            NumericField::Height => self.height_cm,
            NumericField::Weight => self.weight_kg,
            NumericField::Children => self.children,
        }
    }

    /// Sets a numeric field, clamping to its range. Returns the stored value.
    pub fn set_value(&mut self, field: NumericField, value: u16) -> u16 {
        let value = field.clamp(value);
        let slot = match field {
            NumericField::Age => &mut self.age,
            NumericField::Height => &mut self.height_cm,
            NumericField::Weight => &mut self.weight_kg,
            NumericField::Children => &mut self.children,
        };
        *slot = value;
        value
    }

    /// Moves a numeric field by `delta`, saturating at the range bounds.
    pub fn step_value(&mut self, field: NumericField, delta: i32) -> u16 {
        let current = i32::from(self.value(field));
        let range = field.range();
        let next = (current + delta).clamp(i32::from(*range.start()), i32::from(*range.end()));
        // in range of u16 after the clamp above
        self.set_value(field, u16::try_from(next).unwrap_or(*range.end()))
    }

    /// Validates the session and returns the applicant it describes.
    ///
    /// Selections are checked in the order gender, smoker, region and the
    /// first missing one is reported.
    pub fn submit(&self) -> Result<Applicant, IncompleteSelection> {
        let gender = self.gender.ok_or(IncompleteSelection::Gender)?;
        let smoker = self.smoker.ok_or(IncompleteSelection::Smoker)?;
        let region = self.region.ok_or(IncompleteSelection::Region)?;
        Ok(Applicant {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender,
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            smoker,
            children: self.children,
            region,
        })
    }
}
