//! Feature encoding and charge prediction for insurance applicants.
//!
//! This crate turns a validated [`Applicant`](chargecast_engine::Applicant) into a
//! model score in three steps:
//!
//! 1. **Feature Derivation** ([`feature::derive()`]) - Computes BMI and assigns the age,
//!    BMI and children buckets.
//! 2. **Feature Encoding** ([`feature::encode()`]) - Projects the derived features onto
//!    the fixed 8-column [`FeatureVector`](feature::FeatureVector) the model was trained on.
//! 3. **Regression** ([`regressor`]) - Scores the vector with a [`ChargeRegressor`]
//!    and wraps the result in a [`ChargePrediction`](prediction::ChargePrediction).
//!
//! # Architecture
//!
//! ```text
//! Applicant
//!     ↓ derive
//! DerivedFeatures (bmi, smoker, age/bmi/children buckets)
//!     ↓ encode
//! FeatureVector (8 columns, fixed order)
//!     ↓ predict
//! ChargePrediction
//! ```
//!
//! # Fixed Column Contract
//!
//! Only a subset of the one-hot bucket indicators survives encoding: two of the four
//! age buckets, two of the four BMI buckets and only the "no children" indicator.
//! This matches the schema the bundled regressors were fitted against and must not be
//! extended without refitting them. See [`feature::FeatureColumn`].
//!
//! # Example
//!
//! ```rust
//! use chargecast_engine::{FormSession, Gender, NumericField, Region, Smoker};
//! use chargecast_evaluator::{
//!     feature::FeatureColumn,
//!     prediction::predict_charges,
//!     regressor::LinearRegressor,
//! };
//!
//! let mut session = FormSession::new();
//! session.select_gender(Gender::Female);
//! session.select_smoker(Smoker::No);
//! session.select_region(Region::Southwest);
//! session.set_value(NumericField::Age, 30);
//! session.set_value(NumericField::Height, 170);
//! session.set_value(NumericField::Weight, 80);
//! let applicant = session.submit().unwrap();
//!
//! let regressor = LinearRegressor::new(1000.0, [0.0; FeatureColumn::COUNT]);
//! let prediction = predict_charges(&regressor, &applicant).unwrap();
//! assert_eq!(prediction.summary(), "Predicted Insurance Charges: $1,000.00");
//! ```

pub use self::regressor::ChargeRegressor;

pub mod feature;
pub mod prediction;
pub mod regressor;
