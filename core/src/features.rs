//! Column order contract between the form and the trained classifier.

use crate::errors::EncodeError;
use crate::ml::encoder::EncoderSet;
use crate::types::{Category, EmployeeProfile, Field, FieldValue};

pub const FEATURE_COUNT: usize = 30;

/// Training column order. `Over18` is collected by the form but the frozen
/// model was trained without it, so it has no slot here.
pub const FEATURE_COLUMNS: [Field; FEATURE_COUNT] = [
    Field::Age,
    Field::BusinessTravel,
    Field::DailyRate,
    Field::Department,
    Field::DistanceFromHome,
    Field::Education,
    Field::EducationField,
    Field::EnvironmentSatisfaction,
    Field::Gender,
    Field::HourlyRate,
    Field::JobInvolvement,
    Field::JobLevel,
    Field::JobRole,
    Field::JobSatisfaction,
    Field::MaritalStatus,
    Field::MonthlyIncome,
    Field::MonthlyRate,
    Field::NumCompaniesWorked,
    Field::OverTime,
    Field::PercentSalaryHike,
    Field::PerformanceRating,
    Field::RelationshipSatisfaction,
    Field::StockOptionLevel,
    Field::TotalWorkingYears,
    Field::TrainingTimesLastYear,
    Field::WorkLifeBalance,
    Field::YearsAtCompany,
    Field::YearsInCurrentRole,
    Field::YearsSinceLastPromotion,
    Field::YearsWithCurrManager,
];

pub fn column_names() -> impl Iterator<Item = &'static str> {
    FEATURE_COLUMNS.iter().map(|field| field.name())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[cfg(test)]
    pub fn get(&self, field: Field) -> Option<f32> {
        FEATURE_COLUMNS
            .iter()
            .position(|column| *column == field)
            .map(|position| self.0[position])
    }
}

/// Encodes the categorical values and lays every column out in training order.
pub fn assemble(profile: &EmployeeProfile, encoders: &EncoderSet) -> Result<FeatureVector, EncodeError> {
    // Encoded for validation only; an unknown value still fails the request.
    encoders
        .get(Category::Over18)
        .transform(profile.label(Category::Over18))?;

    let mut values = [0.0f32; FEATURE_COUNT];
    for (slot, field) in values.iter_mut().zip(FEATURE_COLUMNS) {
        *slot = match profile.value(field) {
            FieldValue::Number(value) => value as f32,
            FieldValue::Label(category, value) => encoders.get(category).transform(value)? as f32,
        };
    }

    Ok(FeatureVector(values))
}
