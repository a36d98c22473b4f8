use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PROFILE FIELDS
// ============================================================================

/// One collected HR attribute. Variant names double as the column names the
/// classifier was trained with and as the wire names of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    Age,
    BusinessTravel,
    DailyRate,
    Department,
    DistanceFromHome,
    Education,
    EducationField,
    EnvironmentSatisfaction,
    Gender,
    HourlyRate,
    JobInvolvement,
    JobLevel,
    JobRole,
    JobSatisfaction,
    MaritalStatus,
    MonthlyIncome,
    MonthlyRate,
    NumCompaniesWorked,
    Over18,
    OverTime,
    PercentSalaryHike,
    PerformanceRating,
    RelationshipSatisfaction,
    StockOptionLevel,
    TotalWorkingYears,
    TrainingTimesLastYear,
    WorkLifeBalance,
    YearsAtCompany,
    YearsInCurrentRole,
    YearsSinceLastPromotion,
    YearsWithCurrManager,
}

impl Field {
    #[cfg(test)]
    pub const ALL: [Field; 31] = [
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
        Field::Over18,
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

    pub fn name(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::BusinessTravel => "BusinessTravel",
            Field::DailyRate => "DailyRate",
            Field::Department => "Department",
            Field::DistanceFromHome => "DistanceFromHome",
            Field::Education => "Education",
            Field::EducationField => "EducationField",
            Field::EnvironmentSatisfaction => "EnvironmentSatisfaction",
            Field::Gender => "Gender",
            Field::HourlyRate => "HourlyRate",
            Field::JobInvolvement => "JobInvolvement",
            Field::JobLevel => "JobLevel",
            Field::JobRole => "JobRole",
            Field::JobSatisfaction => "JobSatisfaction",
            Field::MaritalStatus => "MaritalStatus",
            Field::MonthlyIncome => "MonthlyIncome",
            Field::MonthlyRate => "MonthlyRate",
            Field::NumCompaniesWorked => "NumCompaniesWorked",
            Field::Over18 => "Over18",
            Field::OverTime => "OverTime",
            Field::PercentSalaryHike => "PercentSalaryHike",
            Field::PerformanceRating => "PerformanceRating",
            Field::RelationshipSatisfaction => "RelationshipSatisfaction",
            Field::StockOptionLevel => "StockOptionLevel",
            Field::TotalWorkingYears => "TotalWorkingYears",
            Field::TrainingTimesLastYear => "TrainingTimesLastYear",
            Field::WorkLifeBalance => "WorkLifeBalance",
            Field::YearsAtCompany => "YearsAtCompany",
            Field::YearsInCurrentRole => "YearsInCurrentRole",
            Field::YearsSinceLastPromotion => "YearsSinceLastPromotion",
            Field::YearsWithCurrManager => "YearsWithCurrManager",
        }
    }

    #[cfg(test)]
    pub fn category(self) -> Option<Category> {
        match self {
            Field::BusinessTravel => Some(Category::BusinessTravel),
            Field::Department => Some(Category::Department),
            Field::EducationField => Some(Category::EducationField),
            Field::Gender => Some(Category::Gender),
            Field::JobRole => Some(Category::JobRole),
            Field::MaritalStatus => Some(Category::MaritalStatus),
            Field::Over18 => Some(Category::Over18),
            Field::OverTime => Some(Category::OverTime),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields whose values go through a label encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    BusinessTravel,
    Department,
    EducationField,
    Gender,
    JobRole,
    MaritalStatus,
    Over18,
    OverTime,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::BusinessTravel,
        Category::Department,
        Category::EducationField,
        Category::Gender,
        Category::JobRole,
        Category::MaritalStatus,
        Category::Over18,
        Category::OverTime,
    ];

    pub fn field(self) -> Field {
        match self {
            Category::BusinessTravel => Field::BusinessTravel,
            Category::Department => Field::Department,
            Category::EducationField => Field::EducationField,
            Category::Gender => Field::Gender,
            Category::JobRole => Field::JobRole,
            Category::MaritalStatus => Field::MaritalStatus,
            Category::Over18 => Field::Over18,
            Category::OverTime => Field::OverTime,
        }
    }

    pub fn artifact_file_name(self) -> String {
        format!("label_encoder_{}.json", self.field().name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().name())
    }
}

// ============================================================================
// EMPLOYEE PROFILE
// ============================================================================

/// The raw form input for one employee. Rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeProfile {
    pub age: u32,
    pub business_travel: String,
    pub daily_rate: u32,
    pub department: String,
    pub distance_from_home: u32,
    pub education: u32,
    pub education_field: String,
    pub environment_satisfaction: u32,
    pub gender: String,
    pub hourly_rate: u32,
    pub job_involvement: u32,
    pub job_level: u32,
    pub job_role: String,
    pub job_satisfaction: u32,
    pub marital_status: String,
    pub monthly_income: u32,
    pub monthly_rate: u32,
    pub num_companies_worked: u32,
    pub over18: String,
    pub over_time: String,
    pub percent_salary_hike: u32,
    pub performance_rating: u32,
    pub relationship_satisfaction: u32,
    pub stock_option_level: u32,
    pub total_working_years: u32,
    pub training_times_last_year: u32,
    pub work_life_balance: u32,
    pub years_at_company: u32,
    pub years_in_current_role: u32,
    pub years_since_last_promotion: u32,
    pub years_with_curr_manager: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Number(u32),
    Label(Category, &'a str),
}

impl EmployeeProfile {
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Age => FieldValue::Number(self.age),
            Field::BusinessTravel => {
                FieldValue::Label(Category::BusinessTravel, &self.business_travel)
            }
            Field::DailyRate => FieldValue::Number(self.daily_rate),
            Field::Department => FieldValue::Label(Category::Department, &self.department),
            Field::DistanceFromHome => FieldValue::Number(self.distance_from_home),
            Field::Education => FieldValue::Number(self.education),
            Field::EducationField => {
                FieldValue::Label(Category::EducationField, &self.education_field)
            }
            Field::EnvironmentSatisfaction => FieldValue::Number(self.environment_satisfaction),
            Field::Gender => FieldValue::Label(Category::Gender, &self.gender),
            Field::HourlyRate => FieldValue::Number(self.hourly_rate),
            Field::JobInvolvement => FieldValue::Number(self.job_involvement),
            Field::JobLevel => FieldValue::Number(self.job_level),
            Field::JobRole => FieldValue::Label(Category::JobRole, &self.job_role),
            Field::JobSatisfaction => FieldValue::Number(self.job_satisfaction),
            Field::MaritalStatus => FieldValue::Label(Category::MaritalStatus, &self.marital_status),
            Field::MonthlyIncome => FieldValue::Number(self.monthly_income),
            Field::MonthlyRate => FieldValue::Number(self.monthly_rate),
            Field::NumCompaniesWorked => FieldValue::Number(self.num_companies_worked),
            Field::Over18 => FieldValue::Label(Category::Over18, &self.over18),
            Field::OverTime => FieldValue::Label(Category::OverTime, &self.over_time),
            Field::PercentSalaryHike => FieldValue::Number(self.percent_salary_hike),
            Field::PerformanceRating => FieldValue::Number(self.performance_rating),
            Field::RelationshipSatisfaction => FieldValue::Number(self.relationship_satisfaction),
            Field::StockOptionLevel => FieldValue::Number(self.stock_option_level),
            Field::TotalWorkingYears => FieldValue::Number(self.total_working_years),
            Field::TrainingTimesLastYear => FieldValue::Number(self.training_times_last_year),
            Field::WorkLifeBalance => FieldValue::Number(self.work_life_balance),
            Field::YearsAtCompany => FieldValue::Number(self.years_at_company),
            Field::YearsInCurrentRole => FieldValue::Number(self.years_in_current_role),
            Field::YearsSinceLastPromotion => FieldValue::Number(self.years_since_last_promotion),
            Field::YearsWithCurrManager => FieldValue::Number(self.years_with_curr_manager),
        }
    }

    pub fn label(&self, category: Category) -> &str {
        match self.value(category.field()) {
            FieldValue::Label(_, value) => value,
            FieldValue::Number(_) => "",
        }
    }

    pub fn display_value(&self, field: Field) -> String {
        match self.value(field) {
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Label(_, value) => value.to_string(),
        }
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Class value of the positive ("Yes") attrition outcome in the trained model.
pub const LEAVES_CLASS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attrition {
    Stays,
    Leaves,
}

impl Attrition {
    pub fn from_class_label(label: i64) -> Self {
        if label == LEAVES_CLASS {
            Attrition::Leaves
        } else {
            Attrition::Stays
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub attrition: Attrition,
    /// Probability of the "leaves" class, whatever the predicted label.
    pub probability: f64,
}

impl Prediction {
    pub fn headline(&self) -> String {
        match self.attrition {
            Attrition::Leaves => format!("Likely to Leave — Probability: {:.2}", self.probability),
            Attrition::Stays => format!("Likely to Stay — Probability: {:.2}", self.probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_wire_names() {
        let profile_keys = [
            "Age",
            "BusinessTravel",
            "DailyRate",
            "Department",
            "DistanceFromHome",
            "Education",
            "EducationField",
            "EnvironmentSatisfaction",
            "Gender",
            "HourlyRate",
            "JobInvolvement",
            "JobLevel",
            "JobRole",
            "JobSatisfaction",
            "MaritalStatus",
            "MonthlyIncome",
            "MonthlyRate",
            "NumCompaniesWorked",
            "Over18",
            "OverTime",
            "PercentSalaryHike",
            "PerformanceRating",
            "RelationshipSatisfaction",
            "StockOptionLevel",
            "TotalWorkingYears",
            "TrainingTimesLastYear",
            "WorkLifeBalance",
            "YearsAtCompany",
            "YearsInCurrentRole",
            "YearsSinceLastPromotion",
            "YearsWithCurrManager",
        ];
        let names: Vec<&str> = Field::ALL.iter().map(|field| field.name()).collect();
        assert_eq!(names, profile_keys);
    }

    #[test]
    fn every_category_maps_back_to_its_field() {
        for category in Category::ALL {
            assert_eq!(category.field().category(), Some(category));
        }
        let categorical = Field::ALL
            .iter()
            .filter(|field| field.category().is_some())
            .count();
        assert_eq!(categorical, Category::ALL.len());
    }

    #[test]
    fn encoder_artifact_names_follow_column_names() {
        assert_eq!(
            Category::MaritalStatus.artifact_file_name(),
            "label_encoder_MaritalStatus.json"
        );
        assert_eq!(Category::Over18.artifact_file_name(), "label_encoder_Over18.json");
    }

    #[test]
    fn headline_uses_two_decimals() {
        let leaves = Prediction {
            attrition: Attrition::Leaves,
            probability: 0.756,
        };
        assert_eq!(leaves.headline(), "Likely to Leave — Probability: 0.76");

        let stays = Prediction {
            attrition: Attrition::Stays,
            probability: 0.05,
        };
        assert_eq!(stays.headline(), "Likely to Stay — Probability: 0.05");
    }

    #[test]
    fn only_class_one_means_leaving() {
        assert_eq!(Attrition::from_class_label(1), Attrition::Leaves);
        assert_eq!(Attrition::from_class_label(0), Attrition::Stays);
    }
}
