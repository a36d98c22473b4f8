use serde::Serialize;

use crate::errors::ProfileError;
use crate::ml::encoder::EncoderSet;
use crate::types::{Category, EmployeeProfile, Field, FieldValue};

const LEVELS_1_TO_4: &[u32] = &[1, 2, 3, 4];
const LEVELS_1_TO_5: &[u32] = &[1, 2, 3, 4, 5];

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Slider {
        min: u32,
        max: u32,
        default: u32,
        step: u32,
    },
    /// Fixed integer options; the first one is preselected.
    Choice { options: &'static [u32] },
    /// Options come from the field's encoder vocabulary.
    Category { category: Category },
}

impl Widget {
    pub fn default_value(&self) -> Option<u32> {
        match self {
            Widget::Slider { default, .. } => Some(*default),
            Widget::Choice { options } => options.first().copied(),
            Widget::Category { .. } => None,
        }
    }

    pub fn bounds(&self) -> Option<(u32, u32)> {
        match self {
            Widget::Slider { min, max, .. } => Some((*min, *max)),
            Widget::Choice { options } => Some((*options.first()?, *options.last()?)),
            Widget::Category { .. } => None,
        }
    }

    fn accepts(&self, value: u32) -> bool {
        match self {
            Widget::Slider { min, max, .. } => (*min..=*max).contains(&value),
            Widget::Choice { options } => options.contains(&value),
            Widget::Category { .. } => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub icon: &'static str,
    /// Visual column, 1 to 4.
    pub column: u8,
    pub widget: Widget,
}

pub const COLUMN_COUNT: u8 = 4;

const fn slider(min: u32, max: u32, default: u32, step: u32) -> Widget {
    Widget::Slider {
        min,
        max,
        default,
        step,
    }
}

const fn spec(field: Field, icon: &'static str, label: &'static str, column: u8, widget: Widget) -> FieldSpec {
    FieldSpec {
        field,
        label,
        icon,
        column,
        widget,
    }
}

/// Widget table, one entry per [`Field`] in declaration order.
pub static FORM_FIELDS: [FieldSpec; 31] = [
    spec(Field::Age, "🎂", "Age", 1, slider(18, 60, 30, 1)),
    spec(
        Field::BusinessTravel,
        "✈️",
        "Business Travel",
        1,
        Widget::Category {
            category: Category::BusinessTravel,
        },
    ),
    spec(Field::DailyRate, "📊", "Daily Rate", 1, slider(100, 1500, 800, 10)),
    spec(
        Field::Department,
        "🏢",
        "Department",
        1,
        Widget::Category {
            category: Category::Department,
        },
    ),
    spec(
        Field::DistanceFromHome,
        "🚗",
        "Distance From Home (km)",
        1,
        slider(1, 30, 10, 1),
    ),
    spec(
        Field::Education,
        "🎓",
        "Education (1=Below College, 5=Doctor)",
        1,
        Widget::Choice {
            options: LEVELS_1_TO_5,
        },
    ),
    spec(
        Field::EducationField,
        "📚",
        "Education Field",
        1,
        Widget::Category {
            category: Category::EducationField,
        },
    ),
    spec(
        Field::EnvironmentSatisfaction,
        "🌿",
        "Environment Satisfaction (1=Low, 4=High)",
        1,
        Widget::Choice {
            options: LEVELS_1_TO_4,
        },
    ),
    spec(
        Field::Gender,
        "⚧",
        "Gender",
        1,
        Widget::Category {
            category: Category::Gender,
        },
    ),
    spec(Field::HourlyRate, "💵", "Hourly Rate", 1, slider(10, 100, 50, 1)),
    spec(
        Field::JobInvolvement,
        "🛠️",
        "Job Involvement (1=Low, 4=High)",
        2,
        Widget::Choice {
            options: LEVELS_1_TO_4,
        },
    ),
    spec(Field::JobLevel, "📈", "Job Level", 2, slider(1, 5, 2, 1)),
    spec(
        Field::JobRole,
        "🧑‍💼",
        "Job Role",
        2,
        Widget::Category {
            category: Category::JobRole,
        },
    ),
    spec(
        Field::JobSatisfaction,
        "😊",
        "Job Satisfaction (1=Low, 4=High)",
        2,
        Widget::Choice {
            options: LEVELS_1_TO_4,
        },
    ),
    spec(
        Field::MaritalStatus,
        "💍",
        "Marital Status",
        2,
        Widget::Category {
            category: Category::MaritalStatus,
        },
    ),
    spec(
        Field::MonthlyIncome,
        "💰",
        "Monthly Income",
        2,
        slider(1000, 20000, 5000, 500),
    ),
    spec(
        Field::MonthlyRate,
        "💳",
        "Monthly Rate",
        2,
        slider(2000, 30000, 10000, 500),
    ),
    spec(
        Field::NumCompaniesWorked,
        "🏢",
        "Num Companies Worked",
        2,
        slider(0, 10, 2, 1),
    ),
    spec(
        Field::Over18,
        "🔞",
        "Over 18",
        2,
        Widget::Category {
            category: Category::Over18,
        },
    ),
    spec(
        Field::OverTime,
        "⏱️",
        "OverTime",
        2,
        Widget::Category {
            category: Category::OverTime,
        },
    ),
    spec(
        Field::PercentSalaryHike,
        "📈",
        "Percent Salary Hike",
        3,
        slider(0, 30, 15, 1),
    ),
    spec(
        Field::PerformanceRating,
        "⭐",
        "Performance Rating",
        3,
        slider(1, 4, 3, 1),
    ),
    spec(
        Field::RelationshipSatisfaction,
        "🤝",
        "Relationship Satisfaction (1=Low, 4=High)",
        3,
        Widget::Choice {
            options: LEVELS_1_TO_4,
        },
    ),
    spec(
        Field::StockOptionLevel,
        "📦",
        "Stock Option Level",
        3,
        slider(0, 3, 1, 1),
    ),
    spec(
        Field::TotalWorkingYears,
        "⌛",
        "Total Working Years",
        3,
        slider(0, 40, 10, 1),
    ),
    spec(
        Field::TrainingTimesLastYear,
        "📚",
        "Training Times Last Year",
        4,
        slider(0, 10, 3, 1),
    ),
    spec(
        Field::WorkLifeBalance,
        "⚖️",
        "Work Life Balance (1=Bad, 4=Best)",
        4,
        Widget::Choice {
            options: LEVELS_1_TO_4,
        },
    ),
    spec(
        Field::YearsAtCompany,
        "🏢",
        "Years at Company",
        4,
        slider(0, 40, 3, 1),
    ),
    spec(
        Field::YearsInCurrentRole,
        "📌",
        "Years in Current Role",
        4,
        slider(0, 20, 2, 1),
    ),
    spec(
        Field::YearsSinceLastPromotion,
        "🎯",
        "Years Since Last Promotion",
        4,
        slider(0, 15, 1, 1),
    ),
    spec(
        Field::YearsWithCurrManager,
        "👨‍💼",
        "Years with Current Manager",
        4,
        slider(0, 20, 3, 1),
    ),
];

pub fn field_spec(field: Field) -> &'static FieldSpec {
    &FORM_FIELDS[field as usize]
}

pub fn column_fields(column: u8) -> impl Iterator<Item = &'static FieldSpec> {
    FORM_FIELDS.iter().filter(move |spec| spec.column == column)
}

/// Range check for input that did not come through the rendered controls.
/// Categorical values are left to the encoders.
pub fn validate(profile: &EmployeeProfile) -> Result<(), ProfileError> {
    for spec in FORM_FIELDS.iter() {
        let value = match profile.value(spec.field) {
            FieldValue::Number(value) => value,
            FieldValue::Label(..) => continue,
        };
        if spec.widget.accepts(value) {
            continue;
        }
        let (min, max) = spec.widget.bounds().unwrap_or((value, value));
        return Err(ProfileError::OutOfRange {
            field: spec.field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// The profile the page shows before any submission: slider defaults, first
/// option of every select.
pub fn default_profile(encoders: &EncoderSet) -> EmployeeProfile {
    let number = |field: Field| field_spec(field).widget.default_value().unwrap_or_default();
    let class = |category: Category| encoders.get(category).default_class().to_string();

    EmployeeProfile {
        age: number(Field::Age),
        business_travel: class(Category::BusinessTravel),
        daily_rate: number(Field::DailyRate),
        department: class(Category::Department),
        distance_from_home: number(Field::DistanceFromHome),
        education: number(Field::Education),
        education_field: class(Category::EducationField),
        environment_satisfaction: number(Field::EnvironmentSatisfaction),
        gender: class(Category::Gender),
        hourly_rate: number(Field::HourlyRate),
        job_involvement: number(Field::JobInvolvement),
        job_level: number(Field::JobLevel),
        job_role: class(Category::JobRole),
        job_satisfaction: number(Field::JobSatisfaction),
        marital_status: class(Category::MaritalStatus),
        monthly_income: number(Field::MonthlyIncome),
        monthly_rate: number(Field::MonthlyRate),
        num_companies_worked: number(Field::NumCompaniesWorked),
        over18: class(Category::Over18),
        over_time: class(Category::OverTime),
        percent_salary_hike: number(Field::PercentSalaryHike),
        performance_rating: number(Field::PerformanceRating),
        relationship_satisfaction: number(Field::RelationshipSatisfaction),
        stock_option_level: number(Field::StockOptionLevel),
        total_working_years: number(Field::TotalWorkingYears),
        training_times_last_year: number(Field::TrainingTimesLastYear),
        work_life_balance: number(Field::WorkLifeBalance),
        years_at_company: number(Field::YearsAtCompany),
        years_in_current_role: number(Field::YearsInCurrentRole),
        years_since_last_promotion: number(Field::YearsSinceLastPromotion),
        years_with_curr_manager: number(Field::YearsWithCurrManager),
    }
}

#[cfg(test)]
mod tests;
