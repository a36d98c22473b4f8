use rstest::rstest;

use super::*;
use crate::testing::{fixture_encoders, sample_profile};

fn set_number(profile: &mut EmployeeProfile, field: Field, value: u32) {
    match field {
        Field::Age => profile.age = value,
        Field::DailyRate => profile.daily_rate = value,
        Field::DistanceFromHome => profile.distance_from_home = value,
        Field::Education => profile.education = value,
        Field::EnvironmentSatisfaction => profile.environment_satisfaction = value,
        Field::HourlyRate => profile.hourly_rate = value,
        Field::JobInvolvement => profile.job_involvement = value,
        Field::JobLevel => profile.job_level = value,
        Field::JobSatisfaction => profile.job_satisfaction = value,
        Field::MonthlyIncome => profile.monthly_income = value,
        Field::MonthlyRate => profile.monthly_rate = value,
        Field::NumCompaniesWorked => profile.num_companies_worked = value,
        Field::PercentSalaryHike => profile.percent_salary_hike = value,
        Field::PerformanceRating => profile.performance_rating = value,
        Field::RelationshipSatisfaction => profile.relationship_satisfaction = value,
        Field::StockOptionLevel => profile.stock_option_level = value,
        Field::TotalWorkingYears => profile.total_working_years = value,
        Field::TrainingTimesLastYear => profile.training_times_last_year = value,
        Field::WorkLifeBalance => profile.work_life_balance = value,
        Field::YearsAtCompany => profile.years_at_company = value,
        Field::YearsInCurrentRole => profile.years_in_current_role = value,
        Field::YearsSinceLastPromotion => profile.years_since_last_promotion = value,
        Field::YearsWithCurrManager => profile.years_with_curr_manager = value,
        other => panic!("{other} is not numeric"),
    }
}

#[test]
fn widget_table_follows_field_order() {
    for (spec, field) in FORM_FIELDS.iter().zip(Field::ALL) {
        assert_eq!(spec.field, field);
        assert_eq!(field_spec(field).field, field);
    }
}

#[test]
fn categorical_fields_use_their_encoder_widget() {
    for spec in FORM_FIELDS.iter() {
        match (spec.field.category(), spec.widget) {
            (Some(expected), Widget::Category { category }) => assert_eq!(category, expected),
            (None, Widget::Category { .. }) => panic!("{} should be numeric", spec.field),
            (Some(_), _) => panic!("{} should be a category select", spec.field),
            (None, _) => {}
        }
    }
}

#[test]
fn columns_match_the_page_layout() {
    let counts: Vec<usize> = (1..=COLUMN_COUNT)
        .map(|column| column_fields(column).count())
        .collect();
    assert_eq!(counts, vec![10, 10, 5, 6]);

    let last_of_first: Vec<Field> = column_fields(1).map(|spec| spec.field).collect();
    assert_eq!(last_of_first.last(), Some(&Field::HourlyRate));
    let first_of_fourth = column_fields(4).next().map(|spec| spec.field);
    assert_eq!(first_of_fourth, Some(Field::TrainingTimesLastYear));
}

#[test]
fn slider_defaults_lie_inside_their_range() {
    for spec in FORM_FIELDS.iter() {
        if let Widget::Slider {
            min,
            max,
            default,
            step,
        } = spec.widget
        {
            assert!(min <= default && default <= max, "{}", spec.field);
            assert!(step > 0, "{}", spec.field);
        }
    }
}

#[test]
fn default_profile_matches_widget_defaults() {
    let encoders = fixture_encoders();
    let profile = default_profile(&encoders);

    assert_eq!(profile.age, 30);
    assert_eq!(profile.daily_rate, 800);
    assert_eq!(profile.monthly_income, 5000);
    assert_eq!(profile.monthly_rate, 10000);
    assert_eq!(profile.performance_rating, 3);
    assert_eq!(profile.education, 1);
    assert_eq!(profile.work_life_balance, 1);
    assert_eq!(profile.business_travel, "Non-Travel");
    assert_eq!(profile.over_time, "No");
    assert_eq!(profile.over18, "Y");
    assert!(validate(&profile).is_ok());
}

#[rstest]
#[case(Field::Age, 18, 60)]
#[case(Field::DailyRate, 100, 1500)]
#[case(Field::DistanceFromHome, 1, 30)]
#[case(Field::Education, 1, 5)]
#[case(Field::EnvironmentSatisfaction, 1, 4)]
#[case(Field::HourlyRate, 10, 100)]
#[case(Field::JobInvolvement, 1, 4)]
#[case(Field::JobLevel, 1, 5)]
#[case(Field::JobSatisfaction, 1, 4)]
#[case(Field::MonthlyIncome, 1000, 20000)]
#[case(Field::MonthlyRate, 2000, 30000)]
#[case(Field::NumCompaniesWorked, 0, 10)]
#[case(Field::PercentSalaryHike, 0, 30)]
#[case(Field::PerformanceRating, 1, 4)]
#[case(Field::RelationshipSatisfaction, 1, 4)]
#[case(Field::StockOptionLevel, 0, 3)]
#[case(Field::TotalWorkingYears, 0, 40)]
#[case(Field::TrainingTimesLastYear, 0, 10)]
#[case(Field::WorkLifeBalance, 1, 4)]
#[case(Field::YearsAtCompany, 0, 40)]
#[case(Field::YearsInCurrentRole, 0, 20)]
#[case(Field::YearsSinceLastPromotion, 0, 15)]
#[case(Field::YearsWithCurrManager, 0, 20)]
fn bounds_are_inclusive(#[case] field: Field, #[case] min: u32, #[case] max: u32) {
    assert_eq!(field_spec(field).widget.bounds(), Some((min, max)));

    let mut profile = sample_profile();
    set_number(&mut profile, field, min);
    assert_eq!(validate(&profile), Ok(()));
    set_number(&mut profile, field, max);
    assert_eq!(validate(&profile), Ok(()));

    set_number(&mut profile, field, max + 1);
    assert_eq!(
        validate(&profile),
        Err(ProfileError::OutOfRange {
            field,
            value: max + 1,
            min,
            max,
        })
    );

    if min > 0 {
        set_number(&mut profile, field, min - 1);
        assert!(validate(&profile).is_err());
    }
}

#[test]
fn off_step_values_inside_the_range_are_accepted() {
    let mut profile = sample_profile();
    profile.daily_rate = 805;
    profile.monthly_income = 4321;
    assert!(validate(&profile).is_ok());
}

#[test]
fn categorical_values_are_not_checked_here() {
    let mut profile = sample_profile();
    profile.department = "Legal".to_string();
    assert!(validate(&profile).is_ok());
}
