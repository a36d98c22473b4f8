//! Shared fixtures for unit tests.

use std::path::PathBuf;
use std::sync::Arc;

use crate::ml::encoder::EncoderSet;
use crate::ml::inference::InferenceEngine;
use crate::types::EmployeeProfile;

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub fn fixture_encoders() -> EncoderSet {
    EncoderSet::load_dir(&fixture_dir()).expect("fixture encoders")
}

pub fn fixture_engine() -> Arc<InferenceEngine> {
    let dir = fixture_dir();
    let engine = InferenceEngine::load(&dir.join("decision_tree_attrition.json"), &dir)
        .unwrap_or_else(|err| panic!("fixture artifacts: {err}"));
    Arc::new(engine)
}

/// Widget defaults for every number, with a travelling overtime employee in R&D.
pub fn sample_profile() -> EmployeeProfile {
    EmployeeProfile {
        age: 30,
        business_travel: "Travel_Rarely".to_string(),
        daily_rate: 800,
        department: "Research & Development".to_string(),
        distance_from_home: 10,
        education: 3,
        education_field: "Life Sciences".to_string(),
        environment_satisfaction: 3,
        gender: "Female".to_string(),
        hourly_rate: 50,
        job_involvement: 3,
        job_level: 2,
        job_role: "Research Scientist".to_string(),
        job_satisfaction: 3,
        marital_status: "Married".to_string(),
        monthly_income: 5000,
        monthly_rate: 10000,
        num_companies_worked: 2,
        over18: "Y".to_string(),
        over_time: "Yes".to_string(),
        percent_salary_hike: 15,
        performance_rating: 3,
        relationship_satisfaction: 3,
        stock_option_level: 1,
        total_working_years: 10,
        training_times_last_year: 3,
        work_life_balance: 3,
        years_at_company: 3,
        years_in_current_role: 2,
        years_since_last_promotion: 1,
        years_with_curr_manager: 3,
    }
}
