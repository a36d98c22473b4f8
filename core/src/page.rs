use std::path::Path;

use minijinja::{context, Environment};
use serde::Serialize;

use crate::errors::ArtifactError;
use crate::form::{column_fields, FieldSpec, Widget, COLUMN_COUNT};
use crate::ml::encoder::EncoderSet;
use crate::types::{Attrition, EmployeeProfile, Prediction};

const INDEX_TEMPLATE: &str = "index.html";

/// What the result panel shows under the form.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Empty,
    Predicted(&'a Prediction),
    Rejected(&'a str),
}

#[derive(Debug, Serialize)]
struct OptionView {
    value: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct FieldView {
    name: &'static str,
    label: &'static str,
    icon: &'static str,
    kind: &'static str,
    min: u32,
    max: u32,
    step: u32,
    value: String,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct ResultView {
    leaves: bool,
    headline: String,
}

pub struct PageRenderer {
    env: Environment<'static>,
    background: bool,
    model_info: String,
}

impl PageRenderer {
    pub fn new(background: bool, model_info: String) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self {
            env,
            background,
            model_info,
        })
    }

    pub fn render(
        &self,
        profile: &EmployeeProfile,
        encoders: &EncoderSet,
        outcome: Outcome<'_>,
    ) -> Result<String, minijinja::Error> {
        let columns: Vec<Vec<FieldView>> = (1..=COLUMN_COUNT)
            .map(|column| {
                column_fields(column)
                    .map(|spec| field_view(spec, profile, encoders))
                    .collect()
            })
            .collect();
        // Two rows of two columns.
        let rows: Vec<&[Vec<FieldView>]> = columns.chunks(2).collect();

        let (result, error) = match outcome {
            Outcome::Empty => (None, None),
            Outcome::Predicted(prediction) => (
                Some(ResultView {
                    leaves: prediction.attrition == Attrition::Leaves,
                    headline: prediction.headline(),
                }),
                None,
            ),
            Outcome::Rejected(message) => (None, Some(message)),
        };

        self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            rows => rows,
            result => result,
            error => error,
            background => self.background,
            model_info => self.model_info,
        })
    }
}

fn field_view(spec: &FieldSpec, profile: &EmployeeProfile, encoders: &EncoderSet) -> FieldView {
    let value = profile.display_value(spec.field);
    let (kind, min, max, step, options) = match spec.widget {
        Widget::Slider { min, max, step, .. } => ("slider", min, max, step, Vec::new()),
        Widget::Choice { options } => {
            let options = options
                .iter()
                .map(|option| option.to_string())
                .collect();
            ("select", 0, 0, 0, option_views(options, &value))
        }
        Widget::Category { category } => {
            let options = encoders.get(category).classes().to_vec();
            ("select", 0, 0, 0, option_views(options, &value))
        }
    };

    FieldView {
        name: spec.field.name(),
        label: spec.label,
        icon: spec.icon,
        kind,
        min,
        max,
        step,
        value,
        options,
    }
}

fn option_views(options: Vec<String>, selected: &str) -> Vec<OptionView> {
    options
        .into_iter()
        .map(|value| OptionView {
            selected: value == selected,
            value,
        })
        .collect()
}

/// Cosmetic page background, served as-is.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl BackgroundImage {
    pub fn load(path: &Path, max_bytes: u64) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }
        if path.is_dir() {
            return Err(ArtifactError::NotAFile(path.to_path_buf()));
        }

        let read_error = |source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        };
        let size = std::fs::metadata(path).map_err(read_error)?.len();
        if size > max_bytes {
            return Err(ArtifactError::Invalid {
                path: path.to_path_buf(),
                reason: format!("image is {} bytes, limit is {}", size, max_bytes),
            });
        }

        let content_type = content_type_for(path).ok_or_else(|| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason: "unsupported image type".to_string(),
        })?;
        let bytes = std::fs::read(path).map_err(read_error)?;

        Ok(Self {
            bytes,
            content_type,
        })
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
