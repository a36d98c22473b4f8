use std::path::Path;

use log::{debug, info};

use crate::errors::{ArtifactError, PredictError, TreeError};
use crate::features::{self, FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
use crate::form;
use crate::ml::encoder::EncoderSet;
use crate::ml::tree::DecisionTreeClassifier;
use crate::types::{Attrition, EmployeeProfile, Prediction, LEAVES_CLASS};

/// The loaded artifacts. Read-only once built, shared across requests.
pub struct InferenceEngine {
    model: DecisionTreeClassifier,
    encoders: EncoderSet,
    /// Position of the "leaves" class in the model's probability output.
    leaves_column: usize,
}

impl InferenceEngine {
    pub fn new(model: DecisionTreeClassifier, encoders: EncoderSet) -> Result<Self, TreeError> {
        check_feature_contract(&model)?;
        let leaves_column = model
            .classes()
            .iter()
            .position(|class| *class == LEAVES_CLASS)
            .ok_or(TreeError::MissingClass(LEAVES_CLASS))?;
        Ok(Self {
            model,
            encoders,
            leaves_column,
        })
    }

    pub fn load(model_path: &Path, encoders_dir: &Path) -> Result<Self, ArtifactError> {
        let model = DecisionTreeClassifier::load(model_path)?;
        let encoders = EncoderSet::load_dir(encoders_dir)?;
        let engine = Self::new(model, encoders).map_err(|source| ArtifactError::Model {
            path: model_path.to_path_buf(),
            source,
        })?;

        let summary = engine.model.summary();
        info!(
            "[MODEL] Decision tree loaded: {} nodes, {} leaves, depth {}, {} features",
            summary.nodes, summary.leaves, summary.depth, summary.n_features
        );
        for encoder in engine.encoders.iter() {
            info!(
                "[MODEL] {} encoder: {} classes",
                encoder.category(),
                encoder.classes().len()
            );
        }

        Ok(engine)
    }

    pub fn model(&self) -> &DecisionTreeClassifier {
        &self.model
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn default_profile(&self) -> EmployeeProfile {
        form::default_profile(&self.encoders)
    }

    pub fn features(&self, profile: &EmployeeProfile) -> Result<FeatureVector, PredictError> {
        form::validate(profile)?;
        Ok(features::assemble(profile, &self.encoders)?)
    }

    pub fn predict(&self, profile: &EmployeeProfile) -> Result<Prediction, PredictError> {
        let features = self.features(profile)?;
        let label = self.model.predict(features.as_slice())?;
        let proba = self.model.predict_proba(features.as_slice())?;

        let prediction = Prediction {
            attrition: Attrition::from_class_label(label),
            probability: proba[self.leaves_column],
        };
        debug!(
            "[MODEL] Prediction {:?} p(leave)={:.4}",
            prediction.attrition, prediction.probability
        );
        Ok(prediction)
    }
}

fn check_feature_contract(model: &DecisionTreeClassifier) -> Result<(), TreeError> {
    if model.n_features() != FEATURE_COUNT {
        return Err(TreeError::FeatureCount {
            expected: FEATURE_COUNT,
            actual: model.n_features(),
        });
    }

    if let Some(names) = model.feature_names() {
        for (index, (name, column)) in names.iter().zip(FEATURE_COLUMNS).enumerate() {
            if name != column.name() {
                return Err(TreeError::FeatureName {
                    index,
                    expected: column.name().to_string(),
                    actual: name.clone(),
                });
            }
        }
    }

    Ok(())
}
