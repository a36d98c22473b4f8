use std::io;
use std::path::PathBuf;

use crate::types::Field;

/// Failure to load one of the model or encoder artifacts. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("artifact path must be a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("artifact read error at {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("artifact parse error at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid artifact {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("invalid model {}: {source}", .path.display())]
    Model { path: PathBuf, source: TreeError },
}

/// Structural defects of a decision tree artifact, or input it cannot score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,
    #[error("node array `{name}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("node {node} references child {child} but tree has {num_nodes} nodes")]
    InvalidChild {
        node: usize,
        child: i64,
        num_nodes: usize,
    },
    #[error("node {node} splits on feature {feature} but model has {n_features} features")]
    InvalidFeature {
        node: usize,
        feature: i64,
        n_features: usize,
    },
    #[error("binary classifier expected, model lists {0} classes")]
    ClassCount(usize),
    #[error("class {0} is listed more than once")]
    DuplicateClass(i64),
    #[error("model does not predict class {0}")]
    MissingClass(i64),
    #[error("node {node} carries {actual} class weights, expected {expected}")]
    ValueWidth {
        node: usize,
        expected: usize,
        actual: usize,
    },
    #[error("node {node} carries a negative or non-finite class weight")]
    NegativeWeight { node: usize },
    #[error("model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("feature {index} is `{actual}`, expected `{expected}`")]
    FeatureName {
        index: usize,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unknown {field} value `{value}`")]
    UnknownCategory { field: Field, value: String },
    #[cfg(test)]
    #[error("unknown {field} code {code}")]
    UnknownCode { field: Field, code: u32 },
    #[error("{0} encoder has an empty vocabulary")]
    EmptyVocabulary(Field),
    #[error("{field} encoder lists `{value}` more than once")]
    DuplicateClass { field: Field, value: String },
    #[error("no encoder loaded for {0}")]
    MissingEncoder(Field),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: Field,
        value: u32,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Model(#[from] TreeError),
}
