//! Decision tree classifier loaded from the flat node arrays of a fitted tree.
//!
//! Nodes are stored in pre-order: every child index is larger than its
//! parent's, which is what lets traversal run without a visited set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ArtifactError, TreeError};
use crate::ml::read_artifact;

const LEAF: i64 = -1;
const NUM_CLASSES: usize = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NodeValue {
    /// `[[w0, w1]]`, one row per output.
    PerOutput(Vec<Vec<f64>>),
    Flat(Vec<f64>),
}

/// On-disk layout of the exported tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub classes: Vec<i64>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    value: Vec<NodeValue>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: [f64; NUM_CLASSES],
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub n_features: usize,
    pub classes: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    nodes: Vec<Node>,
    n_features: usize,
    feature_names: Option<Vec<String>>,
    classes: [i64; NUM_CLASSES],
}

impl DecisionTreeClassifier {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: TreeArtifact = read_artifact(path)?;
        Self::from_artifact(artifact).map_err(|source| ArtifactError::Model {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_artifact(artifact: TreeArtifact) -> Result<Self, TreeError> {
        let num_nodes = artifact.children_left.len();
        if num_nodes == 0 {
            return Err(TreeError::Empty);
        }

        check_len("children_right", num_nodes, artifact.children_right.len())?;
        check_len("feature", num_nodes, artifact.feature.len())?;
        check_len("threshold", num_nodes, artifact.threshold.len())?;
        check_len("value", num_nodes, artifact.value.len())?;

        let classes: [i64; NUM_CLASSES] = artifact
            .classes
            .as_slice()
            .try_into()
            .map_err(|_| TreeError::ClassCount(artifact.classes.len()))?;
        if classes[0] == classes[1] {
            return Err(TreeError::DuplicateClass(classes[0]));
        }

        if let Some(names) = artifact.feature_names.as_ref() {
            check_len("feature_names", artifact.n_features, names.len())?;
        }

        let mut nodes = Vec::with_capacity(num_nodes);
        for node in 0..num_nodes {
            let left = artifact.children_left[node];
            let right = artifact.children_right[node];

            if left == LEAF || right == LEAF {
                // A half-leaf would send some rows nowhere.
                if left != right {
                    let child = if left == LEAF { right } else { left };
                    return Err(TreeError::InvalidChild {
                        node,
                        child,
                        num_nodes,
                    });
                }
                let weights = leaf_weights(node, &artifact.value[node])?;
                nodes.push(Node::Leaf {
                    proba: normalize(weights),
                });
                continue;
            }

            let left = child_index(node, left, num_nodes)?;
            let right = child_index(node, right, num_nodes)?;
            let feature = artifact.feature[node];
            if feature < 0 || feature as usize >= artifact.n_features {
                return Err(TreeError::InvalidFeature {
                    node,
                    feature,
                    n_features: artifact.n_features,
                });
            }
            // Internal nodes still carry class weights in the export.
            leaf_weights(node, &artifact.value[node])?;

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: artifact.threshold[node],
                left,
                right,
            });
        }

        Ok(Self {
            nodes,
            n_features: artifact.n_features,
            feature_names: artifact.feature_names,
            classes,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Class probabilities in [`Self::classes`] order.
    pub fn predict_proba(&self, features: &[f32]) -> Result<[f64; NUM_CLASSES], TreeError> {
        if features.len() != self.n_features {
            return Err(TreeError::FeatureCount {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { proba } => return Ok(*proba),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if f64::from(features[*feature]) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Class with the highest probability; ties go to the earlier class.
    pub fn predict(&self, features: &[f32]) -> Result<i64, TreeError> {
        let proba = self.predict_proba(features)?;
        let mut best = 0;
        for (position, value) in proba.iter().enumerate() {
            if *value > proba[best] {
                best = position;
            }
        }
        Ok(self.classes[best])
    }

    pub fn summary(&self) -> TreeSummary {
        let leaves = self
            .nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count();

        TreeSummary {
            nodes: self.nodes.len(),
            leaves,
            depth: self.depth(),
            n_features: self.n_features,
            classes: self.classes.to_vec(),
        }
    }

    fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Split { left, right, .. } = &self.nodes[index] {
                stack.push((*left, depth + 1));
                stack.push((*right, depth + 1));
            }
        }
        max_depth
    }
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), TreeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(TreeError::LengthMismatch {
            name,
            expected,
            actual,
        })
    }
}

fn child_index(node: usize, child: i64, num_nodes: usize) -> Result<usize, TreeError> {
    if child <= node as i64 || child as usize >= num_nodes {
        return Err(TreeError::InvalidChild {
            node,
            child,
            num_nodes,
        });
    }
    Ok(child as usize)
}

fn leaf_weights(node: usize, value: &NodeValue) -> Result<[f64; NUM_CLASSES], TreeError> {
    let row = match value {
        NodeValue::PerOutput(rows) if rows.len() == 1 => rows[0].as_slice(),
        NodeValue::PerOutput(rows) => {
            return Err(TreeError::ValueWidth {
                node,
                expected: 1,
                actual: rows.len(),
            })
        }
        NodeValue::Flat(row) => row.as_slice(),
    };

    let weights: [f64; NUM_CLASSES] = row.try_into().map_err(|_| TreeError::ValueWidth {
        node,
        expected: NUM_CLASSES,
        actual: row.len(),
    })?;
    if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
        return Err(TreeError::NegativeWeight { node });
    }
    Ok(weights)
}

/// Leaf weights may be raw sample counts or already fractions.
fn normalize(weights: [f64; NUM_CLASSES]) -> [f64; NUM_CLASSES] {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.map(|weight| weight / total)
    } else {
        [1.0 / NUM_CLASSES as f64; NUM_CLASSES]
    }
}
