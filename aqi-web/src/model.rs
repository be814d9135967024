//! Classifier adapter
//!
//! Wraps a pre-trained regression model behind the [`Predictor`] trait. The
//! model is exported to JSON ahead of time and loaded once at startup; a
//! missing or malformed file is fatal so the service never starts without a
//! working predictor.
//!
//! Two encodings are understood:
//!
//! ```json
//! {"kind": "linear", "intercept": 1.5, "coefficients": [0.8, 0.3, 0.1, 0.2, 4.0, 0.1]}
//! ```
//!
//! ```json
//! {"kind": "forest", "trees": [
//!   {"nodes": [
//!     {"feature": 0, "threshold": 17.5, "left": 1, "right": 2},
//!     {"value": 55.0},
//!     {"value": 75.0}
//!   ]}
//! ]}
//! ```
//!
//! Forest nodes are stored flat with node 0 as the root. A split sends the
//! input left when `x[feature] <= threshold`. Child indices must be greater
//! than their parent's index, which rules out cycles.

use aqi_common::{Error, Pollutants, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Number of model input features (pm25, pm10, o3, no2, co, so2)
pub const FEATURE_COUNT: usize = 6;

/// Black-box AQI regressor
///
/// Implementations must be deterministic and side-effect free.
pub trait Predictor: Send + Sync {
    fn predict(&self, input: &Pollutants) -> f64;
}

/// Regression model deserialized from disk
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Forest {
        trees: Vec<DecisionTree>,
    },
}

/// One regression tree of a forest
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl RegressionModel {
    /// Load and validate a model file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&content)
            .map_err(|e| Error::ModelUnavailable(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded {} model from {}",
            model.kind(),
            path.display()
        );
        Ok(model)
    }

    /// Parse and validate a JSON-encoded model
    pub fn from_json(json: &str) -> Result<Self> {
        let model: RegressionModel = serde_json::from_str(json)
            .map_err(|e| Error::ModelUnavailable(format!("malformed model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RegressionModel::Linear { .. } => "linear",
            RegressionModel::Forest { .. } => "forest",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            RegressionModel::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(Error::ModelUnavailable(format!(
                        "linear model needs {} coefficients, found {}",
                        FEATURE_COUNT,
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(Error::ModelUnavailable(
                        "linear model has non-finite parameters".to_string(),
                    ));
                }
                Ok(())
            }
            RegressionModel::Forest { trees } => {
                if trees.is_empty() {
                    return Err(Error::ModelUnavailable("forest has no trees".to_string()));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate()
                        .map_err(|msg| Error::ModelUnavailable(format!("tree {}: {}", i, msg)))?;
                }
                Ok(())
            }
        }
    }
}

impl DecisionTree {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!("node {} splits on unknown feature {}", index, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has non-finite threshold", index));
                    }
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", index, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has non-finite value", index));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl Predictor for RegressionModel {
    fn predict(&self, input: &Pollutants) -> f64 {
        let features = input.features();
        match self {
            RegressionModel::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features.iter())
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            RegressionModel::Forest { trees } => {
                let total: f64 = trees.iter().map(|t| t.predict(&features)).sum();
                total / trees.len() as f64
            }
        }
    }
}
