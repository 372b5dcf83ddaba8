use std::{collections::BTreeMap, path::Path};

use chargecast_evaluator::{
    ChargeRegressor,
    feature::FeatureColumn,
    regressor::{LinearRegressor, ModelLoadError, TreeEnsembleRegressor, TreeNode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

/// Charge model artifact.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChargeModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub regressor: RegressorSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegressorSpec {
    Linear {
        intercept: f64,
        coefficients: BTreeMap<String, f64>,
    },
    TreeEnsemble {
        base_score: f64,
        trees: Vec<TreeSpec>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    Split {
        column: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

impl RegressorSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            RegressorSpec::Linear { .. } => "linear",
            RegressorSpec::TreeEnsemble { .. } => "tree_ensemble",
        }
    }
}

impl NodeSpec {
    fn to_node(&self) -> Result<TreeNode, ModelLoadError> {
        let node = match self {
            NodeSpec::Split {
                column,
                threshold,
                left,
                right,
            } => TreeNode::Split {
                column: FeatureColumn::from_name(column)?,
                threshold: *threshold,
                left: *left,
                right: *right,
            },
            NodeSpec::Leaf(value) => TreeNode::Leaf(*value),
        };
        Ok(node)
    }
}

impl ChargeModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let model: Self = util::read_json_file("charge model", path)?;
        tracing::info!(
            path = %path.display(),
            name = %model.name,
            kind = model.regressor.kind(),
            trained_at = %model.trained_at,
            "loaded charge model"
        );
        Ok(model)
    }

    /// Builds the regressor, checking that it speaks the model input schema.
    pub fn to_regressor(&self) -> Result<Box<dyn ChargeRegressor>, ModelLoadError> {
        let regressor: Box<dyn ChargeRegressor> = match &self.regressor {
            RegressorSpec::Linear {
                intercept,
                coefficients,
            } => Box::new(LinearRegressor::from_named(
                *intercept,
                coefficients.iter().map(|(name, c)| (name.as_str(), *c)),
            )?),
            RegressorSpec::TreeEnsemble { base_score, trees } => {
                let trees = trees
                    .iter()
                    .map(|tree| tree.nodes.iter().map(NodeSpec::to_node).collect())
                    .collect::<Result<Vec<Vec<_>>, _>>()?;
                let tree_count = trees.len();
                let ensemble = TreeEnsembleRegressor::new(*base_score, trees)?;
                tracing::debug!(
                    trees = tree_count,
                    columns = ?ensemble.used_columns(),
                    "built tree ensemble"
                );
                Box::new(ensemble)
            }
        };
        Ok(regressor)
    }
}

#[cfg(test)]
mod tests {
    use chargecast_evaluator::feature::FeatureVector;

    use super::*;

    fn features() -> FeatureVector {
        FeatureVector {
            smoker: 1,
            age: 30,
            bmi: 27.5,
            age_category_young_adult: 0,
            age_category_early_adulthood: 1,
            bmi_category_over_weight: 1,
            bmi_category_obese: 0,
            children_str_0: 0,
        }
    }

    #[test]
    fn test_parse_linear_model() {
        let model: ChargeModel = serde_json::from_str(
            r#"{
                "name": "unit",
                "trained_at": "2024-05-01T00:00:00Z",
                "regressor": {
                    "type": "linear",
                    "intercept": 100.0,
                    "coefficients": {
                        "smoker": 1000.0,
                        "age": 10.0,
                        "bmi": 2.0,
                        "age_category_young_adult": 0.0,
                        "age_category_early_adulthood": 0.0,
                        "bmi_category_over_weight": 0.0,
                        "bmi_category_obese": 0.0,
                        "children_str_0": 0.0
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(model.regressor.kind(), "linear");
        let regressor = model.to_regressor().unwrap();
        assert!((regressor.predict(&features()) - 1455.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_model_with_extra_column_is_rejected() {
        let model: ChargeModel = serde_json::from_str(
            r#"{
                "name": "unit",
                "trained_at": "2024-05-01T00:00:00Z",
                "regressor": {
                    "type": "linear",
                    "intercept": 0.0,
                    "coefficients": { "smoker": 1.0, "region_southeast": 2.0 }
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(
            model.to_regressor(),
            Err(ModelLoadError::UnknownColumn { name }) if name == "region_southeast"
        ));
    }

    #[test]
    fn test_parse_tree_ensemble() {
        let model: ChargeModel = serde_json::from_str(
            r#"{
                "name": "trees",
                "trained_at": "2024-05-01T00:00:00Z",
                "regressor": {
                    "type": "tree_ensemble",
                    "base_score": 13000.0,
                    "trees": [
                        { "nodes": [
                            { "split": { "column": "smoker", "threshold": 0.5, "left": 1, "right": 2 } },
                            { "leaf": -4000.0 },
                            { "leaf": 18000.0 }
                        ] }
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(model.regressor.kind(), "tree_ensemble");
        let regressor = model.to_regressor().unwrap();
        assert!((regressor.predict(&features()) - 31000.0).abs() < 1e-9);
    }

    #[test]
    fn test_tree_with_unknown_column_is_rejected() {
        let model = ChargeModel {
            name: "bad".into(),
            trained_at: DateTime::<Utc>::UNIX_EPOCH,
            regressor: RegressorSpec::TreeEnsemble {
                base_score: 0.0,
                trees: vec![TreeSpec {
                    nodes: vec![
                        NodeSpec::Split {
                            column: "sex_male".into(),
                            threshold: 0.5,
                            left: 1,
                            right: 2,
                        },
                        NodeSpec::Leaf(0.0),
                        NodeSpec::Leaf(1.0),
                    ],
                }],
            },
        };
        assert!(matches!(
            model.to_regressor(),
            Err(ModelLoadError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_bundled_model_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/charges.json");
        let model = ChargeModel::open(path).unwrap();
        model.to_regressor().unwrap();
    }
}
