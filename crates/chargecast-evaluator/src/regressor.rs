//! Regression models over [`FeatureVector`]s.
//!
//! Two model families are supported:
//!
//! - [`LinearRegressor`] - `intercept + Σ(coefᵢ × xᵢ)` over the eight columns.
//! - [`TreeEnsembleRegressor`] - `base_score + Σ leaf(treeₖ)` over binary regression
//!   trees whose splits compare one column against a threshold.
//!
//! Both are addressed by column name when built from an artifact, so constructors
//! validate that the model speaks exactly the [`FeatureColumn`] schema.

use std::{collections::BTreeSet, fmt, iter};

use crate::feature::{FeatureColumn, FeatureVector};

/// Scores feature vectors.
pub trait ChargeRegressor: fmt::Debug + Send + Sync {
    /// Predicted charges for one row.
    fn predict(&self, features: &FeatureVector) -> f64;
}

impl<R> ChargeRegressor for Box<R>
where
    R: ChargeRegressor + ?Sized,
{
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.as_ref().predict(features)
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ModelLoadError {
    #[display("unknown feature column '{name}'")]
    UnknownColumn { name: String },
    #[display("feature column '{column}' is missing from the model")]
    MissingColumn { column: FeatureColumn },
    #[display("feature column '{column}' is specified more than once")]
    DuplicateColumn { column: FeatureColumn },
    #[display("tree {tree} has no nodes")]
    EmptyTree { tree: usize },
    #[display("tree {tree} node {node} points to node {child}, which is not after it in 0..{len}")]
    InvalidChild {
        tree: usize,
        node: usize,
        child: usize,
        len: usize,
    },
}

/// Linear model: `intercept + Σ(coefᵢ × xᵢ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: [f64; FeatureColumn::COUNT],
}

impl LinearRegressor {
    /// Creates a linear model with coefficients in [`FeatureColumn::ALL`] order.
    #[must_use]
    pub fn new(intercept: f64, coefficients: [f64; FeatureColumn::COUNT]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Creates a linear model from `(column name, coefficient)` pairs.
    ///
    /// Every column must appear exactly once.
    pub fn from_named<'a, I>(intercept: f64, coefficients: I) -> Result<Self, ModelLoadError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [None; FeatureColumn::COUNT];
        for (name, coefficient) in coefficients {
            let column = FeatureColumn::from_name(name)?;
            let slot = &mut values[column.index()];
            if slot.is_some() {
                return Err(ModelLoadError::DuplicateColumn { column });
            }
            *slot = Some(coefficient);
        }

        let mut resolved = [0.0; FeatureColumn::COUNT];
        for (column, (dst, src)) in iter::zip(FeatureColumn::ALL, iter::zip(&mut resolved, values))
        {
            *dst = src.ok_or(ModelLoadError::MissingColumn { column })?;
        }
        Ok(Self::new(intercept, resolved))
    }
}

impl ChargeRegressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + iter::zip(self.coefficients, features.values())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeNode {
    /// Goes to `left` when the column value is below `threshold`, otherwise `right`.
    Split {
        column: FeatureColumn,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// Binary regression tree rooted at node 0.
///
/// Children always have a larger index than their parent, so traversal terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn new(tree: usize, nodes: Vec<TreeNode>) -> Result<Self, ModelLoadError> {
        if nodes.is_empty() {
            return Err(ModelLoadError::EmptyTree { tree });
        }
        let len = nodes.len();
        for (node, n) in nodes.iter().enumerate() {
            if let TreeNode::Split { left, right, .. } = *n {
                for child in [left, right] {
                    if child <= node || child >= len {
                        return Err(ModelLoadError::InvalidChild {
                            tree,
                            node,
                            child,
                            len,
                        });
                    }
                }
            }
        }
        Ok(Self { nodes })
    }

    #[must_use]
    pub fn leaf_value(&self, features: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf(value) => return value,
                TreeNode::Split {
                    column,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features.get(column) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Columns referenced by any split.
    fn split_columns(&self) -> impl Iterator<Item = FeatureColumn> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            TreeNode::Split { column, .. } => Some(*column),
            TreeNode::Leaf(_) => None,
        })
    }
}

/// Additive ensemble of regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsembleRegressor {
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl TreeEnsembleRegressor {
    /// Builds an ensemble, validating each tree's node graph.
    pub fn new<I>(base_score: f64, trees: I) -> Result<Self, ModelLoadError>
    where
        I: IntoIterator<Item = Vec<TreeNode>>,
    {
        let trees = trees
            .into_iter()
            .enumerate()
            .map(|(i, nodes)| RegressionTree::new(i, nodes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base_score, trees })
    }

    /// Distinct columns the ensemble actually splits on.
    #[must_use]
    pub fn used_columns(&self) -> BTreeSet<FeatureColumn> {
        self.trees.iter().flat_map(RegressionTree::split_columns).collect()
    }
}

impl ChargeRegressor for TreeEnsembleRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.base_score
            + self
                .trees
                .iter()
                .map(|tree| tree.leaf_value(features))
                .sum::<f64>()
    }
}
