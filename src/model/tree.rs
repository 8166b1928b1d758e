//! Regression tree ensembles (boosted or bagged)

use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::{HousePriceError, Result};

/// Tree node as stored in the artifact
///
/// Splits send `x[feature] < threshold` to `left` and everything else,
/// including NaN, to `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
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

/// A single regression tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Check the tree is a proper tree over `n_features` inputs
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![0usize];
        while let Some(id) = stack.pop() {
            if visited[id] {
                return Err(format!("node {} reached more than once", id));
            }
            visited[id] = true;

            match self.nodes[id] {
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has non-finite value", id));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} of {}",
                            id, feature, n_features
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {} has NaN threshold", id));
                    }
                    for (side, child) in [("left", left), ("right", right)] {
                        if child >= self.nodes.len() {
                            return Err(format!(
                                "node {} {} child {} out of bounds ({} nodes)",
                                id,
                                side,
                                child,
                                self.nodes.len()
                            ));
                        }
                        stack.push(child);
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[feature] < threshold { left } else { right };
                }
            }
        }
    }
}

/// How tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Gradient boosting: base_score + Σ leaves
    #[default]
    Sum,
    /// Random forest: base_score + mean of leaves
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<Tree>,
}

impl Regressor for TreeEnsemble {
    fn kind(&self) -> &'static str {
        match self.aggregation {
            Aggregation::Sum => "tree_ensemble (sum)",
            Aggregation::Mean => "tree_ensemble (mean)",
        }
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(HousePriceError::InvalidModel(
                "tree ensemble has no trees".to_string(),
            ));
        }
        if !self.base_score.is_finite() {
            return Err(HousePriceError::InvalidModel(
                "tree ensemble has non-finite base_score".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| HousePriceError::InvalidModel(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        match self.aggregation {
            Aggregation::Sum => self.base_score + total,
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
        }
    }
}
