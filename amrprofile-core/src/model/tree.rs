use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DECISION_THRESHOLD;
use crate::table::FeatureTable;
use crate::types::AmrError;

/// Child index marking a leaf node.
pub const TREE_LEAF: i64 = -1;

/// Binary decision tree in flat node-array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise a row goes
/// left when `row[feature[i]] <= threshold[i]`. `value[i]` holds the
/// (sensitive, resistant) class weights reaching the node.
///
/// `value` also deserializes from scikit-learn's `tree_.value.tolist()`,
/// which nests each node's weights under a single-output axis
/// (`[[[w0, w1]], ...]`). It is always serialized flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    #[serde(deserialize_with = "deserialize_node_values")]
    pub value: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeValue {
    Flat(Vec<f64>),
    PerOutput(Vec<Vec<f64>>),
}

fn deserialize_node_values<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<NodeValue>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(node, value)| match value {
            NodeValue::Flat(weights) => Ok(weights),
            NodeValue::PerOutput(mut outputs) if outputs.len() == 1 => Ok(outputs.remove(0)),
            NodeValue::PerOutput(outputs) => Err(serde::de::Error::custom(format!(
                "node {node} has {} outputs, expected one",
                outputs.len()
            ))),
        })
        .collect()
}

impl DecisionTree {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Checks array lengths and node links.
    ///
    /// Children must point forward (`child > parent`), which rules out cycles.
    pub fn validate(&self) -> Result<(), AmrError> {
        let n = self.node_count();
        if n == 0 {
            return Err(AmrError::ModelLoad("decision tree has no nodes".to_string()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(AmrError::ModelLoad(format!(
                "decision tree node arrays differ in length (expected {n})"
            )));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == TREE_LEAF {
                let weights = &self.value[node];
                if weights.len() != 2
                    || weights.iter().any(|&w| w < 0.0)
                    || weights.iter().sum::<f64>() <= 0.0
                {
                    return Err(AmrError::ModelLoad(format!(
                        "leaf {node} must hold two non-negative class weights with a positive sum"
                    )));
                }
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(AmrError::ModelLoad(format!(
                        "node {node} links to invalid child {child}"
                    )));
                }
            }
            if self.feature[node] < 0 {
                return Err(AmrError::ModelLoad(format!(
                    "split node {node} has negative feature index"
                )));
            }
        }
        Ok(())
    }

    /// Highest feature index used by a split, if any.
    #[must_use]
    pub fn max_feature(&self) -> Option<usize> {
        (0..self.node_count())
            .filter(|&i| self.children_left[i] != TREE_LEAF)
            .map(|i| self.feature[i] as usize)
            .max()
    }

    /// Resistant-class probability of one row. Assumes [`Self::validate`] passed.
    #[must_use]
    pub fn predict_proba_row(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let next = if row[self.feature[node] as usize] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
        }
        let weights = &self.value[node];
        weights[1] / (weights[0] + weights[1])
    }

    fn check_width(&self, x: &FeatureTable) -> Result<(), AmrError> {
        match self.max_feature() {
            Some(max) if max >= x.n_cols() => Err(AmrError::SchemaMismatch(format!(
                "tree splits on feature {} but the table has {} columns",
                max,
                x.n_cols()
            ))),
            _ => Ok(()),
        }
    }

    pub fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<f64>, AmrError> {
        self.check_width(x)?;
        Ok(x.rows().iter().map(|row| self.predict_proba_row(row)).collect())
    }

    pub fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError> {
        Ok(to_labels(&self.predict_proba(x)?))
    }
}

/// Ensemble of decision trees whose class probabilities are averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), AmrError> {
        if self.trees.is_empty() {
            return Err(AmrError::ModelLoad("random forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| AmrError::ModelLoad(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }

    pub fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<f64>, AmrError> {
        for tree in &self.trees {
            tree.check_width(x)?;
        }
        let n_trees = self.trees.len() as f64;
        Ok(x
            .rows()
            .iter()
            .map(|row| {
                self.trees
                    .iter()
                    .map(|tree| tree.predict_proba_row(row))
                    .sum::<f64>()
                    / n_trees
            })
            .collect())
    }

    pub fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError> {
        Ok(to_labels(&self.predict_proba(x)?))
    }
}

fn to_labels(probabilities: &[f64]) -> Vec<u8> {
    probabilities
        .iter()
        .map(|&p| u8::from(p > DECISION_THRESHOLD))
        .collect()
}
