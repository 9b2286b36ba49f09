use serde::{Deserialize, Serialize};

use crate::constants::DECISION_THRESHOLD;
use crate::table::FeatureTable;
use crate::types::AmrError;

/// Binary logistic regression: `p = 1 / (1 + exp(-(w·x + b)))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Probability above which the positive class is predicted.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DECISION_THRESHOLD
}

impl LogisticRegression {
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    #[must_use]
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Positive-class probability of each row.
    pub fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<f64>, AmrError> {
        if x.n_cols() != self.n_features() {
            return Err(AmrError::SchemaMismatch(format!(
                "logistic regression expects {} features, table has {}",
                self.n_features(),
                x.n_cols()
            )));
        }
        Ok(x
            .rows()
            .iter()
            .map(|row| sigmoid(self.decision_function(row)))
            .collect())
    }

    pub fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities
            .into_iter()
            .map(|p| u8::from(p > self.threshold))
            .collect())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
