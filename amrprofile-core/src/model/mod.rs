//! Binary resistance classifiers and artifact loading.
//!
//! A classifier maps every row of a [`FeatureTable`] to a raw label, `1` for
//! resistant and `0` for sensitive. Artifacts come in two families:
//!
//! - a JSON document tagged by `kind` (`logistic_regression`,
//!   `decision_tree` or `random_forest`), optionally listing the feature
//!   names the model was trained on
//! - gradient-boosted trees, either native `gbdt` files or XGBoost dumps
//!
//! ```json
//! {
//!   "kind": "logistic_regression",
//!   "feature_names": ["W ", "C "],
//!   "coefficients": [0.8, -0.1],
//!   "intercept": -2.0
//! }
//! ```

pub mod boosting;
pub mod linear;
pub mod tree;

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::ModelFormat;
use crate::table::FeatureTable;
use crate::types::AmrError;

pub use boosting::GbdtClassifier;
pub use linear::LogisticRegression;
pub use tree::{DecisionTree, RandomForest};

/// A trained binary classifier over feature tables.
pub trait Classifier {
    /// One raw label per row of `x`, in row order.
    fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError>;

    /// Short human-readable model description.
    fn name(&self) -> &str;
}

/// Model families that serialize to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ModelKind {
    fn validate(&self) -> Result<(), AmrError> {
        match self {
            Self::LogisticRegression(model) if model.coefficients.is_empty() => Err(
                AmrError::ModelLoad("logistic regression has no coefficients".to_string()),
            ),
            Self::LogisticRegression(_) => Ok(()),
            Self::DecisionTree(tree) => tree.validate(),
            Self::RandomForest(forest) => forest.validate(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::DecisionTree(_) => "decision_tree",
            Self::RandomForest(_) => "random_forest",
        }
    }
}

/// On-disk JSON model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Ordered input columns the model was trained on, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelKind,
}

/// Classifier backed by a [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct JsonClassifier {
    artifact: ModelArtifact,
}

impl JsonClassifier {
    /// Wraps an artifact after checking its structure.
    pub fn new(artifact: ModelArtifact) -> Result<Self, AmrError> {
        artifact.model.validate()?;
        if let Some(names) = &artifact.feature_names {
            let expected = match &artifact.model {
                ModelKind::LogisticRegression(model) => Some(model.n_features()),
                _ => None,
            };
            if let Some(expected) = expected.filter(|&n| n != names.len()) {
                return Err(AmrError::ModelLoad(format!(
                    "artifact lists {} feature names for {} coefficients",
                    names.len(),
                    expected
                )));
            }
        }
        Ok(Self { artifact })
    }

    pub fn from_json_str(text: &str) -> Result<Self, AmrError> {
        let artifact: ModelArtifact = serde_json::from_str(text)
            .map_err(|e| AmrError::ModelLoad(format!("invalid model document: {e}")))?;
        Self::new(artifact)
    }

    #[must_use]
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    fn check_feature_names(&self, x: &FeatureTable) -> Result<(), AmrError> {
        match &self.artifact.feature_names {
            Some(names) if names.as_slice() != x.columns() => {
                Err(AmrError::SchemaMismatch(format!(
                    "model was trained on columns {:?} but received {:?}",
                    names,
                    x.columns()
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Classifier for JsonClassifier {
    fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError> {
        self.check_feature_names(x)?;
        match &self.artifact.model {
            ModelKind::LogisticRegression(model) => model.predict(x),
            ModelKind::DecisionTree(tree) => tree.predict(x),
            ModelKind::RandomForest(forest) => forest.predict(x),
        }
    }

    fn name(&self) -> &str {
        self.artifact.model.kind_name()
    }
}

/// Reads and decodes the classifier at `path`.
///
/// # Errors
///
/// [`AmrError::ModelLoad`] if the file is missing, unreadable or malformed.
pub fn load_model(path: &Path, format: ModelFormat) -> Result<Box<dyn Classifier>, AmrError> {
    debug!("Loading {} model from {}", format, path.display());
    let classifier: Box<dyn Classifier> = match format {
        ModelFormat::Json => {
            let text = fs::read_to_string(path).map_err(|e| {
                AmrError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
            })?;
            Box::new(JsonClassifier::from_json_str(&text)?)
        }
        ModelFormat::Gbdt | ModelFormat::XgboostDump => {
            Box::new(GbdtClassifier::load(path, format)?)
        }
    };
    info!("Loaded {} classifier from {}", classifier.name(), path.display());
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn table(columns: &[&str], rows: &[&[f64]]) -> FeatureTable {
        let mut table = FeatureTable::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(row.to_vec()).unwrap();
        }
        table
    }

    const LOGISTIC: &str = r#"{
        "kind": "logistic_regression",
        "feature_names": ["W ", "C "],
        "coefficients": [1.0, 0.0],
        "intercept": -5.0
    }"#;

    #[test]
    fn test_logistic_artifact() {
        let classifier = JsonClassifier::from_json_str(LOGISTIC).unwrap();
        assert_eq!(classifier.name(), "logistic_regression");

        let x = table(&["W ", "C "], &[&[10.0, 0.0], &[0.0, 3.0]]);
        assert_eq!(classifier.predict(&x).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_feature_names_must_match_columns() {
        let classifier = JsonClassifier::from_json_str(LOGISTIC).unwrap();
        let x = table(&["C ", "W "], &[&[0.0, 10.0]]);
        assert!(matches!(
            classifier.predict(&x),
            Err(AmrError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_feature_name_count_checked_at_load() {
        let text = r#"{"kind": "logistic_regression", "feature_names": ["a"],
                       "coefficients": [1.0, 2.0], "intercept": 0.0}"#;
        assert!(matches!(
            JsonClassifier::from_json_str(text),
            Err(AmrError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_random_forest_artifact() {
        let text = r#"{
            "kind": "random_forest",
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[3.0, 3.0], [3.0, 0.0], [0.0, 3.0]]
            }]
        }"#;
        let classifier = JsonClassifier::from_json_str(text).unwrap();
        assert_eq!(classifier.name(), "random_forest");
        assert!(classifier.artifact().feature_names.is_none());

        let x = table(&["x"], &[&[0.0], &[1.0]]);
        assert_eq!(classifier.predict(&x).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_unknown_kind() {
        let result = JsonClassifier::from_json_str(r#"{"kind": "svm", "support": []}"#);
        assert!(matches!(result, Err(AmrError::ModelLoad(_))));
    }

    #[test]
    fn test_artifact_serializes_with_kind_tag() {
        let artifact = ModelArtifact {
            feature_names: None,
            model: ModelKind::LogisticRegression(LogisticRegression {
                coefficients: vec![0.5],
                intercept: 0.0,
                threshold: 0.5,
            }),
        };
        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["kind"], "logistic_regression");
        assert!(value.get("feature_names").is_none());
    }

    #[test]
    fn test_load_model_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", LOGISTIC).unwrap();

        let classifier = load_model(file.path(), ModelFormat::Json).unwrap();
        let x = table(&["W ", "C "], &[&[6.0, 0.0]]);
        assert_eq!(classifier.predict(&x).unwrap(), vec![1]);
    }

    #[test]
    fn test_load_model_missing_file() {
        let result = load_model(Path::new("no_such_model.json"), ModelFormat::Json);
        assert!(matches!(result, Err(AmrError::ModelLoad(_))));
    }

    #[test]
    fn test_load_xgboost_dump() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"0.0
[{{"nodeid": 0, "depth": 0, "split": "f0", "split_condition": 5.0,
   "yes": 1, "no": 2, "missing": 1,
   "children": [{{"nodeid": 1, "leaf": -1.0}}, {{"nodeid": 2, "leaf": 1.0}}]}}]
"#
        )
        .unwrap();

        let classifier = load_model(file.path(), ModelFormat::XgboostDump).unwrap();
        assert_eq!(classifier.name(), "gbdt (xgboost-dump)");

        let x = table(&["W ", "C "], &[&[27.8, 0.0], &[0.0, 3.0], &[5.0, 1.0]]);
        assert_eq!(classifier.predict(&x).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn test_load_xgboost_dump_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "0.0\n[{{\"nodeid\": 0, \"split\": \"f0\"}}]\n").unwrap();
        let result = load_model(file.path(), ModelFormat::XgboostDump);
        assert!(matches!(result, Err(AmrError::ModelLoad(_))));
    }

    #[test]
    fn test_load_model_not_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{80}\u{04}binary model").unwrap();
        let result = load_model(file.path(), ModelFormat::Json);
        assert!(matches!(result, Err(AmrError::ModelLoad(_))));
    }
}
