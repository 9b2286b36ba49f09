use std::path::Path;

use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use log::debug;

use crate::config::ModelFormat;
use crate::constants::DECISION_THRESHOLD;
use crate::table::FeatureTable;
use crate::types::AmrError;

use super::Classifier;

/// Objective used when reading XGBoost dumps.
const XGBOOST_OBJECTIVE: &str = "binary:logistic";

/// Gradient-boosted trees loaded through the `gbdt` crate.
///
/// Both native `gbdt` model files and XGBoost text dumps are supported. The
/// booster is expected to output a positive-class probability.
pub struct GbdtClassifier {
    model: GBDT,
    name: String,
    max_split_feature: Option<usize>,
}

impl GbdtClassifier {
    /// Wraps a fitted booster.
    ///
    /// # Errors
    ///
    /// [`AmrError::ModelLoad`] if the booster's trees cannot be inspected.
    pub fn from_model(model: GBDT, name: impl Into<String>) -> Result<Self, AmrError> {
        let max_split_feature = highest_split_feature(&model)?;
        Ok(Self {
            model,
            name: name.into(),
            max_split_feature,
        })
    }

    /// Highest feature index any tree splits on, if the booster has splits.
    #[must_use]
    pub fn max_split_feature(&self) -> Option<usize> {
        self.max_split_feature
    }

    fn check_width(&self, x: &FeatureTable) -> Result<(), AmrError> {
        match self.max_split_feature {
            Some(max) if max >= x.n_cols() => Err(AmrError::SchemaMismatch(format!(
                "booster splits on feature {} but the table has {} columns",
                max,
                x.n_cols()
            ))),
            _ => Ok(()),
        }
    }

    /// Loads a booster from `path`.
    ///
    /// # Errors
    ///
    /// [`AmrError::ModelLoad`] if the file cannot be read or decoded, or if
    /// `format` is not a gradient-boosting format.
    pub fn load(path: &Path, format: ModelFormat) -> Result<Self, AmrError> {
        let path_str = path.to_str().ok_or_else(|| {
            AmrError::ModelLoad(format!("model path {} is not valid UTF-8", path.display()))
        })?;

        let model = match format {
            ModelFormat::Gbdt => GBDT::load_model(path_str),
            ModelFormat::XgboostDump => GBDT::from_xgboost_dump(path_str, XGBOOST_OBJECTIVE),
            ModelFormat::Json => {
                return Err(AmrError::ModelLoad(
                    "JSON artifacts are not gradient-boosting models".to_string(),
                ));
            }
        }
        .map_err(|e| AmrError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        debug!("Loaded {} booster from {}", format, path.display());
        Self::from_model(model, format!("gbdt ({format})"))
    }

    /// Positive-class probability of each row.
    ///
    /// # Errors
    ///
    /// [`AmrError::SchemaMismatch`] if a tree splits on a column the table
    /// does not have.
    pub fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<f64>, AmrError> {
        self.check_width(x)?;
        if x.is_empty() {
            return Ok(Vec::new());
        }
        let mut data = DataVec::with_capacity(x.n_rows());
        for row in x.rows() {
            let features = row.iter().map(|&v| v as f32).collect();
            data.push(Data::new_training_data(features, 1.0, 0.0, None));
        }
        Ok(self
            .model
            .predict(&data)
            .into_iter()
            .map(f64::from)
            .collect())
    }
}

/// Split nodes are only reachable through the booster's serde form:
/// `trees[].tree.tree[].value.{is_leaf, feature_index}`.
fn highest_split_feature(model: &GBDT) -> Result<Option<usize>, AmrError> {
    let value = serde_json::to_value(model)
        .map_err(|e| AmrError::ModelLoad(format!("cannot inspect booster: {e}")))?;
    let trees = value["trees"].as_array().map(Vec::as_slice).unwrap_or_default();

    let mut max = None;
    for tree in trees {
        let nodes = tree["tree"]["tree"].as_array().map(Vec::as_slice).unwrap_or_default();
        for node in nodes {
            let split = &node["value"];
            if split["is_leaf"].as_bool().unwrap_or(true) {
                continue;
            }
            if let Some(index) = split["feature_index"].as_u64() {
                let index = index as usize;
                max = Some(max.map_or(index, |m: usize| m.max(index)));
            }
        }
    }
    Ok(max)
}

impl Classifier for GbdtClassifier {
    fn predict(&self, x: &FeatureTable) -> Result<Vec<u8>, AmrError> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| u8::from(p > DECISION_THRESHOLD))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdt::config::Config;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// One stump on feature 1: below 5.0 scores -2, otherwise +2.
    const STUMP_ON_SECOND_COLUMN: &str = r#"0.0
[{"nodeid": 0, "depth": 0, "split": "f1", "split_condition": 5.0,
  "yes": 1, "no": 2, "missing": 1,
  "children": [{"nodeid": 1, "leaf": -2.0}, {"nodeid": 2, "leaf": 2.0}]}]
"#;

    fn stump_booster() -> GbdtClassifier {
        let model = GBDT::from_xgboost_reader(Cursor::new(STUMP_ON_SECOND_COLUMN), XGBOOST_OBJECTIVE)
            .unwrap();
        GbdtClassifier::from_model(model, "stump").unwrap()
    }

    fn training_table() -> (FeatureTable, Vec<f32>) {
        let mut table = FeatureTable::new(vec!["W ".to_string(), "C ".to_string()]);
        let mut labels = Vec::new();
        for i in 0..20 {
            let w = i as f64;
            table.push_row(vec![w, 1.0]).unwrap();
            labels.push(if w >= 10.0 { 1.0 } else { -1.0 });
        }
        (table, labels)
    }

    fn train(table: &FeatureTable, labels: &[f32]) -> GBDT {
        let mut config = Config::new();
        config.set_feature_size(table.n_cols());
        config.set_max_depth(2);
        config.set_iterations(20);
        config.set_shrinkage(0.3);
        config.set_loss("LogLikelyhood");
        config.set_debug(false);
        config.set_training_optimization_level(2);

        let mut data = DataVec::new();
        for (row, &label) in table.rows().iter().zip(labels) {
            let features = row.iter().map(|&v| v as f32).collect();
            data.push(Data::new_training_data(features, 1.0, label, None));
        }

        let mut model = GBDT::new(&config);
        model.fit(&mut data);
        model
    }

    #[test]
    fn test_trained_booster_separates_classes() {
        let (table, labels) = training_table();
        let classifier = GbdtClassifier::from_model(train(&table, &labels), "test").unwrap();

        let predicted = classifier.predict(&table).unwrap();
        assert_eq!(predicted.len(), table.n_rows());
        assert_eq!(predicted[0], 0);
        assert_eq!(predicted[19], 1);
    }

    #[test]
    fn test_save_and_load_native_model() {
        let (table, labels) = training_table();
        let model = train(&table, &labels);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("booster.gbdt");
        model.save_model(path.to_str().unwrap()).unwrap();

        let original = GbdtClassifier::from_model(model, "original").unwrap();
        let loaded = GbdtClassifier::load(&path, ModelFormat::Gbdt).unwrap();
        assert_eq!(
            loaded.predict(&table).unwrap(),
            original.predict(&table).unwrap()
        );
        assert!(loaded.name().starts_with("gbdt"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = GbdtClassifier::load(Path::new("no_such_booster.gbdt"), ModelFormat::Gbdt);
        assert!(matches!(result, Err(AmrError::ModelLoad(_))));
    }

    #[test]
    fn test_empty_table_predicts_nothing() {
        let (table, labels) = training_table();
        let classifier = GbdtClassifier::from_model(train(&table, &labels), "test").unwrap();
        let empty = FeatureTable::new(table.columns().to_vec());
        assert!(classifier.predict(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_split_feature_recovered_from_trees() {
        let classifier = stump_booster();
        assert_eq!(classifier.max_split_feature(), Some(1));

        let (table, labels) = training_table();
        let trained = GbdtClassifier::from_model(train(&table, &labels), "test").unwrap();
        assert!(trained.max_split_feature().unwrap() < table.n_cols());
    }

    #[test]
    fn test_narrow_table_is_schema_mismatch() {
        let classifier = stump_booster();
        let mut narrow = FeatureTable::new(vec!["W ".to_string()]);
        narrow.push_row(vec![7.0]).unwrap();

        assert!(matches!(
            classifier.predict(&narrow),
            Err(AmrError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_xgboost_stump_probabilities() {
        let classifier = stump_booster();
        let mut table = FeatureTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![9.0, 1.0]).unwrap();
        table.push_row(vec![0.0, 8.0]).unwrap();

        let proba = classifier.predict_proba(&table).unwrap();
        let expected = 1.0 / (1.0 + 2.0_f64.exp());
        assert!((proba[0] - expected).abs() < 1e-6);
        assert!((proba[1] - (1.0 - expected)).abs() < 1e-6);
        assert_eq!(classifier.predict(&table).unwrap(), vec![0, 1]);
    }
}
