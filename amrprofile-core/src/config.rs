use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FEATURES_LIST_PATH, DEFAULT_MODEL_PATH};
use crate::types::AmrError;

/// Output format for rendered tables.
///
/// # Examples
///
/// ```rust
/// use amrprofile_core::config::{OutputFormat, ProfilerConfig};
///
/// let config = ProfilerConfig {
///     output_format: OutputFormat::Csv,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated values.
    #[default]
    Tsv,

    /// Comma-separated values.
    Csv,

    /// Column-aligned plain text, with a shape line under each table.
    Table,
}

impl FromStr for OutputFormat {
    type Err = AmrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "csv" => Ok(Self::Csv),
            "table" | "text" => Ok(Self::Table),
            other => Err(AmrError::InvalidConfig(format!(
                "unknown output format '{other}', expected tsv, csv or table"
            ))),
        }
    }
}

/// Serialization format of the classifier artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFormat {
    /// Tagged JSON document: logistic regression, decision tree or random forest.
    Json,

    /// Model file written by the `gbdt` crate.
    Gbdt,

    /// XGBoost text dump of a `binary:logistic` booster.
    XgboostDump,
}

impl ModelFormat {
    /// Guesses the format from a file extension, defaulting to [`ModelFormat::Json`].
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("gbdt" | "model") => Self::Gbdt,
            Some("dump" | "txt") => Self::XgboostDump,
            _ => Self::Json,
        }
    }
}

impl FromStr for ModelFormat {
    type Err = AmrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "gbdt" => Ok(Self::Gbdt),
            "xgboost-dump" | "xgboost" => Ok(Self::XgboostDump),
            other => Err(AmrError::InvalidConfig(format!(
                "unknown model format '{other}', expected json, gbdt or xgboost-dump"
            ))),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Gbdt => write!(f, "gbdt"),
            Self::XgboostDump => write!(f, "xgboost-dump"),
        }
    }
}

/// Configuration for a profiling run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use amrprofile_core::config::ProfilerConfig;
///
/// let config = ProfilerConfig::default();
/// assert_eq!(config.model_path.to_str(), Some("amr_predict_model.json"));
/// ```
///
/// ## Show every intermediate table, encode on four threads
///
/// ```rust
/// use amrprofile_core::config::ProfilerConfig;
///
/// let config = ProfilerConfig {
///     show_stages: true,
///     num_threads: Some(4),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Path of the serialized classifier.
    ///
    /// Read fresh on every prediction.
    ///
    /// **Default**: `amr_predict_model.json`
    pub model_path: PathBuf,

    /// Artifact format of `model_path`; `None` infers it from the extension.
    ///
    /// **Default**: `None`
    pub model_format: Option<ModelFormat>,

    /// CSV file whose header row lists the classifier's input columns in order.
    ///
    /// **Default**: `features_list.csv`
    pub features_list_path: PathBuf,

    /// **Default**: [`OutputFormat::Tsv`]
    pub output_format: OutputFormat,

    /// Also write the parsed records, the full feature table and the column
    /// subset before the predictions.
    ///
    /// **Default**: `false`
    pub show_stages: bool,

    /// Number of threads for descriptor computation. `None` computes
    /// sequentially on the calling thread.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,

    /// Suppress the run summary on stderr.
    ///
    /// **Default**: `false`
    pub quiet: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_format: None,
            features_list_path: PathBuf::from(DEFAULT_FEATURES_LIST_PATH),
            output_format: OutputFormat::Tsv,
            show_stages: false,
            num_threads: None,
            quiet: false,
        }
    }
}

impl ProfilerConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Fields that are missing or hold an invalid value keep their default
    /// and produce a warning.
    ///
    /// # Errors
    ///
    /// Returns [`AmrError::IoError`] if the file cannot be read and
    /// [`AmrError::JsonError`] if it is not a JSON document.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, AmrError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Same as [`Self::from_json_file`] for in-memory JSON.
    pub fn from_json_str(text: &str) -> Result<Self, AmrError> {
        let partial: serde_json::Value = serde_json::from_str(text)?;
        let mut config = Self::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                match partial.get(stringify!($field)) {
                    Some(val) => match serde_json::from_value(val.clone()) {
                        Ok(parsed) => config.$field = parsed,
                        Err(_) => warn!(
                            "Config: invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            config.$field
                        ),
                    },
                    None => log::debug!(
                        "Config: missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    ),
                }
            };
        }

        load_or_default!(model_path);
        load_or_default!(model_format);
        load_or_default!(features_list_path);
        load_or_default!(output_format);
        load_or_default!(show_stages);
        load_or_default!(num_threads);
        load_or_default!(quiet);

        config.validate()?;
        Ok(config)
    }

    /// Checks values that the type system cannot.
    pub fn validate(&self) -> Result<(), AmrError> {
        if self.num_threads == Some(0) {
            return Err(AmrError::InvalidConfig(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured model format, or the one implied by the model path.
    #[must_use]
    pub fn resolved_model_format(&self) -> ModelFormat {
        self.model_format
            .unwrap_or_else(|| ModelFormat::from_path(&self.model_path))
    }
}
