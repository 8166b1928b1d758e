//! Pre-trained price model
//!
//! The model artifact is a JSON document carrying the column names the
//! estimator was trained on and the estimator itself:
//! - linear: intercept plus one coefficient per column
//! - tree_ensemble: boosted (summed) or bagged (averaged) regression trees

pub mod linear;
pub mod tree;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::features::FeatureFrame;
use crate::{HousePriceError, Result};

pub use linear::LinearRegressor;
pub use tree::{Aggregation, Node, Tree, TreeEnsemble};

/// A regression estimator over a fixed number of input columns
pub trait Regressor {
    /// Short name for logs and `model info`
    fn kind(&self) -> &'static str;

    /// Structural checks against the number of input columns
    fn validate(&self, n_features: usize) -> Result<()>;

    /// Predict one row; `row` has exactly the validated number of columns
    fn predict_row(&self, row: &[f64]) -> f64;
}

/// Anything that can turn a named-column table into one value per row
pub trait Inference {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl Estimator {
    fn as_regressor(&self) -> &dyn Regressor {
        match self {
            Estimator::Linear(m) => m,
            Estimator::TreeEnsemble(m) => m,
        }
    }
}

/// On-disk model layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,
    pub feature_names: Vec<String>,
    pub estimator: Estimator,
}

/// Loaded, validated model handle
///
/// Built once at startup and only ever read afterwards.
#[derive(Debug, Clone)]
pub struct Model {
    name: Option<String>,
    feature_names: Vec<String>,
    estimator: Estimator,
}

impl Model {
    /// Load and validate the model artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(HousePriceError::ModelNotFound(display));
        }

        let content = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|source| HousePriceError::ModelParse {
                path: display.clone(),
                source,
            })?;
        let model = Self::from_artifact(artifact)?;

        log::info!(
            "Loaded {} model from {} ({} columns)",
            model.kind(),
            display,
            model.feature_names.len()
        );
        Ok(model)
    }

    /// Parse a model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|source| HousePriceError::ModelParse {
                path: "<inline>".to_string(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    /// Validate an artifact and turn it into a model
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let ModelArtifact {
            name,
            feature_names,
            estimator,
        } = artifact;

        if feature_names.is_empty() {
            return Err(HousePriceError::InvalidModel(
                "model has no feature names".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &feature_names {
            if name.is_empty() {
                return Err(HousePriceError::InvalidModel(
                    "empty feature name".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(HousePriceError::InvalidModel(format!(
                    "duplicate feature name: {}",
                    name
                )));
            }
        }
        estimator.as_regressor().validate(feature_names.len())?;

        Ok(Model {
            name,
            feature_names,
            estimator,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &'static str {
        self.estimator.as_regressor().kind()
    }

    /// Column names the model was trained on, in order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Predict one value per row of `frame`
    ///
    /// The frame's columns must match the trained columns by name and order.
    pub fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        if frame.columns() != self.feature_names.as_slice() {
            return Err(HousePriceError::SchemaMismatch {
                expected: self.feature_names.clone(),
                actual: frame.columns().to_vec(),
            });
        }

        let regressor = self.estimator.as_regressor();
        Ok(frame
            .rows()
            .iter()
            .map(|row| regressor.predict_row(row))
            .collect())
    }
}

impl Inference for Model {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        Model::predict(self, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Column, FeatureRecord, PropertyInputs};
    use std::io::Write;

    fn linear_json(names: &[String], coefficients: &[f64], intercept: f64) -> String {
        serde_json::json!({
            "name": "test",
            "feature_names": names,
            "estimator": {
                "type": "linear",
                "intercept": intercept,
                "coefficients": coefficients,
            }
        })
        .to_string()
    }

    fn house_model() -> Model {
        let mut coefficients = vec![0.0; Column::COUNT];
        coefficients[2] = 10_000.0; // Bedrooms
        coefficients[6] = 1.0; // Capital_Value
        Model::from_json(&linear_json(&Column::names(), &coefficients, 5_000.0)).unwrap()
    }

    #[test]
    fn test_linear_model_predict() {
        let model = house_model();
        assert_eq!(model.kind(), "linear");
        assert_eq!(model.name(), Some("test"));

        let record = FeatureRecord::from_inputs(&PropertyInputs::default());
        let out = model.predict(&FeatureFrame::from_record(&record)).unwrap();
        assert_eq!(out, vec![5_000.0 + 30_000.0 + 1_000_000.0]);
    }

    #[test]
    fn test_predict_is_repeatable() {
        let model = house_model();
        let frame = FeatureFrame::from_record(&FeatureRecord::from_inputs(
            &PropertyInputs::default(),
        ));
        assert_eq!(model.predict(&frame).unwrap(), model.predict(&frame).unwrap());
    }

    #[test]
    fn test_schema_mismatch_order() {
        let mut names = Column::names();
        names.swap(0, 1);
        let model =
            Model::from_json(&linear_json(&names, &vec![1.0; Column::COUNT], 0.0)).unwrap();

        let frame = FeatureFrame::from_record(&FeatureRecord::from_inputs(
            &PropertyInputs::default(),
        ));
        let err = model.predict(&frame).unwrap_err();
        assert!(matches!(err, HousePriceError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_schema_mismatch_missing_column() {
        let names = vec!["Bedrooms".to_string()];
        let model = Model::from_json(&linear_json(&names, &[1.0], 0.0)).unwrap();
        let frame = FeatureFrame::from_record(&FeatureRecord::from_inputs(
            &PropertyInputs::default(),
        ));
        assert!(matches!(
            model.predict(&frame),
            Err(HousePriceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_tree_ensemble_from_json() {
        let json = serde_json::json!({
            "feature_names": ["Bedrooms", "Sea_View"],
            "estimator": {
                "type": "tree_ensemble",
                "base_score": 500000.0,
                "aggregation": "sum",
                "trees": [
                    {"nodes": [
                        {"feature": 0, "threshold": 3.5, "left": 1, "right": 2},
                        {"value": 0.0},
                        {"value": 100000.0}
                    ]},
                    {"nodes": [
                        {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                        {"value": -20000.0},
                        {"value": 250000.0}
                    ]}
                ]
            }
        })
        .to_string();
        let model = Model::from_json(&json).unwrap();
        assert_eq!(model.name(), None);

        let frame = FeatureFrame::new(
            vec!["Bedrooms".to_string(), "Sea_View".to_string()],
            vec![vec![4.0, 1.0], vec![2.0, 0.0]],
        )
        .unwrap();
        assert_eq!(model.predict(&frame).unwrap(), vec![850_000.0, 480_000.0]);
    }

    #[test]
    fn test_invalid_artifacts() {
        // coefficient count does not match columns
        let json = linear_json(&Column::names(), &[1.0, 2.0], 0.0);
        assert!(matches!(
            Model::from_json(&json),
            Err(HousePriceError::InvalidModel(_))
        ));

        let dup = vec!["Bedrooms".to_string(), "Bedrooms".to_string()];
        assert!(Model::from_json(&linear_json(&dup, &[1.0, 1.0], 0.0)).is_err());

        assert!(matches!(
            Model::from_json("{\"feature_names\": [\"a\"]}"),
            Err(HousePriceError::ModelParse { .. })
        ));
        assert!(matches!(
            Model::from_json("not json"),
            Err(HousePriceError::ModelParse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Model::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, HousePriceError::ModelNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = linear_json(&Column::names(), &vec![0.0; Column::COUNT], 42.0);
        file.write_all(json.as_bytes()).unwrap();

        let model = Model::load(file.path()).unwrap();
        assert_eq!(model.feature_names().len(), Column::COUNT);
    }

    #[test]
    fn test_load_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"feature_names\": [\"a\"], \"estimator\": {\"type\": \"svm\"}}")
            .unwrap();
        assert!(matches!(
            Model::load(file.path()),
            Err(HousePriceError::ModelParse { .. })
        ));
    }
}
