use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

// These are the core components from our shared library.
use glyco_helpers::{FEATURE_COUNT, FEATURES, Outcome};

use ndarray::{Array1, ArrayView1};
use serde::Deserialize;

/// Errors that can occur when loading or evaluating the screening model.
#[derive(Debug)]
pub enum ModelError {
    /// The artifact file could not be read.
    Io(std::io::Error),
    /// The artifact is not valid JSON for the expected layout.
    Malformed(serde_json::Error),
    /// The artifact carries the wrong number of coefficients or names.
    WrongDimension { expected: usize, found: usize },
    /// The artifact's feature names disagree with the trained order.
    FeatureOrder {
        index: usize,
        expected: &'static str,
        found: String,
    },
    /// The input vector does not match the model dimension.
    InputDimension { expected: usize, found: usize },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Io(err) => write!(f, "could not read model artifact: {}", err),
            ModelError::Malformed(err) => write!(f, "model artifact is not valid JSON: {}", err),
            ModelError::WrongDimension { expected, found } => write!(
                f,
                "model artifact has {} coefficients but {} features are expected",
                found, expected
            ),
            ModelError::FeatureOrder {
                index,
                expected,
                found,
            } => write!(
                f,
                "model artifact feature {} is '{}' but '{}' was trained at that position",
                index, found, expected
            ),
            ModelError::InputDimension { expected, found } => write!(
                f,
                "input vector has {} values but the model expects {}",
                found, expected
            ),
        }
    }
}

impl Error for ModelError {}

/// On-disk form of the pre-trained model: one coefficient per feature in
/// trained order, plus the intercept.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// A pre-fitted logistic-regression classifier over the eight intake
/// measurements.
///
/// The model is trained elsewhere and loaded once at startup; this crate only
/// evaluates it. Prediction thresholds the class probability at 0.5.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Array1<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Creates a model from already-validated coefficients.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::WrongDimension` if the coefficient count does not
    /// match the feature schema.
    pub fn new(weights: Array1<f64>, intercept: f64) -> Result<Self, ModelError> {
        if weights.len() != FEATURE_COUNT {
            return Err(ModelError::WrongDimension {
                expected: FEATURE_COUNT,
                found: weights.len(),
            });
        }
        Ok(Self { weights, intercept })
    }

    /// Loads and validates a serialized artifact.
    ///
    /// The artifact must carry exactly one coefficient per schema feature,
    /// with feature names in trained order. Anything else is rejected so a
    /// mismatched artifact cannot silently scramble the inputs.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path).map_err(ModelError::Io)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(ModelError::Malformed)?;

        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::WrongDimension {
                expected: FEATURE_COUNT,
                found: artifact.coefficients.len(),
            });
        }
        if artifact.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::WrongDimension {
                expected: FEATURE_COUNT,
                found: artifact.feature_names.len(),
            });
        }
        for (index, (found, field)) in artifact
            .feature_names
            .iter()
            .zip(FEATURES.iter())
            .enumerate()
        {
            if found != field.name {
                return Err(ModelError::FeatureOrder {
                    index,
                    expected: field.name,
                    found: found.clone(),
                });
            }
        }

        LogisticModel::new(Array1::from(artifact.coefficients), artifact.intercept)
    }

    /// Probability that the measurements indicate diabetes.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InputDimension` if the vector length does not
    /// match the model.
    pub fn probability(&self, features: ArrayView1<f64>) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::InputDimension {
                expected: self.weights.len(),
                found: features.len(),
            });
        }
        Ok(sigmoid(self.weights.dot(&features) + self.intercept))
    }

    /// Predicts the screening label for one feature vector in trained order.
    pub fn predict(&self, features: ArrayView1<f64>) -> Result<Outcome, ModelError> {
        let probability = self.probability(features)?;
        if probability >= 0.5 {
            Ok(Outcome::Diabetic)
        } else {
            Ok(Outcome::Normal)
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::io::Write;

    fn unit_model() -> LogisticModel {
        // Only glucose carries weight; the rest is ignored.
        LogisticModel::new(array![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], -100.0).unwrap()
    }

    fn write_artifact(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("model.json");
        let mut file = std::fs::File::create(&path).expect("create artifact");
        file.write_all(body.as_bytes()).expect("write artifact");
        path
    }

    fn valid_artifact_json() -> String {
        let names: Vec<String> = FEATURES
            .iter()
            .map(|field| format!("\"{}\"", field.name))
            .collect();
        format!(
            "{{\"feature_names\":[{}],\"coefficients\":[0.0,1.0,0.0,0.0,0.0,0.0,0.0,0.0],\"intercept\":-100.0}}",
            names.join(",")
        )
    }

    #[test]
    fn probability_is_sigmoid_of_dot_product() {
        let model = unit_model();
        // z = 100 - 100 = 0 -> probability exactly one half.
        let p = model
            .probability(array![0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0].view())
            .unwrap();
        assert_abs_diff_eq!(p, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn predict_thresholds_at_one_half() {
        let model = unit_model();
        let high = array![0.0, 150.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let low = array![0.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(model.predict(high.view()).unwrap(), Outcome::Diabetic);
        assert_eq!(model.predict(low.view()).unwrap(), Outcome::Normal);
        // The boundary itself counts as detected.
        let boundary = array![0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(model.predict(boundary.view()).unwrap(), Outcome::Diabetic);
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let result = LogisticModel::new(array![1.0, 2.0, 3.0], 0.0);
        assert!(matches!(
            result,
            Err(ModelError::WrongDimension {
                expected: FEATURE_COUNT,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_input_dimension_mismatch() {
        let model = unit_model();
        let result = model.predict(array![1.0, 2.0].view());
        assert!(matches!(
            result,
            Err(ModelError::InputDimension {
                expected: FEATURE_COUNT,
                found: 2
            })
        ));
    }

    #[test]
    fn loads_valid_artifact() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = write_artifact(dir.path(), &valid_artifact_json());
        let model = LogisticModel::from_path(&path).expect("load");
        let high = array![0.0, 150.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(model.predict(high.view()).unwrap(), Outcome::Diabetic);
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let result = LogisticModel::from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ModelError::Io(_))));
    }

    #[test]
    fn garbage_artifact_is_malformed() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = write_artifact(dir.path(), "not json at all");
        let result = LogisticModel::from_path(&path);
        assert!(matches!(result, Err(ModelError::Malformed(_))));
    }

    #[test]
    fn rejects_artifact_with_seven_coefficients() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let body = valid_artifact_json().replace(",0.0]", "]");
        let path = write_artifact(dir.path(), &body);
        let result = LogisticModel::from_path(&path);
        assert!(matches!(
            result,
            Err(ModelError::WrongDimension { found: 7, .. })
        ));
    }

    #[test]
    fn rejects_artifact_with_shuffled_feature_names() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let body = valid_artifact_json().replace("\"Pregnancies\"", "\"Age\"");
        let path = write_artifact(dir.path(), &body);
        let result = LogisticModel::from_path(&path);
        assert!(matches!(
            result,
            Err(ModelError::FeatureOrder { index: 0, .. })
        ));
    }
}
