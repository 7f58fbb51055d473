use glyco::Outcome;
use logistic::LogisticModel;
use ndarray::ArrayView1;
use std::error::Error;

/// The seam between the form and whatever produces the screening label.
///
/// The production implementation wraps the pre-trained logistic model; the
/// test suite swaps in [`FixedOutcome`] to pin the label.
pub trait Classifier: Send + Sync {
    /// Predict the outcome for a single feature vector in trained order.
    fn predict(&self, features: ArrayView1<f64>) -> Result<Outcome, Box<dyn Error + Send + Sync>>;

    /// Return the name of the classifier shown in the UI.
    fn name(&self) -> String;
}

/// Adapter around the pre-trained logistic-regression model.
pub struct LogisticAdapter {
    model: LogisticModel,
}

impl LogisticAdapter {
    pub fn new(model: LogisticModel) -> Self {
        Self { model }
    }
}

impl Classifier for LogisticAdapter {
    fn predict(&self, features: ArrayView1<f64>) -> Result<Outcome, Box<dyn Error + Send + Sync>> {
        self.model.predict(features).map_err(|e| e.into())
    }

    fn name(&self) -> String {
        "Logistic regression".to_string()
    }
}

/// Test double that ignores the input and returns a fixed label.
pub struct FixedOutcome(pub Outcome);

impl Classifier for FixedOutcome {
    fn predict(&self, _features: ArrayView1<f64>) -> Result<Outcome, Box<dyn Error + Send + Sync>> {
        Ok(self.0)
    }

    fn name(&self) -> String {
        format!("Fixed ({})", self.0)
    }
}
