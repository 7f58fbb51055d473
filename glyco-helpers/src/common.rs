use ndarray::{Array1, array};

use crate::schema::FEATURE_COUNT;

/// One completed intake form: the eight measurements in trained order.
///
/// Pregnancies and Age are whole numbers; everything else is a real value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct Measurements {
    pub pregnancies: u32,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub pedigree: f64,
    pub age: u32,
}

impl Measurements {
    /// The feature vector the classifier consumes, in trained order.
    pub fn to_features(&self) -> Array1<f64> {
        array![
            self.pregnancies as f64,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.pedigree,
            self.age as f64,
        ]
    }

    /// Field values in schema order, for table rendering and charting.
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pregnancies as f64,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.pedigree,
            self.age as f64,
        ]
    }
}

impl Default for Measurements {
    /// The values the form opens with, matching the schema defaults.
    fn default() -> Self {
        Measurements {
            pregnancies: 0,
            glucose: 0.0,
            blood_pressure: 0.0,
            skin_thickness: 0.0,
            insulin: 0.0,
            bmi: 0.0,
            pedigree: 0.0,
            age: 1,
        }
    }
}
