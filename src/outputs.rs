use indexmap::IndexMap;

use crate::inference::Activation;
use crate::variable::Fuzzified;

/// Result of a successful defuzzification run.
#[derive(Clone, Debug)]
pub struct Outputs {
    variable: String,
    crisp_value: f64,
    activations: Vec<Activation>,
    centroids: IndexMap<String, f64>,
    fuzzified: Fuzzified,
}

impl Outputs {
    pub(crate) fn new(
        variable: String,
        crisp_value: f64,
        activations: Vec<Activation>,
        centroids: IndexMap<String, f64>,
        fuzzified: Fuzzified,
    ) -> Self {
        Self {
            variable,
            crisp_value,
            activations,
            centroids,
            fuzzified,
        }
    }

    /// Name of the output variable that was defuzzified.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The predicted value, rounded to one decimal place.
    pub fn crisp_value(&self) -> f64 {
        self.crisp_value
    }

    /// Activations that were weighed into the result.
    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    pub fn centroid(&self, set: &str) -> Option<f64> {
        self.centroids.get(set).copied()
    }

    pub fn fuzzified(&self) -> &Fuzzified {
        &self.fuzzified
    }
}
