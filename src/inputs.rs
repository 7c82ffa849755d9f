use std::collections::HashMap;

/// Crisp readings for a run, keyed by variable name.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, variable: impl Into<String>, val: f64) {
        self.0.insert(variable.into(), val);
    }

    /// The crisp value for `variable`, or `0.0` when none was given.
    pub fn get(&self, variable: &str) -> f64 {
        self.0.get(variable).copied().unwrap_or(0.)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[test]
fn test_missing_input_defaults_to_zero() {
    let mut inputs = Inputs::new();

    inputs.add("temperature", 21.5);

    assert_eq!(inputs.get("temperature"), 21.5);
    assert_eq!(inputs.get("humidity"), 0.);
}
