use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::error::{FuzzyError, Result};
use crate::inference::{Activation, Inference};
use crate::inputs::Inputs;
use crate::membership::{MembershipFunction, Shape};
use crate::outputs::Outputs;
use crate::rules::{FuzzyRule, Rules};
use crate::variable::{Fuzzified, FuzzySet, FuzzyVariable, VariableKey, VariableKind, Variables};

/// A named fuzzy system: its variables, its rule base and how to evaluate them.
///
/// Evaluation only borrows the system, so a built system can be cloned or
/// shared behind an `Arc` and run from many threads at once.
#[derive(Clone, Debug, Default)]
pub struct FuzzySystem {
    name: String,
    description: String,
    variables: Variables,
    rules: Rules,
    inference: Inference,
}

impl FuzzySystem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_inference(mut self, inference: Inference) -> Self {
        self.inference = inference;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn inference(&self) -> Inference {
        self.inference
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Result<&FuzzyVariable> {
        self.variables.by_name(name)
    }

    /// Variables that need a crisp value for a run, in declaration order.
    pub fn input_variables(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.variables.iter().filter(|var| var.kind() == VariableKind::Input)
    }

    pub fn output_variable(&self) -> Option<&FuzzyVariable> {
        self.variables.output()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
        range: RangeInclusive<f64>,
    ) -> Result<VariableKey> {
        self.variables.add(name, kind, range)
    }

    /// Adds a set to an existing variable, replacing any set of the same name.
    pub fn add_fuzzy_set(
        &mut self,
        variable: &str,
        set: impl Into<String>,
        shape: Shape,
        params: &[f64],
    ) -> Result<()> {
        let var = self.variables.by_name_mut(variable)?;
        let membership = MembershipFunction::new(shape, params)?;

        var.add_fuzzy_set(FuzzySet::new(set, membership));

        Ok(())
    }

    /// Appends a rule. Every variable it mentions must already exist; its
    /// sets are only checked when the rule is evaluated.
    pub fn add_rule(&mut self, rule: FuzzyRule) -> Result<()> {
        let missing = rule
            .clauses()
            .into_iter()
            .find(|clause| !self.variables.contains(&clause.variable));

        if let Some(missing) = missing {
            return Err(FuzzyError::VariableNotFound(missing.variable.clone()));
        }

        info!(%rule, "rule added");

        self.rules.add(rule);

        Ok(())
    }

    /// Appends a rule given as `var1 set1 operator var2 set2 out_var out_set`.
    pub fn add_rule_tokens(&mut self, tokens: &[&str]) -> Result<()> {
        self.add_rule(FuzzyRule::try_from(tokens)?)
    }

    pub fn fuzzify_all(&self, inputs: &Inputs) -> Fuzzified {
        self.variables.fuzzify_all(inputs)
    }

    pub fn evaluate_rules(&self, inputs: &Inputs) -> Result<Vec<Activation>> {
        let fuzzified = self.fuzzify_all(inputs);

        self.inference.evaluate_rules(&self.rules, &fuzzified)
    }

    /// Runs the system on crisp inputs and defuzzifies the output variable.
    ///
    /// Fails with [`FuzzyError::NoOutputVariable`] or
    /// [`FuzzyError::ZeroTotalDegree`] when there is nothing to predict.
    pub fn run(&self, inputs: &Inputs) -> Result<Outputs> {
        debug!(system = %self.name, rules = self.rules.len(), "running simulation");

        let outputs = self.inference.defuzzify(&self.variables, &self.rules, inputs)?;

        info!(
            system = %self.name,
            variable = outputs.variable(),
            value = outputs.crisp_value(),
            "predicted"
        );

        Ok(outputs)
    }
}

#[cfg(test)]
fn sample_system() -> FuzzySystem {
    let mut system = FuzzySystem::new("tips", "restaurant tipping");

    system.add_variable("service", VariableKind::Input, 0. ..=10.).unwrap();
    system.add_variable("food", VariableKind::Input, 0. ..=10.).unwrap();
    system.add_variable("tip", VariableKind::Output, 0. ..=15.).unwrap();
    system.add_fuzzy_set("service", "poor", Shape::Triangular, &[0., 0., 5.]).unwrap();
    system.add_fuzzy_set("service", "good", Shape::Triangular, &[5., 10., 10.]).unwrap();
    system.add_fuzzy_set("food", "bad", Shape::Trapezoidal, &[0., 0., 2., 6.]).unwrap();
    system.add_fuzzy_set("food", "tasty", Shape::Trapezoidal, &[4., 8., 10., 10.]).unwrap();
    system.add_fuzzy_set("tip", "low", Shape::Triangular, &[0., 5., 10.]).unwrap();
    system.add_fuzzy_set("tip", "high", Shape::Triangular, &[5., 10., 15.]).unwrap();
    system.add_rule_tokens(&["service", "poor", "or", "food", "bad", "tip", "low"]).unwrap();
    system.add_rule_tokens(&["service", "good", "and", "food", "tasty", "tip", "high"]).unwrap();
    system
}

#[test]
fn test_add_fuzzy_set_to_missing_variable() {
    let mut system = sample_system();

    assert_eq!(
        system.add_fuzzy_set("ambience", "cozy", Shape::Triangular, &[0., 5., 10.]),
        Err(FuzzyError::VariableNotFound("ambience".into()))
    );
}

#[test]
fn test_add_rule_checks_variables() {
    let mut system = sample_system();

    assert_eq!(
        system.add_rule_tokens(&["service", "poor", "or", "ambience", "loud", "tip", "low"]),
        Err(FuzzyError::VariableNotFound("ambience".into()))
    );
    assert_eq!(
        system.add_rule_tokens(&["service", "poor", "nand", "food", "bad", "tip", "low"]),
        Err(FuzzyError::InvalidOperator("nand".into()))
    );
    assert_eq!(system.rules().len(), 2);
}

#[test]
fn test_input_variables_skip_outputs() {
    let system = sample_system();
    let names: Vec<_> = system.input_variables().map(FuzzyVariable::name).collect();

    assert_eq!(names, ["service", "food"]);
    assert_eq!(system.output_variable().map(FuzzyVariable::name), Some("tip"));
    assert_eq!(system.name(), "tips");
    assert_eq!(system.description(), "restaurant tipping");
}

#[test]
fn test_run() {
    let system = sample_system();
    let inputs: Inputs = [("service", 7.5), ("food", 5.2)].into_iter().collect();

    // poor = 0, bad = 0.2 -> low 0.2; good = 0.5, tasty = 0.3 -> high 0.3
    let outputs = system.run(&inputs).unwrap();

    assert_eq!(outputs.variable(), "tip");
    assert_eq!(outputs.activations(), [Activation::new("low", 0.2), Activation::new("high", 0.3)]);
    assert_eq!(outputs.centroid("low"), Some(5.));
    assert_eq!(outputs.centroid("high"), Some(10.));
    assert_eq!(outputs.crisp_value(), 8.);
    assert_eq!(outputs.fuzzified()["service"]["good"], 0.5);
}
