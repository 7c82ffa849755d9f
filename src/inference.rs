use std::collections::HashMap;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::math::round_tenths;
use crate::ops::{Aggregation, AndNotOp};
use crate::outputs::Outputs;
use crate::rules::{Clause, Rules};
use crate::variable::{Fuzzified, Variables};

/// An output set reached by a rule, with its aggregated degree.
#[derive(Clone, Debug, PartialEq)]
pub struct Activation {
    pub set: String,
    pub degree: f64,
}

impl Activation {
    pub fn new(set: impl Into<String>, degree: f64) -> Self {
        Self {
            set: set.into(),
            degree,
        }
    }
}

/// Rule evaluation and defuzzification settings.
///
/// The default reproduces the reference toolbox exactly, quirks included.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Inference {
    pub and_not_op: AndNotOp,
    pub aggregation: Aggregation,
}

impl Inference {
    pub fn new(and_not_op: AndNotOp, aggregation: Aggregation) -> Self {
        Self {
            and_not_op,
            aggregation,
        }
    }

    /// Evaluates every rule in order, yielding one activation per rule.
    ///
    /// Each activation carries the running maximum of its output set as of
    /// that rule, rounded to one decimal place. Any failing rule aborts the
    /// whole batch.
    pub fn evaluate_rules(&self, rules: &Rules, fuzzified: &Fuzzified) -> Result<Vec<Activation>> {
        let mut running_max: HashMap<&str, f64> = HashMap::new();
        let mut activations = Vec::with_capacity(rules.len());

        for rule in rules.iter() {
            let u = degree_of(fuzzified, &rule.left)?;
            let v = degree_of(fuzzified, &rule.right)?;
            let degree = rule.op.call(u, v, self.and_not_op);
            let best = running_max.entry(rule.consequence.set.as_str()).or_insert(degree);

            *best = f64::max(*best, degree);

            debug!(%rule, u, v, degree, aggregated = *best, "evaluated rule");

            activations.push(Activation::new(rule.consequence.set.as_str(), round_tenths(*best)));
        }

        Ok(activations)
    }

    /// Collapses per-rule activations according to the aggregation setting.
    pub fn aggregate(&self, activations: Vec<Activation>) -> Vec<Activation> {
        match self.aggregation {
            Aggregation::PerRule => {
                let mut seen = HashSet::with_capacity(activations.len());

                activations
                    .into_iter()
                    .filter(|act| seen.insert((act.set.clone(), act.degree.to_bits())))
                    .collect()
            },
            Aggregation::PerSet => {
                // Later entries of a set never carry a lower degree
                let mut per_set = IndexMap::with_capacity(activations.len());

                for act in activations {
                    per_set.insert(act.set, act.degree);
                }

                per_set
                    .into_iter()
                    .map(|(set, degree)| Activation { set, degree })
                    .collect()
            },
        }
    }

    /// Fuzzifies `inputs`, fires `rules` and returns the degree weighted
    /// average of the activated output sets' centroids.
    pub fn defuzzify(&self, variables: &Variables, rules: &Rules, inputs: &Inputs) -> Result<Outputs> {
        let fuzzified = variables.fuzzify_all(inputs);
        let activations = self.aggregate(self.evaluate_rules(rules, &fuzzified)?);
        let output = variables.output().ok_or(FuzzyError::NoOutputVariable)?;
        let mut centroids = IndexMap::with_capacity(activations.len());
        let mut total_degree = 0.;
        let mut weighted_sum = 0.;

        for act in &activations {
            let centroid = output.set(&act.set)?.membership_function().centroid();

            total_degree += act.degree;
            weighted_sum += act.degree * centroid;
            centroids.insert(act.set.clone(), centroid);
        }

        debug!(?activations, ?centroids, total_degree, weighted_sum, "defuzzifying");

        if total_degree == 0. {
            warn!(variable = output.name(), "no rule fired, nothing to defuzzify");

            return Err(FuzzyError::ZeroTotalDegree);
        }

        let crisp_value = round_tenths(weighted_sum / total_degree);

        Ok(Outputs::new(
            output.name().to_owned(),
            crisp_value,
            activations,
            centroids,
            fuzzified,
        ))
    }
}

fn degree_of(fuzzified: &Fuzzified, clause: &Clause) -> Result<f64> {
    let degrees = fuzzified
        .get(&clause.variable)
        .ok_or_else(|| FuzzyError::VariableNotFound(clause.variable.clone()))?;

    degrees
        .get(&clause.set)
        .copied()
        .ok_or_else(|| FuzzyError::SetNotFound {
            variable: clause.variable.clone(),
            set: clause.set.clone(),
        })
}

#[cfg(test)]
fn table(entries: &[(&str, &str, f64)]) -> Fuzzified {
    let mut out = Fuzzified::new();

    for (var, set, degree) in entries {
        out.entry(var.to_string()).or_default().insert(set.to_string(), *degree);
    }

    out
}

#[cfg(test)]
fn rule(tokens: [&str; 7]) -> crate::rules::FuzzyRule {
    crate::rules::FuzzyRule::try_from(&tokens[..]).unwrap()
}

#[test]
fn test_running_max_keeps_one_entry_per_rule() {
    let values = table(&[("a", "x", 0.3), ("b", "y", 0.7), ("b", "z", 0.1)]);
    let rules: Rules = [
        rule(["a", "x", "and", "a", "x", "out", "s"]),
        rule(["b", "y", "or", "b", "z", "out", "s"]),
        rule(["b", "z", "and", "b", "y", "out", "s"]),
    ]
    .into_iter()
    .collect();

    let activations = Inference::default().evaluate_rules(&rules, &values).unwrap();

    assert_eq!(
        activations,
        [Activation::new("s", 0.3), Activation::new("s", 0.7), Activation::new("s", 0.7)]
    );
}

#[test]
fn test_degrees_are_rounded_after_aggregation() {
    let values = table(&[("a", "x", 0.44), ("a", "y", 0.46)]);
    let rules: Rules = [
        rule(["a", "x", "or", "a", "x", "out", "s"]),
        rule(["a", "y", "or", "a", "y", "out", "t"]),
    ]
    .into_iter()
    .collect();

    let activations = Inference::default().evaluate_rules(&rules, &values).unwrap();

    assert_eq!(activations, [Activation::new("s", 0.4), Activation::new("t", 0.5)]);
}

#[test]
fn test_reference_and_not_contributes_zero() {
    let values = table(&[("a", "x", 0.2), ("b", "y", 0.9)]);
    let rules: Rules = [rule(["a", "x", "and_not", "b", "y", "out", "s"])].into_iter().collect();

    let reference = Inference::default().evaluate_rules(&rules, &values).unwrap();
    let complement = Inference::new(AndNotOp::Complement, Aggregation::PerRule)
        .evaluate_rules(&rules, &values)
        .unwrap();

    assert_eq!(reference, [Activation::new("s", 0.)]);
    // min(0.2, 1 - 0.9)
    assert_eq!(complement, [Activation::new("s", 0.1)]);
}

#[test]
fn test_missing_set_aborts_batch() {
    let values = table(&[("a", "x", 0.5)]);
    let rules: Rules = [
        rule(["a", "x", "or", "a", "x", "out", "s"]),
        rule(["a", "x", "or", "a", "nope", "out", "s"]),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        Inference::default().evaluate_rules(&rules, &values),
        Err(FuzzyError::SetNotFound {
            variable: "a".into(),
            set: "nope".into(),
        })
    );

    let rules: Rules = [rule(["ghost", "x", "or", "a", "x", "out", "s"])].into_iter().collect();

    assert_eq!(
        Inference::default().evaluate_rules(&rules, &values),
        Err(FuzzyError::VariableNotFound("ghost".into()))
    );
}

#[test]
fn test_aggregate_per_rule_drops_exact_duplicates_only() {
    let activations = vec![
        Activation::new("low", 0.3),
        Activation::new("low", 0.3),
        Activation::new("low", 0.7),
        Activation::new("high", 0.3),
    ];

    assert_eq!(
        Inference::default().aggregate(activations.clone()),
        [Activation::new("low", 0.3), Activation::new("low", 0.7), Activation::new("high", 0.3)]
    );
    assert_eq!(
        Inference::new(AndNotOp::Reference, Aggregation::PerSet).aggregate(activations),
        [Activation::new("low", 0.7), Activation::new("high", 0.3)]
    );
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: Inference = serde_json::from_str(r#"{"aggregation": "per_set"}"#).unwrap();

    assert_eq!(config, Inference::new(AndNotOp::Reference, Aggregation::PerSet));

    let config: Inference = serde_json::from_str(r#"{"and_not_op": "complement"}"#).unwrap();

    assert_eq!(config, Inference::new(AndNotOp::Complement, Aggregation::PerRule));
    assert!(serde_json::from_str::<Inference>(r#"{"aggregation": "sum"}"#).is_err());
}
