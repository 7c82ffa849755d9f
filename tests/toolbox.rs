use std::sync::Arc;
use std::thread;

use fuzzy_toolbox::{
    Activation, Aggregation, AndNotOp, FuzzyError, FuzzySystem, Inference, Inputs, Shape, VariableKind,
};

/// One input `x` with three sets and an output `y` with `low` (centroid 5)
/// and `high` (centroid 10). At `x = 3`, `a` is 0.3, `b` is 0.7, `c` is 0.5;
/// at `x = 4`, `a` is 0.4 and `b` is 0.6.
fn system(inference: Inference) -> FuzzySystem {
    let mut system = FuzzySystem::new("demo", "two output sets").with_inference(inference);

    system.add_variable("x", VariableKind::Input, -10. ..=30.).unwrap();
    system.add_variable("y", VariableKind::Output, 0. ..=15.).unwrap();
    system.add_fuzzy_set("x", "a", Shape::Triangular, &[0., 10., 20.]).unwrap();
    system.add_fuzzy_set("x", "b", Shape::Trapezoidal, &[-10., -10., 0., 10.]).unwrap();
    system.add_fuzzy_set("x", "c", Shape::Triangular, &[-2., 8., 18.]).unwrap();
    system.add_fuzzy_set("y", "low", Shape::Triangular, &[0., 5., 10.]).unwrap();
    system.add_fuzzy_set("y", "high", Shape::Triangular, &[5., 10., 15.]).unwrap();
    system
}

fn inputs(x: f64) -> Inputs {
    [("x", x)].into_iter().collect()
}

#[test]
fn test_weighted_centroid() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "a", "or", "x", "a", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "b", "and", "x", "b", "y", "high"]).unwrap();

    let outputs = system.run(&inputs(4.)).unwrap();

    assert_eq!(outputs.activations(), [Activation::new("low", 0.4), Activation::new("high", 0.6)]);
    // (0.4 * 5 + 0.6 * 10) / (0.4 + 0.6)
    assert_eq!(outputs.crisp_value(), 8.);
}

#[test]
fn test_repeated_output_set_is_counted_per_distinct_degree() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "a", "or", "x", "a", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "b", "or", "x", "b", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "c", "or", "x", "c", "y", "high"]).unwrap();

    let activations = system.evaluate_rules(&inputs(3.)).unwrap();

    assert_eq!(
        activations,
        [Activation::new("low", 0.3), Activation::new("low", 0.7), Activation::new("high", 0.5)]
    );

    // (0.3 * 5 + 0.7 * 5 + 0.5 * 10) / 1.5
    assert_eq!(system.run(&inputs(3.)).unwrap().crisp_value(), 6.7);
}

#[test]
fn test_per_set_aggregation_counts_each_set_once() {
    let mut system = system(Inference::new(AndNotOp::Reference, Aggregation::PerSet));

    system.add_rule_tokens(&["x", "a", "or", "x", "a", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "b", "or", "x", "b", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "c", "or", "x", "c", "y", "high"]).unwrap();

    let outputs = system.run(&inputs(3.)).unwrap();

    assert_eq!(outputs.activations(), [Activation::new("low", 0.7), Activation::new("high", 0.5)]);
    // (0.7 * 5 + 0.5 * 10) / 1.2
    assert_eq!(outputs.crisp_value(), 7.1);
}

#[test]
fn test_and_not_never_fires_by_default() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "b", "and_not", "x", "a", "y", "low"]).unwrap();

    assert_eq!(system.evaluate_rules(&inputs(4.)).unwrap(), [Activation::new("low", 0.)]);
    assert_eq!(system.run(&inputs(4.)).err(), Some(FuzzyError::ZeroTotalDegree));
}

#[test]
fn test_complement_and_not() {
    let mut system = system(Inference::new(AndNotOp::Complement, Aggregation::PerRule));

    system.add_rule_tokens(&["x", "b", "and_not", "x", "a", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "a", "and_not", "x", "b", "y", "high"]).unwrap();

    // low = min(0.6, 1 - 0.4), high = min(0.4, 1 - 0.6)
    let outputs = system.run(&inputs(4.)).unwrap();

    assert_eq!(outputs.activations(), [Activation::new("low", 0.6), Activation::new("high", 0.4)]);
    assert_eq!(outputs.crisp_value(), 7.);
}

#[test]
fn test_weak_activation_still_predicts() {
    let mut system = FuzzySystem::new("weak", "single low activation");

    system.add_variable("x", VariableKind::Input, 0. ..=40.).unwrap();
    system.add_variable("y", VariableKind::Output, 0. ..=10.).unwrap();
    system.add_fuzzy_set("x", "mid", Shape::Triangular, &[0., 20., 40.]).unwrap();
    system.add_fuzzy_set("y", "low", Shape::Triangular, &[0., 5., 10.]).unwrap();
    system.add_rule_tokens(&["x", "mid", "or", "x", "mid", "y", "low"]).unwrap();

    // mid is 0.05 at x = 1, which rounds to 0.1
    let outputs = system.run(&inputs(1.)).unwrap();

    assert_eq!(outputs.activations(), [Activation::new("low", 0.1)]);
    assert_eq!(outputs.crisp_value(), 5.);

    // 0.15, 0.35, 0.65 and 0.95 round towards their stored values
    for (x, expected) in [(3., 0.1), (7., 0.3), (13., 0.7), (19., 0.9)] {
        assert_eq!(system.evaluate_rules(&inputs(x)).unwrap(), [Activation::new("low", expected)]);
    }
}

#[test]
fn test_no_rule_fires() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "a", "and", "x", "c", "y", "high"]).unwrap();

    let err = system.run(&inputs(25.)).unwrap_err();

    assert_eq!(err, FuzzyError::ZeroTotalDegree);
    assert!(err.is_no_output());
}

#[test]
fn test_empty_rule_base_has_no_output() {
    let system = system(Inference::default());

    assert_eq!(system.run(&inputs(4.)).err(), Some(FuzzyError::ZeroTotalDegree));
}

#[test]
fn test_missing_output_variable() {
    let mut system = FuzzySystem::new("inputs only", "");

    system.add_variable("x", VariableKind::Input, 0. ..=1.).unwrap();
    system.add_fuzzy_set("x", "a", Shape::Triangular, &[0., 0.5, 1.]).unwrap();
    system.add_rule_tokens(&["x", "a", "or", "x", "a", "x", "a"]).unwrap();

    let err = system.run(&inputs(0.5)).unwrap_err();

    assert_eq!(err, FuzzyError::NoOutputVariable);
    assert!(err.is_no_output());
}

#[test]
fn test_unknown_output_set_is_reported() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "a", "or", "x", "a", "y", "medium"]).unwrap();

    assert_eq!(
        system.run(&inputs(4.)).err(),
        Some(FuzzyError::SetNotFound {
            variable: "y".into(),
            set: "medium".into(),
        })
    );
}

#[test]
fn test_missing_crisp_value_defaults_to_zero() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "b", "or", "x", "b", "y", "high"]).unwrap();

    // b is on its plateau at zero
    let outputs = system.run(&Inputs::new()).unwrap();

    assert_eq!(outputs.fuzzified()["x"]["b"], 1.);
    assert_eq!(outputs.crisp_value(), 10.);
}

#[test]
fn test_variable_without_sets_fuzzifies_to_empty() {
    let mut system = FuzzySystem::new("empty", "");

    system.add_variable("pressure", VariableKind::Input, 0. ..=5.).unwrap();

    let fuzzified = system.fuzzify_all(&[("pressure", 2.)].into_iter().collect::<Inputs>());

    assert!(fuzzified["pressure"].is_empty());
}

#[test]
fn test_shared_snapshot_runs_concurrently() {
    let mut system = system(Inference::default());

    system.add_rule_tokens(&["x", "a", "or", "x", "a", "y", "low"]).unwrap();
    system.add_rule_tokens(&["x", "b", "and", "x", "b", "y", "high"]).unwrap();

    let system = Arc::new(system);

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let system = Arc::clone(&system);

                s.spawn(move || system.run(&inputs(4.)).map(|out| out.crisp_value()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(8.));
        }
    });
}
