//! Property-based tests for membership evaluation and rule aggregation

use fuzzy_toolbox::{AndNotOp, Inference, MembershipFunction, Operator, Rules};
use fuzzy_toolbox::{Degrees, Fuzzified, FuzzyRule};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

/// Strictly increasing breakpoints with gaps wide enough to keep ramps well conditioned
fn breakpoints(n: usize) -> impl Strategy<Value = Vec<f64>> {
    (-1000.0..1000.0f64, prop::collection::vec(0.5..100.0f64, n - 1)).prop_map(|(start, gaps)| {
        let mut points = vec![start];

        for gap in gaps {
            let last = points[points.len() - 1];
            points.push(last + gap);
        }

        points
    })
}

fn degree() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

proptest! {
    #[test]
    fn triangular_landmarks(p in breakpoints(3)) {
        let (a, b, c) = (p[0], p[1], p[2]);
        let mf = MembershipFunction::triangular(a, b, c).unwrap();

        prop_assert_eq!(mf.degree_of_membership(a - 1e-6), 0.);
        prop_assert_eq!(mf.degree_of_membership(a), 0.);
        prop_assert!((mf.degree_of_membership((a + b) / 2.) - 0.5).abs() < EPS);
        prop_assert_eq!(mf.degree_of_membership(b), 1.);
        prop_assert!((mf.degree_of_membership((b + c) / 2.) - 0.5).abs() < EPS);
        prop_assert_eq!(mf.degree_of_membership(c), 0.);
        prop_assert_eq!(mf.degree_of_membership(c + 1e-6), 0.);
    }

    #[test]
    fn trapezoidal_plateau_and_slopes(p in breakpoints(4), s in 0.0..=1.0f64, t in 0.0..=1.0f64) {
        let (a, b, c, d) = (p[0], p[1], p[2], p[3]);
        let mf = MembershipFunction::trapezoidal(a, b, c, d).unwrap();
        let (lo, hi) = if s <= t { (s, t) } else { (t, s) };

        prop_assert_eq!(mf.degree_of_membership(b), 1.);
        prop_assert_eq!(mf.degree_of_membership(c), 1.);

        // rising on [a, b]
        let (x1, x2) = (a + lo * (b - a), a + hi * (b - a));
        prop_assert!(mf.degree_of_membership(x1) <= mf.degree_of_membership(x2));

        // falling on [c, d]
        let (x1, x2) = (c + lo * (d - c), c + hi * (d - c));
        prop_assert!(mf.degree_of_membership(x1) >= mf.degree_of_membership(x2));
    }

    #[test]
    fn degree_stays_in_unit_interval(p in breakpoints(4), x in -2000.0..2000.0f64) {
        let tri = MembershipFunction::triangular(p[0], p[1], p[2]).unwrap();
        let trap = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();

        for mf in [tri, trap] {
            let degree = mf.degree_of_membership(x);
            prop_assert!((0.0..=1.0).contains(&degree));
        }
    }

    #[test]
    fn centroid_lies_within_support(p in breakpoints(4)) {
        let mf = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();
        let centroid = mf.centroid();

        prop_assert!(p[0] <= centroid && centroid <= p[3]);
    }

    #[test]
    fn reference_and_not_is_zero(u in degree(), v in degree()) {
        prop_assert_eq!(Operator::AndNot.call(u, v, AndNotOp::Reference), 0.);
    }

    #[test]
    fn running_max_never_decreases(degrees in prop::collection::vec(degree(), 1..12)) {
        let mut values = Degrees::new();
        let mut rules = Rules::new();

        for (i, degree) in degrees.iter().enumerate() {
            let set = format!("s{i}");

            values.insert(set.clone(), *degree);
            rules.add(FuzzyRule::try_from(&["in", set.as_str(), "or", "in", set.as_str(), "out", "target"][..]).unwrap());
        }

        let fuzzified: Fuzzified = [("in".to_string(), values)].into_iter().collect();
        let activations = Inference::default().evaluate_rules(&rules, &fuzzified).unwrap();

        prop_assert_eq!(activations.len(), degrees.len());

        for pair in activations.windows(2) {
            prop_assert!(pair[0].degree <= pair[1].degree);
        }
    }
}
