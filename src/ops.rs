use std::fmt;
use std::str::FromStr;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;

/// Operator joining the two antecedent clauses of a rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    And,
    Or,
    AndNot,
}

impl Operator {
    pub fn call<F: Float>(self, u: F, v: F, and_not_op: AndNotOp) -> F {
        match self {
            Self::And => F::min(u, v),
            Self::Or => F::max(u, v),
            Self::AndNot => and_not_op.call(u, v),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
            Self::AndNot => f.write_str("and_not"),
        }
    }
}

impl FromStr for Operator {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "and_not" => Ok(Self::AndNot),
            _ => Err(FuzzyError::InvalidOperator(s.to_owned())),
        }
    }
}

/// How the `and_not` operator combines its two clauses.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndNotOp {
    /// `min(0, 1 - u)`, which is always zero. Kept as the default since
    /// existing rule bases were tuned against it.
    #[default]
    Reference,
    /// `min(u, 1 - v)`: the first clause holds and the second does not
    Complement,
}

impl AndNotOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Reference => F::min(F::zero(), F::one() - u),
            Self::Complement => F::min(u, F::one() - v),
        }
    }
}

/// How rule activations are collected before defuzzification.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// One entry per rule carrying the running maximum of its output set.
    /// Only exact duplicates are dropped, so a set reached with different
    /// degrees is counted once per distinct degree.
    #[default]
    PerRule,
    /// One entry per output set carrying its final maximum.
    PerSet,
}

#[test]
fn test_and_or() {
    let op = AndNotOp::default();

    assert_eq!(Operator::And.call(0.3, 0.7, op), 0.3);
    assert_eq!(Operator::Or.call(0.3, 0.7, op), 0.7);
    assert_eq!(Operator::And.call(0f32, 1., op), 0.);
}

#[test]
fn test_reference_and_not_is_always_zero() {
    for u in [0., 0.1, 0.5, 0.9, 1.] {
        for v in [0., 0.4, 1.] {
            assert_eq!(Operator::AndNot.call(u, v, AndNotOp::Reference), 0.);
        }
    }
}

#[test]
fn test_complement_and_not() {
    assert_eq!(Operator::AndNot.call(0.8, 0.25, AndNotOp::Complement), 0.75);
    assert_eq!(Operator::AndNot.call(0.5, 0.25, AndNotOp::Complement), 0.5);
    assert_eq!(Operator::AndNot.call(0.8, 1., AndNotOp::Complement), 0.);
}

#[test]
fn test_operator_from_str() {
    assert_eq!("and".parse::<Operator>(), Ok(Operator::And));
    assert_eq!("or".parse::<Operator>(), Ok(Operator::Or));
    assert_eq!("and_not".parse::<Operator>(), Ok(Operator::AndNot));
    assert_eq!(
        "AND".parse::<Operator>(),
        Err(FuzzyError::InvalidOperator("AND".into()))
    );
    assert_eq!(Operator::AndNot.to_string(), "and_not");
}
